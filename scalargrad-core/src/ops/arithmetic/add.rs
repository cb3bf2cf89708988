// scalargrad-core/src/ops/arithmetic/add.rs

use crate::autograd::BackwardOp;
use crate::error::Result;
use crate::value::{Promote, Value};

/// Adds two nodes of the same graph.
///
/// Local derivative: both operands receive the output gradient unchanged.
///
/// # Errors
/// [`ScalarGradError::GraphMismatch`](crate::ScalarGradError::GraphMismatch)
/// if `b` lives in another graph.
pub fn add_op(a: &Value, b: &Value) -> Result<Value> {
    let b = b.promote(a.graph())?;
    Ok(add_nodes(a, &b))
}

/// `a` and `b` must share a graph.
pub(super) fn add_nodes(a: &Value, b: &Value) -> Value {
    a.graph()
        .push(a.data() + b.data(), BackwardOp::Add(a.id(), b.id()), None)
}

impl Value {
    /// Fallible `self + rhs`; `rhs` may be a node or a numeric scalar.
    pub fn try_add(&self, rhs: impl Promote) -> Result<Value> {
        let rhs = rhs.promote(self.graph())?;
        add_op(self, &rhs)
    }
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
