// scalargrad-core/src/ops/arithmetic/mul.rs

use crate::autograd::BackwardOp;
use crate::error::Result;
use crate::value::{Promote, Value};

/// Multiplies two nodes of the same graph.
///
/// Local derivative: each operand receives the other operand's value times
/// the output gradient.
pub fn mul_op(a: &Value, b: &Value) -> Result<Value> {
    let b = b.promote(a.graph())?;
    Ok(mul_nodes(a, &b))
}

/// `a` and `b` must share a graph.
pub(super) fn mul_nodes(a: &Value, b: &Value) -> Value {
    a.graph()
        .push(a.data() * b.data(), BackwardOp::Mul(a.id(), b.id()), None)
}

impl Value {
    /// Fallible `self * rhs`; `rhs` may be a node or a numeric scalar.
    pub fn try_mul(&self, rhs: impl Promote) -> Result<Value> {
        let rhs = rhs.promote(self.graph())?;
        mul_op(self, &rhs)
    }
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
