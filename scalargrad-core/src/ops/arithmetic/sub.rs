// scalargrad-core/src/ops/arithmetic/sub.rs

use crate::error::Result;
use crate::ops::arithmetic::add::add_nodes;
use crate::ops::arithmetic::neg::neg_op;
use crate::value::{Promote, Value};

/// Subtraction, built as `a + (-b)`.
pub fn sub_op(a: &Value, b: &Value) -> Result<Value> {
    let b = b.promote(a.graph())?;
    Ok(add_nodes(a, &neg_op(&b)))
}

impl Value {
    /// Fallible `self - rhs`; `rhs` may be a node or a numeric scalar.
    pub fn try_sub(&self, rhs: impl Promote) -> Result<Value> {
        let rhs = rhs.promote(self.graph())?;
        sub_op(self, &rhs)
    }
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
