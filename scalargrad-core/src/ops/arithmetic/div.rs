// scalargrad-core/src/ops/arithmetic/div.rs

use crate::error::Result;
use crate::ops::arithmetic::mul::mul_nodes;
use crate::ops::arithmetic::pow::pow_op;
use crate::value::{Promote, Value};

/// Division, built as `a * b^-1`.
///
/// # Errors
/// [`ScalarGradError::PowerDomain`](crate::ScalarGradError::PowerDomain) when
/// `b` is zero, raised by the inner power.
pub fn div_op(a: &Value, b: &Value) -> Result<Value> {
    let b = b.promote(a.graph())?;
    let inverse = pow_op(&b, -1.0)?;
    Ok(mul_nodes(a, &inverse))
}

impl Value {
    /// Fallible `self / rhs`; `rhs` may be a node or a numeric scalar.
    pub fn try_div(&self, rhs: impl Promote) -> Result<Value> {
        let rhs = rhs.promote(self.graph())?;
        div_op(self, &rhs)
    }
}

#[cfg(test)]
#[path = "div_test.rs"]
mod tests;
