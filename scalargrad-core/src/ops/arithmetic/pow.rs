// scalargrad-core/src/ops/arithmetic/pow.rs

use crate::autograd::BackwardOp;
use crate::error::{Result, ScalarGradError};
use crate::value::{Scalar, Value};

/// Raises a node to a fixed real exponent. The exponent is a plain number,
/// not a node, so no gradient flows into it.
///
/// Local derivative: `n * x^(n-1)` times the output gradient.
///
/// # Errors
/// [`ScalarGradError::PowerDomain`] when the result is not a finite real
/// number for finite inputs, e.g. `0 ** -1` or `(-8) ** 0.5`.
pub fn pow_op(base: &Value, exponent: f64) -> Result<Value> {
    let x = base.data();
    let value = x.powf(exponent);
    if !value.is_finite() && x.is_finite() && exponent.is_finite() {
        return Err(ScalarGradError::PowerDomain { base: x, exponent });
    }
    Ok(base.graph().push(
        value,
        BackwardOp::Pow {
            base: base.id(),
            exponent,
        },
        None,
    ))
}

impl Value {
    /// Fallible `self ** exponent`.
    pub fn try_pow(&self, exponent: impl Scalar) -> Result<Value> {
        pow_op(self, exponent.into_f64())
    }

    /// `self ** exponent`.
    ///
    /// # Panics
    /// On a power domain error; use [`Value::try_pow`] to handle it.
    pub fn pow(&self, exponent: impl Scalar) -> Value {
        self.try_pow(exponent)
            .unwrap_or_else(|e| panic!("Value power operation failed: {}", e))
    }
}

#[cfg(test)]
#[path = "pow_test.rs"]
mod tests;
