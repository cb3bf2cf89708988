// scalargrad-core/src/ops/math_elem/exp.rs

use crate::autograd::BackwardOp;
use crate::value::Value;

/// `e^a`. Local derivative: the output value times the output gradient.
///
/// Follows plain `f64` semantics: large inputs overflow to infinity.
pub fn exp_op(a: &Value) -> Value {
    a.graph().push(a.data().exp(), BackwardOp::Exp(a.id()), None)
}

impl Value {
    pub fn exp(&self) -> Value {
        exp_op(self)
    }
}
