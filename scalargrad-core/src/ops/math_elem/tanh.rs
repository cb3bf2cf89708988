// scalargrad-core/src/ops/math_elem/tanh.rs

use crate::autograd::BackwardOp;
use crate::value::Value;

/// Hyperbolic tangent, `(e^2a - 1) / (e^2a + 1)`.
///
/// Evaluated with `f64::tanh`, which saturates to ±1 for large inputs instead
/// of producing `inf / inf`. Local derivative: `1 - out^2` times the output gradient.
pub fn tanh_op(a: &Value) -> Value {
    a.graph().push(a.data().tanh(), BackwardOp::Tanh(a.id()), None)
}

impl Value {
    pub fn tanh(&self) -> Value {
        tanh_op(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Graph, Result};
    use approx::assert_relative_eq;

    fn tanh_by_definition(x: f64) -> f64 {
        let e2x = (2.0 * x).exp();
        (e2x - 1.0) / (e2x + 1.0)
    }

    #[test]
    fn test_tanh_forward() {
        let graph = Graph::new();
        for x_val in [-3.0, -0.5, 0.0, 0.8813735870195432, 2.0] {
            let t = tanh_op(&graph.leaf(x_val));
            assert_relative_eq!(t.data(), tanh_by_definition(x_val), epsilon = 1e-12);
        }
        // Saturates instead of overflowing.
        assert_eq!(graph.leaf(1000.0).tanh().data(), 1.0);
    }

    #[test]
    fn test_tanh_backward_matches_analytic() -> Result<()> {
        for x_val in [-2.0, -0.3, 0.0, 0.7, 3.1] {
            let graph = Graph::new();
            let x = graph.leaf(x_val);
            let z = x.tanh();
            z.set_grad(1.0);
            z.backward()?;
            assert_relative_eq!(x.grad(), 1.0 - f64::tanh(x_val).powi(2), epsilon = 1e-6);
        }
        Ok(())
    }
}
