use crate::error::ScalarGradError;
use crate::graph::{Graph, GraphOptions};
use crate::value::Value;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}: analytical grad {analytical_grad} != numerical grad {numerical_grad}. Difference: {difference}")]
    GradientMismatch {
        input_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(ScalarGradError),
    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(ScalarGradError),
    #[error("Numerical gradient is NaN or infinite for input {input_index}. Loss+: {loss_plus}, Loss-: {loss_minus}")]
    NumericalGradNonFinite {
        input_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
}

fn quiet_graph() -> Graph {
    // The output is seeded before backward, which would always trip the stale scan.
    Graph::with_options(GraphOptions::default().warn_on_stale_gradients(false))
}

fn evaluate<F>(func: &F, inputs: &[f64]) -> Result<f64, GradCheckError>
where
    F: Fn(&[Value]) -> Result<Value, ScalarGradError>,
{
    let graph = quiet_graph();
    let leaves: Vec<Value> = inputs.iter().map(|&x| graph.leaf(x)).collect();
    func(&leaves)
        .map(|out| out.data())
        .map_err(GradCheckError::ForwardPassError)
}

/// Checks analytical gradients against central finite differences.
///
/// `func` is evaluated on fresh leaves built from `inputs`; its output is
/// seeded with 1.0 and back-propagated. Each leaf gradient must then match
/// `(f(x + eps) - f(x - eps)) / 2eps` within `abs_tol` / `rel_tol`.
pub fn check_grad<F>(
    func: F,
    inputs: &[f64],
    epsilon: f64,
    abs_tol: f64,
    rel_tol: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Value]) -> Result<Value, ScalarGradError>,
{
    // --- 1. Analytical gradients ---
    let graph = quiet_graph();
    let leaves: Vec<Value> = inputs.iter().map(|&x| graph.leaf(x)).collect();
    let output = func(&leaves).map_err(GradCheckError::ForwardPassError)?;
    output.set_grad(1.0);
    output
        .backward()
        .map_err(GradCheckError::BackwardPassError)?;

    // --- 2. Numerical gradients, one input at a time ---
    let mut perturbed = inputs.to_vec();
    for (i, leaf) in leaves.iter().enumerate() {
        let original = perturbed[i];

        perturbed[i] = original + epsilon;
        let loss_plus = evaluate(&func, &perturbed)?;
        perturbed[i] = original - epsilon;
        let loss_minus = evaluate(&func, &perturbed)?;
        perturbed[i] = original;

        let numerical_grad = (loss_plus - loss_minus) / (2.0 * epsilon);
        if !numerical_grad.is_finite() {
            return Err(GradCheckError::NumericalGradNonFinite {
                input_index: i,
                loss_plus,
                loss_minus,
            });
        }

        let analytical_grad = leaf.grad();
        if !approx::relative_eq!(
            analytical_grad,
            numerical_grad,
            epsilon = abs_tol,
            max_relative = rel_tol
        ) {
            return Err(GradCheckError::GradientMismatch {
                input_index: i,
                analytical_grad,
                numerical_grad,
                difference: (analytical_grad - numerical_grad).abs(),
            });
        }
    }

    Ok(())
}
