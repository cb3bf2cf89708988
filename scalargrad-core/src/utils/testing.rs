use crate::value::Value;

/// Checks that a node's forward value is within `tolerance` of `expected_data`.
/// Panics with both values on mismatch.
pub fn check_value_near(actual: &Value, expected_data: f64, tolerance: f64) {
    let data = actual.data();
    let diff = (data - expected_data).abs();
    if !(diff <= tolerance) {
        panic!(
            "Value mismatch for {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
            actual, data, expected_data, diff, tolerance
        );
    }
}

/// Checks that a node's accumulated gradient is within `tolerance` of `expected_grad`.
pub fn check_grad_near(actual: &Value, expected_grad: f64, tolerance: f64) {
    let grad = actual.grad();
    let diff = (grad - expected_grad).abs();
    if !(diff <= tolerance) {
        panic!(
            "Gradient mismatch for {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
            actual.details(),
            grad,
            expected_grad,
            diff,
            tolerance
        );
    }
}
