// scalargrad-core/src/ops/arithmetic/neg.rs

use crate::ops::arithmetic::mul::mul_nodes;
use crate::value::Value;

/// Negation, built as `a * -1`: the result is a multiply node whose second
/// operand is a fresh `-1` leaf.
pub fn neg_op(a: &Value) -> Value {
    let minus_one = a.graph().leaf(-1.0);
    mul_nodes(a, &minus_one)
}
