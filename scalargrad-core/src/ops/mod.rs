// Operator dispatch: forward value plus the local-derivative record.
pub mod arithmetic;
pub mod math_elem;
mod overloads;

pub use arithmetic::{add_op, div_op, mul_op, neg_op, pow_op, sub_op};
pub use math_elem::{exp_op, tanh_op};
