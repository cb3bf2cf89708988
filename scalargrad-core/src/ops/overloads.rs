// `std::ops` sugar over the fallible `*_op` functions.
//
// Right-hand operands go through `Promote`, so `&x + &y`, `&x + 2` and
// `&x + 2.5` all share one impl. Reflected forms (`2 + &x`) promote the
// scalar to a leaf in the right operand's graph and then apply the normal
// operator. Errors panic with the underlying message.
//
// Reflected forms exist for `f64` and `i32` only: with a single candidate per
// literal kind, bare literals like `3 + &x` resolve without annotations.

use crate::ops::arithmetic::{add_op, div_op, mul_op, neg_op, sub_op};
use crate::value::{Promote, Value};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $op_fn:ident, $name:literal) => {
        impl<R: Promote> $trait<R> for &Value {
            type Output = Value;

            fn $method(self, rhs: R) -> Value {
                rhs.promote(self.graph())
                    .and_then(|rhs| $op_fn(self, &rhs))
                    .unwrap_or_else(|e| panic!("Value {} failed: {}", $name, e))
            }
        }

        impl<R: Promote> $trait<R> for Value {
            type Output = Value;

            fn $method(self, rhs: R) -> Value {
                (&self).$method(rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, add_op, "addition");
impl_binary_op!(Sub, sub, sub_op, "subtraction");
impl_binary_op!(Mul, mul, mul_op, "multiplication");
impl_binary_op!(Div, div, div_op, "division");

macro_rules! impl_reflected_op {
    ($trait:ident, $method:ident; $($t:ty),*) => {
        $(
            impl $trait<&Value> for $t {
                type Output = Value;

                fn $method(self, rhs: &Value) -> Value {
                    rhs.graph().leaf(self).$method(rhs)
                }
            }

            impl $trait<Value> for $t {
                type Output = Value;

                fn $method(self, rhs: Value) -> Value {
                    rhs.graph().leaf(self).$method(&rhs)
                }
            }
        )*
    };
}

impl_reflected_op!(Add, add; f64, i32);
impl_reflected_op!(Sub, sub; f64, i32);
impl_reflected_op!(Mul, mul; f64, i32);
impl_reflected_op!(Div, div; f64, i32);

impl Neg for &Value {
    type Output = Value;

    fn neg(self) -> Value {
        neg_op(self)
    }
}

impl Neg for Value {
    type Output = Value;

    fn neg(self) -> Value {
        neg_op(&self)
    }
}

/// `x += rhs` rebinds `x` to a new sum node; the old node is left untouched.
impl<R: Promote> AddAssign<R> for Value {
    fn add_assign(&mut self, rhs: R) {
        *self = &*self + rhs;
    }
}

/// `x -= rhs` rebinds `x` to a new difference node.
impl<R: Promote> SubAssign<R> for Value {
    fn sub_assign(&mut self, rhs: R) {
        *self = &*self - rhs;
    }
}
