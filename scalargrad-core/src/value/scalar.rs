use crate::error::{Result, ScalarGradError};
use crate::graph::Graph;
use crate::value::Value;
use num_traits::AsPrimitive;

/// Numeric primitives that can be promoted to a leaf node.
///
/// Implemented for every built-in integer and floating-point type, which is
/// what keeps non-numeric leaves from being constructed at all.
pub trait Scalar: AsPrimitive<f64> {
    fn into_f64(self) -> f64 {
        self.as_()
    }
}

/// Total conversion from "node or numeric scalar" to a node of a given graph.
///
/// Every operator entry point, including the reflected `scalar op value`
/// forms, goes through this.
pub trait Promote {
    fn promote(self, graph: &Graph) -> Result<Value>;
}

impl Promote for Value {
    fn promote(self, graph: &Graph) -> Result<Value> {
        (&self).promote(graph)
    }
}

impl Promote for &Value {
    fn promote(self, graph: &Graph) -> Result<Value> {
        if self.graph().same_graph(graph) {
            Ok(self.clone())
        } else {
            Err(ScalarGradError::GraphMismatch)
        }
    }
}

macro_rules! impl_scalar {
    ($($t:ty),*) => {
        $(
            impl Scalar for $t {}

            impl Promote for $t {
                fn promote(self, graph: &Graph) -> Result<Value> {
                    Ok(graph.leaf(self))
                }
            }
        )*
    };
}

impl_scalar!(f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
