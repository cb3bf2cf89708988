//! Reverse-mode gradient propagation.
//!
//! Every derived node carries a [`BackwardOp`]. Calling [`Value::backward`](crate::Value::backward)
//! orders the nodes reachable from the root so that consumers come before
//! the nodes they consume, then applies each node's rule in that order.

pub mod backward;
pub mod backward_op;
pub mod grad_check;
pub(crate) mod graph;

pub use backward_op::BackwardOp;
