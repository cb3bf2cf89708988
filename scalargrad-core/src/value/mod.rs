//! The user-facing node handle.

mod debug;
mod scalar;

pub use scalar::{Promote, Scalar};

use crate::autograd::BackwardOp;
use crate::graph::{Graph, NodeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// How a node was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpTag {
    Leaf,
    Add,
    Mul,
    Pow,
    Exp,
    Tanh,
}

impl fmt::Display for OpTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            OpTag::Leaf => "",
            OpTag::Add => "+",
            OpTag::Mul => "*",
            OpTag::Pow => "**",
            OpTag::Exp => "exp",
            OpTag::Tanh => "tanh",
        };
        f.write_str(symbol)
    }
}

/// A scalar node in a computation graph.
///
/// A `Value` is a handle: cloning it does not copy the node, and two handles
/// compare equal only when they point at the same node of the same graph.
/// The forward value and the operator record are fixed at construction;
/// only the gradient accumulator changes afterwards.
#[derive(Clone)]
pub struct Value {
    graph: Graph,
    id: NodeId,
}

impl Value {
    pub(crate) fn from_parts(graph: Graph, id: NodeId) -> Self {
        Value { graph, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Forward-computed value.
    pub fn data(&self) -> f64 {
        self.graph.tape().nodes[self.id.0].value
    }

    /// Current content of the gradient accumulator.
    pub fn grad(&self) -> f64 {
        self.graph.tape().grads[self.id.0]
    }

    /// Overwrites the gradient accumulator. Used to seed the root before `backward()`.
    pub fn set_grad(&self, grad: f64) {
        self.graph.tape_mut().grads[self.id.0] = grad;
    }

    pub fn zero_grad(&self) {
        self.set_grad(0.0);
    }

    pub fn label(&self) -> Option<String> {
        self.graph.tape().nodes[self.id.0].label.clone()
    }

    /// Labels are debug-only and never influence computation.
    pub fn set_label(&self, label: impl Into<String>) {
        self.graph.tape_mut().nodes[self.id.0].label = Some(label.into());
    }

    pub fn with_label(self, label: impl Into<String>) -> Self {
        self.set_label(label);
        self
    }

    pub fn op_tag(&self) -> OpTag {
        self.backward_op().tag()
    }

    pub fn is_leaf(&self) -> bool {
        self.op_tag() == OpTag::Leaf
    }

    /// Distinct operands that produced this node. `x * x` has a single child.
    pub fn children(&self) -> Vec<Value> {
        self.backward_op()
            .children()
            .into_iter()
            .map(|id| Value::from_parts(self.graph.clone(), id))
            .collect()
    }

    pub(crate) fn backward_op(&self) -> BackwardOp {
        self.graph.tape().nodes[self.id.0].op
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.graph.same_graph(&other.graph)
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_identity_equality() {
        let graph = Graph::new();
        let a = graph.leaf(1.0);
        let b = graph.leaf(1.0);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);

        let elsewhere = Graph::new().leaf(1.0);
        assert_eq!(elsewhere.id(), a.id());
        assert_ne!(a, elsewhere);
    }

    #[test]
    fn test_children_are_deduplicated() {
        let graph = Graph::new();
        let x = graph.leaf(3.0);
        let y = graph.leaf(4.0);
        let square = &x * &x;
        let product = &x * &y;
        assert_eq!(square.children(), vec![x.clone()]);
        let children: HashSet<Value> = product.children().into_iter().collect();
        assert_eq!(children, HashSet::from([x.clone(), y.clone()]));
        assert!(x.children().is_empty());
        assert!(x.is_leaf());
        assert!(!square.is_leaf());
    }

    #[test]
    fn test_op_tags() {
        let graph = Graph::new();
        let x = graph.leaf(0.5);
        assert_eq!(x.op_tag(), OpTag::Leaf);
        assert_eq!((&x + 1.0).op_tag(), OpTag::Add);
        assert_eq!((&x * 2.0).op_tag(), OpTag::Mul);
        assert_eq!(x.pow(2.0).op_tag(), OpTag::Pow);
        assert_eq!(x.exp().op_tag(), OpTag::Exp);
        assert_eq!(x.tanh().op_tag(), OpTag::Tanh);
        // Derived operators are built from the primitives.
        assert_eq!((-&x).op_tag(), OpTag::Mul);
        assert_eq!((&x - 1.0).op_tag(), OpTag::Add);
        assert_eq!((&x / 2.0).op_tag(), OpTag::Mul);
    }

    #[test]
    fn test_labels_have_no_semantic_effect() {
        let graph = Graph::new();
        let x = graph.leaf(2.0).with_label("x");
        let y = graph.leaf(2.0);
        assert_eq!(x.label().as_deref(), Some("x"));
        assert_eq!(y.label(), None);
        assert_eq!((&x * 3.0).data(), (&y * 3.0).data());
        y.set_label("y");
        assert_eq!(y.label().as_deref(), Some("y"));
    }
}
