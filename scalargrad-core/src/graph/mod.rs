//! Node arena shared by every [`Value`] built on it.
//!
//! Nodes are addressed by stable [`NodeId`] indices. Forward values, operator
//! records and labels live in one vector, gradients in a parallel one, so a
//! node referenced by many parents is stored exactly once.

mod diagnostics;
mod options;

pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink, RecordingSink};
pub use options::GraphOptions;

use crate::autograd::BackwardOp;
use crate::error::{Result, ScalarGradError};
use crate::value::{Scalar, Value};
use log::debug;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Stable index of a node inside its [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Everything fixed at construction time for one node.
#[derive(Debug, Clone)]
pub(crate) struct NodeRecord {
    pub(crate) value: f64,
    pub(crate) op: BackwardOp,
    pub(crate) label: Option<String>,
}

pub(crate) struct Tape {
    pub(crate) nodes: Vec<NodeRecord>,
    pub(crate) grads: Vec<f64>,
    pub(crate) options: GraphOptions,
    sink: Rc<dyn DiagnosticSink>,
}

impl Tape {
    pub(crate) fn check(&self, id: NodeId) -> Result<()> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(ScalarGradError::UnknownNode(id))
        }
    }
}

/// Handle to a node arena. Cloning is cheap and yields a handle to the same arena.
#[derive(Clone)]
pub struct Graph {
    tape: Rc<RefCell<Tape>>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::with_options(GraphOptions::default())
    }

    pub fn with_options(options: GraphOptions) -> Self {
        Graph {
            tape: Rc::new(RefCell::new(Tape {
                nodes: Vec::new(),
                grads: Vec::new(),
                options,
                sink: Rc::new(LogSink),
            })),
        }
    }

    /// Replaces the diagnostics sink, consuming and returning the handle.
    pub fn with_sink(self, sink: impl DiagnosticSink + 'static) -> Self {
        self.set_sink(sink);
        self
    }

    pub fn set_sink(&self, sink: impl DiagnosticSink + 'static) {
        self.tape.borrow_mut().sink = Rc::new(sink);
    }

    pub fn options(&self) -> GraphOptions {
        self.tape.borrow().options
    }

    pub fn set_options(&self, options: GraphOptions) {
        self.tape.borrow_mut().options = options;
    }

    /// Promotes a numeric scalar to an unlabelled leaf node.
    pub fn leaf<S: Scalar>(&self, value: S) -> Value {
        self.push(value.into_f64(), BackwardOp::Leaf, None)
    }

    /// Promotes a numeric scalar to a leaf node carrying a debug label.
    pub fn leaf_labeled<S: Scalar>(&self, value: S, label: impl Into<String>) -> Value {
        self.push(value.into_f64(), BackwardOp::Leaf, Some(label.into()))
    }

    /// Builds a leaf from text, accepting integer or floating-point literals.
    ///
    /// Anything else fails with [`ScalarGradError::NotNumeric`].
    pub fn leaf_from_literal(&self, literal: &str) -> Result<Value> {
        let trimmed = literal.trim();
        let value = match trimmed.parse::<i64>() {
            Ok(int) => int as f64,
            Err(_) => trimmed
                .parse::<f64>()
                .map_err(|_| ScalarGradError::NotNumeric {
                    input: literal.to_string(),
                })?,
        };
        Ok(self.push(value, BackwardOp::Leaf, None))
    }

    /// Number of nodes allocated so far.
    pub fn len(&self) -> usize {
        self.tape.borrow().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tape.borrow().nodes.is_empty()
    }

    /// Resets every gradient accumulator in the arena to zero.
    pub fn zero_grad(&self) {
        let mut tape = self.tape.borrow_mut();
        tape.grads.iter_mut().for_each(|g| *g = 0.0);
        debug!("Graph: cleared {} gradients", tape.grads.len());
    }

    /// Looks up a node by id and returns a handle to it.
    pub fn value(&self, id: NodeId) -> Result<Value> {
        self.tape.borrow().check(id)?;
        Ok(Value::from_parts(self.clone(), id))
    }

    pub fn same_graph(&self, other: &Graph) -> bool {
        Rc::ptr_eq(&self.tape, &other.tape)
    }

    pub(crate) fn push(&self, value: f64, op: BackwardOp, label: Option<String>) -> Value {
        let id = {
            let mut tape = self.tape.borrow_mut();
            let id = NodeId(tape.nodes.len());
            tape.nodes.push(NodeRecord { value, op, label });
            tape.grads.push(0.0);
            id
        };
        debug!("Graph: created node {} ({}) = {}", id, op.tag(), value);
        Value::from_parts(self.clone(), id)
    }

    pub(crate) fn tape(&self) -> Ref<'_, Tape> {
        self.tape.borrow()
    }

    pub(crate) fn tape_mut(&self) -> RefMut<'_, Tape> {
        self.tape.borrow_mut()
    }

    /// Delivers a diagnostic to the current sink. The arena is not borrowed
    /// while the sink runs.
    pub(crate) fn emit(&self, diagnostic: Diagnostic) {
        let sink = Rc::clone(&self.tape.borrow().sink);
        sink.report(&diagnostic);
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tape.try_borrow() {
            Ok(tape) => write!(
                f,
                "Graph(nodes={}, options={:?})",
                tape.nodes.len(),
                tape.options
            ),
            Err(_) => write!(f, "Graph(<borrowed>)"),
        }
    }
}
