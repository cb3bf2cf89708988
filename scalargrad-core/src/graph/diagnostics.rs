use crate::graph::NodeId;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Non-fatal conditions observed by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A node reachable from the backward root already held a nonzero
    /// gradient when the pass started. Reported at most once per pass.
    StaleGradient { node: NodeId, gradient: f64 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::StaleGradient { node, gradient } => write!(
                f,
                "Detected non-zero gradients (node {} has grad {}). Did you forget to clear gradients?",
                node, gradient
            ),
        }
    }
}

/// Receives diagnostics emitted by a graph.
///
/// The default sink is [`LogSink`]. Swap it with [`Graph::set_sink`](crate::Graph::set_sink)
/// to observe diagnostics directly.
pub trait DiagnosticSink {
    fn report(&self, diagnostic: &Diagnostic);
}

/// Forwards every diagnostic to `log::warn!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: &Diagnostic) {
        log::warn!("{}", diagnostic);
    }
}

/// Keeps every diagnostic in memory. Clones share the same buffer, so a test
/// can hand one clone to the graph and inspect the other.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    records: Rc<RefCell<Vec<Diagnostic>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Diagnostic> {
        self.records.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        log::warn!("{}", diagnostic);
        self.records.borrow_mut().push(diagnostic.clone());
    }
}
