// Main modules of the crate
pub mod autograd;
pub mod error;
pub mod graph;
pub mod ops;
pub mod value;

pub mod utils;

// Re-export the main handle types so they are reachable as `scalargrad_core::Value`
pub use graph::{Diagnostic, DiagnosticSink, Graph, GraphOptions, LogSink, NodeId, RecordingSink};
pub use value::{OpTag, Promote, Scalar, Value};
// Re-export traits required by public functions
pub use num_traits;

pub use error::{Result, ScalarGradError};
