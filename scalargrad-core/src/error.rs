use crate::graph::NodeId;
use thiserror::Error;

/// Custom error type for the scalargrad engine.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum ScalarGradError {
    #[error("Cannot build a leaf from non-numeric input {input:?}: only integer or floating-point scalars are supported")]
    NotNumeric { input: String },

    #[error("Power domain error: {base} ** {exponent} is not a finite real number")]
    PowerDomain { base: f64, exponent: f64 },

    #[error("Operands belong to different graphs")]
    GraphMismatch,

    #[error("Node {0} does not exist in this graph")]
    UnknownNode(NodeId),
}

pub type Result<T> = std::result::Result<T, ScalarGradError>;
