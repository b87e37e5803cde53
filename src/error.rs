//! Error types for pathfit-nn.

use thiserror::Error;

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, NetError>;

#[derive(Error, Debug)]
pub enum NetError {
    /// Layer definition cannot form a feedforward network.
    #[error("invalid architecture: {0}")]
    InvalidArchitecture(String),

    /// A stored parameter slot holds a different number of scalars than the
    /// network's shape requires. The network keeps its in-memory parameters.
    #[error("network {id}: expected {expected} parameters, found {found}")]
    ParameterCountMismatch {
        id: u32,
        expected: usize,
        found: usize,
    },

    /// Closed-form export only exists for single-input, single-output shapes.
    #[error("formula export requires 1 input and 1 output (network has {input} in, {output} out)")]
    UnsupportedShape { input: usize, output: usize },

    /// A persisted line is not a decimal scalar.
    #[error("network {id}: line {line} is not a number: {value:?}")]
    InvalidScalar {
        id: u32,
        line: usize,
        value: String,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
