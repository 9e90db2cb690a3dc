//! Crate error type.

use crate::facade::PreciseError;

/// Errors surfaced at the crate boundary.
///
/// The optimizer and router themselves are total; only configuration
/// validation, request resolution, the external precise router and
/// history export can fail.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A routing request references a node that is not in the request.
    #[error("edge {edge} references unknown node {node}")]
    UnknownNode { edge: String, node: String },

    /// The injected precise router failed. Passed through unchanged.
    #[error(transparent)]
    Precise(#[from] PreciseError),

    /// History could not be serialized.
    #[error("export failed: {0}")]
    Export(String),
}

impl From<serde_json::Error> for LayoutError {
    fn from(err: serde_json::Error) -> Self {
        LayoutError::Export(err.to_string())
    }
}

impl From<csv::Error> for LayoutError {
    fn from(err: csv::Error) -> Self {
        LayoutError::Export(err.to_string())
    }
}
