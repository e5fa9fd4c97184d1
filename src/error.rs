use thiserror::Error;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type shared by the matrix core, layers and the network.
///
/// Every precondition violation is surfaced immediately to the caller;
/// nothing is recovered or retried internally.
#[derive(Error, Debug)]
pub enum Error {
    /// Dimension or stride mismatch in matrix construction, indexing or
    /// binary operations.
    #[error("shape mismatch: {0}")]
    Shape(String),

    /// Invalid numeric argument, e.g. a negative `elu` alpha or a division
    /// by an exact-zero scalar.
    #[error("invalid argument: {0}")]
    Domain(String),

    /// Layer widths that do not chain, or a network invoked with no layers.
    #[error("topology error: {0}")]
    Topology(String),

    /// A declared but unimplemented operation (Mish/Delu derivatives,
    /// min-max and robust scalers).
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// IO error while exporting the loss history.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error while exporting the loss history.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
