use thiserror::Error;

/// The result type used across the crate.
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Failures raised by the engine.
///
/// Every variant signals a caller error and is raised at the call site; the
/// engine never retries or recovers internally.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("shape mismatch in {what}: got {got}, expected {expected}")]
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },

    #[error("the number of synapses in the {layer} layer differs: got {got}, expected {expected}")]
    SynapseLayerMismatch {
        layer: usize,
        got: usize,
        expected: usize,
    },

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    /// A cost strategy id with no implementation behind it.
    #[error("cost strategy {0} is not implemented")]
    NotImplemented(u8),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("the dataset is empty")]
    EmptyDataset,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
