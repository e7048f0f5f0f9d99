use thiserror::Error;

use crate::aggregate::ResultSet;

/// Errors raised while persisting a [`ResultSet`].
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Destination for the final category → products mapping.
pub trait ResultSink {
    /// Persists `results` durably.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] if the results cannot be serialized or written.
    fn persist(&self, results: &ResultSet) -> Result<(), SinkError>;
}
