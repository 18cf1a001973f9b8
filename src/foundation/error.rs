/// Crate-wide result alias.
pub type PlanviewResult<T> = Result<T, PlanviewError>;

/// Error type for classification, raster I/O and scene emission.
#[derive(thiserror::Error, Debug)]
pub enum PlanviewError {
    /// Caller-contract violation (mismatched dimensions, out-of-order writer
    /// calls). Surfaced before any output is produced.
    #[error("validation error: {0}")]
    Validation(String),

    /// The input image could not be read or decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The output raster could not be encoded or written.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped external failure (stream I/O, config parsing).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlanviewError {
    /// Build a [`PlanviewError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PlanviewError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`PlanviewError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}
