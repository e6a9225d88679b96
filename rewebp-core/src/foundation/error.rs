/// Convenience result type used across rewebp.
pub type RewebpResult<T> = Result<T, RewebpError>;

/// Top-level error taxonomy used by pipeline APIs.
///
/// Decode failures degrade along the provider chain before surfacing as
/// [`RewebpError::DecodeFailed`]; compression-phase failures are terminal for
/// that attempt and are never retried automatically.
#[derive(thiserror::Error, Debug)]
pub enum RewebpError {
    /// Input refused before decode was attempted (oversized or wrong type).
    #[error("input rejected: {0}")]
    InputRejected(String),

    /// Every decode provider failed for this input.
    #[error("decode failed: {0}")]
    DecodeFailed(String),

    /// Source dimensions could not be resolved during compression.
    #[error("dimension unresolvable: {0}")]
    DimensionUnresolvable(String),

    /// The encoder backend could not be constructed.
    #[error("encoder unavailable: {0}")]
    EncoderUnavailable(String),

    /// The encoder rejected the job; no partial file was emitted.
    #[error("encode failed: {0}")]
    EncodeFailed(String),

    /// Invalid caller-provided data or a busy session.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RewebpError {
    /// Build a [`RewebpError::InputRejected`] value.
    pub fn input_rejected(msg: impl Into<String>) -> Self {
        Self::InputRejected(msg.into())
    }

    /// Build a [`RewebpError::DecodeFailed`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeFailed(msg.into())
    }

    /// Build a [`RewebpError::DimensionUnresolvable`] value.
    pub fn dimension(msg: impl Into<String>) -> Self {
        Self::DimensionUnresolvable(msg.into())
    }

    /// Build a [`RewebpError::EncoderUnavailable`] value.
    pub fn encoder_unavailable(msg: impl Into<String>) -> Self {
        Self::EncoderUnavailable(msg.into())
    }

    /// Build a [`RewebpError::EncodeFailed`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::EncodeFailed(msg.into())
    }

    /// Build a [`RewebpError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
