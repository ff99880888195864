/// Convenience result type used across Flipbook.
pub type FlipbookResult<T> = Result<T, FlipbookError>;

/// Top-level error taxonomy used by pipeline APIs.
///
/// All variants are fatal to the running job and leave no partial artifact behind;
/// none corrupt process state, so the caller may immediately start a new job.
#[derive(thiserror::Error, Debug)]
pub enum FlipbookError {
    /// Invalid user-provided configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The drawing target is unavailable or misconfigured.
    #[error("surface error: {0}")]
    Surface(String),

    /// Failure during the frame sampling/raster loop.
    #[error("capture error: {0}")]
    Capture(String),

    /// Failure to initialize or run an animation encoder backend.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FlipbookError {
    /// Build a [`FlipbookError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FlipbookError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`FlipbookError::Capture`] value.
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    /// Build a [`FlipbookError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`FlipbookError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
