/// Convenience result type used across blinkmorph.
pub type BlinkResult<T> = Result<T, BlinkError>;

/// Error taxonomy for the fallible boundary of the engine.
///
/// Sampling, interpolation and timeline stepping are infallible; errors only come from
/// constructing profiles, scripts and settings out of caller-provided values.
#[derive(thiserror::Error, Debug)]
pub enum BlinkError {
    /// Invalid caller-provided geometry or profile parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid animation script or settings values.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BlinkError {
    /// Build a [`BlinkError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BlinkError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`BlinkError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for BlinkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
