#![deny(missing_docs)]

/// Convenience result type used across revealmask.
pub type MaskResult<T> = Result<T, MaskError>;

/// Top-level error taxonomy used by mask generation APIs.
#[derive(thiserror::Error, Debug)]
pub enum MaskError {
    /// Unknown kinds, missing keys or out-of-range values in a request.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid dimensions, buffers or arguments passed to engine APIs.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failures while building orders, profiles or masks.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing requests.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MaskError {
    /// Build a [`MaskError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`MaskError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MaskError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`MaskError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`MaskError::Config`] value for a required key that was not supplied.
    pub fn missing_key(owner: &str, key: &str) -> Self {
        Self::Config(format!("{owner} requires '{key}'"))
    }
}

impl From<serde_json::Error> for MaskError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
