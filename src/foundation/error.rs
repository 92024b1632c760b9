/// Convenience result type used across traitmint.
pub type TraitmintResult<T> = Result<T, TraitmintError>;

/// Top-level error taxonomy used by catalog, generation and output APIs.
#[derive(thiserror::Error, Debug)]
pub enum TraitmintError {
    /// Invalid trait table, asset set or run configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while sampling or generating combinations.
    #[error("generation error: {0}")]
    Generation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TraitmintError {
    /// Build a [`TraitmintError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TraitmintError::Generation`] value.
    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    /// Build a [`TraitmintError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
