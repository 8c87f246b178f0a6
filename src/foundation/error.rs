/// Result alias used across the crate.
pub type StarmapResult<T> = Result<T, StarmapError>;

/// Top-level error type for config, wizard, persistence and rendering failures.
#[derive(thiserror::Error, Debug)]
pub enum StarmapError {
    /// Input or config value failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wizard navigation or step ownership was violated.
    #[error("navigation error: {0}")]
    Navigation(String),

    /// Sky chart decode or raster compositing failed.
    #[error("render error: {0}")]
    Render(String),

    /// Durable store could not be read or written.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// JSON or URL (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped error from a lower layer.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StarmapError {
    /// Build a [`StarmapError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StarmapError::Navigation`].
    pub fn navigation(msg: impl Into<String>) -> Self {
        Self::Navigation(msg.into())
    }

    /// Build a [`StarmapError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`StarmapError::Persistence`].
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Build a [`StarmapError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
