/// Result alias used throughout the crate.
pub type ChoroResult<T> = Result<T, ChoroError>;

/// Error taxonomy for loading, rendering and encoding.
#[derive(thiserror::Error, Debug)]
pub enum ChoroError {
    /// Invalid configuration, scale definition or frame geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// Missing or malformed case table / boundary data.
    #[error("input error: {0}")]
    Input(String),

    /// Rasterization or text layout failure.
    #[error("render error: {0}")]
    Render(String),

    /// Video encoder unavailable or failed.
    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChoroError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
