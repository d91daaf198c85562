/// Crate-wide result alias.
pub type DocmotionResult<T> = Result<T, DocmotionError>;

/// Error type for caller-side precondition failures.
///
/// The planning pipeline itself recovers locally from malformed regions,
/// unresolved alignments and empty sections; these variants only surface
/// invalid configuration or invalid input documents, checked before any
/// planning work starts.
#[derive(thiserror::Error, Debug)]
pub enum DocmotionError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("geometry error: {0}")]
    Geometry(String),

    #[error("timeline error: {0}")]
    Timeline(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DocmotionError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::Timeline(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
