/// Convenience result type used throughout the crate.
pub type HypnoticResult<T> = Result<T, HypnoticError>;

/// Errors surfaced by frame construction, property bags and per-frame processing.
///
/// Expected control flow (unknown mode strings, out-of-range thresholds, empty frames) is corrected
/// silently and never produces one of these.
#[derive(thiserror::Error, Debug)]
pub enum HypnoticError {
    /// Caller-supplied data is malformed (buffer geometry, property types).
    #[error("validation error: {0}")]
    Validation(String),

    /// A frame or table buffer could not be allocated.
    #[error("allocation error: {0}")]
    Allocation(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HypnoticError {
    /// Build a [`HypnoticError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HypnoticError::Allocation`] value.
    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::Allocation(msg.into())
    }

    /// Build a [`HypnoticError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for HypnoticError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

/// Allocate a zeroed byte buffer, reporting allocation failure instead of aborting.
pub(crate) fn try_zeroed(len: usize, what: &str) -> HypnoticResult<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|e| HypnoticError::allocation(format!("{what} ({len} bytes): {e}")))?;
    buf.resize(len, 0);
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
