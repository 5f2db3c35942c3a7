/// Convenience result type used across framefit.
pub type FitResult<T> = Result<T, FitError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum FitError {
    /// Malformed sizes, frame counts, ratios or other out-of-range parameters.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Interpolation method name outside the closed set.
    #[error("unknown interpolation method: {0}")]
    UnknownMethod(String),

    /// Fit policy, frame-adapt, split direction or other named option outside its closed set.
    #[error("unknown policy: {0}")]
    UnknownPolicy(String),

    /// Batches expected to share frame count, channel count or spatial size do not.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Errors when serializing or deserializing parameter documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FitError {
    /// Build a [`FitError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a [`FitError::UnknownMethod`] value.
    pub fn unknown_method(msg: impl Into<String>) -> Self {
        Self::UnknownMethod(msg.into())
    }

    /// Build a [`FitError::UnknownPolicy`] value.
    pub fn unknown_policy(msg: impl Into<String>) -> Self {
        Self::UnknownPolicy(msg.into())
    }

    /// Build a [`FitError::ShapeMismatch`] value.
    pub fn shape_mismatch(msg: impl Into<String>) -> Self {
        Self::ShapeMismatch(msg.into())
    }

    /// Build a [`FitError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
