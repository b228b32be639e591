//! Error taxonomy for the viewer component
//!
//! Every failure the component can surface is a [`ViewerError`]. Load, format
//! and preset errors are caught and logged at the component boundary so the
//! viewer stays interactive; configuration errors are the only ones that
//! reject a mutation outright.

use thiserror::Error;

/// Errors surfaced by the viewer component.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// The model source's file extension is not one of the supported formats.
    ///
    /// Raised before any scene mutation: a rejected load leaves the previous
    /// model (and any in-flight load) untouched.
    #[error("unsupported model format `{extension}`: expected `glb` or `fbx`")]
    UnsupportedFormat { extension: String },

    /// The format loader reported a failure. The previously displayed model,
    /// if any, is preserved.
    #[error("model load failed: {cause}")]
    ModelLoadFailed { cause: anyhow::Error },

    /// No preset with this name exists. Callers decide the fallback policy
    /// (the attribute reactor falls back to the `Initial` preset).
    #[error("unknown preset `{name}`")]
    PresetNotFound { name: String },

    /// A configuration mutation was rejected by type/range validation.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

impl ViewerError {
    /// Wraps a loader-capability failure.
    pub fn load_failed(cause: anyhow::Error) -> Self {
        Self::ModelLoadFailed { cause }
    }

    /// Builds an [`InvalidConfiguration`](Self::InvalidConfiguration) error
    /// from a human-readable reason.
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
