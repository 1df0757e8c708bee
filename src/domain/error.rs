//! Crate error types.

use std::time::Duration;

/// A failed upstream call: no usable HTTP exchange took place.
///
/// Non-2xx answers are not errors at this level. They completed an exchange
/// and carry a status and body the caller may still want, so they come back
/// as ordinary [`crate::domain::upstream::UpstreamResponse`] values.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Transport(String),

    #[error("upstream request timed out after {after:?}")]
    Timeout { after: Duration },
}

/// Top-level error type for vnfeed.
#[derive(Debug, thiserror::Error)]
pub enum VnfeedError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl From<&VnfeedError> for std::process::ExitCode {
    fn from(err: &VnfeedError) -> Self {
        let code: u8 = match err {
            VnfeedError::ConfigParse { .. }
            | VnfeedError::ConfigMissing { .. }
            | VnfeedError::ConfigInvalid { .. } => 2,
            VnfeedError::Upstream(_) => 3,
        };
        std::process::ExitCode::from(code)
    }
}
