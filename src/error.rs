use std::time::Duration;

use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// Error taxonomy of the conversion pipeline.
///
/// The enum is `Clone` so a single-flight cache can hand the leader's
/// failure to every coalesced waiter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChartError {
    /// The caller handed us an unusable request (empty instrument,
    /// unparseable timeframe). Never retried, never cached.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The external analysis engine reported a failure. The cache stays
    /// untouched so a later call retries from scratch.
    #[error("analysis engine failure: {0}")]
    EngineFailure(String),

    /// The engine did not finish within the caller-supplied bound.
    #[error("analysis engine timed out after {timeout:?}")]
    EngineTimeout { timeout: Duration },

    /// Engine output violated a structural invariant (non-monotonic bar
    /// indices, inverted zone bounds, dangling index references).
    #[error("malformed analysis data: {0}")]
    DataShape(String),
}

impl ChartError {
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    #[must_use]
    pub fn engine_failure(message: impl Into<String>) -> Self {
        Self::EngineFailure(message.into())
    }

    #[must_use]
    pub fn data_shape(message: impl Into<String>) -> Self {
        Self::DataShape(message.into())
    }
}
