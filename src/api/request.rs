use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{DisplayConfig, EngineOptions, Timeframe};
use crate::engine::{AnalysisRequest, TimeWindow};
use crate::error::{ChartError, ChartResult};

/// Cache identity for one analysis computation.
///
/// Only algorithm-affecting options participate: display flags change what
/// is shown, not what the engine computes, so one cached bundle serves
/// every visibility permutation. Equality and hashing are structural,
/// which makes the key independent of option insertion order by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestKey {
    pub instrument: String,
    pub timeframe: Timeframe,
    pub options: EngineOptions,
}

/// One chart-loading request.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadRequest {
    pub instrument: String,
    pub timeframe: Timeframe,
    pub window: TimeWindow,
    pub config: DisplayConfig,
    /// Forwarded to the engine as its work bound.
    pub engine_timeout: Option<Duration>,
}

impl LoadRequest {
    #[must_use]
    pub fn new(instrument: impl Into<String>, timeframe: Timeframe, config: DisplayConfig) -> Self {
        Self {
            instrument: instrument.into(),
            timeframe,
            window: TimeWindow::default(),
            config,
            engine_timeout: None,
        }
    }

    #[must_use]
    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    #[must_use]
    pub fn with_engine_timeout(mut self, timeout: Duration) -> Self {
        self.engine_timeout = Some(timeout);
        self
    }

    /// Fails fast on requests the engine could never serve.
    pub fn validate(&self) -> ChartResult<()> {
        if self.instrument.trim().is_empty() {
            return Err(ChartError::invalid_request(
                "instrument identifier must not be empty",
            ));
        }
        if self.window.begin > self.window.end {
            return Err(ChartError::invalid_request(format!(
                "time window begin {} must be <= end {}",
                self.window.begin, self.window.end
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn key(&self) -> RequestKey {
        RequestKey {
            instrument: self.instrument.clone(),
            timeframe: self.timeframe,
            options: self.config.engine,
        }
    }

    #[must_use]
    pub fn to_engine_request(&self) -> AnalysisRequest {
        AnalysisRequest {
            instrument: self.instrument.clone(),
            timeframe: self.timeframe,
            window: self.window,
            options: self.config.engine,
            timeout: self.engine_timeout,
        }
    }
}
