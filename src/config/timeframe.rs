use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Bar granularity supported by the analysis engine, finest to coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "K_1M")]
    Min1,
    #[serde(rename = "K_5M")]
    Min5,
    #[serde(rename = "K_15M")]
    Min15,
    #[serde(rename = "K_30M")]
    Min30,
    #[serde(rename = "K_60M")]
    Min60,
    #[serde(rename = "K_DAY")]
    Day,
}

impl Timeframe {
    /// Returns the wire identifier understood by the analysis engine.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Timeframe::Min1 => "K_1M",
            Timeframe::Min5 => "K_5M",
            Timeframe::Min15 => "K_15M",
            Timeframe::Min30 => "K_30M",
            Timeframe::Min60 => "K_60M",
            Timeframe::Day => "K_DAY",
        }
    }

    /// Returns a human-readable label for pickers and titles.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Timeframe::Min1 => "1 minute",
            Timeframe::Min5 => "5 minutes",
            Timeframe::Min15 => "15 minutes",
            Timeframe::Min30 => "30 minutes",
            Timeframe::Min60 => "60 minutes",
            Timeframe::Day => "daily",
        }
    }

    /// Returns all supported timeframes in catalog order.
    #[must_use]
    pub fn all() -> &'static [Timeframe] {
        &[
            Timeframe::Min1,
            Timeframe::Min5,
            Timeframe::Min15,
            Timeframe::Min30,
            Timeframe::Min60,
            Timeframe::Day,
        ]
    }

    /// Parses a wire identifier, for hosts feeding raw strings.
    pub fn parse(id: &str) -> ChartResult<Self> {
        if id.trim().is_empty() {
            return Err(ChartError::invalid_request(
                "timeframe identifier must not be empty",
            ));
        }
        Self::all()
            .iter()
            .copied()
            .find(|timeframe| timeframe.id() == id)
            .ok_or_else(|| {
                ChartError::invalid_request(format!("unknown timeframe identifier `{id}`"))
            })
    }
}
