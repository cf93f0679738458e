use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Trade side of a signal marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalSide {
    Buy,
    Sell,
}

impl SignalSide {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SignalSide::Buy => "buy",
            SignalSide::Sell => "sell",
        }
    }
}

/// A buy/sell marker attached to one bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalPoint {
    pub index: usize,
    pub price: f64,
    pub side: SignalSide,
    pub kind: String,
}

impl SignalPoint {
    pub fn new(
        index: usize,
        price: f64,
        side: SignalSide,
        kind: impl Into<String>,
    ) -> ChartResult<Self> {
        if !price.is_finite() {
            return Err(ChartError::data_shape(format!(
                "signal point at bar {index}: price must be finite"
            )));
        }

        Ok(Self {
            index,
            price,
            side,
            kind: kind.into(),
        })
    }
}
