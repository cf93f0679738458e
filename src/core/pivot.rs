use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// A congestion price band over a bar-index range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotZone {
    pub begin_index: usize,
    pub end_index: usize,
    pub low: f64,
    pub high: f64,
    pub kind: String,
}

impl PivotZone {
    /// Builds a validated zone: `begin_index <= end_index`, `low <= high`,
    /// finite bounds.
    pub fn new(
        begin_index: usize,
        end_index: usize,
        low: f64,
        high: f64,
        kind: impl Into<String>,
    ) -> ChartResult<Self> {
        if begin_index > end_index {
            return Err(ChartError::data_shape(format!(
                "pivot zone begin index {begin_index} must be <= end index {end_index}"
            )));
        }

        if !low.is_finite() || !high.is_finite() {
            return Err(ChartError::data_shape(
                "pivot zone bounds must be finite".to_owned(),
            ));
        }

        if low > high {
            return Err(ChartError::data_shape(format!(
                "pivot zone low {low} must be <= high {high}"
            )));
        }

        Ok(Self {
            begin_index,
            end_index,
            low,
            high,
            kind: kind.into(),
        })
    }
}
