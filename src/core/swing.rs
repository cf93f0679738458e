use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Direction of a price swing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwingDirection {
    Up,
    Down,
}

impl SwingDirection {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SwingDirection::Up => "up",
            SwingDirection::Down => "down",
        }
    }
}

/// A directional price swing between two bars.
///
/// Strokes and segments share this shape; a segment is the same swing at a
/// coarser granularity, spanning one or more strokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swing {
    pub begin_index: usize,
    pub end_index: usize,
    pub begin_price: f64,
    pub end_price: f64,
    pub direction: SwingDirection,
    pub kind: String,
}

pub type Stroke = Swing;
pub type Segment = Swing;

impl Swing {
    /// Builds a validated swing. `begin_index < end_index` is required;
    /// direction/price consistency is left to the engine, which may mark
    /// exception kinds.
    pub fn new(
        begin_index: usize,
        end_index: usize,
        begin_price: f64,
        end_price: f64,
        direction: SwingDirection,
        kind: impl Into<String>,
    ) -> ChartResult<Self> {
        if begin_index >= end_index {
            return Err(ChartError::data_shape(format!(
                "swing begin index {begin_index} must be < end index {end_index}"
            )));
        }

        if !begin_price.is_finite() || !end_price.is_finite() {
            return Err(ChartError::data_shape(
                "swing prices must be finite".to_owned(),
            ));
        }

        Ok(Self {
            begin_index,
            end_index,
            begin_price,
            end_price,
            direction,
            kind: kind.into(),
        })
    }

    /// Returns `true` when the direction label matches the price delta sign.
    #[must_use]
    pub fn direction_consistent(&self) -> bool {
        match self.direction {
            SwingDirection::Up => self.end_price >= self.begin_price,
            SwingDirection::Down => self.end_price <= self.begin_price,
        }
    }
}
