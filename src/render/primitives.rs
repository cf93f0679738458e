use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{SignalSide, SwingDirection};
use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::data_shape(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Column-layout candlestick series: one entry per bar, index order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandleSeries {
    pub timestamps: Vec<String>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
}

impl CandleSeries {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            timestamps: Vec::with_capacity(capacity),
            open: Vec::with_capacity(capacity),
            high: Vec::with_capacity(capacity),
            low: Vec::with_capacity(capacity),
            close: Vec::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// All five columns must stay the same length.
    pub fn validate(&self) -> ChartResult<()> {
        let len = self.timestamps.len();
        if self.open.len() != len
            || self.high.len() != len
            || self.low.len() != len
            || self.close.len() != len
        {
            return Err(ChartError::data_shape(
                "candle series columns must have equal lengths".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Two-point line primitive for one stroke or segment.
///
/// Coordinates are categorical bar indices on x and prices on y; kind and
/// direction ride along for hover/inspection, not geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwingLine {
    pub x: [usize; 2],
    pub y: [f64; 2],
    pub kind: String,
    pub direction: SwingDirection,
}

/// Closed polygon primitive for one pivot zone.
///
/// Vertices trace the rectangle and return to the start: the last vertex
/// always equals the first, which is what lets a filling renderer close
/// the shape without guessing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotPolygon {
    pub x: SmallVec<[usize; 5]>,
    pub y: SmallVec<[f64; 5]>,
    pub kind: String,
}

impl PivotPolygon {
    /// Builds the closed rectangle over x-range `[x0, x1]` and price band
    /// `[low, high]`: x runs x0, x1, x1, x0, x0 while y runs low, low,
    /// high, high, low.
    #[must_use]
    pub fn closed_rect(x0: usize, x1: usize, low: f64, high: f64, kind: impl Into<String>) -> Self {
        Self {
            x: SmallVec::from_slice(&[x0, x1, x1, x0, x0]),
            y: SmallVec::from_slice(&[low, low, high, high, low]),
            kind: kind.into(),
        }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.x.len()
    }

    /// `true` when the first and last vertices coincide on both axes.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match (
            self.x.first(),
            self.x.last(),
            self.y.first(),
            self.y.last(),
        ) {
            (Some(x_first), Some(x_last), Some(y_first), Some(y_last)) => {
                x_first == x_last && y_first == y_last
            }
            _ => false,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.x.len() != self.y.len() {
            return Err(ChartError::data_shape(
                "polygon coordinate arrays must have equal lengths".to_owned(),
            ));
        }
        if !self.is_closed() {
            return Err(ChartError::data_shape(
                "polygon must be closed (first vertex == last vertex)".to_owned(),
            ));
        }
        Ok(())
    }
}

/// One buy/sell marker point.
///
/// Side selects a color/marker class downstream; it is carried as data,
/// never baked into geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalMarker {
    pub index: usize,
    pub price: f64,
    pub side: SignalSide,
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use super::{CandleSeries, Color, PivotPolygon};

    #[test]
    fn closed_rect_returns_to_start() {
        let polygon = PivotPolygon::closed_rect(3, 8, 98.0, 102.0, "pivot");
        assert_eq!(polygon.vertex_count(), 5);
        assert!(polygon.is_closed());
        assert!(polygon.validate().is_ok());
        assert_eq!(polygon.x.as_slice(), &[3, 8, 8, 3, 3]);
        assert_eq!(polygon.y.as_slice(), &[98.0, 98.0, 102.0, 102.0, 98.0]);
    }

    #[test]
    fn unclosed_polygon_fails_validation() {
        let mut polygon = PivotPolygon::closed_rect(0, 1, 9.0, 12.0, "pivot");
        polygon.y.pop();
        polygon.x.pop();
        assert!(polygon.validate().is_err());
    }

    #[test]
    fn candle_series_validates_column_lengths() {
        let mut series = CandleSeries::default();
        series.timestamps.push("2024-01-02".to_owned());
        series.open.push(10.0);
        assert!(series.validate().is_err());
    }

    #[test]
    fn color_channels_are_range_checked() {
        assert!(Color::rgb(0.2, 0.4, 0.6).validate().is_ok());
        assert!(Color::rgba(0.2, 0.4, 0.6, 1.5).validate().is_err());
    }
}
