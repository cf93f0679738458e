use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One OHLC observation at a bar index.
///
/// Indices are unique and strictly increasing within a timeframe; the
/// timestamp is carried as an opaque display string and never parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub index: usize,
    pub timestamp: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Bar {
    /// Builds a validated bar from raw floating values.
    ///
    /// Invariants:
    /// - all prices are finite
    /// - `high >= max(open, close)`
    /// - `low <= min(open, close)`
    pub fn new(
        index: usize,
        timestamp: impl Into<String>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    ) -> ChartResult<Self> {
        if !open.is_finite() || !high.is_finite() || !low.is_finite() || !close.is_finite() {
            return Err(ChartError::data_shape(format!(
                "bar {index}: ohlc values must be finite"
            )));
        }

        if high < open.max(close) {
            return Err(ChartError::data_shape(format!(
                "bar {index}: high must be >= max(open, close)"
            )));
        }

        if low > open.min(close) {
            return Err(ChartError::data_shape(format!(
                "bar {index}: low must be <= min(open, close)"
            )));
        }

        Ok(Self {
            index,
            timestamp: timestamp.into(),
            open,
            high,
            low,
            close,
        })
    }

    /// Converts decimal engine prices into a validated bar.
    pub fn from_decimal(
        index: usize,
        timestamp: impl Into<String>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> ChartResult<Self> {
        Self::new(
            index,
            timestamp,
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
        )
    }

    /// Returns `true` when close price is greater than or equal to open price.
    #[must_use]
    pub fn is_rising(&self) -> bool {
        self.close >= self.open
    }
}

fn decimal_to_f64(value: Decimal, field: &str) -> ChartResult<f64> {
    value
        .to_f64()
        .filter(|converted| converted.is_finite())
        .ok_or_else(|| ChartError::data_shape(format!("`{field}` is not representable as f64")))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::Bar;

    #[test]
    fn rejects_high_below_body() {
        assert!(Bar::new(0, "2024-01-02", 10.0, 9.5, 9.0, 10.0).is_err());
    }

    #[test]
    fn rejects_low_above_body() {
        assert!(Bar::new(0, "2024-01-02", 10.0, 11.0, 10.5, 10.2).is_err());
    }

    #[test]
    fn rejects_non_finite_prices() {
        assert!(Bar::new(0, "2024-01-02", f64::NAN, 11.0, 9.0, 10.0).is_err());
    }

    #[test]
    fn from_decimal_matches_float_construction() {
        let decimal = Bar::from_decimal(
            3,
            "2024-01-05",
            Decimal::new(1000, 2),
            Decimal::new(1100, 2),
            Decimal::new(950, 2),
            Decimal::new(1050, 2),
        )
        .expect("valid decimal bar");
        let float = Bar::new(3, "2024-01-05", 10.0, 11.0, 9.5, 10.5).expect("valid float bar");
        assert_eq!(decimal, float);
    }
}
