//! Boundary to the external analysis engine.
//!
//! The engine computes strokes, segments, pivot zones and signal points
//! from raw bars; it is a black box here. This module declares the exact
//! shape the conversion pipeline expects back and checks it explicitly,
//! so a malformed collaborator surfaces as [`ChartError::DataShape`]
//! instead of a silently misleading chart.

use std::time::Duration;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{EngineOptions, Timeframe};
use crate::core::{Bar, PivotZone, SignalPoint, Swing};
use crate::error::{ChartError, ChartResult};

/// Date range handed to the engine for raw-bar retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub begin: NaiveDate,
    pub end: NaiveDate,
}

impl TimeWindow {
    pub fn new(begin: NaiveDate, end: NaiveDate) -> ChartResult<Self> {
        if begin > end {
            return Err(ChartError::invalid_request(format!(
                "time window begin {begin} must be <= end {end}"
            )));
        }
        Ok(Self { begin, end })
    }
}

impl Default for TimeWindow {
    /// Default analysis window: fixed start, open end at today.
    fn default() -> Self {
        Self {
            begin: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or(NaiveDate::MIN),
            end: Utc::now().date_naive(),
        }
    }
}

/// Fully resolved engine invocation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub instrument: String,
    pub timeframe: Timeframe,
    pub window: TimeWindow,
    pub options: EngineOptions,
    /// Upper bound on engine work; implementations must give up with
    /// [`ChartError::EngineTimeout`] once exceeded.
    pub timeout: Option<Duration>,
}

/// An ordered run of merged bars.
///
/// The engine hands bars back grouped into merge containers; flattening
/// the containers in order yields the index-ordered bar sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BarCluster {
    pub bars: Vec<Bar>,
}

impl From<Vec<Bar>> for BarCluster {
    fn from(bars: Vec<Bar>) -> Self {
        Self { bars }
    }
}

/// The engine's nested result for one timeframe.
///
/// Stroke/segment/zone/signal elements reference bars by index into the
/// flattened cluster sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub clusters: Vec<BarCluster>,
    pub strokes: Vec<Swing>,
    pub segments: Vec<Swing>,
    pub pivot_zones: Vec<PivotZone>,
    pub signals: Vec<SignalPoint>,
}

impl AnalysisResult {
    /// Iterates bars in cluster order.
    pub fn bars(&self) -> impl Iterator<Item = &Bar> {
        self.clusters.iter().flat_map(|cluster| cluster.bars.iter())
    }

    #[must_use]
    pub fn bar_count(&self) -> usize {
        self.clusters.iter().map(|cluster| cluster.bars.len()).sum()
    }

    /// Checks the declared result shape before projection.
    ///
    /// Verified here rather than trusted: bar-index monotonicity across the
    /// flattened sequence, per-element invariants, and resolvability of
    /// every bar-index reference.
    pub fn validate(&self) -> ChartResult<()> {
        let mut previous: Option<usize> = None;
        for bar in self.bars() {
            if let Some(previous) = previous {
                if bar.index <= previous {
                    return Err(ChartError::data_shape(format!(
                        "bar indices must be strictly increasing, got {} after {previous}",
                        bar.index
                    )));
                }
            }
            previous = Some(bar.index);
        }

        let bar_count = self.bar_count();

        for (list, name) in [(&self.strokes, "stroke"), (&self.segments, "segment")] {
            for swing in list.iter() {
                if swing.begin_index >= swing.end_index {
                    return Err(ChartError::data_shape(format!(
                        "{name} begin index {} must be < end index {}",
                        swing.begin_index, swing.end_index
                    )));
                }
                if swing.end_index >= bar_count {
                    return Err(ChartError::data_shape(format!(
                        "{name} end index {} exceeds bar count {bar_count}",
                        swing.end_index
                    )));
                }
                if !swing.direction_consistent() {
                    // Some engines emit exception kinds on purpose; note it,
                    // do not reject.
                    debug!(
                        kind = %swing.kind,
                        direction = swing.direction.as_str(),
                        "{name} direction label disagrees with price delta"
                    );
                }
            }
        }

        for zone in &self.pivot_zones {
            if zone.begin_index > zone.end_index {
                return Err(ChartError::data_shape(format!(
                    "pivot zone begin index {} must be <= end index {}",
                    zone.begin_index, zone.end_index
                )));
            }
            if zone.end_index >= bar_count {
                return Err(ChartError::data_shape(format!(
                    "pivot zone end index {} exceeds bar count {bar_count}",
                    zone.end_index
                )));
            }
            if zone.low > zone.high {
                return Err(ChartError::data_shape(format!(
                    "pivot zone low {} must be <= high {}",
                    zone.low, zone.high
                )));
            }
        }

        for signal in &self.signals {
            if signal.index >= bar_count {
                return Err(ChartError::data_shape(format!(
                    "signal point index {} exceeds bar count {bar_count}",
                    signal.index
                )));
            }
        }

        Ok(())
    }
}

/// Contract implemented by any analysis engine.
///
/// The engine receives fully resolved parameters and returns the nested
/// result above; the conversion pipeline never reaches around this seam.
pub trait AnalysisEngine: Send + Sync {
    fn compute_analysis(&self, request: &AnalysisRequest) -> ChartResult<AnalysisResult>;
}
