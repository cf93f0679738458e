use serde::{Deserialize, Serialize};

use super::{CandleSeries, PivotPolygon, SignalMarker, SwingLine};

/// Fully projected, renderer-ready payload for one request.
///
/// Every layer list is independently empty-able: a missing upstream layer
/// projects to an empty list, never to an absent field, so consumers
/// iterate without null-checks. Bundles are immutable snapshots once
/// cached; visibility is applied later, at assembly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualizationBundle {
    pub candles: CandleSeries,
    pub strokes: Vec<SwingLine>,
    pub segments: Vec<SwingLine>,
    pub pivot_zones: Vec<PivotPolygon>,
    pub signals: Vec<SignalMarker>,
}

impl VisualizationBundle {
    #[must_use]
    pub fn bar_count(&self) -> usize {
        self.candles.len()
    }
}
