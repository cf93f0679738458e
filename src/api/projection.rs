//! Projection of the engine's nested result into flat primitives.
//!
//! Each layer projects independently: an empty upstream list yields an
//! empty output list, so no layer's absence disturbs another.

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{Bar, PivotZone, SignalPoint, Swing};
use crate::engine::{AnalysisResult, BarCluster};
use crate::error::{ChartError, ChartResult};
use crate::render::{CandleSeries, PivotPolygon, SignalMarker, SwingLine, VisualizationBundle};

/// Flattens the per-cluster bar sequences into one column-layout series.
///
/// The engine is trusted to hand indices back in increasing order, but
/// trust is verified: a non-monotonic sequence fails loudly instead of
/// producing a silently misordered chart.
pub fn project_candles(clusters: &[BarCluster]) -> ChartResult<CandleSeries> {
    let bars: Vec<&Bar> = clusters
        .iter()
        .flat_map(|cluster| cluster.bars.iter())
        .collect();

    for pair in bars.windows(2) {
        if pair[1].index <= pair[0].index {
            return Err(ChartError::data_shape(format!(
                "bar indices must be strictly increasing, got {} after {}",
                pair[1].index, pair[0].index
            )));
        }
    }

    // For large series, optional parallel projection keeps behavior stable
    // while reducing wall-clock flattening time.
    #[cfg(feature = "parallel-projection")]
    {
        Ok(CandleSeries {
            timestamps: bars.par_iter().map(|bar| bar.timestamp.clone()).collect(),
            open: bars.par_iter().map(|bar| bar.open).collect(),
            high: bars.par_iter().map(|bar| bar.high).collect(),
            low: bars.par_iter().map(|bar| bar.low).collect(),
            close: bars.par_iter().map(|bar| bar.close).collect(),
        })
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        let mut series = CandleSeries::with_capacity(bars.len());
        for bar in bars {
            series.timestamps.push(bar.timestamp.clone());
            series.open.push(bar.open);
            series.high.push(bar.high);
            series.low.push(bar.low);
            series.close.push(bar.close);
        }
        Ok(series)
    }
}

/// Projects strokes or segments into two-point line primitives.
#[must_use]
pub fn project_swings(swings: &[Swing]) -> Vec<SwingLine> {
    swings
        .iter()
        .map(|swing| SwingLine {
            x: [swing.begin_index, swing.end_index],
            y: [swing.begin_price, swing.end_price],
            kind: swing.kind.clone(),
            direction: swing.direction,
        })
        .collect()
}

/// Projects pivot zones into closed rectangle polygons.
#[must_use]
pub fn project_pivot_zones(zones: &[PivotZone]) -> Vec<PivotPolygon> {
    zones
        .iter()
        .map(|zone| {
            PivotPolygon::closed_rect(
                zone.begin_index,
                zone.end_index,
                zone.low,
                zone.high,
                zone.kind.clone(),
            )
        })
        .collect()
}

/// Projects signal points into marker primitives.
#[must_use]
pub fn project_signals(signals: &[SignalPoint]) -> Vec<SignalMarker> {
    signals
        .iter()
        .map(|signal| SignalMarker {
            index: signal.index,
            price: signal.price,
            side: signal.side,
            kind: signal.kind.clone(),
        })
        .collect()
}

/// Walks a validated analysis result and projects every layer.
pub fn convert_analysis(result: &AnalysisResult) -> ChartResult<VisualizationBundle> {
    result.validate()?;
    Ok(VisualizationBundle {
        candles: project_candles(&result.clusters)?,
        strokes: project_swings(&result.strokes),
        segments: project_swings(&result.segments),
        pivot_zones: project_pivot_zones(&result.pivot_zones),
        signals: project_signals(&result.signals),
    })
}
