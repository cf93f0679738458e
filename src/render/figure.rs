use serde::{Deserialize, Serialize};

use crate::config::DisplayConfig;

use super::{CandleSeries, Color, PivotPolygon, SignalMarker, SwingLine, VisualizationBundle};

/// Line dash pattern hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashStyle {
    Solid,
    Dotted,
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Color,
    pub width: f64,
    pub dash: DashStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillStyle {
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub buy_color: Color,
    pub sell_color: Color,
    pub size_px: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleStyle {
    pub rising_color: Color,
    pub falling_color: Color,
}

impl Default for CandleStyle {
    /// Rising red, falling green (A-share convention).
    fn default() -> Self {
        Self {
            rising_color: Color::rgb(1.0, 0.0, 0.0),
            falling_color: Color::rgb(0.0, 0.5, 0.0),
        }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            buy_color: Color::rgb(0.0, 1.0, 0.0),
            sell_color: Color::rgb(1.0, 0.0, 0.0),
            size_px: 12.0,
        }
    }
}

/// Default stroke-line style: #FF6B6B at 1.5.
#[must_use]
pub(crate) fn stroke_line_style() -> LineStyle {
    LineStyle {
        color: Color::rgb(1.0, 0.42, 0.42),
        width: 1.5,
        dash: DashStyle::Solid,
    }
}

/// Default segment-line style: #4ECDC4 at 2.5.
#[must_use]
pub(crate) fn segment_line_style() -> LineStyle {
    LineStyle {
        color: Color::rgb(0.306, 0.804, 0.769),
        width: 2.5,
        dash: DashStyle::Solid,
    }
}

/// Default pivot-zone outline: #45B7D1 dotted, quarter-alpha fill.
#[must_use]
pub(crate) fn pivot_zone_line_style() -> LineStyle {
    LineStyle {
        color: Color::rgb(0.271, 0.718, 0.82),
        width: 1.0,
        dash: DashStyle::Dotted,
    }
}

#[must_use]
pub(crate) fn pivot_zone_fill_style() -> FillStyle {
    FillStyle {
        color: Color::rgba(0.271, 0.718, 0.82, 0.25),
    }
}

/// Canonical layer names, bottom to top of the draw stack.
///
/// `assemble_figure` emits layers in exactly this order; later layers are
/// never occluded by earlier ones.
pub const LAYER_ORDER: [&str; 5] = [
    "k_lines",
    "pivot_zones",
    "strokes",
    "segments",
    "signal_points",
];

/// One renderable layer: primitive data plus style hints, no drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartLayer {
    CandlestickSeries {
        name: String,
        series: CandleSeries,
        style: CandleStyle,
    },
    FilledPolygons {
        name: String,
        polygons: Vec<PivotPolygon>,
        line: LineStyle,
        fill: FillStyle,
    },
    LineSeries {
        name: String,
        lines: Vec<SwingLine>,
        style: LineStyle,
    },
    MarkerPoints {
        name: String,
        markers: Vec<SignalMarker>,
        style: MarkerStyle,
    },
}

impl ChartLayer {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            ChartLayer::CandlestickSeries { name, .. }
            | ChartLayer::FilledPolygons { name, .. }
            | ChartLayer::LineSeries { name, .. }
            | ChartLayer::MarkerPoints { name, .. } => name,
        }
    }
}

/// Ordered, declarative figure specification handed to a rendering backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FigureSpec {
    pub layers: Vec<ChartLayer>,
}

impl FigureSpec {
    #[must_use]
    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(ChartLayer::name).collect()
    }
}

/// Composes projected primitives into an ordered layer set.
///
/// Draw order is fixed: candlesticks first, then pivot zones beneath the
/// overlays, then strokes, segments, and signal points on top. The base
/// candle layer is always present; each overlay appears iff its display
/// flag is on and its primitive list is non-empty.
#[must_use]
pub fn assemble_figure(bundle: &VisualizationBundle, config: &DisplayConfig) -> FigureSpec {
    let mut layers = Vec::with_capacity(5);

    layers.push(ChartLayer::CandlestickSeries {
        name: "k_lines".to_owned(),
        series: bundle.candles.clone(),
        style: CandleStyle::default(),
    });

    if config.show_pivot_zones && !bundle.pivot_zones.is_empty() {
        layers.push(ChartLayer::FilledPolygons {
            name: "pivot_zones".to_owned(),
            polygons: bundle.pivot_zones.clone(),
            line: pivot_zone_line_style(),
            fill: pivot_zone_fill_style(),
        });
    }

    if config.show_strokes && !bundle.strokes.is_empty() {
        layers.push(ChartLayer::LineSeries {
            name: "strokes".to_owned(),
            lines: bundle.strokes.clone(),
            style: stroke_line_style(),
        });
    }

    if config.show_segments && !bundle.segments.is_empty() {
        layers.push(ChartLayer::LineSeries {
            name: "segments".to_owned(),
            lines: bundle.segments.clone(),
            style: segment_line_style(),
        });
    }

    if config.show_signal_points && !bundle.signals.is_empty() {
        layers.push(ChartLayer::MarkerPoints {
            name: "signal_points".to_owned(),
            markers: bundle.signals.clone(),
            style: MarkerStyle::default(),
        });
    }

    FigureSpec { layers }
}

#[cfg(test)]
mod tests {
    use crate::config::DisplayConfig;
    use crate::core::SwingDirection;
    use crate::render::{PivotPolygon, SwingLine, VisualizationBundle};

    use super::assemble_figure;

    fn bundle_with_overlays() -> VisualizationBundle {
        VisualizationBundle {
            strokes: vec![SwingLine {
                x: [0, 2],
                y: [10.0, 15.0],
                kind: "stroke".to_owned(),
                direction: SwingDirection::Up,
            }],
            pivot_zones: vec![PivotPolygon::closed_rect(0, 1, 9.0, 12.0, "pivot")],
            ..VisualizationBundle::default()
        }
    }

    #[test]
    fn base_candle_layer_is_always_present() {
        let figure = assemble_figure(&VisualizationBundle::default(), &DisplayConfig::default());
        assert_eq!(figure.layer_names(), vec!["k_lines"]);
    }

    #[test]
    fn overlays_follow_canonical_order() {
        let figure = assemble_figure(&bundle_with_overlays(), &DisplayConfig::default());
        assert_eq!(figure.layer_names(), vec!["k_lines", "pivot_zones", "strokes"]);
    }

    #[test]
    fn emitted_layers_are_a_subsequence_of_layer_order() {
        let figure = assemble_figure(&bundle_with_overlays(), &DisplayConfig::default());
        let mut order = super::LAYER_ORDER.iter();
        for name in figure.layer_names() {
            assert!(order.any(|canonical| *canonical == name));
        }
    }

    #[test]
    fn hidden_layer_is_suppressed_without_touching_others() {
        let config = DisplayConfig {
            show_pivot_zones: false,
            ..DisplayConfig::default()
        };
        let figure = assemble_figure(&bundle_with_overlays(), &config);
        assert_eq!(figure.layer_names(), vec!["k_lines", "strokes"]);
    }
}
