//! Renderer-agnostic chart model.
//!
//! Projection output (primitives, bundle) and the layered figure spec live
//! here. Nothing in this module draws pixels; a rendering backend consumes
//! [`FigureSpec`] as plain data.

mod bundle;
mod figure;
mod primitives;

pub use bundle::VisualizationBundle;
pub use figure::{
    CandleStyle, ChartLayer, DashStyle, FigureSpec, FillStyle, LAYER_ORDER, LineStyle,
    MarkerStyle, assemble_figure,
};
pub use primitives::{CandleSeries, Color, PivotPolygon, SignalMarker, SwingLine};
