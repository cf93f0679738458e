//! Public service surface: request shaping, projection, and the
//! cache-fronted conversion service.

mod projection;
mod request;
mod service;

pub use projection::{
    convert_analysis, project_candles, project_pivot_zones, project_signals, project_swings,
};
pub use request::{LoadRequest, RequestKey};
pub use service::ChartService;
