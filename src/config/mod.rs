//! Display-option compilation and the fixed timeframe catalog.

pub mod options;
pub mod timeframe;

pub use options::{
    DisplayConfig, EngineOptions, OptionMap, PivotAlgorithm, PivotCombineMode, SegmentAlgorithm,
    compile, timeframe_catalog,
};
pub use timeframe::Timeframe;
