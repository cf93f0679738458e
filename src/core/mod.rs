//! Immutable analysis-domain facts produced by the external engine.
//!
//! Every type validates its invariants at construction and is never
//! mutated once read by the conversion pipeline.

pub mod bar;
pub mod pivot;
pub mod signal;
pub mod swing;

pub use bar::Bar;
pub use pivot::PivotZone;
pub use signal::{SignalPoint, SignalSide};
pub use swing::{Segment, Stroke, Swing, SwingDirection};
