use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::Timeframe;

/// Sparse, user-facing option set: option name to raw JSON value.
///
/// Insertion order is preserved but never affects compilation.
pub type OptionMap = IndexMap<String, Value>;

pub const STRICT_STROKE_MODE: &str = "strict_stroke_mode";
pub const PIVOT_COMBINE_MODE: &str = "pivot_combine_mode";
pub const SEGMENT_ALGORITHM: &str = "segment_algorithm";
pub const PIVOT_ALGORITHM: &str = "pivot_algorithm";
pub const SHOW_STROKES: &str = "show_strokes";
pub const SHOW_SEGMENTS: &str = "show_segments";
pub const SHOW_PIVOT_ZONES: &str = "show_pivot_zones";
pub const SHOW_SIGNAL_POINTS: &str = "show_signal_points";

/// Segment construction algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentAlgorithm {
    #[serde(rename = "chan")]
    Chan,
    #[serde(rename = "1+1")]
    OnePlusOne,
    #[serde(rename = "break")]
    Break,
}

impl SegmentAlgorithm {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SegmentAlgorithm::Chan => "chan",
            SegmentAlgorithm::OnePlusOne => "1+1",
            SegmentAlgorithm::Break => "break",
        }
    }

    fn parse_token(value: &str) -> Option<Self> {
        match value {
            "chan" => Some(SegmentAlgorithm::Chan),
            "1+1" => Some(SegmentAlgorithm::OnePlusOne),
            "break" => Some(SegmentAlgorithm::Break),
            _ => None,
        }
    }
}

/// Pivot-zone construction algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PivotAlgorithm {
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "over_seg")]
    OverSeg,
    #[serde(rename = "auto")]
    Auto,
}

impl PivotAlgorithm {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PivotAlgorithm::Normal => "normal",
            PivotAlgorithm::OverSeg => "over_seg",
            PivotAlgorithm::Auto => "auto",
        }
    }

    fn parse_token(value: &str) -> Option<Self> {
        match value {
            "normal" => Some(PivotAlgorithm::Normal),
            "over_seg" => Some(PivotAlgorithm::OverSeg),
            "auto" => Some(PivotAlgorithm::Auto),
            _ => None,
        }
    }
}

/// Whether adjacent pivot zones are merged into one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PivotCombineMode {
    #[serde(rename = "combine")]
    Combine,
    #[serde(rename = "keep_separate")]
    KeepSeparate,
}

impl PivotCombineMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PivotCombineMode::Combine => "combine",
            PivotCombineMode::KeepSeparate => "keep_separate",
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            // Historical hosts sent this toggle as a plain bool.
            Value::Bool(true) => Some(PivotCombineMode::Combine),
            Value::Bool(false) => Some(PivotCombineMode::KeepSeparate),
            Value::String(text) => match text.as_str() {
                "combine" => Some(PivotCombineMode::Combine),
                "keep_separate" => Some(PivotCombineMode::KeepSeparate),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Options that change what the analysis engine computes.
///
/// This is the subset of [`DisplayConfig`] that participates in the cache
/// key; display flags deliberately do not (one cached bundle serves every
/// visibility permutation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EngineOptions {
    #[serde(default = "default_strict_stroke_mode")]
    pub strict_stroke_mode: bool,
    #[serde(default = "default_pivot_combine_mode")]
    pub pivot_combine_mode: PivotCombineMode,
    #[serde(default = "default_segment_algorithm")]
    pub segment_algorithm: SegmentAlgorithm,
    #[serde(default = "default_pivot_algorithm")]
    pub pivot_algorithm: PivotAlgorithm,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            strict_stroke_mode: default_strict_stroke_mode(),
            pivot_combine_mode: default_pivot_combine_mode(),
            segment_algorithm: default_segment_algorithm(),
            pivot_algorithm: default_pivot_algorithm(),
        }
    }
}

/// Fully resolved rendering/analysis options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(flatten)]
    pub engine: EngineOptions,
    #[serde(default = "default_show")]
    pub show_strokes: bool,
    #[serde(default = "default_show")]
    pub show_segments: bool,
    #[serde(default = "default_show")]
    pub show_pivot_zones: bool,
    #[serde(default = "default_show")]
    pub show_signal_points: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            engine: EngineOptions::default(),
            show_strokes: default_show(),
            show_segments: default_show(),
            show_pivot_zones: default_show(),
            show_signal_points: default_show(),
        }
    }
}

impl DisplayConfig {
    /// Serializes the complete configuration back into an option map.
    ///
    /// `compile(&config.to_options()) == config` holds for every config, so
    /// compiling an already-complete option set is a no-op.
    #[must_use]
    pub fn to_options(&self) -> OptionMap {
        let mut options = OptionMap::new();
        options.insert(
            STRICT_STROKE_MODE.to_owned(),
            Value::Bool(self.engine.strict_stroke_mode),
        );
        options.insert(
            PIVOT_COMBINE_MODE.to_owned(),
            Value::String(self.engine.pivot_combine_mode.as_str().to_owned()),
        );
        options.insert(
            SEGMENT_ALGORITHM.to_owned(),
            Value::String(self.engine.segment_algorithm.as_str().to_owned()),
        );
        options.insert(
            PIVOT_ALGORITHM.to_owned(),
            Value::String(self.engine.pivot_algorithm.as_str().to_owned()),
        );
        options.insert(SHOW_STROKES.to_owned(), Value::Bool(self.show_strokes));
        options.insert(SHOW_SEGMENTS.to_owned(), Value::Bool(self.show_segments));
        options.insert(
            SHOW_PIVOT_ZONES.to_owned(),
            Value::Bool(self.show_pivot_zones),
        );
        options.insert(
            SHOW_SIGNAL_POINTS.to_owned(),
            Value::Bool(self.show_signal_points),
        );
        options
    }
}

/// Merges a sparse option set with defaults into a complete configuration.
///
/// Every recognized option missing from the input keeps its default.
/// Unrecognized keys and mistyped values are ignored with a warning, never
/// an error, so additive option sets from newer hosts stay compatible.
#[must_use]
pub fn compile(partial: &OptionMap) -> DisplayConfig {
    let mut config = DisplayConfig::default();

    for (key, value) in partial {
        match key.as_str() {
            STRICT_STROKE_MODE => {
                apply_bool(key, value, &mut config.engine.strict_stroke_mode);
            }
            PIVOT_COMBINE_MODE => match PivotCombineMode::from_value(value) {
                Some(mode) => config.engine.pivot_combine_mode = mode,
                None => warn_mistyped(key, value),
            },
            SEGMENT_ALGORITHM => {
                match value.as_str().and_then(SegmentAlgorithm::parse_token) {
                    Some(algorithm) => config.engine.segment_algorithm = algorithm,
                    None => warn_mistyped(key, value),
                }
            }
            PIVOT_ALGORITHM => match value.as_str().and_then(PivotAlgorithm::parse_token) {
                Some(algorithm) => config.engine.pivot_algorithm = algorithm,
                None => warn_mistyped(key, value),
            },
            SHOW_STROKES => apply_bool(key, value, &mut config.show_strokes),
            SHOW_SEGMENTS => apply_bool(key, value, &mut config.show_segments),
            SHOW_PIVOT_ZONES => apply_bool(key, value, &mut config.show_pivot_zones),
            SHOW_SIGNAL_POINTS => apply_bool(key, value, &mut config.show_signal_points),
            _ => {
                warn!(option = %key, "ignoring unrecognized display option");
            }
        }
    }

    config
}

/// Ordered reference table of timeframe identifier to display label.
#[must_use]
pub fn timeframe_catalog() -> IndexMap<&'static str, &'static str> {
    Timeframe::all()
        .iter()
        .map(|timeframe| (timeframe.id(), timeframe.label()))
        .collect()
}

fn apply_bool(key: &str, value: &Value, target: &mut bool) {
    match value.as_bool() {
        Some(flag) => *target = flag,
        None => warn_mistyped(key, value),
    }
}

fn warn_mistyped(key: &str, value: &Value) {
    warn!(option = %key, %value, "ignoring display option with unexpected value type");
}

fn default_strict_stroke_mode() -> bool {
    true
}

fn default_pivot_combine_mode() -> PivotCombineMode {
    PivotCombineMode::Combine
}

fn default_segment_algorithm() -> SegmentAlgorithm {
    SegmentAlgorithm::Chan
}

fn default_pivot_algorithm() -> PivotAlgorithm {
    PivotAlgorithm::Normal
}

fn default_show() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{DisplayConfig, OptionMap, PivotCombineMode, SegmentAlgorithm, compile};

    #[test]
    fn empty_input_compiles_to_defaults() {
        let config = compile(&OptionMap::new());
        assert_eq!(config, DisplayConfig::default());
        assert!(config.engine.strict_stroke_mode);
        assert_eq!(config.engine.segment_algorithm, SegmentAlgorithm::Chan);
    }

    #[test]
    fn pivot_combine_mode_accepts_legacy_bool() {
        let mut options = OptionMap::new();
        options.insert("pivot_combine_mode".to_owned(), json!(false));
        assert_eq!(
            compile(&options).engine.pivot_combine_mode,
            PivotCombineMode::KeepSeparate
        );
    }

    #[test]
    fn option_insertion_order_is_irrelevant() {
        let mut forward = OptionMap::new();
        forward.insert("show_strokes".to_owned(), json!(false));
        forward.insert("segment_algorithm".to_owned(), json!("break"));

        let mut reversed = OptionMap::new();
        reversed.insert("segment_algorithm".to_owned(), json!("break"));
        reversed.insert("show_strokes".to_owned(), json!(false));

        assert_eq!(compile(&forward), compile(&reversed));
    }
}
