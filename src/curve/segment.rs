//! Curve segment data model and continuity validation
//!
//! A curve is two parallel sequences of level-range segments (formula and
//! Bézier), with `use_bezier` selecting the authoritative one. The inactive
//! sequence is retained so designers can switch modes without losing work.

use crate::core::types::{Level, SegmentId};
use serde::{Deserialize, Serialize};

/// Exp distance within which consecutive Bézier segments count as continuous
pub const EXP_CONTINUITY_EPSILON: f64 = 1.0;

/// Bézier control point as dimensionless ratios of its segment's spans
///
/// `x` conventionally lies in `[0,1]` but is not enforced; `y` may overshoot
/// `[0,1]` for anticipation/ease shapes. Not meaningful outside a segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BezierPoint {
    pub x: f64,
    pub y: f64,
}

impl BezierPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Segment whose required exp comes from a designer-authored formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaSegment {
    pub id: SegmentId,
    pub start_level: Level,
    pub end_level: Level,
    /// Formula in the restricted grammar; `x`/`level` is the lookup level
    pub formula: String,
}

impl FormulaSegment {
    pub fn new(start_level: Level, end_level: Level, formula: impl Into<String>) -> Self {
        Self {
            id: SegmentId::new(),
            start_level,
            end_level,
            formula: formula.into(),
        }
    }

    pub fn contains(&self, level: Level) -> bool {
        self.start_level <= level && level <= self.end_level
    }
}

/// Segment whose required exp follows a cubic Bézier between two endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BezierSegment {
    pub id: SegmentId,
    pub start_level: Level,
    pub end_level: Level,
    pub start_exp: f64,
    pub end_exp: f64,
    pub control_point1: BezierPoint,
    pub control_point2: BezierPoint,
}

impl BezierSegment {
    /// Stock control points giving a gentle ease-in/ease-out shape
    pub const DEFAULT_CONTROL_1: BezierPoint = BezierPoint { x: 0.33, y: 0.1 };
    pub const DEFAULT_CONTROL_2: BezierPoint = BezierPoint { x: 0.67, y: 0.9 };

    pub fn new(start_level: Level, end_level: Level, start_exp: f64, end_exp: f64) -> Self {
        Self {
            id: SegmentId::new(),
            start_level,
            end_level,
            start_exp,
            end_exp,
            control_point1: Self::DEFAULT_CONTROL_1,
            control_point2: Self::DEFAULT_CONTROL_2,
        }
    }

    pub fn contains(&self, level: Level) -> bool {
        self.start_level <= level && level <= self.end_level
    }
}

/// Complete curve configuration, authored by the editor and read by the
/// evaluator. Plain data; serialization preserves field names.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurveConfig {
    pub segments: Vec<FormulaSegment>,
    pub bezier_segments: Vec<BezierSegment>,
    /// Which sequence is authoritative for evaluation
    pub use_bezier: bool,
    /// Cached display scale for the chart's Y axis; never affects evaluation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis_max: Option<f64>,
}

impl CurveConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// First formula segment covering `level`, in sequence order
    pub fn formula_segment_for(&self, level: Level) -> Option<&FormulaSegment> {
        self.segments.iter().find(|s| s.contains(level))
    }

    /// First Bézier segment covering `level`, in sequence order
    pub fn bezier_segment_for(&self, level: Level) -> Option<&BezierSegment> {
        self.bezier_segments.iter().find(|s| s.contains(level))
    }

    /// Number of segments in the active sequence
    pub fn active_len(&self) -> usize {
        if self.use_bezier {
            self.bezier_segments.len()
        } else {
            self.segments.len()
        }
    }

    /// Switch the authoritative mode, keeping both sequences intact
    pub fn with_mode(&self, use_bezier: bool) -> CurveConfig {
        CurveConfig {
            use_bezier,
            ..self.clone()
        }
    }
}

/// A detected break of the curve invariants. Reported, never auto-corrected;
/// `redistribute` or manual edits are the repair paths.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveDefect {
    /// start_level >= end_level
    InvertedRange { id: SegmentId },
    /// Segment at `index` starts after the previous one ends
    LevelGap { index: usize, expected: Level, found: Level },
    /// Segment at `index` starts before the previous one ends
    LevelOverlap { index: usize, expected: Level, found: Level },
    /// Bézier exp endpoints disagree beyond the epsilon
    ExpDiscontinuity { index: usize, expected: f64, found: f64 },
}

/// Check the active sequence against the continuity invariants
pub fn validate(config: &CurveConfig) -> Vec<CurveDefect> {
    let mut defects = Vec::new();

    if config.use_bezier {
        for (i, seg) in config.bezier_segments.iter().enumerate() {
            if seg.start_level >= seg.end_level {
                defects.push(CurveDefect::InvertedRange { id: seg.id });
            }
            if i > 0 {
                let prev = &config.bezier_segments[i - 1];
                push_level_defects(&mut defects, i, prev.end_level, seg.start_level);
                if (seg.start_exp - prev.end_exp).abs() > EXP_CONTINUITY_EPSILON {
                    defects.push(CurveDefect::ExpDiscontinuity {
                        index: i,
                        expected: prev.end_exp,
                        found: seg.start_exp,
                    });
                }
            }
        }
    } else {
        for (i, seg) in config.segments.iter().enumerate() {
            if seg.start_level >= seg.end_level {
                defects.push(CurveDefect::InvertedRange { id: seg.id });
            }
            if i > 0 {
                let prev = &config.segments[i - 1];
                push_level_defects(&mut defects, i, prev.end_level, seg.start_level);
            }
        }
    }

    defects
}

fn push_level_defects(defects: &mut Vec<CurveDefect>, index: usize, expected: Level, found: Level) {
    if found > expected {
        defects.push(CurveDefect::LevelGap {
            index,
            expected,
            found,
        });
    } else if found < expected {
        defects.push(CurveDefect::LevelOverlap {
            index,
            expected,
            found,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_formula_segments() -> CurveConfig {
        CurveConfig {
            segments: vec![
                FormulaSegment::new(1, 10, "100 * 1.5^(x-1)"),
                FormulaSegment::new(10, 20, "100 * 1.5^(x-1)"),
            ],
            ..CurveConfig::default()
        }
    }

    #[test]
    fn test_lookup_first_match_wins() {
        let config = two_formula_segments();
        // Level 10 is the shared boundary; the earlier segment claims it
        let seg = config.formula_segment_for(10).unwrap();
        assert_eq!(seg.id, config.segments[0].id);
    }

    #[test]
    fn test_lookup_outside_all_segments() {
        let config = two_formula_segments();
        assert!(config.formula_segment_for(21).is_none());
    }

    #[test]
    fn test_mode_switch_retains_both_sequences() {
        let mut config = two_formula_segments();
        config.bezier_segments = vec![BezierSegment::new(1, 10, 100.0, 1500.0)];

        let switched = config.with_mode(true);
        assert!(switched.use_bezier);
        assert_eq!(switched.segments.len(), 2);
        assert_eq!(switched.bezier_segments.len(), 1);
        // Input untouched
        assert!(!config.use_bezier);
    }

    #[test]
    fn test_validate_clean_curve() {
        assert!(validate(&two_formula_segments()).is_empty());
    }

    #[test]
    fn test_validate_flags_gap_and_overlap() {
        let mut config = two_formula_segments();
        config.segments[1].start_level = 12;
        assert!(matches!(
            validate(&config)[0],
            CurveDefect::LevelGap { index: 1, expected: 10, found: 12 }
        ));

        config.segments[1].start_level = 8;
        assert!(matches!(
            validate(&config)[0],
            CurveDefect::LevelOverlap { index: 1, expected: 10, found: 8 }
        ));
    }

    #[test]
    fn test_validate_flags_inverted_range() {
        let mut config = two_formula_segments();
        config.segments[0].end_level = 1;
        assert!(validate(&config)
            .iter()
            .any(|d| matches!(d, CurveDefect::InvertedRange { .. })));
    }

    #[test]
    fn test_validate_flags_exp_discontinuity() {
        let config = CurveConfig {
            bezier_segments: vec![
                BezierSegment::new(1, 10, 100.0, 1500.0),
                BezierSegment::new(10, 20, 1520.0, 10000.0),
            ],
            use_bezier: true,
            ..CurveConfig::default()
        };
        assert!(validate(&config)
            .iter()
            .any(|d| matches!(d, CurveDefect::ExpDiscontinuity { index: 1, .. })));
    }

    #[test]
    fn test_validate_accepts_exp_within_epsilon() {
        let config = CurveConfig {
            bezier_segments: vec![
                BezierSegment::new(1, 10, 100.0, 1500.0),
                BezierSegment::new(10, 20, 1500.5, 10000.0),
            ],
            use_bezier: true,
            ..CurveConfig::default()
        };
        assert!(validate(&config).is_empty());
    }

    #[test]
    fn test_config_round_trips_as_plain_data() {
        let mut config = two_formula_segments();
        config.y_axis_max = Some(12000.0);
        let json = serde_json::to_string(&config).unwrap();
        let back: CurveConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
