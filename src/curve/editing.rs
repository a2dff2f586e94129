//! Pure segment editing operations
//!
//! Every operation takes the current config by reference and returns a new
//! value; on error the caller keeps its prior config untouched. Operations
//! act on whichever sequence `use_bezier` marks as authoritative.

use crate::core::error::{CurveError, Result};
use crate::core::types::{Level, SegmentId};
use crate::curve::segment::{BezierSegment, CurveConfig, FormulaSegment};

/// Most segments the active sequence may hold
pub const SEGMENT_CAP: usize = 10;

/// Level span of a freshly appended segment
const APPEND_SPAN: Level = 10;

/// Exp growth from an appended segment's start to its end
const APPEND_EXP_GROWTH: f64 = 1.1;

/// Start exp when appending to an empty Bézier curve
const INITIAL_START_EXP: f64 = 100.0;

/// Formula carried by the first segment of an empty formula curve
const INITIAL_FORMULA: &str = "100 * 1.5^(x-1)";

/// Snap radii in domain units, per axis. A dragged boundary within this
/// distance of the neighbor's shared value locks onto it exactly.
const SNAP_LEVEL_RADIUS: f64 = 1.0;
const SNAP_EXP_RADIUS: f64 = 25.0;

/// Draggable handle of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
    ControlPoint1,
    ControlPoint2,
}

/// Append a segment continuing from the last one (or starting at level 1),
/// spanning up to [`APPEND_SPAN`] levels clamped to `max_level`
pub fn append_segment(config: &CurveConfig, max_level: Level) -> Result<CurveConfig> {
    if config.active_len() >= SEGMENT_CAP {
        return Err(CurveError::SegmentCapReached(SEGMENT_CAP));
    }

    let mut next = config.clone();
    if next.use_bezier {
        let (start_level, start_exp) = match next.bezier_segments.last() {
            Some(prev) => (prev.end_level, prev.end_exp),
            None => (1, INITIAL_START_EXP),
        };
        let end_level = start_level.saturating_add(APPEND_SPAN).min(max_level);
        if start_level >= end_level {
            return Err(CurveError::InvalidSegmentRange {
                start_level,
                end_level,
            });
        }
        next.bezier_segments.push(BezierSegment::new(
            start_level,
            end_level,
            start_exp,
            start_exp * APPEND_EXP_GROWTH,
        ));
    } else {
        let (start_level, formula) = match next.segments.last() {
            Some(prev) => (prev.end_level, prev.formula.clone()),
            None => (1, INITIAL_FORMULA.to_string()),
        };
        let end_level = start_level.saturating_add(APPEND_SPAN).min(max_level);
        if start_level >= end_level {
            return Err(CurveError::InvalidSegmentRange {
                start_level,
                end_level,
            });
        }
        next.segments
            .push(FormulaSegment::new(start_level, end_level, formula));
    }
    Ok(next)
}

/// Remove the segment with `id` from the active sequence
///
/// Neighbors are not re-linked; any resulting gap is left for `validate`
/// to flag and for `redistribute` or manual edits to repair.
pub fn delete_segment(config: &CurveConfig, id: SegmentId) -> Result<CurveConfig> {
    let mut next = config.clone();
    let removed = if next.use_bezier {
        let before = next.bezier_segments.len();
        next.bezier_segments.retain(|s| s.id != id);
        next.bezier_segments.len() < before
    } else {
        let before = next.segments.len();
        next.segments.retain(|s| s.id != id);
        next.segments.len() < before
    };
    if !removed {
        return Err(CurveError::SegmentNotFound(id));
    }
    Ok(next)
}

/// Evenly re-partition `[1, max_level]` across the active sequence
///
/// Segment count and per-segment shape (formulas, exp endpoints, control
/// points) are preserved; only level boundaries are rewritten. Remainder
/// levels land on the later segments, so two segments over max level 20
/// become `[1,10]` and `[10,20]`. Idempotent for a fixed `max_level`.
pub fn redistribute(config: &CurveConfig, max_level: Level) -> CurveConfig {
    let mut next = config.clone();
    let n = next.active_len() as u64;
    if n == 0 {
        return next;
    }

    let boundary = |i: u64| -> Level { (1 + i * (max_level as u64 - 1) / n) as Level };
    if next.use_bezier {
        for (i, seg) in next.bezier_segments.iter_mut().enumerate() {
            seg.start_level = boundary(i as u64);
            seg.end_level = boundary(i as u64 + 1);
        }
    } else {
        for (i, seg) in next.segments.iter_mut().enumerate() {
            seg.start_level = boundary(i as u64);
            seg.end_level = boundary(i as u64 + 1);
        }
    }
    next
}

/// Move a segment handle to a proposed position in domain units
///
/// Start/end handles snap onto the adjacent segment's shared boundary when
/// the proposal lands within the snap radii, then clamp so the segment
/// keeps a span of at least one level inside `[1, max_level]`. Control
/// handles store the proposal as segment-relative ratios (`x` clamped to
/// `[0,1]`, `y` free to overshoot). Formula curves have no exp or control
/// handles; only their level boundaries move.
pub fn drag_boundary(
    config: &CurveConfig,
    id: SegmentId,
    endpoint: Endpoint,
    proposed_level: f64,
    proposed_exp: f64,
    max_level: Level,
) -> Result<CurveConfig> {
    let mut next = config.clone();
    if next.use_bezier {
        let index = next
            .bezier_segments
            .iter()
            .position(|s| s.id == id)
            .ok_or(CurveError::SegmentNotFound(id))?;

        match endpoint {
            Endpoint::Start => {
                let (mut level, mut exp) = (proposed_level, proposed_exp.max(0.0));
                if index > 0 {
                    let prev = &next.bezier_segments[index - 1];
                    level = snap(level, prev.end_level as f64, SNAP_LEVEL_RADIUS);
                    exp = snap(exp, prev.end_exp, SNAP_EXP_RADIUS);
                }
                let seg = &mut next.bezier_segments[index];
                seg.start_level = clamp_level(level, 1, seg.end_level - 1);
                seg.start_exp = exp;
            }
            Endpoint::End => {
                let (mut level, mut exp) = (proposed_level, proposed_exp.max(0.0));
                if let Some(after) = next.bezier_segments.get(index + 1) {
                    level = snap(level, after.start_level as f64, SNAP_LEVEL_RADIUS);
                    exp = snap(exp, after.start_exp, SNAP_EXP_RADIUS);
                }
                let seg = &mut next.bezier_segments[index];
                seg.end_level = clamp_level(level, seg.start_level + 1, max_level);
                seg.end_exp = exp;
            }
            Endpoint::ControlPoint1 | Endpoint::ControlPoint2 => {
                let seg = &mut next.bezier_segments[index];
                let span = (seg.end_level - seg.start_level) as f64;
                let rise = seg.end_exp - seg.start_exp;
                let x = ((proposed_level - seg.start_level as f64) / span).clamp(0.0, 1.0);
                // Flat segments keep the handle on the chord
                let y = if rise == 0.0 {
                    0.0
                } else {
                    (proposed_exp - seg.start_exp) / rise
                };
                let point = if endpoint == Endpoint::ControlPoint1 {
                    &mut seg.control_point1
                } else {
                    &mut seg.control_point2
                };
                point.x = x;
                point.y = y;
            }
        }
    } else {
        let index = next
            .segments
            .iter()
            .position(|s| s.id == id)
            .ok_or(CurveError::SegmentNotFound(id))?;

        match endpoint {
            Endpoint::Start => {
                let mut level = proposed_level;
                if index > 0 {
                    let prev = &next.segments[index - 1];
                    level = snap(level, prev.end_level as f64, SNAP_LEVEL_RADIUS);
                }
                let seg = &mut next.segments[index];
                seg.start_level = clamp_level(level, 1, seg.end_level - 1);
            }
            Endpoint::End => {
                let mut level = proposed_level;
                if let Some(after) = next.segments.get(index + 1) {
                    level = snap(level, after.start_level as f64, SNAP_LEVEL_RADIUS);
                }
                let seg = &mut next.segments[index];
                seg.end_level = clamp_level(level, seg.start_level + 1, max_level);
            }
            Endpoint::ControlPoint1 | Endpoint::ControlPoint2 => {}
        }
    }
    Ok(next)
}

fn snap(value: f64, target: f64, radius: f64) -> f64 {
    if (value - target).abs() <= radius {
        target
    } else {
        value
    }
}

fn clamp_level(proposed: f64, min: Level, max: Level) -> Level {
    (proposed.round().max(min as f64).min(max as f64)) as Level
}
