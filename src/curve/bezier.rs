//! Cubic Bézier evaluation along the experience axis
//!
//! `t` is linear in level within a segment. The X ordinates of control
//! points only place the editor's tangent handles; they never enter the
//! level→t mapping. The curve shape along the exp axis is fully determined
//! by the Y ordinates.

use crate::core::types::Level;
use crate::curve::segment::BezierSegment;

/// Standard cubic Bézier basis at `t` over four ordinates
pub fn cubic_bezier(t: f64, p0: f64, p1: f64, p2: f64, p3: f64) -> f64 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Required exp at `level` inside `segment`, floored and clamped to >= 0
///
/// Control ordinates are ratios of the segment's exp rise, so overshooting
/// `[0,1]` bends the curve outside the endpoint band.
pub fn eval_segment(segment: &BezierSegment, level: Level) -> f64 {
    let span = segment.end_level.saturating_sub(segment.start_level);
    let t = if span == 0 {
        0.0
    } else {
        ((level as f64 - segment.start_level as f64) / span as f64).clamp(0.0, 1.0)
    };

    let rise = segment.end_exp - segment.start_exp;
    let p1 = segment.start_exp + segment.control_point1.y * rise;
    let p2 = segment.start_exp + segment.control_point2.y * rise;

    cubic_bezier(t, segment.start_exp, p1, p2, segment.end_exp)
        .floor()
        .max(0.0)
}
