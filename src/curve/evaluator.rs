//! Level → required-experience evaluation
//!
//! `required_exp` is total: levels outside every segment, and formula
//! segments whose expression fails to evaluate, fall back to the default
//! exponential curve so progression can never be wedged by an authoring
//! error. `try_required_exp` surfaces the failure for preview callers.

use crate::core::error::Result;
use crate::core::types::Level;
use crate::curve::bezier;
use crate::curve::segment::CurveConfig;
use crate::formula::{evaluate, Bindings};

/// Fallback curve parameters: floor(100 * 1.5^(level-1))
const DEFAULT_BASE_EXP: f64 = 100.0;
const DEFAULT_GROWTH_RATE: f64 = 1.5;

/// Exp required at `level` on the fallback exponential curve
pub fn default_required_exp(level: Level) -> f64 {
    (DEFAULT_BASE_EXP * DEFAULT_GROWTH_RATE.powi(level as i32 - 1)).floor()
}

/// Exp required to advance past `level`, per the active segment sequence
///
/// Total function; see module docs for the fallback rules.
pub fn required_exp(config: &CurveConfig, level: Level) -> f64 {
    match try_required_exp(config, level) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!("formula at level {level} failed ({err}), using default curve");
            default_required_exp(level)
        }
    }
}

/// Like [`required_exp`] but reports formula failures instead of recovering
pub fn try_required_exp(config: &CurveConfig, level: Level) -> Result<f64> {
    if config.use_bezier {
        match config.bezier_segment_for(level) {
            Some(seg) => Ok(bezier::eval_segment(seg, level)),
            None => Ok(default_required_exp(level)),
        }
    } else {
        match config.formula_segment_for(level) {
            Some(seg) => {
                let value = evaluate(&seg.formula, &Bindings::for_level(level as f64))?;
                Ok(value.floor().max(0.0))
            }
            None => Ok(default_required_exp(level)),
        }
    }
}
