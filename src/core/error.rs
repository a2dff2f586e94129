use crate::core::types::{Level, SegmentId};
use crate::formula::EvalError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    #[error("Formula evaluation failed: {0}")]
    Formula(#[from] EvalError),

    #[error("Invalid segment range: [{start_level}, {end_level}]")]
    InvalidSegmentRange {
        start_level: Level,
        end_level: Level,
    },

    #[error("Segment not found: {0:?}")]
    SegmentNotFound(SegmentId),

    #[error("Segment cap reached: {0}")]
    SegmentCapReached(usize),
}

pub type Result<T> = std::result::Result<T, CurveError>;
