//! Derived level table for chart legends and balancing review

use crate::core::types::Level;
use crate::curve::evaluator::required_exp;
use crate::curve::segment::CurveConfig;
use serde::{Deserialize, Serialize};

/// One row of the level → experience table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub level: Level,
    /// Exp required to pass this level
    pub exp: f64,
    /// Running total from the first projected level
    pub cumulative_exp: f64,
    /// Percent increase over the previous row; `None` on the first row or
    /// when the previous requirement is zero
    pub growth_pct: Option<f64>,
}

/// Materialize the table over an inclusive level range
///
/// A pure fold over [`required_exp`]; an inverted range yields an empty
/// table. Ranges are small (a few hundred levels at most) so the rows are
/// built eagerly.
pub fn project(config: &CurveConfig, start_level: Level, end_level: Level) -> Vec<TableRow> {
    let mut rows = Vec::new();
    let mut cumulative = 0.0;
    let mut prev_exp: Option<f64> = None;

    for level in start_level..=end_level {
        let exp = required_exp(config, level);
        cumulative += exp;
        let growth_pct = match prev_exp {
            Some(prev) if prev > 0.0 => Some((exp - prev) / prev * 100.0),
            _ => None,
        };
        rows.push(TableRow {
            level,
            exp,
            cumulative_exp: cumulative,
            growth_pct,
        });
        prev_exp = Some(exp);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::segment::FormulaSegment;

    fn exponential_config() -> CurveConfig {
        CurveConfig {
            segments: vec![FormulaSegment::new(1, 20, "100 * 1.5^(x-1)")],
            ..CurveConfig::default()
        }
    }

    #[test]
    fn test_project_rows_and_cumulative() {
        let rows = project(&exponential_config(), 1, 3);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].exp, 100.0);
        assert_eq!(rows[1].exp, 150.0);
        assert_eq!(rows[2].exp, 225.0);
        assert_eq!(rows[0].cumulative_exp, 100.0);
        assert_eq!(rows[2].cumulative_exp, 475.0);
    }

    #[test]
    fn test_project_growth_percent() {
        let rows = project(&exponential_config(), 1, 3);
        assert_eq!(rows[0].growth_pct, None);
        assert!((rows[1].growth_pct.unwrap() - 50.0).abs() < 1e-9);
        assert!((rows[2].growth_pct.unwrap() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_zero_exp_suppresses_growth_percent() {
        let config = CurveConfig {
            segments: vec![
                FormulaSegment::new(1, 4, "0 * x"),
                FormulaSegment::new(5, 20, "x * 10"),
            ],
            ..CurveConfig::default()
        };
        let rows = project(&config, 4, 6);
        // Previous requirement is zero at level 5's row
        assert_eq!(rows[1].growth_pct, None);
        assert!((rows[2].growth_pct.unwrap() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_inverted_range_is_empty() {
        assert!(project(&exponential_config(), 10, 5).is_empty());
    }

    #[test]
    fn test_project_is_restartable() {
        let config = exponential_config();
        let first = project(&config, 1, 5);
        let second = project(&config, 1, 5);
        assert_eq!(first, second);
    }
}
