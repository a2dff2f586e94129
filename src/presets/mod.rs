//! Built-in progression configurations

use crate::core::types::Level;
use crate::curve::segment::{BezierSegment, CurveConfig, FormulaSegment};
use crate::progression::stats::{StatGrowthFormula, StatGrowthSet};
use serde::{Deserialize, Serialize};

/// Ready-to-use progression setup for one character archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionPreset {
    pub max_level: Level,
    pub stat_growth: StatGrowthSet,
    pub curve: CurveConfig,
}

const PRESET_MAX_LEVEL: Level = 100;
const PRESET_FORMULA: &str = "100 * 1.5^(x-1)";

/// Player-character defaults
pub fn player() -> ProgressionPreset {
    ProgressionPreset {
        max_level: PRESET_MAX_LEVEL,
        stat_growth: StatGrowthSet {
            hp: flat(20.0),
            sp: flat(5.0),
            attack: flat(5.0),
            defense: flat(3.0),
            speed: flat(2.0),
        },
        curve: default_curve(),
    }
}

/// Monster defaults; flatter stat growth than the player
pub fn monster() -> ProgressionPreset {
    ProgressionPreset {
        max_level: PRESET_MAX_LEVEL,
        stat_growth: StatGrowthSet {
            hp: flat(15.0),
            sp: flat(3.0),
            attack: flat(4.0),
            defense: flat(2.0),
            speed: flat(1.0),
        },
        curve: default_curve(),
    }
}

fn flat(b: f64) -> StatGrowthFormula {
    StatGrowthFormula::new(0.0, b)
}

/// Two-segment starter curve in both modes, formula authoritative
fn default_curve() -> CurveConfig {
    CurveConfig {
        segments: vec![
            FormulaSegment::new(1, 10, PRESET_FORMULA),
            FormulaSegment::new(10, 20, PRESET_FORMULA),
        ],
        bezier_segments: vec![
            BezierSegment::new(1, 10, 100.0, 1500.0),
            BezierSegment::new(10, 20, 1500.0, 10000.0),
        ],
        use_bezier: false,
        y_axis_max: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::segment::{validate, BezierPoint};

    #[test]
    fn test_player_preset_shape() {
        let preset = player();
        assert_eq!(preset.max_level, 100);
        assert_eq!(preset.stat_growth.hp, StatGrowthFormula::new(0.0, 20.0));
        assert_eq!(preset.stat_growth.speed, StatGrowthFormula::new(0.0, 2.0));
        assert_eq!(preset.curve.segments.len(), 2);
        assert_eq!(preset.curve.bezier_segments.len(), 2);
        assert!(!preset.curve.use_bezier);
        assert!(preset.curve.y_axis_max.is_none());
    }

    #[test]
    fn test_monster_preset_growth() {
        let preset = monster();
        assert_eq!(preset.stat_growth.hp, StatGrowthFormula::new(0.0, 15.0));
        assert_eq!(preset.stat_growth.attack, StatGrowthFormula::new(0.0, 4.0));
        assert_eq!(preset.stat_growth.speed, StatGrowthFormula::new(0.0, 1.0));
    }

    #[test]
    fn test_preset_curves_are_continuous() {
        let preset = player();
        assert!(validate(&preset.curve).is_empty());
        assert!(validate(&preset.curve.with_mode(true)).is_empty());
    }

    #[test]
    fn test_preset_bezier_controls() {
        let curve = player().curve;
        for seg in &curve.bezier_segments {
            assert_eq!(seg.control_point1, BezierPoint::new(0.33, 0.1));
            assert_eq!(seg.control_point2, BezierPoint::new(0.67, 0.9));
        }
        assert_eq!(curve.bezier_segments[0].start_exp, 100.0);
        assert_eq!(curve.bezier_segments[0].end_exp, 1500.0);
        assert_eq!(curve.bezier_segments[1].start_exp, 1500.0);
        assert_eq!(curve.bezier_segments[1].end_exp, 10000.0);
    }
}
