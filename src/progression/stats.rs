//! Linear stat growth applied on level-up

use crate::core::types::Level;
use serde::{Deserialize, Serialize};

/// Linear growth formula: `floor(a*(L-1) + b)` points on reaching level L
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatGrowthFormula {
    pub a: f64,
    pub b: f64,
}

impl StatGrowthFormula {
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// Points gained on reaching `level`; level 1 has no prior transition
    /// and always yields 0
    pub fn growth_at(&self, level: Level) -> i64 {
        if level <= 1 {
            return 0;
        }
        (self.a * (level as f64 - 1.0) + self.b).floor() as i64
    }
}

/// Growth formulas for the five character stats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatGrowthSet {
    pub hp: StatGrowthFormula,
    pub sp: StatGrowthFormula,
    pub attack: StatGrowthFormula,
    pub defense: StatGrowthFormula,
    pub speed: StatGrowthFormula,
}

/// Total stat points gained over a span of level-ups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatGains {
    pub hp: i64,
    pub sp: i64,
    pub attack: i64,
    pub defense: i64,
    pub speed: i64,
}

impl StatGrowthSet {
    /// Sum each stat's growth over the transitions `from_level+1 ..= to_level`
    ///
    /// Covers multi-level jumps from a single grant; an empty span yields
    /// all zeros.
    pub fn gains(&self, from_level: Level, to_level: Level) -> StatGains {
        let mut total = StatGains::default();
        for level in (from_level + 1)..=to_level {
            total.hp += self.hp.growth_at(level);
            total.sp += self.sp.growth_at(level);
            total.attack += self.attack.growth_at(level);
            total.defense += self.defense.growth_at(level);
            total.speed += self.speed.growth_at(level);
        }
        total
    }
}
