//! Experience gain and the level-up loop

use crate::core::types::Level;
use crate::curve::evaluator::{default_required_exp, required_exp};
use crate::curve::segment::CurveConfig;
use serde::{Deserialize, Serialize};

/// Per-character progression state
///
/// Owned by exactly one logical character and replaced wholesale on every
/// grant; nothing here is shared or mutated in place. `exp < exp_to_next`
/// holds between grants; at the level cap `exp` is pinned to 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionState {
    pub level: Level,
    pub exp: f64,
    pub exp_to_next: f64,
    pub max_level: Level,
}

impl ProgressionState {
    /// Fresh character at level 1 / exp 0 with the curve's opening requirement
    pub fn new(curve: Option<&CurveConfig>, max_level: Level) -> Self {
        Self {
            level: 1,
            exp: 0.0,
            exp_to_next: requirement(curve, 1),
            max_level,
        }
    }

    pub fn is_capped(&self) -> bool {
        self.level >= self.max_level
    }
}

/// Result of applying one experience grant
#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceOutcome {
    pub state: ProgressionState,
    pub leveled_up: bool,
    pub levels_gained: u32,
}

/// Apply an experience grant, advancing through as many level-ups as it
/// covers
///
/// Passing `None` for the curve uses the default exponential requirement at
/// every level (the legacy single-formula path). Experience past the level
/// cap is discarded, never banked. Negative grants are clamped to zero.
pub fn add_experience(
    state: &ProgressionState,
    curve: Option<&CurveConfig>,
    exp_gained: f64,
) -> ExperienceOutcome {
    let mut next = state.clone();
    let mut levels_gained = 0u32;

    if next.is_capped() {
        next.exp = 0.0;
        return ExperienceOutcome {
            state: next,
            leveled_up: false,
            levels_gained: 0,
        };
    }

    next.exp += exp_gained.max(0.0);
    while next.exp >= next.exp_to_next && next.level < next.max_level {
        next.exp -= next.exp_to_next;
        next.level += 1;
        levels_gained += 1;
        tracing::debug!("level up: {} -> {}", next.level - 1, next.level);

        if next.level >= next.max_level {
            next.exp = 0.0;
            break;
        }
        next.exp_to_next = requirement(curve, next.level);
    }

    ExperienceOutcome {
        state: next,
        leveled_up: levels_gained > 0,
        levels_gained,
    }
}

fn requirement(curve: Option<&CurveConfig>, level: Level) -> f64 {
    match curve {
        Some(config) => required_exp(config, level),
        None => default_required_exp(level),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::segment::FormulaSegment;

    fn default_curve() -> CurveConfig {
        CurveConfig {
            segments: vec![
                FormulaSegment::new(1, 10, "100 * 1.5^(x-1)"),
                FormulaSegment::new(10, 20, "100 * 1.5^(x-1)"),
            ],
            ..CurveConfig::default()
        }
    }

    #[test]
    fn test_fresh_state_opening_requirement() {
        let curve = default_curve();
        let state = ProgressionState::new(Some(&curve), 100);
        assert_eq!(state.level, 1);
        assert_eq!(state.exp, 0.0);
        assert_eq!(state.exp_to_next, 100.0);
    }

    #[test]
    fn test_partial_grant_accumulates() {
        let curve = default_curve();
        let state = ProgressionState::new(Some(&curve), 100);
        let outcome = add_experience(&state, Some(&curve), 60.0);
        assert_eq!(outcome.state.level, 1);
        assert_eq!(outcome.state.exp, 60.0);
        assert!(!outcome.leveled_up);
        assert_eq!(outcome.levels_gained, 0);
    }

    #[test]
    fn test_single_level_up_carries_remainder() {
        let curve = default_curve();
        let state = ProgressionState::new(Some(&curve), 100);
        let outcome = add_experience(&state, Some(&curve), 130.0);
        assert_eq!(outcome.state.level, 2);
        assert_eq!(outcome.state.exp, 30.0);
        assert_eq!(outcome.state.exp_to_next, 150.0);
        assert_eq!(outcome.levels_gained, 1);
    }

    #[test]
    fn test_multi_level_grant() {
        // 250 = 100 (level 1) + 150 (level 2), landing exactly on level 3
        let curve = default_curve();
        let state = ProgressionState::new(Some(&curve), 100);
        let outcome = add_experience(&state, Some(&curve), 250.0);
        assert_eq!(outcome.state.level, 3);
        assert_eq!(outcome.state.exp, 0.0);
        assert_eq!(outcome.levels_gained, 2);
        assert!(outcome.leveled_up);
    }

    #[test]
    fn test_cap_discards_excess() {
        let curve = default_curve();
        let state = ProgressionState::new(Some(&curve), 3);
        let outcome = add_experience(&state, Some(&curve), 1_000_000.0);
        assert_eq!(outcome.state.level, 3);
        assert_eq!(outcome.state.exp, 0.0);
        assert_eq!(outcome.levels_gained, 2);
    }

    #[test]
    fn test_capped_state_is_terminal() {
        let curve = default_curve();
        let capped = ProgressionState {
            level: 3,
            exp: 0.0,
            exp_to_next: 225.0,
            max_level: 3,
        };
        let outcome = add_experience(&capped, Some(&curve), 500.0);
        assert_eq!(outcome.state.level, 3);
        assert_eq!(outcome.state.exp, 0.0);
        assert!(!outcome.leveled_up);
    }

    #[test]
    fn test_negative_grant_is_clamped() {
        let curve = default_curve();
        let mut state = ProgressionState::new(Some(&curve), 100);
        state.exp = 40.0;
        let outcome = add_experience(&state, Some(&curve), -500.0);
        assert_eq!(outcome.state, state);
    }

    #[test]
    fn test_legacy_path_without_curve() {
        let state = ProgressionState::new(None, 100);
        assert_eq!(state.exp_to_next, 100.0);
        let outcome = add_experience(&state, None, 250.0);
        assert_eq!(outcome.state.level, 3);
        assert_eq!(outcome.state.exp, 0.0);
        assert_eq!(outcome.state.exp_to_next, 225.0);
    }

    #[test]
    fn test_state_round_trips_as_plain_data() {
        let state = ProgressionState::new(None, 100);
        let json = serde_json::to_string(&state).unwrap();
        let back: ProgressionState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
