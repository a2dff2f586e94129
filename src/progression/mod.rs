//! Character progression: experience gain, level-ups, and stat growth

pub mod state;
pub mod stats;

pub use state::{add_experience, ExperienceOutcome, ProgressionState};
pub use stats::{StatGains, StatGrowthFormula, StatGrowthSet};
