//! Difficulty levels and their parameter profiles
//!
//! The set of difficulties is closed: every name maps to exactly one
//! constant profile, and unknown names are rejected at parse time.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Named AI difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    MediumHard,
    Hard,
    Expert,
}

impl Difficulty {
    /// All difficulties, weakest first
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::MediumHard,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::MediumHard => "medium-hard",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }

    /// Parameter profile for this difficulty
    pub fn profile(&self) -> &'static DifficultyProfile {
        match self {
            Difficulty::Easy => &EASY,
            Difficulty::Medium => &MEDIUM,
            Difficulty::MediumHard => &MEDIUM_HARD,
            Difficulty::Hard => &HARD,
            Difficulty::Expert => &EXPERT,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "med" => Ok(Difficulty::Medium),
            "medium-hard" | "medium_hard" | "mediumhard" => Ok(Difficulty::MediumHard),
            "hard" => Ok(Difficulty::Hard),
            "expert" | "pro" => Ok(Difficulty::Expert),
            _ => Err(Error::UnknownDifficulty(s.to_string())),
        }
    }
}

/// How the selector picks among ranked candidates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionPolicy {
    /// Always take the best; optionally re-rank the top few by one-shot lookahead
    Best { run_out_lookahead: bool },
    /// Take the best with this probability, otherwise one of the top two at random
    Imperfect { best_pick_chance: f32 },
}

/// Tunable behaviour for one difficulty
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyProfile {
    /// Probability the aim is left untouched by noise
    pub accuracy: f32,
    /// Maximum angle error in degrees
    pub angle_error: f32,
    /// Maximum relative power error
    pub power_error: f32,
    /// Thinking delay range in milliseconds
    pub thinking_time_ms: (u64, u64),
    pub use_spin: bool,
    pub consider_position: bool,
    pub use_bank_shots: bool,
    pub use_kick_shots: bool,
    /// Probability of playing the best safety instead of just hitting something
    pub safety_intelligence: f32,
    /// Largest cut angle the evaluator accepts (radians)
    pub max_cut_angle: f32,
    /// Exponent of the super-linear cut penalty
    pub cut_exponent: f32,
    pub selection: SelectionPolicy,
}

const EASY: DifficultyProfile = DifficultyProfile {
    accuracy: 0.55,
    angle_error: 8.0,
    power_error: 0.25,
    thinking_time_ms: (800, 1600),
    use_spin: false,
    consider_position: false,
    use_bank_shots: false,
    use_kick_shots: false,
    safety_intelligence: 0.2,
    max_cut_angle: PI * 0.44,
    cut_exponent: 1.5,
    selection: SelectionPolicy::Imperfect { best_pick_chance: 0.6 },
};

const MEDIUM: DifficultyProfile = DifficultyProfile {
    accuracy: 0.7,
    angle_error: 5.0,
    power_error: 0.18,
    thinking_time_ms: (1000, 2000),
    use_spin: false,
    consider_position: false,
    use_bank_shots: false,
    use_kick_shots: false,
    safety_intelligence: 0.4,
    max_cut_angle: PI * 0.44,
    cut_exponent: 1.5,
    selection: SelectionPolicy::Imperfect { best_pick_chance: 0.75 },
};

const MEDIUM_HARD: DifficultyProfile = DifficultyProfile {
    accuracy: 0.8,
    angle_error: 3.0,
    power_error: 0.12,
    thinking_time_ms: (1200, 2200),
    use_spin: true,
    consider_position: false,
    use_bank_shots: false,
    use_kick_shots: false,
    safety_intelligence: 0.6,
    max_cut_angle: PI * 0.44,
    cut_exponent: 1.6,
    selection: SelectionPolicy::Imperfect { best_pick_chance: 0.85 },
};

const HARD: DifficultyProfile = DifficultyProfile {
    accuracy: 0.9,
    angle_error: 1.5,
    power_error: 0.07,
    thinking_time_ms: (1400, 2600),
    use_spin: true,
    consider_position: true,
    use_bank_shots: true,
    use_kick_shots: true,
    safety_intelligence: 0.8,
    max_cut_angle: PI * 0.45,
    cut_exponent: 1.8,
    selection: SelectionPolicy::Best { run_out_lookahead: false },
};

const EXPERT: DifficultyProfile = DifficultyProfile {
    accuracy: 0.97,
    angle_error: 0.6,
    power_error: 0.03,
    thinking_time_ms: (1500, 3000),
    use_spin: true,
    consider_position: true,
    use_bank_shots: true,
    use_kick_shots: true,
    safety_intelligence: 0.95,
    max_cut_angle: PI * 0.45,
    cut_exponent: 1.8,
    selection: SelectionPolicy::Best { run_out_lookahead: true },
};
