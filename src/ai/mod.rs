//! Shot-selection AI
//!
//! Pure decision functions over an explicit `ShotContext`, wrapped by the
//! stateful `AiPlayer` that owns difficulty and RNG.

pub mod context;
pub mod evaluate;
pub mod finders;
pub mod placement;
pub mod player;
pub mod position;
pub mod profile;
pub mod select;
pub mod shot;
pub mod spin;

pub use context::ShotContext;
pub use evaluate::evaluate_shot;
pub use player::{AiPlayer, ShotRequest, TargetGroup};
pub use profile::{Difficulty, DifficultyProfile, SelectionPolicy};
pub use select::apply_difficulty_noise;
pub use shot::{Shot, ShotKind};
