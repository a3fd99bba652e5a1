//! Eightball AI - client-side opponent and turn logic for online 8-ball pool
//!
//! Core modules:
//! - `table`: Balls, pockets and table geometry shared with the physics collaborator
//! - `geometry`: Ghost-ball, obstruction and cushion-reflection math
//! - `ai`: Shot finding, scoring, selection and the `AiPlayer` façade
//! - `net`: Server snapshot reconciliation and the AI turn state machine
//! - `settings`: Runtime configuration

pub mod ai;
pub mod error;
pub mod geometry;
pub mod net;
pub mod settings;
pub mod table;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use ai::{AiPlayer, Difficulty, DifficultyProfile, Shot, ShotKind, ShotRequest, TargetGroup};
pub use error::{Error, Result};
pub use settings::Settings;
pub use table::{Ball, BallGroup, Pocket, TableGeometry};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Ball radius in table units
    pub const BALL_RADIUS: f32 = 10.0;

    /// Play field bounds (cushion noses). Ball centers stay one radius inside.
    pub const TABLE_MIN_X: f32 = 40.0;
    pub const TABLE_MIN_Y: f32 = 40.0;
    pub const TABLE_MAX_X: f32 = 880.0;
    pub const TABLE_MAX_Y: f32 = 460.0;

    /// Ball ids
    pub const CUE_BALL_ID: u8 = 0;
    pub const EIGHT_BALL_ID: u8 = 8;

    /// Power limits for evaluated shots (never 0 or 1, keeps physics stable)
    pub const MIN_SHOT_POWER: f32 = 0.35;
    pub const MAX_SHOT_POWER: f32 = 0.95;

    /// Power limits after difficulty noise
    pub const MIN_NOISY_POWER: f32 = 0.25;
    pub const MAX_NOISY_POWER: f32 = 1.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit vector pointing along `angle`
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Heading of a vector in radians
#[inline]
pub fn heading(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}
