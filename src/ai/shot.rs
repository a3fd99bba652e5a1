//! Shot candidates
//!
//! Every finder produces the same `Shot` record so the selector can rank
//! them uniformly; what differs per shot type lives in `ShotKind`.

use glam::Vec2;
use serde::Serialize;

use crate::table::{Cushion, Pocket};

/// Variant-specific data for a shot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ShotKind {
    /// Cue ball → target → pocket
    Direct { pocket: Pocket, ghost_ball: Vec2 },
    /// Cue ball → target → object ball → pocket
    Combo {
        pocket: Pocket,
        ghost_ball: Vec2,
        /// Ball that actually drops
        object_ball: u8,
        object_ghost: Vec2,
    },
    /// Target banks once off a cushion into the pocket
    Bank {
        pocket: Pocket,
        ghost_ball: Vec2,
        cushion: Cushion,
        bank_point: Vec2,
    },
    /// Cue ball bounces off a cushion to reach the target; contact only
    Kick { cushion: Cushion, kick_point: Vec2 },
    /// Defensive hit leaving the target in a poor spot for the opponent
    Safety { rest_spot: Vec2 },
    /// Plain hit on the nearest legal ball
    Emergency,
    /// Nothing reachable; any direction
    Random,
}

/// A scored shot ready to hand to the physics collaborator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shot {
    /// Cue direction in radians
    pub angle: f32,
    /// Normalized strike power
    pub power: f32,
    /// Side english, -1 (left) to 1 (right)
    pub spin_x: f32,
    /// Top/back spin: negative is follow, positive is draw
    pub spin_y: f32,
    /// First ball the cue ball is meant to contact
    pub target_ball: u8,
    pub score: f32,
    pub cut_angle: f32,
    #[serde(flatten)]
    pub kind: ShotKind,
}

impl Shot {
    pub fn new(angle: f32, power: f32, target_ball: u8, score: f32, cut_angle: f32, kind: ShotKind) -> Self {
        Self {
            angle,
            power,
            spin_x: 0.0,
            spin_y: 0.0,
            target_ball,
            score,
            cut_angle,
            kind,
        }
    }

    /// Short label matching the wire names
    pub fn label(&self) -> &'static str {
        match self.kind {
            ShotKind::Direct { .. } => "direct",
            ShotKind::Combo { .. } => "combo",
            ShotKind::Bank { .. } => "bank",
            ShotKind::Kick { .. } => "kick",
            ShotKind::Safety { .. } => "safety",
            ShotKind::Emergency => "emergency",
            ShotKind::Random => "random",
        }
    }

    /// Pocket the shot is aimed at, if it is a potting shot
    pub fn pocket(&self) -> Option<&Pocket> {
        match &self.kind {
            ShotKind::Direct { pocket, .. }
            | ShotKind::Combo { pocket, .. }
            | ShotKind::Bank { pocket, .. } => Some(pocket),
            _ => None,
        }
    }

    /// Where the cue ball contacts the first ball, if known
    pub fn ghost_ball(&self) -> Option<Vec2> {
        match &self.kind {
            ShotKind::Direct { ghost_ball, .. }
            | ShotKind::Combo { ghost_ball, .. }
            | ShotKind::Bank { ghost_ball, .. } => Some(*ghost_ball),
            _ => None,
        }
    }

    /// Ball this shot is expected to pocket
    pub fn pocketed_ball(&self) -> Option<u8> {
        match &self.kind {
            ShotKind::Direct { .. } | ShotKind::Bank { .. } => Some(self.target_ball),
            ShotKind::Combo { object_ball, .. } => Some(*object_ball),
            _ => None,
        }
    }
}
