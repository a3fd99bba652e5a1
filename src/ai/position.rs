//! Cue-ball position heuristics
//!
//! The rest spot is an approximation, not a physics replay: the cue ball
//! leaves the contact point along the tangent line, pushed forward by
//! follow or pulled back by draw, and travels a distance proportional to
//! power. Constants are calibration knobs.

use glam::Vec2;

use super::context::ShotContext;
use crate::geometry::{EPSILON, ghost_ball};
use crate::table::TableGeometry;

/// Cue travel after contact at full power, before spin scaling
const CUE_TRAVEL_AT_FULL_POWER: f32 = 400.0;
/// How much spin stretches (follow) or shortens (draw) the travel
const SPIN_TRAVEL_FACTOR: f32 = 0.5;
/// How strongly spin bends the exit direction along the object line
const SPIN_DIRECTION_FACTOR: f32 = 0.8;

/// Distance bands from rest spot to the next ghost ball
const NEAR_BAND: (f32, f32) = (40.0, 150.0);
const MEDIUM_BAND_MAX: f32 = 300.0;
const NEAR_BONUS: f32 = 10.0;
const MEDIUM_BONUS: f32 = 5.0;
const CUSHION_PENALTY: f32 = 8.0;
const CENTER_BONUS: f32 = 6.0;
const MAX_POSITION_BONUS: f32 = 25.0;

/// Where the cue ball is expected to stop after contacting at `ghost`
pub fn predict_cue_rest(
    cue: Vec2,
    ghost: Vec2,
    target: Vec2,
    power: f32,
    spin_y: f32,
    table: &TableGeometry,
) -> Vec2 {
    let approach = (ghost - cue).normalize_or_zero();
    let object_dir = (target - ghost).normalize_or_zero();

    // Stun shot: the cue ball keeps only the component perpendicular to the object line
    let tangent = approach - object_dir * approach.dot(object_dir);
    // Follow (negative spin_y) carries it forward, draw pulls it back
    let exit = tangent + object_dir * (-spin_y * SPIN_DIRECTION_FACTOR);
    if exit.length() < EPSILON {
        return table.clamp_ball(ghost);
    }

    let travel = power * CUE_TRAVEL_AT_FULL_POWER * (1.0 - spin_y * SPIN_TRAVEL_FACTOR).max(0.1);
    table.clamp_ball(ghost + exit * travel)
}

/// Bonus for leaving the cue ball well placed for the next shot
///
/// `shot_target` is the first ball struck and `pocketed` the ball expected to drop.
pub fn position_bonus(ctx: &ShotContext<'_>, rest: Vec2, shot_target: u8, pocketed: Option<u8>) -> f32 {
    let radius = ctx.radius();
    let mut bonus = 0.0;

    for ball in ctx.follow_up_targets(pocketed) {
        if ball.id == shot_target {
            continue;
        }
        let nearest_ghost = ctx
            .pockets
            .iter()
            .filter_map(|p| ghost_ball(ball.pos(), p.pos(), radius))
            .map(|g| (g - rest).length())
            .fold(f32::INFINITY, f32::min);

        if (NEAR_BAND.0..=NEAR_BAND.1).contains(&nearest_ghost) {
            bonus += NEAR_BONUS;
        } else if nearest_ghost <= MEDIUM_BAND_MAX {
            bonus += MEDIUM_BONUS;
        }
    }

    if ctx.table.distance_to_cushion(rest) < 2.0 * radius {
        bonus -= CUSHION_PENALTY;
    }

    let from_center = (rest - ctx.table.center()).length() / ctx.table.half_diagonal();
    bonus += (1.0 - from_center).max(0.0) * CENTER_BONUS;

    bonus.min(MAX_POSITION_BONUS)
}
