//! Shot evaluation
//!
//! `evaluate_shot` is the shared primitive behind direct shots, each combo
//! leg and the run-out lookahead: given a cue position, a target and a
//! pocket it either rejects the shot or returns it scored and powered.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::Vec2;

use super::context::ShotContext;
use super::position::{position_bonus, predict_cue_rest};
use super::shot::{Shot, ShotKind};
use super::spin::{STRAIGHT_CUT, planned_spin_y};
use crate::consts::*;
use crate::geometry::{EPSILON, cut_angle, ghost_ball, path_blocked};
use crate::heading;
use crate::table::{Ball, Pocket, TableGeometry};

/// Target-to-pocket distance beyond which a pot is not attempted
pub const MAX_POT_DISTANCE: f32 = 500.0;

const BASE_SCORE: f32 = 100.0;
const CUE_DISTANCE_PENALTY: f32 = 0.04;
const POCKET_DISTANCE_PENALTY: f32 = 0.06;
const CUT_PENALTY: f32 = 30.0;
const STRAIGHT_SHOT_BONUS: f32 = 15.0;
const SHORT_CUE_DISTANCE: f32 = 200.0;
const SHORT_CUE_BONUS: f32 = 8.0;
const SHORT_POT_DISTANCE: f32 = 150.0;
const SHORT_POT_BONUS: f32 = 10.0;
const CORNER_POCKET_BONUS: f32 = 5.0;
/// Side pockets only accept balls arriving within this angle of square
const SIDE_POCKET_MAX_APPROACH: f32 = FRAC_PI_4;

/// Evaluate cue ball → target → pocket, including position play when enabled
pub fn evaluate_shot(ctx: &ShotContext<'_>, cue: Vec2, target: &Ball, pocket: &Pocket) -> Option<Shot> {
    let mut shot = score_pot(ctx, cue, target, pocket)?;

    if ctx.profile.consider_position {
        if let Some(ghost) = shot.ghost_ball() {
            let rest = predict_cue_rest(
                cue,
                ghost,
                target.pos(),
                shot.power,
                planned_spin_y(shot.cut_angle),
                ctx.table,
            );
            shot.score += position_bonus(ctx, rest, target.id, Some(target.id));
        }
    }

    Some(shot)
}

/// Geometry and base score of a direct pot, without position play
pub fn score_pot(ctx: &ShotContext<'_>, cue: Vec2, target: &Ball, pocket: &Pocket) -> Option<Shot> {
    let radius = ctx.radius();
    let to_pocket = pocket.pos() - target.pos();
    let pot_distance = to_pocket.length();
    if pot_distance > MAX_POT_DISTANCE || pot_distance < EPSILON {
        return None;
    }
    if pocket.is_center && !side_pocket_accepts(pocket, to_pocket, ctx.table) {
        return None;
    }

    let ghost = ghost_ball(target.pos(), pocket.pos(), radius)?;
    let approach = ghost - cue;
    let cue_distance = approach.length();
    if cue_distance < EPSILON {
        return None;
    }

    if path_blocked(cue, ghost, ctx.balls, &[CUE_BALL_ID, target.id], radius) {
        return None;
    }
    if path_blocked(target.pos(), pocket.pos(), ctx.balls, &[target.id], radius) {
        return None;
    }

    let cut = cut_angle(approach, to_pocket);
    if cut > ctx.profile.max_cut_angle {
        return None;
    }

    let mut score = BASE_SCORE
        - cue_distance * CUE_DISTANCE_PENALTY
        - pot_distance * POCKET_DISTANCE_PENALTY
        - cut.powf(ctx.profile.cut_exponent) * CUT_PENALTY;
    if cut < STRAIGHT_CUT {
        score += STRAIGHT_SHOT_BONUS;
    }
    if cue_distance < SHORT_CUE_DISTANCE {
        score += SHORT_CUE_BONUS;
    }
    if pot_distance < SHORT_POT_DISTANCE {
        score += SHORT_POT_BONUS;
    }
    if !pocket.is_center {
        score += CORNER_POCKET_BONUS;
    }

    Some(Shot::new(
        heading(approach),
        shot_power(cue_distance + pot_distance, cut),
        target.id,
        score,
        cut,
        ShotKind::Direct { pocket: *pocket, ghost_ball: ghost },
    ))
}

/// Power for a shot covering `travel` units with the given cut
///
/// Sharp cuts transfer less speed to the object ball, so they get a
/// nonlinear boost; very short shots are softened.
pub fn shot_power(travel: f32, cut: f32) -> f32 {
    let mut power = 0.3 + travel / 1000.0 * 0.5;
    let cut_ratio = (cut / FRAC_PI_2).clamp(0.0, 1.0);
    power *= 1.0 + cut_ratio * cut_ratio * 0.4;
    if travel < 150.0 {
        power *= 0.85;
    }
    power.clamp(MIN_SHOT_POWER, MAX_SHOT_POWER)
}

/// Whether a ball travelling along `to_pocket` can drop into a side pocket
pub(crate) fn side_pocket_accepts(pocket: &Pocket, to_pocket: Vec2, table: &TableGeometry) -> bool {
    let outward = if pocket.y < table.center().y {
        Vec2::NEG_Y
    } else {
        Vec2::Y
    };
    cut_angle(to_pocket, outward) <= SIDE_POCKET_MAX_APPROACH
}
