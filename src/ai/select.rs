//! Shot selection and post-processing
//!
//! Ranks the candidates according to the difficulty's selection policy,
//! builds a defensive shot when nothing can be potted, and finally applies
//! the difficulty noise that makes weaker levels miss.

use std::cmp::Ordering;

use glam::Vec2;
use rand::Rng;

use super::context::ShotContext;
use super::evaluate::score_pot;
use super::position::predict_cue_rest;
use super::profile::{DifficultyProfile, SelectionPolicy};
use super::shot::{Shot, ShotKind};
use super::spin::planned_spin_y;
use crate::consts::*;
use crate::geometry::path_blocked;
use crate::table::Ball;
use crate::{heading, normalize_angle};

/// How many of the best candidates the run-out lookahead re-ranks
const LOOKAHEAD_CANDIDATES: usize = 3;
/// Share of the best follow-up score added to a candidate
const LOOKAHEAD_WEIGHT: f32 = 0.5;

/// Distance a safety is expected to push the object ball
const SAFETY_PUSH: f32 = 150.0;
const SAFETY_BASE_SCORE: f32 = 50.0;
const SAFETY_DISTANCE_PENALTY: f32 = 0.05;
const SAFETY_CUSHION_BONUS: f32 = 10.0;
const SAFETY_HIDE_BONUS: f32 = 8.0;
const SAFETY_HIDE_RADIUS: f32 = 60.0;
const SAFETY_POCKET_PENALTY: f32 = 20.0;
const SAFETY_POCKET_RADIUS: f32 = 80.0;
const SAFETY_POWER: (f32, f32) = (0.3, 0.5);
const EMERGENCY_POWER: f32 = 0.5;

/// Sort candidates best first
pub fn rank(candidates: &mut [Shot]) {
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}

/// Pick one shot from non-empty candidates according to the profile
pub fn select_shot<R: Rng>(ctx: &ShotContext<'_>, cue: Vec2, mut candidates: Vec<Shot>, rng: &mut R) -> Option<Shot> {
    if candidates.is_empty() {
        return None;
    }
    rank(&mut candidates);

    match ctx.profile.selection {
        SelectionPolicy::Best { run_out_lookahead } => {
            if run_out_lookahead && candidates.len() >= 2 {
                return best_with_lookahead(ctx, cue, candidates);
            }
            candidates.into_iter().next()
        }
        SelectionPolicy::Imperfect { best_pick_chance } => {
            let index = if rng.random::<f32>() < best_pick_chance {
                0
            } else {
                rng.random_range(0..candidates.len().min(2))
            };
            Some(candidates.swap_remove(index))
        }
    }
}

/// Re-rank the top candidates by how good the next shot would be
fn best_with_lookahead(ctx: &ShotContext<'_>, cue: Vec2, candidates: Vec<Shot>) -> Option<Shot> {
    let mut best: Option<(f32, Shot)> = None;
    for shot in candidates.into_iter().take(LOOKAHEAD_CANDIDATES) {
        let total = shot.score + run_out_bonus(ctx, cue, &shot);
        log::trace!("lookahead {} on {}: {:.1} -> {:.1}", shot.label(), shot.target_ball, shot.score, total);
        if best.as_ref().is_none_or(|(score, _)| total > *score) {
            best = Some((total, shot));
        }
    }
    best.map(|(_, shot)| shot)
}

/// Weighted score of the best follow-up from where this shot leaves the cue ball
pub fn run_out_bonus(ctx: &ShotContext<'_>, cue: Vec2, shot: &Shot) -> f32 {
    let Some(ghost) = shot.ghost_ball() else {
        return 0.0;
    };
    let Some(first) = ctx.ball(shot.target_ball) else {
        return 0.0;
    };
    let pocketed = shot.pocketed_ball();
    let rest = predict_cue_rest(
        cue,
        ghost,
        first.pos(),
        shot.power,
        planned_spin_y(shot.cut_angle),
        ctx.table,
    );

    // Board after the shot: the potted ball is gone
    let after: Vec<Ball> = ctx
        .balls
        .iter()
        .map(|b| {
            let mut b = b.clone();
            if Some(b.id) == pocketed {
                b.pocketed = true;
            }
            if b.id == CUE_BALL_ID {
                b.set_pos(rest);
            }
            b
        })
        .collect();
    let follow_ids: Vec<u8> = ctx.follow_up_targets(pocketed).iter().map(|b| b.id).collect();
    let next = ShotContext {
        balls: &after,
        targets: &follow_ids,
        ..*ctx
    };

    next.target_balls()
        .flat_map(|b| next.pockets.iter().filter_map(move |p| score_pot(&next, rest, b, p)))
        .map(|s| s.score)
        .fold(None, |acc: Option<f32>, s| Some(acc.map_or(s, |a| a.max(s))))
        .map_or(0.0, |best| best * LOOKAHEAD_WEIGHT)
}

/// Defensive shot when nothing can be potted
///
/// Plays a soft full hit on the target that best hides it: near a cushion
/// or tucked behind opponent balls, and away from pockets.
pub fn find_safety_shot(ctx: &ShotContext<'_>, cue: Vec2) -> Option<Shot> {
    let radius = ctx.radius();
    let mut best: Option<Shot> = None;

    for target in ctx.target_balls() {
        let line = target.pos() - cue;
        let distance = line.length();
        if distance < 2.0 * radius {
            continue;
        }
        if path_blocked(cue, target.pos(), ctx.balls, &[CUE_BALL_ID, target.id], radius) {
            continue;
        }

        let rest = ctx.table.clamp_ball(target.pos() + line / distance * SAFETY_PUSH);
        let mut score = SAFETY_BASE_SCORE - distance * SAFETY_DISTANCE_PENALTY;
        if ctx.table.distance_to_cushion(rest) < 3.0 * radius {
            score += SAFETY_CUSHION_BONUS;
        }
        if ctx
            .opponent_balls()
            .any(|b| (b.pos() - rest).length() < SAFETY_HIDE_RADIUS)
        {
            score += SAFETY_HIDE_BONUS;
        }
        if ctx
            .pockets
            .iter()
            .any(|p| (p.pos() - rest).length() < SAFETY_POCKET_RADIUS)
        {
            score -= SAFETY_POCKET_PENALTY;
        }

        let power = (SAFETY_POWER.0 + distance / 2000.0).clamp(SAFETY_POWER.0, SAFETY_POWER.1);
        let shot = Shot::new(heading(line), power, target.id, score, 0.0, ShotKind::Safety { rest_spot: rest });
        if best.as_ref().is_none_or(|b| shot.score > b.score) {
            best = Some(shot);
        }
    }
    best
}

/// Plain hit on the nearest legal ball, obstructed or not
pub fn hit_nearest(ctx: &ShotContext<'_>, cue: Vec2) -> Option<Shot> {
    ctx.target_balls()
        .filter(|b| (b.pos() - cue).length() > crate::geometry::EPSILON)
        .min_by(|a, b| {
            let da = (a.pos() - cue).length();
            let db = (b.pos() - cue).length();
            da.partial_cmp(&db).unwrap_or(Ordering::Equal)
        })
        .map(|b| Shot::new(heading(b.pos() - cue), EMERGENCY_POWER, b.id, 0.0, 0.0, ShotKind::Emergency))
}

/// Last resort: any direction at all
pub fn random_shot<R: Rng>(rng: &mut R) -> Shot {
    let angle = rng.random_range(-std::f32::consts::PI..std::f32::consts::PI);
    Shot::new(angle, EMERGENCY_POWER, CUE_BALL_ID, f32::MIN, 0.0, ShotKind::Random)
}

/// Fallback chain: safety (with probability `safety_intelligence`), nearest ball, random
pub fn fallback_shot<R: Rng>(ctx: &ShotContext<'_>, cue: Vec2, rng: &mut R) -> Shot {
    let roll = rng.random::<f32>();
    if roll < ctx.profile.safety_intelligence {
        if let Some(shot) = find_safety_shot(ctx, cue) {
            log::debug!("no pot available, playing safety on {}", shot.target_ball);
            return shot;
        }
    }
    if let Some(shot) = hit_nearest(ctx, cue) {
        log::debug!("no pot available, hitting nearest ball {}", shot.target_ball);
        return shot;
    }
    log::warn!("no legal ball to aim at, shooting at random");
    random_shot(rng)
}

/// Perturb aim and power according to the difficulty
///
/// Applied last, after spin. Power always stays in a playable range.
pub fn apply_difficulty_noise<R: Rng>(shot: &mut Shot, profile: &DifficultyProfile, rng: &mut R) {
    if rng.random::<f32>() > profile.accuracy {
        let error = profile.angle_error.abs();
        let delta = rng.random_range(-error..=error);
        shot.angle = normalize_angle(shot.angle + delta.to_radians());
    }
    let spread = profile.power_error.abs();
    let factor = 1.0 + rng.random_range(-spread..=spread);
    shot.power = (shot.power * factor).clamp(MIN_NOISY_POWER, MAX_NOISY_POWER);
}
