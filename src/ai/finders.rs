//! Shot finders
//!
//! Each finder enumerates one family of shots over the current layout and
//! returns every geometrically valid candidate. They are pure: same inputs,
//! same candidates, no side effects.

use glam::Vec2;

use super::context::ShotContext;
use super::evaluate::{evaluate_shot, shot_power, side_pocket_accepts};
use super::shot::{Shot, ShotKind};
use crate::consts::*;
use crate::geometry::{EPSILON, cut_angle, ghost_ball, path_blocked};
use crate::heading;
use crate::table::{Ball, Cushion, Pocket};

/// Combo legs: the risk compounds, so each leg is kept short
const COMBO_MAX_CUE_LEG: f32 = 600.0;
const COMBO_MAX_TRANSFER_LEG: f32 = 300.0;
const COMBO_MAX_POT_LEG: f32 = 300.0;
/// Cut allowed on the object ball of a combo
const COMBO_MAX_OBJECT_CUT: f32 = 0.5;
const COMBO_BASE_SCORE: f32 = 65.0;
const COMBO_DISTANCE_PENALTY: f32 = 0.005;
const COMBO_POWER_BOOST: f32 = 0.1;

const BANK_MAX_TRAVEL: f32 = 700.0;
/// Bank points closer than this to a pocket or rail end are rejected
const BANK_CORNER_MARGIN: f32 = 40.0;
/// Banks tolerate less cut than direct pots
const BANK_CUT_FACTOR: f32 = 0.8;
const BANK_BASE_SCORE: f32 = 50.0;
const BANK_CUT_PENALTY: f32 = 15.0;
const BANK_DISTANCE_PENALTY: f32 = 0.03;
const BANK_POWER_BOOST: f32 = 0.1;

const KICK_BASE_SCORE: f32 = 20.0;
const KICK_DISTANCE_PENALTY: f32 = 0.01;

/// Every unobstructed cue ball → target → pocket shot
pub fn find_direct_shots(ctx: &ShotContext<'_>, cue: Vec2) -> Vec<Shot> {
    let mut shots = Vec::new();
    for target in ctx.target_balls() {
        for pocket in ctx.pockets {
            if let Some(shot) = evaluate_shot(ctx, cue, target, pocket) {
                shots.push(shot);
            }
        }
    }
    shots
}

/// Two-ball combinations: the cue ball drives `first` into `second`, which drops
pub fn find_combo_shots(ctx: &ShotContext<'_>, cue: Vec2) -> Vec<Shot> {
    let mut shots = Vec::new();
    let targets: Vec<&Ball> = ctx.target_balls().collect();
    for first in &targets {
        for second in &targets {
            if first.id == second.id {
                continue;
            }
            for pocket in ctx.pockets {
                if let Some(shot) = combo_shot(ctx, cue, first, second, pocket) {
                    shots.push(shot);
                }
            }
        }
    }
    shots
}

fn combo_shot(ctx: &ShotContext<'_>, cue: Vec2, first: &Ball, second: &Ball, pocket: &Pocket) -> Option<Shot> {
    let radius = ctx.radius();

    let pot_leg = pocket.pos() - second.pos();
    if pot_leg.length() > COMBO_MAX_POT_LEG {
        return None;
    }
    let second_ghost = ghost_ball(second.pos(), pocket.pos(), radius)?;

    let transfer_leg = second_ghost - first.pos();
    if transfer_leg.length() > COMBO_MAX_TRANSFER_LEG || transfer_leg.length() < EPSILON {
        return None;
    }
    // The ghost of the second ball is the "pocket" for the first
    let first_ghost = ghost_ball(first.pos(), second_ghost, radius)?;

    let cue_leg = first_ghost - cue;
    if cue_leg.length() > COMBO_MAX_CUE_LEG || cue_leg.length() < EPSILON {
        return None;
    }

    if path_blocked(cue, first_ghost, ctx.balls, &[CUE_BALL_ID, first.id], radius)
        || path_blocked(first.pos(), second_ghost, ctx.balls, &[first.id, second.id], radius)
        || path_blocked(second.pos(), pocket.pos(), ctx.balls, &[second.id], radius)
    {
        return None;
    }

    let cue_cut = cut_angle(cue_leg, transfer_leg);
    let object_cut = cut_angle(transfer_leg, pot_leg);
    if cue_cut > ctx.profile.max_cut_angle || object_cut > COMBO_MAX_OBJECT_CUT {
        return None;
    }

    let travel = cue_leg.length() + transfer_leg.length() + pot_leg.length();
    let score = COMBO_BASE_SCORE - travel * COMBO_DISTANCE_PENALTY;
    let power = (shot_power(travel, cue_cut) + COMBO_POWER_BOOST).min(MAX_SHOT_POWER);

    Some(Shot::new(
        heading(cue_leg),
        power,
        first.id,
        score,
        cue_cut,
        ShotKind::Combo {
            pocket: *pocket,
            ghost_ball: first_ghost,
            object_ball: second.id,
            object_ghost: second_ghost,
        },
    ))
}

/// One-cushion banks of a target ball into a pocket
pub fn find_bank_shots(ctx: &ShotContext<'_>, cue: Vec2) -> Vec<Shot> {
    let mut shots = Vec::new();
    for target in ctx.target_balls() {
        for pocket in ctx.pockets {
            for cushion in Cushion::ALL {
                if let Some(shot) = bank_shot(ctx, cue, target, pocket, cushion) {
                    shots.push(shot);
                }
            }
        }
    }
    shots
}

fn bank_shot(ctx: &ShotContext<'_>, cue: Vec2, target: &Ball, pocket: &Pocket, cushion: Cushion) -> Option<Shot> {
    let radius = ctx.radius();
    let table = ctx.table;

    let mirrored_pocket = cushion.mirror(pocket.pos(), table);
    let bank_point = cushion.crossing(target.pos(), mirrored_pocket, table)?;
    if !cushion.spans(bank_point, table) || near_pocket_or_corner(ctx, bank_point) {
        return None;
    }

    let to_bank = bank_point - target.pos();
    let from_bank = pocket.pos() - bank_point;
    if pocket.is_center && !side_pocket_accepts(pocket, from_bank, table) {
        return None;
    }
    let travel = to_bank.length() + from_bank.length();
    if travel > BANK_MAX_TRAVEL || to_bank.length() < EPSILON {
        return None;
    }

    let ghost = ghost_ball(target.pos(), bank_point, radius)?;
    let approach = ghost - cue;
    if approach.length() < EPSILON {
        return None;
    }

    if path_blocked(cue, ghost, ctx.balls, &[CUE_BALL_ID, target.id], radius)
        || path_blocked(target.pos(), bank_point, ctx.balls, &[target.id], radius)
        || path_blocked(bank_point, pocket.pos(), ctx.balls, &[target.id], radius)
    {
        return None;
    }

    let cut = cut_angle(approach, to_bank);
    if cut > ctx.profile.max_cut_angle * BANK_CUT_FACTOR {
        return None;
    }

    let score = BANK_BASE_SCORE
        - cut.powf(ctx.profile.cut_exponent) * BANK_CUT_PENALTY
        - travel * BANK_DISTANCE_PENALTY;
    let power = (shot_power(approach.length() + travel, cut) + BANK_POWER_BOOST).min(MAX_SHOT_POWER);

    Some(Shot::new(
        heading(approach),
        power,
        target.id,
        score,
        cut,
        ShotKind::Bank { pocket: *pocket, ghost_ball: ghost, cushion, bank_point },
    ))
}

/// One-cushion kicks: the cue ball bounces once and strikes a target
///
/// Contact only, no pocket is planned. Used when nothing else can be hit.
pub fn find_kick_shots(ctx: &ShotContext<'_>, cue: Vec2) -> Vec<Shot> {
    let mut shots = Vec::new();
    for target in ctx.target_balls() {
        for cushion in Cushion::ALL {
            if let Some(shot) = kick_shot(ctx, cue, target, cushion) {
                shots.push(shot);
            }
        }
    }
    shots
}

fn kick_shot(ctx: &ShotContext<'_>, cue: Vec2, target: &Ball, cushion: Cushion) -> Option<Shot> {
    let radius = ctx.radius();
    let table = ctx.table;

    let mirrored_cue = cushion.mirror(cue, table);
    let kick_point = cushion.crossing(mirrored_cue, target.pos(), table)?;
    if !cushion.spans(kick_point, table) || near_pocket_or_corner(ctx, kick_point) {
        return None;
    }

    let to_rail = kick_point - cue;
    let to_target = target.pos() - kick_point;
    if to_rail.length() < EPSILON || to_target.length() < EPSILON {
        return None;
    }

    if path_blocked(cue, kick_point, ctx.balls, &[CUE_BALL_ID], radius)
        || path_blocked(kick_point, target.pos(), ctx.balls, &[CUE_BALL_ID, target.id], radius)
    {
        return None;
    }

    let travel = to_rail.length() + to_target.length();
    let power = (0.45 + travel / 1600.0).clamp(MIN_SHOT_POWER, MAX_SHOT_POWER);

    Some(Shot::new(
        heading(to_rail),
        power,
        target.id,
        KICK_BASE_SCORE - travel * KICK_DISTANCE_PENALTY,
        0.0,
        ShotKind::Kick { cushion, kick_point },
    ))
}

fn near_pocket_or_corner(ctx: &ShotContext<'_>, p: Vec2) -> bool {
    let lo = ctx.table.rail_min();
    let hi = ctx.table.rail_max();
    let corners = [lo, Vec2::new(hi.x, lo.y), Vec2::new(lo.x, hi.y), hi];
    ctx.pockets
        .iter()
        .map(|pocket| pocket.pos())
        .chain(corners)
        .any(|q| (q - p).length() < BANK_CORNER_MARGIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::profile::Difficulty;
    use crate::table::TableGeometry;

    fn ctx<'a>(
        balls: &'a [Ball],
        pockets: &'a [Pocket],
        table: &'a TableGeometry,
        targets: &'a [u8],
    ) -> ShotContext<'a> {
        ShotContext {
            balls,
            pockets,
            table,
            profile: Difficulty::Expert.profile(),
            targets,
            opponent_group: None,
        }
    }

    #[test]
    fn test_direct_shots_cover_pockets() {
        let table = TableGeometry::default();
        let pockets = table.default_pockets();
        let cue = Vec2::new(300.0, 250.0);
        let balls = vec![Ball::new(0, cue), Ball::new(1, Vec2::new(600.0, 250.0))];
        let targets = [1u8];
        let shots = find_direct_shots(&ctx(&balls, &pockets, &table, &targets), cue);
        assert!(!shots.is_empty());
        assert!(shots.iter().all(|s| s.target_ball == 1 && s.label() == "direct"));
        // At least the two right-hand corners are makeable
        let corners = shots
            .iter()
            .filter(|s| s.pocket().map(|p| p.x > 800.0).unwrap_or(false))
            .count();
        assert!(corners >= 2);
    }

    #[test]
    fn test_direct_ignores_non_targets() {
        let table = TableGeometry::default();
        let pockets = table.default_pockets();
        let cue = Vec2::new(300.0, 250.0);
        let balls = vec![Ball::new(0, cue), Ball::new(12, Vec2::new(600.0, 250.0))];
        let targets = [1u8];
        assert!(find_direct_shots(&ctx(&balls, &pockets, &table, &targets), cue).is_empty());
    }

    #[test]
    fn test_combo_straight_line() {
        let table = TableGeometry::default();
        let pocket = Pocket::new(880.0, 250.0, false);
        let pockets = [pocket];
        let cue = Vec2::new(400.0, 250.0);
        let balls = vec![
            Ball::new(0, cue),
            Ball::new(2, Vec2::new(600.0, 250.0)),
            Ball::new(6, Vec2::new(720.0, 250.0)),
        ];
        let targets = [2u8, 6];
        let c = ctx(&balls, &pockets, &table, &targets);
        let combos = find_combo_shots(&c, cue);
        assert_eq!(combos.len(), 1);
        let combo = &combos[0];
        assert_eq!(combo.target_ball, 2);
        assert_eq!(combo.pocketed_ball(), Some(6));
        assert!(combo.cut_angle < 0.01);
        assert!((60.0..=65.0).contains(&combo.score));

        // A direct pot on 2 is blocked by 6, so combos are the only pot
        assert!(find_direct_shots(&c, cue).iter().all(|s| s.target_ball != 2));
    }

    #[test]
    fn test_combo_blocked_cue_leg() {
        let table = TableGeometry::default();
        let pocket = Pocket::new(880.0, 250.0, false);
        let pockets = [pocket];
        let cue = Vec2::new(200.0, 250.0);
        let balls = vec![
            Ball::new(0, cue),
            Ball::new(9, Vec2::new(300.0, 255.0)),
            Ball::new(10, Vec2::new(400.0, 245.0)),
            Ball::new(11, Vec2::new(500.0, 250.0)),
            Ball::new(2, Vec2::new(600.0, 250.0)),
            Ball::new(6, Vec2::new(720.0, 250.0)),
        ];
        let targets = [2u8, 6];
        assert!(find_combo_shots(&ctx(&balls, &pockets, &table, &targets), cue).is_empty());
    }

    #[test]
    fn test_bank_off_top_rail() {
        let table = TableGeometry::default();
        // Only a bottom side pocket; target sits near the top rail
        let pocket = Pocket::new(460.0, 460.0, true);
        let pockets = [pocket];
        let cue = Vec2::new(460.0, 300.0);
        let balls = vec![Ball::new(0, cue), Ball::new(4, Vec2::new(460.0, 120.0))];
        let targets = [4u8];
        let c = ctx(&balls, &pockets, &table, &targets);

        let banks = find_bank_shots(&c, cue);
        assert!(banks.iter().all(|s| s.label() == "bank"));
        // Straight back off the top rail is blocked by the cue ball itself,
        // so any bank found must go off a side rail instead
        for bank in &banks {
            if let ShotKind::Bank { bank_point, cushion, .. } = bank.kind {
                assert!(table.contains_ball(bank_point));
                assert_ne!(cushion, Cushion::Top);
            }
        }
    }

    #[test]
    fn test_bank_found_when_clear() {
        let table = TableGeometry::default();
        let pocket = Pocket::new(880.0, 460.0, false);
        let pockets = [pocket];
        let cue = Vec2::new(300.0, 400.0);
        let target = Ball::new(5, Vec2::new(600.0, 200.0));
        let balls = vec![Ball::new(0, cue), target.clone()];
        let targets = [5u8];
        let c = ctx(&balls, &pockets, &table, &targets);

        let shot = bank_shot(&c, cue, &target, &pocket, Cushion::Top).expect("top-rail bank");
        let ShotKind::Bank { bank_point, .. } = shot.kind else {
            panic!("expected bank");
        };
        assert!((bank_point.y - 50.0).abs() < 1e-3);
        assert!((MIN_SHOT_POWER..=MAX_SHOT_POWER).contains(&shot.power));
        assert!(shot.score < 65.0);
    }

    #[test]
    fn test_kick_around_blocker() {
        let table = TableGeometry::default();
        let pockets = table.default_pockets();
        let cue = Vec2::new(300.0, 300.0);
        let balls = vec![
            Ball::new(0, cue),
            Ball::new(12, Vec2::new(400.0, 300.0)),
            Ball::new(3, Vec2::new(500.0, 300.0)),
        ];
        let targets = [3u8];
        let c = ctx(&balls, &pockets, &table, &targets);

        // No direct contact with 3, but a kick off the top rail reaches it
        let kicks = find_kick_shots(&c, cue);
        let top = kicks
            .iter()
            .find(|s| matches!(s.kind, ShotKind::Kick { cushion: Cushion::Top, .. }))
            .expect("top-rail kick");
        assert_eq!(top.target_ball, 3);
        assert!(top.score < 20.0);
        // Aimed upward (negative y) toward the rail
        assert!(top.angle < 0.0);
    }
}
