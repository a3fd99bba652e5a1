//! Ball-in-hand cue placement

use std::cmp::Ordering;

use glam::Vec2;

use super::context::ShotContext;
use crate::consts::CUE_BALL_ID;
use crate::geometry::EPSILON;
use crate::table::Ball;

/// Distance behind the target, on the pocket line, tried in order
const PLACEMENT_OFFSETS: [f32; 3] = [100.0, 140.0, 70.0];

/// Where to put the cue ball with ball in hand
///
/// Picks the target closest to a pocket and sets up a straight-in shot by
/// placing the cue behind it on the pocket line. Falls back to the table
/// center when every candidate spot overlaps another ball.
pub fn ball_in_hand_position(ctx: &ShotContext<'_>) -> Vec2 {
    let best = ctx
        .target_balls()
        .filter_map(|b| nearest_pocket(ctx, b).map(|(pocket, dist)| (b, pocket, dist)))
        .min_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(Ordering::Equal));

    if let Some((target, pocket, _)) = best {
        let away = (target.pos() - pocket).normalize_or_zero();
        if away != Vec2::ZERO {
            for offset in PLACEMENT_OFFSETS {
                let spot = ctx.table.clamp_ball(target.pos() + away * offset);
                if is_free(ctx, spot) {
                    return spot;
                }
            }
        }
    }

    let center = ctx.table.center();
    if !is_free(ctx, center) {
        log::warn!("table center occupied, placing cue ball there anyway");
    }
    center
}

fn nearest_pocket(ctx: &ShotContext<'_>, ball: &Ball) -> Option<(Vec2, f32)> {
    ctx.pockets
        .iter()
        .map(|p| (p.pos(), (p.pos() - ball.pos()).length()))
        .filter(|(_, d)| *d > EPSILON)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
}

fn is_free(ctx: &ShotContext<'_>, spot: Vec2) -> bool {
    let min_gap = 2.0 * ctx.radius();
    ctx.balls
        .iter()
        .filter(|b| b.id != CUE_BALL_ID && b.on_table())
        .all(|b| (b.pos() - spot).length() >= min_gap)
}
