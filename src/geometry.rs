//! Shot geometry
//!
//! Pure helpers shared by every shot finder: ghost-ball placement, cut
//! angles and the line-of-sight test that decides whether a leg of a shot
//! is obstructed by another ball.

use glam::Vec2;

use crate::table::Ball;

/// Obstruction margin as a multiple of the ball radius (touching balls are 2 apart)
pub const BLOCK_MARGIN: f32 = 2.2;

/// Lengths below this are treated as degenerate
pub const EPSILON: f32 = 1e-3;

/// Where the cue ball's center must be at contact to send `target` toward `pocket`
///
/// The ghost ball sits on the pocket→target line, one ball diameter behind
/// the target. Returns `None` when target and pocket coincide.
pub fn ghost_ball(target: Vec2, pocket: Vec2, radius: f32) -> Option<Vec2> {
    let away = target - pocket;
    let len = away.length();
    if len < EPSILON {
        return None;
    }
    Some(target + away / len * (2.0 * radius))
}

/// Closest point on segment `a -> b` to `p` (parameter clamped to [0, 1])
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let seg = b - a;
    let len_sq = seg.length_squared();
    if len_sq < EPSILON * EPSILON {
        return a;
    }
    let t = ((p - a).dot(seg) / len_sq).clamp(0.0, 1.0);
    a + seg * t
}

/// Distance from `p` to segment `a -> b`
#[inline]
pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    (p - closest_point_on_segment(p, a, b)).length()
}

/// True if any ball on the table, other than those in `exclude`, lies within
/// `BLOCK_MARGIN` radii of the segment `from -> to`
pub fn path_blocked(from: Vec2, to: Vec2, balls: &[Ball], exclude: &[u8], radius: f32) -> bool {
    let limit = BLOCK_MARGIN * radius;
    balls
        .iter()
        .filter(|b| b.on_table() && !exclude.contains(&b.id))
        .any(|b| distance_to_segment(b.pos(), from, to) < limit)
}

/// Angle between the cue ball's approach and the object ball's departure
///
/// Uses atan2(|cross|, dot) so the result is always in [0, π].
pub fn cut_angle(approach: Vec2, departure: Vec2) -> f32 {
    let cross = approach.perp_dot(departure).abs();
    let dot = approach.dot(departure);
    cross.atan2(dot)
}

/// Which side of `dir` (from `origin`) the point `p` lies on
///
/// Sign of the cross product: 1 is to the right in y-down table coordinates,
/// -1 to the left, 0 on the line.
pub fn side_of(origin: Vec2, dir: Vec2, p: Vec2) -> f32 {
    let c = dir.perp_dot(p - origin);
    if c.abs() < EPSILON { 0.0 } else { c.signum() }
}
