//! Spin assignment for position play
//!
//! Convention: negative `spin_y` is follow, positive is draw. `spin_x` is
//! side english, positive to the right of the aim line (table coordinates
//! are y-down, so "right" is the positive cross-product side).

use glam::Vec2;

use super::context::ShotContext;
use super::shot::Shot;
use crate::consts::EIGHT_BALL_ID;
use crate::direction;
use crate::geometry::side_of;

/// Cut below which a shot counts as straight
pub const STRAIGHT_CUT: f32 = 0.15;
const STRAIGHT_FOLLOW: f32 = -0.2;
/// Cut bands (radians) for increasing draw
const MEDIUM_CUT: f32 = 0.35;
const SHARP_CUT: f32 = 0.7;
const MEDIUM_DRAW: f32 = 0.3;
const SHARP_DRAW: f32 = 0.5;
/// Control draw used when potting the eight
pub const EIGHT_BALL_DRAW: f32 = 0.15;
const ENGLISH: f32 = 0.25;

/// Top/back spin planned for a pot with this cut angle
pub fn planned_spin_y(cut_angle: f32) -> f32 {
    if cut_angle < STRAIGHT_CUT {
        STRAIGHT_FOLLOW
    } else if cut_angle > SHARP_CUT {
        SHARP_DRAW
    } else if cut_angle > MEDIUM_CUT {
        MEDIUM_DRAW
    } else {
        0.0
    }
}

/// Set spin on a selected shot
///
/// Only potting shots get spin; kicks and defensive shots are played plain.
pub fn assign_spin(shot: &mut Shot, ctx: &ShotContext<'_>) {
    shot.spin_x = 0.0;
    shot.spin_y = 0.0;

    let Some(ghost) = shot.ghost_ball() else {
        return;
    };
    if shot.pocketed_ball() == Some(EIGHT_BALL_ID) {
        shot.spin_y = EIGHT_BALL_DRAW;
        return;
    }

    shot.spin_y = planned_spin_y(shot.cut_angle);

    // English toward where the next balls are
    let next: Vec<Vec2> = ctx
        .follow_up_targets(shot.pocketed_ball())
        .iter()
        .filter(|b| b.id != shot.target_ball)
        .map(|b| b.pos())
        .collect();
    if next.is_empty() {
        return;
    }
    let average = next.iter().copied().sum::<Vec2>() / next.len() as f32;
    let side = side_of(ghost, direction(shot.angle), average);
    shot.spin_x = (side * ENGLISH).clamp(-1.0, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::profile::Difficulty;
    use crate::ai::shot::ShotKind;
    use crate::table::{Ball, Pocket, TableGeometry};

    #[test]
    fn test_planned_spin_bands() {
        assert!(planned_spin_y(0.05) < 0.0);
        assert_eq!(planned_spin_y(0.25), 0.0);
        assert_eq!(planned_spin_y(0.5), MEDIUM_DRAW);
        assert_eq!(planned_spin_y(1.0), SHARP_DRAW);
    }

    fn ctx_fixture<'a>(
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
    fn test_eight_ball_gets_control_draw() {
        let table = TableGeometry::default();
        let pockets = table.default_pockets();
        let balls = vec![Ball::new(0, Vec2::new(200.0, 250.0)), Ball::new(8, Vec2::new(500.0, 250.0))];
        let targets = [8u8];
        let ctx = ctx_fixture(&balls, &pockets, &table, &targets);
        let mut shot = Shot::new(
            0.0,
            0.6,
            8,
            90.0,
            0.9,
            ShotKind::Direct { pocket: pockets[5], ghost_ball: Vec2::new(480.0, 250.0) },
        );
        assign_spin(&mut shot, &ctx);
        assert_eq!(shot.spin_y, EIGHT_BALL_DRAW);
        assert_eq!(shot.spin_x, 0.0);
    }

    #[test]
    fn test_english_leans_toward_next_balls() {
        let table = TableGeometry::default();
        let pockets = table.default_pockets();
        // Aim along +x; next ball below the line (larger y)
        let balls = vec![
            Ball::new(0, Vec2::new(200.0, 250.0)),
            Ball::new(2, Vec2::new(500.0, 250.0)),
            Ball::new(4, Vec2::new(600.0, 400.0)),
        ];
        let targets = [2u8, 4];
        let ctx = ctx_fixture(&balls, &pockets, &table, &targets);
        let mut shot = Shot::new(
            0.0,
            0.6,
            2,
            90.0,
            0.5,
            ShotKind::Direct { pocket: pockets[2], ghost_ball: Vec2::new(480.0, 250.0) },
        );
        assign_spin(&mut shot, &ctx);
        assert_eq!(shot.spin_y, MEDIUM_DRAW);
        // +y is to the right of +x in screen coordinates
        assert!(shot.spin_x > 0.0);
    }
}
