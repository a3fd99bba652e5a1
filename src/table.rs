//! Table, ball and pocket types
//!
//! These mirror what the physics collaborator owns. The AI only ever sees
//! read-only snapshots of them, one per decision.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Ball group in 8-ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BallGroup {
    #[serde(alias = "solids")]
    Solid,
    #[serde(alias = "stripes")]
    Stripe,
}

impl BallGroup {
    /// Group of a numbered ball (None for cue and eight)
    pub fn of_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(BallGroup::Solid),
            9..=15 => Some(BallGroup::Stripe),
            _ => None,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            BallGroup::Solid => BallGroup::Stripe,
            BallGroup::Stripe => BallGroup::Solid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BallGroup::Solid => "solid",
            BallGroup::Stripe => "stripe",
        }
    }
}

fn default_true() -> bool {
    true
}

/// A ball as reported by the physics collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u8,
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub pocketed: bool,
}

impl Ball {
    pub fn new(id: u8, pos: Vec2) -> Self {
        Self {
            id,
            x: pos.x,
            y: pos.y,
            active: true,
            pocketed: false,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn set_pos(&mut self, pos: Vec2) {
        self.x = pos.x;
        self.y = pos.y;
    }

    /// Still in play (active and not pocketed)
    #[inline]
    pub fn on_table(&self) -> bool {
        self.active && !self.pocketed
    }

    pub fn group(&self) -> Option<BallGroup> {
        BallGroup::of_id(self.id)
    }
}

/// A pocket opening
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pocket {
    pub x: f32,
    pub y: f32,
    /// Side (middle) pocket
    #[serde(default)]
    pub is_center: bool,
}

impl Pocket {
    pub const fn new(x: f32, y: f32, is_center: bool) -> Self {
        Self { x, y, is_center }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// One of the four cushions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cushion {
    Left,
    Right,
    Top,
    Bottom,
}

impl Cushion {
    pub const ALL: [Cushion; 4] = [Cushion::Left, Cushion::Right, Cushion::Top, Cushion::Bottom];

    /// Line a ball center touches when the ball meets this cushion
    pub fn rail(&self, table: &TableGeometry) -> f32 {
        let r = table.ball_radius;
        match self {
            Cushion::Left => table.min.x + r,
            Cushion::Right => table.max.x - r,
            Cushion::Top => table.min.y + r,
            Cushion::Bottom => table.max.y - r,
        }
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        matches!(self, Cushion::Left | Cushion::Right)
    }

    /// Mirror a point across this cushion's rail line
    pub fn mirror(&self, p: Vec2, table: &TableGeometry) -> Vec2 {
        let rail = self.rail(table);
        if self.is_vertical() {
            Vec2::new(2.0 * rail - p.x, p.y)
        } else {
            Vec2::new(p.x, 2.0 * rail - p.y)
        }
    }

    /// Where the segment `from -> to` crosses the rail line, if it does
    pub fn crossing(&self, from: Vec2, to: Vec2, table: &TableGeometry) -> Option<Vec2> {
        let rail = self.rail(table);
        let (a, b) = if self.is_vertical() {
            (from.x, to.x)
        } else {
            (from.y, to.y)
        };
        let span = b - a;
        if span.abs() < 1e-4 {
            return None;
        }
        let t = (rail - a) / span;
        if !(0.0..=1.0).contains(&t) {
            return None;
        }
        let p = from + (to - from) * t;
        // Snap onto the rail to kill float drift
        Some(if self.is_vertical() {
            Vec2::new(rail, p.y)
        } else {
            Vec2::new(p.x, rail)
        })
    }

    /// Whether a point on the rail lies within the cushion's playable run
    pub fn spans(&self, p: Vec2, table: &TableGeometry) -> bool {
        let lo = table.rail_min();
        let hi = table.rail_max();
        if self.is_vertical() {
            p.y >= lo.y && p.y <= hi.y
        } else {
            p.x >= lo.x && p.x <= hi.x
        }
    }
}

/// Fixed table dimensions used by the AI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableGeometry {
    /// Cushion nose corner (top-left)
    pub min: Vec2,
    /// Cushion nose corner (bottom-right)
    pub max: Vec2,
    pub ball_radius: f32,
}

impl Default for TableGeometry {
    fn default() -> Self {
        Self {
            min: Vec2::new(TABLE_MIN_X, TABLE_MIN_Y),
            max: Vec2::new(TABLE_MAX_X, TABLE_MAX_Y),
            ball_radius: BALL_RADIUS,
        }
    }
}

impl TableGeometry {
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Smallest legal ball-center position
    #[inline]
    pub fn rail_min(&self) -> Vec2 {
        self.min + Vec2::splat(self.ball_radius)
    }

    /// Largest legal ball-center position
    #[inline]
    pub fn rail_max(&self) -> Vec2 {
        self.max - Vec2::splat(self.ball_radius)
    }

    /// Clamp a ball center inside the cushions
    pub fn clamp_ball(&self, p: Vec2) -> Vec2 {
        p.clamp(self.rail_min(), self.rail_max())
    }

    pub fn contains_ball(&self, p: Vec2) -> bool {
        let lo = self.rail_min();
        let hi = self.rail_max();
        p.x >= lo.x && p.x <= hi.x && p.y >= lo.y && p.y <= hi.y
    }

    /// Distance from a ball center to the nearest cushion rail
    pub fn distance_to_cushion(&self, p: Vec2) -> f32 {
        let lo = self.rail_min();
        let hi = self.rail_max();
        (p.x - lo.x).min(hi.x - p.x).min(p.y - lo.y).min(hi.y - p.y)
    }

    /// Half the play-field diagonal, used to normalize distances
    pub fn half_diagonal(&self) -> f32 {
        (self.max - self.min).length() * 0.5
    }

    /// Standard six-pocket layout at the cushion corners and side midpoints
    pub fn default_pockets(&self) -> Vec<Pocket> {
        let mid_x = (self.min.x + self.max.x) * 0.5;
        vec![
            Pocket::new(self.min.x, self.min.y, false),
            Pocket::new(mid_x, self.min.y, true),
            Pocket::new(self.max.x, self.min.y, false),
            Pocket::new(self.min.x, self.max.y, false),
            Pocket::new(mid_x, self.max.y, true),
            Pocket::new(self.max.x, self.max.y, false),
        ]
    }
}

/// Look up a ball by id
pub fn find_ball(balls: &[Ball], id: u8) -> Option<&Ball> {
    balls.iter().find(|b| b.id == id)
}

/// Ids of balls still on the table, sorted
pub fn on_table_ids(balls: &[Ball]) -> Vec<u8> {
    let mut ids: Vec<u8> = balls.iter().filter(|b| b.on_table()).map(|b| b.id).collect();
    ids.sort_unstable();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_groups() {
        assert_eq!(BallGroup::of_id(1), Some(BallGroup::Solid));
        assert_eq!(BallGroup::of_id(7), Some(BallGroup::Solid));
        assert_eq!(BallGroup::of_id(8), None);
        assert_eq!(BallGroup::of_id(9), Some(BallGroup::Stripe));
        assert_eq!(BallGroup::of_id(0), None);
        assert_eq!(BallGroup::of_id(16), None);
        assert_eq!(Ball::new(0, Vec2::ZERO).group(), None);
        assert_eq!(Ball::new(12, Vec2::ZERO).group(), Some(BallGroup::Stripe));
        assert_eq!(BallGroup::Solid.opponent(), BallGroup::Stripe);
    }

    #[test]
    fn test_cushion_mirror_is_involution() {
        let table = TableGeometry::default();
        let p = Vec2::new(300.0, 200.0);
        for cushion in Cushion::ALL {
            let m = cushion.mirror(p, &table);
            assert!((cushion.mirror(m, &table) - p).length() < 1e-3);
        }
        // Left rail is at x = 50
        let m = Cushion::Left.mirror(p, &table);
        assert!((m.x - (-200.0)).abs() < 1e-3);
    }

    #[test]
    fn test_cushion_crossing() {
        let table = TableGeometry::default();
        let from = Vec2::new(200.0, 200.0);
        let to = Cushion::Top.mirror(Vec2::new(400.0, 200.0), &table);
        let hit = Cushion::Top.crossing(from, to, &table).expect("crosses top rail");
        assert!((hit.y - 50.0).abs() < 1e-3);
        assert!((hit.x - 300.0).abs() < 1e-2);

        // Segment that never reaches the rail
        assert!(Cushion::Top.crossing(from, Vec2::new(400.0, 300.0), &table).is_none());
    }

    #[test]
    fn test_default_pockets() {
        let table = TableGeometry::default();
        let pockets = table.default_pockets();
        assert_eq!(pockets.len(), 6);
        assert_eq!(pockets.iter().filter(|p| p.is_center).count(), 2);
        assert!(pockets.contains(&Pocket::new(880.0, 40.0, false)));
    }

    #[test]
    fn test_clamp_and_cushion_distance() {
        let table = TableGeometry::default();
        let clamped = table.clamp_ball(Vec2::new(-100.0, 1000.0));
        assert_eq!(clamped, Vec2::new(50.0, 450.0));
        assert!(table.contains_ball(clamped));
        assert!(table.distance_to_cushion(clamped).abs() < 1e-4);
        assert!((table.distance_to_cushion(table.center()) - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_ball_wire_format() {
        let ball: Ball = serde_json::from_str(r#"{"id":5,"x":500.0,"y":250.0,"type":"solid"}"#)
            .expect("valid ball json");
        assert!(ball.on_table());
        assert_eq!(ball.group(), Some(BallGroup::Solid));

        let pocket: Pocket =
            serde_json::from_str(r#"{"x":460.0,"y":40.0,"isCenter":true}"#).expect("pocket");
        assert!(pocket.is_center);
    }
}
