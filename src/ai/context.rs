//! Decision context
//!
//! Everything one decision needs, passed explicitly to the pure shot
//! functions instead of being read from shared state.

use crate::ai::profile::DifficultyProfile;
use crate::consts::EIGHT_BALL_ID;
use crate::table::{Ball, BallGroup, Pocket, TableGeometry, find_ball};

#[derive(Debug, Clone, Copy)]
pub struct ShotContext<'a> {
    pub balls: &'a [Ball],
    pub pockets: &'a [Pocket],
    pub table: &'a TableGeometry,
    pub profile: &'a DifficultyProfile,
    /// Ball ids the AI may legally hit first this turn
    pub targets: &'a [u8],
    /// Group the opponent is shooting at, if assigned
    pub opponent_group: Option<BallGroup>,
}

impl<'a> ShotContext<'a> {
    #[inline]
    pub fn radius(&self) -> f32 {
        self.table.ball_radius
    }

    pub fn ball(&self, id: u8) -> Option<&'a Ball> {
        find_ball(self.balls, id)
    }

    /// Legal target balls still on the table
    pub fn target_balls(&self) -> impl Iterator<Item = &'a Ball> {
        let targets = self.targets;
        self.balls
            .iter()
            .filter(move |b| b.on_table() && targets.contains(&b.id))
    }

    /// Balls worth shooting at next if `pocketed` drops
    ///
    /// Once the last group ball goes down the eight ball becomes the follow-up.
    pub fn follow_up_targets(&self, pocketed: Option<u8>) -> Vec<&'a Ball> {
        let rest: Vec<&Ball> = self
            .target_balls()
            .filter(|b| Some(b.id) != pocketed)
            .collect();
        if !rest.is_empty() || pocketed == Some(EIGHT_BALL_ID) {
            return rest;
        }
        self.ball(EIGHT_BALL_ID)
            .filter(|b| b.on_table())
            .into_iter()
            .collect()
    }

    /// Opponent-group balls still on the table
    pub fn opponent_balls(&self) -> impl Iterator<Item = &'a Ball> {
        let group = self.opponent_group;
        self.balls
            .iter()
            .filter(move |b| b.on_table() && group.is_some() && b.group() == group)
    }
}
