//! Local view of the match
//!
//! The server is the arbiter of record. This is the client's copy, updated
//! from snapshots and from locally resolved AI shots.

use serde::{Deserialize, Serialize};

use super::messages::ServerSnapshot;
use super::outcome::ShotOutcome;
use crate::ai::TargetGroup;
use crate::error::Error;
use crate::table::BallGroup;

/// Seat number as used on the wire (1 or 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PlayerNumber {
    One,
    Two,
}

impl PlayerNumber {
    pub fn other(self) -> Self {
        match self {
            PlayerNumber::One => PlayerNumber::Two,
            PlayerNumber::Two => PlayerNumber::One,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            PlayerNumber::One => 1,
            PlayerNumber::Two => 2,
        }
    }
}

impl TryFrom<u8> for PlayerNumber {
    type Error = Error;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(PlayerNumber::One),
            2 => Ok(PlayerNumber::Two),
            n => Err(Error::InvalidPlayerNumber(n)),
        }
    }
}

impl From<PlayerNumber> for u8 {
    fn from(p: PlayerNumber) -> u8 {
        p.as_u8()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableState {
    /// Groups not yet decided; any numbered ball but the eight may be hit first
    #[default]
    Open,
    Closed,
}

impl TableState {
    pub fn from_open(open: bool) -> Self {
        if open { TableState::Open } else { TableState::Closed }
    }

    pub fn is_open(self) -> bool {
        self == TableState::Open
    }
}

/// Group assignment per seat, keyed "1" and "2" on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerGroups {
    #[serde(rename = "1", default)]
    pub one: Option<BallGroup>,
    #[serde(rename = "2", default)]
    pub two: Option<BallGroup>,
}

impl PlayerGroups {
    pub fn get(&self, player: PlayerNumber) -> Option<BallGroup> {
        match player {
            PlayerNumber::One => self.one,
            PlayerNumber::Two => self.two,
        }
    }

    /// Give `player` a group and the opponent the other one
    pub fn assign(&mut self, player: PlayerNumber, group: BallGroup) {
        let (mine, theirs) = match player {
            PlayerNumber::One => (&mut self.one, &mut self.two),
            PlayerNumber::Two => (&mut self.two, &mut self.one),
        };
        *mine = Some(group);
        *theirs = Some(group.opponent());
    }
}

/// Turn and rules state for one match against the AI
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSession {
    pub room_id: String,
    /// Seat of the local (human) player; the AI sits in the other one
    pub my_number: PlayerNumber,
    pub is_ai_match: bool,
    pub current_player: PlayerNumber,
    pub table: TableState,
    pub groups: PlayerGroups,
    /// Whoever is at the table may place the cue ball
    pub ball_in_hand: bool,
    /// Next shot is the break
    pub break_shot: bool,
    pub game_over: bool,
    pub winner: Option<PlayerNumber>,
}

impl MatchSession {
    pub fn new(room_id: impl Into<String>, my_number: PlayerNumber) -> Self {
        Self {
            room_id: room_id.into(),
            my_number,
            is_ai_match: true,
            current_player: PlayerNumber::One,
            table: TableState::Open,
            groups: PlayerGroups::default(),
            ball_in_hand: false,
            break_shot: true,
            game_over: false,
            winner: None,
        }
    }

    pub fn ai_number(&self) -> PlayerNumber {
        self.my_number.other()
    }

    pub fn is_ai_turn(&self) -> bool {
        self.is_ai_match && !self.game_over && self.current_player != self.my_number
    }

    /// Balls the AI may hit first
    pub fn ai_target(&self) -> TargetGroup {
        match self.table {
            TableState::Open => TargetGroup::Open,
            TableState::Closed => TargetGroup::from(self.groups.get(self.ai_number())),
        }
    }

    /// Overwrite local state with what the server reports
    pub fn apply_snapshot(&mut self, snapshot: &ServerSnapshot) {
        if snapshot.current_player != self.current_player {
            log::info!(
                "server: turn {} -> {}",
                self.current_player.as_u8(),
                snapshot.current_player.as_u8()
            );
        }
        self.current_player = snapshot.current_player;
        self.is_ai_match = snapshot.is_ai_match;
        self.game_over = snapshot.game_over;

        if let Some(state) = &snapshot.game_state {
            if let Some(open) = state.table_open {
                self.table = TableState::from_open(open);
            }
            if let Some(groups) = state.player_types {
                self.groups = groups;
            }
            if let Some(ball_in_hand) = state.ball_in_hand {
                self.ball_in_hand = ball_in_hand;
            }
            if let Some(is_break) = state.is_break_shot {
                self.break_shot = is_break;
            }
        }
    }

    /// Apply a locally resolved shot without waiting for the server
    pub fn apply_outcome(&mut self, shooter: PlayerNumber, outcome: &ShotOutcome) {
        self.break_shot = false;
        match *outcome {
            ShotOutcome::MatchOver { winner, .. } => {
                self.game_over = true;
                self.winner = Some(winner);
                self.ball_in_hand = false;
            }
            ShotOutcome::Scratch => {
                self.current_player = shooter.other();
                self.ball_in_hand = true;
            }
            ShotOutcome::GroupsAssigned { shooter_group } => {
                self.groups.assign(shooter, shooter_group);
                self.table = TableState::Closed;
                self.current_player = shooter;
                self.ball_in_hand = false;
            }
            ShotOutcome::Continue => {
                self.current_player = shooter;
                self.ball_in_hand = false;
            }
            ShotOutcome::TurnOver => {
                self.current_player = shooter.other();
                self.ball_in_hand = false;
            }
        }
    }
}
