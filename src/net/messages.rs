//! Wire messages exchanged with the game server
//!
//! Only the message-level contract lives here; the transport belongs to
//! whoever implements `ServerLink`.

use serde::{Deserialize, Serialize};

use super::outcome::ShotOutcome;
use super::session::{MatchSession, PlayerGroups, PlayerNumber};
use crate::error::Result;

/// Seat occupant as reported by the server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerInfo {
    pub id: Option<String>,
    pub username: Option<String>,
    pub is_ai: bool,
}

/// Rules state carried inside a snapshot; absent fields leave local state alone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SnapshotGameState {
    pub table_open: Option<bool>,
    pub player_types: Option<PlayerGroups>,
    pub ball_in_hand: Option<bool>,
    pub is_break_shot: Option<bool>,
}

/// Inbound match state push
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSnapshot {
    pub current_player: PlayerNumber,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub game_state: Option<SnapshotGameState>,
    #[serde(default)]
    pub host: Option<PlayerInfo>,
    #[serde(default)]
    pub guest: Option<PlayerInfo>,
    #[serde(default)]
    pub is_ai_match: bool,
}

/// Outbound report of a resolved shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotResult {
    pub room_id: String,
    pub foul: bool,
    pub continue_turn: bool,
    pub pocketed_balls: Vec<u8>,
    pub table_open: bool,
    pub player_types: PlayerGroups,
    pub is_break_shot: bool,
    pub is_ai_shot: bool,
    pub ball_in_hand: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<PlayerNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ShotResult {
    /// Report for an AI shot, built after the outcome was applied to `session`
    pub fn for_ai_shot(session: &MatchSession, pocketed: Vec<u8>, outcome: &ShotOutcome, is_break: bool) -> Self {
        let (winner, reason) = match outcome {
            ShotOutcome::MatchOver { winner, reason } => (Some(*winner), Some(reason.as_str().to_string())),
            _ => (None, None),
        };
        Self {
            room_id: session.room_id.clone(),
            foul: outcome.is_foul(),
            continue_turn: outcome.continues_turn(),
            pocketed_balls: pocketed,
            table_open: session.table.is_open(),
            player_types: session.groups,
            is_break_shot: is_break,
            is_ai_shot: true,
            ball_in_hand: session.ball_in_hand,
            winner,
            reason,
        }
    }
}

pub fn decode_snapshot(json: &str) -> Result<ServerSnapshot> {
    Ok(serde_json::from_str(json)?)
}

pub fn encode_shot_result(result: &ShotResult) -> Result<String> {
    Ok(serde_json::to_string(result)?)
}
