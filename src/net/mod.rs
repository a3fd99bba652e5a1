//! Server reconciliation
//!
//! The AI runs on the client; the server only arbitrates. This module keeps
//! the local turn state in step with server snapshots and reports AI shots.

pub mod messages;
pub mod outcome;
pub mod poll;
pub mod reconcile;
pub mod session;

pub use messages::{ServerSnapshot, ShotResult, decode_snapshot, encode_shot_result};
pub use outcome::{GameOverReason, ShotOutcome, classify_shot};
pub use poll::{SettlePoll, SettlePollConfig};
pub use reconcile::{PhysicsWorld, ServerLink, TurnPhase, TurnReconciler};
pub use session::{MatchSession, PlayerGroups, PlayerNumber, TableState};
