//! AI turn state machine
//!
//! Driven by server snapshots (`on_snapshot`) and by the frame loop
//! (`tick`). Nothing here blocks: the thinking delay counts down with `dt`
//! and the physics settle check is a backoff poll. At most one AI decision
//! is in flight at a time; `ai_shot_pending` is the guard.

use glam::Vec2;

use super::messages::{ServerSnapshot, ShotResult};
use super::outcome::{ShotFacts, ShotOutcome, classify_shot};
use super::poll::{PollStatus, SettlePoll, SettlePollConfig};
use super::session::MatchSession;
use crate::ai::AiPlayer;
use crate::consts::CUE_BALL_ID;
use crate::settings::Settings;
use crate::table::{Ball, Pocket, find_ball, on_table_ids};

/// Physics collaborator owning the real ball state
pub trait PhysicsWorld {
    fn balls(&self) -> &[Ball];
    /// Pocket layout; empty when unknown
    fn pockets(&self) -> &[Pocket];
    fn all_balls_stopped(&self) -> bool;
    fn apply_shot(&mut self, ball_id: u8, angle: f32, power: f32, spin_x: f32, spin_y: f32);
    fn place_cue_ball(&mut self, pos: Vec2);
}

/// Outbound half of the server connection; fire and forget
pub trait ServerLink {
    fn send_shot_result(&mut self, result: &ShotResult);
}

#[derive(Debug, Clone, PartialEq)]
pub enum TurnPhase {
    Idle,
    /// Simulated thinking; `remaining` seconds left
    AwaitingAiDecision { remaining: f32 },
    AiExecutingShot,
    AwaitingPhysicsSettle { poll: SettlePoll, on_table_before: Vec<u8> },
    ResolvingOutcome { on_table_before: Vec<u8> },
    MatchOver,
}

impl TurnPhase {
    pub fn name(&self) -> &'static str {
        match self {
            TurnPhase::Idle => "idle",
            TurnPhase::AwaitingAiDecision { .. } => "awaiting-ai-decision",
            TurnPhase::AiExecutingShot => "ai-executing-shot",
            TurnPhase::AwaitingPhysicsSettle { .. } => "awaiting-physics-settle",
            TurnPhase::ResolvingOutcome { .. } => "resolving-outcome",
            TurnPhase::MatchOver => "match-over",
        }
    }
}

pub struct TurnReconciler {
    session: MatchSession,
    ai: AiPlayer,
    phase: TurnPhase,
    ai_shot_pending: bool,
    /// Balls are rolling from an AI shot
    shooting: bool,
    poll_config: SettlePollConfig,
}

impl TurnReconciler {
    pub fn new(session: MatchSession, ai: AiPlayer, poll_config: SettlePollConfig) -> Self {
        Self {
            session,
            ai,
            phase: TurnPhase::Idle,
            ai_shot_pending: false,
            shooting: false,
            poll_config,
        }
    }

    pub fn from_settings(session: MatchSession, settings: &Settings) -> Self {
        Self::new(session, AiPlayer::from_settings(settings), settings.settle_poll)
    }

    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    pub fn session(&self) -> &MatchSession {
        &self.session
    }

    pub fn ai(&self) -> &AiPlayer {
        &self.ai
    }

    pub fn is_ai_shot_pending(&self) -> bool {
        self.ai_shot_pending
    }

    /// Local state is "shooting": the physics loop should keep advancing
    pub fn is_shooting(&self) -> bool {
        self.shooting
    }

    /// Apply a server push and start an AI decision if it is the AI's turn
    ///
    /// Returns true if a new decision was scheduled.
    pub fn on_snapshot(&mut self, snapshot: &ServerSnapshot) -> bool {
        self.session.apply_snapshot(snapshot);

        if self.session.game_over {
            if self.phase != TurnPhase::MatchOver {
                log::info!("server reports match over");
            }
            self.phase = TurnPhase::MatchOver;
            self.ai_shot_pending = false;
            self.shooting = false;
            return false;
        }
        if self.phase == TurnPhase::MatchOver {
            // Resync after a local match end: the server says play goes on
            self.phase = TurnPhase::Idle;
            self.session.winner = None;
        }
        self.maybe_trigger()
    }

    fn maybe_trigger(&mut self) -> bool {
        if !self.session.is_ai_turn() {
            return false;
        }
        if self.ai_shot_pending {
            log::debug!("AI shot already pending ({}), ignoring trigger", self.phase.name());
            return false;
        }
        self.phase = self.start_decision();
        true
    }

    fn start_decision(&mut self) -> TurnPhase {
        self.ai_shot_pending = true;
        let remaining = self.ai.thinking_time().as_secs_f32();
        log::info!("AI to play, thinking for {:.2}s", remaining);
        TurnPhase::AwaitingAiDecision { remaining }
    }

    /// Advance by `dt` seconds; at most one transition per call
    pub fn tick(&mut self, dt: f32, physics: &mut impl PhysicsWorld, server: &mut impl ServerLink) {
        let phase = std::mem::replace(&mut self.phase, TurnPhase::Idle);
        let next = match phase {
            TurnPhase::Idle => TurnPhase::Idle,
            TurnPhase::MatchOver => TurnPhase::MatchOver,
            TurnPhase::AwaitingAiDecision { remaining } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    TurnPhase::AwaitingAiDecision { remaining }
                } else {
                    TurnPhase::AiExecutingShot
                }
            }
            TurnPhase::AiExecutingShot => self.execute_shot(physics),
            TurnPhase::AwaitingPhysicsSettle { mut poll, on_table_before } => {
                match poll.poll(dt, || physics.all_balls_stopped()) {
                    PollStatus::Pending => TurnPhase::AwaitingPhysicsSettle { poll, on_table_before },
                    PollStatus::Ready => TurnPhase::ResolvingOutcome { on_table_before },
                    PollStatus::TimedOut => {
                        log::warn!(
                            "balls still moving after {:.1}s ({} checks), resolving anyway",
                            poll.elapsed(),
                            poll.checks()
                        );
                        TurnPhase::ResolvingOutcome { on_table_before }
                    }
                }
            }
            TurnPhase::ResolvingOutcome { on_table_before } => self.resolve_outcome(&on_table_before, &*physics, server),
        };
        log::trace!("turn phase: {}", next.name());
        self.phase = next;
    }

    fn execute_shot(&mut self, physics: &mut impl PhysicsWorld) -> TurnPhase {
        let target = self.session.ai_target();
        let pockets = match physics.pockets() {
            [] => self.ai.table().default_pockets(),
            p => p.to_vec(),
        };

        if self.session.ball_in_hand {
            let spot = self.ai.ball_in_hand_position(physics.balls(), &pockets, target);
            log::info!("AI has ball in hand, placing cue ball at ({:.0}, {:.0})", spot.x, spot.y);
            physics.place_cue_ball(spot);
        }

        let Some(cue) = find_ball(physics.balls(), CUE_BALL_ID).filter(|b| b.on_table()).cloned() else {
            log::warn!("cue ball missing or inactive, dropping this AI trigger");
            self.ai_shot_pending = false;
            return TurnPhase::Idle;
        };
        self.session.ball_in_hand = false;

        // Re-read the board: decisions use the live layout, not the one at trigger time
        let balls = physics.balls().to_vec();
        let shot = self.ai.calculate_shot(&balls, &cue, Some(pockets.as_slice()), target);
        log::info!("AI plays {} on {} (power {:.2})", shot.label(), shot.target_ball, shot.power);

        physics.apply_shot(CUE_BALL_ID, shot.angle, shot.power, shot.spin_x, shot.spin_y);
        self.shooting = true;
        TurnPhase::AwaitingPhysicsSettle {
            poll: SettlePoll::new(self.poll_config),
            on_table_before: on_table_ids(&balls),
        }
    }

    fn resolve_outcome(
        &mut self,
        on_table_before: &[u8],
        physics: &impl PhysicsWorld,
        server: &mut impl ServerLink,
    ) -> TurnPhase {
        self.shooting = false;
        let after = on_table_ids(physics.balls());
        let pocketed: Vec<u8> = on_table_before
            .iter()
            .filter(|id| !after.contains(id))
            .copied()
            .collect();

        let shooter = self.session.ai_number();
        let outcome = classify_shot(&ShotFacts {
            shooter,
            on_table_before,
            pocketed: &pocketed,
            table: self.session.table,
            groups: self.session.groups,
        });
        let is_break = self.session.break_shot;
        self.session.apply_outcome(shooter, &outcome);
        log::info!("AI shot resolved: {:?}, pocketed {:?}", outcome, pocketed);

        server.send_shot_result(&ShotResult::for_ai_shot(&self.session, pocketed, &outcome, is_break));
        self.ai_shot_pending = false;

        match outcome {
            ShotOutcome::MatchOver { winner, reason } => {
                log::info!("match over: player {} wins ({})", winner.as_u8(), reason.as_str());
                TurnPhase::MatchOver
            }
            _ if outcome.continues_turn() => self.start_decision(),
            _ => TurnPhase::Idle,
        }
    }
}
