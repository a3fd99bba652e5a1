//! Shot outcome classification
//!
//! Pure function of what was on the table before the shot and what dropped.
//! Rules are checked in priority order: eight ball, scratch, open-table
//! group assignment, own-group continuation, otherwise the turn passes.

use crate::consts::{CUE_BALL_ID, EIGHT_BALL_ID};
use crate::table::BallGroup;

use super::session::{PlayerGroups, PlayerNumber, TableState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// Shooter cleared their group and then made the eight
    EightBallPocketed,
    /// Eight ball dropped before the shooter's group was cleared
    EarlyEightBall,
    /// Eight ball dropped together with the cue ball
    ScratchOnEight,
}

impl GameOverReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverReason::EightBallPocketed => "eight_ball_pocketed",
            GameOverReason::EarlyEightBall => "eight_ball_early",
            GameOverReason::ScratchOnEight => "eight_ball_scratch",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    MatchOver { winner: PlayerNumber, reason: GameOverReason },
    /// Cue ball pocketed: opponent gets ball in hand
    Scratch,
    /// Open table and a group ball dropped; the shooter takes that group
    GroupsAssigned { shooter_group: BallGroup },
    /// Own group ball dropped on a closed table
    Continue,
    TurnOver,
}

impl ShotOutcome {
    pub fn continues_turn(&self) -> bool {
        matches!(self, ShotOutcome::GroupsAssigned { .. } | ShotOutcome::Continue)
    }

    pub fn is_foul(&self) -> bool {
        matches!(
            self,
            ShotOutcome::Scratch
                | ShotOutcome::MatchOver { reason: GameOverReason::ScratchOnEight, .. }
        )
    }
}

/// Everything needed to judge one shot
#[derive(Debug, Clone, Copy)]
pub struct ShotFacts<'a> {
    pub shooter: PlayerNumber,
    /// Ids on the table before the shot
    pub on_table_before: &'a [u8],
    /// Ids that dropped during the shot, in report order
    pub pocketed: &'a [u8],
    pub table: TableState,
    pub groups: PlayerGroups,
}

pub fn classify_shot(facts: &ShotFacts<'_>) -> ShotOutcome {
    let scratched = facts.pocketed.contains(&CUE_BALL_ID);
    let shooter_group = facts.groups.get(facts.shooter);

    if facts.pocketed.contains(&EIGHT_BALL_ID) {
        let cleared = facts.table == TableState::Closed
            && shooter_group.is_some_and(|group| {
                !facts
                    .on_table_before
                    .iter()
                    .any(|&id| BallGroup::of_id(id) == Some(group))
            });
        let (winner, reason) = if scratched {
            (facts.shooter.other(), GameOverReason::ScratchOnEight)
        } else if cleared {
            (facts.shooter, GameOverReason::EightBallPocketed)
        } else {
            (facts.shooter.other(), GameOverReason::EarlyEightBall)
        };
        return ShotOutcome::MatchOver { winner, reason };
    }

    if scratched {
        return ShotOutcome::Scratch;
    }

    match facts.table {
        TableState::Open => match facts.pocketed.iter().find_map(|&id| BallGroup::of_id(id)) {
            Some(group) => ShotOutcome::GroupsAssigned { shooter_group: group },
            None => ShotOutcome::TurnOver,
        },
        TableState::Closed => {
            let own = shooter_group.is_some_and(|group| {
                facts
                    .pocketed
                    .iter()
                    .any(|&id| BallGroup::of_id(id) == Some(group))
            });
            if own { ShotOutcome::Continue } else { ShotOutcome::TurnOver }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed_groups() -> PlayerGroups {
        let mut groups = PlayerGroups::default();
        groups.assign(PlayerNumber::Two, BallGroup::Solid);
        groups
    }

    fn classify(table: TableState, groups: PlayerGroups, before: &[u8], pocketed: &[u8]) -> ShotOutcome {
        classify_shot(&ShotFacts {
            shooter: PlayerNumber::Two,
            on_table_before: before,
            pocketed,
            table,
            groups,
        })
    }

    #[test]
    fn test_eight_after_clearing_wins() {
        let outcome = classify(TableState::Closed, closed_groups(), &[0, 8, 9, 12], &[8]);
        assert_eq!(
            outcome,
            ShotOutcome::MatchOver { winner: PlayerNumber::Two, reason: GameOverReason::EightBallPocketed }
        );
        assert!(!outcome.continues_turn());
    }

    #[test]
    fn test_eight_early_loses() {
        let outcome = classify(TableState::Closed, closed_groups(), &[0, 3, 8, 12], &[8]);
        assert_eq!(
            outcome,
            ShotOutcome::MatchOver { winner: PlayerNumber::One, reason: GameOverReason::EarlyEightBall }
        );
        // Last group ball and the eight together is still early
        let outcome = classify(TableState::Closed, closed_groups(), &[0, 3, 8], &[3, 8]);
        assert!(matches!(outcome, ShotOutcome::MatchOver { winner: PlayerNumber::One, .. }));
        // Open table never clears a group
        let outcome = classify(TableState::Open, PlayerGroups::default(), &[0, 8, 9], &[8]);
        assert!(matches!(outcome, ShotOutcome::MatchOver { winner: PlayerNumber::One, .. }));
    }

    #[test]
    fn test_scratch_on_eight_loses() {
        let outcome = classify(TableState::Closed, closed_groups(), &[0, 8, 12], &[0, 8]);
        assert_eq!(
            outcome,
            ShotOutcome::MatchOver { winner: PlayerNumber::One, reason: GameOverReason::ScratchOnEight }
        );
        assert!(outcome.is_foul());
    }

    #[test]
    fn test_scratch_beats_group_pot() {
        let outcome = classify(TableState::Closed, closed_groups(), &[0, 3, 8], &[3, 0]);
        assert_eq!(outcome, ShotOutcome::Scratch);
        assert!(outcome.is_foul());
        assert!(!outcome.continues_turn());
    }

    #[test]
    fn test_open_table_assigns_first_group() {
        let outcome = classify(TableState::Open, PlayerGroups::default(), &[0, 3, 8, 11], &[11, 3]);
        assert_eq!(outcome, ShotOutcome::GroupsAssigned { shooter_group: BallGroup::Stripe });
        assert!(outcome.continues_turn());
        assert_eq!(classify(TableState::Open, PlayerGroups::default(), &[0, 3], &[]), ShotOutcome::TurnOver);
    }

    #[test]
    fn test_closed_table_own_group_continues() {
        assert_eq!(classify(TableState::Closed, closed_groups(), &[0, 2, 8, 9], &[2]), ShotOutcome::Continue);
        assert_eq!(classify(TableState::Closed, closed_groups(), &[0, 2, 8, 9], &[9]), ShotOutcome::TurnOver);
        assert_eq!(classify(TableState::Closed, closed_groups(), &[0, 2, 8, 9], &[]), ShotOutcome::TurnOver);
    }
}
