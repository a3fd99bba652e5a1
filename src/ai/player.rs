//! AI player façade
//!
//! Owns the difficulty profile and the RNG; everything else arrives per
//! call. One `calculate_shot` call is one decision over a board snapshot.

use std::time::Duration;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::context::ShotContext;
use super::finders::{find_bank_shots, find_combo_shots, find_direct_shots, find_kick_shots};
use super::placement;
use super::profile::{Difficulty, DifficultyProfile};
use super::select::{apply_difficulty_noise, fallback_shot, select_shot};
use super::shot::Shot;
use super::spin::assign_spin;
use crate::consts::*;
use crate::error::{Error, Result};
use crate::settings::Settings;
use crate::table::{Ball, BallGroup, Pocket, TableGeometry, find_ball};

/// Banks are only searched while fewer candidates than this exist
const MIN_CANDIDATES_BEFORE_BANKS: usize = 3;

/// Direct and combo shots, then banks while candidates are scarce, then kicks
fn find_candidates(ctx: &ShotContext<'_>, cue: Vec2) -> Vec<Shot> {
    let mut candidates = find_direct_shots(ctx, cue);
    candidates.extend(find_combo_shots(ctx, cue));
    if ctx.profile.use_bank_shots && candidates.len() < MIN_CANDIDATES_BEFORE_BANKS {
        candidates.extend(find_bank_shots(ctx, cue));
    }
    if ctx.profile.use_kick_shots && candidates.is_empty() {
        candidates.extend(find_kick_shots(ctx, cue));
    }
    candidates
}

/// Which balls the AI may legally hit first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TargetGroup {
    /// Open table: any numbered ball except the eight
    #[default]
    #[serde(alias = "any", alias = "either")]
    Open,
    #[serde(alias = "solids")]
    Solid,
    #[serde(alias = "stripes")]
    Stripe,
}

impl TargetGroup {
    pub fn group(self) -> Option<BallGroup> {
        match self {
            TargetGroup::Open => None,
            TargetGroup::Solid => Some(BallGroup::Solid),
            TargetGroup::Stripe => Some(BallGroup::Stripe),
        }
    }

    fn allows(self, ball: &Ball) -> bool {
        match (self, ball.group()) {
            (_, None) => false,
            (TargetGroup::Open, Some(_)) => true,
            (_, group) => group == self.group(),
        }
    }
}

impl From<Option<BallGroup>> for TargetGroup {
    fn from(group: Option<BallGroup>) -> Self {
        match group {
            None => TargetGroup::Open,
            Some(BallGroup::Solid) => TargetGroup::Solid,
            Some(BallGroup::Stripe) => TargetGroup::Stripe,
        }
    }
}

/// Board snapshot to compute one shot for (CLI and wasm input)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotRequest {
    pub balls: Vec<Ball>,
    /// Pocket layout; the standard six pockets when absent
    #[serde(default)]
    pub pockets: Option<Vec<Pocket>>,
    #[serde(default)]
    pub target: TargetGroup,
}

/// Computer opponent
#[derive(Debug, Clone)]
pub struct AiPlayer {
    difficulty: Difficulty,
    table: TableGeometry,
    thinking_time_scale: f32,
    rng: Pcg32,
}

impl AiPlayer {
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            table: TableGeometry::default(),
            thinking_time_scale: 1.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Build from settings; an unset seed draws one from entropy
    pub fn from_settings(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("AI player: {} (seed {})", settings.difficulty, seed);
        let mut player = Self::new(settings.difficulty, seed);
        player.thinking_time_scale = settings.thinking_time_scale.max(0.0);
        player
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn profile(&self) -> &'static DifficultyProfile {
        self.difficulty.profile()
    }

    pub fn table(&self) -> &TableGeometry {
        &self.table
    }

    /// Ball ids the AI may hit first
    ///
    /// When the group (or, on an open table, every numbered ball) is
    /// cleared, the eight ball is the only target.
    pub fn target_ids(balls: &[Ball], target: TargetGroup) -> Vec<u8> {
        let mut ids: Vec<u8> = balls
            .iter()
            .filter(|b| b.on_table() && target.allows(b))
            .map(|b| b.id)
            .collect();
        if ids.is_empty() && find_ball(balls, EIGHT_BALL_ID).is_some_and(Ball::on_table) {
            ids.push(EIGHT_BALL_ID);
        }
        ids.sort_unstable();
        ids
    }

    /// Compute the next shot
    ///
    /// Always returns a shot: when nothing can be potted the fallback chain
    /// produces a safety, a plain hit or, as a last resort, a random stroke.
    pub fn calculate_shot(
        &mut self,
        balls: &[Ball],
        cue_ball: &Ball,
        pockets: Option<&[Pocket]>,
        target: TargetGroup,
    ) -> Shot {
        let default_pockets;
        let pockets = match pockets {
            Some(p) if !p.is_empty() => p,
            _ => {
                log::warn!("no pocket layout provided, using the standard six pockets");
                default_pockets = self.table.default_pockets();
                default_pockets.as_slice()
            }
        };

        let profile = self.profile();
        let targets = Self::target_ids(balls, target);
        let ctx = ShotContext {
            balls,
            pockets,
            table: &self.table,
            profile,
            targets: &targets,
            opponent_group: target.group().map(BallGroup::opponent),
        };
        let cue = cue_ball.pos();

        let candidates = find_candidates(&ctx, cue);
        log::debug!(
            "{}: {} candidates over targets {:?}",
            self.difficulty,
            candidates.len(),
            targets
        );

        let mut shot = match select_shot(&ctx, cue, candidates, &mut self.rng) {
            Some(mut shot) => {
                if profile.use_spin {
                    assign_spin(&mut shot, &ctx);
                }
                shot
            }
            None => fallback_shot(&ctx, cue, &mut self.rng),
        };
        apply_difficulty_noise(&mut shot, profile, &mut self.rng);

        log::debug!(
            "selected {} on {} (score {:.1}): angle {:.3} power {:.2} spin ({:.2}, {:.2})",
            shot.label(),
            shot.target_ball,
            shot.score,
            shot.angle,
            shot.power,
            shot.spin_x,
            shot.spin_y
        );
        shot
    }

    /// Compute a shot for a serialized board snapshot
    pub fn calculate_request(&mut self, request: &ShotRequest) -> Result<Shot> {
        let cue = find_ball(&request.balls, CUE_BALL_ID)
            .filter(|b| b.on_table())
            .ok_or(Error::MissingCueBall)?
            .clone();
        Ok(self.calculate_shot(&request.balls, &cue, request.pockets.as_deref(), request.target))
    }

    /// Where to place the cue ball when the AI has ball in hand
    pub fn ball_in_hand_position(&self, balls: &[Ball], pockets: &[Pocket], target: TargetGroup) -> Vec2 {
        let targets = Self::target_ids(balls, target);
        let ctx = ShotContext {
            balls,
            pockets,
            table: &self.table,
            profile: self.profile(),
            targets: &targets,
            opponent_group: target.group().map(BallGroup::opponent),
        };
        placement::ball_in_hand_position(&ctx)
    }

    /// Randomized delay before the shot is played, scaled by settings
    pub fn thinking_time(&mut self) -> Duration {
        let (lo, hi) = self.profile().thinking_time_ms;
        let ms = self.rng.random_range(lo.min(hi)..=hi.max(lo));
        Duration::from_millis((ms as f32 * self.thinking_time_scale).round() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn layout(positions: &[(u8, f32, f32)]) -> Vec<Ball> {
        positions
            .iter()
            .map(|&(id, x, y)| Ball::new(id, Vec2::new(x, y)))
            .collect()
    }

    #[test]
    fn test_target_ids_by_group() {
        let balls = layout(&[(0, 100.0, 250.0), (2, 300.0, 200.0), (8, 460.0, 250.0), (12, 600.0, 300.0)]);
        assert_eq!(AiPlayer::target_ids(&balls, TargetGroup::Open), vec![2, 12]);
        assert_eq!(AiPlayer::target_ids(&balls, TargetGroup::Solid), vec![2]);
        assert_eq!(AiPlayer::target_ids(&balls, TargetGroup::Stripe), vec![12]);
    }

    #[test]
    fn test_eight_ball_only_when_group_cleared() {
        let mut balls = layout(&[(0, 100.0, 250.0), (3, 300.0, 200.0), (8, 460.0, 250.0), (12, 600.0, 300.0)]);
        balls[1].pocketed = true;
        assert_eq!(AiPlayer::target_ids(&balls, TargetGroup::Solid), vec![8]);
        // The stripes still have a ball, so they never see the eight
        assert_eq!(AiPlayer::target_ids(&balls, TargetGroup::Stripe), vec![12]);

        let mut player = AiPlayer::new(Difficulty::Expert, 9);
        let cue = balls[0].clone();
        let shot = player.calculate_shot(&balls, &cue, None, TargetGroup::Solid);
        assert_eq!(shot.target_ball, 8);
    }

    #[test]
    fn test_straight_pot_is_found() {
        let balls = layout(&[(0, 100.0, 250.0), (5, 500.0, 250.0)]);
        let pockets = [Pocket::new(880.0, 40.0, false)];
        let mut player = AiPlayer::new(Difficulty::Hard, 42);
        let shot = player.calculate_shot(&balls, &balls[0], Some(&pockets[..]), TargetGroup::Open);
        assert_eq!(shot.target_ball, 5);
        assert!(matches!(shot.label(), "direct" | "bank"));
        assert!(shot.power >= MIN_NOISY_POWER && shot.power <= MAX_NOISY_POWER);
    }

    #[test]
    fn test_same_seed_same_shot() {
        let balls = layout(&[
            (0, 150.0, 300.0),
            (1, 400.0, 200.0),
            (4, 650.0, 350.0),
            (9, 500.0, 300.0),
            (8, 700.0, 150.0),
        ]);
        for difficulty in Difficulty::ALL {
            let mut a = AiPlayer::new(difficulty, 1234);
            let mut b = AiPlayer::new(difficulty, 1234);
            let sa = a.calculate_shot(&balls, &balls[0], None, TargetGroup::Solid);
            let sb = b.calculate_shot(&balls, &balls[0], None, TargetGroup::Solid);
            assert_eq!(sa, sb);
        }
    }

    #[test]
    fn test_request_requires_cue_ball() {
        let mut player = AiPlayer::new(Difficulty::Easy, 1);
        let request = ShotRequest {
            balls: layout(&[(3, 300.0, 200.0)]),
            pockets: None,
            target: TargetGroup::Open,
        };
        assert!(matches!(player.calculate_request(&request), Err(Error::MissingCueBall)));
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let json = r#"{"balls":[{"id":0,"x":100,"y":250},{"id":5,"x":500,"y":250}],"target":"solids"}"#;
        let request: ShotRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.target, TargetGroup::Solid);
        assert!(request.pockets.is_none());
        assert!(request.balls[1].on_table());
        let mut player = AiPlayer::new(Difficulty::Medium, 3);
        assert_eq!(player.calculate_request(&request).unwrap().target_ball, 5);
    }

    #[test]
    fn test_thinking_time_in_profile_range() {
        let mut player = AiPlayer::new(Difficulty::Easy, 77);
        let (lo, hi) = Difficulty::Easy.profile().thinking_time_ms;
        for _ in 0..50 {
            let t = player.thinking_time().as_millis() as u64;
            assert!(t >= lo && t <= hi);
        }
        player.thinking_time_scale = 0.0;
        assert_eq!(player.thinking_time(), Duration::ZERO);
    }

    #[test]
    fn test_ball_in_hand_clear_of_balls() {
        let balls = layout(&[(0, 0.0, 0.0), (6, 820.0, 100.0), (14, 300.0, 300.0)]);
        let player = AiPlayer::new(Difficulty::Hard, 5);
        let table = TableGeometry::default();
        let spot = player.ball_in_hand_position(&balls, &table.default_pockets(), TargetGroup::Solid);
        assert!(table.contains_ball(spot));
        assert!((spot - Vec2::new(820.0, 100.0)).length() >= 2.0 * BALL_RADIUS);
    }

    fn context<'a>(
        balls: &'a [Ball],
        pockets: &'a [Pocket],
        table: &'a TableGeometry,
        targets: &'a [u8],
        difficulty: Difficulty,
    ) -> ShotContext<'a> {
        ShotContext {
            balls,
            pockets,
            table,
            profile: difficulty.profile(),
            targets,
            opponent_group: Some(BallGroup::Stripe),
        }
    }

    /// Solid 3 sits behind a wall of stripes; only a cushion route reaches it
    fn snookered() -> Vec<Ball> {
        layout(&[
            (0, 200.0, 250.0),
            (3, 600.0, 250.0),
            (9, 400.0, 230.0),
            (10, 400.0, 250.0),
            (11, 400.0, 270.0),
        ])
    }

    #[test]
    fn test_kicks_only_when_nothing_else() {
        let balls = snookered();
        let table = TableGeometry::default();
        let pockets = table.default_pockets();
        let targets = AiPlayer::target_ids(&balls, TargetGroup::Solid);
        let cue = balls[0].pos();

        let hard = context(&balls, &pockets, &table, &targets, Difficulty::Hard);
        let candidates = find_candidates(&hard, cue);
        assert!(!candidates.is_empty());
        assert!(candidates.iter().all(|s| s.label() == "kick"));
        let medium = context(&balls, &pockets, &table, &targets, Difficulty::Medium);
        assert!(find_candidates(&medium, cue).is_empty());

        let mut player = AiPlayer::new(Difficulty::Hard, 8);
        let shot = player.calculate_shot(&balls, &balls[0], None, TargetGroup::Solid);
        assert_eq!(shot.label(), "kick");
        assert_eq!(shot.target_ball, 3);

        let mut player = AiPlayer::new(Difficulty::Medium, 8);
        for _ in 0..10 {
            let shot = player.calculate_shot(&balls, &balls[0], None, TargetGroup::Solid);
            assert!(matches!(shot.label(), "safety" | "emergency"), "{}", shot.label());
        }
    }

    #[test]
    fn test_banks_skipped_with_enough_pots() {
        let balls = layout(&[
            (0, 380.0, 200.0),
            (1, 300.0, 350.0),
            (2, 600.0, 150.0),
            (3, 700.0, 300.0),
        ]);
        let table = TableGeometry::default();
        let pockets = table.default_pockets();
        let targets = AiPlayer::target_ids(&balls, TargetGroup::Solid);
        let ctx = context(&balls, &pockets, &table, &targets, Difficulty::Hard);
        let cue = balls[0].pos();

        // A bank on 1 exists, but enough direct pots mean it is never searched
        assert!(!find_bank_shots(&ctx, cue).is_empty());
        let direct = find_direct_shots(&ctx, cue);
        assert!(direct.len() >= MIN_CANDIDATES_BEFORE_BANKS);
        let candidates = find_candidates(&ctx, cue);
        assert!(candidates.iter().all(|s| !matches!(s.label(), "bank" | "kick")));

        let mut player = AiPlayer::new(Difficulty::Hard, 2);
        let shot = player.calculate_shot(&balls, &balls[0], None, TargetGroup::Solid);
        assert!(matches!(shot.label(), "direct" | "combo"), "{}", shot.label());
    }

    proptest! {
        #[test]
        fn prop_calculate_shot_is_total(
            seed in any::<u64>(),
            level in 0usize..5,
            group in 0usize..3,
            positions in prop::collection::vec((50.0f32..870.0, 50.0f32..450.0), 1..10),
        ) {
            let balls: Vec<Ball> = positions
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| Ball::new(i as u8, Vec2::new(x, y)))
                .collect();
            let target = [TargetGroup::Open, TargetGroup::Solid, TargetGroup::Stripe][group];
            let mut player = AiPlayer::new(Difficulty::ALL[level], seed);
            let shot = player.calculate_shot(&balls, &balls[0], None, target);
            prop_assert!(shot.angle.is_finite());
            prop_assert!(shot.power >= MIN_NOISY_POWER && shot.power <= MAX_NOISY_POWER);
            prop_assert!(shot.spin_x.abs() <= 1.0 && shot.spin_y.abs() <= 1.0);
        }
    }
}
