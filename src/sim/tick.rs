//! Per-step simulation update
//!
//! One call advances the session by one tick. The order of the steps is
//! part of the game's behavior: the fall-death check runs before collision
//! resolution, so a platform below the viewport never saves the player.

use super::collision::{find_landing, overlapping};
use super::session::Session;
use super::state::{Facing, GameEvent};

impl Session {
    /// Advance the session by one step (no-op unless playing)
    pub fn tick(&mut self) {
        if !self.state.is_playing() {
            return;
        }

        self.move_horizontally();
        self.integrate_vertical();
        self.clamp_horizontal();

        if self.state.position.y > self.fall_line() {
            self.lose_life();
            return;
        }

        self.resolve_landing();
        self.collect_items();

        if self.state.position.x > self.config.exit_x() {
            self.advance_level();
        }
    }

    /// Both directions held apply both deltas and cancel out
    fn move_horizontally(&mut self) {
        let speed = self.config.move_speed;
        if self.state.move_left_held {
            self.state.position.x -= speed;
            self.state.facing = Facing::Left;
        }
        if self.state.move_right_held {
            self.state.position.x += speed;
            self.state.facing = Facing::Right;
        }
    }

    /// Semi-implicit Euler with constant gravity, no terminal velocity
    fn integrate_vertical(&mut self) {
        self.state.velocity.y += self.config.gravity;
        self.state.position.y += self.state.velocity.y;
    }

    fn clamp_horizontal(&mut self) {
        self.state.position.x = self.state.position.x.clamp(0.0, self.config.max_x());
    }

    fn resolve_landing(&mut self) {
        let player = self.player_rect();
        let landing = find_landing(
            &player,
            self.state.velocity.y,
            &self.level.geometry.platforms,
            self.config.land_tolerance,
        );

        self.state.grounded = false;
        if let Some(landing) = landing {
            self.state.position.y = landing.surface_y;
            self.state.velocity.y = 0.0;
            self.state.grounded = true;
            self.state.jumping = false;
        }
    }

    fn collect_items(&mut self) {
        let player = self.player_rect();
        let hits: Vec<usize> = overlapping(&player, &self.level.geometry.collectibles)
            .filter(|&i| !self.level.collected[i])
            .collect();

        let value = self.config.collectible_value;
        for i in hits {
            self.level.collected[i] = true;
            self.state.score += value;
            self.events.push(GameEvent::Collected { value });
            log::debug!("Coin collected, score {}", self.state.score);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::consts::*;
    use crate::levels::{Level, LevelSet};
    use crate::sim::state::{Intent, ScreenState};
    use crate::sim::{Rect, SessionConfig};

    const FLOOR: f32 = 560.0;

    /// Level with an unbroken floor and optional coins
    fn flat_level(coins: Vec<Rect>) -> Level {
        Level {
            name: "Flat".into(),
            spawn: Vec2::new(SPAWN_X, FLOOR - 40.0),
            platforms: vec![Rect::new(0.0, FLOOR, LEVEL_WIDTH, 80.0)],
            collectibles: coins,
            blocks: Vec::new(),
        }
    }

    fn session_with(level: Level) -> Session {
        let levels = LevelSet::new(vec![level; usize::from(MAX_LEVEL)]).unwrap();
        let mut session = Session::new(levels, SessionConfig::default());
        session.start();
        session
    }

    fn settle(session: &mut Session) {
        for _ in 0..30 {
            session.tick();
        }
        assert!(session.state().grounded);
    }

    #[test]
    fn test_tick_idle_before_start() {
        let mut session = Session::default();
        let before = session.state().clone();
        session.tick();
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_spawn_drop_lands_on_floor() {
        let mut session = session_with(flat_level(Vec::new()));
        settle(&mut session);
        assert_eq!(session.state().position.y, FLOOR);
        assert_eq!(session.state().velocity.y, 0.0);
        assert!(!session.state().jumping);
    }

    #[test]
    fn test_landing_snaps_to_platform_top() {
        let mut session = session_with(flat_level(Vec::new()));
        {
            let state = session.state_mut();
            state.position = Vec2::new(300.0, FLOOR - 2.0);
            state.velocity.y = 5.0;
        }
        session.tick();
        let state = session.state();
        assert_eq!(state.velocity.y, 0.0);
        assert!(state.grounded);
        assert_eq!(state.position.y, FLOOR);
    }

    #[test]
    fn test_fast_fall_tunnels_through_floor() {
        // No terminal velocity: a step longer than the landing band skips it
        let mut session = session_with(flat_level(Vec::new()));
        {
            let state = session.state_mut();
            state.position = Vec2::new(300.0, FLOOR - 5.0);
            state.velocity.y = 20.0;
        }
        session.tick();
        assert!(!session.state().grounded);
        assert!(session.state().position.y > FLOOR + LAND_TOLERANCE);
    }

    #[test]
    fn test_fall_death_checked_before_landing() {
        let mut level = flat_level(Vec::new());
        // A sliver ending on the death line whose landing band straddles it
        level.platforms.push(Rect::new(0.0, VIEWPORT_HEIGHT - 5.0, LEVEL_WIDTH, 5.0));
        let mut session = session_with(level);
        session.drain_events();
        {
            let state = session.state_mut();
            state.position = Vec2::new(300.0, VIEWPORT_HEIGHT - 2.0);
            state.velocity.y = 4.0;
        }
        session.tick();
        assert_eq!(session.state().lives, STARTING_LIVES - 1);
        assert_eq!(session.state().position, Vec2::new(SPAWN_X, FLOOR - 40.0));
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::LifeLost {
                lives: STARTING_LIVES - 1
            }]
        );
    }

    #[test]
    fn test_falling_off_three_times_is_game_over() {
        let mut level = flat_level(Vec::new());
        level.platforms = vec![Rect::new(0.0, FLOOR, 50.0, 80.0)];
        let mut session = session_with(level);
        session.apply_intent(Intent::MoveRight(true));
        for _ in 0..2000 {
            session.tick();
        }
        let snapshot = session.snapshot();
        assert_eq!(snapshot.lives, 0);
        assert!(!snapshot.playing);
        assert_eq!(snapshot.screen, ScreenState::GameOver);
    }

    #[test]
    fn test_left_and_right_cancel() {
        let mut session = session_with(flat_level(Vec::new()));
        settle(&mut session);
        let x = session.state().position.x;
        session.apply_intent(Intent::MoveLeft(true));
        session.apply_intent(Intent::MoveRight(true));
        session.tick();
        assert_eq!(session.state().position.x, x);
        assert_eq!(session.state().facing, Facing::Right);
    }

    #[test]
    fn test_facing_follows_movement() {
        let mut session = session_with(flat_level(Vec::new()));
        session.apply_intent(Intent::MoveLeft(true));
        session.tick();
        assert_eq!(session.state().facing, Facing::Left);
        assert_eq!(session.state().position.x, SPAWN_X - MOVE_SPEED);
    }

    #[test]
    fn test_clamp_at_left_wall() {
        let mut session = session_with(flat_level(Vec::new()));
        session.apply_intent(Intent::MoveLeft(true));
        for _ in 0..100 {
            session.tick();
        }
        assert_eq!(session.state().position.x, 0.0);
    }

    #[test]
    fn test_jump_arc_returns_to_floor() {
        let mut session = session_with(flat_level(Vec::new()));
        settle(&mut session);
        session.apply_intent(Intent::Jump);
        assert!(session.state().jumping);

        session.tick();
        assert!(session.state().position.y < FLOOR);
        // Second jump mid-air does nothing
        let vy = session.state().velocity.y;
        session.apply_intent(Intent::Jump);
        assert_eq!(session.state().velocity.y, vy);

        for _ in 0..60 {
            session.tick();
        }
        assert!(session.state().grounded);
        assert!(!session.state().jumping);
        assert_eq!(session.state().position.y, FLOOR);
    }

    #[test]
    fn test_coin_collected_once() {
        let coin = Rect::new(200.0, FLOOR - 45.0, COIN_SIZE, COIN_SIZE);
        let mut session = session_with(flat_level(vec![coin]));
        settle(&mut session);
        session.apply_intent(Intent::MoveRight(true));
        for _ in 0..40 {
            session.tick();
        }
        session.apply_intent(Intent::MoveRight(false));
        session.apply_intent(Intent::MoveLeft(true));
        for _ in 0..40 {
            session.tick();
        }
        assert_eq!(session.state().score, COLLECTIBLE_VALUE);
        let collected: Vec<_> = session
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Collected { .. }))
            .collect();
        assert_eq!(collected, vec![GameEvent::Collected { value: COLLECTIBLE_VALUE }]);
    }

    #[test]
    fn test_walking_right_completes_level() {
        let mut session = session_with(flat_level(Vec::new()));
        session.apply_intent(Intent::MoveRight(true));
        let mut ticks = 0;
        while session.state().level == 1 {
            session.tick();
            ticks += 1;
            assert!(ticks < 1000, "level never completed");
        }
        assert_eq!(session.state().level, 2);
        assert_eq!(session.state().position, Vec2::new(SPAWN_X, FLOOR - 40.0));
        assert!(session.drain_events().contains(&GameEvent::LevelAdvanced { level: 2 }));
    }

    #[test]
    fn test_walking_through_last_level_wins() {
        let mut session = session_with(flat_level(Vec::new()));
        for _ in 1..MAX_LEVEL {
            session.advance_level();
        }
        session.apply_intent(Intent::MoveRight(true));
        for _ in 0..1000 {
            session.tick();
        }
        let snapshot = session.snapshot();
        assert_eq!(snapshot.level, MAX_LEVEL);
        assert_eq!(snapshot.screen, ScreenState::Won);
        assert!(!snapshot.playing);
    }

    #[test]
    fn test_coins_respawn_when_level_reentered() {
        let coin = Rect::new(200.0, FLOOR - 45.0, COIN_SIZE, COIN_SIZE);
        let mut session = session_with(flat_level(vec![coin]));
        session.apply_intent(Intent::MoveRight(true));
        while session.state().level == 1 {
            session.tick();
        }
        assert_eq!(session.state().score, COLLECTIBLE_VALUE);
        while session.state().level == 2 {
            session.tick();
        }
        assert_eq!(session.state().score, 2 * COLLECTIBLE_VALUE);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_intent() -> impl Strategy<Value = Intent> {
            prop_oneof![
                any::<bool>().prop_map(Intent::MoveLeft),
                any::<bool>().prop_map(Intent::MoveRight),
                Just(Intent::Jump),
                Just(Intent::Interact),
            ]
        }

        /// Level with pits and a coin cluster so every transition gets exercised
        fn pitted_level() -> Level {
            let mut level = flat_level(
                (0..12)
                    .map(|i| Rect::new(150.0 + i as f32 * 90.0, FLOOR - 45.0, COIN_SIZE, COIN_SIZE))
                    .collect(),
            );
            level.platforms = vec![
                Rect::new(0.0, FLOOR, 500.0, 80.0),
                Rect::new(620.0, FLOOR, 400.0, 80.0),
                Rect::new(1100.0, FLOOR, 400.0, 80.0),
                Rect::new(300.0, FLOOR - 100.0, 150.0, 20.0),
            ];
            level
        }

        proptest! {
            #[test]
            fn score_never_decreases_and_counts_coins(
                steps in proptest::collection::vec((arb_intent(), 1usize..20), 1..80)
            ) {
                let mut session = session_with(pitted_level());
                let mut last_score = 0;
                let mut collected_events = 0u32;

                for (intent, ticks) in steps {
                    session.apply_intent(intent);
                    for _ in 0..ticks {
                        session.tick();
                        let score = session.state().score;
                        prop_assert!(score >= last_score);
                        last_score = score;
                    }
                    collected_events += session
                        .drain_events()
                        .iter()
                        .filter(|e| matches!(e, GameEvent::Collected { .. }))
                        .count() as u32;
                }

                prop_assert_eq!(last_score, collected_events * COLLECTIBLE_VALUE);
            }

            #[test]
            fn x_stays_in_bounds(
                steps in proptest::collection::vec((arb_intent(), 1usize..40), 1..60)
            ) {
                let mut session = session_with(pitted_level());
                let max_x = session.config().max_x();
                for (intent, ticks) in steps {
                    session.apply_intent(intent);
                    for _ in 0..ticks {
                        session.tick();
                        let x = session.state().position.x;
                        prop_assert!((0.0..=max_x).contains(&x), "x={} out of bounds", x);
                    }
                }
            }

            #[test]
            fn lives_bounded_and_zero_means_game_over(
                steps in proptest::collection::vec((arb_intent(), 1usize..60), 1..60)
            ) {
                let mut session = session_with(pitted_level());
                for (intent, ticks) in steps {
                    session.apply_intent(intent);
                    for _ in 0..ticks {
                        session.tick();
                        let snapshot = session.snapshot();
                        prop_assert!(snapshot.lives <= STARTING_LIVES);
                        if snapshot.lives == 0 {
                            prop_assert!(!snapshot.playing);
                            prop_assert_eq!(snapshot.screen, ScreenState::GameOver);
                        }
                    }
                }
            }

            #[test]
            fn level_never_decreases(
                steps in proptest::collection::vec((arb_intent(), 1usize..80), 1..40)
            ) {
                let mut session = session_with(pitted_level());
                let mut last_level = 1;
                for (intent, ticks) in steps {
                    session.apply_intent(intent);
                    for _ in 0..ticks {
                        session.tick();
                        let level = session.state().level;
                        prop_assert!(level >= last_level && level <= MAX_LEVEL);
                        last_level = level;
                    }
                }
            }
        }
    }
}
