#[cfg(test)]
mod game_state_tests {
    use crate::components::{GameState, Outcome, Phase, Resolution};
    use crate::game::{LEVELS, MAX_LIVES, STARTING_LIVES};
    use crate::tests::test_utils::{TEST_GIFT, TEST_LIFE, TEST_OBSTACLE, TEST_SHIELD, TEST_SLOWMO};
    use std::time::{Duration, Instant};

    #[test]
    fn test_default_session() {
        let state = GameState::default();
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.level_index, 0);
        assert_eq!(state.combo, 0);
        assert_eq!(state.max_combo, 0);
        assert_eq!(state.phase, Phase::Playing);
        assert!(!state.shielded);
        assert!(state.slow_motion_until.is_none());
    }

    #[test]
    fn test_combo_multiplier_tiers() {
        // combo 0-4 -> x1, 5-9 -> x2, 10-14 -> x3
        for (combo, multiplier) in [(0, 1), (4, 1), (5, 2), (9, 2), (10, 3), (14, 3)] {
            let mut state = GameState::default();
            state.combo = combo;
            let resolution = state.resolve(&TEST_GIFT, Outcome::Caught);
            assert_eq!(
                resolution,
                Resolution::Scored {
                    points: TEST_GIFT.score * multiplier,
                    tapped: false
                },
                "combo {combo} should score with multiplier {multiplier}"
            );
            assert_eq!(state.score, TEST_GIFT.score * multiplier);
            assert_eq!(state.combo, combo + 1);
        }
    }

    #[test]
    fn test_tap_doubles_base_score() {
        // Tap delta is 2*S*(combo/5 + 1) against S*(combo/5 + 1) for a catch
        let mut caught = GameState::default();
        caught.combo = 7;
        caught.resolve(&TEST_GIFT, Outcome::Caught);
        assert_eq!(caught.score, TEST_GIFT.score * 2);

        let mut tapped = GameState::default();
        tapped.combo = 7;
        let resolution = tapped.resolve(&TEST_GIFT, Outcome::Tapped);
        assert_eq!(tapped.score, TEST_GIFT.score * 2 * 2);
        assert_eq!(
            resolution,
            Resolution::Scored {
                points: TEST_GIFT.score * 4,
                tapped: true
            }
        );
    }

    #[test]
    fn test_max_combo_tracking() {
        let mut state = GameState::default();
        for _ in 0..3 {
            state.resolve(&TEST_GIFT, Outcome::Caught);
        }
        assert_eq!(state.max_combo, 3);

        state.resolve(&TEST_GIFT, Outcome::Missed);
        assert_eq!(state.combo, 0);
        // The high-water mark survives the miss
        assert_eq!(state.max_combo, 3);
    }

    #[test]
    fn test_missed_gift_penalty() {
        let mut state = GameState::default();
        state.combo = 4;
        let resolution = state.resolve(&TEST_GIFT, Outcome::Missed);
        assert_eq!(resolution, Resolution::Penalty);
        assert_eq!(state.combo, 0);
        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_missed_non_gifts_are_ignored() {
        for item in [TEST_OBSTACLE, TEST_LIFE, TEST_SHIELD, TEST_SLOWMO] {
            let mut state = GameState::default();
            let resolution = state.resolve(&item, Outcome::Missed);
            assert_eq!(resolution, Resolution::Ignored);
            assert_eq!(state.lives, STARTING_LIVES);
            assert_eq!(state.score, 0);
            assert_eq!(state.phase, Phase::Playing);
        }
    }

    #[test]
    fn test_obstacle_costs_a_life() {
        for outcome in [Outcome::Caught, Outcome::Tapped] {
            let mut state = GameState::default();
            let resolution = state.resolve(&TEST_OBSTACLE, outcome);
            assert_eq!(resolution, Resolution::Penalty);
            assert_eq!(state.lives, STARTING_LIVES - 1);
        }
    }

    #[test]
    fn test_shield_absorbs_one_obstacle() {
        let mut state = GameState::default();
        state.resolve(&TEST_SHIELD, Outcome::Caught);
        assert!(state.shielded);

        // Shielded hit: shield consumed, lives untouched
        let resolution = state.resolve(&TEST_OBSTACLE, Outcome::Caught);
        assert_eq!(resolution, Resolution::ShieldSpent);
        assert!(!state.shielded);
        assert_eq!(state.lives, STARTING_LIVES);

        // The next obstacle costs a life again
        let resolution = state.resolve(&TEST_OBSTACLE, Outcome::Tapped);
        assert_eq!(resolution, Resolution::Penalty);
        assert_eq!(state.lives, STARTING_LIVES - 1);
    }

    #[test]
    fn test_lives_capped_at_five() {
        let mut state = GameState::default();
        state.lives = MAX_LIVES;
        let resolution = state.resolve(&TEST_LIFE, Outcome::Caught);
        assert_eq!(resolution, Resolution::LifeGained);
        assert_eq!(state.lives, MAX_LIVES);

        state.lives = 3;
        state.resolve(&TEST_LIFE, Outcome::Tapped);
        assert_eq!(state.lives, 4);
    }

    #[test]
    fn test_slow_motion_power_up() {
        let mut state = GameState::default();
        state.resolve(&TEST_SLOWMO, Outcome::Caught);

        let now = Instant::now();
        assert!(state.is_slow_motion(now));
        // Power-up score counts, without combo or multiplier
        assert_eq!(state.score, TEST_SLOWMO.score);
        assert_eq!(state.combo, 0);

        // Expired after its five second window
        let later = now + Duration::from_secs(6);
        assert!(!state.is_slow_motion(later));
        state.expire_powerups(later);
        assert!(state.slow_motion_until.is_none());
    }

    #[test]
    fn test_level_completion_at_exact_target() {
        let mut state = GameState::default();
        state.score = LEVELS[0].target_score - TEST_GIFT.score;
        state.resolve(&TEST_GIFT, Outcome::Caught);
        assert_eq!(state.score, LEVELS[0].target_score);
        assert_eq!(state.phase, Phase::LevelUp);
    }

    #[test]
    fn test_win_on_last_level() {
        let mut state = GameState::default();
        state.level_index = LEVELS.len() - 1;
        state.score = LEVELS[LEVELS.len() - 1].target_score - TEST_GIFT.score;
        state.resolve(&TEST_GIFT, Outcome::Caught);
        assert_eq!(state.phase, Phase::Win);
    }

    #[test]
    fn test_game_over_when_lives_run_out() {
        let mut state = GameState::default();
        state.lives = 1;
        state.resolve(&TEST_OBSTACLE, Outcome::Caught);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, Phase::GameOver);
    }

    #[test]
    fn test_game_over_beats_target_cross() {
        // Even with the target already exceeded, losing the last life wins
        let mut state = GameState::default();
        state.lives = 1;
        state.score = LEVELS[0].target_score + 10;
        state.resolve(&TEST_OBSTACLE, Outcome::Tapped);
        assert_eq!(state.phase, Phase::GameOver);
    }

    #[test]
    fn test_advance_level() {
        let mut state = GameState::default();
        state.score = LEVELS[0].target_score;
        state.phase = Phase::LevelUp;
        state.advance_level();
        assert_eq!(state.level_index, 1);
        assert_eq!(state.phase, Phase::Playing);

        // Advancing never walks past the last level
        state.level_index = LEVELS.len() - 1;
        state.advance_level();
        assert_eq!(state.level_index, LEVELS.len() - 1);
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = GameState::default();
        state.toggle_pause();
        assert_eq!(state.phase, Phase::Paused);
        state.toggle_pause();
        assert_eq!(state.phase, Phase::Playing);

        // Pausing has no effect on terminal phases
        state.phase = Phase::GameOver;
        state.toggle_pause();
        assert_eq!(state.phase, Phase::GameOver);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = GameState::default();
        state.score = 123;
        state.lives = 0;
        state.level_index = 3;
        state.combo = 7;
        state.max_combo = 9;
        state.phase = Phase::GameOver;
        state.shielded = true;

        state.restart();
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.level_index, 0);
        assert_eq!(state.combo, 0);
        assert_eq!(state.phase, Phase::Playing);
        assert!(!state.shielded);
    }
}

#[cfg(test)]
mod falling_item_tests {
    use crate::components::{Basket, FallingItem};
    use crate::game::{BASKET_SPAN, FIELD_COLUMNS};
    use crate::tests::test_utils::TEST_GIFT;

    fn item_at(column: u16) -> FallingItem {
        FallingItem {
            id: 1,
            lane: 0,
            item: TEST_GIFT,
            column,
            fall_secs: 2.0,
            elapsed: 0.0,
            delay: 0.0,
        }
    }

    #[test]
    fn test_progress_clamps() {
        let mut item = item_at(10);
        assert!((item.progress() - 0.0).abs() < f32::EPSILON);

        item.elapsed = 1.0;
        assert!((item.progress() - 0.5).abs() < f32::EPSILON);

        item.elapsed = 5.0;
        assert!((item.progress() - 1.0).abs() < f32::EPSILON);
        assert!(item.landed());
    }

    #[test]
    fn test_delay_suppresses_progress() {
        let mut item = item_at(10);
        item.delay = 1.0;
        item.elapsed = 1.0;
        assert!(!item.started());
        assert!((item.progress() - 0.0).abs() < f32::EPSILON);
        assert!(!item.landed());
    }

    #[test]
    fn test_basket_overlap() {
        let basket = Basket::default();

        // Dead center lands in the basket
        let center = item_at((basket.x + 2.0) as u16);
        assert!(center.over_basket(basket.x));

        // Far left edge misses a centered basket
        let left = item_at(0);
        assert!(!left.over_basket(basket.x));
    }

    #[test]
    fn test_basket_shift_clamps() {
        let mut basket = Basket::default();
        basket.shift(-1000.0);
        assert!((basket.x - 0.0).abs() < f32::EPSILON);

        basket.shift(1000.0);
        assert!((basket.x - f32::from(FIELD_COLUMNS - BASKET_SPAN)).abs() < f32::EPSILON);
    }
}

#[cfg(test)]
mod outcome_queue_tests {
    use crate::components::{Outcome, SlotEvent, SlotOutcomes};
    use bevy_ecs::prelude::*;

    #[test]
    fn test_fifo_order() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();

        let mut queue = SlotOutcomes::default();
        queue.push(SlotEvent {
            entity: a,
            lane: 0,
            item_id: 1,
            outcome: Outcome::Caught,
        });
        queue.push(SlotEvent {
            entity: b,
            lane: 1,
            item_id: 2,
            outcome: Outcome::Missed,
        });

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop().unwrap().lane, 0);
        assert_eq!(queue.pop().unwrap().lane, 1);
        assert!(queue.pop().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clear_drops_pending_events() {
        let mut world = World::new();
        let entity = world.spawn_empty().id();

        let mut queue = SlotOutcomes::default();
        queue.push(SlotEvent {
            entity,
            lane: 0,
            item_id: 1,
            outcome: Outcome::Tapped,
        });
        queue.clear();
        assert!(queue.is_empty());
    }
}
