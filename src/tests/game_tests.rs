#[cfg(test)]
mod tests {
    use crate::game::*;

    #[test]
    fn test_session_constants() {
        assert_eq!(STARTING_LIVES, 3);
        assert_eq!(MAX_LIVES, 5);
        assert_eq!(BASE_SLOT_COUNT, 4);
        assert_eq!(COMBO_STREAK, 5);
        assert_eq!(TAP_BONUS_FACTOR, 2);
        assert_eq!(SLOW_MOTION_DURATION.as_secs(), 5);
        assert!(SLOW_MOTION_FALL_FACTOR > 1.0);
    }

    #[test]
    fn test_playfield_geometry() {
        // The basket must fit inside the playfield with room to move
        assert!(BASKET_SPAN < FIELD_COLUMNS);
        assert!(ITEM_SPAN < BASKET_SPAN);
        assert!(BASKET_STEP > 0.0);
    }

    #[test]
    fn test_level_table_ordering() {
        assert_eq!(LEVELS.len(), 5);

        for (i, level) in LEVELS.iter().enumerate() {
            // Numbers are 1-based and consecutive
            assert_eq!(level.number as usize, i + 1);
        }

        // Target scores strictly increase level over level
        for pair in LEVELS.windows(2) {
            assert!(pair[1].target_score > pair[0].target_score);
        }
    }

    #[test]
    fn test_level_fall_ranges() {
        for level in LEVELS {
            assert!(level.min_fall_secs > 0.0);
            assert!(level.max_fall_secs > level.min_fall_secs);
        }

        // The final level falls faster than the first
        let first = &LEVELS[0];
        let last = &LEVELS[LEVELS.len() - 1];
        assert!(last.max_fall_secs <= first.min_fall_secs);
    }

    #[test]
    fn test_level_item_pools() {
        for level in LEVELS {
            assert!(!level.items.is_empty());
            assert!(level.total_weight() > 0);

            // Every level needs at least one gift or its target is unreachable
            assert!(
                level
                    .items
                    .iter()
                    .any(|item| item.kind == ItemKind::Gift && item.score > 0)
            );
        }
    }

    #[test]
    fn test_slot_counts_grow_with_level() {
        assert_eq!(LEVELS[0].slot_count(), 4);
        assert_eq!(LEVELS[4].slot_count(), 8);
        for pair in LEVELS.windows(2) {
            assert_eq!(pair[1].slot_count(), pair[0].slot_count() + 1);
        }
    }

    #[test]
    fn test_only_final_level_is_last() {
        for (i, level) in LEVELS.iter().enumerate() {
            assert_eq!(level.is_last(), i == LEVELS.len() - 1);
        }
    }

    #[test]
    fn test_power_ups_appear_in_later_levels() {
        let has_slow_motion = LEVELS[3]
            .items
            .iter()
            .any(|item| item.kind == ItemKind::Powerup(PowerupKind::SlowMotion));
        let has_shield = LEVELS[4]
            .items
            .iter()
            .any(|item| item.kind == ItemKind::Powerup(PowerupKind::Shield));
        assert!(has_slow_motion);
        assert!(has_shield);
    }
}
