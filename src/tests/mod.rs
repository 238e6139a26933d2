#![warn(clippy::all, clippy::pedantic)]

pub mod components_tests;
pub mod config_tests;
pub mod game_tests;
pub mod integration_tests;
pub mod time_tests;

// Shared test utilities
#[cfg(test)]
pub mod test_utils {
    use bevy_ecs::prelude::*;

    use crate::components::{
        Basket, FallingItem, GameState, Input, Outcome, PenaltyFlash, ScreenShake, SlotEvent,
        SlotOutcomes,
    };
    use crate::game::{ItemDef, ItemKind, PowerupKind};
    use crate::systems::spawn_slots;

    pub const TEST_GIFT: ItemDef = ItemDef {
        kind: ItemKind::Gift,
        glyph: "🎁",
        score: 2,
        weight: 1,
    };
    pub const TEST_OBSTACLE: ItemDef = ItemDef {
        kind: ItemKind::Obstacle,
        glyph: "💣",
        score: 0,
        weight: 1,
    };
    pub const TEST_LIFE: ItemDef = ItemDef {
        kind: ItemKind::Life,
        glyph: "❤️",
        score: 0,
        weight: 1,
    };
    pub const TEST_SHIELD: ItemDef = ItemDef {
        kind: ItemKind::Powerup(PowerupKind::Shield),
        glyph: "🛡️",
        score: 0,
        weight: 1,
    };
    pub const TEST_SLOWMO: ItemDef = ItemDef {
        kind: ItemKind::Powerup(PowerupKind::SlowMotion),
        glyph: "☕",
        score: 15,
        weight: 1,
    };

    // World with every gameplay resource but no slot pool yet
    #[must_use]
    pub fn create_test_world() -> World {
        let mut world = World::new();
        world.insert_resource(GameState::default());
        world.insert_resource(Basket::default());
        world.insert_resource(Input::default());
        world.insert_resource(SlotOutcomes::default());
        world.insert_resource(ScreenShake::default());
        world.insert_resource(PenaltyFlash::default());
        world.insert_resource(crate::Time::new());
        world
    }

    // World ready to play: resources plus the level-1 slot pool
    #[must_use]
    pub fn create_playing_world() -> World {
        let mut world = create_test_world();
        spawn_slots(&mut world);
        world
    }

    #[must_use]
    pub fn slot_by_lane(world: &mut World, lane: usize) -> Option<Entity> {
        world
            .query::<(Entity, &FallingItem)>()
            .iter(world)
            .find(|(_, falling)| falling.lane == lane)
            .map(|(entity, _)| entity)
    }

    #[must_use]
    pub fn slot_count(world: &mut World) -> usize {
        world.query::<&FallingItem>().iter(world).count()
    }

    // Force a known item into a slot so outcomes are deterministic
    pub fn force_item(world: &mut World, entity: Entity, item: ItemDef) {
        let mut falling = world.get_mut::<FallingItem>(entity).unwrap();
        falling.item = item;
        falling.delay = 0.0;
    }

    // Queue an outcome for the slot's current occupant
    pub fn enqueue(world: &mut World, entity: Entity, lane: usize, outcome: Outcome) {
        let item_id = world.get::<FallingItem>(entity).unwrap().id;
        world.resource_mut::<SlotOutcomes>().push(SlotEvent {
            entity,
            lane,
            item_id,
            outcome,
        });
    }
}
