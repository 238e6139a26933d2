#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::{debug, info, trace};
use std::time::Instant;

use crate::components::{
    Basket, FallingItem, GameState, Input, Outcome, Phase, Resolution, SlotEvent, SlotOutcomes,
};
use crate::game::{
    FIELD_COLUMNS, ITEM_SPAN, ItemDef, LevelDef, MAX_SPAWN_DELAY_SECS, SLOW_MOTION_FALL_FACTOR,
};
use crate::particles;
use crate::screenshake;
use crate::sound::{AudioState, SoundEffect};

/// Weighted draw from a level's item pool. Probability is proportional to
/// weight; the walk falls back to the first item if floating-point rounding
/// exhausts it.
#[must_use]
pub fn pick_item(items: &[ItemDef]) -> ItemDef {
    let total: u32 = items.iter().map(|item| item.weight).sum();
    let mut draw = fastrand::f32() * total as f32;
    for item in items {
        if draw < item.weight as f32 {
            return *item;
        }
        draw -= item.weight as f32;
    }
    items[0]
}

/// Uniform fall duration from the level's range, doubled while slow motion
/// is active. Only affects items spawned after the power-up was caught.
#[must_use]
pub fn sample_fall_secs(level: &LevelDef, slow_motion: bool) -> f32 {
    let secs = fastrand::f32() * (level.max_fall_secs - level.min_fall_secs) + level.min_fall_secs;
    if slow_motion {
        secs * SLOW_MOTION_FALL_FACTOR
    } else {
        secs
    }
}

/// Draws a fresh item for a slot: new kind, column, duration and a random
/// stagger delay so respawned items don't arrive in a synchronized wall.
#[must_use]
pub fn fresh_item(lane: usize, level: &LevelDef, slow_motion: bool) -> FallingItem {
    FallingItem {
        id: fastrand::u64(..),
        lane,
        item: pick_item(level.items),
        column: fastrand::u16(0..FIELD_COLUMNS - ITEM_SPAN),
        fall_secs: sample_fall_secs(level, slow_motion),
        elapsed: 0.0,
        delay: fastrand::f32() * MAX_SPAWN_DELAY_SECS,
    }
}

/// Rebuilds the slot pool for the current level: 4 + level index slots,
/// each with a freshly drawn item. Also drops any queued outcomes that
/// still reference the old pool.
pub fn spawn_slots(world: &mut World) {
    let stale: Vec<Entity> = world
        .query::<(Entity, &FallingItem)>()
        .iter(world)
        .map(|(entity, _)| entity)
        .collect();
    for entity in stale {
        world.despawn(entity);
    }

    let (level, slow_motion) = {
        let state = world.resource::<GameState>();
        (state.current_level(), state.is_slow_motion(Instant::now()))
    };

    let count = level.slot_count();
    for lane in 0..count {
        let item = fresh_item(lane, level, slow_motion);
        world.spawn(item);
    }

    world.resource_mut::<SlotOutcomes>().clear();
    info!("Spawned {count} slots for level {}", level.number);
}

/// Replaces a resolved slot's item in place. The slot keeps its lane and
/// entity; it is never left empty.
pub fn respawn_slot(world: &mut World, entity: Entity, lane: usize) {
    let (level, slow_motion) = {
        let state = world.resource::<GameState>();
        (state.current_level(), state.is_slow_motion(Instant::now()))
    };
    let item = fresh_item(lane, level, slow_motion);
    trace!(
        "Respawning slot {lane} with {} over {:.2}s",
        item.item.glyph, item.fall_secs
    );
    if let Ok(mut entity_mut) = world.get_entity_mut(entity) {
        entity_mut.insert(item);
    }
}

/// Consumes the per-tick input flags: basket movement and slot taps.
pub fn input_system(world: &mut World) {
    let input = world.resource::<Input>().clone();
    {
        let mut pending = world.resource_mut::<Input>();
        *pending = Input::default();
    }

    let phase = world.resource::<GameState>().phase;
    if phase != Phase::Playing {
        // Taps and movement while not playing are dropped, not queued.
        return;
    }

    if input.left || input.right {
        let dx = if input.left {
            -crate::game::BASKET_STEP
        } else {
            crate::game::BASKET_STEP
        };
        world.resource_mut::<Basket>().shift(dx);
    }

    if let Some(lane) = input.tap_slot {
        // A tap only lands on an item whose fall has actually started.
        let target = world
            .query::<(Entity, &FallingItem)>()
            .iter(world)
            .find(|(_, item)| item.lane == lane && item.started() && !item.landed())
            .map(|(entity, item)| (entity, item.id));

        if let Some((entity, item_id)) = target {
            debug!("Player tapped slot {lane}");
            world.resource_mut::<SlotOutcomes>().push(SlotEvent {
                entity,
                lane,
                item_id,
                outcome: Outcome::Tapped,
            });
        }
    }
}

/// Advances every slot's fall and queues a Caught/Missed event when an item
/// reaches the bottom edge. Suspended whenever the session is not playing,
/// which freezes the slots in place.
pub fn fall_system(world: &mut World, delta_seconds: f32) {
    let phase = world.resource::<GameState>().phase;
    if phase != Phase::Playing {
        return;
    }
    let basket_x = world.resource::<Basket>().x;

    let mut landed: Vec<SlotEvent> = Vec::new();
    let mut query = world.query::<(Entity, &mut FallingItem)>();
    for (entity, mut item) in query.iter_mut(world) {
        if !item.started() {
            item.delay -= delta_seconds;
            if item.delay > 0.0 {
                continue;
            }
            // Carry the overshoot into the fall so timing stays smooth.
            item.elapsed = -item.delay;
            item.delay = 0.0;
        } else {
            item.elapsed += delta_seconds;
        }

        if item.landed() {
            let outcome = if item.over_basket(basket_x) {
                Outcome::Caught
            } else {
                Outcome::Missed
            };
            landed.push(SlotEvent {
                entity,
                lane: item.lane,
                item_id: item.id,
                outcome,
            });
        }
    }

    let mut outcomes = world.resource_mut::<SlotOutcomes>();
    for event in landed {
        outcomes.push(event);
    }
}

/// Drains the outcome queue in FIFO order. Events that arrive after the
/// phase has left Playing are discarded, which is the only guard needed
/// against late callbacks mutating a finished session.
pub fn resolve_outcomes_system(world: &mut World) {
    loop {
        let Some(event) = world.resource_mut::<SlotOutcomes>().pop() else {
            break;
        };

        let phase = world.resource::<GameState>().phase;
        if phase != Phase::Playing {
            debug!(
                "Discarding {:?} for slot {} after phase change to {phase:?}",
                event.outcome, event.lane
            );
            continue;
        }

        // Slots from a previous pool may still have queued events.
        let Some(falling) = world.get::<FallingItem>(event.entity).copied() else {
            continue;
        };
        // An event for an item the slot no longer holds (it was tapped and
        // respawned earlier in this drain) is stale.
        if falling.id != event.item_id {
            debug!("Discarding stale {:?} for slot {}", event.outcome, event.lane);
            continue;
        }

        let (resolution, phase_after) = {
            let mut state = world.resource_mut::<GameState>();
            let resolution = state.resolve(&falling.item, event.outcome);
            (resolution, state.phase)
        };

        apply_feedback(world, resolution, &falling);
        if phase_after != Phase::Playing {
            announce_phase(world, phase_after);
        }

        // The slot is refilled synchronously even when the phase just
        // changed; advance/restart rebuilds the pool anyway.
        respawn_slot(world, event.entity, event.lane);
    }
}

fn apply_feedback(world: &mut World, resolution: Resolution, falling: &FallingItem) {
    let column = f32::from(falling.column);
    match resolution {
        Resolution::Scored { points, tapped } => {
            trace!("Scored {points} points (tapped: {tapped})");
            if tapped {
                particles::spawn_tap_burst(world, column, falling.progress());
            } else {
                particles::spawn_catch_burst(world, column);
            }
            play(world, if tapped { SoundEffect::Tap } else { SoundEffect::Catch });
        }
        Resolution::Penalty => {
            screenshake::trigger_penalty_feedback(world);
            play(world, SoundEffect::Penalty);
        }
        Resolution::ShieldSpent => {
            play(world, SoundEffect::ShieldBlock);
        }
        Resolution::LifeGained => {
            particles::spawn_catch_burst(world, column);
            play(world, SoundEffect::LifeUp);
        }
        Resolution::PowerupArmed(kind) => {
            particles::spawn_catch_burst(world, column);
            play(world, SoundEffect::Powerup(kind));
        }
        Resolution::Ignored => {}
    }
}

fn announce_phase(world: &mut World, phase: Phase) {
    match phase {
        Phase::LevelUp => {
            particles::spawn_confetti(world);
            play(world, SoundEffect::LevelUp);
        }
        Phase::Win => {
            particles::spawn_confetti(world);
            play(world, SoundEffect::Win);
        }
        Phase::GameOver => {
            play(world, SoundEffect::GameOver);
        }
        Phase::Playing | Phase::Paused => {}
    }
}

fn play(world: &World, effect: SoundEffect) {
    if let Some(audio) = world.get_resource::<AudioState>() {
        audio.play_sound(effect);
    }
}

/// One logic tick: expire timed power-ups, advance falls, resolve queued
/// outcomes, then update the cosmetic layers.
pub fn game_tick_system(world: &mut World, delta_seconds: f32) {
    trace!("Game tick with delta: {delta_seconds}");

    {
        let mut state = world.resource_mut::<GameState>();
        state.expire_powerups(Instant::now());
    }

    fall_system(world, delta_seconds);
    resolve_outcomes_system(world);

    particles::update_particles(world, delta_seconds);
    screenshake::update_screen_shake(world, delta_seconds);
    screenshake::update_penalty_flash(world, delta_seconds);
}
