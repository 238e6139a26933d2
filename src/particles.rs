#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow precision loss when casting between numeric types since exact precision isn't critical for particle effects
    clippy::cast_precision_loss
)]

use bevy_ecs::prelude::*;
use log::trace;
use ratatui::style::Color;

use crate::components::Particle;
use crate::game::FIELD_COLUMNS;

// Particle coordinates are playfield-logical: x in columns, y normalized to
// [0, 1] with 1 at the basket row. The renderer maps them onto the terminal.

const CATCH_PARTICLES: usize = 6;
const TAP_PARTICLES: usize = 10;
const CONFETTI_PARTICLES: usize = 48;

// Tibeb ribbon colors, also used for the confetti shower.
const FESTIVE_COLORS: [Color; 3] = [Color::Green, Color::Yellow, Color::Red];

fn spawn_particle(
    world: &mut World,
    x: f32,
    y: f32,
    velocity: (f32, f32),
    color: Color,
    lifetime: f32,
    glyph: char,
) {
    world.spawn(Particle {
        x,
        y,
        velocity,
        color,
        lifetime,
        glyph,
    });
}

/// Small sparkle where an item just landed in the basket.
pub fn spawn_catch_burst(world: &mut World, column: f32) {
    trace!("Spawning catch burst at column {column}");
    for _ in 0..CATCH_PARTICLES {
        let vx = (fastrand::f32() - 0.5) * 6.0;
        let vy = -(fastrand::f32() * 0.6 + 0.2); // upward out of the basket
        spawn_particle(
            world,
            column,
            0.95,
            (vx, vy),
            Color::Yellow,
            fastrand::f32() * 0.4 + 0.2,
            '·',
        );
    }
}

/// Brighter burst at the item's position when the player taps it mid-air.
pub fn spawn_tap_burst(world: &mut World, column: f32, progress: f32) {
    trace!("Spawning tap burst at column {column}");
    for _ in 0..TAP_PARTICLES {
        let vx = (fastrand::f32() - 0.5) * 10.0;
        let vy = (fastrand::f32() - 0.5) * 1.2;
        spawn_particle(
            world,
            column,
            progress,
            (vx, vy),
            FESTIVE_COLORS[fastrand::usize(0..FESTIVE_COLORS.len())],
            fastrand::f32() * 0.5 + 0.3,
            '✦',
        );
    }
}

/// Confetti shower across the whole field for level-up and win moments.
pub fn spawn_confetti(world: &mut World) {
    trace!("Spawning confetti");
    for _ in 0..CONFETTI_PARTICLES {
        let x = fastrand::f32() * f32::from(FIELD_COLUMNS);
        let vy = fastrand::f32() * 0.4 + 0.15;
        let glyph = if fastrand::bool() { '*' } else { '•' };
        spawn_particle(
            world,
            x,
            fastrand::f32() * 0.2,
            ((fastrand::f32() - 0.5) * 2.0, vy),
            FESTIVE_COLORS[fastrand::usize(0..FESTIVE_COLORS.len())],
            fastrand::f32() * 1.2 + 0.8,
            glyph,
        );
    }
}

/// Moves particles along their velocities and drops the expired ones.
pub fn update_particles(world: &mut World, delta_seconds: f32) {
    let mut expired: Vec<Entity> = Vec::new();
    let mut query = world.query::<(Entity, &mut Particle)>();
    for (entity, mut particle) in query.iter_mut(world) {
        particle.x += particle.velocity.0 * delta_seconds;
        particle.y += particle.velocity.1 * delta_seconds;
        particle.lifetime -= delta_seconds;

        let off_field =
            particle.y > 1.05 || particle.x < -1.0 || particle.x > f32::from(FIELD_COLUMNS) + 1.0;
        if particle.lifetime <= 0.0 || off_field {
            expired.push(entity);
        }
    }
    for entity in expired {
        world.despawn(entity);
    }
}
