#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting the shake offset since intensity values are tiny
    clippy::cast_possible_truncation
)]

use bevy_ecs::prelude::*;
use log::trace;

use crate::components::{PenaltyFlash, ScreenShake};

const SHAKE_INTENSITY: f32 = 1.5;
const SHAKE_DURATION: f32 = 0.25;
const FLASH_STRENGTH: f32 = 0.3;
const FLASH_DECAY: f32 = 1.0; // strength lost per second

/// The penalty pulse: a short horizontal shake plus a red flash, fired when
/// the player loses a life.
pub fn trigger_penalty_feedback(world: &mut World) {
    {
        let mut shake = world.resource_mut::<ScreenShake>();
        shake.intensity = SHAKE_INTENSITY;
        shake.duration = SHAKE_DURATION;
        shake.is_active = true;
    }
    world.resource_mut::<PenaltyFlash>().strength = FLASH_STRENGTH;
    trace!("Penalty feedback triggered");
}

/// Updates the shake offset based on elapsed time. The shake is horizontal
/// only, matching the basket's axis of movement.
pub fn update_screen_shake(world: &mut World, delta_seconds: f32) {
    let mut shake = world.resource_mut::<ScreenShake>();
    if shake.duration <= 0.0 {
        return;
    }
    shake.duration -= delta_seconds;

    if shake.duration <= 0.0 {
        shake.intensity = 0.0;
        shake.offset = 0;
        shake.is_active = false;
    } else {
        // Fade the amplitude out over the remaining duration.
        let intensity = shake.intensity * (shake.duration / SHAKE_DURATION);
        let max_offset = (intensity * 2.0) as i16;
        shake.offset = if max_offset > 0 {
            fastrand::i16(0..=max_offset * 2) - max_offset
        } else {
            0
        };
    }
}

pub fn update_penalty_flash(world: &mut World, delta_seconds: f32) {
    let mut flash = world.resource_mut::<PenaltyFlash>();
    if flash.strength > 0.0 {
        flash.strength = (flash.strength - FLASH_DECAY * delta_seconds).max(0.0);
    }
}
