#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow precision loss when casting between numeric types since exact precision isn't critical in this game
    clippy::cast_precision_loss,
    // Allow more than 3 bools in structs for input handling where bools represent distinct flags
    clippy::struct_excessive_bools
)]

use bevy_ecs::prelude::*;
use std::collections::VecDeque;
use std::time::Instant;

use crate::game::{
    BASKET_SPAN, COMBO_STREAK, FIELD_COLUMNS, ITEM_SPAN, ItemDef, ItemKind, LEVELS, LevelDef,
    MAX_LIVES, PowerupKind, SLOW_MOTION_DURATION, STARTING_LIVES, TAP_BONUS_FACTOR,
};

/// Session-level state machine value governing whether gameplay input is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Paused,
    LevelUp,
    GameOver,
    Win,
}

/// Terminal outcome of one falling item's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Caught,
    Tapped,
    Missed,
}

/// What a resolution did to the session, for feedback (sound/particles/shake).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Scored { points: u32, tapped: bool },
    Penalty,
    ShieldSpent,
    LifeGained,
    PowerupArmed(PowerupKind),
    Ignored,
}

#[derive(Resource, Debug, Clone)]
pub struct GameState {
    pub score: u32,
    pub lives: u32,
    pub level_index: usize,
    pub combo: u32,
    pub max_combo: u32,
    pub phase: Phase,
    pub shielded: bool,
    pub slow_motion_until: Option<Instant>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            score: 0,
            lives: STARTING_LIVES,
            level_index: 0,
            combo: 0,
            max_combo: 0,
            phase: Phase::Playing,
            shielded: false,
            slow_motion_until: None,
        }
    }
}

impl GameState {
    #[must_use]
    pub fn current_level(&self) -> &'static LevelDef {
        &LEVELS[self.level_index]
    }

    #[must_use]
    pub fn is_slow_motion(&self, now: Instant) -> bool {
        self.slow_motion_until.is_some_and(|until| now < until)
    }

    /// Clears the slow-motion flag once its wall-clock deadline has passed.
    /// The deadline deliberately keeps ticking across phase changes.
    pub fn expire_powerups(&mut self, now: Instant) {
        if self.slow_motion_until.is_some_and(|until| now >= until) {
            self.slow_motion_until = None;
            log::info!("Slow motion expired");
        }
    }

    /// Applies one slot outcome to the session. The caller is responsible
    /// for the phase guard; this method assumes the session is playing.
    pub fn resolve(&mut self, item: &ItemDef, outcome: Outcome) -> Resolution {
        match outcome {
            Outcome::Missed => match item.kind {
                ItemKind::Gift => {
                    // A dropped gift breaks the streak and costs a life.
                    self.combo = 0;
                    self.lose_life();
                    Resolution::Penalty
                }
                // Letting anything else hit the ground is free.
                _ => Resolution::Ignored,
            },
            Outcome::Caught | Outcome::Tapped => match item.kind {
                ItemKind::Obstacle => {
                    if self.shielded {
                        self.shielded = false;
                        Resolution::ShieldSpent
                    } else {
                        self.lose_life();
                        Resolution::Penalty
                    }
                }
                ItemKind::Life => {
                    self.lives = (self.lives + 1).min(MAX_LIVES);
                    Resolution::LifeGained
                }
                ItemKind::Powerup(kind) => {
                    match kind {
                        PowerupKind::Shield => self.shielded = true,
                        PowerupKind::SlowMotion => {
                            self.slow_motion_until = Some(Instant::now() + SLOW_MOTION_DURATION);
                        }
                    }
                    if item.score > 0 {
                        self.gain_score(item.score);
                    }
                    Resolution::PowerupArmed(kind)
                }
                ItemKind::Gift => {
                    // Multiplier tiers come from the streak before this catch.
                    let multiplier = self.combo / COMBO_STREAK + 1;
                    self.combo += 1;
                    self.max_combo = self.max_combo.max(self.combo);
                    let base = if outcome == Outcome::Tapped {
                        item.score * TAP_BONUS_FACTOR
                    } else {
                        item.score
                    };
                    let points = base * multiplier;
                    self.gain_score(points);
                    Resolution::Scored {
                        points,
                        tapped: outcome == Outcome::Tapped,
                    }
                }
            },
        }
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            log::info!("Out of lives at score {}", self.score);
            self.phase = Phase::GameOver;
        }
    }

    fn gain_score(&mut self, points: u32) {
        self.score += points;
        // Life loss is evaluated first: a game over earlier in the same
        // resolution always wins over crossing the target.
        if self.phase != Phase::Playing {
            return;
        }
        if self.score >= self.current_level().target_score {
            self.phase = if self.current_level().is_last() {
                Phase::Win
            } else {
                Phase::LevelUp
            };
            log::info!(
                "Level {} target reached with score {}",
                self.current_level().number,
                self.score
            );
        }
    }

    /// Moves to the next level after a level-up pause. No-op on the last level.
    pub fn advance_level(&mut self) {
        if self.level_index + 1 < LEVELS.len() {
            self.level_index += 1;
            self.phase = Phase::Playing;
        }
    }

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            Phase::Playing => Phase::Paused,
            Phase::Paused => Phase::Playing,
            other => other,
        };
    }

    pub fn restart(&mut self) {
        *self = Self::default();
    }
}

/// One falling item occupying one slot. Recycled in place for the lifetime
/// of a level; the component is replaced wholesale on every respawn. The id
/// changes with every respawn so events from a previous occupant of the
/// slot can be told apart from the current one.
#[derive(Component, Debug, Clone, Copy)]
pub struct FallingItem {
    pub id: u64,
    pub lane: usize,
    pub item: ItemDef,
    pub column: u16,
    pub fall_secs: f32,
    pub elapsed: f32,
    pub delay: f32,
}

impl FallingItem {
    /// True once the pre-fall stagger delay has run out.
    #[must_use]
    pub fn started(&self) -> bool {
        self.delay <= 0.0
    }

    #[must_use]
    pub fn landed(&self) -> bool {
        self.started() && self.elapsed >= self.fall_secs
    }

    /// Fall progress in [0, 1]; 0 while the stagger delay is pending.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if !self.started() || self.fall_secs <= 0.0 {
            return 0.0;
        }
        (self.elapsed / self.fall_secs).clamp(0.0, 1.0)
    }

    /// Whether an item landing at this column ends up in the basket.
    #[must_use]
    pub fn over_basket(&self, basket_x: f32) -> bool {
        let item_left = f32::from(self.column);
        let item_right = item_left + f32::from(ITEM_SPAN);
        item_right > basket_x && item_left < basket_x + f32::from(BASKET_SPAN)
    }
}

/// The player's basket along the bottom edge of the playfield.
#[derive(Resource, Debug, Clone)]
pub struct Basket {
    pub x: f32,
}

impl Default for Basket {
    fn default() -> Self {
        Self {
            x: f32::from(FIELD_COLUMNS - BASKET_SPAN) / 2.0,
        }
    }
}

impl Basket {
    pub fn shift(&mut self, dx: f32) {
        self.x = (self.x + dx).clamp(0.0, f32::from(FIELD_COLUMNS - BASKET_SPAN));
    }
}

/// One terminal event from a slot, queued for the resolution system. The
/// item id pins the event to the slot occupant that produced it; a tap and
/// a landing racing in the same tick cannot both resolve.
#[derive(Debug, Clone, Copy)]
pub struct SlotEvent {
    pub entity: Entity,
    pub lane: usize,
    pub item_id: u64,
    pub outcome: Outcome,
}

/// FIFO queue decoupling slot callbacks from session mutation, so ordering
/// is deterministic and the phase guard has a single choke point.
#[derive(Resource, Debug, Default)]
pub struct SlotOutcomes {
    events: VecDeque<SlotEvent>,
}

impl SlotOutcomes {
    pub fn push(&mut self, event: SlotEvent) {
        self.events.push_back(event);
    }

    pub fn pop(&mut self) -> Option<SlotEvent> {
        self.events.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

// Input state for keyboard controls
#[derive(Resource, Debug, Clone, Default)]
pub struct Input {
    pub left: bool,
    pub right: bool,
    pub tap_slot: Option<usize>, // lane index the player tapped this tick
}

// Horizontal screen shake, the penalty feedback pulse
#[derive(Resource, Debug, Clone, Default)]
pub struct ScreenShake {
    pub intensity: f32,
    pub duration: f32,
    pub offset: i16,
    pub is_active: bool,
}

// Short red flash over the playfield after a penalty
#[derive(Resource, Debug, Clone, Default)]
pub struct PenaltyFlash {
    pub strength: f32,
}

impl PenaltyFlash {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.strength > 0.0
    }
}

// Particle for catch sparkles, tap bursts and level-up confetti
#[derive(Component, Debug, Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub velocity: (f32, f32),
    pub color: ratatui::style::Color,
    pub lifetime: f32,
    pub glyph: char,
}
