#![warn(clippy::all, clippy::pedantic)]

use ratatui::style::Color;
use std::time::Duration;

// Playfield geometry (logical columns; rows come from the terminal size)
pub const FIELD_COLUMNS: u16 = 40;
pub const ITEM_SPAN: u16 = 2; // glyphs render roughly two cells wide
pub const BASKET_SPAN: u16 = 7;
pub const BASKET_STEP: f32 = 2.0; // columns moved per key press

// Session tuning
pub const STARTING_LIVES: u32 = 3;
pub const MAX_LIVES: u32 = 5;
pub const BASE_SLOT_COUNT: usize = 4; // slots grow by one per level
pub const COMBO_STREAK: u32 = 5; // catches per multiplier tier
pub const TAP_BONUS_FACTOR: u32 = 2; // tapping doubles the base score
pub const SLOW_MOTION_DURATION: Duration = Duration::from_secs(5);
pub const SLOW_MOTION_FALL_FACTOR: f32 = 2.0;
pub const MAX_SPAWN_DELAY_SECS: f32 = 2.0; // stagger so respawns don't bombard in sync

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerupKind {
    Shield,
    SlowMotion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Gift,
    Obstacle,
    Life,
    Powerup(PowerupKind),
}

/// One entry of a level's weighted item pool. Immutable static data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemDef {
    pub kind: ItemKind,
    pub glyph: &'static str,
    pub score: u32,
    pub weight: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct LevelDef {
    pub number: u32,
    pub name: &'static str,
    pub target_score: u32,
    pub min_fall_secs: f32,
    pub max_fall_secs: f32,
    pub items: &'static [ItemDef],
    pub reward: &'static str,
    pub description: &'static str,
    pub accent: Color,
}

const fn gift(glyph: &'static str, score: u32, weight: u32) -> ItemDef {
    ItemDef {
        kind: ItemKind::Gift,
        glyph,
        score,
        weight,
    }
}

const fn obstacle(glyph: &'static str, weight: u32) -> ItemDef {
    ItemDef {
        kind: ItemKind::Obstacle,
        glyph,
        score: 0,
        weight,
    }
}

const fn life(glyph: &'static str, weight: u32) -> ItemDef {
    ItemDef {
        kind: ItemKind::Life,
        glyph,
        score: 0,
        weight,
    }
}

const fn powerup(kind: PowerupKind, glyph: &'static str, score: u32, weight: u32) -> ItemDef {
    ItemDef {
        kind: ItemKind::Powerup(kind),
        glyph,
        score,
        weight,
    }
}

/// The five Genna levels, in play order. Traversal is strictly forward.
pub static LEVELS: &[LevelDef] = &[
    LevelDef {
        number: 1,
        name: "Genna Eve",
        target_score: 30,
        min_fall_secs: 3.0,
        max_fall_secs: 4.5,
        items: &[gift("🕯️", 2, 40), gift("🎁", 1, 60)],
        reward: "🕯️",
        description: "Catch the candles and gifts for the eve.",
        accent: Color::Rgb(0x02, 0x17, 0x15),
    },
    LevelDef {
        number: 2,
        name: "Traditional Feast",
        target_score: 70,
        min_fall_secs: 2.2,
        max_fall_secs: 3.5,
        items: &[gift("🥘", 5, 30), gift("🧺", 3, 40), gift("🎁", 1, 30)],
        reward: "🥘",
        description: "Collect Doro Wat and Agelgil for the feast!",
        accent: Color::Rgb(0x42, 0x0d, 0x09),
    },
    LevelDef {
        number: 3,
        name: "The Rur Match",
        target_score: 150,
        min_fall_secs: 1.6,
        max_fall_secs: 2.8,
        items: &[
            gift("⚪", 10, 20),
            gift("🏒", 5, 30),
            obstacle("💣", 30),
            gift("🎁", 1, 20),
        ],
        reward: "🏒",
        description: "Catch the Genna balls (Rur) but avoid the traps!",
        accent: Color::Rgb(0xb4, 0x53, 0x09),
    },
    LevelDef {
        number: 4,
        name: "Coffee Ceremony",
        target_score: 300,
        min_fall_secs: 1.2,
        max_fall_secs: 2.2,
        items: &[
            powerup(PowerupKind::SlowMotion, "☕", 15, 15),
            gift("🍿", 5, 25),
            obstacle("💣", 40),
            life("❤️", 20),
        ],
        reward: "☕",
        description: "Time for Buna! Catch the coffee cups for slow motion.",
        accent: Color::Rgb(0x06, 0x4e, 0x3b),
    },
    LevelDef {
        number: 5,
        name: "Genna Miracle",
        target_score: 600,
        min_fall_secs: 0.8,
        max_fall_secs: 1.6,
        items: &[
            powerup(PowerupKind::Shield, "🛡️", 0, 10),
            gift("✨", 50, 5),
            gift("👑", 25, 10),
            gift("🥘", 10, 20),
            obstacle("💣", 40),
            life("❤️", 15),
        ],
        reward: "👑",
        description: "The ultimate celebration! Use the shield to survive.",
        accent: Color::Rgb(0x4c, 0x1d, 0x95),
    },
];

impl LevelDef {
    /// Number of falling-item slots this level plays with.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        BASE_SLOT_COUNT + (self.number as usize - 1)
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.number as usize == LEVELS.len()
    }

    #[must_use]
    pub fn total_weight(&self) -> u32 {
        self.items.iter().map(|item| item.weight).sum()
    }
}
