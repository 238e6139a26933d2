use serde::{Deserialize, Serialize};

// Configuration for menu visual elements
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MenuConfig {
    #[serde(default)]
    pub title: TitleConfig,
    #[serde(default)]
    pub renderer: RendererConfig,
}

// Title-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleConfig {
    pub title_height: usize,
    pub protection_margin: usize,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            title_height: 5,      // Height of the ASCII art letters
            protection_margin: 2, // Extra rows kept clear of the glyph rain
        }
    }
}

// Menu renderer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RendererConfig {
    // Falling glyph background settings
    pub initial_glyph_count: usize,
    pub glyph_max_count: usize,
    pub glyph_min_fall_speed: f32,
    pub glyph_max_fall_speed: f32,
    pub glyph_spawn_interval_ms: u64,

    // Color cycling settings
    pub title_color_cycle_interval_ms: u64,
    pub title_colors: Vec<TitleColor>,

    // Layout settings
    pub menu_title_height: u16,
    pub menu_option_width: u16,
}

// Supported colors for serialization/deserialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TitleColor {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Black,
    DarkGray,
    LightRed,
    LightGreen,
    LightYellow,
    LightBlue,
    LightMagenta,
    LightCyan,
    Gray,
    Custom(u8, u8, u8),
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            // Glyph rain defaults
            initial_glyph_count: 16,
            glyph_max_count: 24,
            glyph_min_fall_speed: 2.0,
            glyph_max_fall_speed: 7.0,
            glyph_spawn_interval_ms: 400,

            // Color cycling defaults
            title_color_cycle_interval_ms: 150,
            title_colors: vec![
                TitleColor::Green,
                TitleColor::Yellow,
                TitleColor::Red,
                TitleColor::LightGreen,
                TitleColor::LightYellow,
                TitleColor::LightRed,
            ],

            // Layout defaults
            menu_title_height: 9,
            menu_option_width: 22,
        }
    }
}
