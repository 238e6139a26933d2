#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when mapping glyph rain coordinates onto terminal cells
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use crate::app::App;
use crate::config::{CONFIG, menu::TitleColor};
use crate::menu_types::{Menu, MenuOption, MenuState, OptionsOption};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
};
use std::time::{Duration, Instant};

use super::main_menu::render_main_menu_options;
use super::options_menu::render_options_menu;
use super::title::{get_title_protection_zone, render_ascii_title};

// Glyphs raining down behind the title screen
const RAIN_GLYPHS: [&str; 7] = ["🎁", "🕯️", "⚪", "❤️", "☕", "✨", "👑"];

/// One background glyph drifting down the title screen.
#[derive(Debug, Clone)]
pub struct RainGlyph {
    pub x: u16,
    pub y: f32,
    pub speed: f32, // rows per second
    pub glyph: &'static str,
}

fn random_glyph(x_range: u16, start_above: bool) -> RainGlyph {
    let config = CONFIG.read().unwrap();
    let renderer_config = &config.menu.renderer;
    RainGlyph {
        x: fastrand::u16(0..x_range.max(1)),
        y: if start_above {
            -(fastrand::f32() * 30.0)
        } else {
            0.0
        },
        speed: fastrand::f32()
            * (renderer_config.glyph_max_fall_speed - renderer_config.glyph_min_fall_speed)
            + renderer_config.glyph_min_fall_speed,
        glyph: RAIN_GLYPHS[fastrand::usize(0..RAIN_GLYPHS.len())],
    }
}

pub struct MenuRenderer {
    pub rain: Vec<RainGlyph>,
    pub title_colors: Vec<Color>,
    pub last_glyph_spawn: Instant,
    pub color_change_time: Instant,
    pub last_update: Instant,
}

impl Default for MenuRenderer {
    fn default() -> Self {
        let (initial_count, title_colors) = {
            let config = CONFIG.read().unwrap();
            let renderer_config = &config.menu.renderer;
            let colors = renderer_config
                .title_colors
                .iter()
                .map(|color| match color {
                    TitleColor::Red => Color::Red,
                    TitleColor::Green => Color::Green,
                    TitleColor::Yellow => Color::Yellow,
                    TitleColor::Blue => Color::Blue,
                    TitleColor::Magenta => Color::Magenta,
                    TitleColor::Cyan => Color::Cyan,
                    TitleColor::White => Color::White,
                    TitleColor::Black => Color::Black,
                    TitleColor::DarkGray => Color::DarkGray,
                    TitleColor::LightRed => Color::LightRed,
                    TitleColor::LightGreen => Color::LightGreen,
                    TitleColor::LightYellow => Color::LightYellow,
                    TitleColor::LightBlue => Color::LightBlue,
                    TitleColor::LightMagenta => Color::LightMagenta,
                    TitleColor::LightCyan => Color::LightCyan,
                    TitleColor::Gray => Color::Gray,
                    TitleColor::Custom(r, g, b) => Color::Rgb(*r, *g, *b),
                })
                .collect();
            (renderer_config.initial_glyph_count, colors)
        };

        let rain = (0..initial_count).map(|_| random_glyph(100, true)).collect();

        Self {
            rain,
            title_colors,
            last_glyph_spawn: Instant::now(),
            color_change_time: Instant::now(),
            last_update: Instant::now(),
        }
    }
}

impl MenuRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_option(&mut self, menu: &mut Menu) {
        match menu.state {
            MenuState::MainMenu => {
                menu.selected_option = match menu.selected_option {
                    MenuOption::NewGame => MenuOption::Options,
                    MenuOption::Options => MenuOption::Quit,
                    MenuOption::Quit => MenuOption::NewGame,
                };
            }
            MenuState::Options => {
                menu.options_selected = match menu.options_selected {
                    OptionsOption::MusicToggle => OptionsOption::SoundToggle,
                    OptionsOption::SoundToggle => OptionsOption::VolumeUp,
                    OptionsOption::VolumeUp => OptionsOption::VolumeDown,
                    OptionsOption::VolumeDown => OptionsOption::Back,
                    OptionsOption::Back => OptionsOption::MusicToggle,
                };
            }
            MenuState::Game => {}
        }
    }

    pub fn prev_option(&mut self, menu: &mut Menu) {
        match menu.state {
            MenuState::MainMenu => {
                menu.selected_option = match menu.selected_option {
                    MenuOption::NewGame => MenuOption::Quit,
                    MenuOption::Options => MenuOption::NewGame,
                    MenuOption::Quit => MenuOption::Options,
                };
            }
            MenuState::Options => {
                menu.options_selected = match menu.options_selected {
                    OptionsOption::MusicToggle => OptionsOption::Back,
                    OptionsOption::SoundToggle => OptionsOption::MusicToggle,
                    OptionsOption::VolumeUp => OptionsOption::SoundToggle,
                    OptionsOption::VolumeDown => OptionsOption::VolumeUp,
                    OptionsOption::Back => OptionsOption::VolumeDown,
                };
            }
            MenuState::Game => {}
        }
    }

    /// Advances the glyph rain and cycles the title colors.
    pub fn update(&mut self) {
        let delta_seconds = self.last_update.elapsed().as_secs_f32();
        self.last_update = Instant::now();

        let (cycle_interval, spawn_interval, max_count) = {
            let config = CONFIG.read().unwrap();
            let renderer_config = &config.menu.renderer;
            (
                Duration::from_millis(renderer_config.title_color_cycle_interval_ms),
                Duration::from_millis(renderer_config.glyph_spawn_interval_ms),
                renderer_config.glyph_max_count,
            )
        };

        if self.color_change_time.elapsed() > cycle_interval && !self.title_colors.is_empty() {
            self.color_change_time = Instant::now();
            let first_color = self.title_colors.remove(0);
            self.title_colors.push(first_color);
        }

        if self.last_glyph_spawn.elapsed() > spawn_interval && self.rain.len() < max_count {
            self.last_glyph_spawn = Instant::now();
            self.rain.push(random_glyph(100, false));
        }

        for glyph in &mut self.rain {
            glyph.y += glyph.speed * delta_seconds;
        }
        self.rain.retain(|glyph| glyph.y < 120.0);
    }

    pub fn render_menu(f: &mut Frame, app: &App, menu: &Menu, renderer: &MenuRenderer) {
        let (menu_title_height, menu_option_width) = {
            let config = CONFIG.read().unwrap();
            let renderer_config = &config.menu.renderer;
            (
                renderer_config.menu_title_height,
                renderer_config.menu_option_width,
            )
        };

        let area = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(menu_title_height), Constraint::Min(0)])
            .split(area);

        // Rain first so the title and options draw on top of it
        render_glyph_rain(f, renderer, area, menu_option_width);

        render_ascii_title(f, chunks[0], &renderer.title_colors);

        match menu.state {
            MenuState::MainMenu => render_main_menu_options(f, chunks[1], menu),
            MenuState::Options => render_options_menu(f, chunks[1], menu, app),
            MenuState::Game => {}
        }
    }
}

/// Renders the falling background glyphs, skipping the title zone and the
/// column of menu options.
fn render_glyph_rain(f: &mut Frame, renderer: &MenuRenderer, area: Rect, option_width: u16) {
    let title_protection = get_title_protection_zone(area);
    let menu_area = Rect::new(
        area.width.saturating_sub(option_width) / 2,
        title_protection.height,
        option_width,
        10,
    );

    for glyph in &renderer.rain {
        let y = glyph.y as i32;
        if y < 0 {
            continue;
        }
        let y = y as u16;
        let x = glyph.x % area.width.max(1);

        if y < title_protection.height || y >= area.height {
            continue;
        }
        let cell = Rect::new(x, y, 2, 1);
        if overlaps(cell, menu_area) {
            continue;
        }

        let paragraph = Paragraph::new(glyph.glyph).style(Style::default().fg(Color::DarkGray));
        f.render_widget(paragraph, Rect::new(x, y, 2.min(area.width - x), 1));
    }
}

/// Helper function to check if two rectangles overlap
#[must_use]
pub fn overlaps(r1: Rect, r2: Rect) -> bool {
    r1.x < r2.x + r2.width
        && r1.x + r1.width > r2.x
        && r1.y < r2.y + r2.height
        && r1.y + r1.height > r2.y
}

/// Helper function to create a centered rectangle inside another rectangle
#[must_use]
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + r.width.saturating_sub(width) / 2;
    let y = r.y + r.height.saturating_sub(height) / 2;

    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
