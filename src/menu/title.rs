#![warn(clippy::all, clippy::pedantic)]

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Text,
    widgets::Paragraph,
};

use super::renderer::centered_rect;
use crate::config::CONFIG;

// ASCII art letters for the "GENNA CATCH" title (space between the words)
pub const TITLE_LETTERS: [&str; 11] = [
    // G
    " ████\n█    \n█  ██\n█   █\n ███ ",
    // E
    "████\n█   \n███ \n█   \n████",
    // N
    "█  █\n██ █\n█ ██\n█  █\n█  █",
    // N
    "█  █\n██ █\n█ ██\n█  █\n█  █",
    // A
    " ██ \n█  █\n████\n█  █\n█  █",
    // space
    "  \n  \n  \n  \n  ",
    // C
    " ███\n█   \n█   \n█   \n ███",
    // A
    " ██ \n█  █\n████\n█  █\n█  █",
    // T
    "█████\n  █  \n  █  \n  █  \n  █  ",
    // C
    " ███\n█   \n█   \n█   \n ███",
    // H
    "█  █\n█  █\n████\n█  █\n█  █",
];

fn letter_width(letter: &str) -> u16 {
    letter
        .lines()
        .next()
        .map_or(0, |line| u16::try_from(line.chars().count()).unwrap_or(0))
}

fn title_width() -> u16 {
    // One blank column between letters
    let letters: u16 = TITLE_LETTERS.iter().map(|l| letter_width(l)).sum();
    letters + TITLE_LETTERS.len() as u16 - 1
}

/// Renders the ASCII art title with per-letter cycling colors
pub fn render_ascii_title(f: &mut Frame, area: Rect, colors: &[Color]) {
    // Check for configuration updates
    crate::config::Config::check_and_reload();

    let config = CONFIG.read().unwrap();
    let title_height = config.menu.title.title_height;

    let title_area = centered_rect(title_width(), title_height as u16, area);

    let mut current_x = title_area.x;
    for (i, letter) in TITLE_LETTERS.iter().enumerate() {
        let width = letter_width(letter);
        let letter_area = Rect::new(current_x, title_area.y, width, title_height as u16);

        let color_idx = i % colors.len().max(1);
        let style = Style::default().fg(colors.get(color_idx).copied().unwrap_or(Color::Green));

        let paragraph = Paragraph::new(Text::from((*letter).to_string())).style(style);
        f.render_widget(paragraph, letter_area);

        current_x += width + 1;
    }
}

/// Rows at the top of the screen the glyph rain must keep clear
pub fn get_title_protection_zone(area: Rect) -> Rect {
    let config = CONFIG.read().unwrap();
    let title_height = config.menu.title.title_height;
    let margin = config.menu.title.protection_margin;

    Rect::new(
        0,
        0,
        area.width,
        u16::try_from(title_height + margin).unwrap_or(u16::MAX),
    )
}
