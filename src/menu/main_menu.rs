#![warn(clippy::all, clippy::pedantic)]

use crate::menu_types::{Menu, MenuOption};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};

/// Renders the main menu options
pub fn render_main_menu_options(f: &mut Frame, area: Rect, menu: &Menu) {
    let selected = match menu.selected_option {
        MenuOption::NewGame => 0,
        MenuOption::Options => 1,
        MenuOption::Quit => 2,
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "Catch the falling Genna gifts in your agelgil!",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];
    for (i, option) in ["New Game", "Options", "Quit"].iter().enumerate() {
        let style = if i == selected {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled((*option).to_string(), style)));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
