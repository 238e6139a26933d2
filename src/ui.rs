#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation/precision loss when mapping playfield coordinates onto terminal cells
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use crate::app::App;
use crate::components::{
    Basket, FallingItem, GameState, Particle, PenaltyFlash, Phase, ScreenShake,
};
use crate::game::{BASKET_SPAN, COMBO_STREAK, FIELD_COLUMNS, LEVELS, MAX_LIVES};
use crate::menu::MenuRenderer;
use crate::menu_types::MenuState;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const MIN_WIDTH: u16 = FIELD_COLUMNS + 4;
const MIN_HEIGHT: u16 = 20;

const BASKET_GLYPHS: &str = "╲▁▁▁▁▁╱"; // BASKET_SPAN characters wide

pub fn render(f: &mut Frame, app: &mut App) {
    if app.menu.state != MenuState::Game {
        let menu = app.menu.clone();
        MenuRenderer::render_menu(f, app, &menu, &app.menu_renderer);
        return;
    }

    if f.area().width < MIN_WIDTH || f.area().height < MIN_HEIGHT {
        let warning = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Genna Catch - Paused"),
        );
        let warning_area = centered_rect(50, 30, f.area());
        f.render_widget(warning, warning_area);
        return;
    }

    // Snapshot the falling items and particles before borrowing resources
    let items: Vec<FallingItem> = app
        .world
        .query::<&FallingItem>()
        .iter(&app.world)
        .copied()
        .collect();
    let particles: Vec<Particle> = app
        .world
        .query::<&Particle>()
        .iter(&app.world)
        .cloned()
        .collect();

    let shake_offset = app.world.resource::<ScreenShake>().offset;
    let flash_visible = app.world.resource::<PenaltyFlash>().is_visible();
    let basket_x = app.world.resource::<Basket>().x;
    let state = app.world.resource::<GameState>().clone();

    // Apply the horizontal penalty shake to the whole frame, keeping the
    // shifted area inside the buffer
    let original_area = f.area();
    let shake_x = (i32::from(original_area.x) + i32::from(shake_offset)).max(0) as u16;
    let shake_area = Rect {
        x: shake_x,
        y: original_area.y,
        width: original_area.width.saturating_sub(shake_x),
        height: original_area.height,
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Fill(1),   // Playfield
            Constraint::Length(1), // Controls hint
        ])
        .split(shake_area);

    render_header(f, &state, layout[0]);
    render_playfield(f, &state, &items, &particles, basket_x, flash_visible, layout[1]);

    let hints = Paragraph::new("←/→ move · 1-8 tap · p pause · m music · q quit")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(hints, layout[2]);

    match state.phase {
        Phase::Paused => render_paused_overlay(f, shake_area),
        Phase::LevelUp => render_level_up_overlay(f, &state, shake_area),
        Phase::GameOver => render_game_over_overlay(f, &state, shake_area),
        Phase::Win => render_win_overlay(f, &state, shake_area),
        Phase::Playing => {}
    }
}

fn render_header(f: &mut Frame, state: &GameState, area: Rect) {
    let level = state.current_level();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(area);

    let level_info = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("LEVEL {}", level.number),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            level.name,
            Style::default()
                .fg(level.accent)
                .add_modifier(Modifier::BOLD),
        )),
    ]);
    f.render_widget(level_info, columns[0]);

    let multiplier = state.combo / COMBO_STREAK + 1;
    let mut score_lines = vec![Line::from(vec![
        Span::styled(
            format!("SCORE {}", state.score),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" / {}", level.target_score),
            Style::default().fg(Color::DarkGray),
        ),
    ])];
    if state.combo > 1 {
        score_lines.push(Line::from(Span::styled(
            format!("{}x COMBO (x{multiplier})", state.combo),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    }
    let score_info = Paragraph::new(score_lines).alignment(Alignment::Center);
    f.render_widget(score_info, columns[1]);

    // Hearts, plus indicators for active power-up state
    let mut hearts = String::new();
    for i in 0..MAX_LIVES {
        hearts.push(if i < state.lives { '♥' } else { '♡' });
        hearts.push(' ');
    }
    let mut status_lines = vec![Line::from(Span::styled(
        hearts,
        Style::default().fg(Color::Red),
    ))];
    let mut powerups = String::new();
    if state.shielded {
        powerups.push_str("🛡 ");
    }
    if state.is_slow_motion(std::time::Instant::now()) {
        powerups.push_str("☕ ");
    }
    if !powerups.is_empty() {
        status_lines.push(Line::from(Span::styled(
            powerups,
            Style::default().fg(Color::LightBlue),
        )));
    }
    let status = Paragraph::new(status_lines).alignment(Alignment::Right);
    f.render_widget(status, columns[2]);
}

fn render_playfield(
    f: &mut Frame,
    state: &GameState,
    items: &[FallingItem],
    particles: &[Particle],
    basket_x: f32,
    flash_visible: bool,
    area: Rect,
) {
    let level = state.current_level();

    // Flash the border red for a moment after a penalty
    let border_style = if flash_visible {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(level.accent)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width < FIELD_COLUMNS || inner.height < 4 {
        return;
    }

    // Center the logical playfield inside the bordered area
    let field_x = inner.x + (inner.width - FIELD_COLUMNS) / 2;
    let basket_row = inner.bottom() - 1;
    let fall_rows = inner.height - 1; // rows above the basket

    for item in items {
        if !item.started() {
            continue;
        }
        let row =
            inner.y + ((item.progress() * f32::from(fall_rows - 1)) as u16).min(fall_rows - 1);
        let col = field_x + item.column.min(FIELD_COLUMNS - 1);

        if let Some(cell) = f.buffer_mut().cell_mut((col, row)) {
            cell.set_symbol(item.item.glyph);
        }

        // Lane digit so the player knows which key taps this item
        let digit = char::from_digit(item.lane as u32 + 1, 10).unwrap_or('?');
        if col + 2 < inner.right() {
            if let Some(cell) = f.buffer_mut().cell_mut((col + 2, row)) {
                cell.set_char(digit);
                cell.set_fg(Color::DarkGray);
            }
        }
    }

    render_basket(f, state, field_x, basket_x, basket_row);
    render_particles(f, particles, field_x, inner);
}

fn render_basket(f: &mut Frame, state: &GameState, field_x: u16, basket_x: f32, row: u16) {
    debug_assert_eq!(BASKET_GLYPHS.chars().count(), BASKET_SPAN as usize);

    let basket_col = field_x + (basket_x as u16).min(FIELD_COLUMNS - BASKET_SPAN);
    let style = if state.shielded {
        Style::default()
            .fg(Color::LightBlue)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Rgb(0x92, 0x40, 0x0e))
    };

    for (i, glyph) in BASKET_GLYPHS.chars().enumerate() {
        if let Some(cell) = f.buffer_mut().cell_mut((basket_col + i as u16, row)) {
            cell.set_char(glyph);
            cell.set_style(style);
        }
    }
}

fn render_particles(f: &mut Frame, particles: &[Particle], field_x: u16, inner: Rect) {
    for particle in particles {
        if particle.x < 0.0 || particle.x >= f32::from(FIELD_COLUMNS) {
            continue;
        }
        let col = field_x + particle.x as u16;
        let row = inner.y + ((particle.y.clamp(0.0, 1.0)) * f32::from(inner.height - 1)) as u16;
        if col < inner.right() && row < inner.bottom() {
            if let Some(cell) = f.buffer_mut().cell_mut((col, row)) {
                cell.set_char(particle.glyph);
                cell.set_fg(particle.color);
            }
        }
    }
}

fn render_paused_overlay(f: &mut Frame, area: Rect) {
    let popup = centered_rect(40, 20, area);
    f.render_widget(Clear, popup);
    let text = Paragraph::new("PAUSED\n\nPress p to resume")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(text, popup);
}

fn render_level_up_overlay(f: &mut Frame, state: &GameState, area: Rect) {
    let level = state.current_level();
    let next = &LEVELS[state.level_index + 1];

    let popup = centered_rect(60, 50, area);
    f.render_widget(Clear, popup);
    let lines = vec![
        Line::from(Span::styled(
            format!("LEVEL {} COMPLETE!", level.number),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Reward: {}", level.reward)),
        Line::from(""),
        Line::from(Span::styled(
            format!("Next: {}", next.name),
            Style::default().fg(next.accent),
        )),
        Line::from(next.description),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to continue",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let text = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("🎁"))
        .wrap(Wrap { trim: true });
    f.render_widget(text, popup);
}

fn render_game_over_overlay(f: &mut Frame, state: &GameState, area: Rect) {
    let popup = centered_rect(60, 40, area);
    f.render_widget(Clear, popup);
    let lines = vec![
        Line::from(Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Final Score: {}", state.score)),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to try again · Esc for menu",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let text = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title("🕯️"),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(text, popup);
}

fn render_win_overlay(f: &mut Frame, state: &GameState, area: Rect) {
    let popup = centered_rect(60, 50, area);
    f.render_widget(Clear, popup);
    let lines = vec![
        Line::from(Span::styled(
            "MELKAM GENNA!",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("You celebrated every level of the holiday!"),
        Line::from(""),
        Line::from(format!("Final Score: {}", state.score)),
        Line::from(format!("Max Combo: {}", state.max_combo)),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to play again · Esc for menu",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let text = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title("✨ 🎄 ✨"),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(text, popup);
}

/// Helper function to create a centered rect using up certain percentage of the available rect
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
