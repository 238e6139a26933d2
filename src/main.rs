#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};

use gennacatch::Time;
use gennacatch::app::{App, AppResult};
use gennacatch::components::{GameState, Input, Phase};
use gennacatch::menu_types::{MenuOption, MenuState, OptionsOption};
use gennacatch::sound::{AudioState, SoundEffect};
use gennacatch::{config, systems, ui};

fn main() -> AppResult<()> {
    // Create log file and redirect stderr to it so the TUI stays clean
    let log_path = "gennacatch.log";
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
        .expect("Failed to create log file");

    let stderr_handle = std::io::stderr();
    let stderr_fd = stderr_handle.as_raw_fd();
    let log_file_fd = log_file.as_raw_fd();

    // Safety: We're redirecting stderr to our log file using standard POSIX operations
    unsafe {
        libc::dup2(log_file_fd, stderr_fd);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting Genna Catch");

    // Initialize configuration system
    match config::loader::load_config_from_file() {
        Ok(loaded) => {
            *config::CONFIG.write().unwrap() = loaded;
            info!("Configuration loaded successfully");
        }
        Err(e) => {
            // Continue with default configuration
            error!("Failed to load configuration: {e:?}");
        }
    }

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(33); // ~30 FPS
    let game_tick_rate = Duration::from_millis(50); // Game logic updates less often

    let app = App::new();
    let res = run_app(&mut terminal, app, tick_rate, game_tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Game error: {err:?}");
    }

    Ok(())
}

#[allow(clippy::too_many_lines)]
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    tick_rate: Duration,
    game_tick_rate: Duration,
) -> AppResult<()> {
    let mut last_render = Instant::now();
    let mut last_game_tick = Instant::now();

    // Flush any pending input events that might be in the buffer
    while crossterm::event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    debug!("Resources initialized");

    // Warn about a missing audio device only once
    let mut audio_error_logged = false;

    loop {
        // Draw the UI
        if last_render.elapsed() >= tick_rate {
            terminal.draw(|f| ui::render(f, &mut app))?;
            last_render = Instant::now();
        }

        // Run the game logic tick
        if last_game_tick.elapsed() >= game_tick_rate {
            let delta_seconds = last_game_tick.elapsed().as_secs_f32();
            last_game_tick = Instant::now();

            {
                let mut time = app.world.resource_mut::<Time>();
                time.update();
            }

            let audio_unavailable = {
                let audio_state = app.world.resource::<AudioState>();
                !audio_state.is_audio_available()
            };
            if audio_unavailable && !audio_error_logged {
                error!("Audio device is unavailable. Continuing without sound.");
                audio_error_logged = true;
            }

            if app.should_quit {
                return Ok(());
            }

            if app.menu.state == MenuState::Game {
                systems::input_system(&mut app.world);
                systems::game_tick_system(&mut app.world, delta_seconds);
            }

            app.on_tick();
        }

        // Process keyboard input
        if crossterm::event::poll(Duration::from_millis(5))? {
            if let Event::Key(key) = event::read()? {
                debug!("Key event: {key:?}");

                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                // Allow quitting with 'q' regardless of game state
                if key.code == KeyCode::Char('q') {
                    app.should_quit = true;
                    continue;
                }

                // Audio control keys work everywhere
                match key.code {
                    KeyCode::Char('m') => {
                        if let Some(mut audio_state) = app.world.get_resource_mut::<AudioState>() {
                            audio_state.toggle_music();
                        }
                        continue;
                    }
                    KeyCode::Char('+' | '=') => {
                        if let Some(mut audio_state) = app.world.get_resource_mut::<AudioState>() {
                            let volume = audio_state.get_volume();
                            audio_state.set_volume((volume + 0.1).min(1.0));
                        }
                        continue;
                    }
                    KeyCode::Char('-' | '_') => {
                        if let Some(mut audio_state) = app.world.get_resource_mut::<AudioState>() {
                            let volume = audio_state.get_volume();
                            audio_state.set_volume((volume - 0.1).max(0.0));
                        }
                        continue;
                    }
                    _ => {}
                }

                // Menu navigation when not in game
                if app.menu.state != MenuState::Game {
                    match key.code {
                        KeyCode::Up | KeyCode::Char('w') => {
                            app.menu_renderer.prev_option(&mut app.menu);
                            if let Some(audio_state) = app.world.get_resource::<AudioState>() {
                                audio_state.play_sound(SoundEffect::MenuMove);
                            }
                        }
                        KeyCode::Down | KeyCode::Char('s') => {
                            app.menu_renderer.next_option(&mut app.menu);
                            if let Some(audio_state) = app.world.get_resource::<AudioState>() {
                                audio_state.play_sound(SoundEffect::MenuMove);
                            }
                        }
                        KeyCode::Enter | KeyCode::Char(' ') => {
                            if app.menu.state == MenuState::MainMenu {
                                match app.menu.selected_option.clone() {
                                    MenuOption::NewGame => {
                                        app.menu.state = MenuState::Game;
                                        app.reset();
                                    }
                                    MenuOption::Options => {
                                        app.menu.state = MenuState::Options;
                                    }
                                    MenuOption::Quit => app.should_quit = true,
                                }
                            } else if app.menu.state == MenuState::Options {
                                match app.menu.options_selected.clone() {
                                    OptionsOption::MusicToggle => {
                                        if let Some(mut audio_state) =
                                            app.world.get_resource_mut::<AudioState>()
                                        {
                                            audio_state.toggle_music();
                                        }
                                    }
                                    OptionsOption::SoundToggle => {
                                        if let Some(mut audio_state) =
                                            app.world.get_resource_mut::<AudioState>()
                                        {
                                            audio_state.toggle_sound();
                                        }
                                    }
                                    OptionsOption::VolumeUp => {
                                        if let Some(mut audio_state) =
                                            app.world.get_resource_mut::<AudioState>()
                                        {
                                            let volume = audio_state.get_volume();
                                            audio_state.set_volume((volume + 0.1).min(1.0));
                                        }
                                    }
                                    OptionsOption::VolumeDown => {
                                        if let Some(mut audio_state) =
                                            app.world.get_resource_mut::<AudioState>()
                                        {
                                            let volume = audio_state.get_volume();
                                            audio_state.set_volume((volume - 0.1).max(0.0));
                                        }
                                    }
                                    OptionsOption::Back => {
                                        app.menu.state = MenuState::MainMenu;
                                    }
                                }
                            }
                        }
                        KeyCode::Esc => {
                            if app.menu.state == MenuState::Options {
                                app.menu.state = MenuState::MainMenu;
                            }
                        }
                        _ => {}
                    }
                    continue;
                }

                // In-game keys depend on the current phase
                let phase = app.world.resource::<GameState>().phase;
                match phase {
                    Phase::LevelUp => {
                        if key.code == KeyCode::Enter {
                            app.advance_level();
                        }
                    }
                    Phase::GameOver | Phase::Win => match key.code {
                        KeyCode::Enter => app.reset(),
                        KeyCode::Esc => {
                            app.menu.state = MenuState::MainMenu;
                            app.reset();
                        }
                        _ => {}
                    },
                    Phase::Playing | Phase::Paused => match key.code {
                        KeyCode::Char('p') => {
                            let mut game_state = app.world.resource_mut::<GameState>();
                            game_state.toggle_pause();
                        }
                        KeyCode::Esc => {
                            app.menu.state = MenuState::MainMenu;
                        }
                        KeyCode::Left | KeyCode::Char('a') => {
                            let mut input = app.world.resource_mut::<Input>();
                            input.left = true;
                            input.right = false;
                        }
                        KeyCode::Right | KeyCode::Char('d') => {
                            let mut input = app.world.resource_mut::<Input>();
                            input.right = true;
                            input.left = false;
                        }
                        KeyCode::Char(c @ '1'..='9') => {
                            let mut input = app.world.resource_mut::<Input>();
                            input.tap_slot = Some(c as usize - '1' as usize);
                        }
                        _ => {}
                    },
                }
            }
        }
    }
}
