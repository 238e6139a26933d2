#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use std::error;

use crate::Time;
use crate::components::{
    Basket, GameState, Input, Particle, PenaltyFlash, Phase, ScreenShake, SlotOutcomes,
};
use crate::config::CONFIG;
use crate::menu::MenuRenderer;
use crate::menu_types::{Menu, MenuState};
use crate::sound::AudioState;
use crate::systems::spawn_slots;

pub type AppResult<T> = std::result::Result<T, Box<dyn error::Error>>;

pub struct App {
    pub world: World,
    pub should_quit: bool,
    pub menu: Menu,
    pub menu_renderer: MenuRenderer,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        let mut world = World::new();
        world.insert_resource(Time::new());

        let audio_config = CONFIG.read().unwrap().audio.clone();
        world.insert_resource(AudioState::from_config(&audio_config));

        world.insert_resource(Input::default());
        world.insert_resource(GameState::default());
        world.insert_resource(Basket::default());
        world.insert_resource(SlotOutcomes::default());
        world.insert_resource(ScreenShake::default());
        world.insert_resource(PenaltyFlash::default());

        let mut app = Self {
            world,
            should_quit: false,
            menu: Menu::new(),
            menu_renderer: MenuRenderer::new(),
        };

        // Build the level-1 slot pool
        spawn_slots(&mut app.world);

        app
    }

    /// Restarts the session: score, lives and level back to their starting
    /// values, fresh level-1 slot pool. The audio thread stays alive.
    pub fn reset(&mut self) {
        {
            let mut state = self.world.resource_mut::<GameState>();
            state.restart();
        }
        self.world.insert_resource(Basket::default());
        self.world.insert_resource(Input::default());
        self.world.insert_resource(SlotOutcomes::default());
        self.world.insert_resource(ScreenShake::default());
        self.world.insert_resource(PenaltyFlash::default());

        let leftovers: Vec<Entity> = self
            .world
            .query::<(Entity, &Particle)>()
            .iter(&self.world)
            .map(|(entity, _)| entity)
            .collect();
        for entity in leftovers {
            self.world.despawn(entity);
        }

        spawn_slots(&mut self.world);
    }

    /// Confirms a level-up pause: next level, bigger slot pool.
    pub fn advance_level(&mut self) {
        {
            let mut state = self.world.resource_mut::<GameState>();
            if state.phase != Phase::LevelUp {
                return;
            }
            state.advance_level();
        }
        self.world.insert_resource(Basket::default());
        spawn_slots(&mut self.world);
    }

    pub fn on_tick(&mut self) {
        if self.menu.state != MenuState::Game {
            self.menu_renderer.update();
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
