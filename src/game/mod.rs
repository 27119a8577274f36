use glam::vec2;
use hecs::Entity;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use crate::config::GameConfig;
use crate::game::asteroid_field::AsteroidField;
use crate::game::components::{AsteroidTier, SpatialHandle};
use crate::game::constants::*;
use crate::game::pools::Pools;
use crate::rendering::fonts::vector_font::VectorFont;
use crate::window::{ContextHandler, KeyCode, KeyMods, RetroBlitContext};

pub mod asteroid_field;
pub mod components;
pub mod constants;
pub mod pools;
mod subsystems;

/// What the gameplay step reports back to the loop
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    GameOver
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    Running,
    GameOver
}

pub struct AsteroidGame {
    pub config: GameConfig,
    pub ecs_world: hecs::World,
    pub pools: Pools,
    pub spatial_map: flat_spatial::DenseGrid<Entity>,
    pub bump_allocator: bumpalo::Bump,
    pub asteroid_field: AsteroidField,
    pub player_entity: Option<Entity>,
    pub font: VectorFont,
    rng: StdRng,
    paused: bool,
    session_state: SessionState,
    score: u32,
    frames_rendered: u64
}

impl ContextHandler for AsteroidGame {
    fn get_window_title(&self) -> &'static str { "retro asteroids" }

    fn get_buffer_dimensions(&self) -> (usize, usize) {
        (self.config.screen.width, self.config.screen.height)
    }

    fn get_max_fps(&self) -> u32 { self.config.screen.max_fps }

    fn init(&mut self, ctx: &mut RetroBlitContext) {
        for (idx, &palette_color) in PALETTE.iter().enumerate() {
            ctx.set_palette(idx as u8, palette_color);
        }

        self.start_new_session();
    }

    fn on_key_down(&mut self, ctx: &mut RetroBlitContext, key_code: KeyCode, _key_mods: KeyMods) {
        match key_code {
            KeyCode::Escape => {
                info!("Quit requested");
                ctx.request_quit();
            },
            KeyCode::P => {
                if self.session_state == SessionState::Running {
                    self.paused = !self.paused;
                    info!("{}", if self.paused { "Paused" } else { "Resumed" });
                }
            },
            KeyCode::Enter => {
                if self.session_state == SessionState::GameOver {
                    self.start_new_session();
                }
            },
            _ => ()
        }
    }

    fn update(&mut self, ctx: &mut RetroBlitContext, dt: f32) {
        if self.is_simulating() && self.step(ctx, dt) == FrameOutcome::GameOver {
            self.finish_session(ctx);
        }

        self.render(ctx);
    }
}

impl AsteroidGame {
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.session.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy()
        };
        Self {
            config,
            ecs_world: hecs::World::new(),
            pools: Pools::default(),
            spatial_map: flat_spatial::DenseGrid::new(SPATIAL_CELL_SIZE),
            bump_allocator: bumpalo::Bump::new(),
            asteroid_field: AsteroidField::default(),
            player_entity: None,
            font: VectorFont::new(FONT_SCALE),
            rng,
            paused: false,
            session_state: SessionState::Running,
            score: 0,
            frames_rendered: 0
        }
    }

    /// One gameplay step: everything alive moves, then collisions get resolved.
    pub fn step(&mut self, ctx: &RetroBlitContext, dt: f32) -> FrameOutcome {
        self.bump_allocator.reset();

        self.update_object_positions(dt);
        self.update_space_partitioning();
        self.update_life_spans(dt);
        self.update_fire_cool_downs(dt);
        self.update_player_controls(ctx, dt);
        self.update_player_fire(ctx);
        self.update_asteroid_field(dt);

        self.update_shot_collisions();
        self.update_player_collisions()
    }

    pub fn start_new_session(&mut self) {
        self.ecs_world.clear();
        self.pools.clear();
        self.spatial_map = flat_spatial::DenseGrid::new(SPATIAL_CELL_SIZE);
        self.asteroid_field.reset();
        self.player_entity = None;
        self.paused = false;
        self.session_state = SessionState::Running;
        self.score = 0;

        let center = vec2(
            self.config.screen.width as f32 / 2.0,
            self.config.screen.height as f32 / 2.0
        );
        self.spawn_player(center);
        info!("New session started");
    }

    fn finish_session(&mut self, ctx: &mut RetroBlitContext) {
        self.session_state = SessionState::GameOver;
        info!("Game over! Score: {}", self.score);
        if self.config.session.exit_on_game_over {
            ctx.request_quit();
        }
    }

    /// Removes the entity from every pool and from the spatial map, then despawns it
    pub fn kill_entity(&mut self, entity: Entity) {
        self.pools.unregister_all(entity);
        if let Ok(spatial_handle) = self.ecs_world.get::<SpatialHandle>(entity).map(|it| *it) {
            self.spatial_map.remove(spatial_handle.handle);
        }
        if self.player_entity == Some(entity) {
            self.player_entity = None;
        }
        let _ = self.ecs_world.despawn(entity);
    }

    pub fn is_simulating(&self) -> bool {
        !self.paused && self.session_state == SessionState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    fn largest_asteroid_radius(&self) -> f32 {
        AsteroidTier::Large.radius(self.config.asteroid.min_radius)
    }
}
