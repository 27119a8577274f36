//! Game configuration.
//!
//! Every value is fixed at process start. A config file only has to mention the values it
//! overrides, everything else falls back to the defaults from [`crate::game::constants`].

use std::path::Path;
use log::info;
use serde::{Deserialize, Serialize};
use crate::error::GameError;
use crate::game::constants::*;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen: ScreenConfig,
    pub asteroid: AsteroidConfig,
    pub asteroid_field: AsteroidFieldConfig,
    pub player: PlayerConfig,
    pub shot: ShotConfig,
    pub session: SessionConfig
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Framebuffer width in pixels
    pub width: usize,
    /// Framebuffer height in pixels
    pub height: usize,
    /// Upper bound of frames per second, 0 disables the cap
    pub max_fps: u32
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidConfig {
    /// Radius of the smallest tier, bigger tiers are multiples of it
    pub min_radius: f32,
    /// Degrees
    pub split_angle_min: f32,
    /// Degrees
    pub split_angle_max: f32,
    pub split_speed_multiplier: f32
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidFieldConfig {
    /// Seconds between two spawns
    pub spawn_interval: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Max deviation from the inward direction in degrees
    pub direction_jitter: f32
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub radius: f32,
    /// Degrees per second
    pub turn_speed: f32,
    /// Pixels per second squared
    pub acceleration: f32,
    pub max_speed: f32,
    /// Fraction of the velocity lost per second while no thrust key is held
    pub drag: f32,
    /// Seconds between two shots
    pub fire_cool_down: f32
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotConfig {
    pub radius: f32,
    pub speed: f32,
    /// Seconds
    pub life_span: f32
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Quit as soon as an asteroid hits the player instead of offering a restart
    pub exit_on_game_over: bool,
    /// Fixed seed for the random generator, entropy is used when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            max_fps: MAX_FPS
        }
    }
}

impl Default for AsteroidConfig {
    fn default() -> Self {
        Self {
            min_radius: ASTEROID_MIN_RADIUS,
            split_angle_min: ASTEROID_SPLIT_ANGLE_MIN,
            split_angle_max: ASTEROID_SPLIT_ANGLE_MAX,
            split_speed_multiplier: ASTEROID_SPLIT_SPEED_MULTIPLIER
        }
    }
}

impl Default for AsteroidFieldConfig {
    fn default() -> Self {
        Self {
            spawn_interval: ASTEROID_SPAWN_INTERVAL,
            min_speed: ASTEROID_MIN_SPEED,
            max_speed: ASTEROID_MAX_SPEED,
            direction_jitter: ASTEROID_DIRECTION_JITTER
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            radius: PLAYER_RADIUS,
            turn_speed: PLAYER_TURN_SPEED,
            acceleration: PLAYER_ACCELERATION,
            max_speed: MAX_PLAYER_VELOCITY,
            drag: PLAYER_DRAG,
            fire_cool_down: PLAYER_FIRE_COOL_DOWN
        }
    }
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            radius: SHOT_RADIUS,
            speed: SHOT_VELOCITY,
            life_span: SHOT_LIFE_SPAN
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            exit_on_game_over: true,
            seed: None
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, GameError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, GameError> {
        Ok(toml::to_string(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|source| GameError::ConfigIo { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&content)
    }

    /// Same as [`GameConfig::load`], but a missing file is not an error
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config found at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let config = Self::load(path)?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        fn check(condition: bool, message: &str) -> Result<(), GameError> {
            if condition {
                Ok(())
            } else {
                Err(GameError::InvalidConfig(message.to_string()))
            }
        }

        fn check_finite(values: &[(&str, f32)]) -> Result<(), GameError> {
            match values.iter().find(|(_, value)| !value.is_finite()) {
                Some((name, _)) => Err(GameError::InvalidConfig(format!("{} must be a finite number", name))),
                None => Ok(())
            }
        }

        // spawn_interval may be infinite, it only turns the field off
        check_finite(&[
            ("asteroid.min_radius", self.asteroid.min_radius),
            ("asteroid.split_angle_min", self.asteroid.split_angle_min),
            ("asteroid.split_angle_max", self.asteroid.split_angle_max),
            ("asteroid.split_speed_multiplier", self.asteroid.split_speed_multiplier),
            ("asteroid_field.min_speed", self.asteroid_field.min_speed),
            ("asteroid_field.max_speed", self.asteroid_field.max_speed),
            ("asteroid_field.direction_jitter", self.asteroid_field.direction_jitter),
            ("player.radius", self.player.radius),
            ("player.turn_speed", self.player.turn_speed),
            ("player.acceleration", self.player.acceleration),
            ("player.max_speed", self.player.max_speed),
            ("player.drag", self.player.drag),
            ("player.fire_cool_down", self.player.fire_cool_down),
            ("shot.radius", self.shot.radius),
            ("shot.speed", self.shot.speed),
            ("shot.life_span", self.shot.life_span)
        ])?;

        check(self.screen.width > 0 && self.screen.height > 0, "screen size must not be zero")?;
        check(self.asteroid.min_radius > 0.0, "asteroid.min_radius must be positive")?;
        check(
            0.0 <= self.asteroid.split_angle_min &&
                self.asteroid.split_angle_min <= self.asteroid.split_angle_max &&
                self.asteroid.split_angle_max <= 180.0,
            "asteroid split angles must satisfy 0 <= split_angle_min <= split_angle_max <= 180"
        )?;
        check(self.asteroid.split_speed_multiplier >= 0.0, "asteroid.split_speed_multiplier must not be negative")?;
        check(self.asteroid_field.spawn_interval > 0.0, "asteroid_field.spawn_interval must be positive")?;
        check(
            0.0 <= self.asteroid_field.min_speed &&
                self.asteroid_field.min_speed <= self.asteroid_field.max_speed,
            "asteroid_field speeds must satisfy 0 <= min_speed <= max_speed"
        )?;
        check(
            (0.0..=180.0).contains(&self.asteroid_field.direction_jitter),
            "asteroid_field.direction_jitter must be within 0..=180"
        )?;
        check(self.player.radius > 0.0, "player.radius must be positive")?;
        check(self.player.turn_speed >= 0.0, "player.turn_speed must not be negative")?;
        check(self.player.acceleration >= 0.0, "player.acceleration must not be negative")?;
        check(self.player.max_speed >= 0.0, "player.max_speed must not be negative")?;
        check(self.player.drag >= 0.0, "player.drag must not be negative")?;
        check(self.player.fire_cool_down >= 0.0, "player.fire_cool_down must not be negative")?;
        check(self.shot.radius > 0.0, "shot.radius must be positive")?;
        check(self.shot.speed >= 0.0, "shot.speed must not be negative")?;
        check(self.shot.life_span > 0.0, "shot.life_span must be positive")?;
        Ok(())
    }
}
