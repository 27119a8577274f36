use log::{error, info};
use retro_asteroids::config::GameConfig;
use retro_asteroids::game::AsteroidGame;
use retro_asteroids::window;

const DEFAULT_CONFIG_PATH: &str = "asteroids.toml";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = match GameConfig::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Starting a {}x{} field, max {} fps",
        config.screen.width,
        config.screen.height,
        config.screen.max_fps
    );
    window::start(AsteroidGame::new(config));
}
