use std::path::Path;
use retro_asteroids::config::GameConfig;

#[test]
fn shipped_config_matches_the_defaults() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("asteroids.toml");
    let config = GameConfig::load(&path).unwrap();
    assert_eq!(config, GameConfig::default());
}
