use space::config::GameConfig;
use space::content;
use space::game::Game;
use space::platform::sdl::SdlPlatform;
use std::path::Path;

const CONFIG_FILE: &str = "space.json";

fn load_config() -> GameConfig {
    if !Path::new(CONFIG_FILE).exists() {
        return GameConfig::default();
    }

    match GameConfig::load_from_file(CONFIG_FILE) {
        Ok(config) => {
            log::info!("Loaded configuration from {}", CONFIG_FILE);
            config
        }
        Err(e) => {
            log::warn!("Ignoring {}: {}", CONFIG_FILE, e);
            GameConfig::default()
        }
    }
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config();
    let mut game = Game::initialize(config, SdlPlatform::init, content::load_data)
        .map_err(|e| e.to_string())?;

    game.run_loop();
    game.shutdown();

    Ok(())
}
