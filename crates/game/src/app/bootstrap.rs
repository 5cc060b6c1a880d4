use kart_engine::{LoopConfig, Scene};
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::config::{ConfigError, GameConfig};
use super::race::SystemClock;
use super::race_scene::RaceScene;

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

pub(crate) fn build_app() -> Result<AppWiring, ConfigError> {
    init_tracing();
    info!(version = env!("CARGO_PKG_VERSION"), "startup");

    let (game_config, source) = GameConfig::load_from_env()?;
    match source {
        Some(path) => info!(path = %path.display(), "config_loaded"),
        None => info!("config_defaults"),
    }

    let scene = RaceScene::with_entropy(&game_config, SystemClock::new());
    Ok(AppWiring {
        config: game_config.loop_config(),
        scene: Box::new(scene),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
