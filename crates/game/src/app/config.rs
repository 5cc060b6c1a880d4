use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use kart_engine::LoopConfig;
use serde::Deserialize;
use thiserror::Error;

pub(crate) const CONFIG_ENV_VAR: &str = "BLOB_KART_CONFIG";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config '{origin}' at {field}: {source}")]
    Parse {
        origin: String,
        field: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config value at {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    pub(crate) window: WindowConfig,
    pub(crate) race: RaceConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct WindowConfig {
    pub(crate) title: String,
    pub(crate) target_tps: u32,
    pub(crate) max_render_fps: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RaceConfig {
    /// The race ends on the tick a cart's lap count exceeds this.
    pub(crate) laps_to_finish: u32,
    pub(crate) countdown_seconds: u64,
    pub(crate) go_banner_seconds: u64,
    pub(crate) horizontal_inset: f32,
    pub(crate) speeds: SpeedConfig,
}

/// Displacement per simulation tick for each zone.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SpeedConfig {
    pub(crate) off_track: f32,
    pub(crate) on_track: f32,
    pub(crate) boost: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Blob Kart".to_string(),
            target_tps: 60,
            max_render_fps: Some(60),
        }
    }
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            laps_to_finish: 3,
            countdown_seconds: 4,
            go_banner_seconds: 2,
            horizontal_inset: 17.0,
            speeds: SpeedConfig::default(),
        }
    }
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            off_track: 0.35,
            on_track: 3.15,
            boost: 6.0,
        }
    }
}

impl GameConfig {
    /// Reads the file named by `BLOB_KART_CONFIG`, or returns defaults when it is unset.
    pub(crate) fn load_from_env() -> Result<(Self, Option<PathBuf>), ConfigError> {
        match env::var_os(CONFIG_ENV_VAR) {
            Some(raw) if !raw.is_empty() => {
                let path = PathBuf::from(raw);
                let config = Self::load_from_path(&path)?;
                Ok((config, Some(path)))
            }
            _ => Ok((Self::default(), None)),
        }
    }

    pub(crate) fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_json(&raw, &path.display().to_string())
    }

    pub(crate) fn parse_json(raw: &str, origin: &str) -> Result<Self, ConfigError> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        let config: GameConfig = serde_path_to_error::deserialize(&mut deserializer).map_err(
            |error| {
                let field = error.path().to_string();
                ConfigError::Parse {
                    origin: origin.to_string(),
                    field,
                    source: error.into_inner(),
                }
            },
        )?;
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.window.target_tps == 0 {
            return Err(invalid("window.target_tps", "must be at least 1"));
        }
        if self.race.countdown_seconds == 0 {
            return Err(invalid("race.countdown_seconds", "must be at least 1"));
        }
        if !self.race.horizontal_inset.is_finite() || self.race.horizontal_inset < 0.0 {
            return Err(invalid(
                "race.horizontal_inset",
                format!("expected a finite value >= 0, got {}", self.race.horizontal_inset),
            ));
        }
        let speeds = self.race.speeds;
        for (field, value) in [
            ("race.speeds.off_track", speeds.off_track),
            ("race.speeds.on_track", speeds.on_track),
            ("race.speeds.boost", speeds.boost),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(
                    field,
                    format!("expected a finite value > 0, got {value}"),
                ));
            }
        }
        Ok(())
    }

    pub(crate) fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            window_title: self.window.title.clone(),
            target_tps: self.window.target_tps,
            max_render_fps: self.window.max_render_fps,
            ..LoopConfig::default()
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
