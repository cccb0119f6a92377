use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hud::HudClasses;
use crate::interaction::HIT_ANIM_INTERVAL;
use crate::raycast::DEFAULT_REACH;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    /// Length of the block-targeting ray, in world units.
    pub reach: f32,
    /// Degrees per second at full stick deflection.
    pub base_turn_rate: f32,
    pub base_look_up_rate: f32,
    /// Radians per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    pub walk_speed: f32,
    pub hit_anim_interval: f32,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            reach: DEFAULT_REACH,
            base_turn_rate: 45.0,
            base_look_up_rate: 45.0,
            mouse_sensitivity: 0.003,
            walk_speed: 6.0,
            hit_anim_interval: HIT_ANIM_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HudConfig {
    /// Stop each HUD state at its own widget instead of falling through to the in-game HUD.
    pub strict_state_switch: bool,
    pub classes: HudClasses,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameplayConfig {
    pub character: CharacterConfig,
    pub hud: HudConfig,
}

impl GameplayConfig {
    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        parse_toml(contents, path)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        load_toml(path)
    }
}

pub(crate) fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_toml(&contents, path)
}

pub(crate) fn parse_toml<T: DeserializeOwned>(contents: &str, path: &Path) -> Result<T, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
