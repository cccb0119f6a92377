use std::ops::Deref;

use bevy::prelude::*;

use blockcraft_core::config::GameplayConfig;
use blockcraft_core::level::LevelDescription;

/// Bevy Resource wrapper around the loaded gameplay configuration.
#[derive(Resource, Default, Clone)]
pub struct Settings(pub GameplayConfig);

impl Deref for Settings {
    type Target = GameplayConfig;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The level spawned at startup.
#[derive(Resource, Default, Clone)]
pub struct Level(pub LevelDescription);

impl Deref for Level {
    type Target = LevelDescription;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
