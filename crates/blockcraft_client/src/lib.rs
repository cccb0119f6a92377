pub mod block;
pub mod events;
pub mod hud;
pub mod interaction;
pub mod inventory;
pub mod player;
pub mod settings;
pub mod wieldable;
pub mod world;

use std::sync::Mutex;

use bevy::prelude::*;
use blockcraft_core::config::GameplayConfig;
use blockcraft_core::level::LevelDescription;

use events::EventsPlugin;
use settings::{Level, Settings};

/// The client plugin composes all gameplay functionality:
/// level, character, pickups, interaction and HUD.
pub struct ClientPlugin {
    config: GameplayConfig,
    level: LevelDescription,
    event_plugins: Mutex<Vec<Box<dyn events::BlockcraftPlugin>>>,
}

impl ClientPlugin {
    pub fn new(config: GameplayConfig, level: LevelDescription) -> Self {
        Self {
            config,
            level,
            event_plugins: Mutex::new(Vec::new()),
        }
    }

    pub fn with_plugin(self, plugin: impl events::BlockcraftPlugin) -> Self {
        if let Ok(mut plugins) = self.event_plugins.lock() {
            plugins.push(Box::new(plugin));
        }
        self
    }
}

impl Plugin for ClientPlugin {
    fn build(&self, app: &mut App) {
        let event_plugins = match self.event_plugins.lock() {
            Ok(mut plugins) => plugins.drain(..).collect(),
            Err(_) => Vec::new(),
        };

        app.insert_resource(Settings(self.config.clone()))
            .insert_resource(Level(self.level.clone()))
            .add_plugins(EventsPlugin::new_with(event_plugins))
            .add_plugins(world::WorldPlugin)
            .add_plugins(block::BlockPlugin)
            .add_plugins(wieldable::WieldablePlugin)
            .add_plugins(inventory::InventoryPlugin)
            .add_plugins(player::PlayerPlugin)
            .add_plugins(interaction::InteractionPlugin)
            .add_plugins(hud::HudPlugin);
    }
}
