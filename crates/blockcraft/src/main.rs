use std::path::{Path, PathBuf};

use bevy::prelude::*;
use clap::Parser;
use blockcraft_macros::craft_plugin;

use blockcraft_client::events;
use blockcraft_core::config::{ConfigError, GameplayConfig};
use blockcraft_core::level::LevelDescription;

#[derive(Parser)]
#[command(name = "blockcraft")]
#[command(about = "Blockcraft: first-person block breaking sandbox")]
struct Args {
    /// Gameplay configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Level description file (TOML); the built-in level is used when omitted
    #[arg(long)]
    level: Option<PathBuf>,

    /// Give every HUD state its own widget instead of falling through to the in-game HUD
    #[arg(long)]
    strict_hud: bool,
}

struct LogPlugin;

#[craft_plugin]
impl LogPlugin {
    #[Event::BlockBroken]
    fn on_block_broken(&self, event: &events::BlockBrokenEvent) {
        info!(
            "Block at ({}, {}, {}) broken (resistance {:.0})",
            event.cell.x, event.cell.y, event.cell.z, event.resistance
        );
    }

    #[Event::ItemPickedUp]
    fn on_item_picked_up(&self, event: &events::ItemPickedUpEvent) {
        match event.slot {
            Some(slot) => info!(
                "Picked up {:?} {:?} into slot {}",
                event.material, event.tool, slot
            ),
            None => info!(
                "Picked up {:?} {:?} with a full inventory",
                event.material, event.tool
            ),
        }
    }

    #[Event::InventorySlotChanged]
    fn on_slot_changed(&self, event: &events::InventorySlotChangedEvent) {
        info!("Inventory slot {} -> {}", event.old_slot, event.new_slot);
    }

    #[Event::HudStateChanged]
    fn on_hud_changed(&self, event: &events::HudStateChangedEvent) {
        info!("HUD state {:?} -> {:?}", event.old_state, event.new_state);
    }
}

fn load_or_default<T: Default>(
    path: Option<&Path>,
    what: &str,
    load: impl FnOnce(&Path) -> Result<T, ConfigError>,
) -> T {
    let Some(path) = path else {
        return T::default();
    };
    match load(path) {
        Ok(value) => {
            info!("Loaded {what} from {}", path.display());
            value
        }
        Err(err) => {
            warn!("{err}; using the default {what}");
            T::default()
        }
    }
}

fn main() {
    let args = Args::parse();

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Blockcraft".into(),
            ..default()
        }),
        ..default()
    }));

    let mut config = load_or_default(args.config.as_deref(), "configuration", GameplayConfig::load);
    if args.strict_hud {
        config.hud.strict_state_switch = true;
    }
    let level = load_or_default(args.level.as_deref(), "level", LevelDescription::load);

    app.add_plugins(blockcraft_client::ClientPlugin::new(config, level).with_plugin(LogPlugin));
    app.add_systems(Startup, setup_lighting);
    app.run();
}

fn setup_lighting(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 15000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.9, 0.3, 0.0)),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 200.0,
    });
}
