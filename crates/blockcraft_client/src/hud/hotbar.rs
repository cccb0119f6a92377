use bevy::prelude::*;

use crate::inventory::INVENTORY_SLOTS;

use super::slots::{SLOT_GAP, spawn_slot};

/// Root of the in-game HUD: crosshair plus the slot bar.
#[derive(Component)]
pub struct IngameHud;

pub fn spawn_ingame_widget(commands: &mut Commands) -> Entity {
    commands
        .spawn((
            IngameHud,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn((
                Node {
                    width: Val::Px(4.0),
                    height: Val::Px(4.0),
                    ..default()
                },
                BackgroundColor(Color::WHITE),
            ));

            parent
                .spawn(Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(10.0),
                    width: Val::Percent(100.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    column_gap: Val::Px(SLOT_GAP),
                    ..default()
                })
                .with_children(|bar| {
                    for index in 0..INVENTORY_SLOTS {
                        spawn_slot(bar, index, false);
                    }
                });
        })
        .id()
}
