use bevy::prelude::*;

use crate::events::InventorySlotChangedEvent;
use crate::inventory::{INVENTORY_SLOTS, Inventory};

use super::HudCursor;
use super::slots::{SLOT_GAP, SLOT_SIZE, SlotFrame, spawn_slot};

const SLOTS_PER_ROW: usize = 5;
const CRAFT_GRID: usize = 3;

#[derive(Component)]
pub struct InventoryHud;

#[derive(Component)]
pub struct CraftMenuHud;

fn spawn_screen(commands: &mut Commands, title: &str) -> Entity {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            GlobalZIndex(10),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(title),
                TextFont {
                    font_size: 32.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    margin: UiRect::bottom(Val::Px(16.0)),
                    ..default()
                },
            ));
        })
        .id()
}

pub fn spawn_inventory_widget(commands: &mut Commands) -> Entity {
    let root = spawn_screen(commands, "Inventory");
    commands
        .entity(root)
        .insert(InventoryHud)
        .with_children(|parent| {
            for row_start in (0..INVENTORY_SLOTS).step_by(SLOTS_PER_ROW) {
                parent
                    .spawn(Node {
                        flex_direction: FlexDirection::Row,
                        column_gap: Val::Px(SLOT_GAP),
                        ..default()
                    })
                    .with_children(|row| {
                        for index in row_start..(row_start + SLOTS_PER_ROW).min(INVENTORY_SLOTS) {
                            spawn_slot(row, index, true);
                        }
                    });
            }
        });
    root
}

/// Crafting has no recipes; the menu only lays out an empty grid.
pub fn spawn_craft_menu_widget(commands: &mut Commands) -> Entity {
    let root = spawn_screen(commands, "Craft");
    commands
        .entity(root)
        .insert(CraftMenuHud)
        .with_children(|parent| {
            for _ in 0..CRAFT_GRID {
                parent
                    .spawn(Node {
                        flex_direction: FlexDirection::Row,
                        column_gap: Val::Px(SLOT_GAP),
                        ..default()
                    })
                    .with_children(|row| {
                        for _ in 0..CRAFT_GRID {
                            row.spawn((
                                Node {
                                    width: Val::Px(SLOT_SIZE),
                                    height: Val::Px(SLOT_SIZE),
                                    border: UiRect::all(Val::Px(2.0)),
                                    ..default()
                                },
                                BackgroundColor(Color::srgba(0.15, 0.15, 0.15, 0.8)),
                                BorderColor(Color::srgba(0.4, 0.4, 0.4, 0.8)),
                            ));
                        }
                    });
            }
        });
    root
}

/// Select a slot by clicking it, when the HUD accepts clicks.
pub fn click_inventory_slot(
    cursor: Res<HudCursor>,
    interactions: Query<(&Interaction, &SlotFrame), Changed<Interaction>>,
    mut inventory: ResMut<Inventory>,
    mut ev_changed: EventWriter<InventorySlotChangedEvent>,
) {
    if !cursor.enable_click_events {
        return;
    }
    for (interaction, frame) in &interactions {
        if *interaction != Interaction::Pressed || frame.0 == inventory.current_slot {
            continue;
        }
        let old_slot = inventory.current_slot;
        inventory.current_slot = frame.0;
        ev_changed.send(InventorySlotChangedEvent {
            old_slot,
            new_slot: frame.0,
        });
    }
}
