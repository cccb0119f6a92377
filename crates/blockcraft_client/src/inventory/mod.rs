use std::ops::{Deref, DerefMut};

use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;

use blockcraft_core::inventory::Inventory as ProtocolInventory;

use crate::events::{InventorySlotChangedEvent, ItemUsedEvent};
use crate::player::{Character, FirstPersonCamera};
use crate::player::view_model::HeldItem;
use crate::wieldable::WieldableItem;

pub use blockcraft_core::inventory::INVENTORY_SLOTS;

/// Bevy Resource wrapper around the character's item slots.
#[derive(Resource, Default)]
pub struct Inventory(pub ProtocolInventory<Entity>);

impl Deref for Inventory {
    type Target = ProtocolInventory<Entity>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Inventory {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

pub struct InventoryPlugin;

impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Inventory>().add_systems(
            Update,
            (
                scroll_inventory_slot,
                use_current_item,
                prune_destroyed_items,
                sync_wielded_item,
            )
                .chain(),
        );
    }
}

/// Index of the selected slot.
pub fn get_current_inventory_slot(inventory: &Inventory) -> usize {
    inventory.current_slot
}

/// Thumbnail of the item stored in `slot`, if any.
pub fn get_thumbnail_at_inventory_slot<'a>(
    inventory: &Inventory,
    items: &'a Query<&WieldableItem>,
    slot: usize,
) -> Option<&'a str> {
    let entity = inventory.get(slot)?;
    items.get(entity).ok()?.thumbnail.as_deref()
}

fn scroll_inventory_slot(
    mut mouse_wheel: EventReader<MouseWheel>,
    keys: Res<ButtonInput<KeyCode>>,
    mut inventory: ResMut<Inventory>,
    mut ev_changed: EventWriter<InventorySlotChangedEvent>,
) {
    let old_slot = inventory.current_slot;

    for event in mouse_wheel.read() {
        if event.y > 0.0 {
            inventory.move_up_slot();
        } else if event.y < 0.0 {
            inventory.move_down_slot();
        }
    }

    let key_mappings = [
        (KeyCode::Digit1, 0),
        (KeyCode::Digit2, 1),
        (KeyCode::Digit3, 2),
        (KeyCode::Digit4, 3),
        (KeyCode::Digit5, 4),
        (KeyCode::Digit6, 5),
        (KeyCode::Digit7, 6),
        (KeyCode::Digit8, 7),
        (KeyCode::Digit9, 8),
        (KeyCode::Digit0, 9),
    ];

    for (key, slot) in key_mappings {
        if keys.just_pressed(key) {
            inventory.current_slot = slot;
        }
    }

    if inventory.current_slot != old_slot {
        ev_changed.send(InventorySlotChangedEvent {
            old_slot,
            new_slot: inventory.current_slot,
        });
    }
}

fn use_current_item(
    keys: Res<ButtonInput<KeyCode>>,
    inventory: Res<Inventory>,
    mut ev_used: EventWriter<ItemUsedEvent>,
) {
    if !keys.just_pressed(KeyCode::KeyQ) {
        return;
    }
    if let Some(item) = inventory.current_item() {
        ev_used.send(ItemUsedEvent { item });
    }
}

/// Drop references to items that were destroyed while stored.
fn prune_destroyed_items(mut inventory: ResMut<Inventory>, items: Query<(), With<WieldableItem>>) {
    let dangling = inventory
        .slots
        .iter()
        .flatten()
        .any(|entity| !items.contains(*entity));
    if dangling {
        let cleared = inventory.retain_alive(|entity| items.contains(entity));
        debug!("cleared {cleared} destroyed item(s) from inventory");
    }
}

/// Keep the wielded tool and the view-model mesh in step with the selected slot.
pub fn sync_wielded_item(
    inventory: Res<Inventory>,
    items: Query<(&WieldableItem, Option<&Mesh3d>, Option<&MeshMaterial3d<StandardMaterial>>)>,
    mut characters: Query<&mut Character, With<FirstPersonCamera>>,
    mut held: Query<
        (
            &mut Mesh3d,
            &mut MeshMaterial3d<StandardMaterial>,
            &mut Visibility,
        ),
        (With<HeldItem>, Without<WieldableItem>),
    >,
) {
    if !inventory.is_changed() {
        return;
    }

    let current = inventory
        .current_item()
        .and_then(|entity| items.get(entity).ok());

    for mut character in &mut characters {
        match current {
            Some((item, _, _)) => {
                character.set_tool(item.tool);
                character.set_material(item.material);
            }
            None => {
                character.set_tool(Default::default());
                character.set_material(Default::default());
            }
        }
    }

    let Ok((mut held_mesh, mut held_material, mut visibility)) = held.get_single_mut() else {
        return;
    };
    match current {
        Some((_, Some(mesh), Some(material))) => {
            held_mesh.0 = mesh.0.clone();
            held_material.0 = material.0.clone();
            *visibility = Visibility::Inherited;
        }
        _ => *visibility = Visibility::Hidden,
    }
}
