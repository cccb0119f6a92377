use std::f32::consts::PI;
use std::ops::{Deref, DerefMut};

use bevy::prelude::*;

use blockcraft_core::inventory::InventoryError;
use blockcraft_core::physics::{PLAYER_HALF_WIDTH, PLAYER_HEIGHT};
use blockcraft_core::wieldable::{Material, Tool, Wieldable};

use crate::events::{InventorySlotChangedEvent, ItemPickedUpEvent, ItemUsedEvent};
use crate::inventory::Inventory;
use crate::player::Player;
use crate::player::view_model::HeldItem;

/// One degree per frame at 60 fps.
const SPIN_SPEED: f32 = PI / 3.0;
const PICKUP_TRIGGER_HALF_EXTENTS: Vec3 = Vec3::new(0.5, 0.5, 0.5);

/// A tool lying in the level, collectible into the inventory.
#[derive(Component, Debug, Clone)]
pub struct WieldableItem(pub Wieldable);

impl Deref for WieldableItem {
    type Target = Wieldable;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for WieldableItem {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Box around the item that collects it when the player walks in.
#[derive(Component, Debug, Clone, Copy)]
pub struct PickupTrigger {
    pub half_extents: Vec3,
}

impl Default for PickupTrigger {
    fn default() -> Self {
        Self {
            half_extents: PICKUP_TRIGGER_HALF_EXTENTS,
        }
    }
}

pub struct WieldablePlugin;

impl Plugin for WieldablePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                spin_wieldables,
                pickup_on_overlap,
                on_used.after(pickup_on_overlap),
            ),
        );
    }
}

/// Mesh dimensions for each tool kind.
pub fn tool_mesh(tool: Tool) -> Cuboid {
    match tool {
        Tool::Unarmed => Cuboid::new(0.2, 0.2, 0.2),
        Tool::Pickaxe => Cuboid::new(0.6, 0.12, 0.12),
        Tool::Axe => Cuboid::new(0.3, 0.4, 0.1),
        Tool::Shovel => Cuboid::new(0.15, 0.6, 0.08),
        Tool::Sword => Cuboid::new(0.08, 0.8, 0.04),
    }
}

pub fn material_color(material: Material) -> Color {
    let [r, g, b, a] = material.color_rgba();
    Color::srgba(r, g, b, a)
}

pub fn spawn_wieldable(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    item: Wieldable,
    position: Vec3,
) -> Entity {
    let mesh = meshes.add(tool_mesh(item.tool));
    let material = materials.add(StandardMaterial {
        base_color: material_color(item.material),
        ..default()
    });

    commands
        .spawn((
            WieldableItem(item),
            PickupTrigger::default(),
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(position),
            Visibility::Visible,
        ))
        .id()
}

fn spin_wieldables(time: Res<Time>, mut query: Query<(&WieldableItem, &mut Transform)>) {
    let dt = time.delta_secs();
    for (item, mut transform) in &mut query {
        if item.active {
            transform.rotate_y(SPIN_SPEED * dt);
        }
    }
}

fn overlaps_player(player_feet: Vec3, center: Vec3, half_extents: Vec3) -> bool {
    let player_min = player_feet - Vec3::new(PLAYER_HALF_WIDTH, 0.0, PLAYER_HALF_WIDTH);
    let player_max = player_feet + Vec3::new(PLAYER_HALF_WIDTH, PLAYER_HEIGHT, PLAYER_HALF_WIDTH);
    let min = center - half_extents;
    let max = center + half_extents;
    player_min.cmple(max).all() && player_max.cmpge(min).all()
}

/// Collect any active item whose trigger the player stands in.
pub fn pickup_on_overlap(
    mut inventory: ResMut<Inventory>,
    player_query: Query<&Player>,
    mut items: Query<
        (
            Entity,
            &mut WieldableItem,
            &PickupTrigger,
            &Transform,
            &mut Visibility,
            Option<&Mesh3d>,
            Option<&MeshMaterial3d<StandardMaterial>>,
        ),
        Without<HeldItem>,
    >,
    mut held: Query<
        (
            &mut Mesh3d,
            &mut MeshMaterial3d<StandardMaterial>,
            &mut Visibility,
        ),
        (With<HeldItem>, Without<WieldableItem>),
    >,
    mut ev_picked: EventWriter<ItemPickedUpEvent>,
    mut ev_slot: EventWriter<InventorySlotChangedEvent>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };

    for (entity, mut item, trigger, transform, mut visibility, mesh, material) in &mut items {
        if !item.active || !overlaps_player(player.position, transform.translation, trigger.half_extents)
        {
            continue;
        }

        if let Ok((mut held_mesh, mut held_material, mut held_visibility)) = held.get_single_mut() {
            if let (Some(mesh), Some(material)) = (mesh, material) {
                held_mesh.0 = mesh.0.clone();
                held_material.0 = material.0.clone();
                *held_visibility = Visibility::Inherited;
            }
        }

        // A stored pickup becomes the selected item.
        let slot = match inventory.try_add(Some(entity)) {
            Ok(slot) => {
                let old_slot = inventory.current_slot;
                if slot != old_slot {
                    inventory.current_slot = slot;
                    ev_slot.send(InventorySlotChangedEvent {
                        old_slot,
                        new_slot: slot,
                    });
                }
                Some(slot)
            }
            Err(InventoryError::Full) => {
                warn!("inventory full, {:?} {:?} is lost", item.material, item.tool);
                None
            }
            Err(err) => {
                warn!("could not store {entity:?}: {err}");
                None
            }
        };

        item.pick_up();
        *visibility = Visibility::Hidden;

        ev_picked.send(ItemPickedUpEvent {
            item: entity,
            tool: item.tool,
            material: item.material,
            slot,
        });
    }
}

/// Destroy items that were used up.
pub fn on_used(mut commands: Commands, mut ev_used: EventReader<ItemUsedEvent>) {
    for event in ev_used.read() {
        if let Some(entity) = commands.get_entity(event.item) {
            entity.despawn_recursive();
        }
    }
}
