use bevy::prelude::*;

use blockcraft_core::hud::HudState;
use blockcraft_core::wieldable::{Material, Tool};

// --- Events ---

#[derive(Event)]
pub struct BlockCrackedEvent {
    pub block: Entity,
    pub cell: IVec3,
    pub stage: u8,
    pub cracking_value: f32,
}

#[derive(Event)]
pub struct BlockBrokenEvent {
    pub block: Entity,
    pub cell: IVec3,
    pub resistance: f32,
}

#[derive(Event)]
pub struct ItemPickedUpEvent {
    pub item: Entity,
    pub tool: Tool,
    pub material: Material,
    /// `None` when the inventory had no room left.
    pub slot: Option<usize>,
}

#[derive(Event)]
pub struct ItemUsedEvent {
    pub item: Entity,
}

#[derive(Event)]
pub struct InventorySlotChangedEvent {
    pub old_slot: usize,
    pub new_slot: usize,
}

#[derive(Event)]
pub struct HudStateChangedEvent {
    pub old_state: HudState,
    pub new_state: HudState,
}

// --- Plugin trait ---

#[allow(unused_variables)]
pub trait BlockcraftPlugin: Send + Sync + 'static {
    fn on_block_cracked(&self, event: &BlockCrackedEvent) {}
    fn on_block_broken(&self, event: &BlockBrokenEvent) {}
    fn on_item_picked_up(&self, event: &ItemPickedUpEvent) {}
    fn on_item_used(&self, event: &ItemUsedEvent) {}
    fn on_inventory_slot_changed(&self, event: &InventorySlotChangedEvent) {}
    fn on_hud_state_changed(&self, event: &HudStateChangedEvent) {}
}

// --- Registry ---

#[derive(Resource)]
struct PluginRegistry {
    plugins: Vec<Box<dyn BlockcraftPlugin>>,
}

// --- Dispatch systems ---

fn dispatch_block_cracked(
    mut reader: EventReader<BlockCrackedEvent>,
    registry: Res<PluginRegistry>,
) {
    for event in reader.read() {
        for plugin in &registry.plugins {
            plugin.on_block_cracked(event);
        }
    }
}

fn dispatch_block_broken(mut reader: EventReader<BlockBrokenEvent>, registry: Res<PluginRegistry>) {
    for event in reader.read() {
        for plugin in &registry.plugins {
            plugin.on_block_broken(event);
        }
    }
}

fn dispatch_item_picked_up(
    mut reader: EventReader<ItemPickedUpEvent>,
    registry: Res<PluginRegistry>,
) {
    for event in reader.read() {
        for plugin in &registry.plugins {
            plugin.on_item_picked_up(event);
        }
    }
}

fn dispatch_item_used(mut reader: EventReader<ItemUsedEvent>, registry: Res<PluginRegistry>) {
    for event in reader.read() {
        for plugin in &registry.plugins {
            plugin.on_item_used(event);
        }
    }
}

fn dispatch_inventory_slot_changed(
    mut reader: EventReader<InventorySlotChangedEvent>,
    registry: Res<PluginRegistry>,
) {
    for event in reader.read() {
        for plugin in &registry.plugins {
            plugin.on_inventory_slot_changed(event);
        }
    }
}

fn dispatch_hud_state_changed(
    mut reader: EventReader<HudStateChangedEvent>,
    registry: Res<PluginRegistry>,
) {
    for event in reader.read() {
        for plugin in &registry.plugins {
            plugin.on_hud_state_changed(event);
        }
    }
}

// --- EventsPlugin builder ---

pub struct EventsPlugin {
    plugins: std::sync::Mutex<Vec<Box<dyn BlockcraftPlugin>>>,
}

impl EventsPlugin {
    pub fn new() -> Self {
        Self {
            plugins: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn new_with(plugins: Vec<Box<dyn BlockcraftPlugin>>) -> Self {
        Self {
            plugins: std::sync::Mutex::new(plugins),
        }
    }
}

impl Default for EventsPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for EventsPlugin {
    fn build(&self, app: &mut App) {
        let plugins = match self.plugins.lock() {
            Ok(mut plugins) => plugins.drain(..).collect(),
            Err(_) => Vec::new(),
        };
        app.insert_resource(PluginRegistry { plugins });

        app.add_event::<BlockCrackedEvent>()
            .add_event::<BlockBrokenEvent>()
            .add_event::<ItemPickedUpEvent>()
            .add_event::<ItemUsedEvent>()
            .add_event::<InventorySlotChangedEvent>()
            .add_event::<HudStateChangedEvent>()
            .add_systems(
                PostUpdate,
                (
                    dispatch_block_cracked,
                    dispatch_block_broken,
                    dispatch_item_picked_up,
                    dispatch_item_used,
                    dispatch_inventory_slot_changed,
                    dispatch_hud_state_changed,
                ),
            );
    }
}
