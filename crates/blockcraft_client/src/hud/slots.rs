use bevy::prelude::*;

use crate::inventory::Inventory;
use crate::wieldable::{WieldableItem, material_color};

pub const SLOT_SIZE: f32 = 44.0;
pub const SLOT_GAP: f32 = 4.0;
const PREVIEW_SIZE: f32 = 32.0;

const SELECTED_BORDER: Color = Color::WHITE;
const IDLE_BORDER: Color = Color::srgba(0.4, 0.4, 0.4, 0.8);

/// Outer square of an inventory slot.
#[derive(Component)]
pub struct SlotFrame(pub usize);

/// Swatch or thumbnail of the item stored in a slot.
#[derive(Component)]
pub struct SlotPreview(pub usize);

pub fn spawn_slot(parent: &mut ChildBuilder, index: usize, clickable: bool) {
    let mut frame = parent.spawn((
        SlotFrame(index),
        Node {
            width: Val::Px(SLOT_SIZE),
            height: Val::Px(SLOT_SIZE),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            border: UiRect::all(Val::Px(2.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.15, 0.15, 0.15, 0.8)),
        BorderColor(IDLE_BORDER),
    ));
    if clickable {
        frame.insert(Button);
    }
    frame.with_children(|slot| {
        slot.spawn((
            SlotPreview(index),
            Node {
                width: Val::Px(PREVIEW_SIZE),
                height: Val::Px(PREVIEW_SIZE),
                ..default()
            },
            BackgroundColor(Color::NONE),
            Visibility::Hidden,
        ));
    });
}

/// Repaint slot borders and previews after the inventory or the widget changed.
pub fn update_slots(
    mut commands: Commands,
    inventory: Res<Inventory>,
    asset_server: Option<Res<AssetServer>>,
    items: Query<&WieldableItem>,
    added: Query<(), Added<SlotPreview>>,
    mut frames: Query<(&SlotFrame, &mut BorderColor)>,
    mut previews: Query<(
        Entity,
        &SlotPreview,
        &mut BackgroundColor,
        &mut Visibility,
        Option<&ImageNode>,
    )>,
) {
    if !inventory.is_changed() && added.is_empty() {
        return;
    }

    for (frame, mut border) in &mut frames {
        *border = if frame.0 == inventory.current_slot {
            BorderColor(SELECTED_BORDER)
        } else {
            BorderColor(IDLE_BORDER)
        };
    }

    for (entity, preview, mut background, mut visibility, image) in &mut previews {
        let item = inventory
            .get(preview.0)
            .and_then(|stored| items.get(stored).ok());

        let Some(item) = item else {
            *visibility = Visibility::Hidden;
            if image.is_some() {
                commands.entity(entity).remove::<ImageNode>();
            }
            continue;
        };

        *visibility = Visibility::Inherited;
        background.0 = material_color(item.material);

        match (item.thumbnail.as_deref(), asset_server.as_deref()) {
            (Some(path), Some(server)) => {
                commands
                    .entity(entity)
                    .insert(ImageNode::new(server.load(path.to_owned())));
            }
            _ => {
                if image.is_some() {
                    commands.entity(entity).remove::<ImageNode>();
                }
            }
        }
    }
}
