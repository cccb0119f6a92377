use std::ops::{Deref, DerefMut};

use bevy::prelude::*;

use blockcraft_core::block::Block as BlockRules;
use blockcraft_core::grid::{BLOCK_SIZE, BlockGrid as ProtocolBlockGrid, cell_center};
use blockcraft_core::wieldable::Wieldable;

use crate::block::{Block, BlockCell, CrackMaterial};
use crate::settings::Level;
use crate::wieldable::spawn_wieldable;

/// Bevy Resource wrapper around the grid of placed blocks.
#[derive(Resource, Default)]
pub struct BlockGrid(pub ProtocolBlockGrid<Entity>);

impl Deref for BlockGrid {
    type Target = ProtocolBlockGrid<Entity>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for BlockGrid {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BlockGrid>()
            .add_systems(Startup, spawn_level);
    }
}

/// Spawn every placed block and pickup of the level.
pub fn spawn_level(
    mut commands: Commands,
    level: Res<Level>,
    mut grid: ResMut<BlockGrid>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let cube = meshes.add(Cuboid::new(BLOCK_SIZE, BLOCK_SIZE, BLOCK_SIZE));

    for placement in &level.blocks {
        let [r, g, b] = placement.color;
        let base_color = Color::srgb(r, g, b);
        // Each block gets its own material so cracks stay local to it.
        let material = materials.add(StandardMaterial {
            base_color,
            perceptual_roughness: 0.9,
            ..default()
        });

        let entity = commands
            .spawn((
                Block(BlockRules {
                    resistance: placement.resistance,
                    minimum_material: placement.minimum_material,
                    ..default()
                }),
                BlockCell(placement.cell),
                CrackMaterial { base_color },
                Mesh3d(cube.clone()),
                MeshMaterial3d(material),
                Transform::from_translation(cell_center(placement.cell)),
            ))
            .id();

        if let Some(previous) = grid.insert(placement.cell, entity) {
            warn!(
                "two blocks placed at {:?}, replacing {previous:?}",
                placement.cell
            );
            commands.entity(previous).despawn_recursive();
        }
    }

    for placement in &level.wieldables {
        let item = Wieldable {
            tool: placement.tool,
            material: placement.material,
            active: true,
            thumbnail: placement.thumbnail.clone(),
        };
        spawn_wieldable(
            &mut commands,
            &mut meshes,
            &mut materials,
            item,
            placement.position,
        );
    }

    info!(
        "level spawned: {} blocks, {} wieldables",
        grid.len(),
        level.wieldables.len()
    );
}
