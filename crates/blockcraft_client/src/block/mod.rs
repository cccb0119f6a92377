use std::ops::{Deref, DerefMut};

use bevy::prelude::*;

use blockcraft_core::block::{Block as BlockRules, BreakOutcome};

use crate::events::{BlockBrokenEvent, BlockCrackedEvent};
use crate::world::BlockGrid;

/// Darkest tint a fully cracked block reaches.
const MIN_CRACK_BRIGHTNESS: f32 = 0.3;

/// A placed, breakable block.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Block(pub BlockRules);

impl Deref for Block {
    type Target = BlockRules;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Block {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct BlockCell(pub IVec3);

/// Per-block material instance driven by the cracking value.
#[derive(Component, Debug, Clone, Copy)]
pub struct CrackMaterial {
    pub base_color: Color,
}

pub struct BlockPlugin;

impl Plugin for BlockPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PostUpdate, update_crack_visuals);
    }
}

/// Damage a block one stage, destroying it when it reaches the last stage.
pub fn break_block(
    commands: &mut Commands,
    grid: &mut BlockGrid,
    entity: Entity,
    block: &mut Block,
    cell: IVec3,
    ev_cracked: &mut EventWriter<BlockCrackedEvent>,
    ev_broken: &mut EventWriter<BlockBrokenEvent>,
) {
    match block.break_block() {
        BreakOutcome::Cracked {
            stage,
            cracking_value,
        } => {
            ev_cracked.send(BlockCrackedEvent {
                block: entity,
                cell,
                stage,
                cracking_value,
            });
        }
        BreakOutcome::Broken => {
            on_broken(commands, grid, entity, cell, true);
            ev_broken.send(BlockBrokenEvent {
                block: entity,
                cell,
                resistance: block.resistance,
            });
        }
    }
}

/// Destroy a fully broken block.
// `has_required_pickaxe` does not gate destruction yet; tool tiers are not compared
// against `minimum_material`.
pub fn on_broken(
    commands: &mut Commands,
    grid: &mut BlockGrid,
    entity: Entity,
    cell: IVec3,
    has_required_pickaxe: bool,
) {
    debug!("block {entity:?} broken (required pickaxe: {has_required_pickaxe})");
    if grid.get(cell) == Some(entity) {
        grid.remove(cell);
    }
    commands.entity(entity).despawn_recursive();
}

fn update_crack_visuals(
    mut materials: ResMut<Assets<StandardMaterial>>,
    query: Query<
        (&Block, &CrackMaterial, Option<&MeshMaterial3d<StandardMaterial>>),
        Changed<Block>,
    >,
) {
    for (block, crack, handle) in &query {
        let Some(handle) = handle else {
            continue;
        };
        let Some(material) = materials.get_mut(&handle.0) else {
            continue;
        };
        material.base_color = cracked_color(crack.base_color, block.cracking_value());
    }
}

/// Tint `base` towards black as `cracking_value` drops from 1 to 0.
pub fn cracked_color(base: Color, cracking_value: f32) -> Color {
    let brightness = MIN_CRACK_BRIGHTNESS + (1.0 - MIN_CRACK_BRIGHTNESS) * cracking_value.clamp(0.0, 1.0);
    let srgba = base.to_srgba();
    Color::srgba(
        srgba.red * brightness,
        srgba.green * brightness,
        srgba.blue * brightness,
        srgba.alpha,
    )
}

#[cfg(test)]
mod tests {
    use blockcraft_core::block::Block as BlockRules;

    use super::*;

    #[derive(Resource)]
    struct Target(Entity, IVec3);

    fn hit_target(
        mut commands: Commands,
        target: Res<Target>,
        mut grid: ResMut<BlockGrid>,
        mut blocks: Query<&mut Block>,
        mut ev_cracked: EventWriter<BlockCrackedEvent>,
        mut ev_broken: EventWriter<BlockBrokenEvent>,
    ) {
        let Ok(mut block) = blocks.get_mut(target.0) else {
            return;
        };
        break_block(
            &mut commands,
            &mut grid,
            target.0,
            &mut block,
            target.1,
            &mut ev_cracked,
            &mut ev_broken,
        );
    }

    #[test]
    fn fifth_hit_frees_only_its_own_cell() {
        let mut app = App::new();
        app.init_resource::<BlockGrid>()
            .add_event::<BlockCrackedEvent>()
            .add_event::<BlockBrokenEvent>()
            .add_systems(Update, hit_target);

        let cell = IVec3::new(0, 1, 0);
        let neighbour_cell = IVec3::new(1, 1, 0);
        let target = app.world_mut().spawn(Block(BlockRules::default())).id();
        let neighbour = app.world_mut().spawn(Block(BlockRules::default())).id();
        {
            let mut grid = app.world_mut().resource_mut::<BlockGrid>();
            grid.insert(cell, target);
            grid.insert(neighbour_cell, neighbour);
        }
        app.insert_resource(Target(target, cell));

        for _ in 0..4 {
            app.update();
        }
        assert_eq!(app.world().resource::<BlockGrid>().len(), 2);
        assert_eq!(app.world().get::<Block>(target).unwrap().breaking_stage, 4);

        app.update();

        let grid = app.world().resource::<BlockGrid>();
        assert_eq!(grid.get(cell), None);
        assert_eq!(grid.get(neighbour_cell), Some(neighbour));
        assert!(!app.world().entities().contains(target));
        assert_eq!(app.world().resource::<Events<BlockBrokenEvent>>().len(), 1);
    }

    #[test]
    fn intact_block_keeps_base_color() {
        let base = Color::srgb(0.5, 0.4, 0.2);
        assert_eq!(cracked_color(base, 1.0).to_srgba(), base.to_srgba());
    }

    #[test]
    fn cracked_block_darkens() {
        let base = Color::srgb(1.0, 1.0, 1.0);
        let cracked = cracked_color(base, 0.0).to_srgba();
        assert!((cracked.red - MIN_CRACK_BRIGHTNESS).abs() < 1e-6);
        assert_eq!(cracked.alpha, 1.0);
    }
}
