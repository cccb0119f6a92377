use std::collections::HashMap;

use bevy_math::{IVec3, Vec3};

/// Edge length of a block cell, in world units.
pub const BLOCK_SIZE: f32 = 1.0;

/// Placed blocks indexed by the cell they occupy.
#[derive(Debug, Clone)]
pub struct BlockGrid<T> {
    pub cells: HashMap<IVec3, T>,
}

impl<T> Default for BlockGrid<T> {
    fn default() -> Self {
        Self {
            cells: HashMap::new(),
        }
    }
}

impl<T: Copy + PartialEq> BlockGrid<T> {
    pub fn get(&self, cell: IVec3) -> Option<T> {
        self.cells.get(&cell).copied()
    }

    pub fn is_solid(&self, cell: IVec3) -> bool {
        self.cells.contains_key(&cell)
    }

    /// Place `block` at `cell`, returning whatever occupied it before.
    pub fn insert(&mut self, cell: IVec3, block: T) -> Option<T> {
        self.cells.insert(cell, block)
    }

    pub fn remove(&mut self, cell: IVec3) -> Option<T> {
        self.cells.remove(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

pub fn cell_of(pos: Vec3) -> IVec3 {
    IVec3::new(
        (pos.x / BLOCK_SIZE).floor() as i32,
        (pos.y / BLOCK_SIZE).floor() as i32,
        (pos.z / BLOCK_SIZE).floor() as i32,
    )
}

/// World-space center of a cell.
pub fn cell_center(cell: IVec3) -> Vec3 {
    (cell.as_vec3() + Vec3::splat(0.5)) * BLOCK_SIZE
}
