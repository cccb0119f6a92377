use bevy_math::{IVec3, Vec3};

use crate::grid::{BLOCK_SIZE, BlockGrid, cell_of};

/// Default reach of the character, in world units.
pub const DEFAULT_REACH: f32 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit<T> {
    pub block: T,
    pub cell: IVec3,
    pub normal: IVec3,
    pub distance: f32,
}

/// Walk the grid cells along the ray and return the first placed block
/// entered within `reach`.
pub fn dda_raycast<T: Copy + PartialEq>(
    origin: Vec3,
    direction: Vec3,
    reach: f32,
    grid: &BlockGrid<T>,
) -> Option<RaycastHit<T>> {
    let dir = direction.normalize_or_zero();
    if dir == Vec3::ZERO || reach <= 0.0 {
        return None;
    }

    let start = origin / BLOCK_SIZE;
    let max_t = reach / BLOCK_SIZE;
    let mut pos = cell_of(origin);

    let step = IVec3::new(
        if dir.x >= 0.0 { 1 } else { -1 },
        if dir.y >= 0.0 { 1 } else { -1 },
        if dir.z >= 0.0 { 1 } else { -1 },
    );

    let t_delta = Vec3::new(
        if dir.x != 0.0 {
            (1.0 / dir.x).abs()
        } else {
            f32::MAX
        },
        if dir.y != 0.0 {
            (1.0 / dir.y).abs()
        } else {
            f32::MAX
        },
        if dir.z != 0.0 {
            (1.0 / dir.z).abs()
        } else {
            f32::MAX
        },
    );

    let mut t_max = Vec3::new(
        axis_boundary(start.x, pos.x, dir.x),
        axis_boundary(start.y, pos.y, dir.y),
        axis_boundary(start.z, pos.z, dir.z),
    );

    let mut normal = IVec3::ZERO;
    let mut t_entry = 0.0;

    while t_entry <= max_t {
        if let Some(block) = grid.get(pos) {
            return Some(RaycastHit {
                block,
                cell: pos,
                normal,
                distance: t_entry * BLOCK_SIZE,
            });
        }

        if t_max.x < t_max.y && t_max.x < t_max.z {
            pos.x += step.x;
            t_entry = t_max.x;
            t_max.x += t_delta.x;
            normal = IVec3::new(-step.x, 0, 0);
        } else if t_max.y < t_max.z {
            pos.y += step.y;
            t_entry = t_max.y;
            t_max.y += t_delta.y;
            normal = IVec3::new(0, -step.y, 0);
        } else {
            pos.z += step.z;
            t_entry = t_max.z;
            t_max.z += t_delta.z;
            normal = IVec3::new(0, 0, -step.z);
        }
    }

    None
}

fn axis_boundary(origin: f32, cell: i32, dir: f32) -> f32 {
    if dir > 0.0 {
        ((cell as f32 + 1.0) - origin) / dir
    } else if dir < 0.0 {
        (cell as f32 - origin) / dir
    } else {
        f32::MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(cells: &[(IVec3, u32)]) -> BlockGrid<u32> {
        let mut grid = BlockGrid::default();
        for (cell, id) in cells {
            grid.insert(*cell, *id);
        }
        grid
    }

    #[test]
    fn hits_block_in_front() {
        let grid = grid_with(&[(IVec3::new(0, 0, -2), 7)]);
        let hit = dda_raycast(Vec3::new(0.5, 0.5, 0.5), Vec3::NEG_Z, 2.5, &grid)
            .expect("block within reach");
        assert_eq!(hit.block, 7);
        assert_eq!(hit.cell, IVec3::new(0, 0, -2));
        assert_eq!(hit.normal, IVec3::Z);
        assert!((hit.distance - 1.5).abs() < 1e-5);
    }

    #[test]
    fn ignores_block_beyond_reach() {
        let grid = grid_with(&[(IVec3::new(0, 0, -4), 7)]);
        assert!(dda_raycast(Vec3::new(0.5, 0.5, 0.5), Vec3::NEG_Z, 2.5, &grid).is_none());
    }

    #[test]
    fn returns_nearest_of_two() {
        let grid = grid_with(&[(IVec3::new(2, 0, 0), 1), (IVec3::new(1, 0, 0), 2)]);
        let hit = dda_raycast(Vec3::new(0.5, 0.5, 0.5), Vec3::X, 5.0, &grid).unwrap();
        assert_eq!(hit.block, 2);
        assert_eq!(hit.normal, IVec3::NEG_X);
    }

    #[test]
    fn looking_down_hits_floor() {
        let grid = grid_with(&[(IVec3::new(0, -1, 0), 3)]);
        let hit = dda_raycast(Vec3::new(0.5, 1.7, 0.5), Vec3::NEG_Y, 2.5, &grid).unwrap();
        assert_eq!(hit.block, 3);
        assert_eq!(hit.normal, IVec3::Y);
    }

    #[test]
    fn zero_direction_hits_nothing() {
        let grid = grid_with(&[(IVec3::ZERO, 1)]);
        assert!(dda_raycast(Vec3::new(0.5, 0.5, 0.5), Vec3::ZERO, 2.5, &grid).is_none());
    }
}
