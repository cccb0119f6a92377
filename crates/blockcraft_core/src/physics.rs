use bevy_math::{IVec3, Vec3};

use crate::grid::BlockGrid;

pub const PLAYER_HALF_WIDTH: f32 = 0.3;
pub const PLAYER_HEIGHT: f32 = 1.8;
pub const EYE_HEIGHT: f32 = 1.7;
pub const GRAVITY: f32 = 32.0;
pub const JUMP_VELOCITY: f32 = 9.0;
pub const TERMINAL_VELOCITY: f32 = 78.4;

pub fn collides_with_world<T: Copy + PartialEq>(pos: Vec3, grid: &BlockGrid<T>) -> bool {
    let min_x = (pos.x - PLAYER_HALF_WIDTH).floor() as i32;
    let max_x = (pos.x + PLAYER_HALF_WIDTH - 0.001).floor() as i32;
    let min_y = pos.y.floor() as i32;
    let max_y = (pos.y + PLAYER_HEIGHT - 0.001).floor() as i32;
    let min_z = (pos.z - PLAYER_HALF_WIDTH).floor() as i32;
    let max_z = (pos.z + PLAYER_HALF_WIDTH - 0.001).floor() as i32;

    for bx in min_x..=max_x {
        for by in min_y..=max_y {
            for bz in min_z..=max_z {
                if grid.is_solid(IVec3::new(bx, by, bz)) {
                    return true;
                }
            }
        }
    }
    false
}

pub fn is_on_ground<T: Copy + PartialEq>(pos: Vec3, grid: &BlockGrid<T>) -> bool {
    let min_x = (pos.x - PLAYER_HALF_WIDTH).floor() as i32;
    let max_x = (pos.x + PLAYER_HALF_WIDTH - 0.001).floor() as i32;
    let min_z = (pos.z - PLAYER_HALF_WIDTH).floor() as i32;
    let max_z = (pos.z + PLAYER_HALF_WIDTH - 0.001).floor() as i32;
    let by = (pos.y - 0.001).floor() as i32;

    for bx in min_x..=max_x {
        for bz in min_z..=max_z {
            if grid.is_solid(IVec3::new(bx, by, bz)) {
                return true;
            }
        }
    }
    false
}

/// Result of moving the player capsule one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    pub position: Vec3,
    pub hit_floor: bool,
    pub hit_ceiling: bool,
}

/// Move axis by axis, snapping back against any block cell entered.
pub fn move_with_collision<T: Copy + PartialEq>(
    current_pos: Vec3,
    delta: Vec3,
    grid: &BlockGrid<T>,
) -> MoveResult {
    let mut pos = current_pos;
    let mut hit_floor = false;
    let mut hit_ceiling = false;

    pos.x += delta.x;
    if collides_with_world(pos, grid) {
        if delta.x > 0.0 {
            pos.x = (pos.x + PLAYER_HALF_WIDTH).floor() - PLAYER_HALF_WIDTH;
        } else {
            pos.x = (pos.x - PLAYER_HALF_WIDTH).floor() + 1.0 + PLAYER_HALF_WIDTH;
        }
    }

    pos.y += delta.y;
    if collides_with_world(pos, grid) {
        if delta.y > 0.0 {
            pos.y = (pos.y + PLAYER_HEIGHT).floor() - PLAYER_HEIGHT;
            hit_ceiling = true;
        } else {
            pos.y = pos.y.floor() + 1.0;
            hit_floor = true;
        }
    }

    pos.z += delta.z;
    if collides_with_world(pos, grid) {
        if delta.z > 0.0 {
            pos.z = (pos.z + PLAYER_HALF_WIDTH).floor() - PLAYER_HALF_WIDTH;
        } else {
            pos.z = (pos.z - PLAYER_HALF_WIDTH).floor() + 1.0 + PLAYER_HALF_WIDTH;
        }
    }

    MoveResult {
        position: pos,
        hit_floor,
        hit_ceiling,
    }
}

/// Axis input for one frame, already scaled to [-1, 1].
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveInput {
    pub forward: f32,
    pub right: f32,
    pub jump: bool,
}

/// Horizontal walk delta plus the updated vertical velocity.
pub fn walk_delta(
    input: MoveInput,
    yaw: f32,
    speed: f32,
    dt: f32,
    velocity_y: f32,
    grounded: bool,
) -> (Vec3, f32) {
    let forward_xz = Vec3::new(-yaw.sin(), 0.0, -yaw.cos());
    let right_xz = Vec3::new(yaw.cos(), 0.0, -yaw.sin());

    let mut horizontal = forward_xz * input.forward + right_xz * input.right;
    if horizontal.length_squared() > 1.0 {
        horizontal = horizontal.normalize();
    }

    let mut velocity_y = velocity_y;
    if input.jump && grounded {
        velocity_y = JUMP_VELOCITY;
    }
    velocity_y -= GRAVITY * dt;
    velocity_y = velocity_y.max(-TERMINAL_VELOCITY);

    (
        Vec3::new(
            horizontal.x * speed * dt,
            velocity_y * dt,
            horizontal.z * speed * dt,
        ),
        velocity_y,
    )
}
