//! Engine-free gameplay rules: breakable blocks, wieldable pickups, the
//! character inventory, block targeting and the HUD state machine.

pub mod block;
pub mod config;
pub mod grid;
pub mod hud;
pub mod interaction;
pub mod inventory;
pub mod level;
pub mod physics;
pub mod raycast;
pub mod wieldable;
