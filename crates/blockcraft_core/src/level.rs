use std::path::Path;

use bevy_math::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::block::DEFAULT_RESISTANCE;
use crate::config::{ConfigError, load_toml, parse_toml};
use crate::wieldable::{Material, Tool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockPlacement {
    pub cell: IVec3,
    #[serde(default = "default_resistance")]
    pub resistance: f32,
    #[serde(default)]
    pub minimum_material: u8,
    #[serde(default = "default_block_color")]
    pub color: [f32; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WieldablePlacement {
    pub position: Vec3,
    #[serde(default)]
    pub tool: Tool,
    #[serde(default)]
    pub material: Material,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Placed blocks and pickups that make up a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescription {
    /// Feet position of the player at spawn.
    pub player_start: Vec3,
    #[serde(default)]
    pub blocks: Vec<BlockPlacement>,
    #[serde(default)]
    pub wieldables: Vec<WieldablePlacement>,
}

fn default_resistance() -> f32 {
    DEFAULT_RESISTANCE
}

fn default_block_color() -> [f32; 3] {
    [0.5, 0.5, 0.5]
}

const FLOOR_HALF_EXTENT: i32 = 8;

impl Default for LevelDescription {
    /// A stone floor with a few pillars of increasing resistance and three tools to pick up.
    fn default() -> Self {
        let mut blocks = Vec::new();
        for x in -FLOOR_HALF_EXTENT..FLOOR_HALF_EXTENT {
            for z in -FLOOR_HALF_EXTENT..FLOOR_HALF_EXTENT {
                blocks.push(BlockPlacement {
                    cell: IVec3::new(x, 0, z),
                    resistance: DEFAULT_RESISTANCE,
                    minimum_material: 0,
                    color: [0.45, 0.45, 0.45],
                });
            }
        }

        let pillars = [
            (IVec3::new(-3, 1, -4), 20.0, [0.55, 0.36, 0.20]),
            (IVec3::new(0, 1, -4), 60.0, [0.40, 0.26, 0.13]),
            (IVec3::new(3, 1, -4), 120.0, [0.30, 0.30, 0.35]),
        ];
        for (base, resistance, color) in pillars {
            for dy in 0..3 {
                blocks.push(BlockPlacement {
                    cell: base + IVec3::new(0, dy, 0),
                    resistance,
                    minimum_material: 0,
                    color,
                });
            }
        }

        let wieldables = vec![
            WieldablePlacement {
                position: Vec3::new(-2.5, 1.5, 2.5),
                tool: Tool::Pickaxe,
                material: Material::Wooden,
                thumbnail: None,
            },
            WieldablePlacement {
                position: Vec3::new(0.5, 1.5, 3.5),
                tool: Tool::Axe,
                material: Material::Stone,
                thumbnail: None,
            },
            WieldablePlacement {
                position: Vec3::new(3.5, 1.5, 2.5),
                tool: Tool::Shovel,
                material: Material::Iron,
                thumbnail: None,
            },
        ];

        Self {
            player_start: Vec3::new(0.5, 1.0, 0.5),
            blocks,
            wieldables,
        }
    }
}

impl LevelDescription {
    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        parse_toml(contents, path)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        load_toml(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_level_has_floor_pillars_and_tools() {
        let level = LevelDescription::default();
        let floor = (2 * FLOOR_HALF_EXTENT * 2 * FLOOR_HALF_EXTENT) as usize;
        assert_eq!(level.blocks.len(), floor + 9);
        assert_eq!(level.wieldables.len(), 3);
        assert!(level.blocks.iter().any(|b| b.cell == IVec3::new(0, 0, 0)));
    }

    #[test]
    fn parses_minimal_level() {
        let level = LevelDescription::from_toml_str(
            r#"
            player_start = [0.5, 1.0, 0.5]

            [[blocks]]
            cell = [0, 0, 0]

            [[blocks]]
            cell = [0, 1, -2]
            resistance = 80.0

            [[wieldables]]
            position = [1.5, 1.5, 0.5]
            tool = "Sword"
            material = "Diamond"
            "#,
            Path::new("level.toml"),
        )
        .unwrap();
        assert_eq!(level.blocks.len(), 2);
        assert_eq!(level.blocks[0].resistance, DEFAULT_RESISTANCE);
        assert_eq!(level.blocks[1].resistance, 80.0);
        assert_eq!(level.wieldables[0].tool, Tool::Sword);
        assert_eq!(level.wieldables[0].material, Material::Diamond);
        assert!(level.wieldables[0].thumbnail.is_none());
    }
}
