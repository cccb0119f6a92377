use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Unarmed,
    Pickaxe,
    Axe,
    Shovel,
    Sword,
}

/// Material tier of a tool. The discriminant is the tier value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Material {
    #[default]
    None = 1,
    Wooden = 2,
    Stone = 4,
    Iron = 6,
    Diamond = 8,
    Golden = 12,
}

impl Material {
    pub fn tier(self) -> u8 {
        self as u8
    }

    /// Returns RGBA color as [r, g, b, a] in sRGB space.
    pub fn color_rgba(self) -> [f32; 4] {
        match self {
            Material::None => [0.80, 0.80, 0.80, 1.0],
            Material::Wooden => [0.55, 0.38, 0.20, 1.0],
            Material::Stone => [0.50, 0.50, 0.50, 1.0],
            Material::Iron => [0.85, 0.85, 0.88, 1.0],
            Material::Diamond => [0.35, 0.90, 0.90, 1.0],
            Material::Golden => [0.95, 0.80, 0.20, 1.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wieldable {
    pub tool: Tool,
    pub material: Material,
    pub active: bool,
    pub thumbnail: Option<String>,
}

impl Default for Wieldable {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            material: Material::default(),
            active: true,
            thumbnail: None,
        }
    }
}

impl Wieldable {
    pub fn new(tool: Tool, material: Material) -> Self {
        Self {
            tool,
            material,
            ..Self::default()
        }
    }

    /// Deactivate the item. Returns `false` if it was already picked up.
    pub fn pick_up(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        true
    }
}
