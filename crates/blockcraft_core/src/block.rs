use serde::{Deserialize, Serialize};

/// Stage at which a block is destroyed.
pub const MAX_BREAKING_STAGE: u8 = 5;

pub const DEFAULT_RESISTANCE: f32 = 20.0;

/// Cracking value of an untouched block.
pub const UNCRACKED: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BreakOutcome {
    /// The block took damage and is still standing.
    Cracked { stage: u8, cracking_value: f32 },
    /// The block reached its final stage and must be destroyed.
    Broken,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub resistance: f32,
    pub breaking_stage: u8,
    pub minimum_material: u8,
}

impl Default for Block {
    fn default() -> Self {
        Self {
            resistance: DEFAULT_RESISTANCE,
            breaking_stage: 0,
            minimum_material: 0,
        }
    }
}

impl Block {
    pub fn with_resistance(resistance: f32) -> Self {
        Self {
            resistance,
            ..Self::default()
        }
    }

    /// Advance the block one breaking stage.
    pub fn break_block(&mut self) -> BreakOutcome {
        self.breaking_stage = (self.breaking_stage + 1).min(MAX_BREAKING_STAGE);
        if self.is_broken() {
            BreakOutcome::Broken
        } else {
            BreakOutcome::Cracked {
                stage: self.breaking_stage,
                cracking_value: self.cracking_value(),
            }
        }
    }

    pub fn reset(&mut self) {
        self.breaking_stage = 0;
    }

    /// Value fed to the crack material parameter: 1.0 is intact, 0.0 is fully cracked.
    pub fn cracking_value(&self) -> f32 {
        UNCRACKED - self.breaking_stage as f32 / MAX_BREAKING_STAGE as f32
    }

    pub fn is_broken(&self) -> bool {
        self.breaking_stage >= MAX_BREAKING_STAGE
    }
}
