//! Tunable simulation parameters, loadable from TOML.
//!
//! Every field has a default, so a config file only needs the keys it changes:
//!
//! ```toml
//! movement_mode = "Manual"
//! view_radius = 5
//!
//! [generation]
//! wall_fill_percent = 38
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::MovementMode;

/// Stat formula used when the player and an enemy contest a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatFormula {
    #[default]
    StatComparison,
    DiceRoll,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub wall_fill_percent: u32,
    pub smoothing_passes: u32,
    pub attempts_per_size: u32,
    pub max_enlargements: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self { wall_fill_percent: 40, smoothing_passes: 2, attempts_per_size: 12, max_enlargements: 3 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub movement_mode: MovementMode,
    /// Wait per turn at speed 1; the real wait is this divided by the player's speed.
    pub base_wait_ms: u64,
    pub max_turns_per_advance: u32,
    /// Capacity of each actor's recently visited cell history.
    pub history_len: usize,
    pub view_radius: i32,
    pub tile_pitch: f32,
    /// Levels are `level + level_size_offset` cells on each side.
    pub level_size_offset: usize,
    pub enemies_base: usize,
    pub enemies_per_level: usize,
    pub enemy_aggro_radius: u32,
    pub decorations_per_level: usize,
    pub item_caches_per_level: usize,
    pub combat_formula: CombatFormula,
    pub generation: GenerationConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            movement_mode: MovementMode::Auto,
            base_wait_ms: 5000,
            max_turns_per_advance: 64,
            history_len: 5,
            view_radius: 4,
            tile_pitch: 32.0,
            level_size_offset: 6,
            enemies_base: 4,
            enemies_per_level: 2,
            enemy_aggro_radius: 6,
            decorations_per_level: 2,
            item_caches_per_level: 1,
            combat_formula: CombatFormula::StatComparison,
            generation: GenerationConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_wait_ms == 0 {
            return Err(ConfigError::Invalid("base_wait_ms must be positive".to_string()));
        }
        if self.history_len == 0 {
            return Err(ConfigError::Invalid("history_len must be at least 1".to_string()));
        }
        if self.view_radius < 1 {
            return Err(ConfigError::Invalid("view_radius must be at least 1".to_string()));
        }
        if self.level_size_offset < 2 {
            return Err(ConfigError::Invalid(
                "level_size_offset must leave room for an interior".to_string(),
            ));
        }
        if self.generation.wall_fill_percent > 100 {
            return Err(ConfigError::Invalid("wall_fill_percent must be at most 100".to_string()));
        }
        if self.tile_pitch.is_nan() || self.tile_pitch <= 0.0 {
            return Err(ConfigError::Invalid("tile_pitch must be positive".to_string()));
        }
        Ok(())
    }

    pub fn level_dimensions(&self, level: u32) -> (usize, usize) {
        let side = level as usize + self.level_size_offset;
        (side, side)
    }

    pub fn enemy_count(&self, level: u32) -> usize {
        level as usize * self.enemies_per_level + self.enemies_base
    }
}
