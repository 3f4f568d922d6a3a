use crate::db::layer::{BOTTOM_COPPER, COPPER_LAYER_COUNT, LayerId, TOP_COPPER};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("grid pitch must be positive, got {0}")]
    InvalidPitch(i32),
    #[error("clearance must not be negative, got {0}")]
    NegativeClearance(i32),
    #[error("routing layer {0} is not a copper layer")]
    InvalidLayer(LayerId),
    #[error("generator needs at least one segment per chain")]
    EmptyChains,
}

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub track: TrackConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.pitch <= 0 {
            return Err(ConfigError::InvalidPitch(self.grid.pitch));
        }
        if self.grid.clearance < 0 {
            return Err(ConfigError::NegativeClearance(self.grid.clearance));
        }
        for layer in [self.grid.top_layer, self.grid.bottom_layer] {
            if layer >= COPPER_LAYER_COUNT {
                return Err(ConfigError::InvalidLayer(layer));
            }
        }
        if self.generator.segments_per_chain == 0 {
            return Err(ConfigError::EmptyChains);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_pitch")]
    pub pitch: i32,
    #[serde(default = "default_clearance")]
    pub clearance: i32,
    #[serde(default = "default_double_sided")]
    pub double_sided: bool,
    #[serde(default = "default_top_layer")]
    pub top_layer: LayerId,
    #[serde(default = "default_bottom_layer")]
    pub bottom_layer: LayerId,
    #[serde(default = "default_max_cells")]
    pub max_cells: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            pitch: default_pitch(),
            clearance: default_clearance(),
            double_sided: default_double_sided(),
            top_layer: default_top_layer(),
            bottom_layer: default_bottom_layer(),
            max_cells: default_max_cells(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackConfig {
    #[serde(default = "default_reorder")]
    pub reorder: bool,
    #[serde(default = "default_parallel_survey")]
    pub parallel_survey: bool,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            reorder: default_reorder(),
            parallel_survey: default_parallel_survey(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_chains")]
    pub chains: usize,
    #[serde(default = "default_segments_per_chain")]
    pub segments_per_chain: usize,
    #[serde(default = "default_board_width")]
    pub width: i32,
    #[serde(default = "default_board_height")]
    pub height: i32,
    #[serde(default = "default_via_ratio")]
    pub via_ratio: f64,
    #[serde(default = "default_track_width")]
    pub track_width: i32,
    #[serde(default = "default_die_length")]
    pub max_die_length: i32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            chains: default_chains(),
            segments_per_chain: default_segments_per_chain(),
            width: default_board_width(),
            height: default_board_height(),
            via_ratio: default_via_ratio(),
            track_width: default_track_width(),
            max_die_length: default_die_length(),
        }
    }
}

// Board units are tenths of a mil.
fn default_pitch() -> i32 {
    500
}

fn default_clearance() -> i32 {
    100
}

fn default_double_sided() -> bool {
    true
}

fn default_top_layer() -> LayerId {
    TOP_COPPER
}

fn default_bottom_layer() -> LayerId {
    BOTTOM_COPPER
}

fn default_max_cells() -> usize {
    20_000_000
}

fn default_reorder() -> bool {
    true
}

fn default_parallel_survey() -> bool {
    true
}

fn default_seed() -> u64 {
    42
}

fn default_chains() -> usize {
    200
}

fn default_segments_per_chain() -> usize {
    6
}

fn default_board_width() -> i32 {
    100_000
}

fn default_board_height() -> i32 {
    80_000
}

fn default_via_ratio() -> f64 {
    0.15
}

fn default_track_width() -> i32 {
    120
}

fn default_die_length() -> i32 {
    400
}
