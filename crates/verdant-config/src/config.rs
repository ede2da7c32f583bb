//! Configuration structs with the reference defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Heightfield grid and noise constants.
    pub terrain: TerrainConfig,
    /// Vegetation scatter constants.
    pub scatter: ScatterConfig,
    /// Frame loop settings.
    pub simulation: SimulationConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Grid extent, subdivision and animated-noise constants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// World-space extent along X.
    pub width: f32,
    /// World-space extent along Y (the ground plane's second axis).
    pub height: f32,
    /// Subdivisions per axis. The grid has `(segments + 1)^2` vertices.
    pub segments: u32,
    /// Multiplier applied to normalized coordinates before sampling noise.
    pub frequency: f64,
    /// Multiplier applied to raw noise to get elevation.
    pub amplitude: f64,
    /// Time cursor increment per tick. Not scaled by frame time.
    pub time_step: f64,
    /// Noise seed. `None` draws one at startup.
    pub seed: Option<u32>,
}

/// Instance scatter constants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScatterConfig {
    /// Number of instances placed.
    pub count: u32,
    /// Vertical bias added to the sampled elevation.
    pub offset: f32,
    /// Per-axis instance scale.
    pub scale: [f32; 3],
    /// Placement RNG seed. `None` draws one at startup.
    pub seed: Option<u64>,
}

/// Frame loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of ticks to run. 0 runs until the process is stopped.
    pub ticks: u64,
    /// Frame pacing target. 0 runs unpaced.
    pub target_fps: u32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "verdant_terrain=trace").
    pub log_level: String,
    /// Also write JSON logs to the platform log directory.
    pub log_to_file: bool,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 50.0,
            height: 50.0,
            segments: 300,
            frequency: 10.0,
            amplitude: 5.0,
            time_step: 0.01,
            seed: None,
        }
    }
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            count: 5000,
            offset: 0.5,
            scale: [0.2, 1.0, 0.2],
            seed: None,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ticks: 600,
            target_fps: 60,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: false,
        }
    }
}

impl Config {
    /// Read `config.ron` from `config_dir`, writing the defaults there first
    /// when the file does not exist yet.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        if !path.exists() {
            let defaults = Self::default();
            defaults.save(config_dir)?;
            log::info!("Wrote default terrain config to {}", path.display());
            return Ok(defaults);
        }
        let config = Self::read(&path)?;
        log::info!("Loaded terrain config from {}", path.display());
        Ok(config)
    }

    /// Write `config.ron` into `config_dir`, creating the directory if needed.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path,
            source,
        })
    }

    /// Re-read `config.ron`. `Some` only when the file no longer matches `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let on_disk = Self::read(&config_dir.join(CONFIG_FILE))?;
        if on_disk == *self {
            return Ok(None);
        }
        log::info!("Terrain config changed on disk");
        Ok(Some(on_disk))
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
