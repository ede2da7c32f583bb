//! Configuration system for Verdant.
//!
//! Terrain, scatter and simulation constants persist to disk as a RON file and
//! can be overridden from the command line via clap.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, ScatterConfig, SimulationConfig, TerrainConfig};
pub use error::ConfigError;
