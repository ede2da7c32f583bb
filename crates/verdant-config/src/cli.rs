//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Verdant command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "verdant", about = "Animated heightfield terrain with scattered vegetation")]
pub struct CliArgs {
    /// Noise seed for the terrain.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Seed for the vegetation placement RNG.
    #[arg(long)]
    pub scatter_seed: Option<u64>,

    /// Grid subdivisions per axis.
    #[arg(long)]
    pub segments: Option<u32>,

    /// Number of vegetation instances.
    #[arg(long)]
    pub count: Option<u32>,

    /// Number of ticks to run (0 = until interrupted).
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Frame pacing target (0 = unpaced).
    #[arg(long)]
    pub fps: Option<u32>,

    /// Log level (error, warn, info, debug, trace) or a full filter directive.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print a JSON run summary to stdout when the loop ends.
    #[arg(long)]
    pub json: bool,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.terrain.seed = Some(seed);
        }
        if let Some(seed) = args.scatter_seed {
            self.scatter.seed = Some(seed);
        }
        if let Some(segments) = args.segments {
            self.terrain.segments = segments;
        }
        if let Some(count) = args.count {
            self.scatter.count = count;
        }
        if let Some(ticks) = args.ticks {
            self.simulation.ticks = ticks;
        }
        if let Some(fps) = args.fps {
            self.simulation.target_fps = fps;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
