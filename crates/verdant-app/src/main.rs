//! Headless Verdant runner.
//!
//! Loads `config.ron`, applies CLI overrides, and drives the terrain scene for
//! the configured number of ticks using recording sinks in place of a GPU.
//! Run with `cargo run -p verdant-app -- --seed 7 --ticks 100 --json`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};
use verdant_app::frame_loop::FrameLoop;
use verdant_app::platform::PlatformDirs;
use verdant_app::scene::{SceneError, SceneSeeds, TerrainScene};
use verdant_app::sinks::{RecordingGeometrySink, RecordingInstanceSink};
use verdant_config::{CliArgs, Config};

/// Printed to stdout with `--json`.
#[derive(Serialize)]
struct RunSummary {
    seeds: SceneSeeds,
    ticks: u64,
    time: f64,
    vertices: usize,
    geometry_uploads: u64,
    geometry_buffer_bytes: u64,
    instances: usize,
    instance_buffer_bytes: u64,
    max_drift: f32,
    average_fps: f64,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let (config_dir, log_dir) = match args.config.clone() {
        Some(dir) => {
            let logs = dir.join("logs");
            (dir, logs)
        }
        None => match PlatformDirs::resolve_and_create() {
            Ok(dirs) => (dirs.config_dir, dirs.log_dir),
            Err(e) => {
                eprintln!("Failed to initialize platform directories: {e}");
                (PathBuf::from("."), PathBuf::from("logs"))
            }
        },
    };

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let file_logging = cfg!(debug_assertions) || config.debug.log_to_file;
    verdant_log::init_logging(Some(&log_dir), file_logging, Some(&config));

    match run(&config, args.json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("verdant: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, print_json: bool) -> Result<(), SceneError> {
    let seeds = SceneSeeds::resolve(config);
    if config.terrain.seed.is_none() {
        info!(seed = seeds.terrain, "terrain seed drawn at random");
    }
    if config.scatter.seed.is_none() {
        info!(seed = seeds.scatter, "scatter seed drawn at random");
    }

    let mut scene = TerrainScene::from_config(
        config,
        seeds,
        RecordingGeometrySink::default(),
        RecordingInstanceSink::default(),
    )?;

    let ticks = config.simulation.ticks;
    let target_fps = config.simulation.target_fps;
    if ticks == 0 {
        warn!("simulation.ticks is 0, running until interrupted");
    }

    let mut frames = FrameLoop::new();
    while ticks == 0 || frames.frame_count() < ticks {
        frames.tick(|_| {
            scene.frame();
        });
        if let Some(left) = frames.remaining_budget(target_fps) {
            std::thread::sleep(left);
        }
    }

    let summary = RunSummary {
        seeds,
        ticks: frames.frame_count(),
        time: scene.terrain().time().value(),
        vertices: scene.terrain().vertex_count(),
        geometry_uploads: scene.geometry_sink().uploads,
        geometry_buffer_bytes: scene.geometry_sink().buffer_size,
        instances: scene.instance_sink().instances.len(),
        instance_buffer_bytes: scene.instance_sink().buffer_size,
        max_drift: scene.instance_drift(),
        average_fps: frames.average_fps(),
    };
    info!(
        ticks = summary.ticks,
        time = summary.time,
        instances = summary.instances,
        max_drift = summary.max_drift,
        avg_fps = summary.average_fps,
        "run finished"
    );

    if print_json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => warn!("failed to serialize run summary: {e}"),
        }
    }
    Ok(())
}
