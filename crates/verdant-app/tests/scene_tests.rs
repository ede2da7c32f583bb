//! End-to-end runs of the terrain scene with recording sinks.

use std::f32::consts::PI;

use glam::Vec3;
use verdant_app::scene::{SceneSeeds, TerrainScene};
use verdant_app::sinks::{RecordingGeometrySink, RecordingInstanceSink};
use verdant_config::Config;
use verdant_scatter::PlacementState;
use verdant_terrain::TerrainState;

type Scene = TerrainScene<RecordingGeometrySink, RecordingInstanceSink>;

fn build(config: &Config, seeds: SceneSeeds) -> Scene {
    TerrainScene::from_config(
        config,
        seeds,
        RecordingGeometrySink::default(),
        RecordingInstanceSink::default(),
    )
    .unwrap()
}

fn run(config: &Config, seeds: SceneSeeds, ticks: u64) -> Scene {
    let mut scene = build(config, seeds);
    for _ in 0..ticks {
        scene.frame();
    }
    scene
}

const SEEDS: SceneSeeds = SceneSeeds {
    terrain: 42,
    scatter: 7,
};

#[test]
fn default_scene_after_one_hundred_ticks() {
    let config = Config::default();
    let a = run(&config, SEEDS, 100);
    let b = run(&config, SEEDS, 100);

    let sample_a = a.terrain().latest_sample().unwrap();
    let sample_b = b.terrain().latest_sample().unwrap();
    assert_eq!(sample_a.tick(), 100);
    assert_eq!(sample_a.time(), 1.0);
    let mut off_lattice_nonzero = false;
    for (u, v) in [(0.5, 0.5), (0.37, 0.61), (0.123, 0.877), (-0.29, 0.44)] {
        let ea = sample_a.elevation(u, v);
        assert_eq!(ea.to_bits(), sample_b.elevation(u, v).to_bits(), "({u}, {v})");
        off_lattice_nonzero |= ea != 0.0;
    }
    assert!(off_lattice_nonzero, "off-lattice elevations should not all be zero");
    assert_eq!(a.terrain().positions(), b.terrain().positions());

    assert_eq!(a.terrain().vertex_count(), 301 * 301);
    assert_eq!(a.geometry_sink().uploads, 100);
    assert_eq!(a.geometry_sink().vertex_count(), 301 * 301);
    assert_eq!(a.geometry_sink().vertices, a.terrain().vertices());

    let transforms = a.sampler().transforms();
    assert_eq!(transforms.len(), 5000);
    assert_eq!(a.instance_sink().uploads, 1);
    assert_eq!(a.instance_sink().instances.len(), 5000);
    assert_eq!(a.instance_sink().instance_count(), 5000);
    for t in transforms {
        assert_eq!(t.scale, Vec3::new(0.2, 1.0, 0.2));
        assert!((0.0..=PI).contains(&t.yaw), "yaw {} out of range", t.yaw);
        assert!(t.position.x.abs() <= 25.0 && t.position.z.abs() <= 25.0);
    }
    assert_eq!(transforms, b.sampler().transforms());
}

#[test]
fn placement_waits_for_first_tick() {
    let mut config = Config::default();
    config.terrain.segments = 16;
    config.scatter.count = 200;
    let mut scene = build(&config, SEEDS);

    assert_eq!(scene.terrain().state(), TerrainState::Uninitialized);
    assert_eq!(scene.placement_state(), PlacementState::AwaitingSample);
    assert!(scene.terrain().latest_sample().is_none());

    let report = scene.frame();
    assert_eq!(report.instances_placed, 200);
    assert_eq!(scene.terrain().state(), TerrainState::Running);
    assert_eq!(scene.placement_state(), PlacementState::Placed);
    assert_eq!(scene.sampler().source_tick(), Some(1));
}

#[test]
fn placement_sits_on_first_sample_then_drifts() {
    let mut config = Config::default();
    config.terrain.segments = 16;
    config.scatter.count = 500;
    let mut scene = build(&config, SEEDS);

    scene.frame();
    assert!(scene.instance_drift() < 1e-4);
    for t in scene.sampler().transforms() {
        let sample = scene.terrain().latest_sample().unwrap();
        let ground = sample.elevation(
            f64::from(t.position.x) / 50.0,
            f64::from(t.position.z) / 50.0,
        ) as f32;
        assert!((t.position.y - (ground + 0.5)).abs() < 1e-4);
    }

    let placed = scene.sampler().transforms().to_vec();
    for _ in 0..60 {
        scene.frame();
    }
    assert_eq!(scene.sampler().transforms(), placed.as_slice());
    assert!(scene.instance_drift() > 1e-3);
}

#[test]
fn geometry_revision_advances_every_frame() {
    let mut config = Config::default();
    config.terrain.segments = 4;
    config.scatter.count = 10;
    let mut scene = build(&config, SEEDS);

    let mut last = 0;
    for _ in 0..20 {
        let revision = scene.frame().uploaded_revision.unwrap();
        assert!(revision > last);
        last = revision;
        assert!(!scene.terrain().needs_upload());
    }
    assert_eq!(scene.geometry_sink().last_revision, Some(last));
}

#[test]
fn minimal_grid_runs() {
    let mut config = Config::default();
    config.terrain.segments = 1;
    config.scatter.count = 1;
    let mut scene = build(&config, SEEDS);

    scene.frame();
    assert_eq!(scene.terrain().vertex_count(), 4);
    assert_eq!(scene.terrain().indices().len(), 6);
    assert_eq!(scene.instance_sink().instances.len(), 1);
    for v in scene.geometry_sink().vertices.iter() {
        let len = Vec3::from_array(v.normal).length();
        assert!((len - 1.0).abs() < 1e-4);
    }
}

#[test]
fn different_seeds_give_different_scenes() {
    let mut config = Config::default();
    config.terrain.segments = 8;
    config.scatter.count = 50;
    let a = run(&config, SEEDS, 3);
    let b = run(
        &config,
        SceneSeeds {
            terrain: 43,
            scatter: 8,
        },
        3,
    );
    assert_ne!(a.terrain().positions(), b.terrain().positions());
    assert_ne!(a.sampler().transforms(), b.sampler().transforms());
}
