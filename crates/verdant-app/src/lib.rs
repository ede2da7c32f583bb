//! Verdant application layer.
//!
//! Drives the terrain and vegetation scatter from a frame loop and hands
//! geometry and instance data to renderer sinks.

pub mod frame_loop;
pub mod platform;
pub mod scene;
pub mod sinks;
