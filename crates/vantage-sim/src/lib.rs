//! Simulation engine for the VANTAGE operational picture.
//!
//! Owns the hecs ECS world, runs the motion and status systems at a fixed
//! tick rate, and produces `PictureSnapshot`s for the renderer. Completely
//! headless (no timer or thread dependency), enabling deterministic testing.

pub mod engine;
pub mod scenario;
pub mod systems;

pub use engine::{SimConfig, SimulationEngine};
pub use vantage_core as core;
