//! Simulation engine for SKIRMISH.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameSnapshots for the presentation layer.

pub mod engine;
pub mod spawn;
pub mod systems;

pub use skirmish_core as core;
pub use engine::SimulationEngine;

#[cfg(test)]
mod tests;
