//! Simulation engine for SHADOWLINE.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate, dispatches
//! detection events through the bus, and produces GameStateSnapshots for
//! the presentation layer.

pub mod bus;
pub mod engine;
pub mod systems;
pub mod world_setup;

pub use bus::EventBus;
pub use engine::SimulationEngine;
pub use shadowline_core as core;

#[cfg(test)]
mod tests;
