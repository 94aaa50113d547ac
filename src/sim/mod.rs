//! Simulation driver for the frozen-artifact cost comparison.
//!
//! This module provides the complete comparison loop:
//! - Artifact freezing (one-time token cost measurement)
//! - Uniform observation sampling (seedable)
//! - Per-iteration accounting under both cost policies
//! - Result totals, distinct-output tracking, savings derivation

pub mod artifact;
pub mod config;
pub mod engine;
pub mod sampler;

pub use artifact::{Artifact, DEFAULT_ARTIFACT};
pub use config::{ConfigError, SimulationConfig};
pub use engine::{
    IterationTrace, RunAccumulator, SimulationEngine, SimulationResult, TRACED_ITERATIONS,
};
pub use sampler::ObservationSampler;
