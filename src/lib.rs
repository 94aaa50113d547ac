pub mod regime;
pub mod sim;
pub mod tokenizer;

// Re-export commonly used types
pub use regime::{classify, Classification, DomainError, Observation, Regime, Volatility, Volume};
pub use sim::{
    Artifact, ConfigError, ObservationSampler, RunAccumulator, SimulationConfig, SimulationEngine,
    SimulationResult,
};
pub use tokenizer::{TokenCounter, TokenizerError};
