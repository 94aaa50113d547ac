//! Core simulation engine.
//!
//! Runs the comparison loop:
//! 1. Sample a (volatility, volume) observation
//! 2. Render the delta payload and measure its token cost
//! 3. Charge the frozen policy the delta alone
//! 4. Charge the baseline policy the artifact plus the delta
//! 5. Classify the observation and record the rendered output
//! After the loop, derive totals and the savings percentage.

use std::collections::BTreeSet;

use tracing::debug;

use crate::regime::Observation;
use crate::tokenizer::TokenCounter;

use super::artifact::Artifact;
use super::config::{ConfigError, SimulationConfig};
use super::sampler::ObservationSampler;

/// Number of leading iterations echoed in the execution trace.
pub const TRACED_ITERATIONS: usize = 5;

/// One traced iteration, kept for the execution echo.
#[derive(Debug, Clone)]
pub struct IterationTrace {
    /// Zero-based iteration index.
    pub index: usize,
    pub observation: Observation,
    pub delta_text: String,
    pub delta_tokens: usize,
    /// Rendered classification output.
    pub output: String,
}

/// Mutable per-run state, owned exclusively by the simulation loop.
#[derive(Debug, Clone)]
pub struct RunAccumulator {
    artifact_tokens: usize,
    iterations: usize,
    delta_tokens_total: usize,
    baseline_tokens_total: usize,
    outputs: BTreeSet<String>,
}

impl RunAccumulator {
    pub fn new(artifact_tokens: usize) -> Self {
        Self {
            artifact_tokens,
            iterations: 0,
            delta_tokens_total: 0,
            baseline_tokens_total: 0,
            outputs: BTreeSet::new(),
        }
    }

    /// Record one iteration: its delta cost under both policies and the
    /// classification output it produced.
    pub fn record(&mut self, delta_tokens: usize, output: &str) {
        self.iterations += 1;
        self.delta_tokens_total += delta_tokens;
        self.baseline_tokens_total += self.artifact_tokens + delta_tokens;
        self.outputs.insert(output.to_string());
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn delta_tokens_total(&self) -> usize {
        self.delta_tokens_total
    }

    pub fn baseline_tokens_total(&self) -> usize {
        self.baseline_tokens_total
    }

    /// Frozen-policy total so far: artifact paid once, deltas every time.
    pub fn frozen_total(&self) -> usize {
        self.artifact_tokens + self.delta_tokens_total
    }

    pub fn outputs(&self) -> &BTreeSet<String> {
        &self.outputs
    }

    fn finish(self, traces: Vec<IterationTrace>) -> SimulationResult {
        SimulationResult {
            iterations: self.iterations,
            artifact_tokens: self.artifact_tokens,
            delta_tokens_total: self.delta_tokens_total,
            baseline_tokens_total: self.baseline_tokens_total,
            distinct_outputs: self.outputs,
            traces,
        }
    }
}

/// Result of a completed simulation run.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// Iterations executed.
    pub iterations: usize,

    /// One-time artifact cost.
    pub artifact_tokens: usize,

    /// Sum of per-iteration delta costs.
    pub delta_tokens_total: usize,

    /// Baseline total: every iteration paid artifact + delta.
    pub baseline_tokens_total: usize,

    /// Distinct classification outputs observed.
    pub distinct_outputs: BTreeSet<String>,

    /// Echo of the first few iterations.
    pub traces: Vec<IterationTrace>,
}

impl SimulationResult {
    /// Frozen-policy grand total: artifact once plus all deltas.
    pub fn frozen_total(&self) -> usize {
        self.artifact_tokens + self.delta_tokens_total
    }

    /// Savings of the frozen policy over the baseline, as a percentage.
    /// Undefined (None) when the baseline spent nothing.
    pub fn savings_pct(&self) -> Option<f64> {
        if self.baseline_tokens_total == 0 {
            return None;
        }
        Some(100.0 * (1.0 - self.frozen_total() as f64 / self.baseline_tokens_total as f64))
    }

    /// Generate the summary report.
    pub fn summary(&self) -> String {
        let savings = match self.savings_pct() {
            Some(pct) => format!("~{:.2}%", pct),
            None => "n/a (baseline spent no tokens)".to_string(),
        };

        format!(
            "=== SUMMARY ===\n\
             Iterations: {}\n\
             Unique outputs: {}\n\
             \n\
             WITH FROZEN ARTIFACT:\n\
             - Artifact tokens (once):    {}\n\
             - Delta tokens total:        {}\n\
             - TOTAL TOKENS USED:         {}\n\
             \n\
             WITHOUT ARTIFACT (baseline):\n\
             - TOTAL TOKENS USED:         {}\n\
             \n\
             === COST COMPARISON ===\n\
             Estimated token savings: {}",
            self.iterations,
            self.distinct_outputs.len(),
            self.artifact_tokens,
            self.delta_tokens_total,
            self.frozen_total(),
            self.baseline_tokens_total,
            savings,
        )
    }
}

/// The simulation engine: a frozen artifact, a token counter, and the
/// configuration driving the sampling loop.
pub struct SimulationEngine {
    config: SimulationConfig,
    counter: TokenCounter,
    artifact: Artifact,
}

impl SimulationEngine {
    /// Create a new engine. Freezes the artifact up front so its token
    /// cost is measured exactly once per run.
    pub fn new(config: SimulationConfig, counter: TokenCounter) -> Result<Self, ConfigError> {
        config.validate()?;
        let artifact = Artifact::freeze(config.artifact_text.clone(), &counter);
        Ok(Self {
            config,
            counter,
            artifact,
        })
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run the simulation. The sampler is rebuilt from the config each
    /// call, so seeded runs produce identical results call-to-call.
    pub fn run(&self) -> SimulationResult {
        debug!(
            iterations = self.config.iterations,
            artifact_tokens = self.artifact.tokens(),
            seed = ?self.config.seed,
            "starting simulation"
        );

        let mut sampler = ObservationSampler::new(
            self.config.volatility_domain.clone(),
            self.config.volume_domain.clone(),
            self.config.seed,
        );

        let mut accumulator = RunAccumulator::new(self.artifact.tokens());
        let mut traces = Vec::with_capacity(TRACED_ITERATIONS.min(self.config.iterations));

        for index in 0..self.config.iterations {
            let observation = sampler.sample();
            let delta_text = observation.delta_text();
            let delta_tokens = self.counter.count(&delta_text);
            let output = observation.classify().render();

            accumulator.record(delta_tokens, &output);

            if index < TRACED_ITERATIONS {
                traces.push(IterationTrace {
                    index,
                    observation,
                    delta_text,
                    delta_tokens,
                    output,
                });
            }
        }

        accumulator.finish(traces)
    }
}
