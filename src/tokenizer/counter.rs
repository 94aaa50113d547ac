//! Token counter backed by tiktoken's byte-pair encodings.

use thiserror::Error;
use tiktoken_rs::CoreBPE;

/// Name of the encoding the simulation charges costs in.
pub const DEFAULT_ENCODING: &str = "cl100k_base";

#[derive(Error, Debug)]
pub enum TokenizerError {
    #[error("failed to load the {0} token encoding")]
    EncodingUnavailable(
        &'static str,
        #[source] Box<dyn std::error::Error + Send + Sync>,
    ),
}

/// Deterministic token counter for a fixed encoding.
///
/// Acquired once at startup; a missing encoding is fatal for the whole run
/// since every cost in the simulation is denominated in its tokens.
pub struct TokenCounter {
    bpe: CoreBPE,
}

impl TokenCounter {
    /// Load the cl100k_base encoding.
    pub fn cl100k() -> Result<Self, TokenizerError> {
        let bpe = tiktoken_rs::cl100k_base()
            .map_err(|e| TokenizerError::EncodingUnavailable(DEFAULT_ENCODING, e.into()))?;
        Ok(Self { bpe })
    }

    /// Count tokens in `text`. Ordinary encoding, no special tokens.
    pub fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_loads() {
        assert!(TokenCounter::cl100k().is_ok());
    }

    #[test]
    fn test_empty_text_is_free() {
        let counter = TokenCounter::cl100k().unwrap();
        assert_eq!(counter.count(""), 0);
    }

    #[test]
    fn test_count_deterministic() {
        let counter = TokenCounter::cl100k().unwrap();
        let text = "volatility=medium\nvolume=low";
        let first = counter.count(text);
        assert!(first > 0);
        assert_eq!(counter.count(text), first);
    }

    #[test]
    fn test_longer_text_costs_more() {
        let counter = TokenCounter::cl100k().unwrap();
        let short = counter.count("volatility=low");
        let long = counter.count("volatility=low\nvolume=high\nextra line of context");
        assert!(long > short);
    }
}
