//! Frozen decision-context artifact.

use serde::{Deserialize, Serialize};

use crate::tokenizer::TokenCounter;

/// Default artifact: the regime table and rule set, rendered as the full
/// context a baseline caller would resend with every request.
pub const DEFAULT_ARTIFACT: &str = "
REGIMES:
- estable
- transicion
- inestable

RULES:
1. volatility == low and volume == low
   -> estable | precio

2. volatility == medium
   -> transicion | precio, volumen

3. volatility in (high, extreme)
   -> inestable | precio, volumen, volatilidad
";

/// An immutable context block with its token count measured once at
/// construction. Under the frozen policy this cost is paid a single time;
/// under the baseline policy it is charged again every iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    text: String,
    tokens: usize,
}

impl Artifact {
    /// Freeze `text`, measuring its token cost up front.
    pub fn freeze(text: impl Into<String>, counter: &TokenCounter) -> Self {
        let text = text.into();
        let tokens = counter.count(&text);
        Self { text, tokens }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cached token count, measured at freeze time.
    pub fn tokens(&self) -> usize {
        self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freeze_caches_token_count() {
        let counter = TokenCounter::cl100k().unwrap();
        let artifact = Artifact::freeze(DEFAULT_ARTIFACT, &counter);
        assert_eq!(artifact.tokens(), counter.count(DEFAULT_ARTIFACT));
        assert!(artifact.tokens() > 0);
        assert_eq!(artifact.text(), DEFAULT_ARTIFACT);
    }

    #[test]
    fn test_empty_artifact_is_free() {
        let counter = TokenCounter::cl100k().unwrap();
        let artifact = Artifact::freeze("", &counter);
        assert_eq!(artifact.tokens(), 0);
    }
}
