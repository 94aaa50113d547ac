//! Tokenizer adapter module.
//!
//! Wraps the external token-counting capability (tiktoken's cl100k_base)
//! behind a small deterministic counting interface.

pub mod counter;

pub use counter::{TokenCounter, TokenizerError, DEFAULT_ENCODING};
