//! Market regime classification module.
//!
//! A closed rule set over two categorical inputs:
//! - estable: low volatility, low volume
//! - transicion: medium volatility, any volume
//! - inestable: everything else (high/extreme volatility, or low/high mix)

pub mod classifier;

pub use classifier::{
    classify, Classification, DomainError, Observation, Regime, Volatility, Volume,
};
