//! Market regime classifier.
//!
//! Maps a sampled (volatility, volume) observation to a symbolic regime
//! and the variables that regime's decision depends on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error for categorical values outside the declared domains.
///
/// Inside the crate these cannot occur: the enums are closed and sampling
/// draws from them directly. The error exists for the string boundary
/// (CLI, config files) where arbitrary input can appear.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown volatility level: {0}")]
    UnknownVolatility(String),

    #[error("unknown volume level: {0}")]
    UnknownVolume(String),
}

/// Volatility level of a sampled market condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Volatility {
    Low,
    Medium,
    High,
    Extreme,
}

impl Volatility {
    /// The full volatility domain, in sampling order.
    pub const ALL: [Volatility; 4] = [Self::Low, Self::Medium, Self::High, Self::Extreme];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Extreme => "extreme",
        }
    }
}

impl fmt::Display for Volatility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Volatility {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "extreme" => Ok(Self::Extreme),
            other => Err(DomainError::UnknownVolatility(other.to_string())),
        }
    }
}

/// Volume level of a sampled market condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Volume {
    Low,
    High,
}

impl Volume {
    /// The full volume domain, in sampling order.
    pub const ALL: [Volume; 2] = [Self::Low, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Volume {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "high" => Ok(Self::High),
            other => Err(DomainError::UnknownVolume(other.to_string())),
        }
    }
}

/// Market regime produced by the rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Estable,
    Transicion,
    Inestable,
}

impl Regime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Estable => "estable",
            Self::Transicion => "transicion",
            Self::Inestable => "inestable",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sampled market condition. Immutable, scoped to a single iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Observation {
    pub volatility: Volatility,
    pub volume: Volume,
}

impl Observation {
    pub fn new(volatility: Volatility, volume: Volume) -> Self {
        Self { volatility, volume }
    }

    /// Render the per-iteration delta payload sent alongside the frozen
    /// artifact: `volatility=<v>\nvolume=<u>`.
    pub fn delta_text(&self) -> String {
        format!("volatility={}\nvolume={}", self.volatility, self.volume)
    }

    /// Classify this observation.
    pub fn classify(&self) -> Classification {
        classify(self.volatility, self.volume)
    }
}

/// Result of applying the rule set to an observation: the regime plus the
/// ordered list of variables the regime's decision depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Classification {
    pub regime: Regime,
    pub variables: &'static [&'static str],
}

impl Classification {
    /// Render as the canonical output string, e.g.
    /// `regime=transicion | variables=precio,volumen`.
    pub fn render(&self) -> String {
        format!("regime={} | variables={}", self.regime, self.variables.join(","))
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

const ESTABLE: Classification = Classification {
    regime: Regime::Estable,
    variables: &["precio"],
};

const TRANSICION: Classification = Classification {
    regime: Regime::Transicion,
    variables: &["precio", "volumen"],
};

const INESTABLE: Classification = Classification {
    regime: Regime::Inestable,
    variables: &["precio", "volumen", "volatilidad"],
};

/// Classify a (volatility, volume) pair.
///
/// The rule table, first match wins:
/// 1. low volatility and low volume -> estable
/// 2. medium volatility, any volume -> transicion
/// 3. anything else -> inestable
///
/// The match is exhaustive over the 8 possible pairs, so totality is
/// compiler-checked. Pure and deterministic.
pub fn classify(volatility: Volatility, volume: Volume) -> Classification {
    match (volatility, volume) {
        (Volatility::Low, Volume::Low) => ESTABLE,
        (Volatility::Medium, _) => TRANSICION,
        (Volatility::Low, Volume::High)
        | (Volatility::High, _)
        | (Volatility::Extreme, _) => INESTABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_table_exhaustive() {
        // Every one of the 8 pairs maps to exactly the regime in the table.
        let expected = [
            (Volatility::Low, Volume::Low, Regime::Estable),
            (Volatility::Low, Volume::High, Regime::Inestable),
            (Volatility::Medium, Volume::Low, Regime::Transicion),
            (Volatility::Medium, Volume::High, Regime::Transicion),
            (Volatility::High, Volume::Low, Regime::Inestable),
            (Volatility::High, Volume::High, Regime::Inestable),
            (Volatility::Extreme, Volume::Low, Regime::Inestable),
            (Volatility::Extreme, Volume::High, Regime::Inestable),
        ];

        for (vol, volu, regime) in expected {
            assert_eq!(classify(vol, volu).regime, regime, "({vol}, {volu})");
        }
    }

    #[test]
    fn test_regime_partition_sizes() {
        // 1 estable, 2 transicion, 5 inestable over the 8 pairs.
        let mut estable = 0;
        let mut transicion = 0;
        let mut inestable = 0;
        for vol in Volatility::ALL {
            for volu in Volume::ALL {
                match classify(vol, volu).regime {
                    Regime::Estable => estable += 1,
                    Regime::Transicion => transicion += 1,
                    Regime::Inestable => inestable += 1,
                }
            }
        }
        assert_eq!((estable, transicion, inestable), (1, 2, 5));
    }

    #[test]
    fn test_classification_deterministic() {
        for vol in Volatility::ALL {
            for volu in Volume::ALL {
                assert_eq!(classify(vol, volu), classify(vol, volu));
            }
        }
    }

    #[test]
    fn test_dependent_variables() {
        assert_eq!(classify(Volatility::Low, Volume::Low).variables, &["precio"]);
        assert_eq!(
            classify(Volatility::Medium, Volume::High).variables,
            &["precio", "volumen"]
        );
        assert_eq!(
            classify(Volatility::Extreme, Volume::Low).variables,
            &["precio", "volumen", "volatilidad"]
        );
    }

    #[test]
    fn test_render_output_string() {
        let output = Observation::new(Volatility::Medium, Volume::Low)
            .classify()
            .render();
        assert_eq!(output, "regime=transicion | variables=precio,volumen");
    }

    #[test]
    fn test_delta_text_format() {
        let obs = Observation::new(Volatility::Medium, Volume::Low);
        assert_eq!(obs.delta_text(), "volatility=medium\nvolume=low");
    }

    #[test]
    fn test_parse_from_str() {
        assert_eq!("extreme".parse::<Volatility>(), Ok(Volatility::Extreme));
        assert_eq!("high".parse::<Volume>(), Ok(Volume::High));
        assert_eq!(
            "severe".parse::<Volatility>(),
            Err(DomainError::UnknownVolatility("severe".to_string()))
        );
        assert_eq!(
            "medium".parse::<Volume>(),
            Err(DomainError::UnknownVolume("medium".to_string()))
        );
    }
}
