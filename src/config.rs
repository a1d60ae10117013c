use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Knobs of a single search. The defaults reproduce plain best-first search over the full
/// 8-neighbourhood with an unscaled heuristic and no pruning of superseded frontier entries.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchConfig {
    /// Expand the 4 diagonal offsets in addition to the 4 orthogonal ones.
    pub allow_diagonal_move: bool,
    /// Scales the heuristic term of the f-score (Weighted A* when above 1.0).
    pub heuristic_factor: f64,
    /// Skip frontier entries whose cost has been superseded in the best-cost table.
    /// This can change which of several equal-cost paths is returned, so it is off by default.
    pub skip_stale_entries: bool,
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            allow_diagonal_move: true,
            heuristic_factor: 1.0,
            skip_stale_entries: false,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.heuristic_factor.is_finite() || self.heuristic_factor < 0.0 {
            return Err(ConfigError::InvalidHeuristicFactor(self.heuristic_factor));
        }
        Ok(())
    }
}

/// Errors raised while assembling a search configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The heuristic factor is negative, infinite or NaN.
    InvalidHeuristicFactor(f64),
    /// No built-in heuristic goes by this name.
    UnknownHeuristic(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHeuristicFactor(factor) => write!(
                f,
                "heuristic factor must be finite and non-negative, got {factor}"
            ),
            Self::UnknownHeuristic(name) => write!(f, "unknown heuristic '{name}'"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SearchConfig::default();
        assert!(config.allow_diagonal_move);
        assert!(!config.skip_stale_entries);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_heuristic_factor() {
        for factor in [-0.5, f64::NAN, f64::INFINITY] {
            let config = SearchConfig {
                heuristic_factor: factor,
                ..SearchConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidHeuristicFactor(_))
            ));
        }
    }

    #[test]
    fn error_messages() {
        let err = ConfigError::UnknownHeuristic("manhattan".to_owned());
        assert_eq!(err.to_string(), "unknown heuristic 'manhattan'");
        let err = ConfigError::InvalidHeuristicFactor(-1.0);
        assert!(err.to_string().contains("-1"));
    }
}
