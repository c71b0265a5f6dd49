//! Search configuration: depth and time budgets, evaluation weights.
//!
//! Both types deserialize from any serde format; missing fields take their
//! defaults. A configuration is checked once, by [`SearchConfig::validate`],
//! before a [`Searcher`](crate::Searcher) is built from it.

use derive_more::{Display, Error};
use serde::{Deserialize, Deserializer};
use std::time::Duration;

/// Coefficients of the heuristic evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Weights {
    /// Value of each corner disc.
    pub corner: f64,
    /// Value of each non-corner disc on the outer ring.
    pub edge: f64,
    /// Value of each legal move more than the opponent has.
    pub mobility: f64,
    /// Value of each disc more than the opponent has.
    pub discs: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            corner: 25.0,
            edge: 4.0,
            mobility: 5.0,
            discs: 1.0,
        }
    }
}

impl Weights {
    fn named(&self) -> [(&'static str, f64); 4] {
        [
            ("corner", self.corner),
            ("edge", self.edge),
            ("mobility", self.mobility),
            ("discs", self.discs),
        ]
    }
}

/// Everything the search needs besides the position.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Deepest iterative-deepening pass, in plies. Must be at least 1.
    pub max_depth: u8,
    /// Stop deepening once this much time has passed. Checked between passes only.
    #[serde(rename = "time_limit_ms", deserialize_with = "millis")]
    pub time_limit: Option<Duration>,
    /// Search root moves in parallel. Needs the `parallel` feature.
    pub parallel: bool,
    pub weights: Weights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 6,
            time_limit: None,
            parallel: false,
            weights: Weights::default(),
        }
    }
}

fn millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
    Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
}

/// A configuration the search refuses to run with.
#[derive(Clone, Copy, Debug, Display, Error, PartialEq)]
pub enum InvalidConfigurationError {
    #[display(fmt = "search depth must be at least 1")]
    ZeroDepth,
    #[display(fmt = "weight `{}` must be finite and non-negative, got {}", name, value)]
    BadWeight { name: &'static str, value: f64 },
    #[display(fmt = "parallel search needs the `parallel` feature")]
    ParallelUnavailable,
}

impl SearchConfig {
    /// A default configuration searching to `max_depth`.
    pub fn with_depth(max_depth: u8) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), InvalidConfigurationError> {
        if self.max_depth == 0 {
            return Err(InvalidConfigurationError::ZeroDepth);
        }

        if self.parallel && cfg!(not(feature = "parallel")) {
            return Err(InvalidConfigurationError::ParallelUnavailable);
        }

        for (name, value) in self.weights.named() {
            if !value.is_finite() || value < 0.0 {
                return Err(InvalidConfigurationError::BadWeight { name, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(SearchConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_depth_is_rejected() {
        assert_eq!(
            SearchConfig::with_depth(0).validate(),
            Err(InvalidConfigurationError::ZeroDepth)
        );
    }

    #[test]
    fn negative_and_nan_weights_are_rejected() {
        let mut config = SearchConfig::default();
        config.weights.mobility = -1.0;
        assert_eq!(
            config.validate(),
            Err(InvalidConfigurationError::BadWeight {
                name: "mobility",
                value: -1.0
            })
        );

        config.weights.mobility = 0.0;
        config.weights.edge = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(InvalidConfigurationError::BadWeight { name: "edge", .. })
        ));
    }

    #[test]
    fn parallel_needs_the_feature() {
        let config = SearchConfig {
            parallel: true,
            ..SearchConfig::default()
        };
        if cfg!(feature = "parallel") {
            assert_eq!(config.validate(), Ok(()));
        } else {
            assert_eq!(
                config.validate(),
                Err(InvalidConfigurationError::ParallelUnavailable)
            );
        }
    }

    #[test]
    fn deserialize_from_toml() {
        let config: SearchConfig = toml::from_str(
            r#"
            max_depth = 8
            time_limit_ms = 1500

            [weights]
            corner = 40.0
            "#,
        )
        .unwrap();

        assert_eq!(config.max_depth, 8);
        assert_eq!(config.time_limit, Some(Duration::from_millis(1500)));
        assert_eq!(config.weights.corner, 40.0);
        assert_eq!(config.weights.edge, Weights::default().edge);
        assert!(!config.parallel);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(toml::from_str::<SearchConfig>("depth = 3").is_err());
    }
}
