use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

pub use equilibrium::*;
pub use metrics::*;
pub use observation::*;
pub use recommend::*;

use crate::*;

mod equilibrium;
mod metrics;
mod observation;
mod recommend;

/// Risk appetite used to scale the advisor's estimates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyMode {
    Conservative,
    #[default]
    Balanced,
    Aggressive,
}

impl StrategyMode {
    pub const ALL: [Self; 3] = [Self::Conservative, Self::Balanced, Self::Aggressive];

    pub const fn factor(self) -> f64 {
        match self {
            Self::Conservative => 0.7,
            Self::Balanced => 1.0,
            Self::Aggressive => 1.3,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Balanced => "balanced",
            Self::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for StrategyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyMode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or(GameError::UnknownStrategyMode)
    }
}

/// Everything the advisor derives from one state, recomputed from scratch on every call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advisory {
    pub strategy: EquilibriumStrategy,
    pub recommendation: Recommendation,
    pub risk_metrics: RiskMetrics,
}

impl Advisory {
    pub fn compute(obs: &Observation, mode: StrategyMode) -> Self {
        let strategy = analyze_observation(obs, mode);
        let recommendation = recommend_observation(obs, &strategy);
        let risk_metrics = RiskMetrics::compute(obs, &strategy);
        log::trace!(
            "advisory: mode {}, action {:?}, stability {:.3}",
            mode,
            recommendation.action,
            strategy.equilibrium.stability_score
        );
        Self {
            strategy,
            recommendation,
            risk_metrics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Aggressive".parse::<StrategyMode>(), Ok(StrategyMode::Aggressive));
        assert_eq!("balanced".parse::<StrategyMode>(), Ok(StrategyMode::Balanced));
        assert_eq!(
            "reckless".parse::<StrategyMode>(),
            Err(GameError::UnknownStrategyMode)
        );
    }

    #[test]
    fn mode_factors_are_ordered() {
        assert!(StrategyMode::Conservative.factor() < StrategyMode::Balanced.factor());
        assert!(StrategyMode::Balanced.factor() < StrategyMode::Aggressive.factor());
    }
}
