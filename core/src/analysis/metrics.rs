use serde::{Deserialize, Serialize};

use super::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    /// Chance the next reveal hits a hazard, whatever tile is picked.
    pub current_risk: f64,
    /// Risk carried by the advisor's safest covered tile.
    pub optimal_risk: f64,
    pub deviation_from_equilibrium: f64,
}

impl RiskMetrics {
    pub fn compute(obs: &Observation, strategy: &EquilibriumStrategy) -> Self {
        let current_risk = match obs.remaining_tiles() {
            0 => 0.0,
            _ => 1.0 - obs.base_probability(),
        };

        let optimal_risk = obs
            .unrevealed()
            .map(|tile_id| strategy.safety_probability(tile_id))
            .reduce(f64::max)
            .map_or(0.0, |best| 1.0 - best);

        Self {
            current_risk,
            optimal_risk,
            deviation_from_equilibrium: 1.0 - strategy.stability_score(),
        }
    }
}
