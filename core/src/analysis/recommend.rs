use alloc::format;
use alloc::string::String;

use serde::{Deserialize, Serialize};

use super::*;

/// A tile has to beat this estimated safety to be worth recommending.
pub const REVEAL_CONFIDENCE_FLOOR: f64 = 0.6;
/// Confidence reported when nothing stands out.
pub const NO_SIGNAL_CONFIDENCE: f64 = 0.5;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    Reveal { tile_id: TileId },
    CashOut,
    Continue,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_stability(stability_score: f64) -> Self {
        if stability_score > 0.7 {
            Self::Low
        } else if stability_score > 0.4 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub action: Action,
    pub confidence: f64,
    pub reasoning: String,
    pub expected_value: f64,
    pub risk_level: RiskLevel,
}

impl Recommendation {
    pub fn tile_id(&self) -> Option<TileId> {
        match self.action {
            Action::Reveal { tile_id } => Some(tile_id),
            Action::CashOut | Action::Continue => None,
        }
    }
}

/// Picks the single next move for `state`, given an analysis of that same state.
pub fn recommend(state: &GameState, strategy: &EquilibriumStrategy) -> Recommendation {
    recommend_observation(&Observation::from_state(state), strategy)
}

pub fn recommend_observation(obs: &Observation, strategy: &EquilibriumStrategy) -> Recommendation {
    let stability = strategy.stability_score();

    if obs.potential_payout >= strategy.cash_out_threshold() {
        return Recommendation {
            action: Action::CashOut,
            confidence: stability,
            reasoning: format!(
                "Payout at {:.2}x has reached the cash-out threshold of {:.2}.",
                obs.current_multiplier,
                strategy.cash_out_threshold()
            ),
            expected_value: obs.potential_payout,
            risk_level: RiskLevel::from_stability(stability),
        };
    }

    // strict comparison keeps the lowest id on ties
    let mut best: Option<(TileId, f64)> = None;
    for tile_id in obs.unrevealed() {
        let probability = strategy.safety_probability(tile_id);
        if best.is_none_or(|(_, best_probability)| probability > best_probability) {
            best = Some((tile_id, probability));
        }
    }

    match best {
        Some((tile_id, probability)) if probability > REVEAL_CONFIDENCE_FLOOR => Recommendation {
            action: Action::Reveal { tile_id },
            confidence: probability,
            reasoning: format!(
                "Tile {} is estimated {:.1}% safe.",
                tile_id,
                probability * 100.0
            ),
            expected_value: obs.bet_amount * obs.current_multiplier * probability,
            risk_level: RiskLevel::from_stability(stability),
        },
        _ => Recommendation {
            action: Action::Continue,
            confidence: NO_SIGNAL_CONFIDENCE,
            reasoning: String::from("No tile is safe enough to single out."),
            expected_value: obs.potential_payout,
            risk_level: RiskLevel::Medium,
        },
    }
}
