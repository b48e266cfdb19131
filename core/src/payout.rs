use serde::{Deserialize, Serialize};

use crate::*;

/// Share of the per-step fair-odds increment that is paid out. The remainder is the house edge.
pub const DEFAULT_RISK_CAPTURE: f64 = 0.08;

/// Compounding payout curve.
///
/// Each safe reveal multiplies the payout by `1 + (1/p - 1) * risk_capture`, where `p` is the
/// chance that the reveal was safe given the tiles still covered at that step.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutCurve {
    pub risk_capture: f64,
}

impl PayoutCurve {
    pub const fn new_unchecked(risk_capture: f64) -> Self {
        Self { risk_capture }
    }

    pub fn new(risk_capture: f64) -> Result<Self> {
        Self::new_unchecked(risk_capture).validate()
    }

    pub fn validate(self) -> Result<Self> {
        if self.risk_capture > 0.0 && self.risk_capture <= 1.0 {
            Ok(self)
        } else {
            Err(GameError::InvalidRiskCapture)
        }
    }

    /// Multiplier after `revealed_count` safe reveals with `hazard_count` hazards on the board.
    ///
    /// `revealed_count` must not exceed the number of safe tiles.
    pub fn multiplier(&self, revealed_count: TileCount, hazard_count: TileCount) -> f64 {
        debug_assert!(revealed_count <= safe_tile_count(hazard_count));

        if revealed_count == 0 {
            return 1.0;
        }

        let grid_size = GRID_SIZE as f64;
        let safe_tiles = f64::from(safe_tile_count(hazard_count));

        let multiplier = (1..=revealed_count).fold(1.0, |multiplier, step| {
            let step = f64::from(step);
            let survival = (safe_tiles - step + 1.0) / (grid_size - step + 1.0);
            multiplier * (1.0 + (1.0 / survival - 1.0) * self.risk_capture)
        });

        multiplier.max(1.0)
    }
}

impl Default for PayoutCurve {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_RISK_CAPTURE)
    }
}

/// Chance of surviving `revealed_count` reveals in a row from a fresh board.
pub fn survival_probability(revealed_count: TileCount, hazard_count: TileCount) -> f64 {
    let grid_size = GRID_SIZE as f64;
    let safe_tiles = f64::from(safe_tile_count(hazard_count));

    (1..=revealed_count)
        .map(|step| {
            let step = f64::from(step);
            (safe_tiles - step + 1.0) / (grid_size - step + 1.0)
        })
        .product()
}

/// Multiplier on the default payout curve.
pub fn multiplier(revealed_count: TileCount, hazard_count: TileCount) -> f64 {
    PayoutCurve::default().multiplier(revealed_count, hazard_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_reveals_pays_even() {
        for hazards in MIN_HAZARDS..=MAX_HAZARDS {
            assert_eq!(multiplier(0, hazards), 1.0);
        }
    }

    #[test]
    fn first_reveal_with_five_hazards() {
        let survival: f64 = 20.0 / 25.0;
        let expected = 1.0 + (1.0 / survival - 1.0) * DEFAULT_RISK_CAPTURE;

        assert_eq!(multiplier(1, 5), expected);
        assert!((multiplier(1, 5) - 1.02).abs() < 1e-12);
    }

    #[test]
    fn second_reveal_compounds() {
        let first = 1.0 + (25.0 / 20.0 - 1.0) * DEFAULT_RISK_CAPTURE;
        let second = 1.0 + (24.0 / 19.0 - 1.0) * DEFAULT_RISK_CAPTURE;

        assert!((multiplier(2, 5) - first * second).abs() < 1e-12);
    }

    #[test]
    fn strictly_increasing_in_reveals() {
        for hazards in MIN_HAZARDS..=MAX_HAZARDS {
            let safe = safe_tile_count(hazards);
            for revealed in 1..=safe {
                assert!(
                    multiplier(revealed, hazards) > multiplier(revealed - 1, hazards),
                    "hazards {hazards}, revealed {revealed}"
                );
            }
        }
    }

    #[test]
    fn strictly_increasing_in_hazards() {
        for hazards in MIN_HAZARDS..MAX_HAZARDS {
            let more = hazards + 1;
            for revealed in 1..=safe_tile_count(more) {
                assert!(
                    multiplier(revealed, more) > multiplier(revealed, hazards),
                    "hazards {hazards}, revealed {revealed}"
                );
            }
        }
    }

    #[test]
    fn survival_shrinks_with_each_reveal() {
        assert_eq!(survival_probability(0, 5), 1.0);
        assert_eq!(survival_probability(1, 5), 20.0 / 25.0);
        assert!((survival_probability(2, 5) - 20.0 / 25.0 * 19.0 / 24.0).abs() < 1e-12);
        assert_eq!(survival_probability(2, 24), 0.0);
    }

    #[test]
    fn full_capture_matches_fair_odds() {
        let full = PayoutCurve::new(1.0).unwrap();
        for revealed in 1..=10 {
            let fair = 1.0 / survival_probability(revealed, 5);
            assert!((full.multiplier(revealed, 5) - fair).abs() < 1e-9 * fair);
        }
    }

    #[test]
    fn risk_capture_is_configurable() {
        let full = PayoutCurve::new(1.0).unwrap();

        // capturing all of the risk is the fair-odds multiplier
        assert!((full.multiplier(1, 5) - 1.25).abs() < 1e-12);
        assert!(full.multiplier(3, 5) > multiplier(3, 5));
    }

    #[test]
    fn rejects_out_of_range_risk_capture() {
        assert_eq!(PayoutCurve::new(0.0), Err(GameError::InvalidRiskCapture));
        assert_eq!(PayoutCurve::new(1.5), Err(GameError::InvalidRiskCapture));
        assert_eq!(PayoutCurve::new(f64::NAN), Err(GameError::InvalidRiskCapture));
    }
}
