use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdvisorConfig {
    pub enabled: bool,
    pub mode: StrategyMode,
}

impl AdvisorConfig {
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            mode: StrategyMode::Balanced,
        }
    }

    pub const fn with_mode(mode: StrategyMode) -> Self {
        Self {
            enabled: true,
            mode,
        }
    }

    /// The mode to analyze with, if the advisor is switched on.
    pub const fn active_mode(&self) -> Option<StrategyMode> {
        if self.enabled { Some(self.mode) } else { None }
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self::with_mode(StrategyMode::Balanced)
    }
}

/// Everything needed to start a game.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub hazard_count: TileCount,
    pub bet_amount: f64,
    pub advisor: AdvisorConfig,
    pub payout: PayoutCurve,
}

impl GameConfig {
    pub const DEFAULT_BET: f64 = 10.0;

    pub const fn new_unchecked(hazard_count: TileCount, bet_amount: f64) -> Self {
        Self {
            hazard_count,
            bet_amount,
            advisor: AdvisorConfig::with_mode(StrategyMode::Balanced),
            payout: PayoutCurve::new_unchecked(DEFAULT_RISK_CAPTURE),
        }
    }

    pub fn new(hazard_count: TileCount, bet_amount: f64) -> Result<Self> {
        Self::new_unchecked(hazard_count, bet_amount).validate()
    }

    pub const fn easy() -> Self {
        Self::new_unchecked(3, Self::DEFAULT_BET)
    }

    pub const fn medium() -> Self {
        Self::new_unchecked(5, Self::DEFAULT_BET)
    }

    pub const fn hard() -> Self {
        Self::new_unchecked(8, Self::DEFAULT_BET)
    }

    pub fn with_advisor(self, advisor: AdvisorConfig) -> Self {
        Self { advisor, ..self }
    }

    pub fn with_bet(self, bet_amount: f64) -> Self {
        Self { bet_amount, ..self }
    }

    pub fn with_hazards(self, hazard_count: TileCount) -> Self {
        Self {
            hazard_count,
            ..self
        }
    }

    /// Checks every field, without clamping anything into range.
    pub fn validate(self) -> Result<Self> {
        validate_hazard_count(self.hazard_count)?;
        if !(self.bet_amount.is_finite() && self.bet_amount > 0.0) {
            return Err(GameError::InvalidBet);
        }
        self.payout.validate()?;
        Ok(self)
    }

    pub const fn safe_tile_count(&self) -> TileCount {
        safe_tile_count(self.hazard_count)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::medium()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for config in [GameConfig::easy(), GameConfig::medium(), GameConfig::hard()] {
            assert_eq!(config.validate(), Ok(config));
        }
        assert_eq!(GameConfig::hard().safe_tile_count(), 17);
    }

    #[test]
    fn rejects_without_clamping() {
        assert_eq!(GameConfig::new(0, 10.0), Err(GameError::InvalidHazardCount(0)));
        assert_eq!(GameConfig::new(25, 10.0), Err(GameError::InvalidHazardCount(25)));
        assert_eq!(GameConfig::new(5, 0.0), Err(GameError::InvalidBet));
        assert_eq!(GameConfig::new(5, -1.0), Err(GameError::InvalidBet));
        assert_eq!(GameConfig::new(5, f64::INFINITY), Err(GameError::InvalidBet));
    }

    #[test]
    fn advisor_mode_only_when_enabled() {
        assert_eq!(
            AdvisorConfig::default().active_mode(),
            Some(StrategyMode::Balanced)
        );
        assert_eq!(AdvisorConfig::disabled().active_mode(), None);
    }
}
