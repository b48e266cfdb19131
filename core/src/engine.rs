use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Idle,
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Authoritative state of one game.
///
/// Every transition takes `&self` and hands back a new value, so callers can keep old states
/// around for replay or undo. Once `Won` or `Lost`, only the advisory fields may change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    tiles: [Tile; GRID_SIZE],
    status: GameStatus,
    hazard_count: TileCount,
    revealed_count: TileCount,
    bet_amount: f64,
    current_multiplier: f64,
    potential_payout: f64,
    payout_curve: PayoutCurve,
    advisor_mode: Option<StrategyMode>,
    advisory: Option<Advisory>,
}

impl GameState {
    /// Builds a fresh board with `generator` and starts playing on it.
    pub fn start_new_game(config: &GameConfig, generator: impl LayoutGenerator) -> Result<Self> {
        let config = config.validate()?;
        let layout = generator.generate(config.hazard_count)?;
        Self::from_layout(&config, layout)
    }

    pub fn from_layout(config: &GameConfig, layout: HazardLayout) -> Result<Self> {
        let config = config.validate()?;
        if layout.hazard_count() != config.hazard_count {
            return Err(GameError::InvalidLayout);
        }

        let mut state = Self {
            tiles: layout.tiles(),
            status: GameStatus::Playing,
            hazard_count: config.hazard_count,
            revealed_count: 0,
            bet_amount: config.bet_amount,
            current_multiplier: 1.0,
            potential_payout: config.bet_amount,
            payout_curve: config.payout,
            advisor_mode: config.advisor.active_mode(),
            advisory: None,
        };
        state.refresh_advisory();

        log::debug!(
            "new game, hazards: {}, bet: {}",
            state.hazard_count,
            state.bet_amount
        );
        Ok(state)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn tiles(&self) -> &[Tile; GRID_SIZE] {
        &self.tiles
    }

    pub fn tile(&self, tile_id: TileId) -> Result<&Tile> {
        Ok(&self.tiles[validate_tile(tile_id)?])
    }

    pub fn hazard_count(&self) -> TileCount {
        self.hazard_count
    }

    pub fn safe_tile_count(&self) -> TileCount {
        safe_tile_count(self.hazard_count)
    }

    pub fn revealed_count(&self) -> TileCount {
        self.revealed_count
    }

    pub fn bet_amount(&self) -> f64 {
        self.bet_amount
    }

    pub fn current_multiplier(&self) -> f64 {
        self.current_multiplier
    }

    pub fn potential_payout(&self) -> f64 {
        self.potential_payout
    }

    pub fn advisor_mode(&self) -> Option<StrategyMode> {
        self.advisor_mode
    }

    pub fn advisory(&self) -> Option<&Advisory> {
        self.advisory.as_ref()
    }

    pub fn strategy(&self) -> Option<&EquilibriumStrategy> {
        self.advisory.as_ref().map(|advisory| &advisory.strategy)
    }

    pub fn recommendation(&self) -> Option<&Recommendation> {
        self.advisory.as_ref().map(|advisory| &advisory.recommendation)
    }

    pub fn risk_metrics(&self) -> Option<&RiskMetrics> {
        self.advisory.as_ref().map(|advisory| &advisory.risk_metrics)
    }

    /// The tile that ended the game, if a hazard was hit.
    pub fn exploded_tile(&self) -> Option<TileId> {
        self.tiles
            .iter()
            .find(|tile| tile.is_exploded)
            .map(|tile| tile.id)
    }

    /// Opens `tile_id`.
    ///
    /// Out-of-range ids are an error. Revealing an open tile, or revealing on a game that is not
    /// being played, hands back an identical state with [`RevealOutcome::NoChange`].
    pub fn reveal_tile(&self, tile_id: TileId) -> Result<(Self, RevealOutcome)> {
        let index = validate_tile(tile_id)?;

        if !self.status.is_playing() || self.tiles[index].is_revealed {
            return Ok((self.clone(), RevealOutcome::NoChange));
        }

        let mut next = self.clone();
        let tile = &mut next.tiles[index];
        tile.is_revealed = true;
        tile.advice = None;

        if tile.is_hazard {
            tile.is_exploded = true;
            next.status = GameStatus::Lost;
            next.refresh_advisory();
            log::debug!("tile {} exploded, bet of {} lost", tile_id, next.bet_amount);
            return Ok((next, RevealOutcome::HitHazard));
        }

        next.revealed_count += 1;
        next.current_multiplier = next
            .payout_curve
            .multiplier(next.revealed_count, next.hazard_count);
        next.potential_payout = next.bet_amount * next.current_multiplier;

        if next.revealed_count == next.safe_tile_count() {
            // the advisory is left as it was, there is nothing left to advise on
            next.status = GameStatus::Won;
            log::debug!("board cleared, payout {}", next.potential_payout);
            Ok((next, RevealOutcome::Won))
        } else {
            next.refresh_advisory();
            log::debug!(
                "tile {} safe, multiplier {:.4}",
                tile_id,
                next.current_multiplier
            );
            Ok((next, RevealOutcome::Revealed))
        }
    }

    /// What cashing out right now would pay, 0 when there is nothing to cash out.
    ///
    /// This only asks the question; [`Self::settle_cash_out`] commits the answer.
    pub fn cash_out(&self) -> f64 {
        if !self.status.is_playing() || self.revealed_count == 0 {
            0.0
        } else {
            self.potential_payout
        }
    }

    /// Ends a game in progress as won, returning the finished state with its payout. A state
    /// with nothing to cash out comes back unchanged with a payout of 0.
    pub fn settle_cash_out(&self) -> (Self, f64) {
        let payout = self.cash_out();
        let mut next = self.clone();
        if payout > 0.0 {
            next.status = GameStatus::Won;
            log::debug!("cashed out {} at {:.4}x", payout, next.current_multiplier);
        }
        (next, payout)
    }

    /// Re-runs the advisor under `mode`, regardless of the game's status.
    pub fn with_advisor(&self, mode: Option<StrategyMode>) -> Self {
        let mut next = self.clone();
        next.advisor_mode = mode;
        next.refresh_advisory();
        next
    }

    fn refresh_advisory(&mut self) {
        let Some(mode) = self.advisor_mode else {
            self.advisory = None;
            for tile in &mut self.tiles {
                tile.advice = None;
            }
            return;
        };

        let obs = Observation::from_state(self);
        let advisory = Advisory::compute(&obs, mode);

        for tile in self.tiles.iter_mut().filter(|tile| tile.is_unrevealed()) {
            tile.advice = Some(TileAdvice::new(advisory.strategy.safety_probability(tile.id)));
        }
        self.advisory = Some(advisory);
    }
}
