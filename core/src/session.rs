use chrono::{DateTime, Utc};

use crate::*;

/// Runs games for one player against a balance and a history store.
///
/// Money moves in a fixed order: the bet is debited before a game is handed out, and a finished
/// game is credited and recorded exactly once, on the transition that finished it.
#[derive(Debug)]
pub struct Session<B, H> {
    balance: B,
    history: H,
    game: Option<GameState>,
}

impl<B: BalanceService, H: HistoryStore> Session<B, H> {
    pub fn new(balance: B, history: H) -> Self {
        Self {
            balance,
            history,
            game: None,
        }
    }

    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    pub fn balance(&self) -> f64 {
        self.balance.balance()
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Puts the balance back to a new player's, returning it. A game in progress keeps its
    /// stake and still pays out into the reset balance.
    pub fn reset_balance(&mut self) -> f64 {
        self.balance.reset();
        self.balance.balance()
    }

    pub fn start(
        &mut self,
        config: &GameConfig,
        generator: impl LayoutGenerator,
    ) -> Result<&GameState> {
        if self.game.as_ref().is_some_and(|game| game.status().is_playing()) {
            log::warn!("refusing to start a game while another is in progress");
            return Err(GameError::GameInProgress);
        }

        let config = config.validate()?;
        self.balance.debit(config.bet_amount).inspect_err(|err| {
            log::warn!("game not started: {}", err);
        })?;

        let state = match GameState::start_new_game(&config, generator) {
            Ok(state) => state,
            Err(err) => {
                log::warn!("game not started, refunding bet: {}", err);
                self.balance.credit(config.bet_amount)?;
                return Err(err);
            }
        };

        Ok(&*self.game.insert(state))
    }

    pub fn reveal(&mut self, tile_id: TileId, now: DateTime<Utc>) -> Result<RevealOutcome> {
        let game = self.game.as_ref().ok_or(GameError::NoActiveGame)?;
        let (next, outcome) = game.reveal_tile(tile_id)?;

        match outcome {
            RevealOutcome::HitHazard => {
                self.history
                    .record(HistoryRecord::new(&next, GameResult::Loss, 0.0, now));
            }
            RevealOutcome::Won => {
                let payout = next.potential_payout();
                self.balance.credit(payout)?;
                self.history
                    .record(HistoryRecord::new(&next, GameResult::Win, payout, now));
            }
            RevealOutcome::NoChange | RevealOutcome::Revealed => {}
        }
        if outcome.is_terminal() {
            log::debug!("game over, balance {:.2}", self.balance.balance());
        }

        self.game = Some(next);
        Ok(outcome)
    }

    /// Cashes out the running game, returning the payout. A payout of 0 means nothing happened.
    pub fn cash_out(&mut self, now: DateTime<Utc>) -> Result<f64> {
        let game = self.game.as_ref().ok_or(GameError::NoActiveGame)?;
        let (next, payout) = game.settle_cash_out();

        if payout > 0.0 {
            self.balance.credit(payout)?;
            self.history
                .record(HistoryRecord::new(&next, GameResult::Win, payout, now));
            self.game = Some(next);
        }

        Ok(payout)
    }
}

impl Default for Session<Wallet, MemoryHistory> {
    fn default() -> Self {
        Self::new(Wallet::default(), MemoryHistory::new())
    }
}
