use chrono::Utc;
use mines_core::{
    Action, AdvisorConfig, GameConfig, GameError, GameState, HistoryStore, MemoryHistory,
    PlayerStats, RandomLayoutGenerator, Session, TileId, Wallet,
};

#[derive(Copy, Clone, Debug, PartialEq)]
enum Move {
    Reveal(TileId),
    CashOut,
}

/// Picks the next move for a game in progress, following the advisor where it can.
///
/// A cash-out advice is only followed once there is something to cash out. Without a usable
/// recommendation the covered tile with the best advice is opened, lowest id first.
fn next_move(state: &GameState) -> Option<Move> {
    match state.recommendation().map(|recommendation| recommendation.action) {
        Some(Action::CashOut) if state.cash_out() > 0.0 => return Some(Move::CashOut),
        Some(Action::Reveal { tile_id }) => return Some(Move::Reveal(tile_id)),
        _ => {}
    }

    let mut best: Option<(TileId, f64)> = None;
    for tile in state.tiles().iter().filter(|tile| tile.is_unrevealed()) {
        let probability = tile.safety_probability().unwrap_or(0.0);
        if best.is_none_or(|(_, best)| probability > best) {
            best = Some((tile.id, probability));
        }
    }
    best.map(|(tile_id, _)| Move::Reveal(tile_id))
}

/// Plays up to `games` games on their own, stopping early when the balance runs dry.
pub(crate) fn autoplay(
    config: &GameConfig,
    seed: u64,
    games: u32,
    balance: f64,
) -> anyhow::Result<(PlayerStats, f64)> {
    let config = match config.advisor.active_mode() {
        Some(_) => *config,
        None => {
            log::warn!("auto play needs the advisor, using the balanced mode");
            config.with_advisor(AdvisorConfig::default())
        }
    };

    let mut session = Session::new(Wallet::new(balance), MemoryHistory::new());

    for game in 0..games {
        let generator = RandomLayoutGenerator::new(seed.wrapping_add(u64::from(game)));
        match session.start(&config, generator) {
            Ok(_) => {}
            Err(GameError::InsufficientBalance { balance, .. }) => {
                log::info!("stopping after {} games, balance {:.2}", game, balance);
                break;
            }
            Err(err) => return Err(err.into()),
        }

        while let Some(state) = session.game().filter(|state| state.status().is_playing()) {
            let Some(next) = next_move(state) else {
                break;
            };
            log::trace!("game {}: {:?}", game, next);
            match next {
                Move::Reveal(tile_id) => {
                    session.reveal(tile_id, Utc::now())?;
                }
                Move::CashOut => {
                    session.cash_out(Utc::now())?;
                }
            }
        }

        if let Some(state) = session.game() {
            log::debug!("game {}: {}", game, crate::render::status_line(state));
        }
    }

    Ok((session.history().stats(), session.balance()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mines_core::{HazardLayout, StrategyMode};

    fn game(mode: StrategyMode) -> GameState {
        let layout = HazardLayout::from_positions(&[0, 6, 12, 18, 24]).unwrap();
        let config = GameConfig::medium().with_advisor(AdvisorConfig::with_mode(mode));
        GameState::from_layout(&config, layout).unwrap()
    }

    #[test]
    fn fresh_cash_out_advice_opens_a_tile_instead() {
        let state = game(StrategyMode::Balanced);
        assert_eq!(state.recommendation().unwrap().action, Action::CashOut);

        // every covered tile is tied on a fresh board apart from position, centre wins
        assert_eq!(next_move(&state), Some(Move::Reveal(12)));
    }

    #[test]
    fn cash_out_advice_is_followed_after_progress() {
        let (state, _) = game(StrategyMode::Balanced).reveal_tile(7).unwrap();

        assert_eq!(next_move(&state), Some(Move::CashOut));
    }

    #[test]
    fn reveal_advice_is_followed() {
        let state = game(StrategyMode::Aggressive);

        assert_eq!(next_move(&state), Some(Move::Reveal(12)));
    }

    #[test]
    fn plays_every_game_and_keeps_the_books() {
        let (stats, balance) = autoplay(&GameConfig::medium(), 42, 20, 1000.0).unwrap();

        assert_eq!(stats.total_games, 20);
        assert_eq!(stats.total_wins + stats.total_losses, 20);
        assert_eq!(stats.total_wagered, 200.0);
        assert!((balance - (1000.0 + stats.net())).abs() < 1e-9);
    }

    #[test]
    fn stops_when_broke() {
        let (stats, balance) = autoplay(&GameConfig::medium(), 42, 20, 15.0).unwrap();

        assert!(stats.total_games >= 1);
        if stats.total_games < 20 {
            assert!(balance < 10.0);
        }
    }

    #[test]
    fn disabled_advisor_is_switched_on() {
        let config = GameConfig::easy().with_advisor(AdvisorConfig::disabled());

        let (stats, _) = autoplay(&config, 1, 3, 1000.0).unwrap();

        assert_eq!(stats.total_games, 3);
    }
}
