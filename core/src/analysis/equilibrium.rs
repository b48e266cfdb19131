use serde::{Deserialize, Serialize};

use super::*;

/// Divisor turning a Manhattan distance from the center into a position risk.
pub const POSITION_RISK_SCALE: f64 = 8.0;
/// House edge before scaling with the hazard count.
pub const HOUSE_BASE_EDGE: f64 = 0.02;
pub const HOUSE_EDGE_PER_HAZARD: f64 = 0.005;
/// Discount applied to the fair-odds multiplier the house would offer.
pub const HOUSE_MULTIPLIER_DISCOUNT: f64 = 0.95;
/// Largest gap between player value and house profit still called an equilibrium.
pub const EQUILIBRIUM_TOLERANCE: f64 = 0.1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStrategy {
    /// Estimated safety for every tile, indexed like the board. Open tiles are 0.
    pub reveal_probabilities: [f64; GRID_SIZE],
    pub cash_out_threshold: f64,
    pub expected_value: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseStrategy {
    pub optimal_multiplier: f64,
    pub expected_profit: f64,
    pub risk_adjustment: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquilibriumPoint {
    pub is_equilibrium: bool,
    pub player_expected_value: f64,
    pub house_expected_value: f64,
    pub stability_score: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquilibriumStrategy {
    pub player: PlayerStrategy,
    pub house: HouseStrategy,
    pub equilibrium: EquilibriumPoint,
}

impl EquilibriumStrategy {
    /// Panics if `tile_id` is off the board.
    pub fn safety_probability(&self, tile_id: TileId) -> f64 {
        self.player.reveal_probabilities[usize::from(tile_id)]
    }

    pub fn cash_out_threshold(&self) -> f64 {
        self.player.cash_out_threshold
    }

    pub fn stability_score(&self) -> f64 {
        self.equilibrium.stability_score
    }
}

/// Position heuristic in `[0, 0.5]`, growing with distance from the center tile.
pub fn position_risk(tile_id: TileId) -> f64 {
    f64::from(center_distance(tile_id)) / POSITION_RISK_SCALE
}

pub fn house_edge(hazard_count: TileCount) -> f64 {
    HOUSE_BASE_EDGE + HOUSE_EDGE_PER_HAZARD * f64::from(hazard_count)
}

/// Equilibrium estimate for the visible part of `state`.
pub fn analyze(state: &GameState, mode: StrategyMode) -> EquilibriumStrategy {
    analyze_observation(&Observation::from_state(state), mode)
}

pub fn analyze_observation(obs: &Observation, mode: StrategyMode) -> EquilibriumStrategy {
    let player = player_strategy(obs, mode);
    let house = house_strategy(obs);

    let gap = (player.expected_value - house.expected_profit).abs();
    let equilibrium = EquilibriumPoint {
        is_equilibrium: gap < EQUILIBRIUM_TOLERANCE,
        player_expected_value: player.expected_value,
        house_expected_value: house.expected_profit,
        stability_score: (1.0 - gap).max(0.0),
    };

    EquilibriumStrategy {
        player,
        house,
        equilibrium,
    }
}

fn player_strategy(obs: &Observation, mode: StrategyMode) -> PlayerStrategy {
    let base_probability = obs.base_probability();
    let factor = mode.factor();

    let mut reveal_probabilities = [0.0; GRID_SIZE];
    for tile_id in obs.unrevealed() {
        let probability = base_probability * factor * (1.0 - position_risk(tile_id));
        reveal_probabilities[usize::from(tile_id)] = probability.min(1.0);
    }

    let cash_out_threshold = obs.current_multiplier * obs.bet_amount * factor;

    // open tiles count as zero, the mean runs over the whole board
    let mean = reveal_probabilities.iter().sum::<f64>() / GRID_SIZE as f64;
    let expected_value =
        obs.bet_amount * obs.current_multiplier * mean - obs.bet_amount * (1.0 - mean);

    PlayerStrategy {
        reveal_probabilities,
        cash_out_threshold,
        expected_value,
    }
}

fn house_strategy(obs: &Observation) -> HouseStrategy {
    let base_probability = obs.base_probability();
    let optimal_multiplier = if obs.remaining_tiles() > 0 && base_probability > 0.0 {
        1.0 / base_probability * HOUSE_MULTIPLIER_DISCOUNT
    } else {
        1.0
    };

    let risk_adjustment = (f64::from(obs.revealed_count) / f64::from(obs.safe_tiles())).min(1.0);

    HouseStrategy {
        optimal_multiplier,
        expected_profit: obs.bet_amount * house_edge(obs.hazard_count),
        risk_adjustment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(hazards: &[TileId], bet: f64) -> GameState {
        let layout = HazardLayout::from_positions(hazards).unwrap();
        let config = GameConfig::new(layout.hazard_count(), bet)
            .unwrap()
            .with_advisor(AdvisorConfig::disabled());
        GameState::from_layout(&config, layout).unwrap()
    }

    fn reveal_all(mut state: GameState, tiles: &[TileId]) -> GameState {
        for &tile_id in tiles {
            state = state.reveal_tile(tile_id).unwrap().0;
        }
        state
    }

    #[test]
    fn center_tile_gets_base_probability() {
        let strategy = analyze(&game(&[0, 1, 2, 3, 4], 10.0), StrategyMode::Balanced);

        assert_eq!(strategy.safety_probability(12), 0.8);
        assert_eq!(strategy.safety_probability(0), 0.8 * (1.0 - 4.0 / 8.0));
        assert_eq!(strategy.safety_probability(7), 0.8 * (1.0 - 1.0 / 8.0));
    }

    #[test]
    fn revealed_tiles_have_zero_probability() {
        let state = reveal_all(game(&[0, 1, 2, 3, 4], 10.0), &[12, 13]);
        let strategy = analyze(&state, StrategyMode::Balanced);

        assert_eq!(strategy.safety_probability(12), 0.0);
        assert_eq!(strategy.safety_probability(13), 0.0);
        // 18 safe among 23 covered
        assert_eq!(strategy.safety_probability(11), 18.0 / 23.0 * (1.0 - 1.0 / 8.0));
    }

    #[test]
    fn aggressive_probabilities_cap_at_one() {
        let strategy = analyze(&game(&[0], 10.0), StrategyMode::Aggressive);

        assert_eq!(strategy.safety_probability(12), 1.0);
        assert!(strategy.player.reveal_probabilities.iter().all(|&p| p <= 1.0));
    }

    #[test]
    fn conservative_never_exceeds_balanced() {
        let states = [
            game(&[0, 1, 2, 3, 4], 10.0),
            reveal_all(game(&[5, 9, 20], 25.0), &[12, 6, 7, 18]),
            reveal_all(game(&[0, 1, 2, 3, 4, 5, 6, 7], 1.0), &[24, 23, 22]),
        ];

        for state in &states {
            let conservative = analyze(state, StrategyMode::Conservative);
            let balanced = analyze(state, StrategyMode::Balanced);
            for (c, b) in conservative
                .player
                .reveal_probabilities
                .iter()
                .zip(balanced.player.reveal_probabilities.iter())
            {
                assert!(c <= b);
            }
        }
    }

    #[test]
    fn cash_out_threshold_scales_with_mode() {
        let state = reveal_all(game(&[0, 1, 2, 3, 4], 10.0), &[12]);
        let payout = state.potential_payout();

        assert_eq!(
            analyze(&state, StrategyMode::Balanced).cash_out_threshold(),
            state.current_multiplier() * 10.0
        );
        assert!(analyze(&state, StrategyMode::Conservative).cash_out_threshold() < payout);
        assert!(analyze(&state, StrategyMode::Aggressive).cash_out_threshold() > payout);
    }

    #[test]
    fn player_expected_value_uses_board_mean() {
        let state = game(&[0, 1, 2, 3, 4], 10.0);
        let strategy = analyze(&state, StrategyMode::Balanced);

        let mean = strategy.player.reveal_probabilities.iter().sum::<f64>() / 25.0;
        let expected = 10.0 * 1.0 * mean - 10.0 * (1.0 - mean);
        assert_eq!(strategy.player.expected_value, expected);
        assert_eq!(strategy.equilibrium.player_expected_value, expected);
    }

    #[test]
    fn house_side_formulas() {
        let state = reveal_all(game(&[0, 1, 2, 3, 4], 10.0), &[12, 13, 14, 15]);
        let strategy = analyze(&state, StrategyMode::Balanced);

        assert_eq!(strategy.house.expected_profit, 10.0 * (0.02 + 0.005 * 5.0));
        assert_eq!(strategy.house.optimal_multiplier, 1.0 / (16.0 / 21.0) * 0.95);
        assert_eq!(strategy.house.risk_adjustment, 4.0 / 20.0);
        assert_eq!(
            strategy.equilibrium.house_expected_value,
            strategy.house.expected_profit
        );
    }

    #[test]
    fn cleared_board_falls_back_to_even_multiplier() {
        let safe: [TileId; 20] = core::array::from_fn(|i| i as TileId + 5);
        let state = reveal_all(game(&[0, 1, 2, 3, 4], 10.0), &safe);
        assert_eq!(state.status(), GameStatus::Won);

        // only hazards are left covered
        let obs = Observation::from_state(&state);
        assert_eq!(obs.remaining_tiles(), 5);
        assert_eq!(obs.base_probability(), 0.0);

        let strategy = analyze(&state, StrategyMode::Balanced);
        assert_eq!(strategy.house.optimal_multiplier, 1.0);
        assert!(strategy.player.reveal_probabilities.iter().all(|&p| p == 0.0));
    }

    #[test]
    fn stability_follows_value_gap() {
        let strategy = analyze(&game(&[0, 1, 2, 3, 4], 10.0), StrategyMode::Balanced);
        let gap = (strategy.player.expected_value - strategy.house.expected_profit).abs();

        assert_eq!(strategy.equilibrium.stability_score, (1.0 - gap).max(0.0));
        assert_eq!(strategy.equilibrium.is_equilibrium, gap < 0.1);
        assert!((0.0..=1.0).contains(&strategy.equilibrium.stability_score));
    }

    #[test]
    fn small_bets_can_reach_equilibrium() {
        // with a tiny stake both values shrink towards zero
        let strategy = analyze(&game(&[0, 1, 2, 3, 4], 0.01), StrategyMode::Balanced);

        assert!(strategy.equilibrium.is_equilibrium);
        assert!(strategy.equilibrium.stability_score > 0.9);
    }

    #[test]
    fn analysis_ignores_hidden_hazard_positions() {
        let a = analyze(&game(&[0, 1, 2, 3, 4], 10.0), StrategyMode::Balanced);
        let b = analyze(&game(&[20, 21, 22, 23, 24], 10.0), StrategyMode::Balanced);

        assert_eq!(a, b);
    }
}
