//! What a presentation layer gets to see of a game.
//!
//! Covered tiles never carry their hazard flag here, so a view can be shipped to an untrusted
//! client as is.

use mines_core::{
    EquilibriumStrategy, GameState, GameStatus, Recommendation, RiskMetrics, Tile, TileAdvice,
    TileCount, TileId,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileView {
    pub id: TileId,
    pub revealed: bool,
    /// Only known once the tile is open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hazard: Option<bool>,
    pub exploded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advice: Option<TileAdvice>,
}

impl From<&Tile> for TileView {
    fn from(tile: &Tile) -> Self {
        Self {
            id: tile.id,
            revealed: tile.is_revealed,
            hazard: tile.is_revealed.then_some(tile.is_hazard),
            exploded: tile.is_exploded,
            advice: tile.advice,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub status: GameStatus,
    pub hazard_count: TileCount,
    pub revealed_count: TileCount,
    pub bet_amount: f64,
    pub current_multiplier: f64,
    pub potential_payout: f64,
    pub tiles: Vec<TileView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<EquilibriumStrategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<Recommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_metrics: Option<RiskMetrics>,
}

impl From<&GameState> for GameView {
    fn from(state: &GameState) -> Self {
        Self {
            status: state.status(),
            hazard_count: state.hazard_count(),
            revealed_count: state.revealed_count(),
            bet_amount: state.bet_amount(),
            current_multiplier: state.current_multiplier(),
            potential_payout: state.potential_payout(),
            tiles: state.tiles().iter().map(TileView::from).collect(),
            strategy: state.strategy().cloned(),
            recommendation: state.recommendation().cloned(),
            risk_metrics: state.risk_metrics().copied(),
        }
    }
}

impl GameView {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
