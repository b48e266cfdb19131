use serde::{Deserialize, Serialize};

use crate::*;

/// What a player can see of a game: which tiles are open, how many hazards exist in total, and
/// the money on the table. Positions of covered hazards are deliberately not part of it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub revealed: [bool; GRID_SIZE],
    pub revealed_hazards: TileCount,
    pub hazard_count: TileCount,
    pub revealed_count: TileCount,
    pub bet_amount: f64,
    pub current_multiplier: f64,
    pub potential_payout: f64,
}

impl Observation {
    pub fn from_state(state: &GameState) -> Self {
        let tiles = state.tiles();
        let revealed = core::array::from_fn(|index| tiles[index].is_revealed);
        let revealed_hazards = tiles
            .iter()
            .filter(|tile| tile.is_revealed && tile.is_hazard)
            .count() as TileCount;

        Self {
            revealed,
            revealed_hazards,
            hazard_count: state.hazard_count(),
            revealed_count: state.revealed_count(),
            bet_amount: state.bet_amount(),
            current_multiplier: state.current_multiplier(),
            potential_payout: state.potential_payout(),
        }
    }

    pub const fn safe_tiles(&self) -> TileCount {
        safe_tile_count(self.hazard_count)
    }

    pub const fn remaining_safe_tiles(&self) -> TileCount {
        self.safe_tiles().saturating_sub(self.revealed_count)
    }

    pub const fn remaining_tiles(&self) -> TileCount {
        (GRID_SIZE as TileCount)
            .saturating_sub(self.revealed_count)
            .saturating_sub(self.revealed_hazards)
    }

    /// Chance that any one covered tile is safe, 0 when nothing is left to reveal.
    pub fn base_probability(&self) -> f64 {
        match self.remaining_tiles() {
            0 => 0.0,
            remaining => f64::from(self.remaining_safe_tiles()) / f64::from(remaining),
        }
    }

    pub fn unrevealed(&self) -> impl Iterator<Item = TileId> + '_ {
        self.revealed
            .iter()
            .enumerate()
            .filter(|(_, revealed)| !**revealed)
            .map(|(index, _)| index as TileId)
    }
}
