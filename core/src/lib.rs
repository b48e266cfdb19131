#![no_std]

extern crate alloc;

use core::ops::Index;
use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use ledger::*;
pub use payout::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod analysis;
mod config;
mod engine;
mod error;
mod generator;
mod ledger;
mod payout;
mod session;
mod tile;
mod types;

/// Which tiles hide a hazard. Built once per game and never changed afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HazardLayout {
    hazard_mask: [bool; GRID_SIZE],
    hazard_count: TileCount,
}

impl HazardLayout {
    pub fn from_hazard_mask(hazard_mask: [bool; GRID_SIZE]) -> Result<Self> {
        let hazard_count = hazard_mask.iter().filter(|&&is_hazard| is_hazard).count();
        let hazard_count = validate_hazard_count(hazard_count as TileCount)?;
        Ok(Self {
            hazard_mask,
            hazard_count,
        })
    }

    pub fn from_positions(positions: &[TileId]) -> Result<Self> {
        let mut hazard_mask = [false; GRID_SIZE];

        for &tile_id in positions {
            let index = validate_tile(tile_id).map_err(|_| GameError::InvalidLayout)?;
            if hazard_mask[index] {
                return Err(GameError::InvalidLayout);
            }
            hazard_mask[index] = true;
        }

        Self::from_hazard_mask(hazard_mask)
    }

    pub fn hazard_count(&self) -> TileCount {
        self.hazard_count
    }

    pub fn safe_tile_count(&self) -> TileCount {
        safe_tile_count(self.hazard_count)
    }

    /// Panics if `tile_id` is off the board.
    pub fn contains_hazard(&self, tile_id: TileId) -> bool {
        self[tile_id]
    }

    pub fn hazard_positions(&self) -> impl Iterator<Item = TileId> + '_ {
        self.hazard_mask
            .iter()
            .enumerate()
            .filter(|(_, is_hazard)| **is_hazard)
            .map(|(index, _)| index as TileId)
    }

    pub(crate) fn tiles(&self) -> [Tile; GRID_SIZE] {
        core::array::from_fn(|index| Tile::new(index as TileId, self.hazard_mask[index]))
    }
}

impl Index<TileId> for HazardLayout {
    type Output = bool;

    fn index(&self, tile_id: TileId) -> &Self::Output {
        &self.hazard_mask[usize::from(tile_id)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitHazard,
    Won,
}

impl RevealOutcome {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::HitHazard | Self::Won)
    }
}
