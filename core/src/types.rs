use crate::*;

/// Row-major position of a tile on the board, `0..GRID_SIZE`.
pub type TileId = u8;

/// Count type used for hazard counts and revealed-tile counts.
pub type TileCount = u8;

/// Width and height of the square board.
pub const GRID_SIDE: TileId = 5;

/// Total number of tiles on the board.
pub const GRID_SIZE: usize = (GRID_SIDE as usize) * (GRID_SIDE as usize);

/// Smallest hazard count that still makes a game out of it.
pub const MIN_HAZARDS: TileCount = 1;

/// Largest hazard count that still leaves a safe tile.
pub const MAX_HAZARDS: TileCount = GRID_SIZE as TileCount - 1;

pub const fn safe_tile_count(hazard_count: TileCount) -> TileCount {
    GRID_SIZE as TileCount - hazard_count
}

pub fn validate_tile(tile_id: TileId) -> Result<usize> {
    let index = usize::from(tile_id);
    if index < GRID_SIZE {
        Ok(index)
    } else {
        Err(GameError::InvalidTile(tile_id))
    }
}

pub fn validate_hazard_count(hazard_count: TileCount) -> Result<TileCount> {
    if (MIN_HAZARDS..=MAX_HAZARDS).contains(&hazard_count) {
        Ok(hazard_count)
    } else {
        Err(GameError::InvalidHazardCount(hazard_count))
    }
}

/// `(row, column)` of a tile.
pub const fn row_col(tile_id: TileId) -> (u8, u8) {
    (tile_id / GRID_SIDE, tile_id % GRID_SIDE)
}

/// Manhattan distance between a tile and the center of the board.
pub const fn center_distance(tile_id: TileId) -> u8 {
    let center = GRID_SIDE / 2;
    let (row, col) = row_col(tile_id);
    row.abs_diff(center) + col.abs_diff(center)
}
