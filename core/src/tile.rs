use serde::{Deserialize, Serialize};

use crate::TileId;

/// Advisor verdict attached to a single unrevealed tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TileTag {
    Reveal,
    Avoid,
    Neutral,
}

impl TileTag {
    pub const REVEAL_ABOVE: f64 = 0.7;
    pub const AVOID_BELOW: f64 = 0.3;

    pub fn from_probability(probability: f64) -> Self {
        if probability > Self::REVEAL_ABOVE {
            Self::Reveal
        } else if probability < Self::AVOID_BELOW {
            Self::Avoid
        } else {
            Self::Neutral
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileAdvice {
    pub safety_probability: f64,
    pub tag: TileTag,
}

impl TileAdvice {
    pub fn new(safety_probability: f64) -> Self {
        Self {
            safety_probability,
            tag: TileTag::from_probability(safety_probability),
        }
    }
}

/// One cell of the board.
///
/// `advice` stays `None` until the advisor has looked at the tile, which keeps a never-analyzed
/// tile distinct from one whose estimated safety is genuinely zero.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    pub id: TileId,
    pub is_hazard: bool,
    pub is_revealed: bool,
    pub is_exploded: bool,
    pub advice: Option<TileAdvice>,
}

impl Tile {
    pub const fn new(id: TileId, is_hazard: bool) -> Self {
        Self {
            id,
            is_hazard,
            is_revealed: false,
            is_exploded: false,
            advice: None,
        }
    }

    pub const fn is_unrevealed(&self) -> bool {
        !self.is_revealed
    }

    pub fn safety_probability(&self) -> Option<f64> {
        self.advice.map(|advice| advice.safety_probability)
    }

    pub fn tag(&self) -> Option<TileTag> {
        self.advice.map(|advice| advice.tag)
    }
}
