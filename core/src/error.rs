use thiserror::Error;

use crate::{TileCount, TileId};

#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum GameError {
    #[error("Invalid tile id {0}")]
    InvalidTile(TileId),
    #[error("Bet amount must be a positive finite number")]
    InvalidBet,
    #[error("Hazard count {0} is outside 1..=24")]
    InvalidHazardCount(TileCount),
    #[error("Payout must be a positive finite number")]
    InvalidPayout,
    #[error("Risk capture must be within (0, 1]")]
    InvalidRiskCapture,
    #[error("Hazard layout has duplicate or out-of-range positions")]
    InvalidLayout,
    #[error("Unknown strategy mode")]
    UnknownStrategyMode,
    #[error("Insufficient balance: {balance} available, {bet} requested")]
    InsufficientBalance { balance: f64, bet: f64 },
    #[error("A game is already in progress")]
    GameInProgress,
    #[error("No game has been started")]
    NoActiveGame,
}

pub type Result<T> = core::result::Result<T, GameError>;
