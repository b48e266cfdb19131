use alloc::vec::Vec;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    Win,
    Loss,
}

/// One finished game, as handed to a history store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub bet_amount: f64,
    pub hazard_count: TileCount,
    pub revealed_tiles: TileCount,
    pub result: GameResult,
    pub payout: f64,
    pub multiplier: f64,
    pub recorded_at: DateTime<Utc>,
}

impl HistoryRecord {
    pub fn new(state: &GameState, result: GameResult, payout: f64, now: DateTime<Utc>) -> Self {
        Self {
            bet_amount: state.bet_amount(),
            hazard_count: state.hazard_count(),
            revealed_tiles: state.revealed_count(),
            result,
            payout,
            multiplier: payout / state.bet_amount(),
            recorded_at: now,
        }
    }

    pub fn net(&self) -> f64 {
        self.payout - self.bet_amount
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub total_games: u32,
    pub total_wins: u32,
    pub total_losses: u32,
    pub total_wagered: f64,
    pub total_won: f64,
    pub biggest_win: f64,
    pub longest_win_streak: u32,
    pub current_win_streak: u32,
}

impl PlayerStats {
    pub fn record(&mut self, record: &HistoryRecord) {
        self.total_games += 1;
        self.total_wagered += record.bet_amount;
        self.total_won += record.payout;
        self.biggest_win = self.biggest_win.max(record.net());

        match record.result {
            GameResult::Win => {
                self.total_wins += 1;
                self.current_win_streak += 1;
                self.longest_win_streak = self.longest_win_streak.max(self.current_win_streak);
            }
            GameResult::Loss => {
                self.total_losses += 1;
                self.current_win_streak = 0;
            }
        }
    }

    pub fn win_rate(&self) -> f64 {
        match self.total_games {
            0 => 0.0,
            games => f64::from(self.total_wins) / f64::from(games),
        }
    }

    pub fn net(&self) -> f64 {
        self.total_won - self.total_wagered
    }
}

pub trait BalanceService {
    fn balance(&self) -> f64;

    /// Takes `amount` out, refusing to go below zero.
    fn debit(&mut self, amount: f64) -> Result<()>;

    fn credit(&mut self, amount: f64) -> Result<()>;

    /// Puts the balance back where a new player starts.
    fn reset(&mut self);
}

pub trait HistoryStore {
    fn record(&mut self, record: HistoryRecord);

    /// Up to `limit` records, newest first.
    fn recent(&self, limit: usize) -> Vec<HistoryRecord>;

    fn stats(&self) -> PlayerStats;
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    balance: f64,
}

impl Wallet {
    pub const STARTING_BALANCE: f64 = 1000.0;

    pub fn new(balance: f64) -> Self {
        Self { balance }
    }
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new(Self::STARTING_BALANCE)
    }
}

impl BalanceService for Wallet {
    fn balance(&self) -> f64 {
        self.balance
    }

    fn debit(&mut self, amount: f64) -> Result<()> {
        if !is_positive_amount(amount) {
            return Err(GameError::InvalidBet);
        }
        if amount > self.balance {
            return Err(GameError::InsufficientBalance {
                balance: self.balance,
                bet: amount,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    fn credit(&mut self, amount: f64) -> Result<()> {
        if !is_positive_amount(amount) {
            return Err(GameError::InvalidPayout);
        }
        self.balance += amount;
        Ok(())
    }

    fn reset(&mut self) {
        log::debug!("balance reset from {:.2}", self.balance);
        self.balance = Self::STARTING_BALANCE;
    }
}

fn is_positive_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryHistory {
    records: Vec<HistoryRecord>,
    stats: PlayerStats,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl HistoryStore for MemoryHistory {
    fn record(&mut self, record: HistoryRecord) {
        self.stats.record(&record);
        self.records.push(record);
    }

    fn recent(&self, limit: usize) -> Vec<HistoryRecord> {
        self.records.iter().rev().take(limit).cloned().collect()
    }

    fn stats(&self) -> PlayerStats {
        self.stats
    }
}
