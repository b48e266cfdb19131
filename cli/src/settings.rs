use std::path::Path;

use anyhow::Context;
use clap::Args;
use mines_core::{AdvisorConfig, GameConfig, PayoutCurve, StrategyMode, TileCount};

/// Game settings that can be given on the command line, on top of an optional TOML file.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct SettingsArgs {
    /// Read game settings from a TOML file
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Number of hazards on the board, 1 to 24
    #[arg(long)]
    hazards: Option<TileCount>,

    /// Amount wagered per game
    #[arg(short, long)]
    bet: Option<f64>,

    /// Advisor risk appetite: conservative, balanced or aggressive
    #[arg(short, long)]
    mode: Option<StrategyMode>,

    /// Turn the strategy advisor off
    #[arg(long)]
    no_advisor: bool,

    /// Share of the fair-odds increment paid out per safe tile
    #[arg(long)]
    risk_capture: Option<f64>,
}

impl SettingsArgs {
    pub(crate) fn resolve(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => load(path)?,
            None => GameConfig::default(),
        };

        if let Some(hazards) = self.hazards {
            config = config.with_hazards(hazards);
        }
        if let Some(bet) = self.bet {
            config = config.with_bet(bet);
        }
        if let Some(mode) = self.mode {
            config = config.with_advisor(AdvisorConfig::with_mode(mode));
        }
        if self.no_advisor {
            config = config.with_advisor(AdvisorConfig::disabled());
        }
        if let Some(risk_capture) = self.risk_capture {
            config.payout = PayoutCurve::new_unchecked(risk_capture);
        }

        let config = config.validate().context("invalid game settings")?;
        log::debug!("settings: {:?}", config);
        Ok(config)
    }
}

fn load(path: &Path) -> anyhow::Result<GameConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    parse(&text).with_context(|| format!("could not parse {}", path.display()))
}

fn parse(text: &str) -> anyhow::Result<GameConfig> {
    Ok(toml::from_str(text)?)
}
