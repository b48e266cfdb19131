use std::io;

use clap::{Parser, Subcommand};
use mines_core::{PayoutCurve, TileCount, Wallet, safe_tile_count, survival_probability};

mod auto;
mod play;
mod render;
mod settings;

use settings::SettingsArgs;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play in the terminal, one command per line
    Play {
        #[command(flatten)]
        settings: SettingsArgs,

        /// Print the board as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Let the advisor play a run of games and report the results
    Auto {
        #[command(flatten)]
        settings: SettingsArgs,

        /// Number of games to play
        #[arg(short = 'n', long, default_value_t = 100)]
        games: u32,

        /// Balance to start from
        #[arg(long, default_value_t = Wallet::STARTING_BALANCE)]
        balance: f64,
    },
    /// Print the payout table for a hazard count
    Odds {
        #[command(flatten)]
        settings: SettingsArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(time_seed);
    log::debug!("seed: {}", seed);

    match args.command {
        Command::Play { settings, json } => {
            let config = settings.resolve()?;
            play::interactive(&config, seed, json, io::stdin().lock(), io::stdout())?;
        }
        Command::Auto {
            settings,
            games,
            balance,
        } => {
            let config = settings.resolve()?;
            let (stats, balance) = auto::autoplay(&config, seed, games, balance)?;
            println!("{}", render::stats(&stats, balance));
        }
        Command::Odds { settings } => {
            let config = settings.resolve()?;
            print!(
                "{}",
                odds_table(config.hazard_count, config.bet_amount, config.payout)
            );
        }
    }

    Ok(())
}

fn time_seed() -> u64 {
    web_time::SystemTime::now()
        .duration_since(web_time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn odds_table(hazard_count: TileCount, bet_amount: f64, payout: PayoutCurve) -> String {
    let mut out = format!(
        "{:>5} {:>12} {:>12} {:>9}\n",
        "tiles", "multiplier", "payout", "survival"
    );
    for revealed in 1..=safe_tile_count(hazard_count) {
        let multiplier = payout.multiplier(revealed, hazard_count);
        out.push_str(&format!(
            "{:>5} {:>11.4}x {:>12.2} {:>8.3}%\n",
            revealed,
            multiplier,
            bet_amount * multiplier,
            survival_probability(revealed, hazard_count) * 100.0,
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_auto_with_settings() {
        let args = Args::try_parse_from([
            "mines", "--seed", "9", "auto", "-n", "5", "--hazards", "3", "-m", "aggressive",
        ])
        .unwrap();

        assert_eq!(args.seed, Some(9));
        let Command::Auto { settings, games, .. } = args.command else {
            panic!("expected auto");
        };
        assert_eq!(games, 5);
        let config = settings.resolve().unwrap();
        assert_eq!(config.hazard_count, 3);
        assert_eq!(
            config.advisor.active_mode(),
            Some(mines_core::StrategyMode::Aggressive)
        );
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Args::try_parse_from(["mines", "play", "--mode", "reckless"]).is_err());
    }

    #[test]
    fn odds_table_has_a_row_per_safe_tile() {
        let table = odds_table(24, 10.0, PayoutCurve::default());

        assert_eq!(table.lines().count(), 2);
        assert!(table.lines().nth(1).unwrap().trim_start().starts_with('1'));
    }
}
