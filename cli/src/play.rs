use std::io::{BufRead, Write};

use chrono::Utc;
use mines_core::{
    GameConfig, HistoryStore, MemoryHistory, RandomLayoutGenerator, RevealOutcome, Session,
    TileId, Wallet,
};
use mines_protocol::GameView;

use crate::render;

#[derive(Copy, Clone, Debug, PartialEq)]
enum Command {
    Reveal(TileId),
    CashOut,
    NewGame,
    ResetBalance,
    History,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "c" | "cash" => Some(Self::CashOut),
            "n" | "new" => Some(Self::NewGame),
            "r" | "reset" => Some(Self::ResetBalance),
            "l" | "log" | "history" => Some(Self::History),
            "h" | "help" | "?" => Some(Self::Help),
            "q" | "quit" | "exit" => Some(Self::Quit),
            other => other.parse().ok().map(Self::Reveal),
        }
    }
}

const HELP: &str = "commands: <tile 0-24> reveal, c cash out, n new game, r reset balance, \
                    l recent games, h help, q quit";

/// How many finished games the history command lists.
const HISTORY_LIMIT: usize = 50;

/// Interactive game loop reading commands line by line from `input`.
///
/// Game rule violations such as an out-of-range tile are reported and the loop carries on.
pub(crate) fn interactive(
    config: &GameConfig,
    seed: u64,
    json: bool,
    mut input: impl BufRead,
    mut out: impl Write,
) -> anyhow::Result<Session<Wallet, MemoryHistory>> {
    let mut session = Session::default();
    let mut next_seed = seed;

    writeln!(out, "{HELP}")?;
    start(&mut session, config, &mut next_seed, &mut out)?;
    show(&session, json, &mut out)?;

    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let Some(command) = Command::parse(&line) else {
            writeln!(out, "{HELP}")?;
            continue;
        };
        log::trace!("command: {:?}", command);

        match command {
            Command::Reveal(tile_id) => match session.reveal(tile_id, Utc::now()) {
                Ok(outcome) => {
                    match outcome {
                        RevealOutcome::NoChange => writeln!(out, "nothing to do")?,
                        RevealOutcome::HitHazard => writeln!(out, "boom, bet lost")?,
                        RevealOutcome::Won => writeln!(out, "board cleared")?,
                        RevealOutcome::Revealed => {}
                    }
                    if outcome.is_terminal() {
                        writeln!(out, "balance {:.2}, n for a new game", session.balance())?;
                    }
                }
                Err(err) => writeln!(out, "{err}")?,
            },
            Command::CashOut => match session.cash_out(Utc::now()) {
                Ok(payout) if payout > 0.0 => writeln!(out, "cashed out {payout:.2}")?,
                Ok(_) => writeln!(out, "nothing to cash out")?,
                Err(err) => writeln!(out, "{err}")?,
            },
            Command::NewGame => start(&mut session, config, &mut next_seed, &mut out)?,
            Command::ResetBalance => {
                let balance = session.reset_balance();
                writeln!(out, "balance reset to {balance:.2}")?;
                continue;
            }
            Command::History => {
                let records = session.history().recent(HISTORY_LIMIT);
                write!(out, "{}", render::history(&records))?;
                continue;
            }
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Command::Quit => break,
        }

        show(&session, json, &mut out)?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "{}",
        render::stats(&session.history().stats(), session.balance())
    )?;
    Ok(session)
}

fn start(
    session: &mut Session<Wallet, MemoryHistory>,
    config: &GameConfig,
    seed: &mut u64,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match session.start(config, RandomLayoutGenerator::new(*seed)) {
        Ok(_) => {
            log::info!("game started with seed {}", seed);
            *seed = seed.wrapping_add(1);
            writeln!(out, "new game, balance {:.2}", session.balance())?;
        }
        Err(err) => writeln!(out, "{err}")?,
    }
    Ok(())
}

fn show(
    session: &Session<Wallet, MemoryHistory>,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let Some(game) = session.game() else {
        return Ok(());
    };

    if json {
        writeln!(out, "{}", GameView::from(game).to_json()?)?;
        return Ok(());
    }

    write!(out, "{}", render::board(game))?;
    writeln!(out, "{}", render::status_line(game))?;
    if game.status().is_playing()
        && let Some(recommendation) = game.recommendation()
    {
        writeln!(out, "{}", render::recommendation(recommendation))?;
    }
    Ok(())
}
