use mines_core::{
    Action, GRID_SIDE, GameResult, GameState, GameStatus, HistoryRecord, PlayerStats,
    Recommendation, Tile, TileTag,
};

/// Text board, one row per line.
///
/// Covered tiles show their id with the advisor's tag: `+` reveal, `-` avoid, `~` neutral.
/// Hazards are only drawn once the game is over.
pub(crate) fn board(state: &GameState) -> String {
    state
        .tiles()
        .chunks(usize::from(GRID_SIDE))
        .map(|row| {
            let cells: Vec<String> = row.iter().map(|tile| cell(state.status(), tile)).collect();
            format!("  {}\n", cells.join(" "))
        })
        .collect()
}

fn cell(status: GameStatus, tile: &Tile) -> String {
    if tile.is_exploded {
        return " XX ".to_string();
    }
    if tile.is_revealed {
        return " ## ".to_string();
    }
    if status.is_finished() && tile.is_hazard {
        return " ** ".to_string();
    }

    let mark = match tile.tag() {
        Some(TileTag::Reveal) => '+',
        Some(TileTag::Avoid) => '-',
        Some(TileTag::Neutral) => '~',
        None => ' ',
    };
    format!(" {:>2}{}", tile.id, mark)
}

pub(crate) fn status_line(state: &GameState) -> String {
    let status = match state.status() {
        GameStatus::Idle => "idle",
        GameStatus::Playing => "playing",
        GameStatus::Won => "won",
        GameStatus::Lost => "lost",
    };
    format!(
        "{status}: {}/{} safe tiles, {:.2}x, payout {:.2} on a bet of {:.2}",
        state.revealed_count(),
        state.safe_tile_count(),
        state.current_multiplier(),
        state.potential_payout(),
        state.bet_amount(),
    )
}

pub(crate) fn recommendation(recommendation: &Recommendation) -> String {
    let action = match recommendation.action {
        Action::Reveal { tile_id } => format!("reveal {tile_id}"),
        Action::CashOut => "cash out".to_string(),
        Action::Continue => "continue".to_string(),
    };
    format!(
        "advisor: {action} ({:.0}% confident, {:?} risk). {}",
        recommendation.confidence * 100.0,
        recommendation.risk_level,
        recommendation.reasoning,
    )
}

pub(crate) fn stats(stats: &PlayerStats, balance: f64) -> String {
    format!(
        "games         {}\n\
         wins          {}\n\
         losses        {}\n\
         win rate      {:.1}%\n\
         wagered       {:.2}\n\
         won           {:.2}\n\
         net           {:+.2}\n\
         biggest win   {:.2}\n\
         best streak   {}\n\
         balance       {balance:.2}",
        stats.total_games,
        stats.total_wins,
        stats.total_losses,
        stats.win_rate() * 100.0,
        stats.total_wagered,
        stats.total_won,
        stats.net(),
        stats.biggest_win,
        stats.longest_win_streak,
    )
}

/// Recent games, newest first, one line each.
pub(crate) fn history(records: &[HistoryRecord]) -> String {
    if records.is_empty() {
        return "no finished games yet\n".to_string();
    }

    let mut out = format!(
        "{:<19} {:>4} {:>5} {:>7} {:>8} {:>10} {:>9}\n",
        "finished", "res", "tiles", "hazards", "bet", "multiplier", "payout"
    );
    for record in records {
        let result = match record.result {
            GameResult::Win => "win",
            GameResult::Loss => "loss",
        };
        out.push_str(&format!(
            "{:<19} {:>4} {:>5} {:>7} {:>8.2} {:>9.4}x {:>9.2}\n",
            record.recorded_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            result,
            record.revealed_tiles,
            record.hazard_count,
            record.bet_amount,
            record.multiplier,
            record.payout,
        ));
    }
    out
}
