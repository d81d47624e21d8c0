use std::io::{self, BufWriter, Write};

use anyhow::Context;
use clap::{CommandFactory, FromArgMatches, Parser};
use noughts::game::core::Player;
use noughts::game::position::Position;
use noughts::report::{Reporter, Verbosity};
use noughts::search::retrograde;
use noughts::search::tree::Tree;

/// Computes the best play for both sides from a tic-tac-toe position: the
/// quickest win, the quickest draw or, if nothing else is possible, the
/// quickest loss.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Config {
    /// Board as three comma-separated rows of `x`, `o` and `-` (empty
    /// square), e.g. "xx-,o--,---". Case does not matter.
    #[arg(allow_hyphen_values = true)]
    board: String,
    /// Player to move. By default, the player with fewer marks moves and X
    /// moves if the counts are equal.
    #[arg(long)]
    to_move: Option<Player>,
    #[arg(long, value_enum, default_value_t = Verbosity::Normal)]
    verbosity: Verbosity,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = Config::command()
        .long_version(noughts::build_info())
        .get_matches();
    let config = Config::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    log::debug!("{config:?}");

    let position = Position::parse(config.board.trim(), config.to_move)
        .with_context(|| format!("invalid board '{}'", config.board))?;

    let reporter = Reporter::new(config.verbosity);
    let mut output = BufWriter::new(io::stdout().lock());
    reporter.input(&mut output, &position)?;

    // Not `search::solve`: the debug report dumps the tree before the
    // analysis prunes it.
    let mut tree = Tree::build(position);
    reporter.tree(&mut output, &tree, "Game tree")?;
    let statistics = retrograde::analyze(&mut tree);
    let title = format!(
        "Analyzed game tree, {} positions resolved, {} pruned",
        statistics.resolved, statistics.pruned
    );
    reporter.tree(&mut output, &tree, &title)?;
    reporter.best_play(&mut output, &tree)?;
    output.flush()?;
    Ok(())
}
