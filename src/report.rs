//! Human-readable dumps of positions, game trees and the best play line.
//!
//! Reporting does not affect the analysis: everything here only reads the
//! [`Tree`] and writes text to the given output.

use std::io::{self, Write};

use crate::game::core::{Square, BOARD_WIDTH};
use crate::game::position::Position;
use crate::search::tree::Tree;

/// How much to print.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, clap::ValueEnum)]
pub enum Verbosity {
    /// Only the outcome and the number of plies left.
    Quiet,
    /// The positions along the best play line.
    #[default]
    Normal,
    /// Everything, including the input position and the whole game tree
    /// before and after the analysis. Dumping the tree of an empty board takes
    /// a while.
    Debug,
}

/// Writes reports with the configured [`Verbosity`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Reporter {
    verbosity: Verbosity,
}

impl Reporter {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// Dumps the position given as the input.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn input(&self, output: &mut impl Write, position: &Position) -> io::Result<()> {
        if self.verbosity < Verbosity::Debug {
            return Ok(());
        }
        writeln!(output, "Input position:")?;
        write_position(output, position)?;
        writeln!(output)
    }

    /// Dumps every node reachable from the root, level by level.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn tree(&self, output: &mut impl Write, tree: &Tree, title: &str) -> io::Result<()> {
        if self.verbosity < Verbosity::Debug {
            return Ok(());
        }
        writeln!(output, "{title} ({} nodes):", tree.reachable())?;
        for index in tree.breadth_first() {
            let node = tree.node(index);
            match node.last_move() {
                Some(square) => writeln!(output, "depth {}, after {square}", node.depth())?,
                None => writeln!(output, "depth {}, root", node.depth())?,
            }
            write_position(output, node.position())?;
            writeln!(output)?;
        }
        Ok(())
    }

    /// Prints the moves of the best play for both sides, starting from the
    /// root of an analyzed tree.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn best_play(&self, output: &mut impl Write, tree: &Tree) -> io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            return write_summary(output, tree.root().position());
        }
        writeln!(output, "Best play by both sides:")?;
        writeln!(output)?;
        for index in tree.principal_variation() {
            let node = tree.node(index);
            if let Some(square) = node.last_move() {
                writeln!(
                    output,
                    "{} plays {square}",
                    node.position().to_move().opponent().symbol()
                )?;
            }
            write_position(output, node.position())?;
            writeln!(output)?;
        }
        Ok(())
    }
}

/// Writes the outcome and plies left, e.g. `X wins in 3 plies`.
fn write_summary(output: &mut impl Write, position: &Position) -> io::Result<()> {
    match position.plies_left() {
        Some(1) => writeln!(output, "{} in 1 ply", position.outcome()),
        Some(plies) => writeln!(output, "{} in {plies} plies", position.outcome()),
        None => writeln!(output, "{}", position.outcome()),
    }
}

/// Writes the board as a grid (one row per line) followed by the player to
/// move and the summary.
fn write_position(output: &mut impl Write, position: &Position) -> io::Result<()> {
    for row in 0..BOARD_WIDTH {
        let cells = (0..BOARD_WIDTH).map(|column| match position.at(Square::new(row, column)) {
            Some(player) => player.symbol(),
            None => '.',
        });
        writeln!(output, "{}", itertools::join(cells, " "))?;
    }
    write!(output, "{} to move: ", position.to_move().symbol())?;
    write_summary(output, position)
}
