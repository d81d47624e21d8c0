//! Solves positions exhaustively: builds the complete [game tree] from the
//! given position and labels it with [retrograde analysis].
//!
//! The state space of tic-tac-toe is small enough (fewer than a million nodes
//! even from the empty board) for brute force: there is no alpha-beta pruning
//! and no transposition table.
//!
//! [game tree]: https://en.wikipedia.org/wiki/Game_tree
//! [retrograde analysis]: https://www.chessprogramming.org/Retrograde_Analysis

use crate::game::position::Position;

pub mod retrograde;
pub mod tree;

/// Search depth in plies.
pub type Depth = u8;

/// Builds the game tree rooted in `position` and analyzes it. The returned
/// tree has every reachable node resolved; its principal variation is the
/// best play for both sides.
///
/// ```
/// use noughts::game::core::{Outcome, Square};
/// use noughts::game::position::Position;
/// use noughts::search::solve;
///
/// let tree = solve(Position::try_from("xx-,-o-,---").unwrap());
/// assert_eq!(tree.root().position().outcome(), Outcome::Draw);
/// // O has to block the top row first.
/// assert_eq!(tree.best_moves()[0], Square::C1);
/// ```
#[must_use]
pub fn solve(position: Position) -> tree::Tree {
    let mut tree = tree::Tree::build(position);
    let _ = retrograde::analyze(&mut tree);
    tree
}
