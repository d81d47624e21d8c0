//! [Retrograde analysis]: backward induction from the terminal positions up to
//! the root.
//!
//! This is [Minimax] over the value domain {win, draw, loss} from the
//! perspective of the player to move, with a secondary objective: among the
//! moves with the same value, prefer the one that resolves the game in the
//! fewest plies. The whole tree is searched, there is no pruning of any kind
//! except for discarding continuations of already won positions.
//!
//! [Retrograde analysis]: https://www.chessprogramming.org/Retrograde_Analysis
//! [Minimax]: https://en.wikipedia.org/wiki/Minimax

use std::time::Instant;

use crate::game::core::{Outcome, Player};
use crate::search::tree::{NodeIndex, Tree};

/// Value of a move from the perspective of the player making it. The order of
/// the variants is the order of preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Category {
    Win,
    Draw,
    Loss,
}

impl Category {
    fn classify(outcome: Outcome, player: Player) -> Self {
        match outcome {
            Outcome::Win(winner) if winner == player => Self::Win,
            Outcome::Win(_) => Self::Loss,
            Outcome::Draw => Self::Draw,
            Outcome::Unknown => unreachable!("children are resolved before their parent"),
        }
    }
}

/// The move chosen by [`select`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    /// Position of the chosen candidate in the input sequence.
    pub index: usize,
    /// Outcome of the parent position when the candidate is played.
    pub outcome: Outcome,
    /// Plies left in the parent position: one more than in the candidate.
    pub plies_left: u8,
}

/// Picks the best move for `player` given the resolved outcomes of the
/// positions it leads to, together with the number of plies left in each.
///
/// Wins are preferred over draws and draws over losses. Within the same
/// category, the candidate with the fewest plies left is chosen: the quickest
/// win, the quickest draw, and when the loss is forced, the quickest one too.
/// Exact ties go to the first candidate.
///
/// Returns `None` if there are no candidates.
///
/// # Panics
///
/// If any of the candidates is not resolved.
///
/// ```
/// use noughts::game::core::{Outcome, Player};
/// use noughts::search::retrograde::select;
///
/// let candidates = [
///     (Outcome::Win(Player::O), 1),
///     (Outcome::Draw, 4),
///     (Outcome::Draw, 2),
/// ];
/// let selection = select(Player::X, candidates).unwrap();
/// assert_eq!(selection.index, 2);
/// assert_eq!(selection.outcome, Outcome::Draw);
/// assert_eq!(selection.plies_left, 3);
/// ```
pub fn select(
    player: Player,
    candidates: impl IntoIterator<Item = (Outcome, u8)>,
) -> Option<Selection> {
    // min_by_key returns the first of several equal minimums.
    let (index, category, plies_left) = candidates
        .into_iter()
        .enumerate()
        .map(|(index, (outcome, plies_left))| {
            (index, Category::classify(outcome, player), plies_left)
        })
        .min_by_key(|&(_, category, plies_left)| (category, plies_left))?;
    let outcome = match category {
        Category::Win => Outcome::Win(player),
        Category::Draw => Outcome::Draw,
        Category::Loss => Outcome::Win(!player),
    };
    Some(Selection {
        index,
        outcome,
        plies_left: plies_left + 1,
    })
}

/// Counters collected during [`analyze`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Positions that received an outcome.
    pub resolved: usize,
    /// Children discarded because their parent already had a completed line.
    pub pruned: usize,
}

/// Labels every node reachable from the root with its outcome and the number
/// of plies left under best play, and records the best child of every
/// non-terminal node. Children are always labeled before their parent.
///
/// Positions with a completed line are terminal: their children (which
/// [`Tree::build`] still generates) are pruned from the tree.
///
/// Running the analysis again over an analyzed tree is a no-op.
pub fn analyze(tree: &mut Tree) -> Statistics {
    let start = Instant::now();
    let mut statistics = Statistics::default();
    analyze_node(tree, Tree::ROOT, &mut statistics);
    log::debug!(
        "pruned {} continuations of won positions",
        statistics.pruned
    );
    let root = tree.root().position();
    log::info!(
        "resolved {} positions in {:?}: {} in {} plies",
        statistics.resolved,
        start.elapsed(),
        root.outcome(),
        root.plies_left().unwrap_or_default()
    );
    statistics
}

fn analyze_node(tree: &mut Tree, index: NodeIndex, statistics: &mut Statistics) {
    statistics.resolved += 1;
    let node = tree.node_mut(index);
    if let Some(winner) = node.position().winner() {
        statistics.pruned += node.prune();
        node.position_mut().resolve(Outcome::Win(winner), 0);
        log::trace!("{}: {winner} has completed a line", node.position());
        return;
    }
    if node.is_leaf() {
        node.position_mut().resolve(Outcome::Draw, 0);
        log::trace!("{}: board is full", node.position());
        return;
    }
    let children = node.children().to_vec();
    for &child in &children {
        analyze_node(tree, child, statistics);
    }
    resolve_from_children(tree, index);
}

/// Resolves the node given that all of its children are already resolved.
fn resolve_from_children(tree: &mut Tree, index: NodeIndex) {
    let node = tree.node(index);
    let player = node.position().to_move();
    let candidates = node.children().iter().map(|&child| {
        let position = tree.node(child).position();
        (
            position.outcome(),
            position
                .plies_left()
                .expect("children are resolved before their parent"),
        )
    });
    let Some(selection) = select(player, candidates) else {
        unreachable!("nodes without children are terminal")
    };
    let best_child = node.children()[selection.index];
    let node = tree.node_mut(index);
    node.set_best_child(best_child);
    node.position_mut()
        .resolve(selection.outcome, selection.plies_left);
    log::trace!(
        "{}: {} in {} plies",
        node.position(),
        selection.outcome,
        selection.plies_left
    );
}
