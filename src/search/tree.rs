//! Game tree stored in an arena: nodes refer to each other by [`NodeIndex`]
//! instead of pointers, so the parent can own the children without any
//! reference cycles.

use std::collections::VecDeque;
use std::time::Instant;

use arrayvec::ArrayVec;

use crate::game::core::{Square, BOARD_SIZE};
use crate::game::position::Position;
use crate::search::Depth;

/// Index of a [`Node`] in the [`Tree`] arena. There are fewer than a million
/// nodes in the largest tree (the one rooted in the empty board), so `u32`
/// is enough and keeps [`Node`] compact.
pub type NodeIndex = u32;

/// A single position in the game tree.
#[derive(Debug)]
pub struct Node {
    position: Position,
    /// Positions reachable by one move, in the row-major order of the squares
    /// the moves are made on. There are at most [`BOARD_SIZE`] of them.
    children: ArrayVec<NodeIndex, { BOARD_SIZE as usize }>,
    /// The child chosen by the retrograde analysis: the move to make with
    /// best play. Always one of `children`.
    best_child: Option<NodeIndex>,
    depth: Depth,
    /// The move leading to this node from its parent (`None` for the root).
    last_move: Option<Square>,
}

impl Node {
    const fn new(position: Position, depth: Depth, last_move: Option<Square>) -> Self {
        Self {
            position,
            children: ArrayVec::new_const(),
            best_child: None,
            depth,
            last_move,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    /// Returns the successor under best play, if the node has been analyzed
    /// and is not terminal.
    #[must_use]
    pub const fn best_child(&self) -> Option<NodeIndex> {
        self.best_child
    }

    /// Distance from the root in plies.
    #[must_use]
    pub const fn depth(&self) -> Depth {
        self.depth
    }

    /// The square the last mark was placed on.
    #[must_use]
    pub const fn last_move(&self) -> Option<Square> {
        self.last_move
    }

    /// Returns `true` if the node has no children: either the board is full
    /// or the analysis pruned the continuations.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub(super) fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }

    pub(super) fn set_best_child(&mut self, child: NodeIndex) {
        debug_assert!(self.children.contains(&child));
        self.best_child = Some(child);
    }

    /// Drops the links to all children. The children stay in the arena but
    /// become unreachable from the root.
    pub(super) fn prune(&mut self) -> usize {
        let pruned = self.children.len();
        self.children.clear();
        self.best_child = None;
        pruned
    }
}

/// Game tree rooted in a given position. The root is always stored at
/// [`Tree::ROOT`].
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<Node>,
}

// A tree always has a root, so it is never empty.
#[allow(clippy::len_without_is_empty)]
impl Tree {
    /// Index of the root node.
    pub const ROOT: NodeIndex = 0;

    /// Creates a tree consisting of the root alone.
    #[must_use]
    pub fn new(root: Position) -> Self {
        Self {
            nodes: vec![Node::new(root, 0, None)],
        }
    }

    /// Builds the complete game tree: every position reachable from the root
    /// by placing marks on empty squares until the board is full.
    ///
    /// Expansion does not stop at positions with a completed line. These
    /// continuations are not legal, but deciding that is left to the
    /// retrograde analysis which prunes them.
    ///
    /// ```
    /// use noughts::game::position::Position;
    /// use noughts::search::tree::Tree;
    ///
    /// let tree = Tree::build(Position::try_from("xox,oxo,-x-").unwrap());
    /// // Root, 2 children and 2 grandchildren.
    /// assert_eq!(tree.len(), 5);
    /// ```
    #[must_use]
    pub fn build(root: Position) -> Self {
        let start = Instant::now();
        let mut tree = Self::new(root);
        tree.expand(Self::ROOT);
        log::info!(
            "built game tree with {} nodes in {:?}",
            tree.len(),
            start.elapsed()
        );
        tree
    }

    fn expand(&mut self, index: NodeIndex) {
        let node = self.node(index);
        let position = node.position.clone();
        let depth = node.depth + 1;
        let player = position.to_move();
        for square in position.empty_squares() {
            let child = position
                .apply_move(square, player)
                .expect("only empty squares are expanded");
            let _ = self.attach(index, child, square, depth);
        }
        let children = self.node(index).children.clone();
        for child in children {
            self.expand(child);
        }
    }

    /// Appends a new node to the arena and links it as the last child of
    /// `parent`.
    pub(super) fn attach(
        &mut self,
        parent: NodeIndex,
        position: Position,
        last_move: Square,
        depth: Depth,
    ) -> NodeIndex {
        let index = NodeIndex::try_from(self.nodes.len()).expect("tree size fits NodeIndex");
        self.nodes.push(Node::new(position, depth, Some(last_move)));
        self.node_mut(parent).children.push(index);
        index
    }

    /// Returns the root node.
    #[must_use]
    pub fn root(&self) -> &Node {
        self.node(Self::ROOT)
    }

    /// Returns the node at given index.
    ///
    /// # Panics
    ///
    /// If there is no such node in the tree.
    #[must_use]
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index as usize]
    }

    pub(super) fn node_mut(&mut self, index: NodeIndex) -> &mut Node {
        &mut self.nodes[index as usize]
    }

    /// Number of nodes ever created in the tree, including the ones pruned by
    /// the analysis.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Iterates over the nodes reachable from the root, level by level.
    pub fn breadth_first(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        let mut queue = VecDeque::from([Self::ROOT]);
        std::iter::from_fn(move || {
            let index = queue.pop_front()?;
            queue.extend(self.node(index).children.iter().copied());
            Some(index)
        })
    }

    /// Number of nodes reachable from the root.
    #[must_use]
    pub fn reachable(&self) -> usize {
        self.breadth_first().count()
    }

    /// Follows the best children from the root until a terminal node. The
    /// first element is always the root. Before the analysis, the variation
    /// consists of the root alone.
    #[must_use]
    pub fn principal_variation(&self) -> Vec<NodeIndex> {
        let mut variation = vec![Self::ROOT];
        let mut current = self.root();
        while let Some(next) = current.best_child {
            variation.push(next);
            current = self.node(next);
        }
        variation
    }

    /// Squares played along the [`Tree::principal_variation`].
    #[must_use]
    pub fn best_moves(&self) -> Vec<Square> {
        self.principal_variation()
            .into_iter()
            .filter_map(|index| self.node(index).last_move)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::game::core::Player;

    #[test]
    fn full_board() {
        let tree = Tree::build(Position::try_from("xox,oxo,oxo").unwrap());
        assert_eq!(tree.len(), 1);
        assert!(tree.root().is_leaf());
        assert_eq!(tree.principal_variation(), vec![Tree::ROOT]);
        assert!(tree.best_moves().is_empty());
    }

    #[test]
    fn children_order() {
        let tree = Tree::build(Position::try_from("xo-,-x-,o--").unwrap());
        let root = tree.root();
        let moves = root
            .children()
            .iter()
            .map(|&child| tree.node(child).last_move().unwrap())
            .collect_vec();
        assert_eq!(
            moves,
            vec![Square::C1, Square::A2, Square::C2, Square::B3, Square::C3]
        );
        for &child in root.children() {
            let child = tree.node(child);
            assert_eq!(child.depth(), 1);
            assert_eq!(child.position().to_move(), Player::O);
            assert_eq!(
                child.position().at(child.last_move().unwrap()),
                Some(Player::X)
            );
        }
    }

    #[test]
    fn expands_past_completed_lines() {
        // X has already won, but there are still two empty squares.
        let tree = Tree::build(Position::try_from("xxx,oo-,xo-").unwrap());
        assert!(tree.root().position().winner().is_some());
        assert_eq!(tree.root().children().len(), 2);
        // Root, 2 children and 2 grandchildren: 1 + 2 + 2.
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.reachable(), 5);
    }

    #[test]
    fn node_counts() {
        // Every permutation of the empty squares is a separate path: the
        // number of nodes at depth k is n! / (n - k)!.
        let tree = Tree::build(Position::try_from("xo-,x-o,---").unwrap());
        assert_eq!(tree.len(), 1 + 5 + 20 + 60 + 120 + 120);
        let deepest = tree
            .breadth_first()
            .map(|index| tree.node(index).depth())
            .max();
        assert_eq!(deepest, Some(5));
    }

    #[test]
    fn breadth_first_order() {
        let tree = Tree::build(Position::try_from("xox,o-x,o-x").unwrap());
        let depths = tree
            .breadth_first()
            .map(|index| tree.node(index).depth())
            .collect_vec();
        assert_eq!(depths, vec![0, 1, 1, 2, 2]);
    }
}
