//! Provides [`Position`]: a snapshot of the board, the player to move and, once
//! the retrograde analysis reaches it, the outcome under best play.
//!
//! Positions are never shared: each one owns a copy of its grid and is derived
//! from its parent by [`Position::apply_move`].

use std::fmt;

use anyhow::{bail, Context};
use itertools::Itertools;

use crate::game::core::{Outcome, Player, Square, BOARD_SIZE, BOARD_WIDTH, LINES};

/// Separates rows in the textual board encoding.
const ROW_SEPARATOR: char = ',';
/// Marks an empty square in the textual board encoding.
const EMPTY_SQUARE: char = '-';

/// State of the game: the board and the player to move, plus the result of
/// the analysis (outcome and the number of plies it takes to reach it with best
/// play from both sides).
///
/// [`Position::try_from()`] provides a convenient interface for creating a
/// [`Position`] from the compact encoding: three comma-separated rows of three
/// characters each, `x` and `o` for the marks and `-` for empty squares (case
/// does not matter).
///
/// ```
/// use noughts::game::core::{Player, Square};
/// use noughts::game::position::Position;
///
/// let position = Position::try_from("XX-,O--,---").unwrap();
/// assert_eq!(position.to_move(), Player::O);
/// assert_eq!(position.at(Square::B1), Some(Player::X));
/// assert_eq!(position.to_string(), "xx-,o--,---");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    board: [Option<Player>; BOARD_SIZE as usize],
    to_move: Player,
    outcome: Outcome,
    /// Number of plies until the game reaches [`Position::outcome`] under best
    /// play. Unset until the position is resolved.
    plies_left: Option<u8>,
}

impl Position {
    /// Creates an empty board with X to move.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            board: [None; BOARD_SIZE as usize],
            to_move: Player::X,
            outcome: Outcome::Unknown,
            plies_left: None,
        }
    }

    /// Parses the board encoding and determines the player to move.
    ///
    /// When `to_move` is not given, it is inferred from the mark counts: the
    /// player with fewer marks moves, and X moves when the counts are equal.
    /// An explicit `to_move` is only accepted when it is consistent with the
    /// counts, i.e. the counts are equal or the given player has fewer marks.
    ///
    /// # Errors
    ///
    /// If the encoding is malformed (wrong number of rows or squares, unknown
    /// characters) or describes a position that can not be reached in a game
    /// (see [`Position::is_legal`]).
    pub fn parse(input: &str, to_move: Option<Player>) -> anyhow::Result<Self> {
        let mut result = Self::empty();
        let rows = input.split(ROW_SEPARATOR).collect_vec();
        if rows.len() != BOARD_WIDTH as usize {
            bail!(
                "board should have {BOARD_WIDTH} rows separated by '{ROW_SEPARATOR}', got {} in \
                 '{input}'",
                rows.len()
            );
        }
        for (row_index, row) in rows.iter().enumerate() {
            let marks = row.chars().collect_vec();
            if marks.len() != BOARD_WIDTH as usize {
                bail!(
                    "row {} should have {BOARD_WIDTH} squares, got {} in '{row}'",
                    row_index + 1,
                    marks.len()
                );
            }
            for (column, &mark) in marks.iter().enumerate() {
                let square = Square::new(row_index as u8, column as u8);
                result.board[square.index()] = match mark {
                    EMPTY_SQUARE => None,
                    _ => Some(Player::try_from(mark).with_context(|| {
                        format!("invalid mark '{mark}' on {square}: use x, o or {EMPTY_SQUARE}")
                    })?),
                };
            }
        }
        let (x_count, o_count) = (result.count(Player::X), result.count(Player::O));
        if x_count.abs_diff(o_count) > 1 {
            bail!("mark counts should differ by at most one, got {x_count} x and {o_count} o");
        }
        let inferred = if o_count < x_count {
            Player::O
        } else {
            // X moves first: with equal counts it is X's turn by convention.
            Player::X
        };
        result.to_move = match to_move {
            Some(player) if x_count != o_count && player != inferred => bail!(
                "{player} can not move with {x_count} x and {o_count} o on the board, expected \
                 {inferred}"
            ),
            Some(player) => player,
            None => inferred,
        };
        if !result.is_legal() {
            bail!("both players have completed a line in '{input}'");
        }
        Ok(result)
    }

    /// Returns the mark on given square, if any.
    #[must_use]
    pub const fn at(&self, square: Square) -> Option<Player> {
        self.board[square.index()]
    }

    /// The player making the next move.
    #[must_use]
    pub const fn to_move(&self) -> Player {
        self.to_move
    }

    /// Outcome under best play. [`Outcome::Unknown`] until analyzed.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Number of plies until [`Position::outcome`] is reached with best play
    /// by both sides. `None` until analyzed.
    #[must_use]
    pub const fn plies_left(&self) -> Option<u8> {
        self.plies_left
    }

    /// Number of marks placed by given player.
    #[must_use]
    pub fn count(&self, player: Player) -> u8 {
        self.board
            .iter()
            .filter(|&&mark| mark == Some(player))
            .count() as u8
    }

    /// Empty squares in row-major order.
    pub fn empty_squares(&self) -> impl Iterator<Item = Square> + '_ {
        Square::iter().filter(|&square| self.at(square).is_none())
    }

    /// Returns `true` if there are no empty squares left.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.board.iter().all(Option::is_some)
    }

    /// Creates a new position with `player`'s mark on the `square`. The
    /// opponent of `player` moves next; the outcome of the new position is
    /// unknown.
    ///
    /// # Errors
    ///
    /// If the `square` is already occupied.
    pub fn apply_move(&self, square: Square, player: Player) -> anyhow::Result<Self> {
        if let Some(occupant) = self.at(square) {
            bail!("invalid move: {square} is already occupied by {occupant}");
        }
        let mut board = self.board;
        board[square.index()] = Some(player);
        Ok(Self {
            board,
            to_move: !player,
            outcome: Outcome::Unknown,
            plies_left: None,
        })
    }

    /// Returns the player who completed a line. Rows are checked first, then
    /// columns, then diagonals; the first complete line decides the winner.
    ///
    /// ```
    /// use noughts::game::core::Player;
    /// use noughts::game::position::Position;
    ///
    /// assert_eq!(Position::try_from("xxx,oo-,---").unwrap().winner(), Some(Player::X));
    /// assert_eq!(Position::try_from("xx-,oo-,---").unwrap().winner(), None);
    /// ```
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        self.completed_lines().next()
    }

    fn completed_lines(&self) -> impl Iterator<Item = Player> + '_ {
        LINES.iter().filter_map(|&[first, second, third]| {
            let mark = self.at(first)?;
            (self.at(second) == Some(mark) && self.at(third) == Some(mark)).then_some(mark)
        })
    }

    /// Checks whether the position can occur in a game: the mark counts differ
    /// by at most one, the player to move is consistent with them and at most
    /// one player has completed a line.
    #[must_use]
    pub fn is_legal(&self) -> bool {
        let (x_count, o_count) = (self.count(Player::X), self.count(Player::O));
        if x_count.abs_diff(o_count) > 1 {
            return false;
        }
        if x_count != o_count && self.count(self.to_move) > self.count(!self.to_move) {
            return false;
        }
        self.completed_lines().all_equal()
    }

    /// Records the result of the analysis. A position is resolved exactly
    /// once: resolving it again is only allowed with the same values.
    ///
    /// # Panics
    ///
    /// If `outcome` is [`Outcome::Unknown`] or the position has already been
    /// resolved with a different outcome or ply count.
    pub fn resolve(&mut self, outcome: Outcome, plies_left: u8) {
        assert!(outcome.is_resolved(), "can not resolve position to unknown outcome");
        assert!(
            !self.outcome.is_resolved()
                || (self.outcome == outcome && self.plies_left == Some(plies_left)),
            "position {self} is already resolved to {} in {:?} plies, got {outcome} in \
             {plies_left}",
            self.outcome,
            self.plies_left,
        );
        self.outcome = outcome;
        self.plies_left = Some(plies_left);
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<&str> for Position {
    type Error = anyhow::Error;

    /// Trims the input and parses it with the inferred player to move.
    fn try_from(input: &str) -> anyhow::Result<Self> {
        Self::parse(input.trim(), None)
    }
}

impl fmt::Display for Position {
    /// Prints the board in the compact encoding accepted by
    /// [`Position::parse`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..BOARD_WIDTH {
            if row != 0 {
                write!(f, "{ROW_SEPARATOR}")?;
            }
            for column in 0..BOARD_WIDTH {
                match self.at(Square::new(row, column)) {
                    Some(player) => write!(f, "{player}")?,
                    None => write!(f, "{EMPTY_SQUARE}")?,
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Board: {self}")?;
        writeln!(f, "Player to move: {}", &self.to_move)?;
        writeln!(f, "Outcome: {}", &self.outcome)?;
        writeln!(f, "Plies left: {:?}", &self.plies_left)?;
        Ok(())
    }
}
