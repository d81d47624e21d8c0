//! Tic-tac-toe primitives commonly used within [`crate::game`].

use std::fmt;
use std::ops::Not;
use std::str::FromStr;

use anyhow::bail;
use itertools::Itertools;

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 3;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// The game is played between two players: X (who moves first from the empty
/// board) and O.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// "Flips" the player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }

    /// Uppercase mark used in human-readable reports.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::X => 'X',
            Self::O => 'O',
        }
    }
}

impl Not for Player {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.opponent()
    }
}

impl TryFrom<char> for Player {
    type Error = anyhow::Error;

    fn try_from(mark: char) -> anyhow::Result<Self> {
        match mark {
            'x' | 'X' => Ok(Self::X),
            'o' | 'O' => Ok(Self::O),
            _ => bail!("player should be 'x' or 'o', got '{mark}'"),
        }
    }
}

impl FromStr for Player {
    type Err = anyhow::Error;

    fn from_str(player: &str) -> anyhow::Result<Self> {
        match player.trim().chars().collect_tuple() {
            Some((mark,)) => Self::try_from(mark),
            None => bail!("player should be a single character, got '{player}'"),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match &self {
                Self::X => 'x',
                Self::O => 'o',
            }
        )
    }
}

/// Board squares: from left to right, from the top row to the bottom one.
/// Columns are named with letters and rows with numbers:
///
/// ```text
///  a1 | b1 | c1
/// ----+----+----
///  a2 | b2 | c2
/// ----+----+----
///  a3 | b3 | c3
/// ```
///
/// The numeric value of a square is its row-major index:
///
/// ```
/// use noughts::game::core::Square;
///
/// assert_eq!(Square::A1 as u8, 0);
/// assert_eq!(Square::C1 as u8, 2);
/// assert_eq!(Square::B2 as u8, 4);
/// assert_eq!(Square::C3 as u8, 8);
/// assert_eq!(Square::new(1, 2), Square::C2);
/// ```
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[rustfmt::skip]
#[allow(missing_docs)]
pub enum Square {
    A1, B1, C1,
    A2, B2, C2,
    A3, B3, C3,
}

impl Square {
    /// All squares in row-major order. Move generation iterates over them in
    /// this order, which fixes the order of siblings in the game tree.
    #[rustfmt::skip]
    pub const ALL: [Self; BOARD_SIZE as usize] = [
        Self::A1, Self::B1, Self::C1,
        Self::A2, Self::B2, Self::C2,
        Self::A3, Self::B3, Self::C3,
    ];

    /// Connects row and column (both zero-based) to form a square.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is outside of the board.
    #[must_use]
    pub const fn new(row: u8, column: u8) -> Self {
        assert!(row < BOARD_WIDTH && column < BOARD_WIDTH);
        Self::ALL[(row * BOARD_WIDTH + column) as usize]
    }

    /// Iterates over all squares in row-major order.
    pub fn iter() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter()
    }

    /// Zero-based row, counted from the top.
    #[must_use]
    pub const fn row(self) -> u8 {
        self as u8 / BOARD_WIDTH
    }

    /// Zero-based column, counted from the left.
    #[must_use]
    pub const fn column(self) -> u8 {
        self as u8 % BOARD_WIDTH
    }

    #[must_use]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Square {
    type Error = anyhow::Error;

    /// Creates a square given its row-major index on the board.
    ///
    /// # Errors
    ///
    /// If given square index is outside 0..[`BOARD_SIZE`] range.
    fn try_from(square_index: u8) -> anyhow::Result<Self> {
        match Self::ALL.get(square_index as usize) {
            Some(&square) => Ok(square),
            None => bail!("square index should be in 0..BOARD_SIZE, got {square_index}"),
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.column()) as char, self.row() + 1)
    }
}

/// Three squares in a row, column or diagonal: occupying all of them with the
/// same mark wins the game.
pub type Line = [Square; 3];

/// All winning lines: rows first, then columns, then the two diagonals. The
/// order is only important for determinism of [`crate::game::position::Position::winner`].
#[rustfmt::skip]
pub const LINES: [Line; 8] = [
    // Rows.
    [Square::A1, Square::B1, Square::C1],
    [Square::A2, Square::B2, Square::C2],
    [Square::A3, Square::B3, Square::C3],
    // Columns.
    [Square::A1, Square::A2, Square::A3],
    [Square::B1, Square::B2, Square::B3],
    [Square::C1, Square::C2, Square::C3],
    // Diagonals.
    [Square::A1, Square::B2, Square::C3],
    [Square::C1, Square::B2, Square::A3],
];

/// Result of the game under best play, as determined by the retrograde
/// analysis. Every position starts as [`Outcome::Unknown`] and is resolved
/// exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Outcome {
    /// Not analyzed yet.
    #[default]
    Unknown,
    /// Given player completes a line.
    Win(Player),
    /// The board is filled without any completed line.
    Draw,
}

impl Outcome {
    /// Returns `true` once the outcome has been determined.
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Win(player) => write!(f, "{} wins", player.symbol()),
            Self::Draw => write!(f, "draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn square_coordinates() {
        for (index, square) in Square::iter().enumerate() {
            assert_eq!(square.index(), index);
            assert_eq!(Square::new(square.row(), square.column()), square);
            assert_eq!(Square::try_from(index as u8).unwrap(), square);
        }
        assert_eq!(Square::B3.row(), 2);
        assert_eq!(Square::B3.column(), 1);
        assert!(Square::try_from(9).is_err());
    }

    #[test]
    fn square_notation() {
        assert_eq!(Square::A1.to_string(), "a1");
        assert_eq!(Square::C2.to_string(), "c2");
        assert_eq!(Square::B3.to_string(), "b3");
    }

    #[test]
    fn player() {
        assert_eq!(!Player::X, Player::O);
        assert_eq!(!Player::O, Player::X);
        assert_eq!(Player::try_from('X').unwrap(), Player::X);
        assert_eq!("o".parse::<Player>().unwrap(), Player::O);
        assert!("xo".parse::<Player>().is_err());
        assert!(Player::try_from('-').is_err());
        assert_eq!(Player::O.to_string(), "o");
        assert_eq!(Player::O.symbol(), 'O');
        assert_eq!(Outcome::Win(Player::O).to_string(), "O wins");
    }

    #[test]
    fn lines_are_distinct() {
        let lines = LINES.iter().map(|line| line.iter().sorted().collect_vec());
        assert_eq!(lines.unique().count(), LINES.len());
    }

    #[test]
    fn outcome_display() {
        assert_eq!(Outcome::default(), Outcome::Unknown);
        assert!(!Outcome::Unknown.is_resolved());
        assert!(Outcome::Draw.is_resolved());
        assert_eq!(Outcome::Win(Player::O).to_string(), "O wins");
        assert_eq!(Outcome::Draw.to_string(), "draw");
    }
}
