use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const BOARD_SIZE: u8 = 8;

/// The four diagonal directions as (row delta, col delta).
pub const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Side of the board. Red starts on rows 0..3 and advances toward increasing
/// row index; White starts on rows 5..8 and advances toward row 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Red,
    White,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Red => Side::White,
            Side::White => Side::Red,
        }
    }

    pub fn idx(self) -> usize {
        match self {
            Side::Red => 0,
            Side::White => 1,
        }
    }

    /// Row delta of a forward step.
    pub fn forward(self) -> i8 {
        match self {
            Side::Red => 1,
            Side::White => -1,
        }
    }

    /// Row on which this side's men become kings.
    pub fn promotion_row(self) -> u8 {
        match self {
            Side::Red => BOARD_SIZE - 1,
            Side::White => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Red => "red",
            Side::White => "white",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Man,
    King,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub side: Side,
    pub rank: Rank,
}

impl Piece {
    pub const fn man(side: Side) -> Self {
        Self {
            side,
            rank: Rank::Man,
        }
    }

    pub const fn king(side: Side) -> Self {
        Self {
            side,
            rank: Rank::King,
        }
    }

    pub fn is_king(self) -> bool {
        self.rank == Rank::King
    }

    /// Diagram character: `r`/`R` for red man/king, `w`/`W` for white.
    pub fn to_char(self) -> char {
        match (self.side, self.rank) {
            (Side::Red, Rank::Man) => 'r',
            (Side::Red, Rank::King) => 'R',
            (Side::White, Rank::Man) => 'w',
            (Side::White, Rank::King) => 'W',
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'r' => Some(Piece::man(Side::Red)),
            'R' => Some(Piece::king(Side::Red)),
            'w' => Some(Piece::man(Side::White)),
            'W' => Some(Piece::king(Side::White)),
            _ => None,
        }
    }
}

/// A cell of the 8x8 grid. Always in range; construct with [`Square::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSquare")]
pub struct Square {
    row: u8,
    col: u8,
}

/// Unvalidated wire form of a [`Square`].
#[derive(Debug, Deserialize)]
pub struct RawSquare {
    pub row: u8,
    pub col: u8,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SquareError {
    #[error("square ({row}, {col}) is off the board")]
    OutOfRange { row: u8, col: u8 },
    #[error("invalid square notation: {0:?}")]
    Notation(String),
}

impl TryFrom<RawSquare> for Square {
    type Error = SquareError;

    fn try_from(raw: RawSquare) -> Result<Self, Self::Error> {
        Square::new(raw.row, raw.col).ok_or(SquareError::OutOfRange {
            row: raw.row,
            col: raw.col,
        })
    }
}

impl Square {
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// Only dark squares, where `row + col` is odd, ever hold pieces.
    pub fn is_playable(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Unit step toward `other` when both lie on a common diagonal.
    pub fn diagonal_step(self, other: Square) -> Option<(i8, i8)> {
        let dr = other.row as i8 - self.row as i8;
        let dc = other.col as i8 - self.col as i8;
        if dr == 0 || dr.abs() != dc.abs() {
            return None;
        }
        Some((dr.signum(), dc.signum()))
    }

    /// All 64 squares, row-major.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Square { row, col }))
    }

    /// The 32 dark squares, row-major.
    pub fn playable() -> impl Iterator<Item = Square> {
        Square::all().filter(|sq| sq.is_playable())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col) as char;
        write!(f, "{file}{}", self.row + 1)
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let b = s.as_bytes();
        if b.len() != 2 || !(b'a'..=b'h').contains(&b[0]) || !(b'1'..=b'8').contains(&b[1]) {
            return Err(SquareError::Notation(s.to_string()));
        }
        Ok(Square {
            row: b[1] - b'1',
            col: b[0] - b'a',
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    Simple,
    Capture,
}

/// A single jump. A combo is a sequence of these by the same piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
    /// The enemy square jumped over, recorded at generation time.
    pub captured: Option<Square>,
}

impl Move {
    pub fn simple(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            kind: MoveKind::Simple,
            captured: None,
        }
    }

    pub fn capture(from: Square, to: Square, captured: Square) -> Self {
        Self {
            from,
            to,
            kind: MoveKind::Capture,
            captured: Some(captured),
        }
    }

    pub fn is_capture(&self) -> bool {
        self.kind == MoveKind::Capture
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = match self.kind {
            MoveKind::Simple => '-',
            MoveKind::Capture => 'x',
        };
        write!(f, "{}{sep}{}", self.from, self.to)
    }
}
