use std::fmt;

use thiserror::Error;

use crate::types::*;

/// Errors raised while parsing a board diagram.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("expected 8 rows, found {0}")]
    RowCount(usize),
    #[error("row {row}: expected 8 cells, found {found}")]
    RowWidth { row: usize, found: usize },
    #[error("invalid cell character {ch:?} at {square}")]
    InvalidChar { ch: char, square: Square },
    #[error("piece on non-playable square {0}")]
    Unplayable(Square),
}

/// The 8x8 grid. A plain data container: rule enforcement lives in
/// `movegen` and `executor`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize],
        }
    }

    /// Three back rows per side filled on dark squares, middle two rows empty.
    pub fn starting() -> Self {
        let mut b = Board::empty();
        for sq in Square::playable() {
            let side = match sq.row() {
                0..=2 => Side::Red,
                5..=7 => Side::White,
                _ => continue,
            };
            b.set(sq, Some(Piece::man(side)));
        }
        b
    }

    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.row() as usize][sq.col() as usize]
    }

    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        debug_assert!(
            piece.is_none() || sq.is_playable(),
            "piece placed on light square {sq}"
        );
        self.cells[sq.row() as usize][sq.col() as usize] = piece;
    }

    pub fn is_playable(row: u8, col: u8) -> bool {
        Square::new(row, col).is_some_and(Square::is_playable)
    }

    /// Every occupied square, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::playable().filter_map(|sq| self.get(sq).map(|pc| (sq, pc)))
    }

    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, pc)| pc.side == side)
    }

    pub fn count(&self, side: Side) -> usize {
        self.pieces(side).count()
    }

    /// Parse an eight-line diagram, row 0 first. `.` is empty, `r`/`R` a red
    /// man/king, `w`/`W` a white man/king. Blank lines and surrounding
    /// whitespace are ignored.
    pub fn from_diagram(text: &str) -> Result<Self, BoardError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE as usize {
            return Err(BoardError::RowCount(rows.len()));
        }

        let mut board = Board::empty();
        for (row, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.chars().collect();
            if cells.len() != BOARD_SIZE as usize {
                return Err(BoardError::RowWidth {
                    row,
                    found: cells.len(),
                });
            }
            for (col, &ch) in cells.iter().enumerate() {
                let Some(square) = Square::new(row as u8, col as u8) else {
                    continue;
                };
                if ch == '.' {
                    continue;
                }
                let piece =
                    Piece::from_char(ch).ok_or(BoardError::InvalidChar { ch, square })?;
                if !square.is_playable() {
                    return Err(BoardError::Unplayable(square));
                }
                board.set(square, Some(piece));
            }
        }
        Ok(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::starting()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let ch = cell.map_or('.', Piece::to_char);
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
