//! # Core Types - Colours, Squares and Pieces
//!
//! ## Coordinates
//!
//! A [`Position`] is a `(file, rank)` pair with both components in `0..=7`
//! when it names a real square: `(0, 0)` is a1, `(7, 7)` is h8. White starts
//! on ranks 0-1 and moves towards rank 7.
//!
//! Components are signed so that move generation can step off the edge of
//! the board and filter afterwards; an off-board position is a valid
//! *candidate* but never a move.
//!
//! ## Pieces
//!
//! A [`Piece`] is plain data (kind, colour, square, moved flag). Pieces live
//! in the arena owned by [`Board`](crate::board::Board) and are referred to
//! by [`PieceId`]; a piece is never shared between boards.

use crate::constants::BOARD_SIZE;
use crate::error::{ChessEngineError, ChessEngineResult};
use std::fmt;
use std::ops::Not;
use std::str::FromStr;

/// Side colour. `!colour` yields the opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Colour {
    White,
    Black,
}

impl Colour {
    /// Rank delta of a forward pawn step
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Colour::White => 1,
            Colour::Black => -1,
        }
    }

    /// Back rank holding the king and rooks at setup
    #[inline]
    pub fn home_rank(self) -> i8 {
        match self {
            Colour::White => 0,
            Colour::Black => BOARD_SIZE - 1,
        }
    }

    /// Rank the pawns start on (double step allowed from here)
    #[inline]
    pub fn pawn_rank(self) -> i8 {
        self.home_rank() + self.forward()
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Colour::White => 0,
            Colour::Black => 1,
        }
    }
}

impl Not for Colour {
    type Output = Colour;

    fn not(self) -> Colour {
        match self {
            Colour::White => Colour::Black,
            Colour::Black => Colour::White,
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Colour::White => f.write_str("White"),
            Colour::Black => f.write_str("Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    /// Single-letter symbol used in board renderings
    pub fn symbol(self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
            PieceKind::Rook => 'R',
            PieceKind::Bishop => 'B',
            PieceKind::Knight => 'N',
            PieceKind::Pawn => 'P',
        }
    }
}

/// Board coordinate, see module docs for orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    #[inline]
    pub const fn new(x: i8, y: i8) -> Self {
        Position { x, y }
    }

    /// Builds a position from wire coordinates. Values that do not fit the
    /// board's integer type map to an off-board position.
    pub fn from_wire(x: i32, y: i32) -> Self {
        match (i8::try_from(x), i8::try_from(y)) {
            (Ok(x), Ok(y)) => Position { x, y },
            _ => Position { x: -1, y: -1 },
        }
    }

    #[inline]
    pub fn is_on_board(self) -> bool {
        (0..BOARD_SIZE).contains(&self.x) && (0..BOARD_SIZE).contains(&self.y)
    }

    #[inline]
    pub fn offset(self, dx: i8, dy: i8) -> Self {
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Colour of the square. a1 is dark.
    pub fn square_colour(self) -> Colour {
        if (self.x + self.y) % 2 == 0 {
            Colour::Black
        } else {
            Colour::White
        }
    }

    /// Index into the board grid. Caller guarantees `is_on_board()`.
    #[inline]
    pub(crate) fn cell(self) -> (usize, usize) {
        (self.x as usize, self.y as usize)
    }
}

impl From<(i8, i8)> for Position {
    fn from((x, y): (i8, i8)) -> Self {
        Position { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            write!(f, "{}{}", (b'a' + self.x as u8) as char, self.y + 1)
        } else {
            write!(f, "({}, {})", self.x, self.y)
        }
    }
}

impl FromStr for Position {
    type Err = ChessEngineError;

    /// Parses algebraic notation such as `"e2"`.
    fn from_str(name: &str) -> ChessEngineResult<Self> {
        let invalid = || ChessEngineError::InvalidSquareName {
            name: name.to_string(),
        };
        let mut chars = name.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let file = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(invalid());
        }
        Ok(Position::new(
            (file as u8 - b'a') as i8,
            (rank as u8 - b'1') as i8,
        ))
    }
}

/// Handle of a piece in a board's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub(crate) u16);

impl PieceId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub colour: Colour,
    pub pos: Position,
    /// Only consulted for castling eligibility
    pub has_moved: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, colour: Colour, pos: Position) -> Self {
        Piece {
            kind,
            colour,
            pos,
            has_moved: false,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {:?} {})", self.colour, self.kind, self.pos)
    }
}
