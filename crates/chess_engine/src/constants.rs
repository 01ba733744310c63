//! Board geometry and movement tables
//!
//! Direction vectors are `(file delta, rank delta)` pairs. Sliding pieces
//! repeat a direction until blocked; knights and kings apply each offset once.

use crate::types::PieceKind;

pub const BOARD_SIZE: i8 = 8;

/// Left, right, down, up
pub const ROOK_DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Up-left, up-right, down-left, down-right
pub const BISHOP_DIRS: [(i8, i8); 4] = [(-1, 1), (1, 1), (-1, -1), (1, -1)];

pub const QUEEN_DIRS: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, 1),
    (1, 1),
    (-1, -1),
    (1, -1),
];

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-1, -2),
    (1, -2),
    (-1, 2),
    (1, 2),
    (-2, 1),
    (-2, -1),
    (2, 1),
    (2, -1),
];

/// Clockwise from up-left
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
];

/// Back rank from file a to file h
pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// File the king starts on; castling is only generated from here
pub const KING_FILE: i8 = 4;

pub const QUEENSIDE_ROOK_FILE: i8 = 0;
pub const KINGSIDE_ROOK_FILE: i8 = 7;

/// King destination files after castling (queenside, kingside). The queenside
/// king lands next to the rook's corner, on the b-file.
pub const QUEENSIDE_KING_TO: i8 = 1;
pub const KINGSIDE_KING_TO: i8 = 6;

/// Rook destination files after castling (queenside, kingside)
pub const QUEENSIDE_ROOK_TO: i8 = 2;
pub const KINGSIDE_ROOK_TO: i8 = 5;
