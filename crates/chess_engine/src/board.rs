//! Board model
//!
//! An 8x8 grid of optional piece handles backed by a piece arena, plus the
//! set of live pieces. Every structural mutation goes through the helpers at
//! the bottom of this file so that the grid and the live set never disagree:
//! a piece is in `live` iff exactly one grid cell refers to it.

use crate::constants::{BACK_RANK, BOARD_SIZE};
use crate::error::{ChessEngineError, ChessEngineResult};
use crate::types::*;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// `grid[file][rank]`
    grid: [[Option<PieceId>; 8]; 8],
    arena: Vec<Piece>,
    live: BTreeSet<PieceId>,
    /// Indexed by `Colour::index()`
    kings: [PieceId; 2],
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Board {
    /// Standard starting position
    pub fn new() -> Self {
        let mut layout = Vec::with_capacity(32);
        for colour in [Colour::White, Colour::Black] {
            for (file, kind) in BACK_RANK.iter().enumerate() {
                let file = file as i8;
                layout.push((*kind, colour, Position::new(file, colour.home_rank())));
                layout.push((PieceKind::Pawn, colour, Position::new(file, colour.pawn_rank())));
            }
        }
        match Board::from_pieces(&layout) {
            Ok(board) => board,
            Err(err) => unreachable!("standard layout rejected: {err}"),
        }
    }

    /// Builds a board from `(kind, colour, square)` triples. All pieces start
    /// unmoved. Exactly one king per colour is required.
    pub fn from_pieces(layout: &[(PieceKind, Colour, Position)]) -> ChessEngineResult<Self> {
        let mut grid = [[None; 8]; 8];
        let mut arena = Vec::with_capacity(layout.len());
        let mut kings: [Vec<PieceId>; 2] = [Vec::new(), Vec::new()];

        for &(kind, colour, pos) in layout {
            if !pos.is_on_board() {
                return Err(ChessEngineError::OffBoard { position: pos });
            }
            let (x, y) = pos.cell();
            if grid[x][y].is_some() {
                return Err(ChessEngineError::SquareOccupied { square: pos });
            }
            let id = PieceId(arena.len() as u16);
            arena.push(Piece::new(kind, colour, pos));
            grid[x][y] = Some(id);
            if kind == PieceKind::King {
                kings[colour.index()].push(id);
            }
        }

        let king_of = |colour: Colour| match kings[colour.index()].as_slice() {
            [id] => Ok(*id),
            other => Err(ChessEngineError::KingCount {
                colour,
                found: other.len(),
            }),
        };
        let kings = [king_of(Colour::White)?, king_of(Colour::Black)?];
        let live = (0..arena.len()).map(|i| PieceId(i as u16)).collect();

        Ok(Board {
            grid,
            arena,
            live,
            kings,
        })
    }

    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.arena[id.index()]
    }

    pub fn piece_id_at(&self, pos: Position) -> Option<PieceId> {
        if !pos.is_on_board() {
            return None;
        }
        let (x, y) = pos.cell();
        self.grid[x][y]
    }

    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        self.piece_id_at(pos).map(|id| self.piece(id))
    }

    #[inline]
    pub fn has_piece_at(&self, pos: Position) -> bool {
        self.piece_id_at(pos).is_some()
    }

    pub fn has_coloured_piece_at(&self, pos: Position, colour: Colour) -> bool {
        self.piece_at(pos).is_some_and(|piece| piece.colour == colour)
    }

    pub fn king(&self, colour: Colour) -> PieceId {
        self.kings[colour.index()]
    }

    pub fn is_live(&self, id: PieceId) -> bool {
        self.live.contains(&id)
    }

    /// Live pieces in arena order
    pub fn live_pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.live.iter().map(move |&id| (id, self.piece(id)))
    }

    /// Snapshot of one side's live pieces, safe to hold across mutations
    pub fn pieces_of(&self, colour: Colour) -> Vec<PieceId> {
        self.live_pieces()
            .filter(|(_, piece)| piece.colour == colour)
            .map(|(id, _)| id)
            .collect()
    }

    /// Rooks of one colour, derived from the live set
    pub fn rooks(&self, colour: Colour) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.live_pieces()
            .filter(move |(_, piece)| piece.kind == PieceKind::Rook && piece.colour == colour)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    // Structural mutation. Callers pass on-board squares only.

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.arena[id.index()]
    }

    /// Moves `id` from its square to `to`, which must be empty.
    pub(crate) fn relocate(&mut self, id: PieceId, to: Position) {
        let from = self.piece(id).pos;
        let (fx, fy) = from.cell();
        let (tx, ty) = to.cell();
        debug_assert_eq!(self.grid[fx][fy], Some(id));
        debug_assert!(self.grid[tx][ty].is_none());
        self.grid[fx][fy] = None;
        self.grid[tx][ty] = Some(id);
        self.piece_mut(id).pos = to;
    }

    /// Removes the piece from its square and from the live set.
    pub(crate) fn take(&mut self, id: PieceId) {
        let (x, y) = self.piece(id).pos.cell();
        debug_assert_eq!(self.grid[x][y], Some(id));
        self.grid[x][y] = None;
        self.live.remove(&id);
    }

    /// Puts a previously taken piece back on its recorded square.
    pub(crate) fn restore(&mut self, id: PieceId) {
        let (x, y) = self.piece(id).pos.cell();
        debug_assert!(self.grid[x][y].is_none());
        self.grid[x][y] = Some(id);
        self.live.insert(id);
    }

    /// Creates a new piece on an empty square.
    pub(crate) fn spawn(&mut self, piece: Piece) -> PieceId {
        let id = PieceId(self.arena.len() as u16);
        let (x, y) = piece.pos.cell();
        debug_assert!(self.grid[x][y].is_none());
        self.arena.push(piece);
        self.grid[x][y] = Some(id);
        self.live.insert(id);
        id
    }

    /// Drops the most recently spawned piece. Only valid right after `take`
    /// removed it from the board.
    pub(crate) fn despawn_last(&mut self, id: PieceId) {
        debug_assert_eq!(id.index() + 1, self.arena.len());
        debug_assert!(!self.live.contains(&id));
        self.arena.pop();
    }
}

impl fmt::Display for Board {
    /// Rank 8 at the top, uppercase white, lowercase black
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..BOARD_SIZE).rev() {
            for x in 0..BOARD_SIZE {
                let symbol = match self.piece_at(Position::new(x, y)) {
                    Some(piece) if piece.colour == Colour::White => piece.kind.symbol(),
                    Some(piece) => piece.kind.symbol().to_ascii_lowercase(),
                    None => '.',
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
