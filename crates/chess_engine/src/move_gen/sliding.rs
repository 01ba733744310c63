//! Sliding piece move generation
//!
//! Common functionality for sliding pieces (bishops, rooks, queens).
//! These pieces can move multiple squares in a direction until blocked.
//!
//! ## Algorithm
//!
//! For each direction we step one square at a time:
//! 1. Off the board: stop
//! 2. Empty square: valid move, keep going
//! 3. Opponent piece: valid capture, then stop
//! 4. Own piece: stop without including the square

use crate::board::Board;
use crate::types::*;

/// Ray-cast from the piece along each direction, appending reachable squares
///
/// # Arguments
///
/// * `board` - The current board
/// * `piece` - The sliding piece
/// * `dirs` - `(file, rank)` step vectors to follow
/// * `moves` - Output vector to append valid moves to
pub fn generate_sliding_moves(
    board: &Board,
    piece: &Piece,
    dirs: &[(i8, i8)],
    moves: &mut Vec<Position>,
) {
    for &(dx, dy) in dirs {
        let mut current = piece.pos.offset(dx, dy);
        while current.is_on_board() {
            match board.piece_at(current) {
                None => moves.push(current),
                Some(other) if other.colour != piece.colour => {
                    moves.push(current);
                    break;
                }
                Some(_) => break,
            }
            current = current.offset(dx, dy);
        }
    }
}

/// Whether a slider standing on `from` reaches `target` along one of `dirs`
///
/// The target's own occupancy is ignored (a defended piece still counts as
/// attacked); every square strictly between must be empty.
pub fn ray_reaches(board: &Board, from: Position, target: Position, dirs: &[(i8, i8)]) -> bool {
    let dx = target.x - from.x;
    let dy = target.y - from.y;
    if (dx, dy) == (0, 0) || !(dx == 0 || dy == 0 || dx.abs() == dy.abs()) {
        return false;
    }

    let step = (dx.signum(), dy.signum());
    if !dirs.contains(&step) {
        return false;
    }

    let mut current = from.offset(step.0, step.1);
    while current != target {
        if board.has_piece_at(current) {
            return false;
        }
        current = current.offset(step.0, step.1);
    }
    true
}
