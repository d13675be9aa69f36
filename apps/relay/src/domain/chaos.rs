//! Chaos variant: a queen or knight landing on the edge of the board is
//! demoted to a pawn of its own colour.
//!
//! The demotion is written straight into the position after the move has been
//! validated. The edited position is not re-checked for legality.

use chess_rules::{AppliedMove, PieceKind, Position, Square};
use tracing::warn;

/// Files a and h, ranks 1 and 8.
pub fn is_boundary_square(square: Square) -> bool {
    square.file() == 0 || square.file() == 7 || square.rank() == 0 || square.rank() == 7
}

/// The 28 boundary squares, a1 first.
pub fn boundary_squares() -> impl Iterator<Item = Square> {
    Square::all().filter(|sq| is_boundary_square(*sq))
}

/// Whether the chaos rule fires for a move that was just applied.
///
/// A promoting pawn counts as a pawn.
pub fn triggers(applied: &AppliedMove) -> bool {
    matches!(applied.piece, PieceKind::Queen | PieceKind::Knight) && is_boundary_square(applied.to)
}

/// Demote the piece `applied` moved if the rule fires. Returns whether the
/// position was changed.
pub fn apply_chaos_mutation(position: &mut Position, applied: &AppliedMove) -> bool {
    if !triggers(applied) {
        return false;
    }
    match position.place_piece(applied.to, PieceKind::Pawn, applied.color) {
        Ok(()) => true,
        Err(err) => {
            warn!(
                square = %applied.to,
                error = %err,
                "[BROKER] chaos downgrade refused by rules engine"
            );
            false
        }
    }
}
