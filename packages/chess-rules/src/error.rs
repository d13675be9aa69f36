use thiserror::Error;

use crate::types::{PieceKind, Square};

/// Errors reported by the rules engine.
///
/// None of these leave a `Position` partially mutated: every operation either
/// completes or returns one of these with the position untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("invalid FEN: {0}")]
    InvalidFen(String),
    #[error("invalid square: {0}")]
    InvalidSquare(String),
    #[error("illegal move {from}{to}")]
    IllegalMove { from: Square, to: Square },
    #[error("placing {piece} on {square} does not yield a playable position")]
    InvalidPlacement { square: Square, piece: PieceKind },
}
