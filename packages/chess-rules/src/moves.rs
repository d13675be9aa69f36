use serde::{Deserialize, Serialize};

use crate::types::{Color, PieceKind, Square};

/// A move request as submitted by a player.
///
/// `promotion` is only consulted when a pawn reaches the last rank; it is
/// ignored for every other move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSpec {
    pub from: Square,
    pub to: Square,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceKind>,
}

impl MoveSpec {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(mut self, piece: PieceKind) -> Self {
        self.promotion = Some(piece);
        self
    }
}

/// A move the engine accepted, described the way clients display it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedMove {
    pub color: Color,
    pub from: Square,
    pub to: Square,
    /// Piece that moved (a promoting pawn is still a pawn here).
    pub piece: PieceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured: Option<PieceKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceKind>,
    pub san: String,
    pub lan: String,
}

impl AppliedMove {
    /// Long algebraic form, e.g. `e2e4`, `e7e8q`.
    pub(crate) fn lan_for(from: Square, to: Square, promotion: Option<PieceKind>) -> String {
        let mut lan = format!("{from}{to}");
        if let Some(piece) = promotion {
            lan.push(piece.letter());
        }
        lan
    }
}
