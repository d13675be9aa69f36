//! Standard algebraic notation for moves the engine has already validated.

use chess::{Board, BoardStatus, ChessMove, MoveGen, Piece};

use crate::types::{PieceKind, Square};

/// Render `mv` (legal on `board`) in SAN, including the check/mate suffix.
pub(crate) fn render(board: &Board, mv: ChessMove, piece: Piece, is_capture: bool) -> String {
    let from = Square::from_engine(mv.get_source());
    let to = Square::from_engine(mv.get_dest());
    let mut san = String::new();

    let file_delta = (from.file() as i8 - to.file() as i8).abs();
    if piece == Piece::King && file_delta == 2 {
        san.push_str(if to.file() > from.file() { "O-O" } else { "O-O-O" });
    } else if piece == Piece::Pawn {
        if is_capture {
            san.push(from.file_char());
            san.push('x');
        }
        san.push_str(&to.to_string());
        if let Some(promoted) = mv.get_promotion() {
            san.push('=');
            san.push(PieceKind::from_engine(promoted).letter().to_ascii_uppercase());
        }
    } else {
        san.push(PieceKind::from_engine(piece).letter().to_ascii_uppercase());
        push_disambiguation(&mut san, board, mv, piece);
        if is_capture {
            san.push('x');
        }
        san.push_str(&to.to_string());
    }

    let after = board.make_move_new(mv);
    if after.status() == BoardStatus::Checkmate {
        san.push('#');
    } else if after.checkers().popcnt() > 0 {
        san.push('+');
    }
    san
}

/// Add the origin file, rank, or both when another piece of the same type
/// could also reach the destination.
fn push_disambiguation(san: &mut String, board: &Board, mv: ChessMove, piece: Piece) {
    let source = mv.get_source();
    let rivals: Vec<Square> = MoveGen::new_legal(board)
        .filter(|other| {
            other.get_dest() == mv.get_dest()
                && other.get_source() != source
                && board.piece_on(other.get_source()) == Some(piece)
        })
        .map(|other| Square::from_engine(other.get_source()))
        .collect();

    if rivals.is_empty() {
        return;
    }

    let from = Square::from_engine(source);
    let shares_file = rivals.iter().any(|sq| sq.file() == from.file());
    let shares_rank = rivals.iter().any(|sq| sq.rank() == from.rank());
    if !shares_file {
        san.push(from.file_char());
    } else if !shares_rank {
        san.push(from.rank_char());
    } else {
        san.push(from.file_char());
        san.push(from.rank_char());
    }
}
