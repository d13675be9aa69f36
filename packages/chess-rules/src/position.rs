use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::str::FromStr;

use chess::{Board, BoardBuilder, BoardStatus, ChessMove, MoveGen, Piece};

use crate::error::RulesError;
use crate::moves::{AppliedMove, MoveSpec};
use crate::san;
use crate::types::{Color, PieceKind, Square};

/// FEN of the standard starting position.
pub const STANDARD_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Half-moves without a pawn move or capture after which the game is drawn.
pub const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// Why a game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    ThreefoldRepetition,
}

impl Outcome {
    pub fn is_draw(self) -> bool {
        !matches!(self, Outcome::Checkmate { .. })
    }
}

/// A chess position with the bookkeeping FEN needs (move clocks) and the
/// repetition history needed for threefold detection.
#[derive(Clone)]
pub struct Position {
    board: Board,
    halfmove_clock: u32,
    fullmove_number: u32,
    /// Hashes since the last irreversible move, current position last.
    history: Vec<u64>,
}

impl Position {
    pub fn standard() -> Self {
        Self::from_board(Board::default(), 0, 1)
    }

    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let invalid = || RulesError::InvalidFen(fen.to_string());
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(invalid());
        }

        let halfmove_clock = match fields.get(4) {
            Some(raw) => raw.parse::<u32>().map_err(|_| invalid())?,
            None => 0,
        };
        let fullmove_number = match fields.get(5) {
            Some(raw) => raw.parse::<u32>().map_err(|_| invalid())?,
            None => 1,
        };
        if fullmove_number == 0 {
            return Err(invalid());
        }
        // The engine indexes its attack tables by king square before it
        // checks sanity, so the king count has to be settled here.
        if fields[0].matches('K').count() != 1 || fields[0].matches('k').count() != 1 {
            return Err(invalid());
        }

        let normalized = format!(
            "{} {} {} {} {halfmove_clock} {fullmove_number}",
            fields[0], fields[1], fields[2], fields[3]
        );
        let board = Board::from_str(&normalized).map_err(|_| invalid())?;

        Ok(Self::from_board(board, halfmove_clock, fullmove_number))
    }

    fn from_board(board: Board, halfmove_clock: u32, fullmove_number: u32) -> Self {
        Self {
            board,
            halfmove_clock,
            fullmove_number,
            history: vec![board.get_hash()],
        }
    }

    /// Side to move.
    pub fn turn(&self) -> Color {
        Color::from_engine(self.board.side_to_move())
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn piece_at(&self, square: Square) -> Option<(PieceKind, Color)> {
        let sq = square.to_engine();
        let piece = self.board.piece_on(sq)?;
        let color = self.board.color_on(sq)?;
        Some((PieceKind::from_engine(piece), Color::from_engine(color)))
    }

    /// Full six-field FEN.
    pub fn fen(&self) -> String {
        let mut placement = String::with_capacity(64);
        for rank in (0..8u8).rev() {
            let mut empty = 0u8;
            for file in 0..8u8 {
                let occupant = Square::new(file, rank).and_then(|sq| self.piece_at(sq));
                match occupant {
                    Some((kind, color)) => {
                        if empty > 0 {
                            placement.push((b'0' + empty) as char);
                            empty = 0;
                        }
                        placement.push(kind.fen_char(color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                placement.push((b'0' + empty) as char);
            }
            if rank > 0 {
                placement.push('/');
            }
        }

        let mut castling = String::new();
        let white = self.board.castle_rights(chess::Color::White);
        let black = self.board.castle_rights(chess::Color::Black);
        if white.has_kingside() {
            castling.push('K');
        }
        if white.has_queenside() {
            castling.push('Q');
        }
        if black.has_kingside() {
            castling.push('k');
        }
        if black.has_queenside() {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let en_passant = self
            .en_passant_target()
            .map(|sq| sq.to_string())
            .unwrap_or_else(|| "-".to_string());

        format!(
            "{placement} {} {castling} {en_passant} {} {}",
            self.turn().as_char(),
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// The square a pawn capturing en passant would land on.
    fn en_passant_target(&self) -> Option<Square> {
        // The engine records the square of the pawn that just advanced two ranks.
        let pawn = Square::from_engine(self.board.en_passant()?);
        let target_rank = match pawn.rank() {
            3 => 2,
            4 => 5,
            other => other,
        };
        Square::new(pawn.file(), target_rank)
    }

    /// Every legal move for the side to move. Promotions are listed once
    /// per promotion piece.
    pub fn legal_moves(&self) -> Vec<MoveSpec> {
        MoveGen::new_legal(&self.board)
            .map(|mv| MoveSpec {
                from: Square::from_engine(mv.get_source()),
                to: Square::from_engine(mv.get_dest()),
                promotion: mv.get_promotion().map(PieceKind::from_engine),
            })
            .collect()
    }

    /// Validate and play `spec` for the side to move.
    ///
    /// A pawn reaching the last rank without a promotion letter promotes to a
    /// queen. On error the position is unchanged.
    pub fn apply_move(&mut self, spec: &MoveSpec) -> Result<AppliedMove, RulesError> {
        let illegal = || RulesError::IllegalMove {
            from: spec.from,
            to: spec.to,
        };
        let from = spec.from.to_engine();
        let to = spec.to.to_engine();
        let mover = self.board.side_to_move();

        let piece = self.board.piece_on(from).ok_or_else(illegal)?;
        if self.board.color_on(from) != Some(mover) {
            return Err(illegal());
        }

        let last_rank = match mover {
            chess::Color::White => 7,
            chess::Color::Black => 0,
        };
        let promotion = if piece == Piece::Pawn && spec.to.rank() == last_rank {
            Some(spec.promotion.unwrap_or(PieceKind::Queen).to_engine())
        } else {
            None
        };

        let mv = ChessMove::new(from, to, promotion);
        if !MoveGen::new_legal(&self.board).any(|legal| legal == mv) {
            return Err(illegal());
        }

        let captured = match self.board.piece_on(to) {
            Some(taken) => Some(taken),
            // Diagonal pawn step onto an empty square is an en passant capture.
            None if piece == Piece::Pawn && spec.from.file() != spec.to.file() => Some(Piece::Pawn),
            None => None,
        };

        let san = san::render(&self.board, mv, piece, captured.is_some());
        let next = self.board.make_move_new(mv);

        let irreversible = piece == Piece::Pawn || captured.is_some();
        if irreversible {
            self.halfmove_clock = 0;
            self.history.clear();
        } else {
            self.halfmove_clock += 1;
        }
        if mover == chess::Color::Black {
            self.fullmove_number += 1;
        }
        self.board = next;
        self.history.push(next.get_hash());

        let promotion = promotion.map(PieceKind::from_engine);
        Ok(AppliedMove {
            color: Color::from_engine(mover),
            from: spec.from,
            to: spec.to,
            piece: PieceKind::from_engine(piece),
            captured: captured.map(PieceKind::from_engine),
            promotion,
            san,
            lan: AppliedMove::lan_for(spec.from, spec.to, promotion),
        })
    }

    /// Put `kind`/`color` on `square`, replacing whatever stood there. Side to
    /// move, castling rights and clocks are kept.
    ///
    /// No move legality is involved; only positions the engine cannot
    /// represent at all (missing or extra king, side not to move left in
    /// check) are refused.
    pub fn place_piece(
        &mut self,
        square: Square,
        kind: PieceKind,
        color: Color,
    ) -> Result<(), RulesError> {
        let refused = RulesError::InvalidPlacement {
            square,
            piece: kind,
        };
        let replaces_king = self.board.piece_on(square.to_engine()) == Some(Piece::King);
        if replaces_king || kind == PieceKind::King {
            return Err(refused);
        }

        let mut builder = BoardBuilder::from(&self.board);
        builder.piece(square.to_engine(), kind.to_engine(), color.to_engine());
        let board = Board::try_from(builder).map_err(|_| refused)?;

        self.board = board;
        match self.history.last_mut() {
            Some(last) => *last = board.get_hash(),
            None => self.history.push(board.get_hash()),
        }
        Ok(())
    }

    pub fn is_check(&self) -> bool {
        self.board.checkers().popcnt() > 0
    }

    pub fn is_checkmate(&self) -> bool {
        self.board.status() == BoardStatus::Checkmate
    }

    pub fn is_stalemate(&self) -> bool {
        self.board.status() == BoardStatus::Stalemate
    }

    /// Neither side can possibly mate: bare kings, a single minor piece, or
    /// bishops only, all on squares of one colour.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = Vec::new();
        for square in Square::all() {
            match self.piece_at(square) {
                None | Some((PieceKind::King, _)) => {}
                Some((PieceKind::Knight, _)) => minors.push((PieceKind::Knight, square)),
                Some((PieceKind::Bishop, _)) => minors.push((PieceKind::Bishop, square)),
                Some(_) => return false,
            }
        }

        if minors.len() <= 1 {
            return true;
        }
        let square_shade = |sq: Square| (sq.file() + sq.rank()) % 2;
        let first_shade = square_shade(minors[0].1);
        minors
            .iter()
            .all(|(kind, sq)| *kind == PieceKind::Bishop && square_shade(*sq) == first_shade)
    }

    pub fn is_threefold_repetition(&self) -> bool {
        let Some(current) = self.history.last() else {
            return false;
        };
        self.history.iter().filter(|hash| *hash == current).count() >= 3
    }

    pub fn is_draw(&self) -> bool {
        self.outcome().is_some_and(Outcome::is_draw)
    }

    /// Terminal condition, if the game is over. Checkmate and stalemate take
    /// precedence over the counting rules.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.board.status() {
            BoardStatus::Checkmate => {
                return Some(Outcome::Checkmate {
                    winner: self.turn().opponent(),
                })
            }
            BoardStatus::Stalemate => return Some(Outcome::Stalemate),
            BoardStatus::Ongoing => {}
        }

        if self.is_insufficient_material() {
            Some(Outcome::InsufficientMaterial)
        } else if self.halfmove_clock >= FIFTY_MOVE_HALFMOVES {
            Some(Outcome::FiftyMoveRule)
        } else if self.is_threefold_repetition() {
            Some(Outcome::ThreefoldRepetition)
        } else {
            None
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::standard()
    }
}

impl Debug for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_tuple("Position").field(&self.fen()).finish()
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.fen() == other.fen()
    }
}
