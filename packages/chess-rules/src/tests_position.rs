use crate::{Color, MoveSpec, Outcome, PieceKind, Position, RulesError, Square, STANDARD_FEN};

fn sq(raw: &str) -> Square {
    raw.parse().expect("hardcoded valid square")
}

fn spec(lan: &str) -> MoveSpec {
    let base = MoveSpec::new(sq(&lan[0..2]), sq(&lan[2..4]));
    match lan.chars().nth(4) {
        Some('q') => base.with_promotion(PieceKind::Queen),
        Some('r') => base.with_promotion(PieceKind::Rook),
        Some('b') => base.with_promotion(PieceKind::Bishop),
        Some('n') => base.with_promotion(PieceKind::Knight),
        _ => base,
    }
}

fn play(position: &mut Position, moves: &[&str]) {
    for lan in moves {
        position
            .apply_move(&spec(lan))
            .unwrap_or_else(|err| panic!("{lan} should be legal: {err}"));
    }
}

fn load(fen: &str) -> Position {
    Position::from_fen(fen).expect("hardcoded valid FEN")
}

#[test]
fn standard_position_renders_standard_fen() {
    let position = Position::standard();
    assert_eq!(position.fen(), STANDARD_FEN);
    assert_eq!(position.turn(), Color::White);
    assert_eq!(position.legal_moves().len(), 20);
}

#[test]
fn alternate_start_loads() {
    let fen = "rnbrkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBRKBNR w KQkq - 0 1";
    let position = load(fen);
    assert_eq!(position.fen(), fen);
    assert_eq!(position.piece_at(sq("d1")), Some((PieceKind::Rook, Color::White)));
}

#[test]
fn pawn_push_updates_fen_and_turn() {
    let mut position = Position::standard();
    let applied = position.apply_move(&spec("e2e4")).unwrap();

    assert_eq!(applied.color, Color::White);
    assert_eq!(applied.piece, PieceKind::Pawn);
    assert_eq!(applied.captured, None);
    assert_eq!(applied.san, "e4");
    assert_eq!(applied.lan, "e2e4");
    assert_eq!(
        position.fen(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
    );
    assert_eq!(position.turn(), Color::Black);
}

#[test]
fn en_passant_target_and_capture() {
    let mut position = Position::standard();
    play(&mut position, &["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert_eq!(
        position.fen(),
        "rnbqkbnr/1pp1pppp/p7/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3"
    );

    let applied = position.apply_move(&spec("e5d6")).unwrap();
    assert_eq!(applied.captured, Some(PieceKind::Pawn));
    assert_eq!(applied.san, "exd6");
    assert_eq!(position.piece_at(sq("d5")), None);
}

#[test]
fn illegal_move_leaves_position_untouched() {
    let mut position = Position::standard();
    let err = position.apply_move(&spec("e2e5")).unwrap_err();
    assert_eq!(
        err,
        RulesError::IllegalMove {
            from: sq("e2"),
            to: sq("e5")
        }
    );
    assert_eq!(position.fen(), STANDARD_FEN);

    // Opponent's piece, and an empty origin square.
    assert!(position.apply_move(&spec("e7e5")).is_err());
    assert!(position.apply_move(&spec("e4e5")).is_err());
    assert_eq!(position.fen(), STANDARD_FEN);
}

#[test]
fn move_clocks_follow_quiet_moves() {
    let mut position = Position::standard();
    play(&mut position, &["g1f3"]);
    assert_eq!(position.halfmove_clock(), 1);
    assert_eq!(position.fullmove_number(), 1);

    play(&mut position, &["g8f6"]);
    assert_eq!(position.halfmove_clock(), 2);
    assert_eq!(position.fullmove_number(), 2);

    play(&mut position, &["e2e4"]);
    assert_eq!(position.halfmove_clock(), 0);
}

#[test]
fn fools_mate_is_checkmate() {
    let mut position = Position::standard();
    play(&mut position, &["f2f3", "e7e5", "g2g4"]);
    let applied = position.apply_move(&spec("d8h4")).unwrap();

    assert_eq!(applied.san, "Qh4#");
    assert!(position.is_check());
    assert!(position.is_checkmate());
    assert!(!position.is_draw());
    assert_eq!(
        position.outcome(),
        Some(Outcome::Checkmate {
            winner: Color::Black
        })
    );
}

#[test]
fn stalemate_is_a_draw() {
    let position = load("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    assert!(position.is_stalemate());
    assert!(!position.is_checkmate());
    assert!(position.is_draw());
    assert_eq!(position.outcome(), Some(Outcome::Stalemate));
    assert!(position.legal_moves().is_empty());
}

#[test]
fn insufficient_material_cases() {
    assert!(load("8/8/8/4k3/8/8/8/4K3 w - - 0 1").is_insufficient_material());
    assert!(load("8/8/8/4k3/8/8/8/2B1K3 w - - 0 1").is_insufficient_material());
    assert!(load("8/8/8/4k3/8/4B3/8/2B1K3 w - - 0 1").is_insufficient_material());

    assert!(!load("8/8/8/4k3/8/8/8/R3K3 w - - 0 1").is_insufficient_material());
    assert!(!load("8/8/8/4k1n1/8/8/8/1N2K3 w - - 0 1").is_insufficient_material());
    assert!(!load("8/8/8/3pk3/8/8/8/4K3 w - - 0 1").is_insufficient_material());
}

#[test]
fn knight_shuffle_reaches_threefold_repetition() {
    let mut position = Position::standard();
    let cycle = ["g1f3", "g8f6", "f3g1", "f6g8"];

    play(&mut position, &cycle);
    assert!(!position.is_threefold_repetition());

    play(&mut position, &cycle);
    assert!(position.is_threefold_repetition());
    assert_eq!(position.outcome(), Some(Outcome::ThreefoldRepetition));
    assert_eq!(position.fullmove_number(), 5);
}

#[test]
fn fifty_quiet_moves_draw() {
    let mut position = load("4k3/8/8/8/8/8/8/R3K3 w - - 99 80");
    assert_eq!(position.outcome(), None);
    play(&mut position, &["a1a2"]);
    assert_eq!(position.halfmove_clock(), 100);
    assert_eq!(position.outcome(), Some(Outcome::FiftyMoveRule));
}

#[test]
fn promotion_defaults_to_queen() {
    let mut position = load("8/P7/8/8/8/8/8/k6K w - - 0 1");
    let applied = position.apply_move(&spec("a7a8")).unwrap();

    assert_eq!(applied.piece, PieceKind::Pawn);
    assert_eq!(applied.promotion, Some(PieceKind::Queen));
    assert_eq!(applied.san, "a8=Q+");
    assert_eq!(applied.lan, "a7a8q");
    assert_eq!(position.fen(), "Q7/8/8/8/8/8/8/k6K b - - 0 1");
}

#[test]
fn underpromotion_is_honoured() {
    let mut position = load("8/P7/8/8/8/8/8/k6K w - - 0 1");
    let applied = position.apply_move(&spec("a7a8n")).unwrap();

    assert_eq!(applied.promotion, Some(PieceKind::Knight));
    assert_eq!(applied.san, "a8=N");
    assert_eq!(
        position.piece_at(sq("a8")),
        Some((PieceKind::Knight, Color::White))
    );
}

#[test]
fn promotion_letter_ignored_for_ordinary_moves() {
    let mut position = Position::standard();
    let applied = position
        .apply_move(&spec("e2e4").with_promotion(PieceKind::Queen))
        .unwrap();
    assert_eq!(applied.promotion, None);
    assert_eq!(applied.lan, "e2e4");
}

#[test]
fn castling_renders_san_and_drops_rights() {
    let mut position = load("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let applied = position.apply_move(&spec("e1g1")).unwrap();

    assert_eq!(applied.san, "O-O");
    assert_eq!(position.fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1");

    let applied = position.apply_move(&spec("e8c8")).unwrap();
    assert_eq!(applied.san, "O-O-O");
}

#[test]
fn san_disambiguates_by_file() {
    let mut position = load("4k3/8/8/8/8/8/8/1N3N1K w - - 0 1");
    let applied = position.apply_move(&spec("b1d2")).unwrap();
    assert_eq!(applied.san, "Nbd2");
}

#[test]
fn san_marks_captures() {
    let mut position = Position::standard();
    play(&mut position, &["e2e4", "d7d5"]);
    let applied = position.apply_move(&spec("e4d5")).unwrap();
    assert_eq!(applied.san, "exd5");
    assert_eq!(applied.captured, Some(PieceKind::Pawn));
}

#[test]
fn place_piece_overwrites_square() {
    let mut position = Position::standard();
    position
        .place_piece(sq("b1"), PieceKind::Pawn, Color::White)
        .unwrap();

    assert_eq!(
        position.fen(),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RPBQKBNR w KQkq - 0 1"
    );
    // The game carries on from the edited position.
    play(&mut position, &["e2e4"]);
    assert_eq!(position.turn(), Color::Black);
}

#[test]
fn place_piece_refuses_to_remove_a_king() {
    let mut position = Position::standard();
    let err = position
        .place_piece(sq("e1"), PieceKind::Pawn, Color::White)
        .unwrap_err();
    assert_eq!(
        err,
        RulesError::InvalidPlacement {
            square: sq("e1"),
            piece: PieceKind::Pawn
        }
    );
    assert_eq!(position.fen(), STANDARD_FEN);
}

#[test]
fn place_piece_refuses_a_second_king() {
    let mut position = Position::standard();
    let err = position
        .place_piece(sq("e4"), PieceKind::King, Color::White)
        .unwrap_err();
    assert_eq!(
        err,
        RulesError::InvalidPlacement {
            square: sq("e4"),
            piece: PieceKind::King
        }
    );
    assert_eq!(position.fen(), STANDARD_FEN);
}

#[test]
fn fen_without_exactly_one_king_per_side_is_rejected() {
    for fen in [
        "8/8/8/8/8/8/8/k7 w - - 0 1",
        "8/8/8/8/8/8/8/K7 b - - 0 1",
        "k7/8/8/8/8/8/8/K6K w - - 0 1",
        "8/8/8/8/8/8/8/8 w - - 0 1",
    ] {
        assert_eq!(
            Position::from_fen(fen).unwrap_err(),
            RulesError::InvalidFen(fen.to_string())
        );
    }
}

#[test]
fn malformed_fen_is_rejected() {
    for fen in [
        "",
        "not a fen",
        "8/8/8 w",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0",
    ] {
        assert_eq!(
            Position::from_fen(fen).unwrap_err(),
            RulesError::InvalidFen(fen.to_string())
        );
    }
}

#[test]
fn applied_move_serialises_with_lowercase_letters() {
    let mut position = Position::standard();
    let applied = position.apply_move(&spec("g1f3")).unwrap();
    let json = serde_json::to_value(&applied).unwrap();

    assert_eq!(json["color"], "w");
    assert_eq!(json["from"], "g1");
    assert_eq!(json["to"], "f3");
    assert_eq!(json["piece"], "n");
    assert_eq!(json["san"], "Nf3");
    assert!(json.get("captured").is_none());
}
