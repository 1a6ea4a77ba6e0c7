use super::*;
use crate::error::MoveError;

fn sq(name: &str) -> Square {
    Square::from_name(name).unwrap()
}

fn play(game: &mut Game, from: &str, to: &str) -> MoveRecord {
    game.apply_move(sq(from), sq(to))
        .unwrap_or_else(|e| panic!("{from}{to} rejected: {e}"))
}

#[test]
fn test_new_game() {
    let game = Game::new();
    assert_eq!(game.current_player(), Color::White);
    assert_eq!(game.status(), GameStatus::InProgress);
    assert!(!game.is_game_over());
    assert!(game.history().is_empty());
    assert_eq!(game.legal_moves().len(), 20);
}

#[test]
fn test_apply_move_advances_turn() {
    let mut game = Game::new();
    let record = play(&mut game, "e2", "e4");
    assert_eq!(record.notation, "e4");
    assert_eq!(record.player, Color::White);
    assert_eq!(record.move_number, 1);
    assert_eq!(game.current_player(), Color::Black);
    assert_eq!(game.board().piece_at(sq("e2")), None);
    assert_eq!(
        game.board().piece_at(sq("e4")),
        Some(Piece::new(Color::White, PieceKind::Pawn))
    );
    assert_eq!(game.last_move(), Some(&record));
}

#[test]
fn test_move_numbers_are_full_moves() {
    let mut game = Game::new();
    let numbers: Vec<u32> = [("e2", "e4"), ("e7", "e5"), ("g1", "f3"), ("b8", "c6")]
        .iter()
        .map(|(f, t)| play(&mut game, f, t).move_number)
        .collect();
    assert_eq!(numbers, vec![1, 1, 2, 2]);
}

#[test]
fn test_illegal_move_leaves_game_untouched() {
    let mut game = Game::new();
    let before = *game.board();

    let err = game.apply_move(sq("e2"), sq("e5")).unwrap_err();
    assert_eq!(
        err,
        MoveError::Illegal {
            from: sq("e2"),
            to: sq("e5"),
            mover: Color::White
        }
    );
    // Black piece while white is to move
    assert!(game.apply_move(sq("e7"), sq("e5")).is_err());

    assert_eq!(*game.board(), before);
    assert_eq!(game.current_player(), Color::White);
    assert!(game.history().is_empty());
}

#[test]
fn test_capture_notation() {
    let mut game = Game::new();
    play(&mut game, "e2", "e4");
    play(&mut game, "d7", "d5");
    let capture = play(&mut game, "e4", "d5");
    assert_eq!(capture.notation, "exd5");
    assert_eq!(
        capture.mv.captured,
        Some(Piece::new(Color::Black, PieceKind::Pawn))
    );
    let queen = play(&mut game, "d8", "d5");
    assert_eq!(queen.notation, "Qxd5");
    assert_eq!(play(&mut game, "g1", "f3").notation, "Nf3");
}

#[test]
fn test_king_cache_follows_king() {
    let board = Board::from_placement("4k3/8/8/8/8/8/8/4K3").unwrap();
    let mut game = Game::from_board(board, Color::White);
    play(&mut game, "e1", "e2");
    assert_eq!(game.board().king_square(Color::White), sq("e2"));
    play(&mut game, "e8", "d7");
    assert_eq!(game.board().king_square(Color::Black), sq("d7"));
}

#[test]
fn test_fools_mate() {
    let mut game = Game::new();
    play(&mut game, "f2", "f3");
    play(&mut game, "e7", "e5");
    play(&mut game, "g2", "g4");
    assert!(!game.is_game_over());
    let last = play(&mut game, "d8", "h4");
    assert_eq!(last.notation, "Qh4");

    assert!(game.in_check());
    assert!(game.is_game_over());
    assert_eq!(
        game.outcome(),
        Some(Outcome {
            kind: TerminalKind::Checkmate,
            winner: Some(Color::Black)
        })
    );
    assert!(game.legal_moves().is_empty());
}

#[test]
fn test_no_moves_after_terminal() {
    let mut game = Game::new();
    for (f, t) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
        play(&mut game, f, t);
    }
    let before = *game.board();
    assert_eq!(game.apply_move(sq("e1"), sq("f2")), Err(MoveError::GameOver));
    assert!(!game.is_valid_move(sq("a2"), sq("a3")));
    assert_eq!(*game.board(), before);
    assert_eq!(game.history().len(), 4);
}

#[test]
fn test_queen_move_stalemates() {
    let board = Board::from_placement("k7/8/2K5/8/8/8/1Q6/8").unwrap();
    let mut game = Game::from_board(board, Color::White);
    assert!(!game.is_game_over());

    play(&mut game, "b2", "b6");
    assert!(!game.in_check());
    assert_eq!(
        game.outcome(),
        Some(Outcome {
            kind: TerminalKind::Stalemate,
            winner: None
        })
    );
}

#[test]
fn test_fixture_starting_terminal() {
    let stalemate = Board::from_placement("k7/8/1QK5/8/8/8/8/8").unwrap();
    let game = Game::from_board(stalemate, Color::Black);
    assert_eq!(
        game.status(),
        GameStatus::Terminal(Outcome {
            kind: TerminalKind::Stalemate,
            winner: None
        })
    );

    let mate = Board::from_placement("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR").unwrap();
    let game = Game::from_board(mate, Color::White);
    assert_eq!(
        game.outcome(),
        Some(Outcome {
            kind: TerminalKind::Checkmate,
            winner: Some(Color::Black)
        })
    );
}
