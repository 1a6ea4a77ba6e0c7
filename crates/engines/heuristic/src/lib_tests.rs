use super::*;
use chess_core::{Piece, PieceKind, Square};

fn sq(name: &str) -> Square {
    Square::from_name(name).unwrap()
}

fn board(placement: &str) -> Board {
    Board::from_placement(placement).unwrap()
}

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn find(board: &Board, color: Color, from: &str, to: &str) -> Move {
    legal_moves(board, color)
        .into_iter()
        .find(|m| m.from == sq(from) && m.to == sq(to))
        .unwrap_or_else(|| panic!("{from}{to} should be legal"))
}

#[test]
fn quick_score_components() {
    let b = board("3qk3/8/8/8/8/8/8/3QK3");

    // Queen leaves row 0 for d5: development + center
    let to_center = find(&b, Color::Black, "d8", "d5");
    assert!((quick_score(&b, &to_center) - 0.8).abs() < 1e-9);

    // Sliding along row 0 earns nothing
    let sideways = find(&b, Color::Black, "d8", "b8");
    assert_eq!(quick_score(&b, &sideways), 0.0);

    // Capturing the queen: twice its value plus development
    let capture = find(&b, Color::Black, "d8", "d1");
    assert!((quick_score(&b, &capture) - 18.3).abs() < 1e-9);
}

#[test]
fn quick_score_king_shelter() {
    let b = board("4k3/8/8/8/8/8/8/4K3");
    let king = Piece::new(Color::Black, PieceKind::King);

    let corner_side = Move::new(sq("e8"), sq("f8"), king, None);
    assert_eq!(quick_score(&b, &corner_side), 0.0);

    let b = board("5k2/8/8/8/8/8/8/4K3");
    let tucked = Move::new(sq("f8"), sq("g8"), king, None);
    assert!((quick_score(&b, &tucked) - 0.4).abs() < 1e-9);
}

#[test]
fn jitter_stays_below_bound() {
    let b = Board::startpos();
    let mv = find(&b, Color::Black, "b8", "c6");
    let base = quick_score(&b, &mv);
    let mut r = rng(7);
    for _ in 0..200 {
        let s = evaluate_move_quick(&b, &mv, &mut r);
        assert!(s >= base && s < base + JITTER);
    }
}

#[test]
fn selects_legal_move_at_every_difficulty() {
    let b = Board::startpos();
    let legal = legal_moves(&b, Color::Black);
    for difficulty in Difficulty::ALL {
        for seed in 0..20 {
            let mv = select_move(&b, Color::Black, difficulty, &mut rng(seed)).unwrap();
            assert!(legal.contains(&mv), "{difficulty}: {mv}");
        }
    }
}

#[test]
fn no_move_when_checkmated_or_stalemated() {
    let mated = board("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR");
    let stalemated = board("k7/8/1QK5/8/8/8/8/8");
    for difficulty in Difficulty::ALL {
        assert_eq!(select_move(&mated, Color::White, difficulty, &mut rng(1)), None);
        assert_eq!(select_move(&stalemated, Color::Black, difficulty, &mut rng(1)), None);
    }
}

#[test]
fn hard_prefers_center_pawn_from_startpos() {
    let b = Board::startpos();
    for seed in 0..30 {
        let mv = select_move(&b, Color::Black, Difficulty::Hard, &mut rng(seed)).unwrap();
        assert!(
            (mv.from, mv.to) == (sq("d7"), sq("d5")) || (mv.from, mv.to) == (sq("e7"), sq("e5")),
            "unexpected {mv}"
        );
    }
}

#[test]
fn captures_hanging_queen() {
    let b = board("4k3/2p1p3/3Q4/8/8/8/8/4K3");
    for seed in 0..10 {
        let mv = select_move(&b, Color::Black, Difficulty::Medium, &mut rng(seed)).unwrap();
        assert_eq!(mv.to, sq("d6"));
        assert_eq!(mv.captured, Some(Piece::new(Color::White, PieceKind::Queen)));
    }
}

#[test]
fn only_first_fifteen_moves_are_scored() {
    // Qxd1 is the 17th queen move in generation order, so it is never seen
    let b = board("3qk3/8/8/8/8/8/8/3QK3");
    let moves = legal_moves(&b, Color::Black);
    let capture_idx = moves.iter().position(|m| m.to == sq("d1")).unwrap();
    assert!(capture_idx >= EVALUATION_WINDOW);

    for seed in 0..10 {
        let mv = select_move(&b, Color::Black, Difficulty::Hard, &mut rng(seed)).unwrap();
        assert!(mv.to == sq("d5") || mv.to == sq("d4"), "unexpected {mv}");
        assert!(mv.captured.is_none());
    }
}

#[test]
fn scored_pick_beats_window_without_jitter() {
    let positions = [
        (Board::startpos(), Color::Black),
        (Board::startpos(), Color::White),
        (board("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R"), Color::White),
        (board("rnbqkb1r/pppp1ppp/5n2/4p3/3PP3/8/PPP2PPP/RNBQKBNR"), Color::Black),
        (board("4k3/2p1p3/3Q4/8/8/8/8/4K3"), Color::Black),
    ];
    for (b, color) in positions {
        let moves = legal_moves(&b, color);
        let window = &moves[..moves.len().min(EVALUATION_WINDOW)];
        let best = window
            .iter()
            .map(|m| quick_score(&b, m))
            .fold(f64::MIN, f64::max);
        for difficulty in [Difficulty::Medium, Difficulty::Hard] {
            for seed in 0..25 {
                let mv = select_move(&b, color, difficulty, &mut rng(seed)).unwrap();
                assert!(window.contains(&mv));
                assert!(quick_score(&b, &mv) + 1e-9 >= best);
            }
        }
    }
}

#[test]
fn easy_sometimes_plays_outside_window() {
    let b = Board::startpos();
    let moves = legal_moves(&b, Color::Black);
    let outside = &moves[EVALUATION_WINDOW..];
    let hits = (0..200)
        .filter_map(|seed| select_move(&b, Color::Black, Difficulty::Easy, &mut rng(seed)))
        .filter(|mv| outside.contains(mv))
        .count();
    assert!(hits > 0);
}

#[test]
fn seeded_engine_is_reproducible() {
    let b = Board::startpos();
    let mut a = HeuristicEngine::with_seed(Difficulty::Easy, 42);
    let mut c = HeuristicEngine::with_seed(Difficulty::Easy, 42);
    for _ in 0..10 {
        assert_eq!(a.choose_move(&b, Color::Black), c.choose_move(&b, Color::Black));
    }
    assert_eq!(a.name(), "Heuristic (easy)");
}

#[test]
fn difficulty_parsing() {
    assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
    assert_eq!(" HARD ".parse::<Difficulty>(), Ok(Difficulty::Hard));
    assert_eq!(Difficulty::default(), Difficulty::Medium);
    assert!("brutal".parse::<Difficulty>().is_err());
    assert_eq!(Difficulty::Medium.to_string(), "medium");
}
