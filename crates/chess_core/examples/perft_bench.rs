//! Perft benchmark for profiling move generation with cargo-flamegraph.
//!
//! Usage:
//!   cargo flamegraph --example perft_bench -p chess_core -- [depth] [placement] [w|b]
//!
//! Examples:
//!   # Default: depth 3 over the built-in positions
//!   cargo flamegraph --example perft_bench -p chess_core
//!
//!   # Custom depth and position
//!   cargo flamegraph --example perft_bench -p chess_core -- 3 "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8" w

use chess_core::{perft, Board, Color};
use std::env;
use std::time::Instant;

/// Positions whose shallow trees contain no castling, en passant or promotion
const TEST_POSITIONS: &[(&str, &str, Color)] = &[
    (
        "Starting position",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
        Color::White,
    ),
    ("Position 3", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8", Color::White),
    (
        "Open middlegame",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1",
        Color::White,
    ),
];

fn main() {
    let args: Vec<String> = env::args().collect();

    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3);

    if let Some(placement) = args.get(2) {
        let color = args
            .get(3)
            .and_then(|s| s.parse().ok())
            .unwrap_or(Color::White);
        run_single_position(placement, color, depth);
    } else {
        for (name, placement, color) in TEST_POSITIONS {
            println!("{name}:");
            run_single_position(placement, *color, depth);
        }
    }
}

fn run_single_position(placement: &str, color: Color, depth: u8) {
    let board = match Board::from_placement(placement) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Invalid placement {placement:?}: {e}");
            return;
        }
    };

    for d in 1..=depth {
        let start = Instant::now();
        let nodes = perft(&board, color, d);
        let elapsed = start.elapsed();
        let nps = nodes as f64 / elapsed.as_secs_f64().max(1e-9);
        println!(
            "  depth {d}: {nodes:>10} nodes in {:>8.3}s ({:.0} nps)",
            elapsed.as_secs_f64(),
            nps
        );
    }
}
