//! End-to-end tests for evaluation, search, and the move-selection facade,
//! run against the shakmaty-backed rules adapter.

use bot_ai::eval::{EvalWeights, Evaluator, Score};
use bot_ai::rules::Rules;
use bot_ai::search::alpha_beta;
use bot_ai::selector::{MoveSelector, SelectorConfig, Strategy};
use bot_core::{Color, Move, PieceKind, Square};
use bot_shakmaty::ShakmatyBoard;

const ITALIAN_FEN: &str = "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 3 3";
const BACK_RANK_MATE_IN_1: &str = "6k1/5ppp/8/8/8/8/8/4R2K w - - 0 1";
const MATED_FEN: &str = "4R1k1/5ppp/8/8/8/8/8/7K b - - 0 1";
const STALEMATE_FEN: &str = "7k/5K2/6Q1/8/8/8/8/8 b - - 0 1";
const QUEEN_ENDGAME_FEN: &str = "8/2k5/8/8/3QK3/8/8/8 w - - 0 1";

fn selector(config: SelectorConfig) -> MoveSelector {
    MoveSelector::new(config).unwrap()
}

fn observe(board: &ShakmatyBoard) -> (Color, Vec<Option<(PieceKind, Color)>>, Vec<Move>) {
    let placement = (0..64u8)
        .map(|i| board.piece_at(Square::from_index(i).unwrap()))
        .collect();
    (board.side_to_move(), placement, board.legal_moves())
}

/// Reference implementation: full minimax over the same tree, no pruning,
/// same leftmost strictly-better tie-break.
fn naive_minimax(
    pos: &mut ShakmatyBoard,
    evaluator: &Evaluator,
    root_color: Color,
    depth: u32,
    maximizing: bool,
) -> (Score, Option<Move>) {
    if depth == 0 || pos.is_checkmate() || pos.is_stalemate() {
        return (evaluator.evaluate(pos, root_color).unwrap(), None);
    }

    let mut best_score = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    let mut best_move = None;

    for m in pos.legal_moves() {
        pos.push(m).unwrap();
        let (score, _) = naive_minimax(pos, evaluator, root_color, depth - 1, !maximizing);
        pos.undo().unwrap();

        let better = if maximizing {
            score > best_score
        } else {
            score < best_score
        };
        if better || best_move.is_none() {
            best_score = score;
            best_move = Some(m);
        }
    }

    (best_score, best_move)
}

// ===== Evaluation properties =====

#[test]
fn terminal_scoring() {
    let evaluator = Evaluator::default();

    let mated = ShakmatyBoard::from_fen(MATED_FEN).unwrap();
    assert_eq!(
        evaluator.evaluate(&mated, Color::Black).unwrap(),
        f64::NEG_INFINITY
    );
    assert_eq!(
        evaluator.evaluate(&mated, Color::White).unwrap(),
        f64::INFINITY
    );

    // Stalemate is the fixed penalty regardless of material on the board.
    let stalemate = ShakmatyBoard::from_fen(STALEMATE_FEN).unwrap();
    let expected = -EvalWeights::default().stalemate_penalty;
    assert_eq!(
        evaluator.evaluate(&stalemate, Color::Black).unwrap(),
        expected
    );
    assert_eq!(
        evaluator.evaluate(&stalemate, Color::White).unwrap(),
        expected
    );
}

#[test]
fn evaluation_is_zero_sum() {
    let evaluator = Evaluator::default();
    for fen in [ITALIAN_FEN, QUEEN_ENDGAME_FEN] {
        let board = ShakmatyBoard::from_fen(fen).unwrap();
        let white = evaluator.evaluate(&board, Color::White).unwrap();
        let black = evaluator.evaluate(&board, Color::Black).unwrap();
        assert_eq!(white, -black, "not zero-sum for {fen}");
    }

    let start = ShakmatyBoard::new();
    let white = evaluator.evaluate(&start, Color::White).unwrap();
    let black = evaluator.evaluate(&start, Color::Black).unwrap();
    assert_eq!(white, -black);
    // The initial position is symmetric, so it is dead even.
    assert_eq!(white, 0.0);
}

#[test]
fn evaluation_is_deterministic() {
    let evaluator = Evaluator::default();
    let board = ShakmatyBoard::from_fen(ITALIAN_FEN).unwrap();
    let first = evaluator.evaluate(&board, Color::White).unwrap();
    for _ in 0..10 {
        assert_eq!(evaluator.evaluate(&board, Color::White).unwrap(), first);
    }
}

#[test]
fn material_advantage_shows_up() {
    let evaluator = Evaluator::default();
    // White is a queen up.
    let board = ShakmatyBoard::from_fen(QUEEN_ENDGAME_FEN).unwrap();
    assert!(evaluator.evaluate(&board, Color::White).unwrap() > 5.0);
    assert!(evaluator.evaluate(&board, Color::Black).unwrap() < -5.0);
}

// ===== Search properties =====

#[test]
fn depth_zero_returns_the_static_evaluation() {
    let evaluator = Evaluator::default();
    let mut board = ShakmatyBoard::new();

    let outcome = alpha_beta(
        &mut board,
        &evaluator,
        Color::White,
        0,
        f64::NEG_INFINITY,
        f64::INFINITY,
        true,
    )
    .unwrap();

    assert_eq!(outcome.best, None);
    assert_eq!(
        outcome.score,
        evaluator.evaluate(&board, Color::White).unwrap()
    );
}

#[test]
fn pruning_never_changes_the_result() {
    let evaluator = Evaluator::default();
    let cases = [
        (ShakmatyBoard::new(), 1),
        (ShakmatyBoard::new(), 2),
        (ShakmatyBoard::from_fen(ITALIAN_FEN).unwrap(), 2),
        (ShakmatyBoard::from_fen(QUEEN_ENDGAME_FEN).unwrap(), 3),
        (ShakmatyBoard::from_fen(BACK_RANK_MATE_IN_1).unwrap(), 3),
    ];

    for (mut board, depth) in cases {
        let root_color = board.side_to_move();
        let (full_score, full_move) =
            naive_minimax(&mut board, &evaluator, root_color, depth, true);
        let pruned = alpha_beta(
            &mut board,
            &evaluator,
            root_color,
            depth,
            f64::NEG_INFINITY,
            f64::INFINITY,
            true,
        )
        .unwrap();

        assert_eq!(pruned.score, full_score, "score diverged at depth {depth}");
        assert_eq!(pruned.best, full_move, "move diverged at depth {depth}");
    }
}

#[test]
fn search_restores_the_board() {
    let evaluator = Evaluator::default();
    let mut board = ShakmatyBoard::from_fen(ITALIAN_FEN).unwrap();
    let before = observe(&board);

    alpha_beta(
        &mut board,
        &evaluator,
        Color::White,
        3,
        f64::NEG_INFINITY,
        f64::INFINITY,
        true,
    )
    .unwrap();

    assert_eq!(observe(&board), before);
    assert_eq!(board.ply_depth(), 0);
}

// ===== End-to-end scenarios =====

#[test]
fn scenario_a_start_position_yields_a_legal_move() {
    let mut board = ShakmatyBoard::new();
    let mut selector = selector(SelectorConfig::default());

    let m = selector
        .select_move(&mut board, Color::White)
        .unwrap()
        .expect("the start position has moves");

    assert!(board.legal_moves().contains(&m));
    board.push(m).unwrap();
    assert_eq!(board.side_to_move(), Color::Black);
}

#[test]
fn scenario_b_finds_mate_in_one() {
    let mate = Move::from_uci("e1e8").unwrap();

    for depth in [1, 2] {
        let mut board = ShakmatyBoard::from_fen(BACK_RANK_MATE_IN_1).unwrap();
        let mut selector = selector(SelectorConfig {
            search_depth: depth,
            ..SelectorConfig::default()
        });

        let m = selector.select_move(&mut board, Color::White).unwrap();
        assert_eq!(m, Some(mate), "missed the mate at depth {depth}");
    }

    // The mating line is the unique maximal score.
    let evaluator = Evaluator::default();
    let mut board = ShakmatyBoard::from_fen(BACK_RANK_MATE_IN_1).unwrap();
    let outcome = alpha_beta(
        &mut board,
        &evaluator,
        Color::White,
        1,
        f64::NEG_INFINITY,
        f64::INFINITY,
        true,
    )
    .unwrap();
    assert_eq!(outcome.score, f64::INFINITY);
    assert_eq!(outcome.best, Some(mate));
}

#[test]
fn scenario_c_book_move_plays_without_search() {
    let mut board = ShakmatyBoard::new();
    let mut selector = selector(SelectorConfig {
        opening_book: vec!["e2e4".into()],
        ..SelectorConfig::default()
    });

    let m = selector.select_move(&mut board, Color::White).unwrap();
    assert_eq!(m, Some(Move::from_uci("e2e4").unwrap()));
}

#[test]
fn scenario_c_book_is_mirrored_for_black() {
    let mut board = ShakmatyBoard::new();
    board.push(Move::from_uci("g1f3").unwrap()).unwrap();

    let mut selector = selector(SelectorConfig {
        opening_book: vec!["e2e4".into()],
        ..SelectorConfig::default()
    });

    let m = selector.select_move(&mut board, Color::Black).unwrap();
    assert_eq!(m, Some(Move::from_uci("e7e5").unwrap()));
}

#[test]
fn scenario_d_stale_book_falls_back_to_search() {
    // After 1.e4 e5 the e2 pawn is gone; the book entry can never match.
    let mut board =
        ShakmatyBoard::from_fen("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2")
            .unwrap();
    let mut selector = selector(SelectorConfig {
        opening_book: vec!["e2e4".into()],
        ..SelectorConfig::default()
    });

    let m = selector
        .select_move(&mut board, Color::White)
        .unwrap()
        .expect("plenty of legal moves left");

    assert_ne!(m, Move::from_uci("e2e4").unwrap());
    assert!(board.legal_moves().contains(&m));
}

#[test]
fn forced_loss_still_yields_a_move() {
    // Every White move here walks into an immediate back-rank mate, so
    // every root line scores negative infinity. The selector must still
    // return a legal move; only a position with no moves yields None.
    let mut board = ShakmatyBoard::from_fen("6r1/8/8/8/8/8/5kP1/7K w - - 0 1").unwrap();
    let legal = board.legal_moves();
    assert!(!legal.is_empty());

    let mut selector = selector(SelectorConfig::default());
    let m = selector
        .select_move(&mut board, Color::White)
        .unwrap()
        .expect("legal moves exist, so a move must come back");
    assert!(legal.contains(&m));

    // The search itself reports the forced loss but still names a move,
    // the leftmost one since all lines tie.
    let evaluator = Evaluator::default();
    let outcome = alpha_beta(
        &mut board,
        &evaluator,
        Color::White,
        2,
        f64::NEG_INFINITY,
        f64::INFINITY,
        true,
    )
    .unwrap();
    assert_eq!(outcome.score, f64::NEG_INFINITY);
    assert_eq!(outcome.best, Some(legal[0]));
}

#[test]
fn terminal_position_yields_no_move() {
    let mut board = ShakmatyBoard::from_fen(MATED_FEN).unwrap();
    let mut selector = selector(SelectorConfig::default());
    assert_eq!(selector.select_move(&mut board, Color::Black).unwrap(), None);

    let mut board = ShakmatyBoard::from_fen(STALEMATE_FEN).unwrap();
    assert_eq!(selector.select_move(&mut board, Color::Black).unwrap(), None);
}

#[test]
fn select_move_restores_the_board() {
    let mut board = ShakmatyBoard::from_fen(ITALIAN_FEN).unwrap();
    let before = observe(&board);

    let mut selector = selector(SelectorConfig::default());
    selector.select_move(&mut board, Color::White).unwrap();

    assert_eq!(observe(&board), before);
}

#[test]
fn opening_sequence_is_deterministic() {
    let config = SelectorConfig {
        opening_book: vec!["e2e4".into(), "d2d4".into()],
        ..SelectorConfig::default()
    };
    let replies = ["a7a6", "b7b6"];

    let mut runs = Vec::new();
    for _ in 0..2 {
        let mut board = ShakmatyBoard::new();
        let mut selector = selector(config.clone());
        let mut played = Vec::new();

        for reply in replies {
            let m = selector
                .select_move(&mut board, Color::White)
                .unwrap()
                .unwrap();
            played.push(m);
            board.push(m).unwrap();
            board.push(Move::from_uci(reply).unwrap()).unwrap();
        }
        runs.push(played);
    }

    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[0][0], Move::from_uci("e2e4").unwrap());
    assert_eq!(runs[0][1], Move::from_uci("d2d4").unwrap());
}

// ===== Alternative strategies =====

#[test]
fn greedy_strategy_prefers_the_center_from_the_start() {
    let mut board = ShakmatyBoard::new();
    let mut selector = selector(SelectorConfig {
        strategy: Strategy::Greedy,
        ..SelectorConfig::default()
    });

    let m = selector
        .select_move(&mut board, Color::White)
        .unwrap()
        .unwrap();
    assert!(
        m.to() == Square::D4 || m.to() == Square::E4,
        "expected a center-occupying move, got {m}"
    );
}

#[test]
fn greedy_strategy_takes_a_free_capture() {
    let mut board = ShakmatyBoard::from_fen("k7/8/8/3p4/4P3/8/8/K7 w - - 0 1").unwrap();
    let mut selector = selector(SelectorConfig {
        strategy: Strategy::Greedy,
        ..SelectorConfig::default()
    });

    let m = selector.select_move(&mut board, Color::White).unwrap();
    assert_eq!(m, Some(Move::from_uci("e4d5").unwrap()));
}

#[test]
fn greedy_strategy_counts_en_passant_as_a_capture() {
    // The only capture is en passant; its target square is empty, so the
    // capture bonus has to come from the pawn geometry, not the occupancy
    // of the destination.
    let mut board = ShakmatyBoard::from_fen("k7/8/8/3pP3/8/8/8/K7 w - d6 0 2").unwrap();
    let mut selector = selector(SelectorConfig {
        strategy: Strategy::Greedy,
        ..SelectorConfig::default()
    });

    let m = selector.select_move(&mut board, Color::White).unwrap();
    assert_eq!(m, Some(Move::from_uci("e5d6").unwrap()));
}

#[test]
fn random_strategy_is_reproducible_with_a_seed() {
    let config = SelectorConfig {
        strategy: Strategy::Random,
        rng_seed: Some(42),
        ..SelectorConfig::default()
    };

    let mut first = selector(config.clone());
    let mut second = selector(config);

    let mut board_a = ShakmatyBoard::new();
    let mut board_b = ShakmatyBoard::new();
    for _ in 0..4 {
        let color = board_a.side_to_move();
        let a = first.select_move(&mut board_a, color).unwrap().unwrap();
        let b = second.select_move(&mut board_b, color).unwrap().unwrap();
        assert_eq!(a, b);
        assert!(board_a.legal_moves().contains(&a));
        board_a.push(a).unwrap();
        board_b.push(b).unwrap();
    }
}
