use std::sync::mpsc;

use proptest::prelude::*;

use connect_four_engine::game::{
    check_win, Board, Cell, GameEngine, GameEvent, GamePhase, Player,
};

proptest! {
    /// Pieces in one column land on rows 0, 1, 2, ... until the column is full,
    /// after which drops are refused without touching the board.
    #[test]
    fn prop_column_fills_bottom_up(column in 0..8usize, extra in 0..5usize) {
        let mut board = Board::default();
        for expected_row in 0..board.rows() {
            let piece = board.place(column, Player::One).unwrap();
            prop_assert_eq!(piece.position.row, expected_row);
        }
        let full = board.clone();
        for _ in 0..extra {
            prop_assert!(board.place(column, Player::Two).is_err());
        }
        prop_assert_eq!(board, full);
    }

    /// Board invariants hold for any sequence of drops, accepted or not.
    #[test]
    fn prop_heights_match_cells(columns in proptest::collection::vec(0..10usize, 0..80)) {
        let mut board = Board::default();
        let mut player = Player::One;
        for column in columns {
            if board.place(column, player).is_ok() {
                player = player.other();
            }
        }
        let mut total = 0;
        for c in 0..board.columns() {
            let height = board.height(c);
            total += height;
            for r in 0..board.rows() {
                prop_assert_eq!(board.cell(c, r) != Cell::Empty, r < height);
            }
        }
        prop_assert_eq!(total, board.piece_count());
        prop_assert_eq!(board.is_full(), total == board.columns() * board.rows());
    }

    /// Turns alternate after every non-terminal drop, a rejected drop changes
    /// nothing, and a win is only ever reported for the player who just moved.
    #[test]
    fn prop_engine_turns_and_outcomes(columns in proptest::collection::vec(0..9usize, 1..120)) {
        let mut engine = GameEngine::default();
        let (tx, rx) = mpsc::channel();
        engine.subscribe(tx);
        engine.start_game().unwrap();
        rx.try_iter().for_each(drop);

        for column in columns {
            if engine.is_round_over() {
                prop_assert!(engine.drop_piece(column).is_err());
                prop_assert_eq!(rx.try_iter().count(), 0);
                break;
            }
            let mover = engine.active_player();
            let before = engine.board().clone();

            match engine.drop_piece(column).unwrap() {
                None => {
                    prop_assert_eq!(engine.board(), &before);
                    prop_assert_eq!(engine.active_player(), mover);
                    prop_assert_eq!(
                        rx.try_iter().collect::<Vec<_>>(),
                        vec![GameEvent::PieceDropped(None)]
                    );
                }
                Some(piece) => {
                    prop_assert_eq!(piece.player, mover);
                    prop_assert_eq!(engine.board().piece_count(), before.piece_count() + 1);
                    let events: Vec<_> = rx.try_iter().collect();
                    prop_assert_eq!(events.len(), 2);
                    prop_assert_eq!(events[0], GameEvent::PieceDropped(Some(piece)));
                    match events[1] {
                        GameEvent::NextPlayer(next) => {
                            prop_assert_eq!(next, mover.other());
                            prop_assert_eq!(engine.active_player(), mover.other());
                            prop_assert_eq!(engine.phase(), GamePhase::InProgress);
                        }
                        GameEvent::GameWin(winner) => {
                            prop_assert_eq!(winner, mover);
                            prop_assert!(check_win(engine.board(), piece.position, mover));
                            prop_assert_eq!(engine.active_player(), mover);
                        }
                        GameEvent::GameDraw => {
                            prop_assert!(engine.board().is_full());
                            prop_assert_eq!(engine.active_player(), mover);
                        }
                        GameEvent::PieceDropped(_) => {
                            prop_assert!(false, "duplicate drop event");
                        }
                    }
                }
            }
        }
    }

    /// Restarting clears the board and turn but never the score.
    #[test]
    fn prop_restart_preserves_score(columns in proptest::collection::vec(0..8usize, 0..60)) {
        let mut engine = GameEngine::default();
        engine.start_game().unwrap();
        for column in columns {
            if engine.is_round_over() {
                break;
            }
            engine.drop_piece(column).unwrap();
        }
        let score = engine.score();

        engine.restart_game().unwrap();
        prop_assert_eq!(engine.score(), score);
        prop_assert_eq!(engine.active_player(), Player::One);
        prop_assert_eq!(engine.phase(), GamePhase::InProgress);
        prop_assert_eq!(engine.board().piece_count(), 0);
        prop_assert_eq!(engine.board(), &Board::default());
    }
}
