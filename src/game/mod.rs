//! Core Connect Four game logic: board and gravity, win detection, and the
//! round/session state machine with its notification contract.

mod board;
mod engine;
mod events;
mod player;
pub mod win;

pub use board::{Board, Cell, MoveError, Piece, Position};
pub use engine::{Command, GameEngine, GamePhase, Outcome, Score};
pub use events::{GameEvent, GameListener};
pub use player::Player;
pub use win::{check_win, winning_line, WIN_LENGTH};
