//! Notifications the engine emits to its presentation layer.

use std::sync::mpsc::Sender;

use super::{Piece, Player};

/// One state-change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A player's turn has begun.
    NextPlayer(Player),
    /// Result of a drop. `None` means the drop was rejected.
    PieceDropped(Option<Piece>),
    GameWin(Player),
    GameDraw,
}

impl GameEvent {
    /// Deliver this event to the matching listener callback.
    pub fn dispatch(&self, listener: &mut dyn GameListener) {
        match *self {
            GameEvent::NextPlayer(player) => listener.on_next_player(player),
            GameEvent::PieceDropped(piece) => listener.on_piece_dropped(piece),
            GameEvent::GameWin(player) => listener.on_game_win(player),
            GameEvent::GameDraw => listener.on_game_draw(),
        }
    }
}

/// Observer of engine notifications. Every callback defaults to a no-op.
///
/// Callbacks run after the engine has committed the transition that
/// produced them.
pub trait GameListener {
    fn on_next_player(&mut self, _player: Player) {}

    fn on_piece_dropped(&mut self, _piece: Option<Piece>) {}

    fn on_game_win(&mut self, _player: Player) {}

    fn on_game_draw(&mut self) {}
}

/// Forwards every notification into a channel. A disconnected receiver is ignored.
impl GameListener for Sender<GameEvent> {
    fn on_next_player(&mut self, player: Player) {
        let _ = self.send(GameEvent::NextPlayer(player));
    }

    fn on_piece_dropped(&mut self, piece: Option<Piece>) {
        let _ = self.send(GameEvent::PieceDropped(piece));
    }

    fn on_game_win(&mut self, player: Player) {
        let _ = self.send(GameEvent::GameWin(player));
    }

    fn on_game_draw(&mut self) {
        let _ = self.send(GameEvent::GameDraw);
    }
}
