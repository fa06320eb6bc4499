//! Round and session state machine.
//!
//! `AwaitingStart -> InProgress -> RoundOver -> InProgress (restart) -> ...`
//!
//! Commands issued in a phase that does not allow them return
//! [`EngineError::IllegalPhase`] and leave the engine untouched. Rejected
//! drops (bad column, full column) are not errors: they are reported through
//! a `PieceDropped(None)` notification.

use std::fmt;

use tracing::{debug, info, instrument, warn};

use super::events::{GameEvent, GameListener};
use super::win;
use super::{Board, Piece, Player, Position};
use crate::config::BoardConfig;
use crate::error::{ConfigError, EngineError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win(Player),
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(player) => write!(f, "{player} wins"),
            Outcome::Draw => f.write_str("draw"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    AwaitingStart,
    InProgress,
    RoundOver(Outcome),
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GamePhase::AwaitingStart => f.write_str("awaiting start"),
            GamePhase::InProgress => f.write_str("in progress"),
            GamePhase::RoundOver(outcome) => write!(f, "round over ({outcome})"),
        }
    }
}

/// Mutating engine commands, named in phase errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartGame,
    DropPiece,
    RestartGame,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Command::StartGame => "start_game",
            Command::DropPiece => "drop_piece",
            Command::RestartGame => "restart_game",
        })
    }
}

/// Session wins per player. Only a won round changes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub p1: u32,
    pub p2: u32,
}

impl Score {
    pub fn of(&self, player: Player) -> u32 {
        match player {
            Player::One => self.p1,
            Player::Two => self.p2,
        }
    }

    pub fn record_win(&mut self, player: Player) {
        match player {
            Player::One => self.p1 += 1,
            Player::Two => self.p2 += 1,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.p1, self.p2)
    }
}

/// Owns the board, turn, phase and session score, and notifies listeners.
///
/// Every command commits its whole transition before any listener runs.
/// Hosts that share an engine across threads must serialize access.
pub struct GameEngine {
    config: BoardConfig,
    board: Board,
    phase: GamePhase,
    active_player: Player,
    score: Score,
    round: u32,
    winning_line: Option<Vec<Position>>,
    listeners: Vec<Box<dyn GameListener>>,
}

impl GameEngine {
    /// Create an engine waiting for [`start_game`](Self::start_game).
    pub fn new(config: BoardConfig) -> Result<Self, ConfigError> {
        let board = Board::from_config(&config)?;
        Ok(GameEngine {
            config,
            board,
            phase: GamePhase::AwaitingStart,
            active_player: Player::One,
            score: Score::default(),
            round: 0,
            winning_line: None,
            listeners: Vec::new(),
        })
    }

    /// Register an observer. Listeners are notified in registration order.
    pub fn subscribe(&mut self, listener: impl GameListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// The player to move. After a win this stays the winner until restart.
    pub fn active_player(&self) -> Player {
        self.active_player
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn p1_score(&self) -> u32 {
        self.score.p1
    }

    pub fn p2_score(&self) -> u32 {
        self.score.p2
    }

    /// Rounds started this session (0 before the first start).
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Pieces that formed the winning run of the last round, if it was won.
    pub fn winning_line(&self) -> Option<&[Position]> {
        self.winning_line.as_deref()
    }

    pub fn is_round_over(&self) -> bool {
        matches!(self.phase, GamePhase::RoundOver(_))
    }

    #[instrument(skip(self))]
    pub fn start_game(&mut self) -> Result<(), EngineError> {
        self.require(Command::StartGame, self.phase == GamePhase::AwaitingStart)?;
        self.begin_round();
        info!(round = self.round, "game started");
        self.emit(&[GameEvent::NextPlayer(self.active_player)]);
        Ok(())
    }

    /// Drop the active player's piece into `column`.
    ///
    /// Returns `Ok(None)` when the column is out of range or full; nothing
    /// changes in that case besides the `PieceDropped(None)` notification.
    #[instrument(skip(self))]
    pub fn drop_piece(&mut self, column: usize) -> Result<Option<Piece>, EngineError> {
        self.require(Command::DropPiece, self.phase == GamePhase::InProgress)?;

        let player = self.active_player;
        let piece = match self.board.place(column, player) {
            Ok(piece) => piece,
            Err(err) => {
                debug!(%err, %player, "drop rejected");
                self.emit(&[GameEvent::PieceDropped(None)]);
                return Ok(None);
            }
        };

        let mut events = vec![GameEvent::PieceDropped(Some(piece))];
        // Win is checked before fullness: a winning last piece is never a draw.
        if let Some(line) = win::winning_line(&self.board, piece.position, player) {
            self.score.record_win(player);
            self.phase = GamePhase::RoundOver(Outcome::Win(player));
            self.winning_line = Some(line);
            info!(%player, score = %self.score, "round won");
            events.push(GameEvent::GameWin(player));
        } else if self.board.is_full() {
            self.phase = GamePhase::RoundOver(Outcome::Draw);
            info!(score = %self.score, "round drawn");
            events.push(GameEvent::GameDraw);
        } else {
            self.active_player = player.other();
            events.push(GameEvent::NextPlayer(self.active_player));
        }

        self.emit(&events);
        Ok(Some(piece))
    }

    /// Clear the board and begin a new round with [`Player::One`]. Allowed
    /// after a round ends and mid-round (the round is abandoned). Scores are kept.
    #[instrument(skip(self))]
    pub fn restart_game(&mut self) -> Result<(), EngineError> {
        self.require(Command::RestartGame, self.phase != GamePhase::AwaitingStart)?;
        if self.phase == GamePhase::InProgress {
            debug!(pieces = self.board.piece_count(), "abandoning round in progress");
        }
        self.begin_round();
        info!(round = self.round, score = %self.score, "game restarted");
        self.emit(&[GameEvent::NextPlayer(self.active_player)]);
        Ok(())
    }

    /// Start a new session: clears the board and both scores and returns to
    /// `AwaitingStart`. No notification is emitted.
    #[instrument(skip(self))]
    pub fn reset_session(&mut self) {
        self.board.reset();
        self.phase = GamePhase::AwaitingStart;
        self.active_player = Player::One;
        self.score = Score::default();
        self.round = 0;
        self.winning_line = None;
        info!("session reset");
    }

    fn begin_round(&mut self) {
        self.board.reset();
        self.active_player = Player::One;
        self.phase = GamePhase::InProgress;
        self.winning_line = None;
        self.round += 1;
    }

    fn require(&self, command: Command, allowed: bool) -> Result<(), EngineError> {
        if allowed {
            return Ok(());
        }
        warn!(%command, phase = %self.phase, "command rejected in current phase");
        Err(EngineError::IllegalPhase {
            command,
            phase: self.phase,
        })
    }

    fn emit(&mut self, events: &[GameEvent]) {
        for event in events {
            for listener in &mut self.listeners {
                event.dispatch(listener.as_mut());
            }
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(BoardConfig::default()).expect("default board config is valid")
    }
}

impl fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEngine")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("active_player", &self.active_player)
            .field("score", &self.score)
            .field("round", &self.round)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
