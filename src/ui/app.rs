use crate::game::{GameEngine, GameEvent, GamePhase, Piece};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::sync::mpsc::{self, Receiver};
use tracing::warn;

pub struct App {
    engine: GameEngine,
    events: Receiver<GameEvent>,
    selected_column: usize,
    last_piece: Option<Piece>,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(mut engine: GameEngine) -> Self {
        let (tx, rx) = mpsc::channel();
        engine.subscribe(tx);
        let selected_column = engine.board().columns() / 2;
        App {
            engine,
            events: rx,
            selected_column,
            last_piece: None,
            should_quit: false,
            message: Some("Press Enter to start game!".to_string()),
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn last_piece(&self) -> Option<Piece> {
        self.last_piece
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal.draw(|f| self.render(f)).map_err(Into::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.engine.board().columns() {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                let column = c as usize - '1' as usize;
                if column < self.engine.board().columns() {
                    self.selected_column = column;
                    self.primary_action();
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.primary_action(),
            KeyCode::Char('r') => self.restart(),
            KeyCode::Char('n') => {
                self.engine.reset_session();
                self.last_piece = None;
                self.message = Some("New session. Press Enter to start game!".to_string());
            }
            _ => {}
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Enter starts, drops or restarts depending on the phase.
    fn primary_action(&mut self) {
        match self.engine.phase() {
            GamePhase::AwaitingStart => {
                if let Err(err) = self.engine.start_game() {
                    warn!(%err, "start failed");
                }
            }
            GamePhase::InProgress => {
                if let Err(err) = self.engine.drop_piece(self.selected_column) {
                    warn!(%err, "drop failed");
                }
            }
            GamePhase::RoundOver(_) => self.restart(),
        }
        self.drain_events();
    }

    fn restart(&mut self) {
        match self.engine.restart_game() {
            Ok(()) => self.last_piece = None,
            Err(_) => self.message = Some("Press Enter to start game!".to_string()),
        }
        self.drain_events();
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::NextPlayer(player) => {
                self.message = Some(format!("{}'s turn", player.name()));
            }
            GameEvent::PieceDropped(Some(piece)) => {
                self.last_piece = Some(piece);
            }
            GameEvent::PieceDropped(None) => {
                self.message = Some(format!(
                    "Can't drop in column {}! {}, try again.",
                    self.selected_column + 1,
                    self.engine.active_player().name()
                ));
            }
            GameEvent::GameWin(player) => {
                self.message = Some(format!("{} Wins! Press Enter to restart.", player.name()));
            }
            GameEvent::GameDraw => {
                self.message = Some("It's a Draw! Press Enter to restart.".to_string());
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, self);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(GameEngine::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Outcome, Player, Position};
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_enter_starts_game() {
        let mut app = App::default();
        assert_eq!(app.engine().phase(), GamePhase::AwaitingStart);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.engine().phase(), GamePhase::InProgress);
        assert_eq!(app.message(), Some("Player #1's turn"));
    }

    #[test]
    fn test_digit_drops_into_column() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.selected_column(), 2);
        let piece = app.last_piece().unwrap();
        assert_eq!(piece.position, Position::new(2, 0));
        assert_eq!(piece.player, Player::One);
        assert_eq!(app.message(), Some("Player #2's turn"));
    }

    #[test]
    fn test_digit_beyond_board_is_ignored() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.engine().board().piece_count(), 0);
    }

    #[test]
    fn test_selector_stays_on_board() {
        let mut app = App::default();
        for _ in 0..20 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.selected_column(), 7);
        for _ in 0..20 {
            press(&mut app, KeyCode::Left);
        }
        assert_eq!(app.selected_column(), 0);
    }

    #[test]
    fn test_full_column_message() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        for _ in 0..7 {
            press(&mut app, KeyCode::Char('1'));
        }
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(
            app.message(),
            Some("Can't drop in column 1! Player #2, try again.")
        );
    }

    #[test]
    fn test_win_then_enter_restarts() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        for key in ['1', '2', '1', '2', '1', '2', '1'] {
            press(&mut app, KeyCode::Char(key));
        }
        assert_eq!(
            app.engine().phase(),
            GamePhase::RoundOver(Outcome::Win(Player::One))
        );
        assert_eq!(app.message(), Some("Player #1 Wins! Press Enter to restart."));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.engine().phase(), GamePhase::InProgress);
        assert_eq!(app.engine().p1_score(), 1);
        assert_eq!(app.last_piece(), None);
    }

    #[test]
    fn test_new_session_resets_scores() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        for key in ['1', '2', '1', '2', '1', '2', '1'] {
            press(&mut app, KeyCode::Char(key));
        }
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.engine().phase(), GamePhase::AwaitingStart);
        assert_eq!(app.engine().p1_score(), 0);
    }

    #[test]
    fn test_quit() {
        let mut app = App::default();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }
}
