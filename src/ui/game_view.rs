use super::App;
use crate::game::{Board, Cell, GameEngine, GamePhase, Player, Position};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App) {
    let engine = app.engine();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Scores
            Constraint::Min(engine.board().rows() as u16 + 5), // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, engine, chunks[0]);
    render_board(frame, engine, app.selected_column(), chunks[1]);
    render_message(frame, app.message(), chunks[2]);
    render_controls(frame, chunks[3]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::One => Color::Red,
        Player::Two => Color::Yellow,
    }
}

fn render_header(frame: &mut Frame, engine: &GameEngine, area: Rect) {
    let in_turn = |player: Player| {
        let style = Style::default().fg(player_color(player));
        if engine.phase() == GamePhase::InProgress && engine.active_player() == player {
            style.add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            style.add_modifier(Modifier::BOLD)
        }
    };

    let line = Line::from(vec![
        Span::styled(Player::One.name(), in_turn(Player::One)),
        Span::raw(format!("    {}    ", engine.score())),
        Span::styled(Player::Two.name(), in_turn(Player::Two)),
    ]);

    let header = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Connect Four  |  Round {}", engine.round())),
    );

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, engine: &GameEngine, selected_column: usize, area: Rect) {
    let board = engine.board();
    let winning = engine.winning_line().unwrap_or(&[]);
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")];
    for column in 0..board.columns() {
        let label = format!("{:^3}", column + 1);
        if column == selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw("  "));
    lines.push(Line::from(col_line));

    let rule = "═".repeat(board.columns() * 3 + 1);
    lines.push(Line::from(format!("  ╔{rule}╗")));

    // Row 0 is the bottom, so draw from the top row down.
    for row in (0..board.rows()).rev() {
        lines.push(board_row(board, row, winning));
    }

    lines.push(Line::from(format!("  ╚{rule}╝")));

    if engine.phase() == GamePhase::InProgress {
        let mut indicator_line = vec![Span::raw("   ")];
        for column in 0..board.columns() {
            if column == selected_column {
                indicator_line.push(Span::styled(
                    " ▲ ",
                    Style::default().fg(player_color(engine.active_player())),
                ));
            } else {
                indicator_line.push(Span::raw("   "));
            }
        }
        indicator_line.push(Span::raw("  "));
        lines.push(Line::from(indicator_line));
    }

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn board_row(board: &Board, row: usize, winning: &[Position]) -> Line<'static> {
    let mut spans = vec![Span::raw("  ║")];
    for column in 0..board.columns() {
        let span = match board.cell(column, row) {
            Cell::Empty => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
            Cell::Occupied(player) => {
                let mut style = Style::default().fg(player_color(player));
                if winning.contains(&Position::new(column, row)) {
                    style = style.add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK);
                }
                Span::styled(" ● ", style)
            }
        };
        spans.push(span);
    }
    spans.push(Span::raw(" ║"));
    Line::from(spans)
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let msg_widget = Paragraph::new(message.unwrap_or(""))
        .style(Style::default().fg(Color::Green))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new(
        "←/→: Move  |  1-9: Column  |  Enter: Start/Drop  |  R: Restart  |  N: New session  |  Q: Quit",
    )
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
