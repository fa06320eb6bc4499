//! Four-in-a-row detection around the most recently placed piece.

use super::{Board, Cell, Player, Position};

/// Length of the run that wins a round.
pub const WIN_LENGTH: usize = 4;

/// Horizontal, vertical, diagonal up-right and diagonal down-right.
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Check if the piece at `position` completes a run of [`WIN_LENGTH`] for `player`.
pub fn check_win(board: &Board, position: Position, player: Player) -> bool {
    winning_line(board, position, player).is_some()
}

/// The contiguous run through `position` that wins for `player`, ordered along
/// its direction. Only lines through `position` are examined.
pub fn winning_line(board: &Board, position: Position, player: Player) -> Option<Vec<Position>> {
    if board.get(position) != Cell::Occupied(player) {
        return None;
    }

    DIRECTIONS.iter().find_map(|&(dc, dr)| {
        let behind = run_length(board, position, player, -dc, -dr);
        let ahead = run_length(board, position, player, dc, dr);
        if behind + 1 + ahead < WIN_LENGTH {
            return None;
        }
        let line = (-(behind as isize)..=ahead as isize)
            .map(|step| {
                Position::new(
                    (position.column as isize + step * dc) as usize,
                    (position.row as isize + step * dr) as usize,
                )
            })
            .collect();
        Some(line)
    })
}

/// Count same-player cells from `position` (exclusive) in one direction.
fn run_length(board: &Board, position: Position, player: Player, dc: isize, dr: isize) -> usize {
    let mut count = 0;
    let mut column = position.column as isize + dc;
    let mut row = position.row as isize + dr;
    while column >= 0
        && row >= 0
        && (column as usize) < board.columns()
        && (row as usize) < board.rows()
        && board.cell(column as usize, row as usize) == Cell::Occupied(player)
    {
        count += 1;
        column += dc;
        row += dr;
    }
    count
}
