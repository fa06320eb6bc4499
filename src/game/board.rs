use super::Player;
use crate::config::BoardConfig;
use crate::error::ConfigError;

/// Contents of a single board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(Player),
}

impl Cell {
    /// The player occupying this cell, if any.
    pub fn occupant(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }
}

/// A board coordinate. Row 0 is the bottom (landing) row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub column: usize,
    pub row: usize,
}

impl Position {
    pub fn new(column: usize, row: usize) -> Self {
        Position { column, row }
    }
}

/// A placed game piece. Lives until the round is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub player: Player,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is out of range (board has {columns} columns)")]
    InvalidColumn { column: usize, columns: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),
}

/// Fixed-size grid with per-column fill heights.
///
/// Invariant: `(c, r)` is occupied iff `r < heights[c]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: usize,
    rows: usize,
    cells: Vec<Cell>,
    heights: Vec<usize>,
}

impl Board {
    /// Create a new empty board. Dimensions outside `[1, MAX_DIMENSION]` are rejected.
    pub fn new(columns: usize, rows: usize) -> Result<Self, ConfigError> {
        BoardConfig { columns, rows }.validate()?;
        Ok(Board {
            columns,
            rows,
            cells: vec![Cell::Empty; columns * rows],
            heights: vec![0; columns],
        })
    }

    /// Create an empty board from a configuration.
    pub fn from_config(config: &BoardConfig) -> Result<Self, ConfigError> {
        Self::new(config.columns, config.rows)
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn index(&self, column: usize, row: usize) -> usize {
        column * self.rows + row
    }

    /// Get the cell at a column and row. Out-of-range positions read as empty.
    pub fn cell(&self, column: usize, row: usize) -> Cell {
        if column >= self.columns || row >= self.rows {
            return Cell::Empty;
        }
        self.cells[self.index(column, row)]
    }

    pub fn get(&self, position: Position) -> Cell {
        self.cell(position.column, position.row)
    }

    /// Number of pieces stacked in a column (0 for out-of-range columns).
    pub fn height(&self, column: usize) -> usize {
        self.heights.get(column).copied().unwrap_or(0)
    }

    pub fn piece_count(&self) -> usize {
        self.heights.iter().sum()
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, column: usize) -> bool {
        column >= self.columns || self.heights[column] == self.rows
    }

    /// Columns that can still accept a piece.
    pub fn open_columns(&self) -> Vec<usize> {
        (0..self.columns)
            .filter(|&column| !self.is_column_full(column))
            .collect()
    }

    /// Where a piece dropped into `column` would land. Does not mutate.
    pub fn drop_candidate(&self, column: usize) -> Result<Position, MoveError> {
        if column >= self.columns {
            return Err(MoveError::InvalidColumn {
                column,
                columns: self.columns,
            });
        }
        let row = self.heights[column];
        if row >= self.rows {
            return Err(MoveError::ColumnFull(column));
        }
        Ok(Position::new(column, row))
    }

    /// Drop a piece into a column. On error the board is untouched.
    pub fn place(&mut self, column: usize, player: Player) -> Result<Piece, MoveError> {
        let position = self.drop_candidate(column)?;
        let index = self.index(position.column, position.row);
        self.cells[index] = Cell::Occupied(player);
        self.heights[column] += 1;
        Ok(Piece { player, position })
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.heights.iter().all(|&h| h == self.rows)
    }

    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
        self.heights.fill(0);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::from_config(&BoardConfig::default()).expect("default board config is valid")
    }
}
