//! A fixed-size grid of cells with bottom-gravity drops
//!
//! Columns and rows are addressed from 1, with row 1 at the bottom of the
//! board, so `(1, 1)` is the bottom left cell.

use std::fmt;

use crate::{error::GameError, CONNECT};

/// The mark a player leaves on the board
///
/// Tokens are displayed as their glyph, and must be unique within a game.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token(char);

impl Token {
    pub const RED: Token = Token('R');
    pub const YELLOW: Token = Token('Y');

    pub const fn new(glyph: char) -> Self {
        Self(glyph)
    }

    pub fn glyph(self) -> char {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    Empty,
    Owned(Token),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn token(&self) -> Option<Token> {
        match self {
            Cell::Owned(token) => Some(*token),
            Cell::Empty => None,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

/// The four line orientations a window can take, in scan order
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// bottom left to top right
    DiagonalUp,
    /// top left to bottom right
    DiagonalDown,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalUp,
        Direction::DiagonalDown,
    ];

    /// column and row step between consecutive cells of a window
    pub fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (1, 0),
            Direction::Vertical => (0, 1),
            Direction::DiagonalUp => (1, 1),
            Direction::DiagonalDown => (1, -1),
        }
    }
}

/// A run of exactly [`CONNECT`] consecutive cells
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Window {
    pub direction: Direction,
    /// 1-based (column, row) of the first cell
    pub start: (usize, usize),
    pub cells: [Cell; CONNECT],
}

impl Window {
    /// Returns the token filling the whole window, if there is one
    pub fn uniform_token(&self) -> Option<Token> {
        let first = self.cells[0].token()?;
        if self.cells.iter().all(|cell| *cell == Cell::Owned(first)) {
            Some(first)
        } else {
            None
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>, // cells are stored left-to-right, bottom-to-top
}

impl Board {
    /// Creates an empty board, rejecting anything smaller than [`CONNECT`] in either dimension
    pub fn new(width: usize, height: usize) -> Result<Self, GameError> {
        if width < CONNECT || height < CONNECT {
            return Err(GameError::InvalidDimensions {
                width,
                height,
                min: CONNECT,
            });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, column: usize, row: usize) -> Result<usize, GameError> {
        if column < 1 || column > self.width || row < 1 || row > self.height {
            return Err(GameError::OutOfBounds { column, row });
        }
        Ok((column - 1) + self.width * (row - 1))
    }

    pub fn get(&self, column: usize, row: usize) -> Result<Cell, GameError> {
        Ok(self.cells[self.index(column, row)?])
    }

    /// Overwrites a single cell
    ///
    /// This does not enforce gravity, it is meant for building positions
    /// directly. Use [`Board::drop_token`] for regular play.
    pub fn set(&mut self, column: usize, row: usize, value: Cell) -> Result<(), GameError> {
        let index = self.index(column, row)?;
        self.cells[index] = value;
        Ok(())
    }

    pub fn check_column(&self, column: usize) -> Result<(), GameError> {
        if column < 1 || column > self.width {
            return Err(GameError::ColumnOutOfRange {
                column,
                width: self.width,
            });
        }
        Ok(())
    }

    /// Returns the lowest empty row of a column, or `None` if the column is full
    pub fn lowest_empty_row(&self, column: usize) -> Result<Option<usize>, GameError> {
        self.check_column(column)?;
        for row in 1..=self.height {
            if self.cells[(column - 1) + self.width * (row - 1)].is_empty() {
                return Ok(Some(row));
            }
        }
        Ok(None)
    }

    /// The number of occupied cells at the bottom of a column
    pub fn column_height(&self, column: usize) -> Result<usize, GameError> {
        Ok(self
            .lowest_empty_row(column)?
            .map_or(self.height, |row| row - 1))
    }

    /// Places a token at the lowest empty row of a column, returning that row
    pub fn drop_token(&mut self, column: usize, token: Token) -> Result<usize, GameError> {
        let row = self
            .lowest_empty_row(column)?
            .ok_or(GameError::ColumnFull(column))?;
        self.set(column, row, Cell::Owned(token))?;
        Ok(row)
    }

    /// Checks whether no column can accept another token
    pub fn is_full(&self) -> bool {
        // boards built with `set` may have gaps below the top row
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Iterates over every window of [`CONNECT`] cells on the board
    ///
    /// Windows come horizontal first (row by row), then vertical (column by
    /// column), then up and down diagonals (row by row). The sequence is
    /// computed lazily on every call.
    pub fn windows(&self) -> Windows<'_> {
        Windows {
            board: self,
            direction: 0,
            index: 0,
        }
    }

    /// Number of windows starting positions along each axis for a direction
    fn window_span(&self, direction: Direction) -> (usize, usize) {
        let reach = CONNECT - 1;
        match direction {
            Direction::Horizontal => (self.width - reach, self.height),
            Direction::Vertical => (self.width, self.height - reach),
            Direction::DiagonalUp | Direction::DiagonalDown => {
                (self.width - reach, self.height - reach)
            }
        }
    }

    fn window_at(&self, direction: Direction, start: (usize, usize)) -> Window {
        let (dx, dy) = direction.step();
        let mut cells = [Cell::Empty; CONNECT];
        for (i, cell) in cells.iter_mut().enumerate() {
            let column = (start.0 as isize + dx * i as isize) as usize;
            let row = (start.1 as isize + dy * i as isize) as usize;
            *cell = self.cells[(column - 1) + self.width * (row - 1)];
        }
        Window {
            direction,
            start,
            cells,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (1..=self.height).rev() {
            write!(f, "|")?;
            for column in 1..=self.width {
                let glyph = match self.cells[(column - 1) + self.width * (row - 1)] {
                    Cell::Owned(token) => token.glyph(),
                    Cell::Empty => ' ',
                };
                write!(f, "{}|", glyph)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "+{}", "-+".repeat(self.width))?;
        // column labels only stay aligned up to 9 columns
        let labels: String = (1..=self.width)
            .map(|column| format!(" {}", column % 10))
            .collect();
        writeln!(f, "{}", labels)
    }
}

/// Lazy iterator over the windows of a [`Board`], see [`Board::windows`]
pub struct Windows<'a> {
    board: &'a Board,
    direction: usize,
    index: usize,
}

impl<'a> Iterator for Windows<'a> {
    type Item = Window;

    fn next(&mut self) -> Option<Self::Item> {
        while self.direction < Direction::ALL.len() {
            let direction = Direction::ALL[self.direction];
            let (columns, rows) = self.board.window_span(direction);

            if self.index < columns * rows {
                let (major, minor) = (self.index / columns, self.index % columns);
                let start = match direction {
                    Direction::Horizontal | Direction::DiagonalUp => (minor + 1, major + 1),
                    // column by column, bottom to top
                    Direction::Vertical => (self.index / rows + 1, self.index % rows + 1),
                    // descending diagonals start at least CONNECT rows up
                    Direction::DiagonalDown => (minor + 1, major + CONNECT),
                };
                self.index += 1;
                return Some(self.board.window_at(direction, start));
            }

            self.direction += 1;
            self.index = 0;
        }
        None
    }
}
