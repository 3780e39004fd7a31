//! The k×n grid, move application and terminal detection

use anyhow::{Context, Result};
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::fmt;
use std::io::Write;
use std::ops::{Deref, DerefMut};

use crate::error::BoardError;

/// A cell position as `(row, column)`
pub type Move = (usize, usize);

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The numeric mark of the cell: +1 for player one, -1 for player two
    pub fn value(&self) -> i32 {
        match self {
            Cell::PlayerOne => 1,
            Cell::PlayerTwo => -1,
            Cell::Empty => 0,
        }
    }

    // the mark placed on the given ply
    fn for_ply(plies: usize) -> Self {
        if plies % 2 == 0 {
            Cell::PlayerOne
        } else {
            Cell::PlayerTwo
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    PlayerOneWin,
    PlayerTwoWin,
}

/// A k×n board where forming an adjacent pair of your own marks loses
///
/// # Notes
/// Cells are stored row-major. The board keeps no move history: search
/// backtracks with [`retract_move`](KnBoard::retract_move) in exact reverse
/// order of application, or through a [`ScopedMove`] guard.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct KnBoard {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    plies: usize,
}

impl KnBoard {
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
            plies: 0,
        })
    }

    /// Builds a board by playing a sequence of move indices (`row * cols + col`)
    pub fn from_moves(rows: usize, cols: usize, moves: &[usize]) -> Result<Self> {
        let mut board = Self::new(rows, cols)?;
        for (ply, &index) in moves.iter().enumerate() {
            let (row, col) = board.move_from_index(index);
            board
                .apply_move(row, col)
                .with_context(|| format!("could not play move {} at ply {}", index, ply))?;
        }
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn plies(&self) -> usize {
        self.plies
    }

    pub fn player_one_to_move(&self) -> bool {
        self.plies % 2 == 0
    }

    /// The cell at `(row, col)`, or `None` if out of range
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Decodes a flat move index into `(index / cols, index % cols)`
    ///
    /// The result is not range checked, [`apply_move`](KnBoard::apply_move) rejects it if needed.
    pub fn move_from_index(&self, index: usize) -> Move {
        (index / self.cols, index % self.cols)
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = Cell::Empty);
        self.plies = 0;
    }

    pub fn apply_move(&mut self, row: usize, col: usize) -> Result<(), BoardError> {
        match self.cell(row, col) {
            None => Err(BoardError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            }),
            Some(cell) if !cell.is_empty() => Err(BoardError::Occupied { row, col }),
            Some(_) => {
                self.place(row, col);
                Ok(())
            }
        }
    }

    // assumes the cell is in range and empty
    fn place(&mut self, row: usize, col: usize) {
        debug_assert!(self.cell(row, col) == Some(Cell::Empty));
        self.cells[row * self.cols + col] = Cell::for_ply(self.plies);
        self.plies += 1;
    }

    /// Undoes the most recently applied move
    ///
    /// The caller must pass the cell of the last applied move. This is only
    /// checked in debug builds; anything else breaks the count invariant.
    pub fn retract_move(&mut self, row: usize, col: usize) {
        debug_assert!(row < self.rows && col < self.cols, "retracting out of range");
        debug_assert!(self.plies > 0, "retracting on an empty board");
        debug_assert_eq!(
            self.cells[row * self.cols + col],
            Cell::for_ply(self.plies.wrapping_sub(1)),
            "retracted cell was not the last move"
        );
        self.cells[row * self.cols + col] = Cell::Empty;
        self.plies -= 1;
    }

    /// Applies a checked move and returns a guard that retracts it when dropped
    pub fn scoped_move(&mut self, row: usize, col: usize) -> Result<ScopedMove<'_>, BoardError> {
        self.apply_move(row, col)?;
        Ok(ScopedMove {
            board: self,
            row,
            col,
        })
    }

    /// Every empty cell, in row-major order
    pub fn available_moves(&self) -> Vec<Move> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(idx, _)| (idx / self.cols, idx % self.cols))
            .collect()
    }

    pub fn filled_cells(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn is_full(&self) -> bool {
        self.filled_cells() == self.rows * self.cols
    }

    /// Returns 1 if player one has won, -1 if player two has won, 0 otherwise
    ///
    /// A player whose mark sits next to the same mark (right or below) loses.
    /// The first such cell in row-major order decides. A full board with no
    /// pair goes to player one when the cell count is odd, else player two.
    pub fn game_winner(&self) -> i32 {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = self.cells[row * self.cols + col];
                if cell.is_empty() {
                    continue;
                }
                let right = self.cell(row, col + 1);
                let below = self.cell(row + 1, col);
                if right == Some(cell) || below == Some(cell) {
                    return -cell.value();
                }
            }
        }

        if self.is_full() {
            if (self.rows * self.cols) % 2 == 1 {
                1
            } else {
                -1
            }
        } else {
            0
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.game_winner() != 0 || self.is_full()
    }

    pub fn state(&self) -> GameState {
        match self.game_winner() {
            1 => GameState::PlayerOneWin,
            -1 => GameState::PlayerTwoWin,
            _ => GameState::Playing,
        }
    }

    /// Draws the grid with coloured marks, column headers carry move indices
    pub fn display<W: Write>(&self, out: &mut W) -> Result<()> {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = self.cells[row * self.cols + col];
                out.queue(PrintStyledContent(
                    style(match cell {
                        Cell::PlayerOne => "X",
                        Cell::PlayerTwo => "O",
                        Cell::Empty => ".",
                    })
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(match cell {
                        Cell::PlayerOne => Color::Red,
                        Cell::PlayerTwo => Color::Yellow,
                        Cell::Empty => Color::Grey,
                    }),
                ))?;
            }
            out.queue(PrintStyledContent(style(format!(
                "  {}..{}\n",
                row * self.cols,
                (row + 1) * self.cols - 1
            ))))?;
        }
        out.flush()?;
        Ok(())
    }
}

impl fmt::Display for KnBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            let line: String = row
                .iter()
                .map(|cell| match cell {
                    Cell::PlayerOne => 'X',
                    Cell::PlayerTwo => 'O',
                    Cell::Empty => '.',
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// A move applied to a borrowed board, retracted again when dropped
///
/// Dereferences to the board so the position after the move can be searched.
pub struct ScopedMove<'a> {
    board: &'a mut KnBoard,
    row: usize,
    col: usize,
}

impl<'a> ScopedMove<'a> {
    /// Applies a move known to be legal, such as one from `available_moves()`
    pub(crate) fn new(board: &'a mut KnBoard, (row, col): Move) -> Self {
        board.place(row, col);
        Self { board, row, col }
    }
}

impl Deref for ScopedMove<'_> {
    type Target = KnBoard;

    fn deref(&self) -> &Self::Target {
        self.board
    }
}

impl DerefMut for ScopedMove<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.board
    }
}

impl Drop for ScopedMove<'_> {
    fn drop(&mut self) {
        self.board.retract_move(self.row, self.col);
    }
}
