/// Errors raised by board construction and move application
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid board dimensions {rows}x{cols}, both must be at least 1")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("Invalid move, cell ({row}, {col}) out of range for a {rows}x{cols} board")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Invalid move, cell ({row}, {col}) already taken")]
    Occupied { row: usize, col: usize },
}
