//! The turn loop tying the board, the solver and the players together

use anyhow::{anyhow, bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use std::io::{BufRead, Write};
use std::time::Instant;

use crate::board::{GameState, KnBoard, Move};
use crate::solver::Solver;

/// Settings for a single game
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Number of rows (k)
    pub rows: usize,
    /// Number of columns (n)
    pub cols: usize,
    /// Whether player one and player two take moves from the input
    pub human_players: (bool, bool),
    /// Search depth for AI moves, `None` searches every remaining cell
    pub depth: Option<usize>,
    /// Show a spinner while the AI is thinking
    pub show_progress: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 3,
            human_players: (false, false),
            depth: None,
            show_progress: true,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            bail!(
                "board must have at least one row and one column, got {}x{}",
                self.rows,
                self.cols
            );
        }
        if self.depth == Some(0) {
            bail!("search depth must be at least 1");
        }
        Ok(())
    }
}

/// Reads a move index typed by a human and decodes it for `board`
///
/// The returned move is not checked against the board.
pub fn parse_move_index(input: &str, board: &KnBoard) -> Result<Move> {
    let index = input
        .trim()
        .parse::<usize>()
        .map_err(|_| anyhow!("Invalid number: {}", input.trim()))?;
    Ok(board.move_from_index(index))
}

fn player_number(player_one: bool) -> u8 {
    if player_one {
        1
    } else {
        2
    }
}

/// Asks the solver for a move, showing a spinner if configured
fn ai_move(config: &GameConfig, board: &mut KnBoard, solver: &mut Solver) -> Option<Move> {
    let progress = if config.show_progress {
        let bar = ProgressBar::new_spinner();
        bar.set_style(ProgressStyle::default_spinner().template("{spinner} {msg} [{elapsed}]"));
        bar.set_message("searching");
        bar.enable_steady_tick(100);
        bar
    } else {
        ProgressBar::hidden()
    };

    let depth = config.depth.unwrap_or_else(|| board.available_moves().len());
    let maximizing = board.player_one_to_move();
    let best = solver.best_move_for(board, depth, maximizing);
    progress.finish_and_clear();
    best
}

/// Plays one game to the end, reading human moves from `input` and writing to `output`
///
/// Returns the final state, which is never [`GameState::Playing`].
pub fn run<R: BufRead, W: Write>(config: &GameConfig, mut input: R, mut output: W) -> Result<GameState> {
    config.validate()?;
    let mut board = KnBoard::new(config.rows, config.cols)?;
    let mut solver = Solver::new();
    let start = Instant::now();

    writeln!(output, "Welcome to the {}x{} adjacency game\n", config.rows, config.cols)?;

    // game loop
    loop {
        board.display(&mut output)?;

        match board.state() {
            GameState::Playing => {
                let player_one = board.player_one_to_move();
                let human = if player_one {
                    config.human_players.0
                } else {
                    config.human_players.1
                };

                let (row, col) = if human {
                    write!(output, "Move input > ")?;
                    output.flush()?;
                    let mut input_str = String::new();
                    if input.read_line(&mut input_str)? == 0 {
                        bail!("input closed before the game finished");
                    }
                    match parse_move_index(&input_str, &board) {
                        Ok(next) => next,
                        Err(err) => {
                            writeln!(output, "{}", err)?;
                            continue;
                        }
                    }
                } else {
                    writeln!(output, "Player {} thinking...", player_number(player_one))?;
                    output.flush()?;
                    let before = solver.node_count;
                    let next = ai_move(config, &mut board, &mut solver)
                        .ok_or_else(|| anyhow!("no moves available on a running game"))?;
                    info!(
                        player = player_number(player_one),
                        nodes = solver.node_count - before,
                        "search finished"
                    );
                    next
                };

                if let Err(err) = board.apply_move(row, col) {
                    writeln!(output, "{}", err)?;
                    // try the move again
                    continue;
                }
                info!(player = player_number(player_one), row, col, "move played");
                writeln!(output, "Move: ({}, {})", row, col)?;
            }

            // end states, a full board always has a winner
            state => {
                let winner = if state == GameState::PlayerOneWin { 1 } else { 2 };
                writeln!(output, "Player {} wins!", winner)?;
                writeln!(output, "Time elapsed: {:.3}s", start.elapsed().as_secs_f64())?;
                info!(winner, plies = board.plies(), "game over");
                return Ok(state);
            }
        }
    }
}
