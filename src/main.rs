use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::io::{stdin, stdout};

use kn_adjacency::{game, GameConfig};

/// Play the k×n adjacency game against the computer, or watch it play itself
#[derive(Parser, Debug)]
#[command(name = "kn-adjacency", version)]
struct Args {
    /// Number of rows (k)
    #[arg(long, short = 'k', default_value_t = 5)]
    rows: usize,

    /// Number of columns (n)
    #[arg(long, short = 'n', default_value_t = 3)]
    cols: usize,

    /// Player one enters moves by cell index
    #[arg(long)]
    human_one: bool,

    /// Player two enters moves by cell index
    #[arg(long)]
    human_two: bool,

    /// Limit the search depth, defaults to the number of empty cells
    #[arg(long, short = 'd')]
    depth: Option<usize>,

    /// Hide the spinner while the AI is thinking
    #[arg(long)]
    no_progress: bool,
}

impl From<Args> for GameConfig {
    fn from(args: Args) -> Self {
        Self {
            rows: args.rows,
            cols: args.cols,
            human_players: (args.human_one, args.human_two),
            depth: args.depth,
            show_progress: !args.no_progress,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = GameConfig::from(Args::parse());
    let stdin = stdin();
    game::run(&config, stdin.lock(), stdout())?;
    Ok(())
}
