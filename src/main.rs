//! Gridrace: command-line front end for the race game engine.
//!
//! ## Usage
//!
//! - `gridrace` - Show a demo
//! - `gridrace bestmove --board FILE` - Print the engine's move for a board
//! - `gridrace selfplay` - Let the engine play both sides

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use gridrace::board::Board;
use gridrace::constants::SELFPLAY_TURNS;
use gridrace::game::{Game, GameStatus, Side};
use gridrace::search::{Engine, SearchParams};

/// Gridrace: best-first move search for a two-sided race game
#[derive(Parser)]
#[command(name = "gridrace")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed for the random fallback move
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a board and print the move the engine would play
    Bestmove {
        /// Board file, one row per line (`#` obstacle, `.` empty, `A`, `B`). Reads stdin if omitted
        #[arg(long)]
        board: Option<PathBuf>,
        /// Side to move
        #[arg(long, value_enum, default_value_t = SideArg::B)]
        side: SideArg,
        /// Goal row of the side to move (defaults to the side's opposing baseline)
        #[arg(long)]
        goal_row: Option<usize>,
        /// Also print search counters
        #[arg(long)]
        stats: bool,
    },
    /// Let the engine play both sides from the standard opening
    Selfplay {
        /// Maximum number of moves
        #[arg(long, default_value_t = SELFPLAY_TURNS)]
        turns: usize,
    },
    /// Show the standard opening and the engine's replies
    Demo,
}

#[derive(Copy, Clone, ValueEnum)]
enum SideArg {
    A,
    B,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::A => Side::A,
            SideArg::B => Side::B,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut engine = match cli.seed {
        Some(seed) => Engine::with_seed(seed),
        None => Engine::new(),
    };

    match cli.command {
        Some(Commands::Bestmove {
            board,
            side,
            goal_row,
            stats,
        }) => run_bestmove(&mut engine, board, side.into(), goal_row, stats),
        Some(Commands::Selfplay { turns }) => {
            run_selfplay(&mut engine, turns);
            Ok(())
        }
        Some(Commands::Demo) | None => {
            run_demo(&mut engine);
            Ok(())
        }
    }
}

fn read_board(path: Option<PathBuf>) -> Result<Board> {
    let text = match path {
        Some(path) => fs::read_to_string(&path)
            .with_context(|| format!("failed to read board from {}", path.display()))?,
        None => io::read_to_string(io::stdin()).context("failed to read board from stdin")?,
    };
    text.parse::<Board>().context("invalid board")
}

fn run_bestmove(
    engine: &mut Engine,
    path: Option<PathBuf>,
    side: Side,
    goal_row: Option<usize>,
    stats: bool,
) -> Result<()> {
    let board = read_board(path)?;
    let goal_row = goal_row.unwrap_or_else(|| side.goal_row(board.rows()));
    if goal_row >= board.rows() {
        anyhow::bail!("goal row {goal_row} is outside a {}-row board", board.rows());
    }

    let result = engine.search(&board, &SearchParams::new(side.marker(), goal_row));
    match result.best_move() {
        Some(mv) => println!("{mv}"),
        None => println!("none"),
    }
    if stats {
        println!(
            "outcome={:?} expanded={} generated={} revisits={}",
            result.outcome, result.expanded, result.generated, result.revisits
        );
    }
    Ok(())
}

fn run_selfplay(engine: &mut Engine, turns: usize) {
    let mut game = Game::new();
    let mut side = Side::A;
    println!("{}", game.board());

    for turn in 1..=turns {
        match game.status(side) {
            GameStatus::InProgress => {}
            GameStatus::Won(winner) => {
                println!("Side {winner} wins");
                return;
            }
            GameStatus::Blocked(stuck) => {
                println!("Draw: side {stuck} is blocked");
                return;
            }
        }
        match game.engine_turn(engine, side) {
            Some(mv) => println!("{turn}. {side}: {mv}\n{}", game.board()),
            None => {
                println!("Draw: side {side} is blocked");
                return;
            }
        }
        side = side.opponent();
    }
    println!("Stopped after {turns} moves");
}

fn run_demo(engine: &mut Engine) {
    println!("Gridrace: best-first race game engine\n");

    let mut game = Game::new();
    println!("=== Standard opening ===");
    println!("{}", game.board());

    for side in [Side::A, Side::B] {
        let (played, result) = game.engine_turn_with_stats(engine, side);
        let Some(mv) = played else {
            println!("Side {side} is blocked");
            return;
        };
        println!(
            "Side {side} plays {mv} ({} boards searched, {} children)",
            result.expanded, result.generated
        );
    }

    println!("\n=== After one move each ===");
    println!("{}", game.board());
}
