mod broadcast;
mod display;
mod driver;

use anyhow::{Context, Result};
use arena_agents::minimax::DEFAULT_DEPTH;
use arena_agents::{Agent, Evaluator, Fallback, HeuristicEvaluator, RandomAgent, SearchAgent};
use arena_core::{color_name, perft, perft_divide, positions, BoardModel, GameBoard, Outcome, Uci};
use broadcast::Broadcaster;
use clap::{Parser, Subcommand, ValueEnum};
use display::{render_board, render_game};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arena", version, about = "Chess agents playing each other")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play one game between two agents
    Play {
        #[arg(long, value_enum, default_value_t = AgentKind::Search)]
        white: AgentKind,

        #[arg(long, value_enum, default_value_t = AgentKind::Random)]
        black: AgentKind,

        /// Search depth in plies
        #[arg(long, default_value_t = DEFAULT_DEPTH)]
        depth: u8,

        /// Seed for both agents; Black uses seed + 1
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, value_enum, default_value_t = FallbackArg::Random)]
        fallback: FallbackArg,

        /// Starting position
        #[arg(long)]
        fen: Option<String>,

        /// Stream moves to a renderer listening at ADDR
        #[arg(
            long,
            value_name = "ADDR",
            num_args = 0..=1,
            default_missing_value = "127.0.0.1:3000"
        )]
        render: Option<String>,

        /// Only print the result
        #[arg(long)]
        quiet: bool,
    },
    /// Evaluate a position
    Eval { fen: Option<String> },
    /// Search a position and report the best move
    Search {
        #[arg(long, default_value_t = DEFAULT_DEPTH)]
        depth: u8,

        #[arg(long, value_enum, default_value_t = FallbackArg::Random)]
        fallback: FallbackArg,

        #[arg(long)]
        seed: Option<u64>,

        fen: Option<String>,
    },
    /// Count leaf nodes of the move tree
    Perft { depth: u8, fen: Option<String> },
}

#[derive(Clone, Copy, ValueEnum)]
enum AgentKind {
    Random,
    Search,
}

#[derive(Clone, Copy, ValueEnum)]
enum FallbackArg {
    Random,
    First,
}

impl From<FallbackArg> for Fallback {
    fn from(arg: FallbackArg) -> Self {
        match arg {
            FallbackArg::Random => Fallback::Random,
            FallbackArg::First => Fallback::FirstLegal,
        }
    }
}

fn load_board(fen: Option<&str>) -> Result<GameBoard> {
    match fen {
        Some(fen) => {
            GameBoard::from_fen(fen).with_context(|| format!("cannot load position {fen}"))
        }
        None => Ok(GameBoard::new()),
    }
}

fn build_agent(
    kind: AgentKind,
    depth: u8,
    fallback: Fallback,
    seed: Option<u64>,
) -> Box<dyn Agent<GameBoard>> {
    match (kind, seed) {
        (AgentKind::Random, Some(seed)) => Box::new(RandomAgent::with_seed(seed)),
        (AgentKind::Random, None) => Box::new(RandomAgent::new()),
        (AgentKind::Search, seed) => {
            let agent = SearchAgent::new(depth).with_fallback(fallback);
            match seed {
                Some(seed) => Box::new(agent.with_seed(seed)),
                None => Box::new(agent),
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_play(
    white: AgentKind,
    black: AgentKind,
    depth: u8,
    seed: Option<u64>,
    fallback: FallbackArg,
    fen: Option<String>,
    render: Option<String>,
    quiet: bool,
) -> Result<()> {
    let mut board = load_board(fen.as_deref())?;
    let fallback = Fallback::from(fallback);
    let mut white = build_agent(white, depth, fallback, seed);
    let mut black = build_agent(black, depth, fallback, seed.map(|s| s.wrapping_add(1)));

    let broadcaster = match render {
        Some(addr) => Some(
            Broadcaster::connect(addr.as_str())
                .with_context(|| format!("cannot reach renderer at {addr}"))?,
        ),
        None => None,
    };

    if !quiet {
        println!("{} (White) vs {} (Black)", white.name(), black.name());
        print!("{}", render_game(&board));
    }

    let start = Instant::now();
    let result = driver::play(white.as_mut(), black.as_mut(), &mut board, |board, mv| {
        if let Some(broadcaster) = &broadcaster {
            broadcaster.publish(mv);
        }
        if !quiet {
            println!(
                "\nPly {}: {} plays {}",
                board.ply(),
                color_name(!board.turn()),
                Uci::from_standard(*mv)
            );
            print!("{}", render_game(board));
        }
    });

    if let Some(broadcaster) = broadcaster {
        let sent = broadcaster.finish();
        info!(sent, "renderer stream closed");
    }

    let outcome: Outcome = result?;
    println!("\n{}", driver::verdict(&outcome));
    println!(
        "Result: {} after {} plies ({:.2}s)",
        outcome.status,
        board.ply(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn run_eval(fen: Option<String>) -> Result<()> {
    let board = load_board(fen.as_deref())?;
    let eval = HeuristicEvaluator::default();

    print!("{}", render_game(&board));
    println!("Status: {}", board.status());
    println!("Material:   {:+.2}", eval.material(&board));
    println!("Positional: {:+.2}", eval.positional(&board));
    println!("Mobility:   {:+.2}", eval.mobility(&board));
    println!("Check:      {:+.2}", eval.check(&board));
    println!("Evaluation: {:+.2} (+ = White, - = Black)", eval.evaluate(&board));
    Ok(())
}

fn run_search(
    depth: u8,
    fallback: FallbackArg,
    seed: Option<u64>,
    fen: Option<String>,
) -> Result<()> {
    let mut board = load_board(fen.as_deref())?;
    let mut agent = SearchAgent::new(depth).with_fallback(fallback.into());
    if let Some(seed) = seed {
        agent = agent.with_seed(seed);
    }

    print!("{}", render_board(&board));
    println!("Searching to depth {}...", depth);

    let start = Instant::now();
    let report = agent.search(&mut board);
    let elapsed = start.elapsed();

    match report.best_move {
        Some(mv) => {
            println!("\nBest move: {}", Uci::from_standard(mv));
            println!("Score: {:+.2}", report.score);
            println!("Depth: {}", report.depth);
            println!("Nodes: {}", report.nodes);
            println!("Time: {:.2}s", elapsed.as_secs_f64());
            println!("NPS: {:.0}", report.nodes as f64 / elapsed.as_secs_f64());
        }
        None => println!("No move to search: {} (score {:+.2})", board.status(), report.score),
    }
    Ok(())
}

fn run_perft(depth: u8, fen: Option<String>) -> Result<()> {
    let mut board = load_board(fen.as_deref())?;

    println!("Running perft({})...", depth);
    println!("Position: {}", fen.as_deref().unwrap_or(positions::STARTING));

    if depth <= 3 {
        let results = perft_divide(&mut board, depth);
        let mut total = 0;

        for (mv, count) in &results {
            println!("{}: {}", Uci::from_standard(*mv), count);
            total += count;
        }

        println!("\nTotal: {}", total);
    } else {
        let start = Instant::now();
        let nodes = perft(&mut board, depth);
        let elapsed = start.elapsed();

        println!("Nodes: {}", nodes);
        println!("Time: {:.2}s", elapsed.as_secs_f64());
        println!("NPS: {:.0}", nodes as f64 / elapsed.as_secs_f64());
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Play {
            white,
            black,
            depth,
            seed,
            fallback,
            fen,
            render,
            quiet,
        } => run_play(white, black, depth, seed, fallback, fen, render, quiet),
        Command::Eval { fen } => run_eval(fen),
        Command::Search {
            depth,
            fallback,
            seed,
            fen,
        } => run_search(depth, fallback, seed, fen),
        Command::Perft { depth, fen } => run_perft(depth, fen),
    }
}
