mod cli;
mod display;
mod game;
mod input;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, EngineChoice, HeuristicChoice, PlayArgs};
use display::render_board;
use env_logger::Env;
use game::host_game;
use input::{ConsoleInput, SharedConsole};
use mancala_agents::{search, Agent, Player, Policy, SearchStrategy};
use mancala_core::{perft, perft_divide, MancalaBoard, Side};
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Instant;

fn build_player(
    side: Side,
    policy: Policy,
    depth: u8,
    heuristic: HeuristicChoice,
    seed: Option<u64>,
    console: &SharedConsole,
) -> Box<dyn Agent> {
    let mut player = Player::new(side, policy, depth, heuristic.for_side(side));
    if let Some(seed) = seed {
        player = player.with_seed(seed.wrapping_add(side.index() as u64));
    }
    if policy == Policy::Human {
        player = player.with_input(Box::new(Rc::clone(console)));
    }
    Box::new(player)
}

fn play(args: PlayArgs) -> Result<()> {
    let board = MancalaBoard::with_stones(args.stones).context("cannot set up the board")?;
    let console = ConsoleInput::shared_stdio();
    let mut agents = [
        build_player(Side::One, args.player1, args.depth1, args.heuristic1, args.seed, &console),
        build_player(Side::Two, args.player2, args.depth2, args.heuristic2, args.seed, &console),
    ];

    println!("{} vs {}", agents[0].name(), agents[1].name());
    let mut stdout = io::stdout();
    render_board(&board, &mut stdout)?;

    let record = host_game(board, args.first, &mut agents, |board, side, pit| {
        println!("\n{} plays pit {}", side, pit);
        if let Err(err) = render_board(board, &mut io::stdout()) {
            log::warn!("failed to draw the board: {}", err);
        }
    })?;

    if let Some(side) = record.resigned {
        println!("\n{} resigned.", side);
    }
    println!(
        "\nFinal score: {} {} - {} {}",
        Side::One,
        record.board.store(Side::One),
        record.board.store(Side::Two),
        Side::Two
    );
    match record.winner() {
        Some(side) => println!("{} wins after {} moves!", side, record.moves.len()),
        None => println!("Draw after {} moves.", record.moves.len()),
    }
    stdout.flush()?;
    Ok(())
}

fn run_search(
    board: &MancalaBoard,
    side: Side,
    depth: u8,
    heuristic: HeuristicChoice,
    strategy: SearchStrategy,
) {
    let evaluation = heuristic.for_side(side);
    println!("\nSearching with {} to depth {}...", strategy, depth);

    let start = Instant::now();
    let result = search(board, side, depth, &evaluation, strategy);
    let elapsed = start.elapsed();

    match result.best_move {
        Some(pit) => println!("Best move: pit {}", pit),
        None => println!("No move searched"),
    }
    println!("Score: {}", result.score);
    println!("Depth: {}", result.depth);
    println!("Nodes: {}", result.nodes);
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("NPS: {:.0}", result.nodes as f64 / elapsed.as_secs_f64().max(1e-9));
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play(args) => play(args)?,
        Command::Search {
            position,
            side,
            depth,
            engine,
            heuristic,
        } => {
            let board = MancalaBoard::from_notation(&position)
                .with_context(|| format!("invalid position '{}'", position))?;

            println!("Position: {}", board.to_notation());
            render_board(&board, &mut io::stdout())?;
            println!("{} to move", side);

            let strategies: &[SearchStrategy] = match engine {
                EngineChoice::Minimax => &[SearchStrategy::Minimax],
                EngineChoice::Alphabeta => &[SearchStrategy::AlphaBeta],
                EngineChoice::Both => &[SearchStrategy::Minimax, SearchStrategy::AlphaBeta],
            };
            for &strategy in strategies {
                run_search(&board, side, depth, heuristic, strategy);
            }
        }
        Command::Perft {
            depth,
            position,
            side,
            divide,
        } => {
            let board = MancalaBoard::from_notation(&position)
                .with_context(|| format!("invalid position '{}'", position))?;

            println!("Running perft({})...", depth);
            println!("Position: {}", board.to_notation());

            if divide {
                let results = perft_divide(&board, side, depth);
                let mut total = 0;
                for (pit, count) in &results {
                    println!("{}: {}", pit, count);
                    total += count;
                }
                println!("\nTotal: {}", total);
            } else {
                let start = Instant::now();
                let nodes = perft(&board, side, depth);
                let elapsed = start.elapsed();

                println!("Nodes: {}", nodes);
                println!("Time: {:.2}s", elapsed.as_secs_f64());
                println!("NPS: {:.0}", nodes as f64 / elapsed.as_secs_f64().max(1e-9));
            }
        }
    }

    Ok(())
}
