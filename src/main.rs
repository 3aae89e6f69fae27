//! Connect-K self-play harness
//!
//! Pits two engine instances against each other on a configurable grid,
//! printing every final position and a tally.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use connectx::{Board, Engine, EngineConfig, Outcome, Player};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML engine configuration; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    rows: Option<usize>,

    #[arg(long)]
    columns: Option<usize>,

    /// Tokens in a line needed to win
    #[arg(short = 'k', long)]
    win_length: Option<usize>,

    /// Seconds per turn
    #[arg(short, long)]
    budget: Option<f64>,

    /// Number of games; seats alternate between games
    #[arg(short, long, default_value_t = 1)]
    games: u32,

    /// Base seed for reproducible games
    #[arg(short, long)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Debug, Default)]
struct Tally {
    first_engine: u32,
    second_engine: u32,
    draws: u32,
}

fn main() {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "warn" };
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    );
    builder
        .format(|buf, record| {
            writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
        })
        .write_style(env_logger::WriteStyle::Never)
        .target(env_logger::Target::Stderr);
    builder.init();

    if let Err(e) = run(&args) {
        log::error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

fn base_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(columns) = args.columns {
        config.columns = columns;
    }
    if let Some(win_length) = args.win_length {
        config.win_length = win_length;
    }
    if let Some(budget) = args.budget {
        config.turn_budget_secs = budget;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> Result<()> {
    let config = base_config(args)?;
    let mut tally = Tally::default();

    for game in 0..args.games {
        // Engine 0 opens the even games
        let swapped = game % 2 == 1;
        let winner = play_game(&config, game, swapped)?;
        println!();

        match winner {
            Some(0) => tally.first_engine += 1,
            Some(_) => tally.second_engine += 1,
            None => tally.draws += 1,
        }
    }

    println!(
        "engine A {} - engine B {} ({} draws)",
        tally.first_engine, tally.second_engine, tally.draws
    );
    Ok(())
}

/// Play one game; returns the winning engine index or `None` for a draw.
fn play_game(config: &EngineConfig, game: u32, swapped: bool) -> Result<Option<usize>> {
    let seat_seed = |seat: u64| config.seed.map(|s| s.wrapping_add(u64::from(game) * 2 + seat));
    let first = Engine::initialize(config.clone().plays_first(true).seed(seat_seed(0)))?;
    let second = Engine::initialize(config.clone().plays_first(false).seed(seat_seed(1)))?;

    // seats[i] is (engine index, engine) for Player::One then Player::Two
    let mut seats = if swapped {
        [(1, first), (0, second)]
    } else {
        [(0, first), (1, second)]
    };

    let mut board = Board::new(config.rows, config.columns, config.win_length);
    let outcome = loop {
        let outcome = board.current_outcome();
        if outcome != Outcome::Open {
            break outcome;
        }

        let seat = board.side_to_move().index();
        let (_, engine) = &mut seats[seat];
        let result = engine
            .select_move_with_stats(&mut board)
            .with_context(|| format!("game {game}, move {}", board.move_count() + 1))?;
        if result.time_ms as f64 > config.turn_budget_secs * 1000.0 {
            log::warn!("move took {}ms, over the budget", result.time_ms);
        }
        board.place(result.column)?;
    };

    print!("{board}");
    let label = |player: Player| if seats[player.index()].0 == 0 { "A" } else { "B" };
    match outcome {
        Outcome::Won(player) => {
            println!("game {}: engine {} wins as {player:?}", game + 1, label(player));
            Ok(Some(seats[player.index()].0))
        }
        Outcome::Draw => {
            println!("game {}: draw", game + 1);
            Ok(None)
        }
        Outcome::Open => bail!("game {game} stopped while still open"),
    }
}
