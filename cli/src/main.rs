use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::io;
use sweeper_core::{Board, CellCount, Coord, GameConfig, LayoutGenerator, RejectionSampler};
use tracing_subscriber::filter::LevelFilter;

mod command;
mod game;
mod render;

/// Clear the board without hitting a mine.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// Number of columns
    #[arg(long, default_value_t = 8)]
    width: Coord,

    /// Number of rows
    #[arg(long, default_value_t = 8)]
    height: Coord,

    /// Number of mines, must leave at least one safe cell
    #[arg(short, long, default_value_t = 10)]
    mines: CellCount,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

fn init_logging(verbose: &Verbosity<WarnLevel>) {
    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);
    log::debug!("seed: {:?}", args.seed);

    let config = GameConfig::new(args.width, args.height, args.mines)
        .context("Invalid board configuration")?;
    let generator = match args.seed {
        Some(seed) => RejectionSampler::from_seed(seed),
        None => RejectionSampler::new(SmallRng::from_os_rng()),
    };
    let mut board = Board::new(generator.generate(config));

    let outcome = game::play(&mut board, io::stdin().lock(), io::stdout().lock())?;
    log::info!("finished with {:?}", outcome);
    Ok(())
}
