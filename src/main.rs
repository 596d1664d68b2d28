//! # Burrow Command Line
//!
//! Generates a maze from command line options and prints it to stdout.

use burrow::generation::utils;
use burrow::{
    render_grid, BurrowResult, GenerationConfig, Generator, RoomCorridorGenerator, TileKind,
};
use clap::Parser;
use log::{error, info};
use std::io::Write;

/// Command line arguments for the maze generator.
///
/// Every generation option is optional; anything left unset keeps its default.
#[derive(Parser, Debug)]
#[command(name = "burrow")]
#[command(about = "Generate a room-and-corridor maze and print it")]
#[command(version)]
struct Args {
    /// Random seed for reproducible generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// World width in tiles (default 80)
    #[arg(long)]
    width: Option<u32>,

    /// World height in tiles (default 80)
    #[arg(long)]
    height: Option<u32>,

    /// Maximum room size; rooms span 3 to this plus 2 tiles per side (default 10)
    #[arg(long)]
    max_room_size: Option<u32>,

    /// Number of room placement attempts (default 100)
    #[arg(long)]
    room_tries: Option<u32>,

    /// Color the output with ANSI escape codes
    #[arg(long)]
    color: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    /// Builds a generation config, keeping the default of every unset option.
    fn generation_config(&self) -> GenerationConfig {
        let mut config = GenerationConfig::default();

        if let Some(width) = self.width {
            config.world_width = width;
        }
        if let Some(height) = self.height {
            config.world_height = height;
        }
        if let Some(max_room_size) = self.max_room_size {
            config.max_room_size = max_room_size;
        }
        if let Some(room_tries) = self.room_tries {
            config.room_tries = room_tries;
        }
        config.seed = self.seed;

        config
    }
}

fn main() -> BurrowResult<()> {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    run(&args).inspect_err(|e| error!("{}", e))
}

/// Initializes logging; `RUST_LOG` overrides the command line level.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();
}

fn run(args: &Args) -> BurrowResult<()> {
    info!("Starting burrow v{}", burrow::VERSION);

    let config = args.generation_config();
    let mut rng = utils::create_rng(&config);
    let generator = RoomCorridorGenerator::new();

    let grid = generator.generate(&config, &mut rng)?;
    info!(
        "Maze has {} rooms, {} floor tiles and {} doors",
        grid.rooms().len(),
        grid.count(TileKind::Floor),
        grid.count(TileKind::ClosedDoor)
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    out.write_all(render_grid(&grid, args.color).as_bytes())?;
    out.flush()?;

    Ok(())
}
