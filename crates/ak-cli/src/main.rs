//! Terminal Akinator: think of a comic character and let the game guess it.

mod game;

use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{LevelFilter, info};

use ak_core::config::DEFAULT_DATA_PATH;
use ak_core::{CharacterStore, GameConfig, GuessingEngine};

#[derive(Parser)]
#[command(
    name = "akinator",
    about = "Terminal Akinator: think of a character and I'll guess it",
    version
)]
struct Cli {
    /// Character database file
    #[arg(short, long, default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// RNG seed for reproducible guesses
    #[arg(short, long)]
    seed: Option<u64>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn config(&self) -> GameConfig {
        let config = GameConfig::default().with_data_path(&self.data);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn setup_logging(level: LevelFilter) {
    // Logs go to stderr so they never interleave with the game on stdout.
    env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), String> {
    let config = cli.config();
    info!("Starting with database {}", config.data_path.display());

    let store = CharacterStore::new(&config.data_path);
    let mut engine = GuessingEngine::new(store, &config);

    let stdin = io::stdin();
    game::run(&mut engine, stdin.lock(), io::stdout())
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.log_level());

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
