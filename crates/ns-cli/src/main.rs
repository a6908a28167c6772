//! CLI frontend for Ninesong.

mod commands;
mod logging;
mod tui;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use commands::Sources;

#[derive(Parser)]
#[command(
    name = "ninesong",
    about = "Ninesong, a side-scrolling ghost story for the terminal",
    version,
    propagate_version = true
)]
struct Cli {
    /// Content pack JSON (default: the built-in story)
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    /// Runtime tuning JSON; omitted fields keep their defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the story in the terminal
    Play {
        /// Log file (the terminal is taken by the game)
        #[arg(long, default_value = "ninesong.log")]
        log: PathBuf,
    },

    /// Validate a content pack and report every problem
    Check,

    /// Write the content pack as JSON
    Export {
        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List interactables per scene
    Catalog {
        /// Only show one scene (e.g. temple)
        scene: Option<String>,
    },

    /// Run a timed input script headlessly and print what happened
    Replay {
        /// Input script: one step per line (start, wait, press, release, tap, hold, finish)
        script: PathBuf,

        /// Also list audio cues in the event log
        #[arg(long)]
        cues: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let logging = match &cli.command {
        Commands::Play { log } => logging::init_file(log),
        _ => {
            logging::init_stderr();
            Ok(())
        }
    };

    let sources = Sources {
        content: cli.content,
        config: cli.config,
    };

    let result = logging.and_then(|()| match cli.command {
        Commands::Play { .. } => commands::play::run(&sources),
        Commands::Check => commands::check::run(&sources),
        Commands::Export { output } => commands::export::run(&sources, output.as_deref()),
        Commands::Catalog { scene } => commands::catalog::run(&sources, scene.as_deref()),
        Commands::Replay { script, cues } => commands::replay::run(&sources, &script, cues),
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
