//! CLI frontend for the Fathom interactive fiction engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fathom",
    about = "Fathom — a branching text adventure engine",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new story directory with a template .story file
    Init {
        /// Name of the story to create
        name: String,
    },

    /// Compile .story files and report diagnostics
    Check {
        /// A .story file or a directory of them (default: current directory)
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Summarize the scenes, actions, and outcomes of a story
    Info {
        /// A .story file or a directory of them (default: current directory)
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Play a story interactively
    Play {
        /// A .story file or a directory of them (default: current directory)
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Resume from a saved game state instead of starting fresh
        #[arg(long)]
        load: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { name } => commands::init::run(&name),
        Commands::Check { dir } => commands::check::run(&dir),
        Commands::Info { dir } => commands::info::run(&dir),
        Commands::Play { dir, load } => commands::play::run(&dir, load.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
