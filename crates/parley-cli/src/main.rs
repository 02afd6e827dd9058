//! CLI frontend for the Parley game widget.

mod commands;
mod logging;

use std::fs::File;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};

use logging::{LogFormat, LogTarget};

#[derive(Parser)]
#[command(
    name = "parley",
    about = "Parley: timed mini-games for the chat widget",
    version,
    propagate_version = true
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Human, global = true)]
    log_format: LogFormat,

    /// Load games from a JSON catalog instead of the built-in one
    #[arg(long, env = "PARLEY_CATALOG", global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available games
    List {
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the rules and levels of one game
    Show {
        /// Game identifier (e.g. trivia, word-chain, emoji-pictionary)
        variant: String,
    },

    /// Play in the terminal
    Play {
        /// Open this game right away
        #[arg(long)]
        variant: Option<String>,

        /// Choose this level right away (word chain only)
        #[arg(long, requires = "variant")]
        level: Option<String>,

        /// RNG seed for reproducible word draws
        #[arg(long)]
        seed: Option<u64>,

        /// Write logs to this file (logs are discarded otherwise)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Replay text commands without a terminal, printing one JSON line each
    Script {
        /// Command file, one command per line (default: stdin)
        file: Option<PathBuf>,

        /// RNG seed for reproducible word draws
        #[arg(long)]
        seed: Option<u64>,

        /// Fail if any command is rejected
        #[arg(long)]
        strict: bool,
    },

    /// Ask the emotion service about a message draft
    Analyze {
        /// The draft message
        text: String,

        /// Base URL of the emotion service
        #[arg(long, env = "PARLEY_EMOTION_ENDPOINT")]
        endpoint: String,

        /// Request timeout in milliseconds
        #[arg(long, default_value = "5000")]
        timeout_ms: u64,

        /// Send suggestion N (1-based) as a chat message instead of printing the report
        #[arg(long, value_name = "N")]
        reply: Option<usize>,
    },
}

fn main() {
    let cli = Cli::parse();

    let target = match &cli.command {
        Commands::Play { log_file, .. } => match log_file {
            Some(path) => match File::create(path) {
                Ok(file) => LogTarget::File(file),
                Err(e) => {
                    eprintln!("error: cannot open log file {}: {e}", path.display());
                    process::exit(1);
                }
            },
            None => LogTarget::Discard,
        },
        _ => LogTarget::Stderr,
    };
    logging::init_logging(cli.log_format, cli.verbose, target);

    let catalog = cli.catalog.as_deref();
    let result = match cli.command {
        Commands::List { json } => commands::list::run(catalog, json),
        Commands::Show { variant } => commands::show::run(catalog, &variant),
        Commands::Play {
            variant,
            level,
            seed,
            log_file: _,
        } => commands::play::run(catalog, variant.as_deref(), level.as_deref(), seed),
        Commands::Script { file, seed, strict } => {
            commands::script::run(catalog, file.as_deref(), seed, strict)
        }
        Commands::Analyze {
            text,
            endpoint,
            timeout_ms,
            reply,
        } => commands::analyze::run(&text, &endpoint, timeout_ms, reply),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
