//! testpass CLI: drive the question engine from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "testpass", version, about = "Quiz question engine for test passes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate question set TOML files
    Validate {
        /// Path to question set file or directory
        #[arg(long)]
        question_set: PathBuf,
    },

    /// Show the initial answer state of every question
    Preview {
        /// Path to question set file
        #[arg(long)]
        question_set: PathBuf,

        /// RNG seed for shuffled questions (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Replay an action script and write the submission payload
    Submit {
        /// Path to question set file
        #[arg(long)]
        question_set: PathBuf,

        /// TOML file with the actions to replay
        #[arg(long)]
        actions: PathBuf,

        /// RNG seed for shuffled questions (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Submission JSON path (`-` for stdout; default: <output_dir>/<attempt>.json)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Format a remaining-time value as HH:MM:SS
    Remaining {
        /// Remaining milliseconds (negative means expired)
        #[arg(
            long,
            allow_negative_numbers = true,
            conflicts_with = "deadline",
            required_unless_present = "deadline"
        )]
        millis: Option<i64>,

        /// RFC 3339 deadline to count down to
        #[arg(long)]
        deadline: Option<String>,
    },

    /// Create starter config and example question set
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("testpass=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { question_set } => commands::validate::execute(question_set),
        Commands::Preview {
            question_set,
            seed,
            config,
        } => commands::preview::execute(question_set, seed, config),
        Commands::Submit {
            question_set,
            actions,
            seed,
            output,
            config,
        } => commands::submit::execute(question_set, actions, seed, output, config),
        Commands::Remaining { millis, deadline } => commands::remaining::execute(millis, deadline),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
