use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ClockQuiz - read the clock, say the time in English
#[derive(Debug, Parser)]
#[command(name = "clockquiz")]
#[command(about = "Parse English clock times and play the clock-reading quiz", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Command to execute (if not specified, starts a terminal game)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,

        /// Directory with the browser front end
        #[arg(long = "static-dir")]
        static_dir: Option<PathBuf>,
    },

    /// Parse an English time expression
    Parse {
        /// Time expression, e.g. "quarter past three"
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Check a guess against a target time
    Check {
        /// Time expression to grade
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Target hour (0-23)
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=23))]
        hour: u32,

        /// Target minute (0-59)
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=59))]
        minute: u32,
    },

    /// Print a random round as JSON
    Round,

    /// Play the quiz in the terminal
    Play {
        /// Number of rounds (defaults to the configured value)
        #[arg(long)]
        rounds: Option<u32>,

        /// Save the final score under this name
        #[arg(long)]
        name: Option<String>,
    },

    /// Show the best scores
    #[command(alias = "scores")]
    Leaderboard,
}
