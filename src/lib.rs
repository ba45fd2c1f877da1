pub mod api_server;
pub mod app;
pub mod cli;
pub mod clock;
pub mod config;
pub mod leaderboard;
pub mod parser;
pub mod round;

use env_logger::Env;

pub fn init_logger() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            use chrono::Local;
            use std::io::Write;
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}

// Re-export commonly used types
pub use clock::{is_correct, CanonicalTime, Meridiem};
pub use config::Config;
pub use parser::{parse, ParseOutcome, TimeParseError};
pub use round::Round;
