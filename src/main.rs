use anyhow::Result;
use clap::Parser;
use clockquiz::app::Application;
use clockquiz::cli::{Cli, Commands};
use clockquiz::leaderboard::Leaderboard;
use clockquiz::round::random_round;
use clockquiz::{api_server, init_logger, is_correct, parse, Config};
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Some(Commands::Serve { host, port, static_dir }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if static_dir.is_some() {
                config.server.static_dir = static_dir;
            }
            info!("Starting ClockQuiz API server");
            api_server::start_api_server(config).await
        }
        Some(Commands::Parse { text }) => {
            match parse(&text.join(" ")) {
                Ok(time) => println!("{}", time),
                Err(e) => println!("{}: {}", e.code(), e),
            }
            Ok(())
        }
        Some(Commands::Check { text, hour, minute }) => {
            match parse(&text.join(" ")) {
                Ok(time) if is_correct(&time, hour, minute) => println!("correct ({})", time),
                Ok(time) => println!("incorrect ({})", time),
                Err(e) => println!("incorrect ({}: {})", e.code(), e),
            }
            Ok(())
        }
        Some(Commands::Round) => {
            println!("{}", serde_json::to_string(&random_round())?);
            Ok(())
        }
        Some(Commands::Leaderboard) => {
            let leaderboard = Leaderboard::from_config(&config.leaderboard)?;
            for (rank, entry) in leaderboard.top().iter().enumerate() {
                println!("{:>3}. {:<20} {}", rank + 1, entry.name, entry.score);
            }
            Ok(())
        }
        Some(Commands::Play { rounds, name }) => play(&config, rounds, name),
        None => play(&config, None, None),
    }
}

fn play(config: &Config, rounds: Option<u32>, name: Option<String>) -> Result<()> {
    let mut app = Application::new(
        rounds.unwrap_or(config.game.rounds_per_game),
        config.game.round_limit(),
    );
    if let Some(name) = name {
        app = app.with_leaderboard(name, Leaderboard::from_config(&config.leaderboard)?);
    }
    app.run()
}
