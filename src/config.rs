use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable pointing at an explicit config file
pub const CONFIG_PATH_ENV: &str = "CLOCKQUIZ_CONFIG";
/// Environment variable overriding the server port
pub const PORT_ENV: &str = "PORT";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory with the browser front end, served for unmatched paths
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 3000, static_dir: None }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub rounds_per_game: u32,
    /// Seconds allowed per round in the terminal game; 0 disables the limit
    pub round_seconds: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { rounds_per_game: 5, round_seconds: 20 }
    }
}

impl GameConfig {
    pub fn round_limit(&self) -> Option<Duration> {
        (self.round_seconds > 0).then_some(Duration::from_secs(self.round_seconds))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LeaderboardConfig {
    /// Scores file; defaults to `scores.json` in the data directory
    pub path: Option<PathBuf>,
    pub max_entries: usize,
    pub top_n: usize,
    pub max_name_len: usize,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self { path: None, max_entries: 50, top_n: 20, max_name_len: 20 }
    }
}

impl LeaderboardConfig {
    pub fn resolved_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join("scores.json")),
        }
    }
}

impl Config {
    /// Load from `$CLOCKQUIZ_CONFIG` or the platform config directory,
    /// creating a default file on first run. `PORT` overrides the port.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let config_path = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => PathBuf::from(path),
            None => get_config_path()?,
        };

        // If config doesn't exist, create default
        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save_to(&config_path)?;
            return Ok(default_config.with_env_overrides());
        }

        Ok(Self::load_from(&config_path)?.with_env_overrides())
    }

    /// Load a specific config file without touching the environment
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var(PORT_ENV) {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!("Ignoring invalid {} value '{}'", PORT_ENV, port),
            }
        }
        self
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "clockquiz", "clockquiz")
        .context("Failed to determine config directory")
}

fn get_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.game.rounds_per_game, 5);
        assert_eq!(config.game.round_limit(), Some(Duration::from_secs(20)));
        assert_eq!(config.leaderboard.max_entries, 50);
        assert_eq!(config.leaderboard.top_n, 20);
        assert_eq!(config.leaderboard.max_name_len, 20);
    }

    #[test]
    fn test_config_save_load() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.server.port = 8081;
        config.leaderboard.path = Some(temp_dir.path().join("scores.json"));
        config.save_to(&config_path)?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);

        Ok(())
    }

    #[test]
    fn test_partial_config_uses_defaults() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[server]\nport = 9000\n")?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded.server.port, 9000);
        assert_eq!(loaded.server.host, "127.0.0.1");
        assert_eq!(loaded.leaderboard, LeaderboardConfig::default());
        assert_eq!(loaded.game, GameConfig::default());

        Ok(())
    }

    #[test]
    fn test_zero_round_seconds_disables_limit() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[game]\nround_seconds = 0\n")?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded.game.round_limit(), None);
        assert_eq!(loaded.game.rounds_per_game, 5);

        Ok(())
    }

    #[test]
    fn test_leaderboard_path_override() -> Result<()> {
        let leaderboard = LeaderboardConfig {
            path: Some(PathBuf::from("/tmp/board.json")),
            ..Default::default()
        };
        assert_eq!(leaderboard.resolved_path()?, PathBuf::from("/tmp/board.json"));
        Ok(())
    }
}
