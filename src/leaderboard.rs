use crate::config::LeaderboardConfig;
use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

// Maximum allowed size for the scores file (10MB)
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LeaderboardError {
    #[error("Player name is required")]
    EmptyName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
    /// Submission time, milliseconds since the Unix epoch
    pub ts: i64,
}

/// Size limits applied on every submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_entries: usize,
    pub top_n: usize,
    pub max_name_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self::from(&LeaderboardConfig::default())
    }
}

impl From<&LeaderboardConfig> for Limits {
    fn from(config: &LeaderboardConfig) -> Self {
        Self {
            max_entries: config.max_entries,
            top_n: config.top_n,
            max_name_len: config.max_name_len,
        }
    }
}

/// Append-only score list kept in a JSON file, best scores first
pub struct Leaderboard {
    path: PathBuf,
    limits: Limits,
}

impl Leaderboard {
    pub fn open(path: impl Into<PathBuf>, limits: Limits) -> Self {
        Self { path: path.into(), limits }
    }

    pub fn from_config(config: &LeaderboardConfig) -> Result<Self> {
        Ok(Self::open(config.resolved_path()?, Limits::from(config)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all stored entries.
    ///
    /// A missing, oversized or corrupt file reads as an empty board.
    pub fn load(&self) -> Vec<ScoreEntry> {
        if !self.path.exists() {
            return Vec::new();
        }
        match read_entries(&self.path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Ignoring unreadable scores file {}: {:#}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Best `top_n` entries
    pub fn top(&self) -> Vec<ScoreEntry> {
        let mut entries = self.load();
        entries.truncate(self.limits.top_n);
        entries
    }

    /// Record a score and persist the re-ranked, truncated board
    pub fn submit(&self, name: &str, score: u32) -> Result<ScoreEntry> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LeaderboardError::EmptyName.into());
        }
        let entry = ScoreEntry {
            name: name.chars().take(self.limits.max_name_len).collect(),
            score,
            ts: Utc::now().timestamp_millis(),
        };
        debug!("Submitting score {:?}", entry);

        let mut entries = self.load();
        entries.push(entry.clone());
        rank(&mut entries);
        entries.truncate(self.limits.max_entries);
        self.save(&entries)?;
        Ok(entry)
    }

    fn save(&self, entries: &[ScoreEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, entries)?;
        Ok(())
    }
}

/// Highest score first; ties go to the earlier submission
pub fn rank(entries: &mut [ScoreEntry]) {
    entries.sort_by(|a, b| b.score.cmp(&a.score).then(a.ts.cmp(&b.ts)));
}

fn read_entries(path: &Path) -> Result<Vec<ScoreEntry>> {
    let metadata = std::fs::metadata(path)?;
    if metadata.len() > MAX_FILE_SIZE {
        anyhow::bail!("File size exceeds limits");
    }

    let reader = BufReader::new(File::open(path)?);
    let entries = serde_json::from_reader(reader).context("Failed to parse scores")?;
    Ok(entries)
}
