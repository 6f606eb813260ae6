use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::Result;
use crate::game_mode::GameMode;

/// Entries kept per mode
pub const MAX_ENTRIES: usize = 10;

/// Date format stored alongside each entry
pub const DATE_FORMAT: &str = "%m/%d/%y";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    /// Average reaction time in seconds
    pub time: f64,
    pub date: String,
}

/// How the store came to hold its current contents
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded,
    /// No file yet; started empty
    Missing,
    /// File was unreadable or malformed; started empty
    Defaulted(String),
}

// On-disk shape. Mode keys stay strings so unknown keys can be dropped.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    scores: BTreeMap<String, Vec<ScoreEntry>>,
    #[serde(default)]
    last_player: String,
}

/// Per-mode top-10 leaderboards, flushed to disk after every mutation
#[derive(Debug)]
pub struct Highscores {
    path: PathBuf,
    scores: BTreeMap<GameMode, Vec<ScoreEntry>>,
    last_player: String,
}

impl Highscores {
    /// An empty store that will persist to `path`
    pub fn empty<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            scores: empty_table(),
            last_player: String::new(),
        }
    }

    /// Read the store at `path`, falling back to empty defaults on any failure
    pub fn load<P: AsRef<Path>>(path: P) -> (Self, LoadOutcome) {
        let mut store = Self::empty(&path);

        let bytes = match fs::read(&store.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return (store, LoadOutcome::Missing);
            }
            Err(e) => {
                warn!("Failed to read highscores {:?}: {}", store.path, e);
                return (store, LoadOutcome::Defaulted(e.to_string()));
            }
        };

        let file = match serde_json::from_slice::<StoreFile>(&bytes) {
            Ok(file) => file,
            Err(e) => {
                warn!("Malformed highscores {:?}: {}", store.path, e);
                return (store, LoadOutcome::Defaulted(e.to_string()));
            }
        };

        for (key, mut entries) in file.scores {
            match GameMode::from_key(&key) {
                Some(mode) => {
                    sort_by_time(&mut entries);
                    entries.truncate(MAX_ENTRIES);
                    store.scores.insert(mode, entries);
                }
                None => debug!("Dropping scores for unknown mode {:?}", key),
            }
        }
        store.last_player = file.last_player;

        (store, LoadOutcome::Loaded)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn last_player(&self) -> &str {
        &self.last_player
    }

    /// Record a result dated today
    pub fn add_score(&mut self, name: &str, time: f64, mode: GameMode) -> Result<()> {
        let date = Local::now().format(DATE_FORMAT).to_string();
        self.add_score_on(name, time, mode, date)
    }

    /// Insert, re-rank, keep the best ten and persist. The in-memory table is
    /// updated even if the write fails.
    pub fn add_score_on(
        &mut self,
        name: &str,
        time: f64,
        mode: GameMode,
        date: String,
    ) -> Result<()> {
        self.last_player = name.to_string();

        let entries = self.scores.entry(mode).or_default();
        entries.push(ScoreEntry {
            name: name.to_string(),
            time,
            date,
        });
        sort_by_time(entries);
        entries.truncate(MAX_ENTRIES);

        self.save()
    }

    /// The first `limit` entries for `mode`, best first
    pub fn get_top(&self, mode: GameMode, limit: usize) -> &[ScoreEntry] {
        match self.scores.get(&mode) {
            Some(entries) => &entries[..limit.min(entries.len())],
            None => &[],
        }
    }

    /// Empty one mode's list, or every list when `mode` is `None`
    pub fn clear(&mut self, mode: Option<GameMode>) -> Result<()> {
        match mode {
            Some(mode) => {
                self.scores.insert(mode, Vec::new());
            }
            None => self.scores = empty_table(),
        }

        self.save()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = StoreFile {
            scores: self
                .scores
                .iter()
                .map(|(mode, entries)| (mode.to_string(), entries.clone()))
                .collect(),
            last_player: self.last_player.clone(),
        };
        let data = serde_json::to_vec_pretty(&file)?;
        fs::write(&self.path, data)?;

        debug!("Saved highscores to {:?}", self.path);
        Ok(())
    }
}

fn empty_table() -> BTreeMap<GameMode, Vec<ScoreEntry>> {
    GameMode::ALL
        .into_iter()
        .map(|mode| (mode, Vec::new()))
        .collect()
}

// Stable, so equal times keep insertion order
fn sort_by_time(entries: &mut [ScoreEntry]) {
    entries.sort_by(|a, b| a.time.total_cmp(&b.time));
}
