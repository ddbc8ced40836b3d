//! Leaderboard - top runs ranked by total lines cleared
//!
//! Persisted as a JSON array of `{ "name": ..., "linesCleared": ... }`
//! objects, best first. A missing file is an empty leaderboard.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Entries kept on the board.
pub const MAX_SCORES: usize = 10;

/// Longest name stored, in characters.
pub const MAX_NAME_LEN: usize = 16;

/// Stored when the player submits an empty name.
pub const DEFAULT_NAME: &str = "Player";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub name: String,
    pub lines_cleared: u32,
}

impl ScoreEntry {
    /// Build an entry with a trimmed, length-bounded name.
    pub fn new(name: &str, lines_cleared: u32) -> Self {
        Self {
            name: sanitize_name(name),
            lines_cleared,
        }
    }
}

/// Trim, drop control characters and cap at [`MAX_NAME_LEN`] characters.
pub fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .filter(|c| !c.is_control())
        .take(MAX_NAME_LEN)
        .collect();
    if cleaned.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        cleaned
    }
}

/// Ordered top-[`MAX_SCORES`] list, best first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a run with `lines_cleared` would make the board.
    pub fn qualifies(&self, lines_cleared: u32) -> bool {
        self.entries.len() < MAX_SCORES
            || self
                .entries
                .last()
                .is_some_and(|last| lines_cleared > last.lines_cleared)
    }

    /// Insert an entry and return its 0-based rank, or `None` if it did not place.
    ///
    /// Ties rank below existing entries with the same line count.
    pub fn insert(&mut self, entry: ScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.lines_cleared) {
            return None;
        }

        let rank = self
            .entries
            .iter()
            .position(|e| entry.lines_cleared > e.lines_cleared)
            .unwrap_or(self.entries.len());
        self.entries.insert(rank, entry);
        self.entries.truncate(MAX_SCORES);
        Some(rank)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let mut entries: Vec<ScoreEntry> =
            serde_json::from_str(json).context("parse leaderboard json")?;

        for entry in entries.iter_mut() {
            entry.name = sanitize_name(&entry.name);
        }
        // Hand-edited files may be unsorted or oversized.
        entries.sort_by(|a, b| b.lines_cleared.cmp(&a.lines_cleared));
        entries.truncate(MAX_SCORES);

        Ok(Self { entries })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.entries).context("serialize leaderboard")
    }

    /// Read from `path`; a missing file yields an empty board.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => {
                let board = Self::from_json(&json)
                    .with_context(|| format!("load leaderboard {}", path.display()))?;
                debug!("loaded {} scores from {}", board.len(), path.display());
                Ok(board)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("no leaderboard at {}, starting empty", path.display());
                Ok(Self::new())
            }
            Err(e) => Err(e).with_context(|| format!("read leaderboard {}", path.display())),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).with_context(|| format!("write leaderboard {}", path.display()))?;
        debug!("saved {} scores to {}", self.len(), path.display());
        Ok(())
    }
}
