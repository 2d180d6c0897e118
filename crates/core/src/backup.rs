//! Snapshot codec and backup file management.
//!
//! A snapshot is the complete externally-visible state at a point in time,
//! written as JSON compatible with backups from the original web app. The
//! codec itself is pure; all file I/O lives in [`BackupManager`].

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::fixtures::TOTAL_MATCHDAYS;
use crate::models::{Match, TeamStanding};

/// Format version tag written into every snapshot. Recorded on decode but
/// not checked; there is no schema migration.
pub const SNAPSHOT_VERSION: &str = "1.0.0";

/// Directory under the user config dir holding exported backups.
pub const DEFAULT_BACKUP_DIR: &str = "elimtui/backups";

/// Decode-time failures.
#[derive(Debug, Error)]
pub enum BackupError {
    /// The bytes were unparsable or failed structural validation.
    #[error("invalid backup format: {0}")]
    InvalidFormat(String),
}

/// Complete campaign state at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Every fixture, played or not.
    pub matches: Vec<Match>,
    /// Ranked table as of capture; on import only the adjustment column is
    /// trusted, everything else is recomputed.
    pub standings: Vec<TeamStanding>,
    /// Matchday in focus when the snapshot was taken.
    pub current_matchday: u32,
    /// Capture time.
    pub timestamp: DateTime<Utc>,
    /// Format version tag.
    pub version: String,
}

impl Snapshot {
    /// Capture the given state, stamping the current time and version.
    pub fn capture(matches: Vec<Match>, standings: Vec<TeamStanding>, current_matchday: u32) -> Self {
        Self {
            matches,
            standings,
            current_matchday,
            timestamp: Utc::now(),
            version: SNAPSHOT_VERSION.to_string(),
        }
    }

    /// Decode and validate a snapshot from raw bytes.
    pub fn from_json(bytes: &[u8]) -> Result<Self, BackupError> {
        let snapshot: Snapshot = serde_json::from_slice(bytes)
            .map_err(|err| BackupError::InvalidFormat(err.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }

    /// Suggested export filename, e.g. `eliminatorias-backup-2026-08-30.json`.
    pub fn suggested_file_name(&self) -> String {
        format!(
            "eliminatorias-backup-{}.json",
            self.timestamp.format("%Y-%m-%d")
        )
    }

    fn validate(&self) -> Result<(), BackupError> {
        if self.matches.is_empty() {
            return Err(BackupError::InvalidFormat(
                "snapshot contains no matches".to_string(),
            ));
        }
        if self.standings.is_empty() {
            return Err(BackupError::InvalidFormat(
                "snapshot contains no standings".to_string(),
            ));
        }
        if !(1..=TOTAL_MATCHDAYS).contains(&self.current_matchday) {
            return Err(BackupError::InvalidFormat(format!(
                "currentMatchday {} is outside 1..={TOTAL_MATCHDAYS}",
                self.current_matchday
            )));
        }
        Ok(())
    }
}

/// Listing of an importable backup file.
#[derive(Debug, Clone)]
pub struct BackupEntry {
    /// Absolute path to the backup on disk.
    pub path: PathBuf,
    /// Capture timestamp read from the snapshot.
    pub timestamp: DateTime<Utc>,
    /// Number of played matches inside the snapshot.
    pub played: usize,
    /// Matchday the snapshot was focused on.
    pub current_matchday: u32,
}

/// Reads and writes backup files under a root directory.
pub struct BackupManager {
    root: PathBuf,
}

impl BackupManager {
    /// Create a manager rooted at the provided directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Default location under the user's config directory.
    pub fn default_root() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_BACKUP_DIR)
    }

    /// Backup directory this manager writes into.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a snapshot under its suggested name, returning the path.
    ///
    /// A same-day export that would collide gets the capture time appended
    /// instead of overwriting the earlier file.
    pub fn export(&self, snapshot: &Snapshot) -> Result<PathBuf> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("failed to create {}", self.root.display()))?;

        let mut path = self.root.join(snapshot.suggested_file_name());
        if path.exists() {
            path = self.root.join(format!(
                "eliminatorias-backup-{}.json",
                snapshot.timestamp.format("%Y-%m-%d-%H%M%S")
            ));
        }
        write_snapshot(&path, snapshot)?;
        Ok(path)
    }

    /// Read and decode a snapshot from an arbitrary path.
    pub fn import(&self, path: impl AsRef<Path>) -> Result<Snapshot> {
        read_snapshot(path.as_ref())
    }

    /// All importable backups, most recent capture first.
    ///
    /// Files that fail to parse are skipped with a warning rather than
    /// aborting the listing.
    pub fn entries(&self) -> Result<Vec<BackupEntry>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.root).context("failed to read backup directory")? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if entry.path().extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            match read_snapshot(&entry.path()) {
                Ok(snapshot) => entries.push(BackupEntry {
                    path: entry.path(),
                    timestamp: snapshot.timestamp,
                    played: snapshot.matches.iter().filter(|m| m.played).count(),
                    current_matchday: snapshot.current_matchday,
                }),
                Err(err) => {
                    warn!("Skipping unreadable backup {:?}: {err}", entry.path());
                }
            }
        }

        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }
}

/// Persist a snapshot to an explicit path, creating parent directories.
///
/// Also used for the autosaved state file outside the backup directory.
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let serialised = snapshot.to_json().context("failed to serialize snapshot")?;
    fs::write(path, serialised).with_context(|| format!("failed to write {}", path.display()))
}

/// Read and decode a snapshot from disk.
pub fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let snapshot = Snapshot::from_json(&bytes)
        .with_context(|| format!("failed to decode {}", path.display()))?;
    Ok(snapshot)
}
