//! lantern-save: Save/restore for Beneath the City of Lanterns
//!
//! Persists the session snapshot - map id, tiles, player, flags,
//! inventory, gold, party - as a versioned JSON document. An active
//! battle is never saved; the snapshot is the full recoverable state.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use lantern_core::Snapshot;

/// Current save file format version
pub const SAVE_VERSION: u32 = 1;

/// Save/restore errors
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Save file not found")]
    NotFound,

    #[error("Incompatible save version: expected {expected}, found {found}")]
    IncompatibleVersion { expected: u32, found: u32 },

    #[error("Invalid save file header")]
    InvalidHeader,
}

/// Save file header for versioning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveHeader {
    /// Magic identifier
    pub magic: String,
    /// Save format version
    pub version: u32,
    /// Map the party was on at save time
    pub map_id: String,
    /// Gold at save time, for a save browser line
    pub gold: i32,
    /// Timestamp of save
    pub saved_at: DateTime<Utc>,
}

impl SaveHeader {
    const MAGIC: &'static str = "LNTN";

    pub fn new(snapshot: &Snapshot) -> Self {
        Self {
            magic: Self::MAGIC.to_string(),
            version: SAVE_VERSION,
            map_id: snapshot.map_id.clone(),
            gold: snapshot.gold,
            saved_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), SaveError> {
        if self.magic != Self::MAGIC {
            return Err(SaveError::InvalidHeader);
        }
        if self.version != SAVE_VERSION {
            return Err(SaveError::IncompatibleVersion {
                expected: SAVE_VERSION,
                found: self.version,
            });
        }
        Ok(())
    }
}

/// Complete save file structure
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveFile {
    pub header: SaveHeader,
    pub snapshot: Snapshot,
}

/// Save a session snapshot to a file
pub fn save_game(snapshot: &Snapshot, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let save_file = SaveFile {
        header: SaveHeader::new(snapshot),
        snapshot: snapshot.clone(),
    };

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &save_file)?;
    Ok(())
}

/// Load a session snapshot from a file
pub fn load_game(path: impl AsRef<Path>) -> Result<Snapshot, SaveError> {
    let file = File::open(path).map_err(|_| SaveError::NotFound)?;
    let reader = BufReader::new(file);
    let save_file: SaveFile = serde_json::from_reader(reader)?;

    save_file.header.validate()?;
    Ok(save_file.snapshot)
}

/// Load only the header from a save file
pub fn load_header(path: impl AsRef<Path>) -> Result<SaveHeader, SaveError> {
    let file = File::open(path).map_err(|_| SaveError::NotFound)?;
    let reader = BufReader::new(file);
    let save_file: SaveFile = serde_json::from_reader(reader)?;
    save_file.header.validate()?;
    Ok(save_file.header)
}

/// Check if a save file exists
pub fn save_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// Delete a save file
pub fn delete_save(path: impl AsRef<Path>) -> Result<(), SaveError> {
    std::fs::remove_file(path)?;
    Ok(())
}

/// The single default save slot
pub fn default_save_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("lanterns");
    path.push("save.json");
    path
}
