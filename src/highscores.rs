//! Persisted best score
//!
//! The file holds base64 of `"<score>:<hex sha256 of a fixed salt>"`. The
//! digest only guards against accidental corruption: the salt is compiled
//! into the binary and does not depend on the score, so anyone can forge a
//! valid file. The format is kept byte-compatible with existing saves.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use sha2::{Digest, Sha256};

use crate::persistence::{PersistenceError, atomic_write};

const INTEGRITY_SALT: &[u8] = b"secret-key";
const FIELD_DELIMITER: char = ':';

/// Why a stored high score was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorruptReason {
    /// The file exists but could not be read
    Unreadable(String),
    InvalidBase64,
    InvalidUtf8,
    /// Not exactly `score:digest`
    MalformedPayload,
    InvalidScore,
    DigestMismatch,
}

/// Outcome of reading the high score file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighScoreLoad {
    Missing,
    Valid(u64),
    Corrupt(CorruptReason),
}

impl HighScoreLoad {
    /// Collapse to the score shown to the player
    pub fn score(&self) -> u64 {
        match self {
            HighScoreLoad::Valid(score) => *score,
            HighScoreLoad::Missing | HighScoreLoad::Corrupt(_) => 0,
        }
    }
}

/// Hex digest stored next to the score
pub fn integrity_digest() -> String {
    hex::encode(Sha256::digest(INTEGRITY_SALT))
}

/// Encode a score into the on-disk payload
pub fn encode(score: u64) -> String {
    STANDARD.encode(format!("{score}{FIELD_DELIMITER}{}", integrity_digest()))
}

/// Decode an on-disk payload
pub fn decode(raw: &[u8]) -> Result<u64, CorruptReason> {
    let text = std::str::from_utf8(raw).map_err(|_| CorruptReason::InvalidBase64)?;
    let bytes = STANDARD
        .decode(text.trim())
        .map_err(|_| CorruptReason::InvalidBase64)?;
    let payload = String::from_utf8(bytes).map_err(|_| CorruptReason::InvalidUtf8)?;

    let mut fields = payload.split(FIELD_DELIMITER);
    let (Some(score), Some(digest), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(CorruptReason::MalformedPayload);
    };

    if digest != integrity_digest() {
        return Err(CorruptReason::DigestMismatch);
    }
    score.parse::<u64>().map_err(|_| CorruptReason::InvalidScore)
}

/// High score file at a fixed path
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored high score. Never fails; problems come back as `Corrupt`.
    pub fn load(&self) -> HighScoreLoad {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return HighScoreLoad::Missing,
            Err(e) => {
                log::warn!("Could not read high score {}: {e}", self.path.display());
                return HighScoreLoad::Corrupt(CorruptReason::Unreadable(e.to_string()));
            }
        };

        match decode(&raw) {
            Ok(score) => HighScoreLoad::Valid(score),
            Err(reason) => {
                log::warn!(
                    "Ignoring corrupt high score {}: {reason:?}",
                    self.path.display()
                );
                HighScoreLoad::Corrupt(reason)
            }
        }
    }

    /// Record `score` if it beats the stored one. Returns whether it was written.
    pub fn save(&self, score: u64) -> Result<bool, PersistenceError> {
        let current = self.load().score();
        if score <= current {
            return Ok(false);
        }
        atomic_write(&self.path, encode(score).as_bytes())?;
        log::info!("New high score {score} (was {current})");
        Ok(true)
    }
}
