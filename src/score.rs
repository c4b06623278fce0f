use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const APP_DIR_NAME: &str = "snake-arcade";
const SCORE_FILE_NAME: &str = "scores.json";

/// High-score persistence port.
///
/// The session treats persistence as best-effort: a failing store never
/// interrupts play, and the in-memory score display stays correct.
pub trait ScoreStore {
    /// Loads the persisted high score. Missing backing data is `Ok(0)`.
    fn load(&mut self) -> io::Result<u32>;

    /// Persists `score` as the new high score.
    fn save(&mut self, score: u32) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// File-backed score store under the platform data directory.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    /// Creates a store at the platform-correct score file path.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: scores_path(),
        }
    }

    /// Creates a store at an explicit path.
    #[must_use]
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Default for JsonScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for JsonScoreStore {
    fn load(&mut self) -> io::Result<u32> {
        load_high_score_from_path(&self.path)
    }

    fn save(&mut self, score: u32) -> io::Result<()> {
        save_high_score_to_path(&self.path, score)
    }
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

fn load_high_score_from_path(path: &Path) -> io::Result<u32> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    serde_json::from_str::<ScoreFile>(&raw)
        .map(|file| file.high_score)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn save_high_score_to_path(path: &Path, score: u32) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = ScoreFile { high_score: score };
    let json = serde_json::to_string_pretty(&payload)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;

    fs::write(path, json)
}
