//! High score storage backends
//!
//! - `FileStore`: JSON file on disk (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)
//! - `MemoryStore`: in-process, for tests and throwaway sessions

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::PersistenceError;
use crate::highscores::HighScore;

/// Somewhere to keep the high score between runs
pub trait HighScoreStore {
    /// Read the stored record; an absent record reads as zero
    fn load(&self) -> Result<HighScore, PersistenceError>;

    /// Overwrite the stored record
    fn save(&mut self, best: &HighScore) -> Result<(), PersistenceError>;
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileStore {
    fn load(&self) -> Result<HighScore, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => {
                let best: HighScore = serde_json::from_str(&json)?;
                log::info!("Loaded high score {} from {}", best.score, self.path.display());
                Ok(best)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high score found, starting fresh");
                Ok(HighScore::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, best: &HighScore) -> Result<(), PersistenceError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        // Write-then-rename so a crash never leaves a truncated record
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_string(best)?)?;
        fs::rename(&tmp, &self.path)?;
        log::info!("High score {} saved", best.score);
        Ok(())
    }
}

/// In-memory store that remembers how often it was written
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub record: Option<HighScore>,
    pub writes: usize,
}

impl MemoryStore {
    pub fn with_score(score: u64) -> Self {
        Self {
            record: Some(HighScore::new(score, 0)),
            writes: 0,
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<HighScore, PersistenceError> {
        Ok(self.record.unwrap_or_default())
    }

    fn save(&mut self, best: &HighScore) -> Result<(), PersistenceError> {
        self.record = Some(*best);
        self.writes += 1;
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "starstrike_hiscore";

    fn storage() -> Result<web_sys::Storage, PersistenceError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistenceError::Unavailable("localStorage"))
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> Result<HighScore, PersistenceError> {
        let storage = Self::storage()?;
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => Ok(serde_json::from_str(&json)?),
            _ => {
                log::info!("No high score found, starting fresh");
                Ok(HighScore::default())
            }
        }
    }

    fn save(&mut self, best: &HighScore) -> Result<(), PersistenceError> {
        let storage = Self::storage()?;
        let json = serde_json::to_string(best)?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|_| PersistenceError::Unavailable("localStorage write rejected"))?;
        log::info!("High score {} saved", best.score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("star_strike_store_{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_missing_file_reads_zero() {
        let store = FileStore::new(temp_path("missing.json"));
        assert_eq!(store.load().unwrap(), HighScore::default());
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = temp_path("round_trip.json");
        let mut store = FileStore::new(&path);
        store.save(&HighScore::new(12_345, 6)).unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.load().unwrap(), HighScore::new(12_345, 6));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_is_format_error() {
        let path = temp_path("corrupt.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(store.load(), Err(PersistenceError::Format(_))));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_memory_store_counts_writes() {
        let mut store = MemoryStore::with_score(50);
        assert_eq!(store.load().unwrap().score, 50);
        store.save(&HighScore::new(70, 2)).unwrap();
        store.save(&HighScore::new(90, 2)).unwrap();
        assert_eq!(store.writes, 2);
        assert_eq!(store.load().unwrap().score, 90);
    }
}
