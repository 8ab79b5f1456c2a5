use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::GameError;

/// Best score kept as a single integer in a plain text file.
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        ScoreStore { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing, unreadable or garbled files count as a best score of 0.
    pub fn load(&self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(text) => text.trim().parse().unwrap_or_else(|_| {
                warn!("Ignoring malformed score file {}", self.path.display());
                0
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => 0,
            Err(e) => {
                warn!("Could not read {}: {}", self.path.display(), e);
                0
            }
        }
    }

    /// Writes `score` only when it beats the stored best. Returns whether
    /// the file was updated.
    pub fn submit(&self, score: u32) -> Result<bool, GameError> {
        let best = self.load();
        if score <= best {
            return Ok(false);
        }

        fs::write(&self.path, score.to_string())?;
        info!("New best score {} (was {})", score, best);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_zero() {
        let dir = TempDir::new().unwrap();
        let store = ScoreStore::new(dir.path().join("best.txt"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn garbage_is_zero() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("best.txt");
        fs::write(&path, "not a number").unwrap();

        assert_eq!(ScoreStore::new(&path).load(), 0);
    }

    #[test]
    fn higher_score_replaces_best() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("best.txt");
        fs::write(&path, "30").unwrap();
        let store = ScoreStore::new(&path);

        assert!(store.submit(50).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "50");
        assert_eq!(store.load(), 50);
    }

    #[test]
    fn lower_score_leaves_file_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("best.txt");
        fs::write(&path, "30\n").unwrap();
        let store = ScoreStore::new(&path);

        assert!(!store.submit(10).unwrap());
        assert!(!store.submit(30).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "30\n");
    }

    #[test]
    fn unwritable_location_is_reported() {
        let dir = TempDir::new().unwrap();
        let store = ScoreStore::new(dir.path().join("missing").join("best.txt"));

        assert_eq!(store.load(), 0);
        assert!(matches!(store.submit(20), Err(GameError::PersistenceUnavailable(_))));
    }
}
