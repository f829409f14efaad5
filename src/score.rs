use std::fs;
use std::path::PathBuf;

use log::error;

const HIGH_SCORE_FILE: &str = "high_score.txt";

/// Single-integer file store for the best score across sessions.
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new() -> Self {
        HighScoreStore { path: PathBuf::from(HIGH_SCORE_FILE) }
    }

    pub fn at(path: PathBuf) -> Self {
        HighScoreStore { path }
    }

    /// Absent or unparsable files read as 0.
    pub fn load(&self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(contents) => contents.trim().parse().unwrap_or(0),
            Err(_) => 0,
        }
    }

    pub fn save(&self, score: u32) {
        if let Err(e) = fs::write(&self.path, score.to_string()) {
            error!("failed to write high score to {:?}: {}", self.path, e);
        }
    }

    /// Persists `score` iff it beats the stored one; returns the best of
    /// the two.
    pub fn record(&self, score: u32) -> u32 {
        let high = self.load();
        if score > high {
            self.save(score);
            score
        } else {
            high
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_store(name: &str) -> HighScoreStore {
        let mut path = env::temp_dir();
        path.push(format!("snake_powerups_{}_{}.txt", name, std::process::id()));
        let _ = fs::remove_file(&path);
        HighScoreStore::at(path)
    }

    #[test]
    fn missing_file_reads_as_zero() {
        let store = temp_store("missing");
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn round_trips_an_integer() {
        let store = temp_store("roundtrip");
        store.save(42);
        assert_eq!(store.load(), 42);
        let _ = fs::remove_file(&store.path);
    }

    #[test]
    fn garbage_reads_as_zero() {
        let store = temp_store("garbage");
        fs::write(&store.path, "not a number").unwrap();
        assert_eq!(store.load(), 0);
        let _ = fs::remove_file(&store.path);
    }

    #[test]
    fn record_keeps_the_larger_score() {
        let store = temp_store("record");
        assert_eq!(store.record(10), 10);
        assert_eq!(store.record(7), 10);
        assert_eq!(store.load(), 10);
        assert_eq!(store.record(12), 12);
        let _ = fs::remove_file(&store.path);
    }
}
