//! Score ledger
//!
//! Append-only history of final scores, one bare integer per line. Other
//! games in the suite write richer multi-line records to similar files, so
//! readers skip anything that isn't a plain non-negative integer.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default ledger location, relative to the working directory
pub const DEFAULT_LEDGER_PATH: &str = "data/clockstorm_score.txt";

/// Ledger storage failure
#[derive(Debug, thiserror::Error)]
#[error("score ledger {path}: {source}")]
pub struct LedgerError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl LedgerError {
    fn new(path: &Path, source: io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Aggregates over every recorded score
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerStats {
    pub games: usize,
    pub high_score: u32,
    pub average: f64,
}

impl LedgerStats {
    pub fn from_scores(scores: &[u32]) -> Self {
        if scores.is_empty() {
            return Self::default();
        }
        let total: u64 = scores.iter().map(|&s| u64::from(s)).sum();
        Self {
            games: scores.len(),
            high_score: scores.iter().copied().max().unwrap_or(0),
            average: total as f64 / scores.len() as f64,
        }
    }
}

/// Durable store of final scores
pub trait ScoreLedger {
    /// Record one finished game
    fn append(&mut self, score: u32) -> Result<(), LedgerError>;

    /// Every recorded score, oldest first
    fn scores(&self) -> Result<Vec<u32>, LedgerError>;

    fn stats(&self) -> Result<LedgerStats, LedgerError> {
        Ok(LedgerStats::from_scores(&self.scores()?))
    }
}

/// Parse ledger text, ignoring blank and malformed lines
pub fn parse_scores(text: &str) -> Vec<u32> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|line| line.parse::<u32>().ok())
        .collect()
}

/// Newline-delimited text file ledger
#[derive(Debug, Clone)]
pub struct FileLedger {
    path: PathBuf,
}

impl FileLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreLedger for FileLedger {
    fn append(&mut self, score: u32) -> Result<(), LedgerError> {
        let err = |e: io::Error| LedgerError::new(&self.path, e);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(err)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(err)?;
        writeln!(file, "{}", score).map_err(err)?;

        log::info!("Recorded score {} to {}", score, self.path.display());
        Ok(())
    }

    fn scores(&self) -> Result<Vec<u32>, LedgerError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(parse_scores(&text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(LedgerError::new(&self.path, e)),
        }
    }
}

/// In-process ledger for tests and throwaway runs
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    pub entries: Vec<u32>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreLedger for MemoryLedger {
    fn append(&mut self, score: u32) -> Result<(), LedgerError> {
        self.entries.push(score);
        Ok(())
    }

    fn scores(&self) -> Result<Vec<u32>, LedgerError> {
        Ok(self.entries.clone())
    }
}

impl<L: ScoreLedger + ?Sized> ScoreLedger for Box<L> {
    fn append(&mut self, score: u32) -> Result<(), LedgerError> {
        (**self).append(score)
    }

    fn scores(&self) -> Result<Vec<u32>, LedgerError> {
        (**self).scores()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_garbage() {
        let scores = parse_scores("100\nfoo\n\n250");
        assert_eq!(scores, vec![100, 250]);
        assert_eq!(LedgerStats::from_scores(&scores).high_score, 250);
    }

    #[test]
    fn test_parse_skips_structured_records() {
        let text = "Date and Time: 2024-12-01 10:15:00\n\
                    Games Played: 3\n\
                    Correct First Attempt: 12\n\
                    Correct Second Attempt: 4\n\
                    Incorrect: 2\n\
                    42\n\
                    -7\n\
                    +5\n  17  \n";
        assert_eq!(parse_scores(text), vec![42, 17]);
    }

    #[test]
    fn test_stats() {
        let stats = LedgerStats::from_scores(&[4, 10, 1]);
        assert_eq!(stats.games, 3);
        assert_eq!(stats.high_score, 10);
        assert!((stats.average - 5.0).abs() < 1e-9);

        assert_eq!(LedgerStats::from_scores(&[]), LedgerStats::default());
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = FileLedger::new(dir.path().join("nope.txt"));
        assert!(ledger.scores().unwrap().is_empty());
        assert_eq!(ledger.stats().unwrap().high_score, 0);
    }

    #[test]
    fn test_file_append_is_durable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("scores.txt");
        let mut ledger = FileLedger::new(&path);
        ledger.append(12).unwrap();
        ledger.append(3).unwrap();

        let reopened = FileLedger::new(&path);
        assert_eq!(reopened.scores().unwrap(), vec![12, 3]);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "12\n3\n");
    }

    #[test]
    fn test_append_keeps_foreign_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.txt");
        std::fs::write(&path, "100\nfoo\n\n250\n").unwrap();

        let mut ledger = FileLedger::new(&path);
        ledger.append(7).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "100\nfoo\n\n250\n7\n"
        );
        let stats = ledger.stats().unwrap();
        assert_eq!(stats.high_score, 250);
        assert_eq!(stats.games, 3);
    }

    #[test]
    fn test_unreadable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory can't be read as a ledger file
        let ledger = FileLedger::new(dir.path());
        assert!(ledger.scores().is_err());
    }

    #[test]
    fn test_memory_ledger() {
        let mut ledger = MemoryLedger::new();
        ledger.append(5).unwrap();
        ledger.append(9).unwrap();
        assert_eq!(ledger.stats().unwrap().high_score, 9);
    }
}
