//! Where the sender's secret payload comes from.
//!
//! The payload is whatever the latest reading of a time series says. A
//! [`ReadingLog`] keeps those readings as JSON lines on disk:
//!
//! ```text
//! {"timestamp": 1718000000, "temperature": 23.7}
//! {"timestamp": 1718000060, "temperature": 24.1}
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::relay::error::RelayError;

/// Supplies the secret to hide in the next outgoing message.
pub trait PayloadSource: Send + Sync {
    /// Returns the current secret. An empty string means "nothing to hide".
    fn latest(&self) -> Result<String, RelayError>;
}

/// A fixed secret.
#[derive(Debug, Clone)]
pub struct StaticSource(pub String);

impl PayloadSource for StaticSource {
    fn latest(&self) -> Result<String, RelayError> {
        Ok(self.0.clone())
    }
}

/// One entry of the time series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Reading {
    pub timestamp: i64,
    pub temperature: f64,
}

impl Reading {
    /// Temperature as sent in the hidden payload: truncated toward zero.
    pub fn render(&self) -> String {
        (self.temperature.trunc() as i64).to_string()
    }
}

/// JSON-lines file of [`Reading`]s; the newest timestamp wins.
#[derive(Debug, Clone)]
pub struct ReadingLog {
    path: PathBuf,
}

impl ReadingLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses all well-formed readings. Malformed lines are skipped.
    pub fn readings(&self) -> Result<Vec<Reading>, RelayError> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            RelayError::Source(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        Ok(parse_readings(&content))
    }

    /// Reading with the greatest timestamp, if any.
    pub fn newest(&self) -> Result<Option<Reading>, RelayError> {
        Ok(self
            .readings()?
            .into_iter()
            .max_by_key(|reading| reading.timestamp))
    }
}

impl PayloadSource for ReadingLog {
    fn latest(&self) -> Result<String, RelayError> {
        Ok(self
            .newest()?
            .map(|reading| reading.render())
            .unwrap_or_default())
    }
}

fn parse_readings(content: &str) -> Vec<Reading> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(index, line)| match serde_json::from_str::<Reading>(line) {
            Ok(reading) => Some(reading),
            Err(e) => {
                warn!(line = index + 1, error = %e, "Skipping malformed reading");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_log(content: &str) -> (tempfile::TempDir, ReadingLog) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readings.jsonl");
        std::fs::write(&path, content).unwrap();
        (dir, ReadingLog::new(path))
    }

    #[test]
    fn test_static_source() {
        assert_eq!(StaticSource("42".to_string()).latest().unwrap(), "42");
    }

    #[test]
    fn test_render_truncates() {
        let reading = |temperature| Reading {
            timestamp: 0,
            temperature,
        };
        assert_eq!(reading(23.7).render(), "23");
        assert_eq!(reading(-4.9).render(), "-4");
        assert_eq!(reading(0.0).render(), "0");
    }

    #[test]
    fn test_newest_timestamp_wins() {
        let (_dir, log) = write_log(
            "{\"timestamp\": 200, \"temperature\": 25.2}\n\
             {\"timestamp\": 300, \"temperature\": 26.9}\n\
             {\"timestamp\": 100, \"temperature\": 21.0}\n",
        );

        assert_eq!(log.latest().unwrap(), "26");
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let (_dir, log) = write_log(
            "{\"timestamp\": 1, \"temperature\": 19.5}\n\
             not json\n\
             \n\
             {\"timestamp\": 2}\n",
        );

        assert_eq!(log.readings().unwrap().len(), 1);
        assert_eq!(log.latest().unwrap(), "19");
    }

    #[test]
    fn test_empty_log_gives_empty_secret() {
        let (_dir, log) = write_log("");
        assert_eq!(log.latest().unwrap(), "");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = ReadingLog::new(dir.path().join("nope.jsonl"));
        assert!(matches!(log.latest(), Err(RelayError::Source(_))));
    }
}
