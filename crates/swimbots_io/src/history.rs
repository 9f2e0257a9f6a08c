//! Gzip-compressed JSON files holding a whole run.

use crate::error::{IoError, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use swimbots_core::config::SimConfig;
use swimbots_core::snapshot::History;

/// A persisted run: every snapshot plus what is needed to reproduce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryFile {
    /// [`SimConfig::fingerprint`] of the run.
    pub fingerprint: String,
    pub seed: u64,
    /// RFC 3339 creation time.
    pub created_at: String,
    pub snapshots: History,
}

impl HistoryFile {
    #[must_use]
    pub fn new(config: &SimConfig, snapshots: History) -> Self {
        Self {
            fingerprint: config.fingerprint(),
            seed: config.run.seed,
            created_at: chrono::Utc::now().to_rfc3339(),
            snapshots,
        }
    }

    /// Number of simulated generations, excluding generation 0.
    #[must_use]
    pub fn generations(&self) -> usize {
        self.snapshots.len().saturating_sub(1)
    }

    /// Whether this file was produced with `config`.
    #[must_use]
    pub fn matches(&self, config: &SimConfig) -> bool {
        self.fingerprint == config.fingerprint()
    }
}

/// Writes `file` as gzip-compressed JSON, creating parent directories.
pub fn save_history<P: AsRef<Path>>(path: P, file: &HistoryFile) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let out = File::create(path).map_err(|e| {
        IoError::FileSystem(e).with_context(format!("creating {}", path.display()))
    })?;
    let mut encoder = GzEncoder::new(BufWriter::new(out), Compression::default());
    serde_json::to_writer(&mut encoder, file)?;
    encoder
        .finish()
        .and_then(|mut w| w.flush())
        .map_err(|e| IoError::compression(e.to_string()))?;

    tracing::info!(
        path = %path.display(),
        snapshots = file.snapshots.len(),
        "History saved"
    );
    Ok(())
}

pub fn load_history<P: AsRef<Path>>(path: P) -> Result<HistoryFile> {
    let path = path.as_ref();
    let input = File::open(path)
        .map_err(|e| IoError::FileSystem(e).with_context(format!("opening {}", path.display())))?;
    let mut decoder = GzDecoder::new(BufReader::new(input));
    let mut json = Vec::new();
    decoder
        .read_to_end(&mut json)
        .map_err(|e| IoError::compression(e.to_string()))?;
    Ok(serde_json::from_slice(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use swimbots_core::config::{PondConfig, RunConfig};
    use swimbots_core::simulation::simulate_pond;

    #[test]
    fn test_history_file_round_trip() {
        let config = SimConfig {
            run: RunConfig {
                generations: 3,
                seed: 11,
                ..Default::default()
            },
            pond: PondConfig {
                initial_population: 8,
                initial_food: 8,
                ..Default::default()
            },
            ..Default::default()
        };
        let history = simulate_pond(config.clone()).unwrap();
        let file = HistoryFile::new(&config, history);
        assert_eq!(file.generations(), 3);
        assert!(file.matches(&config));

        let path = std::env::temp_dir()
            .join(format!("swimbots_history_{}", std::process::id()))
            .join("history.json.gz");
        save_history(&path, &file).unwrap();
        let loaded = load_history(&path).unwrap();
        assert_eq!(loaded, file);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_plain_file_is_not_history() {
        let path = std::env::temp_dir().join(format!("swimbots_plain_{}.gz", std::process::id()));
        std::fs::write(&path, b"{}").unwrap();
        assert!(load_history(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
