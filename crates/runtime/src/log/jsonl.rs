//! Append-only JSON-lines event file.
//!
//! One [`LoggedEvent`] per line:
//! ```text
//! {"seq":0,"at":1000,"event":{"Spotted":{"actor":1,"target":0}}}
//! {"seq":1,"at":1000,"event":{"Hit":{"attacker":1,"defender":0,"damage":4}}}
//! ```
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::LoggedEvent;
use crate::error::{Result, RuntimeError};

pub struct JsonlEventWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    written: u64,
}

impl JsonlEventWriter {
    /// Creates a new log file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns error if the file already exists (prevents accidental overwrites).
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if path.exists() {
            return Err(RuntimeError::LogAlreadyExists(path.display().to_string()));
        }

        let file = OpenOptions::new().create_new(true).write(true).open(path)?;
        tracing::debug!("Created event log: {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    pub fn append(&mut self, entry: &LoggedEvent) -> Result<()> {
        serde_json::to_writer(&mut self.writer, entry)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of events appended through this writer.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl Drop for JsonlEventWriter {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!("Failed to flush event log {}: {}", self.path.display(), e);
        }
    }
}

/// Reads every event back from a JSON-lines file. Blank lines are skipped.
pub fn read_events(path: impl AsRef<Path>) -> Result<Vec<LoggedEvent>> {
    let reader = BufReader::new(File::open(path)?);
    let mut events = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        events.push(serde_json::from_str(&line)?);
    }
    Ok(events)
}
