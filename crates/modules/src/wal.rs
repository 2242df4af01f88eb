// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write-ahead log implementations

use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use stele_core::{Event, EventBody, EventList, ModuleError, RetentionIndex, Wal};

/// WAL that persists nothing and replays nothing. The default for nodes
/// that do not need durability.
#[derive(Debug, Default)]
pub struct NullWal;

impl NullWal {
    pub fn new() -> Self {
        Self
    }
}

impl Wal for NullWal {
    fn load_all(
        &mut self,
        _cb: &mut dyn FnMut(RetentionIndex, Event),
    ) -> Result<(), ModuleError> {
        Ok(())
    }

    fn apply_events(&mut self, _batch: EventList) -> Result<(), ModuleError> {
        Ok(())
    }
}

/// One persisted event per line.
#[derive(Debug, Serialize, Deserialize)]
struct WalRecord {
    retention_index: RetentionIndex,
    event: Event,
}

/// File-backed WAL, one JSON record per line.
///
/// `PersistEntry` appends and flushes, `Truncate` drops records below the
/// retention index by rewriting the file, `load_all` replays in append
/// order.
#[derive(Debug)]
pub struct JsonWal {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl JsonWal {
    /// Open the WAL at `path`, creating the file if absent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ModuleError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, writer: BufWriter::new(file) })
    }

    fn append(&mut self, record: &WalRecord) -> Result<(), ModuleError> {
        let line = serde_json::to_string(record)
            .map_err(|e| ModuleError::new(format!("could not encode WAL record: {e}")))?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    fn records(&self) -> Result<Vec<WalRecord>, ModuleError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        let mut records = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(
                serde_json::from_str(&line)
                    .map_err(|e| ModuleError::new(format!("corrupt WAL record: {e}")))?,
            );
        }
        Ok(records)
    }

    fn truncate(&mut self, retention_index: RetentionIndex) -> Result<(), ModuleError> {
        let kept: Vec<WalRecord> = self
            .records()?
            .into_iter()
            .filter(|record| record.retention_index >= retention_index)
            .collect();
        let file = OpenOptions::new().write(true).truncate(true).open(&self.path)?;
        self.writer = BufWriter::new(file);
        for record in &kept {
            self.append(record)?;
        }
        Ok(())
    }
}

impl Wal for JsonWal {
    fn load_all(
        &mut self,
        cb: &mut dyn FnMut(RetentionIndex, Event),
    ) -> Result<(), ModuleError> {
        for record in self.records()? {
            cb(record.retention_index, record.event);
        }
        Ok(())
    }

    fn apply_events(&mut self, batch: EventList) -> Result<(), ModuleError> {
        for event in batch {
            match event.body {
                EventBody::PersistEntry { event, retention_index } => {
                    self.append(&WalRecord { retention_index, event: *event })?;
                }
                EventBody::Truncate { retention_index } => {
                    self.truncate(retention_index)?;
                }
                other => {
                    return Err(ModuleError::new(format!(
                        "unexpected event for WAL: {}",
                        other.name()
                    )))
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "wal_tests.rs"]
mod tests;
