/*
json_history.rs

Copyright 2025 Hervé Quatremain

This file is part of Dailycraft.

Dailycraft is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Dailycraft is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Dailycraft. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Save and restore the daily history in a JSON file.
//!
//! The saved object is a map of [`HistoryRecord`] objects indexed by seed, serialized in JSON
//! format by using [`serde`].
//! The file is rewritten through a temporary file in the same directory, and renamed into place,
//! so readers never see a partial file.
//!
//! Uniqueness of the seed is guaranteed between the threads of one process.
//! Several processes must not share the same file.

use chrono::{DateTime, Utc};
use log::debug;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

use super::history::{CreateOutcome, HistoryRecord, HistoryStore};
use crate::error::StoreError;

type HistoryFile = BTreeMap<String, HistoryRecord>;

/// File-backed [`HistoryStore`].
pub struct JsonHistoryStore {
    /// Absolute path to the save file.
    save_file: PathBuf,

    /// Serializes the read-modify-write cycles.
    lock: Mutex<()>,
}

impl JsonHistoryStore {
    /// Create a [`JsonHistoryStore`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the history must be saved.
    pub fn new(mut data_dir: PathBuf) -> Self {
        data_dir.push("history.json");
        Self::with_file(data_dir)
    }

    /// Create a [`JsonHistoryStore`] object that uses the given file.
    pub fn with_file(save_file: PathBuf) -> Self {
        debug!("History file: {save_file:?}");
        Self {
            save_file,
            lock: Mutex::new(()),
        }
    }

    /// Path of the save file.
    pub fn path(&self) -> &Path {
        &self.save_file
    }

    /// Read the whole history. A missing file is an empty history.
    fn load(&self) -> Result<HistoryFile, StoreError> {
        let file: File = match File::open(&self.save_file) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(HistoryFile::new()),
                _ => return Err(StoreError::Io(error)),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Replace the whole history.
    fn store(&self, history: &HistoryFile) -> Result<(), StoreError> {
        let parent_dir: &Path = match self.save_file.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent_dir)?;

        let temp_file: NamedTempFile = NamedTempFile::new_in(parent_dir)?;
        {
            let mut writer: BufWriter<&File> = BufWriter::new(temp_file.as_file());
            serde_json::to_writer_pretty(&mut writer, history)?;
            writer.flush()?;
        }
        temp_file
            .persist(&self.save_file)
            .map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

impl HistoryStore for JsonHistoryStore {
    fn get_record(&self, seed: &str) -> Result<Option<HistoryRecord>, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(self.load()?.remove(seed))
    }

    fn try_create_record(&self, record: HistoryRecord) -> Result<CreateOutcome, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut history: HistoryFile = self.load()?;
        if history.contains_key(&record.seed) {
            return Ok(CreateOutcome::Conflict);
        }
        history.insert(record.seed.clone(), record.clone());
        self.store(&history)?;
        Ok(CreateOutcome::Created(record))
    }

    fn recent_records(&self, since: DateTime<Utc>) -> Result<Vec<HistoryRecord>, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(self
            .load()?
            .into_values()
            .filter(|r| r.selected_on >= since)
            .collect())
    }

    fn clear_record(&self, seed: &str) -> Result<bool, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut history: HistoryFile = self.load()?;
        if history.remove(seed).is_none() {
            return Ok(false);
        }
        self.store(&history)?;
        Ok(true)
    }
}
