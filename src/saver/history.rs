/*
history.rs

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

//! Record of the puzzle selected for each seed.
//!
//! A [`HistoryRecord`] is created the first time a seed is generated and is never updated.
//! Later generations for the same seed replay the target and starters it stores.
//! Stores must reject a second record for the same seed with [`CreateOutcome::Conflict`], which
//! is how concurrent first generations converge on one puzzle.

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Mutex;

use crate::error::StoreError;
use crate::graph::WordId;

/// Selection made for a seed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    /// Canonical seed. Unique in the store.
    pub seed: String,

    /// Selected target.
    pub target_word_id: WordId,

    /// Minimum depth requested when the target was selected.
    pub max_depth_used: u32,

    /// Selected starters, in display order.
    pub starter_word_ids: Vec<WordId>,

    /// When the selection was made. Used to avoid repeating recent targets.
    pub selected_on: DateTime<Utc>,
}

/// Result of [`HistoryStore::try_create_record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The record was stored.
    Created(HistoryRecord),

    /// A record already exists for the seed. The provided record was discarded.
    Conflict,
}

/// Persistence of the [`HistoryRecord`] objects.
pub trait HistoryStore {
    /// Return the record for the seed, if any.
    fn get_record(&self, seed: &str) -> Result<Option<HistoryRecord>, StoreError>;

    /// Store the record unless one already exists for its seed. Must be atomic.
    fn try_create_record(&self, record: HistoryRecord) -> Result<CreateOutcome, StoreError>;

    /// Return the records selected at or after `since`.
    fn recent_records(&self, since: DateTime<Utc>) -> Result<Vec<HistoryRecord>, StoreError>;

    /// Delete the record for the seed. Return whether a record existed.
    fn clear_record(&self, seed: &str) -> Result<bool, StoreError>;
}

/// In-memory [`HistoryStore`].
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    records: Mutex<HashMap<String, HistoryRecord>>,
}

impl MemoryHistoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Whether the store has no record.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn get_record(&self, seed: &str) -> Result<Option<HistoryRecord>, StoreError> {
        let records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(records.get(seed).cloned())
    }

    fn try_create_record(&self, record: HistoryRecord) -> Result<CreateOutcome, StoreError> {
        let mut records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        match records.entry(record.seed.clone()) {
            Entry::Occupied(_) => {
                debug!("History record for seed '{}' already exists", record.seed);
                Ok(CreateOutcome::Conflict)
            }
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(CreateOutcome::Created(record))
            }
        }
    }

    fn recent_records(&self, since: DateTime<Utc>) -> Result<Vec<HistoryRecord>, StoreError> {
        let records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        let mut recent: Vec<HistoryRecord> = records
            .values()
            .filter(|r| r.selected_on >= since)
            .cloned()
            .collect();
        recent.sort_by(|a, b| a.seed.cmp(&b.seed));
        Ok(recent)
    }

    fn clear_record(&self, seed: &str) -> Result<bool, StoreError> {
        let mut records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(records.remove(seed).is_some())
    }
}
