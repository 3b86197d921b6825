/*
error.rs

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

//! Error types.
//!
//! [`DailyError`] is what [`crate::generator::daily::DailyGenerator::generate`] returns.
//! Configuration errors are content problems an operator must fix (empty graph, no starters, or a
//! graph too shallow for the requested depth).
//! Store failures come from the graph or history backends.
//! A lost persistence race is not an error: see [`crate::saver::history::CreateOutcome`].

use thiserror::Error;

use crate::graph::WordId;

/// Failure reported by a graph or history store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error while reading or writing the backing file.
    #[error("store i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document cannot be parsed or written.
    #[error("store serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Another thread panicked while holding the store lock.
    #[error("store lock is poisoned")]
    Poisoned,

    /// Catch-all for backend specific failures.
    #[error("store error: {0}")]
    Other(String),
}

/// Failure of a daily puzzle generation.
#[derive(Debug, Error)]
pub enum DailyError {
    /// The graph store returned no words.
    #[error("word graph is empty; seed the graph before generating a daily puzzle")]
    EmptyGraph,

    /// No word is starter-eligible, and none of the fallback starters exist.
    #[error("no starter words are available in the graph")]
    NoStarters,

    /// No word reaches the minimum depth under any attempted starter set.
    #[error("no target satisfies the required depth of {min_depth}")]
    NoEligibleTarget { min_depth: u32 },

    /// The selected target cannot be produced from the selected starters.
    #[error("target word '{target}' is not reachable from the selected starters")]
    TargetUnreachable { target: String },

    /// A history record points at a word that no longer exists in the graph.
    #[error("history for seed '{seed}' references unknown target word id {target_id}")]
    UnknownHistoryTarget { seed: String, target_id: WordId },

    /// The graph or history store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DailyError {
    /// Whether the error is a content or configuration problem, as opposed to a store failure.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, DailyError::Store(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors() {
        assert!(DailyError::EmptyGraph.is_configuration());
        assert!(DailyError::NoEligibleTarget { min_depth: 3 }.is_configuration());
        assert!(!DailyError::Store(StoreError::Poisoned).is_configuration());
    }

    #[test]
    fn messages_are_single_sentences() {
        assert_eq!(
            DailyError::NoEligibleTarget { min_depth: 3 }.to_string(),
            "no target satisfies the required depth of 3"
        );
        assert_eq!(
            DailyError::NoStarters.to_string(),
            "no starter words are available in the graph"
        );
    }
}
