/*
puzzle.rs

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

//! Daily puzzle returned to the game.
//!
//! The objects are serialized in JSON (camel case keys) for the web client.

use serde::{Deserialize, Serialize};

use crate::graph::{RecipeEdge, Word, WordId};
use crate::text;

/// Starter word as displayed in the catalog.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StarterWord {
    pub id: WordId,
    pub name: String,

    /// Never empty: the fallback glyph replaces a missing emoji.
    pub emoji: String,

    pub tier: Option<u32>,
}

impl From<&Word> for StarterWord {
    fn from(word: &Word) -> Self {
        Self {
            id: word.id,
            name: word.name.clone(),
            emoji: text::ensure_emoji(word.emoji.as_deref()),
            tier: word.tier,
        }
    }
}

/// Pair of ingredients.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RecipePair {
    pub left: String,
    pub right: String,
}

/// Word the player must discover.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyTarget {
    pub name: String,
    pub element_id: WordId,
    pub emoji: String,

    /// Minimum number of combinations from the starters.
    pub depth: u32,

    /// Number of steps in [`DailyTarget::path`].
    pub steps: usize,

    /// Shortest path, in playing order.
    pub path: Vec<RecipeEdge>,

    /// Ingredient pairs of the path, without duplicates.
    pub recipes: Vec<RecipePair>,

    /// Starters consumed by the path.
    pub required_starters: Vec<String>,
}

/// Puzzle of the day.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyPuzzle {
    /// Canonical seed.
    pub seed: String,
    pub starters: Vec<StarterWord>,
    pub starter_count: usize,
    pub target: DailyTarget,

    /// Number of words reachable from the starters, starters included.
    pub reachable_count: usize,
}

impl DailyPuzzle {
    /// Whether every required starter is offered to the player.
    pub fn is_solvable(&self) -> bool {
        self.target
            .required_starters
            .iter()
            .all(|r| self.starters.iter().any(|s| &s.name == r))
    }
}
