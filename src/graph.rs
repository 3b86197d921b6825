/*
graph.rs

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

//! The word graph: words and the recipes that combine them.
//!
//! The generator only reads the graph, through the [`GraphStore`] trait.
//! [`MemoryGraph`] is the in-memory implementation.
//! It can grow between two generations (players discovering new recipes), which is why it uses
//! interior mutability.
//! Use [`seeds::load_seed_file`] to build a [`MemoryGraph`] from a `seeds.json` file.

pub mod seeds;

use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use strum_macros::Display;

use crate::error::StoreError;
use crate::text;

/// Word identifier.
pub type WordId = u32;

/// A word of the crafting game.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// Identifier.
    pub id: WordId,

    /// Canonical name (see [`text::normalize_name`]).
    pub name: String,

    /// Display emoji, if any.
    pub emoji: Option<String>,

    /// Depth of the word from the starters declared in the seed file.
    pub tier: Option<u32>,

    /// Whether the word can be offered as a starter.
    pub is_starter: bool,

    /// Whether the word is a good puzzle target.
    pub is_goal: bool,
}

/// Combination rule `left + right -> result`. The order of `left` and `right` is not
/// significant.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecipeEdge {
    pub left: String,
    pub right: String,
    pub result: String,
}

impl RecipeEdge {
    /// Create an edge from canonicalized names.
    pub fn new(left: &str, right: &str, result: &str) -> Self {
        Self {
            left: text::normalize_name(left),
            right: text::normalize_name(right),
            result: text::normalize_name(result),
        }
    }
}

/// Where a recipe comes from.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    Display,
    Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RecipeSource {
    /// Shipped with the game (seed file).
    #[default]
    Canon,

    /// Added by an operator.
    Manual,

    /// Produced while playing. Not trusted for puzzle generation.
    Generated,
}

/// Read access to the word graph.
pub trait GraphStore {
    /// Return all the words, with canonical names.
    fn list_words(&self) -> Result<Vec<Word>, StoreError>;

    /// Return the recipes whose source is one of `sources`.
    fn list_edges(&self, sources: &[RecipeSource]) -> Result<Vec<RecipeEdge>, StoreError>;
}

/// Contents of a [`MemoryGraph`].
#[derive(Debug, Default)]
struct GraphData {
    words: Vec<Word>,
    index: HashMap<String, usize>,
    recipes: Vec<(RecipeEdge, RecipeSource)>,
    next_id: WordId,
}

impl GraphData {
    /// Return the word with the given canonical name, creating it if needed.
    fn word_mut(&mut self, name: &str) -> &mut Word {
        let pos: usize = match self.index.get(name) {
            Some(pos) => *pos,
            None => {
                self.next_id += 1;
                self.words.push(Word {
                    id: self.next_id,
                    name: name.to_string(),
                    emoji: None,
                    tier: None,
                    is_starter: false,
                    is_goal: false,
                });
                self.index.insert(name.to_string(), self.words.len() - 1);
                self.words.len() - 1
            }
        };
        &mut self.words[pos]
    }
}

/// In-memory [`GraphStore`].
#[derive(Debug, Default)]
pub struct MemoryGraph {
    data: RwLock<GraphData>,
}

impl MemoryGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph from already validated words and recipes.
    ///
    /// Words referenced by a recipe but missing from `words` are created.
    pub fn from_parts(words: Vec<Word>, recipes: Vec<(RecipeEdge, RecipeSource)>) -> Self {
        let mut data: GraphData = GraphData {
            next_id: words.iter().map(|w| w.id).max().unwrap_or(0),
            ..GraphData::default()
        };
        for word in words {
            data.index.insert(word.name.clone(), data.words.len());
            data.words.push(word);
        }
        for (edge, _) in &recipes {
            for name in [&edge.left, &edge.right, &edge.result] {
                data.word_mut(name);
            }
        }
        data.recipes = recipes;
        Self {
            data: RwLock::new(data),
        }
    }

    /// Create a graph from a list of starter names and `(left, right, result)` canonical recipes.
    ///
    /// Convenient for tests and small hand-written graphs.
    pub fn from_recipes(starters: &[&str], recipes: &[(&str, &str, &str)]) -> Self {
        let graph: MemoryGraph = MemoryGraph::new();
        for name in starters {
            // A fresh lock cannot be poisoned
            let _ = graph.add_word(name, None, true);
        }
        for (left, right, result) in recipes {
            let _ = graph.add_recipe(left, right, result, RecipeSource::Canon);
        }
        graph
    }

    /// Add a word, or update the emoji and starter flag of an existing word. Return its id.
    pub fn add_word(
        &self,
        name: &str,
        emoji: Option<&str>,
        is_starter: bool,
    ) -> Result<WordId, StoreError> {
        let name: String = text::normalize_name(name);
        let mut data = self.data.write().map_err(|_| StoreError::Poisoned)?;
        let word: &mut Word = data.word_mut(&name);
        if emoji.is_some() {
            word.emoji = emoji.map(str::to_string);
        }
        word.is_starter = is_starter;
        Ok(word.id)
    }

    /// Add a recipe. Unknown words are created.
    pub fn add_recipe(
        &self,
        left: &str,
        right: &str,
        result: &str,
        source: RecipeSource,
    ) -> Result<(), StoreError> {
        let edge: RecipeEdge = RecipeEdge::new(left, right, result);
        let mut data = self.data.write().map_err(|_| StoreError::Poisoned)?;
        for name in [&edge.left, &edge.right, &edge.result] {
            data.word_mut(name);
        }
        debug!(
            "New {source} recipe {} + {} -> {}",
            edge.left, edge.right, edge.result
        );
        data.recipes.push((edge, source));
        Ok(())
    }

    /// Return the word with the given name.
    pub fn word(&self, name: &str) -> Option<Word> {
        let data = self.data.read().ok()?;
        let pos: usize = *data.index.get(&text::normalize_name(name))?;
        Some(data.words[pos].clone())
    }

    /// Number of words and number of recipes.
    pub fn len(&self) -> (usize, usize) {
        match self.data.read() {
            Ok(data) => (data.words.len(), data.recipes.len()),
            Err(_) => (0, 0),
        }
    }

    /// Whether the graph has no words.
    pub fn is_empty(&self) -> bool {
        self.len().0 == 0
    }
}

impl GraphStore for MemoryGraph {
    fn list_words(&self) -> Result<Vec<Word>, StoreError> {
        let data = self.data.read().map_err(|_| StoreError::Poisoned)?;
        let mut words: Vec<Word> = data.words.clone();
        words.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(words)
    }

    fn list_edges(&self, sources: &[RecipeSource]) -> Result<Vec<RecipeEdge>, StoreError> {
        let data = self.data.read().map_err(|_| StoreError::Poisoned)?;
        Ok(data
            .recipes
            .iter()
            .filter(|(_, source)| sources.contains(source))
            .map(|(edge, _)| edge.clone())
            .collect())
    }
}
