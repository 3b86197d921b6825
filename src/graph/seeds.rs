/*
seeds.rs

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

//! Load the word graph from a `seeds.json` file.
//!
//! The file lists the recipes (`pairs`) and optional details about the words (`elements`):
//!
//! ```json
//! {
//!   "elements": [
//!     { "name": "Fire", "emoji": "🔥", "starter": true },
//!     { "name": "Water", "emoji": "💧", "starter": true }
//!   ],
//!   "pairs": [
//!     { "left": "fire", "right": "water", "result": "steam", "emoji": "💨" }
//!   ]
//! }
//! ```
//!
//! Entries are validated when loading: empty names and duplicated recipes are rejected, so the
//! generator only sees canonical, well-formed data.
//! Emoji that do not look like emoji are dropped and replaced by a placeholder.
//! Word tiers are computed from the declared starters.

use log::{Level, debug, info, log_enabled, warn};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

use super::{MemoryGraph, RecipeEdge, RecipeSource, Word, WordId};
use crate::generator::depths::{self, Depths};
use crate::text;

/// Words from this tier on are goals unless the seed file says otherwise.
const GOAL_TIER: u32 = 3;

/// Type of errors.
#[derive(Debug, Error)]
pub enum SeedFileError {
    /// The file cannot be read.
    #[error("cannot read the seed file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a valid seed document.
    #[error("invalid seed file: {0}")]
    Json(#[from] serde_json::Error),

    /// A name is empty once canonicalized.
    #[error("{section} entry {index} has an empty {field}")]
    EmptyName {
        section: &'static str,
        index: usize,
        field: &'static str,
    },

    /// The same recipe is listed twice.
    #[error("duplicate recipe {left} + {right} -> {result}")]
    DuplicatePair {
        left: String,
        right: String,
        result: String,
    },

    /// No element is flagged as a starter.
    #[error("no starter elements defined in the seed file")]
    NoStarters,
}

#[derive(Deserialize, Debug, Default)]
struct SeedDocument {
    #[serde(default)]
    elements: Vec<SeedElement>,
    #[serde(default)]
    pairs: Vec<SeedPair>,
}

#[derive(Deserialize, Debug)]
struct SeedElement {
    name: String,
    emoji: Option<String>,
    starter: Option<bool>,
    tier: Option<u32>,
    goal: Option<bool>,
}

#[derive(Deserialize, Debug)]
struct SeedPair {
    left: String,
    right: String,
    result: String,
    emoji: Option<String>,
    #[serde(default)]
    source: RecipeSource,
}

#[derive(Debug, Default)]
struct ElementMeta {
    emoji: Option<String>,
    is_starter: bool,
    tier: Option<u32>,
    is_goal: Option<bool>,
}

/// Summary of a loaded seed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedStats {
    pub recipes: usize,
    pub words: usize,
    pub starters: usize,

    /// Words reachable from the starters, starters included.
    pub reachable: usize,

    /// Words that received the placeholder emoji.
    pub missing_emoji: Vec<String>,
}

/// Return the canonical name, or an error when it is empty.
fn required_name(
    raw: &str,
    section: &'static str,
    index: usize,
    field: &'static str,
) -> Result<String, SeedFileError> {
    let name: String = text::normalize_name(raw);
    if name.is_empty() {
        return Err(SeedFileError::EmptyName {
            section,
            index,
            field,
        });
    }
    Ok(name)
}

/// Return the trimmed emoji when it looks like one.
fn valid_emoji(raw: Option<&str>) -> Option<String> {
    raw.filter(|e| text::is_emoji_like(e))
        .map(|e| e.trim().to_string())
}

/// Load and validate a seed file.
pub fn load_seed_file(path: &Path) -> Result<(MemoryGraph, SeedStats), SeedFileError> {
    let file: File = File::open(path)?;
    let document: SeedDocument = serde_json::from_reader(BufReader::new(file))?;
    debug!("Seed file {path:?} parsed");
    build_graph(document)
}

/// Load and validate a seed document held in a string.
pub fn parse_seed_document(json: &str) -> Result<(MemoryGraph, SeedStats), SeedFileError> {
    build_graph(serde_json::from_str(json)?)
}

fn build_graph(document: SeedDocument) -> Result<(MemoryGraph, SeedStats), SeedFileError> {
    let mut meta: BTreeMap<String, ElementMeta> = BTreeMap::new();
    let mut recipes: Vec<(RecipeEdge, RecipeSource)> = Vec::with_capacity(document.pairs.len());
    let mut seen: HashSet<String> = HashSet::new();

    for (index, pair) in document.pairs.iter().enumerate() {
        let left: String = required_name(&pair.left, "pairs", index, "left")?;
        let right: String = required_name(&pair.right, "pairs", index, "right")?;
        let result: String = required_name(&pair.result, "pairs", index, "result")?;

        if !seen.insert(format!("{}::{result}", text::pair_key(&left, &right))) {
            return Err(SeedFileError::DuplicatePair {
                left,
                right,
                result,
            });
        }

        for name in [&left, &right] {
            meta.entry(name.clone()).or_default();
        }
        let result_meta: &mut ElementMeta = meta.entry(result.clone()).or_default();
        if result_meta.emoji.is_none() {
            result_meta.emoji = valid_emoji(pair.emoji.as_deref());
        }

        recipes.push((
            RecipeEdge {
                left,
                right,
                result,
            },
            pair.source,
        ));
    }
    if recipes.is_empty() {
        warn!("The seed file has no recipes");
    }

    for (index, element) in document.elements.iter().enumerate() {
        let name: String = required_name(&element.name, "elements", index, "name")?;
        let entry: &mut ElementMeta = meta.entry(name).or_default();
        if let Some(emoji) = valid_emoji(element.emoji.as_deref()) {
            entry.emoji = Some(emoji);
        }
        if let Some(starter) = element.starter {
            entry.is_starter = starter;
        }
        if element.tier.is_some() {
            entry.tier = element.tier;
        }
        if element.goal.is_some() {
            entry.is_goal = element.goal;
        }
    }

    let starters: Vec<&String> = meta
        .iter()
        .filter(|(_, m)| m.is_starter)
        .map(|(name, _)| name)
        .collect();
    if starters.is_empty() {
        return Err(SeedFileError::NoStarters);
    }

    let mut edges: Vec<RecipeEdge> = recipes.iter().map(|(e, _)| e.clone()).collect();
    depths::canonical_order(&mut edges);
    let tiers: Depths = depths::compute_depths(&starters, &edges);

    let mut missing_emoji: Vec<String> = Vec::new();
    let mut words: Vec<Word> = Vec::with_capacity(meta.len());
    for (id, (name, m)) in (1..=meta.len() as WordId).zip(meta.iter()) {
        let emoji: String = match &m.emoji {
            Some(e) => e.clone(),
            None => {
                missing_emoji.push(name.clone());
                text::SEED_FALLBACK_EMOJI.to_string()
            }
        };
        let tier: Option<u32> = tiers.depth(name).or(m.tier);
        words.push(Word {
            id,
            name: name.clone(),
            emoji: Some(emoji),
            tier,
            is_starter: m.is_starter,
            is_goal: m
                .is_goal
                .unwrap_or_else(|| tier.is_some_and(|t| t >= GOAL_TIER)),
        });
    }

    if !missing_emoji.is_empty() {
        let shown: Vec<&str> = missing_emoji.iter().take(20).map(String::as_str).collect();
        warn!(
            "Assigned placeholder emoji to {} words: {}{}",
            missing_emoji.len(),
            shown.join(", "),
            if missing_emoji.len() > 20 { ", ..." } else { "" }
        );
    }

    let stats: SeedStats = SeedStats {
        recipes: recipes.len(),
        words: words.len(),
        starters: starters.len(),
        reachable: tiers.reachable_count(),
        missing_emoji,
    };
    info!(
        "Loaded {} recipes spanning {} words (starters: {}, reachable: {})",
        stats.recipes, stats.words, stats.starters, stats.reachable
    );
    if log_enabled!(Level::Debug) {
        for word in &words {
            debug!("{:>4} {} tier={:?}", word.id, word.name, word.tier);
        }
    }

    Ok((MemoryGraph::from_parts(words, recipes), stats))
}
