/*
daily.rs

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

//! Generate the puzzle of the day.
//!
//! The first generation for a seed selects a target and starters, and saves that selection in
//! the history store.
//! Every later generation for the seed replays the saved selection.
//! Depths and paths are always recomputed from the current graph, so a replayed puzzle follows
//! the graph as it grows, but its target and starters never change.
//!
//! When two first generations for the same seed race, the store accepts only one record.
//! The loser discards its own selection and returns the winner's puzzle.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};

use super::depths::{self, Depths};
use super::path::{self, Path};
use super::random::SeededRandom;
use super::starters;
use super::target::{self, SelectionError};
use crate::config::GeneratorConfig;
use crate::error::{DailyError, StoreError};
use crate::graph::{GraphStore, RecipeEdge, Word, WordId};
use crate::puzzle::{DailyPuzzle, DailyTarget, RecipePair, StarterWord};
use crate::saver::history::{CreateOutcome, HistoryRecord, HistoryStore};
use crate::text;

/// Return the canonical seed: trimmed and lowercase, or the given day when the input is blank.
pub fn canonical_seed(seed_input: Option<&str>, today: NaiveDate) -> String {
    match seed_input.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_lowercase(),
        _ => today.format("%Y-%m-%d").to_string(),
    }
}

/// Snapshot of the graph used by one generation.
struct Catalog {
    /// Words sorted by name.
    words: Vec<Word>,
    by_name: HashMap<String, usize>,
    by_id: HashMap<WordId, usize>,

    /// Starter-eligible words, sorted by name, then the fallback starters.
    pool: Vec<String>,

    /// Recipes in canonical order.
    edges: Vec<RecipeEdge>,
}

impl Catalog {
    fn word(&self, name: &str) -> Option<&Word> {
        self.by_name.get(name).map(|i| &self.words[*i])
    }

    fn word_by_id(&self, id: WordId) -> Option<&Word> {
        self.by_id.get(&id).map(|i| &self.words[*i])
    }

    fn names(&self) -> Vec<String> {
        self.words.iter().map(|w| w.name.clone()).collect()
    }
}

/// Selection pipeline and history replay.
///
/// The generator borrows its stores: create them once and share them between generators.
pub struct DailyGenerator<'a, G: ?Sized, H: ?Sized> {
    graph: &'a G,
    history: &'a H,
    config: GeneratorConfig,
}

impl<'a, G, H> DailyGenerator<'a, G, H>
where
    G: GraphStore + ?Sized,
    H: HistoryStore + ?Sized,
{
    /// Create a [`DailyGenerator`] object.
    pub fn new(graph: &'a G, history: &'a H, config: GeneratorConfig) -> Self {
        Self {
            graph,
            history,
            config: config.sanitized(),
        }
    }

    /// Settings in use.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the puzzle for the seed.
    ///
    /// A blank seed is the current UTC day. A missing or zero `min_depth` uses the configured
    /// value.
    ///
    /// # Errors
    ///
    /// Configuration errors when the graph is empty, has no starters, or has no word deep enough.
    /// Store errors are passed through.
    pub fn generate(
        &self,
        seed_input: Option<&str>,
        min_depth: Option<u32>,
    ) -> Result<DailyPuzzle, DailyError> {
        self.generate_at(seed_input, min_depth, Utc::now())
    }

    /// Same as [`DailyGenerator::generate`], with `now` as the current time.
    pub fn generate_at(
        &self,
        seed_input: Option<&str>,
        min_depth: Option<u32>,
        now: DateTime<Utc>,
    ) -> Result<DailyPuzzle, DailyError> {
        let seed: String = canonical_seed(seed_input, now.date_naive());
        let min_depth: u32 = min_depth
            .filter(|d| *d > 0)
            .unwrap_or(self.config.min_depth);
        let catalog: Catalog = self.load_catalog()?;

        if let Some(record) = self.history.get_record(&seed)? {
            info!(
                "Replaying seed '{seed}' (target id {})",
                record.target_word_id
            );
            return self.assemble(&record, &catalog);
        }

        let selection: HistoryRecord = self.select(&seed, min_depth, &catalog, now)?;
        let record: HistoryRecord = match self.history.try_create_record(selection)? {
            CreateOutcome::Created(record) => {
                info!(
                    "Seed '{seed}' committed with target id {}",
                    record.target_word_id
                );
                record
            }
            CreateOutcome::Conflict => {
                warn!("Seed '{seed}' was committed concurrently, using the stored selection");
                self.history.get_record(&seed)?.ok_or_else(|| {
                    StoreError::Other(format!("record for seed '{seed}' vanished after a conflict"))
                })?
            }
        };
        self.assemble(&record, &catalog)
    }

    /// Read the graph and index it.
    fn load_catalog(&self) -> Result<Catalog, DailyError> {
        let mut words: Vec<Word> = self.graph.list_words()?;
        if words.is_empty() {
            return Err(DailyError::EmptyGraph);
        }
        for word in &mut words {
            word.name = text::normalize_name(&word.name);
        }
        words.sort_by(|a, b| a.name.cmp(&b.name));
        words.dedup_by(|a, b| a.name == b.name);

        let by_name: HashMap<String, usize> = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.name.clone(), i))
            .collect();
        let by_id: HashMap<WordId, usize> =
            words.iter().enumerate().map(|(i, w)| (w.id, i)).collect();

        let mut pool: Vec<String> = words
            .iter()
            .filter(|w| w.is_starter)
            .map(|w| w.name.clone())
            .collect();
        for name in &self.config.fallback_starters {
            if by_name.contains_key(name) && !pool.contains(name) {
                pool.push(name.clone());
            }
        }
        if pool.is_empty() {
            return Err(DailyError::NoStarters);
        }

        let mut edges: Vec<RecipeEdge> = self
            .graph
            .list_edges(&self.config.edge_sources)?
            .iter()
            .map(|e| RecipeEdge::new(&e.left, &e.right, &e.result))
            .filter(|e| !e.left.is_empty() && !e.right.is_empty() && !e.result.is_empty())
            .collect();
        depths::canonical_order(&mut edges);
        debug!(
            "Catalog: {} words, {} starters, {} recipes",
            words.len(),
            pool.len(),
            edges.len()
        );

        Ok(Catalog {
            words,
            by_name,
            by_id,
            pool,
            edges,
        })
    }

    /// Names of the targets selected during the recent window.
    fn recent_targets(
        &self,
        catalog: &Catalog,
        now: DateTime<Utc>,
    ) -> Result<HashSet<String>, DailyError> {
        let since: DateTime<Utc> = now
            .checked_sub_signed(Duration::days(i64::from(self.config.recent_window_days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Ok(self
            .history
            .recent_records(since)?
            .iter()
            .filter_map(|r| catalog.word_by_id(r.target_word_id))
            .map(|w| w.name.clone())
            .collect())
    }

    /// Run the selection pipeline: try seed-derived starter subsets, then the whole pool.
    fn select(
        &self,
        seed: &str,
        min_depth: u32,
        catalog: &Catalog,
        now: DateTime<Utc>,
    ) -> Result<HistoryRecord, DailyError> {
        let mut rng: SeededRandom = SeededRandom::new(seed);
        let avoid: HashSet<String> = self.recent_targets(catalog, now)?;
        let count: usize = self.config.starter_count;

        if catalog.pool.len() > count {
            for attempt in 1..=self.config.max_attempts {
                let order: Vec<String> = starters::shuffle_pool(&catalog.pool, &mut rng);
                let candidates: &[String] = &order[..count];
                match self.try_starters(candidates, &order, min_depth, &avoid, &mut rng, catalog) {
                    Ok((target_id, starter_ids)) => {
                        debug!("Attempt {attempt} succeeded with {candidates:?}");
                        return Ok(self.record(seed, target_id, starter_ids, min_depth, now));
                    }
                    Err(e) => debug!("Attempt {attempt} with {candidates:?}: {e}"),
                }
            }
            debug!("Falling back to the whole starter pool");
        }

        let order: Vec<String> = starters::shuffle_pool(&catalog.pool, &mut rng);
        match self.try_starters(&catalog.pool, &order, min_depth, &avoid, &mut rng, catalog) {
            Ok((target_id, starter_ids)) => {
                Ok(self.record(seed, target_id, starter_ids, min_depth, now))
            }
            Err(SelectionError::NoEligibleTarget { min_depth }) => {
                Err(DailyError::NoEligibleTarget { min_depth })
            }
        }
    }

    /// Select a target reachable from `candidates`, and the starters to offer for it.
    fn try_starters(
        &self,
        candidates: &[String],
        order: &[String],
        min_depth: u32,
        avoid: &HashSet<String>,
        rng: &mut SeededRandom,
        catalog: &Catalog,
    ) -> Result<(WordId, Vec<WordId>), SelectionError> {
        let depths: Depths = depths::compute_depths(candidates, &catalog.edges);
        let target_name: String = target::select_target(
            &depths,
            min_depth,
            |name| catalog.by_name.contains_key(name),
            avoid,
            rng,
        )?;
        let path: Path = path::build_path(&target_name, depths.parents());
        let required: Vec<String> = path.required_starters(&depths);

        let names: Vec<String> = starters::select_starters(
            &required,
            order,
            &path.words(),
            &catalog.names(),
            self.config.starter_count,
        );

        // Every name comes from the catalog
        let starter_ids: Vec<WordId> = names
            .iter()
            .filter_map(|n| catalog.word(n))
            .map(|w| w.id)
            .collect();
        let target_id: WordId = catalog
            .word(&target_name)
            .map(|w| w.id)
            .ok_or(SelectionError::NoEligibleTarget { min_depth })?;
        Ok((target_id, starter_ids))
    }

    fn record(
        &self,
        seed: &str,
        target_word_id: WordId,
        starter_word_ids: Vec<WordId>,
        min_depth: u32,
        now: DateTime<Utc>,
    ) -> HistoryRecord {
        HistoryRecord {
            seed: seed.to_string(),
            target_word_id,
            max_depth_used: min_depth,
            starter_word_ids,
            selected_on: now,
        }
    }

    /// Build the puzzle for a selection, recomputing depths and path from the current graph.
    fn assemble(&self, record: &HistoryRecord, catalog: &Catalog) -> Result<DailyPuzzle, DailyError> {
        let target: &Word = catalog.word_by_id(record.target_word_id).ok_or_else(|| {
            DailyError::UnknownHistoryTarget {
                seed: record.seed.clone(),
                target_id: record.target_word_id,
            }
        })?;

        let mut starters: Vec<&Word> = Vec::with_capacity(record.starter_word_ids.len());
        for id in &record.starter_word_ids {
            match catalog.word_by_id(*id) {
                Some(w) => starters.push(w),
                None => warn!("Seed '{}': starter id {id} no longer exists", record.seed),
            }
        }
        let names: Vec<&str> = starters.iter().map(|w| w.name.as_str()).collect();

        let depths: Depths = depths::compute_depths(&names, &catalog.edges);
        let path: Path = path::build_path(&target.name, depths.parents());
        let depth: u32 = match depths.depth(&target.name) {
            Some(d) if !path.is_empty() => d,
            _ => {
                return Err(DailyError::TargetUnreachable {
                    target: target.name.clone(),
                });
            }
        };

        let recipes: Vec<RecipePair> = path
            .recipe_pairs()
            .into_iter()
            .map(|(left, right)| RecipePair { left, right })
            .collect();
        let starters: Vec<StarterWord> = starters.into_iter().map(StarterWord::from).collect();

        Ok(DailyPuzzle {
            seed: record.seed.clone(),
            starter_count: starters.len(),
            starters,
            target: DailyTarget {
                name: target.name.clone(),
                element_id: target.id,
                emoji: text::ensure_emoji(target.emoji.as_deref()),
                depth,
                steps: path.len(),
                required_starters: path.required_starters(&depths),
                recipes,
                path: path.get().clone(),
            },
            reachable_count: depths.reachable_count(),
        })
    }
}

/// Generate the puzzle for the seed with the default settings.
pub fn generate_daily_puzzle<G, H>(
    graph: &G,
    history: &H,
    seed_input: Option<&str>,
    min_depth: Option<u32>,
) -> Result<DailyPuzzle, DailyError>
where
    G: GraphStore + ?Sized,
    H: HistoryStore + ?Sized,
{
    DailyGenerator::new(graph, history, GeneratorConfig::default()).generate(seed_input, min_depth)
}
