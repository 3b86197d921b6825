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

//! Daily puzzle generation through the public API.

use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashSet;
use std::sync::{Barrier, Mutex};
use std::thread;

use dailycraft::config::GeneratorConfig;
use dailycraft::error::{DailyError, StoreError};
use dailycraft::generator::daily::DailyGenerator;
use dailycraft::graph::{MemoryGraph, RecipeSource};
use dailycraft::puzzle::DailyPuzzle;
use dailycraft::saver::history::{CreateOutcome, HistoryRecord, HistoryStore, MemoryHistoryStore};
use dailycraft::generate_daily_puzzle;

fn elements() -> MemoryGraph {
    MemoryGraph::from_recipes(
        &["fire", "water", "earth", "wind"],
        &[
            ("fire", "water", "steam"),
            ("earth", "water", "mud"),
            ("earth", "fire", "lava"),
            ("wind", "earth", "dust"),
            ("wind", "water", "rain"),
            ("wind", "fire", "energy"),
            ("steam", "lava", "obsidian"),
            ("obsidian", "dust", "relic"),
        ],
    )
}

/// Six starters, so that the generator tries starter subsets before the whole pool.
fn workshop() -> MemoryGraph {
    let graph: MemoryGraph = elements();
    for name in ["light", "stone"] {
        graph.add_word(name, Some("✨"), true).unwrap();
    }
    graph.add_recipe("light", "stone", "crystal", RecipeSource::Canon).unwrap();
    graph.add_recipe("crystal", "fire", "glass", RecipeSource::Canon).unwrap();
    graph.add_recipe("glass", "rain", "prism", RecipeSource::Manual).unwrap();
    graph
}

fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 6, 30, 0).unwrap()
}

fn names(puzzle: &DailyPuzzle) -> Vec<String> {
    puzzle.starters.iter().map(|s| s.name.clone()).collect()
}

/// Every step only uses starters or the results of earlier steps.
fn assert_playable(puzzle: &DailyPuzzle) {
    let mut known: HashSet<String> = names(puzzle).into_iter().collect();
    for step in &puzzle.target.path {
        assert!(known.contains(&step.left), "{} unknown in {puzzle:?}", step.left);
        assert!(known.contains(&step.right), "{} unknown in {puzzle:?}", step.right);
        known.insert(step.result.clone());
    }
    assert_eq!(
        puzzle.target.path.last().map(|s| s.result.as_str()),
        Some(puzzle.target.name.as_str())
    );
}

#[test]
fn relic_path() {
    let graph: MemoryGraph = elements();
    let history: MemoryHistoryStore = MemoryHistoryStore::new();
    let puzzle: DailyPuzzle = DailyGenerator::new(&graph, &history, GeneratorConfig::default())
        .generate_at(Some("2024-01-01"), Some(3), at(1))
        .unwrap();

    let path: Vec<(&str, &str, &str)> = puzzle
        .target
        .path
        .iter()
        .map(|s| (s.left.as_str(), s.right.as_str(), s.result.as_str()))
        .collect();
    assert_eq!(path.len(), 5);
    assert_eq!(path[2].2, "obsidian");
    assert_eq!(path[4], ("obsidian", "dust", "relic"));
    let results: HashSet<&str> = path[..2].iter().map(|s| s.2).collect();
    assert_eq!(results, HashSet::from(["steam", "lava"]));
    assert_eq!(path[3].2, "dust");
    assert_eq!(puzzle.target.recipes.len(), 5);
    assert_playable(&puzzle);
}

#[test]
fn replay_after_the_graph_grows() {
    let graph: MemoryGraph = elements();
    let history: MemoryHistoryStore = MemoryHistoryStore::new();
    let generator = DailyGenerator::new(&graph, &history, GeneratorConfig::default());
    let first: DailyPuzzle = generator.generate_at(Some("2024-01-01"), None, at(1)).unwrap();
    assert_eq!(first.target.name, "relic");

    graph.add_recipe("mud", "rain", "swamp", RecipeSource::Canon).unwrap();
    graph.add_recipe("swamp", "energy", "life", RecipeSource::Canon).unwrap();
    let unrelated: DailyPuzzle = generator.generate_at(Some("2024-01-01"), None, at(3)).unwrap();
    assert_eq!(unrelated.target, first.target);
    assert_eq!(unrelated.starters, first.starters);
    assert_eq!(unrelated.reachable_count, first.reachable_count + 2);

    graph.add_recipe("steam", "dust", "relic", RecipeSource::Canon).unwrap();
    let shorter: DailyPuzzle = generator.generate_at(Some("2024-01-01"), Some(4), at(5)).unwrap();
    assert_eq!(shorter.target.name, "relic");
    assert_eq!(shorter.target.depth, 2);
    assert_eq!(shorter.target.steps, 3);
    assert_playable(&shorter);
    assert_eq!(history.len(), 1);
}

#[test]
fn same_seed_same_puzzle() {
    let graph: MemoryGraph = workshop();
    let history: MemoryHistoryStore = MemoryHistoryStore::new();
    let first: DailyPuzzle = generate_daily_puzzle(&graph, &history, Some("Puzzle"), Some(2)).unwrap();
    let second: DailyPuzzle = generate_daily_puzzle(&graph, &history, Some("puzzle "), Some(2)).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.seed, "puzzle");
}

#[test]
fn fresh_stores_agree() {
    let graph: MemoryGraph = workshop();
    let a: MemoryHistoryStore = MemoryHistoryStore::new();
    let b: MemoryHistoryStore = MemoryHistoryStore::new();
    for seed in ["alpha", "2024-06-01", "zeta"] {
        assert_eq!(
            generate_daily_puzzle(&graph, &a, Some(seed), Some(2)).unwrap(),
            generate_daily_puzzle(&graph, &b, Some(seed), Some(2)).unwrap()
        );
    }
}

#[test]
fn puzzles_are_solvable() {
    let graph: MemoryGraph = workshop();
    let history: MemoryHistoryStore = MemoryHistoryStore::new();
    let generator = DailyGenerator::new(&graph, &history, GeneratorConfig::default());
    for day in 1..=20 {
        let seed: String = format!("2024-01-{day:02}");
        let puzzle: DailyPuzzle = generator.generate_at(Some(seed.as_str()), Some(2), at(day)).unwrap();
        assert!(puzzle.is_solvable(), "{puzzle:?}");
        // Required starters are never dropped, even past the requested count
        assert!(puzzle.starter_count >= 4);
        assert_eq!(puzzle.starters.len(), puzzle.starter_count);
        assert_eq!(puzzle.target.steps, puzzle.target.path.len());
        assert!(puzzle.target.depth >= 1);
        assert_playable(&puzzle);
    }
    assert_eq!(history.len(), 20);
}

#[test]
fn recent_targets_are_avoided() {
    let graph: MemoryGraph = workshop();
    let history: MemoryHistoryStore = MemoryHistoryStore::new();
    let config: GeneratorConfig = GeneratorConfig {
        starter_count: 6,
        ..GeneratorConfig::default()
    };
    let generator = DailyGenerator::new(&graph, &history, config);

    // Depth 3 leaves relic and prism
    let first: DailyPuzzle = generator.generate_at(Some("d1"), Some(3), at(1)).unwrap();
    let second: DailyPuzzle = generator.generate_at(Some("d2"), Some(3), at(2)).unwrap();
    assert_ne!(first.target.name, second.target.name);

    // Both are recent: the avoid list is ignored rather than failing
    let third: DailyPuzzle = generator.generate_at(Some("d3"), Some(3), at(3)).unwrap();
    assert!(["relic", "prism"].contains(&third.target.name.as_str()));
}

#[test]
fn whole_pool_when_no_subset_reaches_the_target() {
    let graph: MemoryGraph = MemoryGraph::from_recipes(
        &["a", "b", "c", "d", "e", "f"],
        &[
            ("a", "b", "ab"),
            ("c", "d", "cd"),
            ("ab", "cd", "abcd"),
            ("abcd", "e", "goal"),
        ],
    );
    let history: MemoryHistoryStore = MemoryHistoryStore::new();
    let generator = DailyGenerator::new(&graph, &history, GeneratorConfig::default());
    assert_eq!(generator.config().starter_count, 4);

    for seed in ["2024-01-01", "x", "pool"] {
        let puzzle: DailyPuzzle = generator.generate_at(Some(seed), Some(3), at(1)).unwrap();
        assert_eq!(puzzle.target.name, "goal");
        assert_eq!(puzzle.target.depth, 3);
        assert_eq!(names(&puzzle), vec!["a", "b", "c", "d", "e"]);
        assert_eq!(puzzle.starter_count, 5);
        assert!(puzzle.is_solvable());
        assert_playable(&puzzle);
    }
}

#[test]
fn empty_graph() {
    let graph: MemoryGraph = MemoryGraph::new();
    let history: MemoryHistoryStore = MemoryHistoryStore::new();
    let err: DailyError = generate_daily_puzzle(&graph, &history, None, None).unwrap_err();
    assert!(matches!(err, DailyError::EmptyGraph));
    assert!(err.is_configuration());
    assert!(err.to_string().starts_with("word graph is empty"));
    assert!(history.is_empty());
}

#[test]
fn concurrent_first_generations() {
    let graph: MemoryGraph = workshop();
    let history: MemoryHistoryStore = MemoryHistoryStore::new();
    let barrier: Barrier = Barrier::new(4);

    let puzzles: Vec<DailyPuzzle> = thread::scope(|s| {
        let mut handles = Vec::new();
        for _ in 0..4 {
            handles.push(s.spawn(|| {
                let generator = DailyGenerator::new(&graph, &history, GeneratorConfig::default());
                barrier.wait();
                generator.generate_at(Some("x"), Some(2), at(1))
            }));
        }
        handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect()
    });

    assert_eq!(history.len(), 1);
    assert!(puzzles.iter().all(|p| p == &puzzles[0]));
}

/// Store that lets a rival commit the seed between the lookup and the insert.
struct LostRace {
    inner: MemoryHistoryStore,
    rival: Mutex<Option<HistoryRecord>>,
}

impl HistoryStore for LostRace {
    fn get_record(&self, seed: &str) -> Result<Option<HistoryRecord>, StoreError> {
        self.inner.get_record(seed)
    }

    fn try_create_record(&self, record: HistoryRecord) -> Result<CreateOutcome, StoreError> {
        if let Some(rival) = self.rival.lock().unwrap().take() {
            self.inner.try_create_record(rival)?;
        }
        self.inner.try_create_record(record)
    }

    fn recent_records(&self, since: DateTime<Utc>) -> Result<Vec<HistoryRecord>, StoreError> {
        self.inner.recent_records(since)
    }

    fn clear_record(&self, seed: &str) -> Result<bool, StoreError> {
        self.inner.clear_record(seed)
    }
}

#[test]
fn losing_a_race_returns_the_winner() {
    let graph: MemoryGraph = elements();
    let id = |name: &str| graph.word(name).unwrap().id;
    let store: LostRace = LostRace {
        inner: MemoryHistoryStore::new(),
        rival: Mutex::new(Some(HistoryRecord {
            seed: "x".to_string(),
            target_word_id: id("obsidian"),
            max_depth_used: 2,
            starter_word_ids: vec![id("fire"), id("water"), id("earth")],
            selected_on: at(1),
        })),
    };

    let puzzle: DailyPuzzle = DailyGenerator::new(&graph, &store, GeneratorConfig::default())
        .generate_at(Some("x"), Some(3), at(1))
        .unwrap();
    assert_eq!(puzzle.target.name, "obsidian");
    assert_eq!(puzzle.target.depth, 2);
    assert_eq!(names(&puzzle), vec!["fire", "water", "earth"]);
    assert_eq!(puzzle.starter_count, 3);
    assert_eq!(store.inner.len(), 1);
}

#[test]
fn unreachable_replayed_target() {
    let graph: MemoryGraph = elements();
    let id = |name: &str| graph.word(name).unwrap().id;
    let history: MemoryHistoryStore = MemoryHistoryStore::new();
    history
        .try_create_record(HistoryRecord {
            seed: "x".to_string(),
            target_word_id: id("relic"),
            max_depth_used: 3,
            starter_word_ids: vec![id("fire"), id("water")],
            selected_on: at(1),
        })
        .unwrap();
    assert!(matches!(
        generate_daily_puzzle(&graph, &history, Some("x"), None),
        Err(DailyError::TargetUnreachable { target }) if target == "relic"
    ));
}
