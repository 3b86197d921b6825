/*
storage.rs

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

//! Seed files and the file-backed history.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use dailycraft::error::DailyError;
use dailycraft::generate_daily_puzzle;
use dailycraft::graph::seeds::{SeedFileError, SeedStats, load_seed_file, parse_seed_document};
use dailycraft::graph::{GraphStore, MemoryGraph, RecipeSource};
use dailycraft::puzzle::DailyPuzzle;
use dailycraft::saver::history::HistoryStore;
use dailycraft::saver::json_history::JsonHistoryStore;
use dailycraft::text;

const SEEDS: &str = r#"{
  "elements": [
    {"name": "Fire", "emoji": "🔥", "starter": true},
    {"name": "Water", "emoji": "💧", "starter": true},
    {"name": "Earth", "emoji": "🌍", "starter": true},
    {"name": "Wind", "emoji": "🌬️", "starter": true}
  ],
  "pairs": [
    {"left": "fire", "right": "water", "result": "steam", "emoji": "♨️"},
    {"left": "earth", "right": "fire", "result": "lava", "emoji": "🌋"},
    {"left": "wind", "right": "earth", "result": "dust"},
    {"left": "steam", "right": "lava", "result": "Obsidian", "emoji": "obsidian"},
    {"left": "obsidian", "right": "dust", "result": "relic", "emoji": "🏺"},
    {"left": "wind", "right": "fire", "result": "relic", "source": "generated"}
  ]
}"#;

fn seed_file(dir: &TempDir) -> PathBuf {
    let path: PathBuf = dir.path().join("seeds.json");
    fs::write(&path, SEEDS).unwrap();
    path
}

#[test]
fn load_seeds() {
    let dir: TempDir = TempDir::new().unwrap();
    let (graph, stats): (MemoryGraph, SeedStats) = load_seed_file(&seed_file(&dir)).unwrap();

    assert_eq!(stats.recipes, 6);
    assert_eq!(stats.words, 9);
    assert_eq!(stats.starters, 4);
    assert_eq!(stats.missing_emoji, vec!["dust", "obsidian"]);

    let fire = graph.word("fire").unwrap();
    assert!(fire.is_starter);
    assert_eq!(fire.tier, Some(0));
    let obsidian = graph.word("obsidian").unwrap();
    assert_eq!(obsidian.emoji.as_deref(), Some(text::SEED_FALLBACK_EMOJI));
    assert_eq!(obsidian.tier, Some(2));
    assert!(!obsidian.is_goal);
    // Tiers count every recipe of the file, generated ones included
    assert_eq!(graph.word("relic").unwrap().tier, Some(1));

    assert_eq!(graph.list_edges(&[RecipeSource::Generated]).unwrap().len(), 1);
    assert_eq!(
        graph
            .list_edges(&[RecipeSource::Canon, RecipeSource::Manual])
            .unwrap()
            .len(),
        5
    );
}

#[test]
fn invalid_seed_documents() {
    assert!(matches!(
        parse_seed_document(r#"{"elements": [{"name": "a"}], "pairs": []}"#),
        Err(SeedFileError::NoStarters)
    ));
    assert!(matches!(
        parse_seed_document(r#"{"pairs": [{"left": " ", "right": "b", "result": "c"}]}"#),
        Err(SeedFileError::EmptyName { field: "left", .. })
    ));
    assert!(matches!(
        parse_seed_document(
            r#"{"pairs": [
                {"left": "a", "right": "b", "result": "c"},
                {"left": "B", "right": "a", "result": "c"}
            ]}"#
        ),
        Err(SeedFileError::DuplicatePair { .. })
    ));
    assert!(matches!(parse_seed_document("{"), Err(SeedFileError::Json(_))));
    assert!(matches!(
        load_seed_file(&PathBuf::from("/nonexistent/seeds.json")),
        Err(SeedFileError::Io(_))
    ));
}

#[test]
fn puzzle_from_seed_file() {
    let dir: TempDir = TempDir::new().unwrap();
    let (graph, _) = load_seed_file(&seed_file(&dir)).unwrap();
    let history: JsonHistoryStore = JsonHistoryStore::new(dir.path().join("data"));

    let puzzle: DailyPuzzle = generate_daily_puzzle(&graph, &history, Some("2024-01-01"), None).unwrap();
    assert_eq!(puzzle.target.name, "relic");
    assert_eq!(puzzle.target.emoji, "🏺");
    assert_eq!(puzzle.target.depth, 3);
    assert!(puzzle.starters.iter().any(|s| s.emoji == "🔥"));
    assert!(history.path().exists());
}

#[test]
fn history_survives_the_process() {
    let dir: TempDir = TempDir::new().unwrap();
    let (graph, _) = load_seed_file(&seed_file(&dir)).unwrap();

    let first: DailyPuzzle = {
        let history: JsonHistoryStore = JsonHistoryStore::new(dir.path().to_path_buf());
        generate_daily_puzzle(&graph, &history, Some("saved"), None).unwrap()
    };

    graph.add_recipe("dust", "steam", "relic", RecipeSource::Canon).unwrap();
    let history: JsonHistoryStore = JsonHistoryStore::new(dir.path().to_path_buf());
    let replayed: DailyPuzzle = generate_daily_puzzle(&graph, &history, Some("saved"), None).unwrap();
    assert_eq!(replayed.target.name, first.target.name);
    assert_eq!(replayed.starters, first.starters);
    assert_eq!(replayed.target.depth, 2);

    assert!(history.clear_record("saved").unwrap());
    assert!(history.get_record("saved").unwrap().is_none());
}

#[test]
fn corrupt_history_file() {
    let dir: TempDir = TempDir::new().unwrap();
    let (graph, _) = load_seed_file(&seed_file(&dir)).unwrap();
    fs::write(dir.path().join("history.json"), "not json").unwrap();
    let history: JsonHistoryStore = JsonHistoryStore::new(dir.path().to_path_buf());

    let err: DailyError = generate_daily_puzzle(&graph, &history, Some("x"), None).unwrap_err();
    assert!(matches!(err, DailyError::Store(_)));
    assert!(!err.is_configuration());
}
