/*
lib.rs

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

//! Deterministic daily puzzles for a word-combination crafting game.
//!
//! Players start from a few starter words and combine known words two at a time, following the
//! recipes of the word graph, to discover new words.
//! Each day (or any seed string) gets one puzzle: a set of starters and a target word that needs
//! at least a minimum number of combinations.
//! The same seed always gives the same puzzle, even when several requests race, because the first
//! selection is saved and replayed.
//!
//! The entry point is [`generator::daily::DailyGenerator`].
//! It reads the graph through a [`graph::GraphStore`] and saves its selections through a
//! [`saver::history::HistoryStore`].
//!
//! ```no_run
//! use dailycraft::config::GeneratorConfig;
//! use dailycraft::generator::daily::DailyGenerator;
//! use dailycraft::graph::seeds::load_seed_file;
//! use dailycraft::saver::history::MemoryHistoryStore;
//! use std::path::Path;
//!
//! let (graph, _stats) = load_seed_file(Path::new("seeds.json")).unwrap();
//! let history = MemoryHistoryStore::new();
//! let generator = DailyGenerator::new(&graph, &history, GeneratorConfig::default());
//! let puzzle = generator.generate(Some("2024-01-01"), None).unwrap();
//! println!("{} in {} steps", puzzle.target.name, puzzle.target.steps);
//! ```

pub mod cli_options;
pub mod config;
pub mod error;
pub mod generator;
pub mod graph;
pub mod puzzle;
pub mod saver;
pub mod text;

pub use error::{DailyError, StoreError};
pub use generator::daily::{DailyGenerator, generate_daily_puzzle};
pub use puzzle::DailyPuzzle;
