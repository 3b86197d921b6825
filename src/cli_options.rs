/*
cli_options.rs

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

//! Process command-line options.
//!
//! In command-line mode, Dailycraft loads a seed file, generates the puzzle for a seed, and prints
//! it in JSON format.
//! Operators can also inspect the graph and forget the saved puzzle of a seed.
//!
//! # Examples
//!
//! Generate the puzzle of the day, saving the selection:
//!
//! ```text
//! $ dailycraft -g seeds.json --history history.json
//! ```
//!
//! Generate the puzzles of a week, with a deeper target:
//!
//! ```text
//! $ dailycraft -g seeds.json -s 2024-01-01 -c 7 -m 4
//! ```
//!
//! List the words and print graph statistics:
//!
//! ```text
//! $ dailycraft -g seeds.json --ls --stats
//! ```

use chrono::{Days, NaiveDate, Utc};
use clap::Parser;
use log::debug;
use std::env;
use std::path::PathBuf;

use crate::config::GeneratorConfig;
use crate::generator::daily::{DailyGenerator, canonical_seed};
use crate::graph::seeds::{self, SeedStats};
use crate::graph::{GraphStore, MemoryGraph, RecipeSource};
use crate::puzzle::DailyPuzzle;
use crate::saver::history::{HistoryStore, MemoryHistoryStore};
use crate::saver::json_history::JsonHistoryStore;
use crate::text;

/// Generate daily puzzles for the word-combination game.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    /// Seed file with the words and recipes
    #[arg(short, long)]
    graph: PathBuf,

    /// History file. Without it, selections are not saved
    #[arg(long)]
    history: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed of the puzzle. The current day by default
    #[arg(short, long)]
    seed: Option<String>,

    /// Minimum depth of the target
    #[arg(short, long)]
    min_depth: Option<u32>,

    /// Number of starters offered to the player
    #[arg(short = 'n', long)]
    starters: Option<usize>,

    /// Recipe sources to use, separated by commas
    #[arg(value_enum, long, value_delimiter = ',')]
    sources: Vec<RecipeSource>,

    /// Number of consecutive days to generate, starting from the seed date
    #[arg(short, long, default_value_t = 1)]
    count: u64,

    /// List the words
    #[arg(short, long, default_value_t = false)]
    ls: bool,

    /// Print some statistics about the graph
    #[arg(long, default_value_t = false)]
    stats: bool,

    /// Delete the saved puzzle for the seed
    #[arg(long, default_value_t = false, requires = "history")]
    forget: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Build the settings from the configuration file, the environment, and the options.
fn build_config(args: &Args) -> Result<GeneratorConfig, String> {
    let mut config: GeneratorConfig = match &args.config {
        Some(path) => GeneratorConfig::from_file(path).map_err(|e| e.to_string())?,
        None => GeneratorConfig::default(),
    }
    .with_env();

    if let Some(depth) = args.min_depth {
        config.min_depth = depth;
    }
    if let Some(count) = args.starters {
        config.starter_count = count;
    }
    if !args.sources.is_empty() {
        config.edge_sources = args.sources.clone();
    }
    Ok(config.sanitized())
}

/// List of seeds to generate.
fn seed_list(seed: Option<&str>, count: u64) -> Result<Vec<Option<String>>, String> {
    if count <= 1 {
        return Ok(vec![seed.map(str::to_string)]);
    }
    let start: NaiveDate = match seed.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| format!("Seed '{s}' is not a YYYY-MM-DD date; it cannot be used with --count"))?,
        None => Utc::now().date_naive(),
    };
    (0..count)
        .map(|i| {
            start
                .checked_add_days(Days::new(i))
                .map(|d| Some(d.format("%Y-%m-%d").to_string()))
                .ok_or_else(|| "Date out of range".to_string())
        })
        .collect()
}

/// Print the words of the graph.
fn list_words(graph: &MemoryGraph) -> u8 {
    match graph.list_words() {
        Ok(words) => {
            for word in words {
                let tier: String = word.tier.map_or("-".to_string(), |t| t.to_string());
                println!(
                    "{} {:<24} tier {:>2}{}{}",
                    text::ensure_emoji(word.emoji.as_deref()),
                    text::display_name(&word.name),
                    tier,
                    if word.is_starter { "  starter" } else { "" },
                    if word.is_goal { "  goal" } else { "" },
                );
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

/// Print the statistics of the loaded graph.
fn print_stats(stats: &SeedStats) {
    println!(
        "
         recipes = {}
           words = {}
        starters = {}
       reachable = {}
   missing emoji = {}",
        stats.recipes,
        stats.words,
        stats.starters,
        stats.reachable,
        stats.missing_emoji.len()
    );
}

/// Parse and process command-line options. Return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let config: GeneratorConfig = match build_config(&args) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("Error: {msg}");
            return 2;
        }
    };
    debug!("Configuration: {config:?}");

    let (graph, stats) = match seeds::load_seed_file(&args.graph) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}: {e}", args.graph.display());
            return 1;
        }
    };

    //
    // Inspect the graph
    //
    if args.ls || args.stats {
        if args.ls && list_words(&graph) != 0 {
            return 1;
        }
        if args.stats {
            print_stats(&stats);
        }
        return 0;
    }

    let history: Box<dyn HistoryStore> = match &args.history {
        Some(path) => Box::new(JsonHistoryStore::with_file(path.clone())),
        None => Box::new(MemoryHistoryStore::new()),
    };

    //
    // Forget a saved puzzle
    //
    if args.forget {
        let seed: String = canonical_seed(args.seed.as_deref(), Utc::now().date_naive());
        return match history.clear_record(&seed) {
            Ok(true) => {
                println!("Forgot the puzzle for seed '{seed}'");
                0
            }
            Ok(false) => {
                println!("No saved puzzle for seed '{seed}'");
                0
            }
            Err(e) => {
                eprintln!("Error: {e}");
                1
            }
        };
    }

    //
    // Generate the puzzles
    //
    let seeds: Vec<Option<String>> = match seed_list(args.seed.as_deref(), args.count) {
        Ok(s) => s,
        Err(msg) => {
            eprintln!("Error: {msg}");
            return 2;
        }
    };
    let generator = DailyGenerator::new(&graph, history.as_ref(), config);
    let mut puzzles: Vec<DailyPuzzle> = Vec::with_capacity(seeds.len());
    for seed in &seeds {
        match generator.generate(seed.as_deref(), None) {
            Ok(puzzle) => puzzles.push(puzzle),
            Err(e) => {
                eprintln!("Error: {e}");
                return 1;
            }
        }
    }

    let output: Result<String, serde_json::Error> = if puzzles.len() == 1 {
        serde_json::to_string_pretty(&puzzles[0])
    } else {
        serde_json::to_string_pretty(&puzzles)
    };
    match output {
        Ok(json) => {
            println!("{json}");
            0
        }
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}
