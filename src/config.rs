/*
config.rs

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

//! Generator settings.
//!
//! Settings are layered, the last layer wins:
//!
//! 1. the defaults of [`GeneratorConfig`],
//! 2. an optional JSON file (see [`GeneratorConfig::from_file`]),
//! 3. the `DAILY_MIN_BACKTRACK_DEPTH`, `DAILY_MIN_DEPTH`, and `DAILY_STARTER_COUNT` environment
//!   variables,
//! 4. the command-line options.
//!
//! Invalid values (zero, negative, or not a number) are replaced by the defaults.
//! Values past their upper bound are clamped.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

use crate::graph::RecipeSource;
use crate::text;

/// Default minimum depth of the target.
pub const DEFAULT_MIN_DEPTH: u32 = 3;

/// Default number of starters offered to the player.
pub const DEFAULT_STARTER_COUNT: usize = 4;

/// Largest number of starters offered to the player.
pub const MAX_STARTER_COUNT: usize = 12;

/// Default number of days during which a target is not selected again.
pub const DEFAULT_RECENT_WINDOW_DAYS: u32 = 7;

/// Longest recent-target window, in days.
pub const MAX_RECENT_WINDOW_DAYS: u32 = 3650;

/// Default number of starter subsets tried before falling back to the whole pool.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 8;

/// Starters added to the pool when they exist in the graph.
pub const FALLBACK_STARTERS: [&str; 4] = ["fire", "water", "earth", "air"];

/// Error while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error while reading the file.
    #[error("cannot read the configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON for [`GeneratorConfig`].
    #[error("invalid configuration file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Generator settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Minimum depth of the target.
    pub min_depth: u32,

    /// Number of starters offered to the player.
    pub starter_count: usize,

    /// Recent targets are avoided during that many days.
    pub recent_window_days: u32,

    /// Number of seed-derived starter subsets to try.
    pub max_attempts: u32,

    /// Recipes used to build puzzles.
    pub edge_sources: Vec<RecipeSource>,

    /// Words added to the starter pool when present in the graph.
    pub fallback_starters: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_depth: DEFAULT_MIN_DEPTH,
            starter_count: DEFAULT_STARTER_COUNT,
            recent_window_days: DEFAULT_RECENT_WINDOW_DAYS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            edge_sources: vec![RecipeSource::Canon, RecipeSource::Manual],
            fallback_starters: FALLBACK_STARTERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Parse a strictly positive integer.
pub fn parse_positive(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|v| *v > 0)
}

impl GeneratorConfig {
    /// Load the settings from a JSON file. Missing keys get their default value.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file: File = File::open(path)?;
        let config: GeneratorConfig = serde_json::from_reader(BufReader::new(file))?;
        debug!("Configuration loaded from {path:?}");
        Ok(config.sanitized())
    }

    /// Apply the environment variables of the process.
    pub fn with_env(self) -> Self {
        self.with_env_lookup(|key| std::env::var(key).ok())
    }

    /// Apply the environment variables returned by `lookup`.
    ///
    /// `DAILY_MIN_BACKTRACK_DEPTH` takes precedence over `DAILY_MIN_DEPTH`.
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_depth: Option<String> =
            lookup("DAILY_MIN_BACKTRACK_DEPTH").or_else(|| lookup("DAILY_MIN_DEPTH"));
        if let Some(raw) = raw_depth {
            match parse_positive(&raw) {
                Some(v) => self.min_depth = v,
                None => warn!("Ignoring invalid minimum depth '{raw}'"),
            }
        }
        if let Some(raw) = lookup("DAILY_STARTER_COUNT") {
            match parse_positive(&raw) {
                Some(v) => self.starter_count = v as usize,
                None => warn!("Ignoring invalid starter count '{raw}'"),
            }
        }
        self.sanitized()
    }

    /// Replace invalid values by their default and canonicalize the starter names.
    pub fn sanitized(mut self) -> Self {
        if self.min_depth == 0 {
            self.min_depth = DEFAULT_MIN_DEPTH;
        }
        if self.starter_count == 0 {
            self.starter_count = DEFAULT_STARTER_COUNT;
        }
        self.starter_count = self.starter_count.min(MAX_STARTER_COUNT);
        if self.recent_window_days == 0 {
            self.recent_window_days = DEFAULT_RECENT_WINDOW_DAYS;
        }
        self.recent_window_days = self.recent_window_days.min(MAX_RECENT_WINDOW_DAYS);
        if self.max_attempts == 0 {
            self.max_attempts = DEFAULT_MAX_ATTEMPTS;
        }
        if self.edge_sources.is_empty() {
            self.edge_sources = GeneratorConfig::default().edge_sources;
        }
        self.fallback_starters = self
            .fallback_starters
            .iter()
            .map(|s| text::normalize_name(s))
            .filter(|s| !s.is_empty())
            .collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config: GeneratorConfig = GeneratorConfig::default();
        assert_eq!(config.min_depth, 3);
        assert_eq!(config.starter_count, 4);
        assert_eq!(
            config.edge_sources,
            vec![RecipeSource::Canon, RecipeSource::Manual]
        );
    }

    #[test]
    fn invalid_values_use_defaults() {
        let config: GeneratorConfig = GeneratorConfig {
            min_depth: 0,
            starter_count: 40,
            recent_window_days: 200_000_000,
            max_attempts: 0,
            edge_sources: Vec::new(),
            fallback_starters: vec!["  Fire ".to_string(), " ".to_string()],
            ..GeneratorConfig::default()
        }
        .sanitized();
        assert_eq!(config.min_depth, 3);
        assert_eq!(config.starter_count, MAX_STARTER_COUNT);
        assert_eq!(config.recent_window_days, MAX_RECENT_WINDOW_DAYS);
        assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(config.edge_sources.len(), 2);
        assert_eq!(config.fallback_starters, vec!["fire"]);
    }

    #[test]
    fn environment_layer() {
        let env: HashMap<&str, &str> = [
            ("DAILY_MIN_DEPTH", "5"),
            ("DAILY_MIN_BACKTRACK_DEPTH", "4"),
            ("DAILY_STARTER_COUNT", "zero"),
        ]
        .into_iter()
        .collect();
        let config: GeneratorConfig = GeneratorConfig::default()
            .with_env_lookup(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.min_depth, 4);
        assert_eq!(config.starter_count, 4);

        let config: GeneratorConfig = GeneratorConfig::default()
            .with_env_lookup(|key| (key == "DAILY_MIN_DEPTH").then(|| "-2".to_string()));
        assert_eq!(config.min_depth, 3);
    }

    #[test]
    fn file_layer() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"min_depth": 2, "edge_sources": ["canon"]}}"#).unwrap();
        let config: GeneratorConfig = GeneratorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.min_depth, 2);
        assert_eq!(config.starter_count, 4);
        assert_eq!(config.edge_sources, vec![RecipeSource::Canon]);
    }

    #[test]
    fn positive_integers() {
        assert_eq!(parse_positive(" 7 "), Some(7));
        assert_eq!(parse_positive("0"), None);
        assert_eq!(parse_positive("-1"), None);
        assert_eq!(parse_positive("abc"), None);
    }
}
