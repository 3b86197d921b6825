/*
path.rs

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

//! Ordered list of combinations that produces a target word.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::depths::{Depths, ParentMap};
use crate::graph::RecipeEdge;

/// Path object.
///
/// Every step only uses starters or words produced by an earlier step, and no word is produced
/// twice.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct Path {
    /// Steps in the order the player must perform them.
    steps: Vec<RecipeEdge>,

    /// Words already produced (or being resolved) by the path.
    /// Instead of looking for the word in the [`Path::steps`] vector, this
    /// [`std::collections::HashSet`] speeds up the lookup.
    #[serde(skip)]
    resolved: HashSet<String>,
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.steps == other.steps
    }
}

impl Path {
    /// Create an empty [`Path`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of steps in the path.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the path has no step.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether the word is produced by the path.
    pub fn contains(&self, word: &str) -> bool {
        self.resolved.contains(word)
    }

    /// Return a reference to the steps.
    pub fn get(&self) -> &Vec<RecipeEdge> {
        &self.steps
    }

    /// Return the last step, which produces the target.
    pub fn get_last(&self) -> Option<&RecipeEdge> {
        self.steps.last()
    }

    /// Starters consumed by the path, in order of first use.
    pub fn required_starters(&self, depths: &Depths) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut required: Vec<String> = Vec::new();
        for step in &self.steps {
            for name in [&step.left, &step.right] {
                if depths.is_starter(name) && seen.insert(name) {
                    required.push(name.clone());
                }
            }
        }
        required
    }

    /// Ingredients used by the path, in order of first use.
    pub fn words(&self) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut names: Vec<String> = Vec::new();
        for step in &self.steps {
            for name in [&step.left, &step.right] {
                if seen.insert(name) {
                    names.push(name.clone());
                }
            }
        }
        names
    }

    /// Ingredient pairs of the path, without duplicates.
    pub fn recipe_pairs(&self) -> Vec<(String, String)> {
        let mut seen: HashSet<(&str, &str)> = HashSet::new();
        self.steps
            .iter()
            .filter(|s| seen.insert((s.left.as_str(), s.right.as_str())))
            .map(|s| (s.left.clone(), s.right.clone()))
            .collect()
    }
}

/// Build the path to `target` from the recipes recorded by the depth computation.
///
/// The path is empty when `target` has no recorded recipe (a starter or an unreachable word).
pub fn build_path(target: &str, parents: &ParentMap) -> Path {
    let mut path: Path = Path::new();
    visit(target, parents, &mut path);
    path
}

/// Add the steps for `current` after the steps for its two ingredients.
fn visit(current: &str, parents: &ParentMap, path: &mut Path) {
    if path.contains(current) {
        return;
    }
    let Some(parent) = parents.get(current) else {
        return;
    };
    path.resolved.insert(current.to_string());
    visit(&parent.left, parents, path);
    visit(&parent.right, parents, path);
    path.steps.push(RecipeEdge {
        left: parent.left.clone(),
        right: parent.right.clone(),
        result: current.to_string(),
    });
}
