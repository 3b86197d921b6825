/*
depths.rs

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

//! Minimum combination depth of every word reachable from a starter set.
//!
//! The depth of a starter is 0.
//! The depth of a word produced by `left + right` is `1 + max(depth(left), depth(right))`, and
//! a word keeps the smallest depth over all the recipes that produce it.
//! Depths are computed by relaxing every recipe until a full scan changes nothing.
//!
//! When two recipes give the same depth, the first one in scan order is kept.
//! Use [`canonical_order`] on the recipe list so that this choice does not depend on the order
//! the store returned the recipes in.

use log::debug;
use std::collections::HashMap;

use crate::graph::RecipeEdge;
use crate::text;

/// Word name to depth.
pub type DepthMap = HashMap<String, u32>;

/// Word name to the recipe that established its depth.
pub type ParentMap = HashMap<String, Parent>;

/// Ingredients of the recipe that produced a word at its minimal depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parent {
    pub left: String,
    pub right: String,
}

/// Result of [`compute_depths`].
#[derive(Debug, Clone, Default)]
pub struct Depths {
    depths: DepthMap,
    parents: ParentMap,
}

impl Depths {
    /// Depth of the given word, or None if the word is not reachable.
    pub fn depth(&self, name: &str) -> Option<u32> {
        self.depths.get(name).copied()
    }

    /// Recipe that produced the word, or None for starters and unreachable words.
    pub fn parent(&self, name: &str) -> Option<&Parent> {
        self.parents.get(name)
    }

    /// Whether the word is a starter of the active set.
    pub fn is_starter(&self, name: &str) -> bool {
        self.depth(name) == Some(0)
    }

    /// Number of reachable words, starters included.
    pub fn reachable_count(&self) -> usize {
        self.depths.len()
    }

    /// All the depths.
    pub fn depths(&self) -> &DepthMap {
        &self.depths
    }

    /// All the parents.
    pub fn parents(&self) -> &ParentMap {
        &self.parents
    }
}

/// Sort recipes by unordered ingredient pair, then by result.
///
/// The ingredients inside each recipe keep their order.
pub fn canonical_order(edges: &mut [RecipeEdge]) {
    edges.sort_by_cached_key(|e| (text::pair_key(&e.left, &e.right), e.result.clone()));
}

/// Compute the depth of every word reachable from `starters` through `edges`.
///
/// Recipes that reference unknown words are never relaxed and contribute nothing.
pub fn compute_depths<I, S>(starters: I, edges: &[RecipeEdge]) -> Depths
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut depths: DepthMap = HashMap::new();
    let mut parents: ParentMap = HashMap::new();

    for starter in starters {
        depths.insert(starter.as_ref().to_string(), 0);
    }

    let mut round: usize = 0;
    let mut changed: bool = true;
    while changed {
        changed = false;
        round += 1;
        for edge in edges {
            let (Some(left), Some(right)) = (depths.get(&edge.left), depths.get(&edge.right))
            else {
                continue;
            };
            let candidate: u32 = left.max(right) + 1;
            // Only a strictly smaller depth replaces the recorded recipe
            let better: bool = match depths.get(&edge.result) {
                Some(current) => candidate < *current,
                None => true,
            };
            if better {
                depths.insert(edge.result.clone(), candidate);
                parents.insert(
                    edge.result.clone(),
                    Parent {
                        left: edge.left.clone(),
                        right: edge.right.clone(),
                    },
                );
                changed = true;
            }
        }
    }
    debug!(
        "Depths stable after {round} rounds: {} reachable words",
        depths.len()
    );

    Depths { depths, parents }
}
