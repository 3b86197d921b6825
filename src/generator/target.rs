/*
target.rs

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

//! Select the target word of a puzzle.

use log::debug;
use rand::RngCore;
use std::collections::HashSet;
use thiserror::Error;

use super::depths::Depths;
use super::random;

/// Type of errors.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// No word is deep enough under the current starter set.
    #[error("no word reaches depth {min_depth}")]
    NoEligibleTarget { min_depth: u32 },
}

/// Words that can be a target: known words, produced by a recipe, with a depth of at least
/// `min_depth`.
///
/// Recipe results missing from the word catalog are rejected by `is_word`.
/// The list is sorted by name.
pub fn eligible_targets<F>(depths: &Depths, min_depth: u32, is_word: F) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    let mut candidates: Vec<String> = depths
        .depths()
        .iter()
        .filter(|(name, depth)| {
            **depth >= min_depth && depths.parent(name).is_some() && is_word(name.as_str())
        })
        .map(|(name, _)| name.clone())
        .collect();
    candidates.sort_unstable();
    candidates
}

/// Draw a target word.
///
/// Words in `avoid` (recent targets) are skipped, unless that leaves nothing to choose from.
///
/// # Errors
///
/// Return [`SelectionError::NoEligibleTarget`] when no word is deep enough.
pub fn select_target<F, R>(
    depths: &Depths,
    min_depth: u32,
    is_word: F,
    avoid: &HashSet<String>,
    rng: &mut R,
) -> Result<String, SelectionError>
where
    F: Fn(&str) -> bool,
    R: RngCore + ?Sized,
{
    let candidates: Vec<String> = eligible_targets(depths, min_depth, is_word);
    if candidates.is_empty() {
        return Err(SelectionError::NoEligibleTarget { min_depth });
    }

    let fresh: Vec<&String> = candidates.iter().filter(|c| !avoid.contains(*c)).collect();
    let pool: Vec<&String> = if fresh.is_empty() {
        debug!("All {} candidates were used recently", candidates.len());
        candidates.iter().collect()
    } else {
        fresh
    };

    let choice: usize = random::next_index(rng, pool.len());
    debug!(
        "Target {} selected among {} candidates",
        pool[choice],
        pool.len()
    );
    Ok(pool[choice].clone())
}
