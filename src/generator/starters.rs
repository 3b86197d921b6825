/*
starters.rs

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

//! Select the starter words offered to the player.
//!
//! The final list is assembled in this order, without duplicates:
//!
//! 1. the starters consumed by the path to the target (always all of them, even when there are
//!    more than the requested count, otherwise the puzzle cannot be solved),
//! 2. the starter pool, in the seed-determined shuffled order,
//! 3. the other words of the path,
//! 4. any known word.

use log::debug;
use std::collections::HashSet;

use rand::RngCore;

use super::random;

/// Return a copy of the starter pool in the order drawn from `rng`.
pub fn shuffle_pool<R: RngCore + ?Sized>(pool: &[String], rng: &mut R) -> Vec<String> {
    let mut order: Vec<String> = pool.to_vec();
    random::shuffle(rng, &mut order);
    order
}

/// Assemble the final starter list.
///
/// `shuffled_pool` must come from [`shuffle_pool`] so that the fill order follows the seed.
/// The list has `target_count` words, or more when `required` alone is longer.
pub fn select_starters(
    required: &[String],
    shuffled_pool: &[String],
    path_words: &[String],
    known_words: &[String],
    target_count: usize,
) -> Vec<String> {
    let mut selected: Vec<String> = Vec::with_capacity(target_count.max(required.len()));
    let mut seen: HashSet<&str> = HashSet::new();

    for name in required {
        if seen.insert(name) {
            selected.push(name.clone());
        }
    }

    for (source, names) in [
        ("pool", shuffled_pool),
        ("path", path_words),
        ("catalog", known_words),
    ] {
        for name in names {
            if selected.len() >= target_count {
                return selected;
            }
            if seen.insert(name) {
                debug!("Starter {name} added from the {source}");
                selected.push(name.clone());
            }
        }
    }
    selected
}
