/*
generator.rs

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

//! Select the daily puzzle.
//!
//! A puzzle is a set of starter words and a target word that the player must produce by combining
//! words two at a time, following the recipes of the graph.
//!
//! The selection is built from small, pure steps:
//!
//! * [`random::SeededRandom`] turns the seed string into a reproducible number sequence.
//! * [`depths::compute_depths`] computes, for a starter set, the minimum number of combinations
//!   needed to produce each word, and the recipe that achieves it.
//! * [`target::select_target`] draws a target among the words that are deep enough.
//! * [`path::build_path`] lists the combinations that lead to the target.
//! * [`starters::select_starters`] completes the starters consumed by the path up to the requested
//!   count.
//!
//! [`daily::DailyGenerator`] chains these steps, saves the selection in the history store, and
//! replays the saved selection on the next requests for the same seed.

pub mod daily;
pub mod depths;
pub mod path;
pub mod random;
pub mod starters;
pub mod target;
