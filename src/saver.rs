/*
saver.rs

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

//! Persist the daily selections.
//!
//! [`history::HistoryStore`] is the interface used by the generator.
//! [`history::MemoryHistoryStore`] keeps the records for the life of the process, and
//! [`json_history::JsonHistoryStore`] saves them in a `history.json` file.

pub mod history;
pub mod json_history;
