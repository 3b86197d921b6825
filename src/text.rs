/*
text.rs

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

//! Word name and emoji helpers.

/// Glyph used in puzzle payloads for words without a display emoji.
pub const FALLBACK_EMOJI: &str = "🤔";

/// Glyph assigned at load time to words whose seed entry has no usable emoji.
pub const SEED_FALLBACK_EMOJI: &str = "🧩";

/// Return the canonical form of a word name: lowercase, trimmed, inner whitespace collapsed to
/// a single space.
pub fn normalize_name(input: &str) -> String {
    input
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Key for an unordered pair of words. `pair_key("b", "a") == pair_key("a", "b")`.
pub fn pair_key(a: &str, b: &str) -> String {
    let a: String = normalize_name(a);
    let b: String = normalize_name(b);
    if a <= b {
        format!("{a}::{b}")
    } else {
        format!("{b}::{a}")
    }
}

/// Proper case: only the first character is uppercase.
pub fn display_name(name: &str) -> String {
    let n: &str = name.trim();
    let mut chars = n.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Return the trimmed emoji, or [`FALLBACK_EMOJI`] when it is absent or blank.
pub fn ensure_emoji(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => FALLBACK_EMOJI.to_string(),
    }
}

/// Whether the string looks like a single emoji (or a short emoji sequence).
///
/// Letters and digits are rejected, as are strings longer than ten UTF-16 units.
pub fn is_emoji_like(value: &str) -> bool {
    let t: &str = value.trim();
    if t.is_empty() || t.encode_utf16().count() > 10 {
        return false;
    }
    if t.chars().any(|c| c.is_ascii_alphanumeric()) {
        return false;
    }
    t.chars().any(is_pictographic)
}

/// Approximation of the Unicode `Extended_Pictographic` property.
fn is_pictographic(c: char) -> bool {
    matches!(
        c as u32,
        0x00A9
            | 0x00AE
            | 0x203C
            | 0x2049
            | 0x2122
            | 0x2139
            | 0x2190..=0x21FF
            | 0x231A..=0x23FF
            | 0x24C2
            | 0x25AA..=0x25FE
            | 0x2600..=0x27BF
            | 0x2934..=0x2935
            | 0x2B05..=0x2B55
            | 0x3030
            | 0x303D
            | 0x3297
            | 0x3299
            | 0x1F000..=0x1FAFF
    )
}
