/*
random.rs

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

//! Seeded pseudo-random generator.
//!
//! The seed string is hashed with `xmur3` and the resulting 32-bit state drives a `mulberry32`
//! generator.
//! Both algorithms are reproduced bit for bit so that other implementations of the game (the web
//! client for example) draw the same numbers for the same seed.
//! Strings are hashed by UTF-16 code unit.
//!
//! [`SeededRandom`] implements [`rand::RngCore`].
//! The selection steps take any [`RngCore`] and draw through [`next_index`] and [`shuffle`],
//! which scale the 32-bit outputs the same way the web client does.

use rand::RngCore;

/// Increment of the `mulberry32` state.
const MULBERRY_STEP: u32 = 0x6D2B_79F5;

/// 2^32, to scale a 32-bit output into `[0, 1)`.
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Hash the seed string and return the first 32-bit output of the `xmur3` seed function.
fn xmur3(seed: &str) -> u32 {
    let units: Vec<u16> = seed.encode_utf16().collect();
    let mut h: u32 = 1_779_033_703 ^ (units.len() as u32);
    for unit in units {
        h = (h ^ u32::from(unit)).wrapping_mul(3_432_918_353);
        h = h.rotate_left(13);
    }
    h = (h ^ (h >> 16)).wrapping_mul(2_246_822_507);
    h = (h ^ (h >> 13)).wrapping_mul(3_266_489_909);
    h ^ (h >> 16)
}

/// Deterministic generator derived from a seed string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    /// Create the generator for the given seed.
    pub fn new(seed: &str) -> Self {
        Self {
            state: xmur3(seed),
        }
    }

    /// Next raw 32-bit output.
    fn next_raw(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY_STEP);
        let a: u32 = self.state;
        let mut t: u32 = (a ^ (a >> 15)).wrapping_mul(1 | a);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t)) ^ t;
        t ^ (t >> 14)
    }

    /// Next float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        next_f64(self)
    }
}

/// Next float in `[0, 1)`: a 32-bit output divided by 2^32.
pub fn next_f64<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    f64::from(rng.next_u32()) / TWO_POW_32
}

/// Draw an index in `0..len`, as `floor(next_f64() * len)` clamped to `len - 1`.
///
/// `len` must not be zero.
pub fn next_index<R: RngCore + ?Sized>(rng: &mut R, len: usize) -> usize {
    let i: usize = (next_f64(rng) * len as f64).floor() as usize;
    i.min(len.saturating_sub(1))
}

/// Fisher-Yates shuffle, from the last element down to the second one.
pub fn shuffle<R: RngCore + ?Sized, T>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j: usize = next_index(rng, i + 1);
        items.swap(i, j);
    }
}

impl RngCore for SeededRandom {
    fn next_u32(&mut self) -> u32 {
        self.next_raw()
    }

    fn next_u64(&mut self) -> u64 {
        let low: u64 = u64::from(self.next_raw());
        let high: u64 = u64::from(self.next_raw());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes: [u8; 4] = self.next_raw().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

/// Return a closure producing the float sequence of the given seed.
pub fn make_generator(seed: &str) -> impl FnMut() -> f64 {
    let mut rng: SeededRandom = SeededRandom::new(seed);
    move || rng.next_f64()
}
