/*
 *  dbfs.rs
 *
 *  LySpectrum - column spectrum canvas
 *	(c) 2020-26 Stuart Hunter
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */

use crate::constants::N_DB;

/// Maps a fixed-point bin power onto the byte decibel scale.
pub trait DbScale {
    fn to_db(&self, power: u16) -> u8;
}

/// Logarithmic threshold table covering the whole u16 power range.
///
/// Entry `k` holds the smallest power that reaches level `k + 1`, so a
/// lookup is a binary search for the number of thresholds at or below
/// the power.
#[derive(Debug, Clone)]
pub struct DbTable {
    thresholds: Vec<u16>,
}

impl DbTable {
    pub fn new() -> Self {
        // 10*log10(65535) ~ 48.2 dB spread over N_DB levels
        let range_db = 10.0 * (u16::MAX as f32).log10();
        let thresholds = (1..N_DB)
            .map(|k| {
                let db = k as f32 * range_db / (N_DB - 1) as f32;
                10f32.powf(db / 10.0).round().clamp(1.0, u16::MAX as f32) as u16
            })
            .collect::<Vec<_>>();
        Self { thresholds }
    }

    pub fn levels(&self) -> usize {
        self.thresholds.len() + 1
    }
}

impl Default for DbTable {
    fn default() -> Self {
        Self::new()
    }
}

impl DbScale for DbTable {
    #[inline]
    fn to_db(&self, power: u16) -> u8 {
        let level = self.thresholds.partition_point(|&t| t <= power);
        level.min(N_DB - 1) as u8
    }
}

impl<F> DbScale for F
where
    F: Fn(u16) -> u8,
{
    #[inline]
    fn to_db(&self, power: u16) -> u8 {
        self(power)
    }
}
