/*
 *  column.rs
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

//! Per-column bar animation: instant attack, accelerating release and a
//! slow one-pixel-per-tick peak marker.

use crate::constants::{CHANNEL_COUNT, SPECTRUM_SIZE};

/// Which stream a band draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Left,
    Right,
    Both,
}

impl Channel {
    pub const ALL: [Channel; CHANNEL_COUNT] = [Channel::Left, Channel::Right, Channel::Both];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Channel::Left => 0,
            Channel::Right => 1,
            Channel::Both => 2,
        }
    }
}

/// Animation state of one column on one channel.
///
/// Also the view handed to the column painter: `previous` lets the painter
/// touch only the rows that changed since the last frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnState {
    pub shown: u8,
    pub previous: u8,
    pub peak: u8,
    pub fall: u8,
}

impl ColumnState {
    /// Advance one animation tick toward `target`.
    pub fn tick(&mut self, target: u8) {
        self.previous = self.shown;

        if target < self.shown {
            if self.shown >= self.fall {
                self.shown -= self.fall;
                self.fall = self.fall.saturating_add(1);
            } else {
                self.shown = 0;
            }
        }

        if target > self.shown {
            self.shown = target;
            self.fall = 1;
        }

        if self.peak <= target {
            self.peak = target.saturating_add(1);
        } else if self.peak > 0 && self.peak > self.shown.saturating_add(1) {
            self.peak -= 1;
        }
    }

    /// Copy for the painter, with the peak hidden when peaks are off.
    #[inline]
    pub fn view(&self, show_peaks: bool) -> ColumnState {
        let mut v = *self;
        if !show_peaks {
            v.peak = 0;
        }
        v
    }
}

/// Column states for every column slot of every channel.
///
/// The combined (`Both`) slots are separate from the left/right slots so
/// switching between single and split layouts never reuses stale state.
#[derive(Debug, Clone)]
pub struct ColumnStore {
    slots: [[ColumnState; SPECTRUM_SIZE]; CHANNEL_COUNT],
}

impl ColumnStore {
    pub fn new() -> Self {
        Self {
            slots: [[ColumnState::default(); SPECTRUM_SIZE]; CHANNEL_COUNT],
        }
    }

    /// Zero every slot.
    pub fn reset(&mut self) {
        for chan in self.slots.iter_mut() {
            chan.fill(ColumnState::default());
        }
    }

    /// Current state, or `None` past the last column.
    pub fn get(&self, channel: Channel, col: usize) -> Option<ColumnState> {
        self.slots[channel.index()].get(col).copied()
    }

    /// Tick `col` on `channel` and return the updated state.
    pub fn advance(&mut self, channel: Channel, col: usize, target: u8) -> Option<ColumnState> {
        let slot = self.slots[channel.index()].get_mut(col)?;
        slot.tick(target);
        Some(*slot)
    }

    pub fn is_clear(&self) -> bool {
        self.slots
            .iter()
            .all(|chan| chan.iter().all(|s| *s == ColumnState::default()))
    }
}

impl Default for ColumnStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attack_then_release() {
        let mut s = ColumnState::default();

        s.tick(50);
        assert_eq!(s, ColumnState { shown: 50, previous: 0, peak: 51, fall: 1 });

        s.tick(0);
        assert_eq!(s, ColumnState { shown: 49, previous: 50, peak: 50, fall: 2 });
    }

    #[test]
    fn test_attack_is_instant() {
        let mut s = ColumnState::default();
        for target in [3u8, 10, 10, 42, 42, 42] {
            s.tick(target);
            assert_eq!(s.shown, target);
            assert_eq!(s.fall, 1);
        }
    }

    #[test]
    fn test_fall_accelerates_and_resets() {
        let mut s = ColumnState::default();
        s.tick(100);

        let mut last_fall = s.fall;
        while s.shown > 0 {
            s.tick(0);
            if s.shown > 0 {
                assert!(s.fall > last_fall);
            }
            last_fall = s.fall;
        }

        s.tick(20);
        assert_eq!(s.shown, 20);
        assert_eq!(s.fall, 1);
    }

    #[test]
    fn test_fall_sequence() {
        let mut s = ColumnState::default();
        s.tick(10);
        let mut shown = Vec::new();
        for _ in 0..6 {
            s.tick(0);
            shown.push(s.shown);
        }
        // 10 -1 -2 -3 = 4, then fall 4 fits exactly, then 5 does not
        assert_eq!(shown, vec![9, 7, 4, 0, 0, 0]);
    }

    #[test]
    fn test_fall_stops_at_target() {
        let mut s = ColumnState::default();
        s.tick(40);
        s.tick(30); // 40 - 1 = 39
        s.tick(30); // 39 - 2 = 37
        s.tick(36); // 37 - 3 = 34, then rises to 36
        assert_eq!(s.shown, 36);
        assert_eq!(s.fall, 1);
    }

    #[test]
    fn test_peak_never_below_bar() {
        let mut s = ColumnState::default();
        let targets = [5u8, 80, 0, 0, 60, 61, 2, 0, 0, 0, 200, 199, 3, 0, 254, 0];
        for &t in targets.iter().cycle().take(200) {
            s.tick(t);
            assert!(s.peak >= s.shown, "peak {} below shown {}", s.peak, s.shown);
        }
    }

    #[test]
    fn test_peak_decays_one_per_tick() {
        let mut s = ColumnState::default();
        s.tick(30);
        assert_eq!(s.peak, 31);
        s.tick(0);
        s.tick(0);
        s.tick(0);
        assert_eq!(s.peak, 28);
    }

    #[test]
    fn test_hidden_peak_keeps_tracking() {
        let mut s = ColumnState::default();
        s.tick(12);
        assert_eq!(s.view(false).peak, 0);
        assert_eq!(s.view(true).peak, 13);
        assert_eq!(s.peak, 13);
    }

    #[test]
    fn test_store_channels_independent() {
        let mut store = ColumnStore::new();
        store.advance(Channel::Both, 4, 20);
        store.advance(Channel::Left, 4, 7);

        assert_eq!(store.get(Channel::Both, 4).unwrap().shown, 20);
        assert_eq!(store.get(Channel::Left, 4).unwrap().shown, 7);
        assert_eq!(store.get(Channel::Right, 4).unwrap().shown, 0);
    }

    #[test]
    fn test_store_reset() {
        let mut store = ColumnStore::new();
        for ch in Channel::ALL {
            store.advance(ch, 0, 99);
        }
        assert!(!store.is_clear());

        store.reset();
        assert!(store.is_clear());
        assert_eq!(store.get(Channel::Both, 0), Some(ColumnState::default()));
    }

    #[test]
    fn test_store_out_of_range() {
        let mut store = ColumnStore::new();
        assert!(store.advance(Channel::Both, SPECTRUM_SIZE, 1).is_none());
        assert!(store.get(Channel::Left, SPECTRUM_SIZE).is_none());
    }
}
