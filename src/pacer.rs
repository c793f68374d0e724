/*
 *  pacer.rs
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
use std::time::{Duration, Instant};

/// Minimum spacing between spectrum conversions.
///
/// A zero interval never holds a frame back.
#[derive(Debug, Clone)]
pub struct Pacer {
    next_deadline: Option<Instant>,
    interval: Duration,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self { next_deadline: None, interval }
    }

    pub fn always_ready() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[inline]
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
        self.next_deadline = None;
    }

    /// Returns true if a frame may run now; if true, it also schedules the next deadline.
    #[inline]
    pub fn is_ready(&mut self) -> bool {
        self.is_ready_at(Instant::now())
    }

    pub fn is_ready_at(&mut self, now: Instant) -> bool {
        if self.interval.is_zero() {
            return true;
        }
        match self.next_deadline {
            Some(deadline) if now < deadline => false,
            _ => {
                self.next_deadline = Some(now + self.interval);
                true
            }
        }
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::always_ready()
    }
}
