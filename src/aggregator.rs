/*
 *  aggregator.rs
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

//! Folds one-sided FFT bins into the fixed set of display buckets.
//!
//! Low bins map one-to-one; each octave-ish region above doubles the
//! number of bins that share a bucket. A bucket keeps the loudest bin,
//! so short transients survive the fold instead of being smeared.

use crate::dbfs::DbScale;

/// One complex bin from the analysis stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawBinSample {
    pub re: i16,
    pub im: i16,
}

impl RawBinSample {
    pub const fn new(re: i16, im: i16) -> Self {
        Self { re, im }
    }

    /// Fixed-point power estimate, `(re² + im²) >> 15`.
    #[inline]
    pub fn power(&self) -> u16 {
        let re = self.re as i32;
        let im = self.im as i32;
        let sum = (re * re) as u32 + (im * im) as u32;
        (sum >> 15).min(u16::MAX as u32) as u16
    }
}

// (first bin past the region, bins per bucket)
const STRIDE_REGIONS: [(usize, usize); 4] = [(48, 1), (96, 2), (192, 4), (384, 8)];
const STRIDE_TAIL: usize = 16;

/// Number of bins sharing a bucket in the region containing `bin`.
#[inline]
pub fn bucket_stride(bin: usize) -> usize {
    STRIDE_REGIONS
        .iter()
        .find(|(end, _)| bin < *end)
        .map(|&(_, stride)| stride)
        .unwrap_or(STRIDE_TAIL)
}

/// Decibel-scaled max reduction over the bucket strides.
pub struct BinAggregator {
    scale: Box<dyn DbScale + Send>,
}

impl BinAggregator {
    pub fn new<S>(scale: S) -> Self
    where
        S: DbScale + Send + 'static,
    {
        Self { scale: Box::new(scale) }
    }

    pub fn to_db(&self, power: u16) -> u8 {
        self.scale.to_db(power)
    }

    /// Fill `out` from `bins`. Returns the number of bins consumed.
    ///
    /// `out` is zeroed first. Once every bucket is closed the remaining
    /// high bins are dropped.
    pub fn aggregate(&self, bins: &[RawBinSample], out: &mut [u8]) -> usize {
        out.fill(0);
        if out.is_empty() {
            return 0;
        }

        let mut bucket = 0usize;
        for (i, bin) in bins.iter().enumerate() {
            let db = self.scale.to_db(bin.power());
            if out[bucket] < db {
                out[bucket] = db;
            }

            if (i + 1) % bucket_stride(i) == 0 {
                bucket += 1;
                if bucket == out.len() {
                    return i + 1;
                }
            }
        }
        bins.len()
    }
}

impl std::fmt::Debug for BinAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinAggregator").finish_non_exhaustive()
    }
}
