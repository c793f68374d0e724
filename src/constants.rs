/*
 *  constants.rs
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

pub const FFT_SIZE: usize = 1024;               // analysis frame length
pub const FFT_BINS: usize = FFT_SIZE / 2;       // one-sided bins handed to the aggregator
pub const SPECTRUM_SIZE: usize = 128;           // display buckets per channel
pub const N_DB: usize = 256;                    // decibel table resolution (byte scale)

pub const CHANNEL_COUNT: usize = 3;             // left, right, both

// peak sits at target + 1, so targets must leave one step of headroom
pub const COLUMN_HEIGHT_MAX: u8 = u8::MAX - 1;

pub const DEFAULT_DISPLAY_WIDTH: u32 = 320;
pub const DEFAULT_DISPLAY_HEIGHT: u32 = 240;
pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 44_100;
pub const DEFAULT_FPS: u32 = 40;
