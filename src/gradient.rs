/*
 *  gradient.rs
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

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

/// Per-row colors for one column height, row 0 at the column base.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GradientRamp {
    rows: Vec<Rgb565>,
}

impl GradientRamp {
    /// Build the ramp for `height` rows.
    ///
    /// Mirrored columns swap the endpoints so the ramp still runs from the
    /// base of the bar to its tip once the band is flipped.
    pub fn new(height: u32, mirror: bool, use_gradient: bool, bottom: Rgb565, top: Rgb565) -> Self {
        let (base, tip) = if mirror { (top, bottom) } else { (bottom, top) };

        let rows = if !use_gradient || height <= 1 {
            vec![base; height as usize]
        } else {
            let steps = (height - 1) as i32;
            (0..height as i32)
                .map(|i| {
                    Rgb565::new(
                        lerp(base.r(), tip.r(), i, steps),
                        lerp(base.g(), tip.g(), i, steps),
                        lerp(base.b(), tip.b(), i, steps),
                    )
                })
                .collect()
        };

        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Color for `row`; rows past the end repeat the tip color.
    #[inline]
    pub fn color(&self, row: usize) -> Option<Rgb565> {
        self.rows.get(row).or_else(|| self.rows.last()).copied()
    }

    pub fn as_slice(&self) -> &[Rgb565] {
        &self.rows
    }
}

// integer step, truncates toward zero like the panel firmware did
#[inline]
fn lerp(from: u8, to: u8, i: i32, steps: i32) -> u8 {
    let from = from as i32;
    let to = to as i32;
    (from + (to - from) * i / steps) as u8
}
