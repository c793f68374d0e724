/*
 *  palette.rs
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

/// Colors used by the spectrum canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub bg: Rgb565,
    /// column base color
    pub sp_col_b: Rgb565,
    /// column tip color
    pub sp_col_g: Rgb565,
    pub sp_peak: Rgb565,
}

pub const PALETTES: [Palette; 4] = [
    Palette {
        name: "default",
        bg: Rgb565::BLACK,
        sp_col_b: Rgb565::new(0, 24, 31),
        sp_col_g: Rgb565::new(0, 63, 8),
        sp_peak: Rgb565::new(31, 63, 0),
    },
    Palette {
        name: "aqua",
        bg: Rgb565::new(0, 4, 6),
        sp_col_b: Rgb565::new(0, 20, 16),
        sp_col_g: Rgb565::new(8, 63, 31),
        sp_peak: Rgb565::WHITE,
    },
    Palette {
        name: "snow",
        bg: Rgb565::WHITE,
        sp_col_b: Rgb565::new(8, 16, 8),
        sp_col_g: Rgb565::new(20, 40, 20),
        sp_peak: Rgb565::new(31, 0, 0),
    },
    Palette {
        name: "fire",
        bg: Rgb565::BLACK,
        sp_col_b: Rgb565::new(31, 0, 0),
        sp_col_g: Rgb565::new(31, 63, 0),
        sp_peak: Rgb565::WHITE,
    },
];

impl Palette {
    pub fn by_name(name: &str) -> Option<Palette> {
        let name = name.trim();
        PALETTES.iter().copied().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn names() -> Vec<&'static str> {
        PALETTES.iter().map(|p| p.name).collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        PALETTES[0]
    }
}
