/*
 *  layout.rs
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

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::warn;

use crate::column::Channel;
use crate::constants::SPECTRUM_SIZE;

/// Spectrum presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Single,      // one band, louder of L/R
    Stereo,      // L over R
    Mirror,      // L over R, R flipped
    Inverted,    // L flipped over R
    Antimirror,  // both flipped
    Mixed,       // one band, louder of L/R
    Waterfall,   // not rendered
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::Single,
        Mode::Stereo,
        Mode::Mirror,
        Mode::Inverted,
        Mode::Antimirror,
        Mode::Mixed,
        Mode::Waterfall,
    ];

    /// Parse a configuration name; unknown names fall back to `Single`.
    pub fn from_name(name: &str) -> Mode {
        match name.trim().to_ascii_lowercase().as_str() {
            "single" => Mode::Single,
            "stereo" => Mode::Stereo,
            "mirror" => Mode::Mirror,
            "inverted" => Mode::Inverted,
            "antimirror" => Mode::Antimirror,
            "mixed" => Mode::Mixed,
            "waterfall" => Mode::Waterfall,
            other => {
                warn!("Unknown spectrum mode '{}', using single", other);
                Mode::Single
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Single => "single",
            Mode::Stereo => "stereo",
            Mode::Mirror => "mirror",
            Mode::Inverted => "inverted",
            Mode::Antimirror => "antimirror",
            Mode::Mixed => "mixed",
            Mode::Waterfall => "waterfall",
        }
    }

    /// Next mode in cycling order, skipping waterfall.
    pub fn next(&self) -> Mode {
        match self {
            Mode::Single => Mode::Stereo,
            Mode::Stereo => Mode::Mirror,
            Mode::Mirror => Mode::Inverted,
            Mode::Inverted => Mode::Antimirror,
            Mode::Antimirror => Mode::Mixed,
            Mode::Mixed | Mode::Waterfall => Mode::Single,
        }
    }
}

/// One horizontal band of columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub rect: Rectangle,
    pub channel: Channel,
    pub mirror: bool,
}

/// Split `rect` into the bands `mode` draws. Waterfall draws nothing.
pub fn bands_for(mode: Mode, rect: Rectangle) -> Vec<Band> {
    let split = |left_mirror: bool, right_mirror: bool| {
        let half = rect.size.height / 2;
        let top = Rectangle::new(rect.top_left, Size::new(rect.size.width, half));
        let bottom = Rectangle::new(
            rect.top_left + Point::new(0, half as i32),
            Size::new(rect.size.width, half),
        );
        vec![
            Band { rect: top, channel: Channel::Left, mirror: left_mirror },
            Band { rect: bottom, channel: Channel::Right, mirror: right_mirror },
        ]
    };

    match mode {
        Mode::Stereo => split(false, false),
        Mode::Mirror => split(false, true),
        Mode::Inverted => split(true, false),
        Mode::Antimirror => split(true, true),
        Mode::Waterfall => Vec::new(),
        Mode::Single | Mode::Mixed => vec![Band { rect, channel: Channel::Both, mirror: false }],
    }
}

/// Column stride and placement for a band width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutGeometry {
    /// distance between column starts
    pub step: i32,
    pub col_width: i32,
    pub count: usize,
    /// span from first column start to last column end
    pub width: i32,
    /// left shift that centres the span, may be negative
    pub offset: i32,
}

impl LayoutGeometry {
    pub fn for_width(width: u32) -> Self {
        let w = width as i32;
        let step = (w + 1) / SPECTRUM_SIZE as i32 + 1;
        let col_width = step - step / 2;

        // ceil(w / step), never more columns than buckets
        let count = (((w + step - 1) / step) as usize).min(SPECTRUM_SIZE);
        if count == 0 {
            return Self { step, col_width, count, width: 0, offset: 0 };
        }

        let span = (count as i32 - 1) * step + col_width;
        let offset = (w - span) / 2;

        Self { step, col_width, count, width: span, offset }
    }

    /// Rectangle of column `col` inside `band`.
    pub fn column_rect(&self, band: &Rectangle, col: usize) -> Rectangle {
        let x = band.top_left.x + self.offset + col as i32 * self.step;
        Rectangle::new(
            Point::new(x, band.top_left.y),
            Size::new(self.col_width as u32, band.size.height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_100() {
        let g = LayoutGeometry::for_width(100);
        assert_eq!(g.step, 1);
        assert_eq!(g.col_width, 1);
        assert_eq!(g.count, 100);
        assert_eq!(g.width, 100);
        assert_eq!(g.offset, 0);
    }

    #[test]
    fn test_width_320() {
        // step 321/128+1 = 3, width 3-1 = 2, ceil(320/3) = 107
        let g = LayoutGeometry::for_width(320);
        assert_eq!(g.step, 3);
        assert_eq!(g.col_width, 2);
        assert_eq!(g.count, 107);
        assert_eq!(g.width, 106 * 3 + 2);
        assert_eq!(g.offset, 0);
    }

    #[test]
    fn test_width_160_centres() {
        // step 2, width 1, 80 columns spanning 159
        let g = LayoutGeometry::for_width(160);
        assert_eq!((g.step, g.col_width, g.count), (2, 1, 80));
        assert_eq!(g.width, 159);
        assert_eq!(g.offset, 0);
    }

    #[test]
    fn test_width_256_overhang() {
        // ceil(256/3) = 86 columns span 257, one pixel wider than the band
        let g = LayoutGeometry::for_width(256);
        assert_eq!(g.count, 86);
        assert_eq!(g.width, 257);
        assert_eq!(g.offset, 0);
    }

    #[test]
    fn test_count_capped() {
        let g = LayoutGeometry::for_width(128);
        assert_eq!(g.step, 2);
        assert!(g.count <= SPECTRUM_SIZE);
        let g = LayoutGeometry::for_width(126);
        assert_eq!((g.step, g.count), (1, 126));
    }

    #[test]
    fn test_zero_width() {
        let g = LayoutGeometry::for_width(0);
        assert_eq!(g.count, 0);
        assert_eq!(g.width, 0);
    }

    #[test]
    fn test_column_rect() {
        let band = Rectangle::new(Point::new(10, 20), Size::new(320, 60));
        let g = LayoutGeometry::for_width(320);
        let r = g.column_rect(&band, 2);
        assert_eq!(r.top_left, Point::new(16, 20));
        assert_eq!(r.size, Size::new(2, 60));
    }

    #[test]
    fn test_bands_single_and_mixed() {
        let rect = Rectangle::new(Point::zero(), Size::new(128, 64));
        for mode in [Mode::Single, Mode::Mixed] {
            let bands = bands_for(mode, rect);
            assert_eq!(bands.len(), 1);
            assert_eq!(bands[0].channel, Channel::Both);
            assert!(!bands[0].mirror);
            assert_eq!(bands[0].rect, rect);
        }
    }

    #[test]
    fn test_bands_split_modes() {
        let rect = Rectangle::new(Point::new(0, 4), Size::new(128, 65));
        let cases = [
            (Mode::Stereo, false, false),
            (Mode::Mirror, false, true),
            (Mode::Inverted, true, false),
            (Mode::Antimirror, true, true),
        ];
        for (mode, lm, rm) in cases {
            let bands = bands_for(mode, rect);
            assert_eq!(bands.len(), 2, "{:?}", mode);
            assert_eq!(bands[0].channel, Channel::Left);
            assert_eq!(bands[1].channel, Channel::Right);
            assert_eq!((bands[0].mirror, bands[1].mirror), (lm, rm), "{:?}", mode);
            assert_eq!(bands[0].rect.size.height, 32);
            assert_eq!(bands[1].rect.top_left.y, 36);
        }
    }

    #[test]
    fn test_waterfall_has_no_bands() {
        let rect = Rectangle::new(Point::zero(), Size::new(128, 64));
        assert!(bands_for(Mode::Waterfall, rect).is_empty());
    }

    #[test]
    fn test_mode_names() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_name(mode.name()), mode);
        }
        assert_eq!(Mode::from_name("Stereo "), Mode::Stereo);
        assert_eq!(Mode::from_name("spiral"), Mode::Single);
        assert_eq!(Mode::Mixed.next(), Mode::Single);
    }
}
