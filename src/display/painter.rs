/*
 *  display/painter.rs
 *
 *  LySpectrum - column spectrum canvas
 *  (c) 2020-26 Stuart Hunter
 *
 *  Column painter over any embedded-graphics Rgb565 draw target
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::column::ColumnState;
use crate::display::traits::ColumnSurface;
use crate::gradient::GradientRamp;
use crate::palette::Palette;

/// Paints spectrum columns onto a `DrawTarget`
///
/// Only the rows between the previous and current bar height are
/// repainted with the ramp; everything above the bar is erased each
/// frame apart from the peak marker row.
pub struct ColumnPainter<D> {
    target: D,
    bg: Rgb565,
    peak: Rgb565,
    rotated: bool,
}

impl<D> ColumnPainter<D>
where
    D: DrawTarget<Color = Rgb565> + OriginDimensions,
{
    pub fn new(target: D, palette: &Palette) -> Self {
        Self {
            target,
            bg: palette.bg,
            peak: palette.sp_peak,
            rotated: false,
        }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    fn fill(&mut self, rect: Rectangle, color: Rgb565) -> Result<(), D::Error> {
        if rect.size.width == 0 || rect.size.height == 0 {
            return Ok(());
        }
        let rect = if self.rotated { self.rotate(rect) } else { rect };
        rect.into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target)
    }

    // 180 degree turn about the surface centre
    fn rotate(&self, rect: Rectangle) -> Rectangle {
        let Size { width, height } = self.target.size();
        let x = width as i32 - rect.top_left.x - rect.size.width as i32;
        let y = height as i32 - rect.top_left.y - rect.size.height as i32;
        Rectangle::new(Point::new(x, y), rect.size)
    }
}

/// Rows `[from, to)` of a column, counted from its base.
fn row_span(rect: &Rectangle, from: u32, to: u32, mirror: bool) -> Rectangle {
    let rows = to.saturating_sub(from);
    let y = if mirror {
        rect.top_left.y + from as i32
    } else {
        rect.top_left.y + rect.size.height as i32 - to as i32
    };
    Rectangle::new(Point::new(rect.top_left.x, y), Size::new(rect.size.width, rows))
}

impl<D> ColumnSurface for ColumnPainter<D>
where
    D: DrawTarget<Color = Rgb565> + OriginDimensions,
{
    type Error = D::Error;

    fn size(&self) -> Size {
        self.target.size()
    }

    fn fill_rect(&mut self, rect: Rectangle, color: Rgb565) -> Result<(), Self::Error> {
        self.fill(rect, color)
    }

    fn draw_column(
        &mut self,
        clear: bool,
        column: &ColumnState,
        rect: Rectangle,
        mirror: bool,
        ramp: &GradientRamp,
    ) -> Result<(), Self::Error> {
        let height = rect.size.height;
        if height == 0 || rect.size.width == 0 {
            return Ok(());
        }
        if clear {
            return self.fill(rect, self.bg);
        }

        let shown = (column.shown as u32).min(height);
        let previous = (column.previous as u32).min(height);

        for row in previous..shown {
            let color = ramp.color(row as usize).unwrap_or(self.peak);
            self.fill(row_span(&rect, row, row + 1, mirror), color)?;
        }

        // peak marker sits on row peak - 1, always at or above the bar tip
        let peak_row = (column.peak as u32)
            .checked_sub(1)
            .filter(|&r| r >= shown && r < height);

        match peak_row {
            Some(row) => {
                self.fill(row_span(&rect, shown, row, mirror), self.bg)?;
                self.fill(row_span(&rect, row, row + 1, mirror), self.peak)?;
                self.fill(row_span(&rect, row + 1, height, mirror), self.bg)
            }
            None => self.fill(row_span(&rect, shown, height, mirror), self.bg),
        }
    }

    fn set_palette(&mut self, palette: &Palette) {
        self.bg = palette.bg;
        self.peak = palette.sp_peak;
    }

    fn set_rotated(&mut self, rotated: bool) {
        self.rotated = rotated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vframebuf::VarFrameBuf;
    use embedded_graphics::pixelcolor::RgbColor;

    fn painter(w: u32, h: u32) -> ColumnPainter<VarFrameBuf<Rgb565>> {
        let palette = Palette::default();
        ColumnPainter::new(VarFrameBuf::new(w, h, palette.bg), &palette)
    }

    fn flat_ramp(h: u32) -> GradientRamp {
        GradientRamp::new(h, false, false, Rgb565::GREEN, Rgb565::BLUE)
    }

    #[test]
    fn test_bar_grows_from_base() {
        let mut p = painter(4, 10);
        let rect = Rectangle::new(Point::new(1, 0), Size::new(2, 10));
        let col = ColumnState { shown: 3, previous: 0, peak: 0, fall: 1 };

        p.draw_column(false, &col, rect, false, &flat_ramp(10)).unwrap();

        let fb = p.target();
        assert_eq!(fb.count(Rgb565::GREEN), 6);
        assert_eq!(fb.pixel(1, 9), Some(Rgb565::GREEN));
        assert_eq!(fb.pixel(2, 7), Some(Rgb565::GREEN));
        assert_eq!(fb.pixel(1, 6), Some(Palette::default().bg));
        assert_eq!(fb.pixel(0, 9), Some(Palette::default().bg));
    }

    #[test]
    fn test_mirrored_bar_hangs_from_top() {
        let mut p = painter(1, 10);
        let rect = Rectangle::new(Point::zero(), Size::new(1, 10));
        let col = ColumnState { shown: 2, previous: 0, peak: 0, fall: 1 };

        p.draw_column(false, &col, rect, true, &flat_ramp(10)).unwrap();

        assert_eq!(p.target().pixel(0, 0), Some(Rgb565::GREEN));
        assert_eq!(p.target().pixel(0, 1), Some(Rgb565::GREEN));
        assert_eq!(p.target().pixel(0, 2), Some(Palette::default().bg));
    }

    #[test]
    fn test_peak_row_and_fall_erase() {
        let mut p = painter(1, 10);
        let rect = Rectangle::new(Point::zero(), Size::new(1, 10));
        let peak = Palette::default().sp_peak;

        let up = ColumnState { shown: 5, previous: 0, peak: 6, fall: 1 };
        p.draw_column(false, &up, rect, false, &flat_ramp(10)).unwrap();
        // rows 0..5 bar, row 5 peak
        assert_eq!(p.target().pixel(0, 4), Some(peak));
        assert_eq!(p.target().count(Rgb565::GREEN), 5);

        let down = ColumnState { shown: 4, previous: 5, peak: 5, fall: 2 };
        p.draw_column(false, &down, rect, false, &flat_ramp(10)).unwrap();
        assert_eq!(p.target().count(Rgb565::GREEN), 4);
        assert_eq!(p.target().pixel(0, 5), Some(peak));
        assert_eq!(p.target().pixel(0, 4), Some(Palette::default().bg));
        assert_eq!(p.target().count(peak), 1);
    }

    #[test]
    fn test_clear_erases_whole_column() {
        let mut p = painter(2, 8);
        let rect = Rectangle::new(Point::zero(), Size::new(2, 8));
        let col = ColumnState { shown: 8, previous: 0, peak: 0, fall: 1 };
        p.draw_column(false, &col, rect, false, &flat_ramp(8)).unwrap();
        assert_eq!(p.target().count(Rgb565::GREEN), 16);

        p.draw_column(true, &col, rect, false, &flat_ramp(8)).unwrap();
        assert_eq!(p.target().count(Palette::default().bg), 16);
    }

    #[test]
    fn test_repeat_draw_is_idempotent() {
        let mut p = painter(3, 12);
        let rect = Rectangle::new(Point::new(1, 0), Size::new(1, 12));
        let ramp = GradientRamp::new(12, false, true, Rgb565::RED, Rgb565::BLUE);
        let col = ColumnState { shown: 7, previous: 2, peak: 9, fall: 1 };

        p.draw_column(false, &ColumnState { shown: 2, previous: 0, peak: 3, fall: 1 }, rect, false, &ramp).unwrap();
        p.draw_column(false, &col, rect, false, &ramp).unwrap();
        let once = p.target().as_slice().to_vec();
        p.draw_column(false, &col, rect, false, &ramp).unwrap();

        assert_eq!(p.target().as_slice(), once.as_slice());
    }

    #[test]
    fn test_rotation_flips_placement() {
        let mut p = painter(4, 10);
        p.set_rotated(true);
        let rect = Rectangle::new(Point::new(0, 0), Size::new(1, 10));
        let col = ColumnState { shown: 1, previous: 0, peak: 0, fall: 1 };

        p.draw_column(false, &col, rect, false, &flat_ramp(10)).unwrap();

        // base row of column 0 lands top right
        assert_eq!(p.target().pixel(3, 0), Some(Rgb565::GREEN));
        assert_eq!(p.target().count(Rgb565::GREEN), 1);
    }
}
