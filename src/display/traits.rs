/*
 *  display/traits.rs
 *
 *  LySpectrum - column spectrum canvas
 *  (c) 2020-26 Stuart Hunter
 *
 *  Rendering boundary between the spectrum canvas and a raster surface
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
use embedded_graphics::primitives::Rectangle;

use crate::column::ColumnState;
use crate::gradient::GradientRamp;
use crate::palette::Palette;

/// Raster surface the spectrum canvas renders onto
///
/// The canvas owns all animation state; a surface only turns one column
/// view into pixels. `draw_column` must be idempotent for identical input
/// within a frame.
pub trait ColumnSurface {
    type Error;

    /// Surface dimensions in pixels
    fn size(&self) -> Size;

    /// Solid fill, used for background and clears
    fn fill_rect(&mut self, rect: Rectangle, color: Rgb565) -> Result<(), Self::Error>;

    /// Paint one column
    ///
    /// With `clear` set the column area is erased and the view is ignored.
    /// Mirrored columns grow down from the top of `rect`.
    fn draw_column(
        &mut self,
        clear: bool,
        column: &ColumnState,
        rect: Rectangle,
        mirror: bool,
        ramp: &GradientRamp,
    ) -> Result<(), Self::Error>;

    /// Background and peak colors follow the active palette
    fn set_palette(&mut self, _palette: &Palette) {}

    /// Rotate output by 180 degrees (landscape flipped)
    fn set_rotated(&mut self, _rotated: bool) {}
}
