/*
 *  display/drivers/mock.rs
 *
 *  LySpectrum - column spectrum canvas
 *  (c) 2020-26 Stuart Hunter
 *
 *  Mock surface for testing without hardware
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
use crate::display::error::DisplayError;
use crate::display::painter::ColumnPainter;
use crate::display::traits::ColumnSurface;
use crate::gradient::GradientRamp;
use crate::palette::Palette;
use crate::vframebuf::VarFrameBuf;

use std::sync::{Arc, Mutex};

/// One recorded `draw_column` call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub clear: bool,
    pub column: ColumnState,
    pub rect: Rectangle,
    pub mirror: bool,
    pub ramp: Vec<Rgb565>,
}

/// Internal state for the mock surface (shared for inspection in tests)
#[derive(Debug, Default)]
pub struct MockSurfaceState {
    /// Every column drawn, in call order
    pub calls: Vec<DrawCall>,

    /// Number of fill_rect() calls
    pub fill_count: usize,

    /// Last palette applied
    pub last_palette: Option<&'static str>,

    /// Last rotation applied
    pub last_rotated: Option<bool>,

    /// Simulate failures (for error testing)
    pub simulate_draw_failure: bool,
}

/// Mock surface
///
/// Records every call and still paints into a framebuffer through the
/// regular column painter, so tests can check both the dispatch and the
/// resulting pixels.
pub struct MockSurface {
    painter: ColumnPainter<VarFrameBuf<Rgb565>>,
    state: Arc<Mutex<MockSurfaceState>>,
}

impl MockSurface {
    pub fn new(width: u32, height: u32) -> Self {
        let palette = Palette::default();
        Self {
            painter: ColumnPainter::new(VarFrameBuf::new(width, height, palette.bg), &palette),
            state: Arc::new(Mutex::new(MockSurfaceState::default())),
        }
    }

    /// Get reference to state for inspection in tests
    pub fn state(&self) -> Arc<Mutex<MockSurfaceState>> {
        Arc::clone(&self.state)
    }

    pub fn framebuffer(&self) -> &VarFrameBuf<Rgb565> {
        self.painter.target()
    }

    /// Drop recorded calls (useful between frames)
    pub fn take_calls(&self) -> Vec<DrawCall> {
        std::mem::take(&mut self.state.lock().unwrap().calls)
    }
}

impl ColumnSurface for MockSurface {
    type Error = DisplayError;

    fn size(&self) -> Size {
        self.painter.size()
    }

    fn fill_rect(&mut self, rect: Rectangle, color: Rgb565) -> Result<(), Self::Error> {
        self.state.lock().unwrap().fill_count += 1;
        Ok(self.painter.fill_rect(rect, color)?)
    }

    fn draw_column(
        &mut self,
        clear: bool,
        column: &ColumnState,
        rect: Rectangle,
        mirror: bool,
        ramp: &GradientRamp,
    ) -> Result<(), Self::Error> {
        {
            let mut state = self.state.lock().unwrap();
            if state.simulate_draw_failure {
                return Err(DisplayError::DrawingError("Simulated draw failure".to_string()));
            }
            state.calls.push(DrawCall {
                clear,
                column: *column,
                rect,
                mirror,
                ramp: ramp.as_slice().to_vec(),
            });
        } // Release lock before painting

        Ok(self.painter.draw_column(clear, column, rect, mirror, ramp)?)
    }

    fn set_palette(&mut self, palette: &Palette) {
        self.state.lock().unwrap().last_palette = Some(palette.name);
        self.painter.set_palette(palette);
    }

    fn set_rotated(&mut self, rotated: bool) {
        self.state.lock().unwrap().last_rotated = Some(rotated);
        self.painter.set_rotated(rotated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_surface_creation() {
        let surface = MockSurface::new(128, 64);
        assert_eq!(surface.size(), Size::new(128, 64));
        assert!(surface.state().lock().unwrap().calls.is_empty());
    }

    #[test]
    fn test_mock_surface_records_calls() {
        let mut surface = MockSurface::new(16, 8);
        let rect = Rectangle::new(Point::zero(), Size::new(1, 8));
        let ramp = GradientRamp::new(8, false, false, Rgb565::RED, Rgb565::BLUE);
        let col = ColumnState { shown: 4, previous: 0, peak: 5, fall: 1 };

        surface.draw_column(false, &col, rect, true, &ramp).unwrap();

        let calls = surface.take_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].column, col);
        assert!(calls[0].mirror);
        assert_eq!(calls[0].ramp.len(), 8);
        assert_eq!(surface.framebuffer().count(Rgb565::RED), 4);
        assert!(surface.take_calls().is_empty());
    }

    #[test]
    fn test_mock_surface_simulated_failure() {
        let mut surface = MockSurface::new(16, 8);
        let rect = Rectangle::new(Point::zero(), Size::new(1, 8));
        let ramp = GradientRamp::default();

        surface.state().lock().unwrap().simulate_draw_failure = true;
        assert!(surface.draw_column(false, &ColumnState::default(), rect, false, &ramp).is_err());

        surface.state().lock().unwrap().simulate_draw_failure = false;
        assert!(surface.draw_column(false, &ColumnState::default(), rect, false, &ramp).is_ok());
    }
}
