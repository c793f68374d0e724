/*
 *  display/error.rs
 *
 *  LySpectrum - column spectrum canvas
 *  (c) 2020-26 Stuart Hunter
 *
 *  Error types for the drawing surface
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

use std::fmt;
use std::error::Error;
use embedded_graphics::primitives::Rectangle;

/// Error type for surface and geometry operations
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayError {
    /// Spectrum rectangle does not fit on the surface
    InvalidGeometry { rect: Rectangle, width: u32, height: u32 },

    /// Drawing operation failed
    DrawingError(String),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::InvalidGeometry { rect, width, height } =>
                write!(f, "Spectrum area {}x{} at ({}, {}) exceeds {}x{} surface",
                    rect.size.width, rect.size.height, rect.top_left.x, rect.top_left.y, width, height),
            DisplayError::DrawingError(msg) =>
                write!(f, "Drawing error: {}", msg),
        }
    }
}

impl Error for DisplayError {}

impl From<core::convert::Infallible> for DisplayError {
    fn from(err: core::convert::Infallible) -> Self {
        match err {}
    }
}
