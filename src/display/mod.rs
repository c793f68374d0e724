/*
 *  display/mod.rs
 *
 *  LySpectrum - column spectrum canvas
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display subsystem - rendering boundary and reference painter
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

// Core trait definitions
pub mod traits;
pub mod error;

// Column painter over embedded-graphics targets
pub mod painter;

// Surface implementations
pub mod drivers;

// Re-exports for convenience
pub use traits::ColumnSurface;
pub use error::DisplayError;
pub use painter::ColumnPainter;
