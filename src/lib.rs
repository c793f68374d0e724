/*
 *  lib.rs
 *
 *  LySpectrum - column spectrum canvas
 *  (c) 2020-26 Stuart Hunter
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

pub mod constants;
pub mod dbfs;
pub mod aggregator;
pub mod gradient;
pub mod column;
pub mod layout;
pub mod palette;
pub mod pacer;
pub mod vframebuf;
pub mod spectrum;
pub mod display;
pub mod canvas;
pub mod config;

pub use aggregator::{BinAggregator, RawBinSample};
pub use canvas::{Canvas, SpectrumSettings};
pub use column::{Channel, ColumnState};
pub use dbfs::{DbScale, DbTable};
pub use display::{ColumnPainter, ColumnSurface, DisplayError};
pub use gradient::GradientRamp;
pub use layout::{LayoutGeometry, Mode};
pub use palette::Palette;
pub use spectrum::{FftSource, SpectrumSource, StaticSource};
pub use vframebuf::VarFrameBuf;
