/*
 *  canvas.rs
 *
 *  LySpectrum - column spectrum canvas
 *  (c) 2020-26 Stuart Hunter
 *
 *  Spectrum canvas: per frame sampling, column animation and dispatch
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

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::{debug, info, trace};

use crate::aggregator::BinAggregator;
use crate::column::{Channel, ColumnState, ColumnStore};
use crate::constants::{COLUMN_HEIGHT_MAX, SPECTRUM_SIZE};
use crate::dbfs::{DbScale, DbTable};
use crate::display::{ColumnSurface, DisplayError};
use crate::gradient::GradientRamp;
use crate::layout::{bands_for, Band, LayoutGeometry, Mode};
use crate::pacer::Pacer;
use crate::palette::Palette;
use crate::spectrum::SpectrumSource;

/// Live presentation settings, read on every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpectrumSettings {
    pub mode: Mode,
    pub gradient: bool,
    pub show_peaks: bool,
}

impl Default for SpectrumSettings {
    fn default() -> Self {
        Self {
            mode: Mode::Single,
            gradient: true,
            show_peaks: true,
        }
    }
}

/// Column height for a decibel bucket in a band `height` rows tall.
#[inline]
pub fn scale_height(height: u32, bucket: u8) -> u8 {
    ((height * bucket as u32) >> 8).min(COLUMN_HEIGHT_MAX as u32) as u8
}

/// The spectrum canvas
///
/// Owns the column animation state for every channel and drives one
/// surface from one spectrum source. Geometry comes from the surface on
/// `initialize_surface` and can be narrowed with `set_rect`.
pub struct Canvas<S, Src> {
    surface: S,
    source: Src,
    palette: Palette,
    settings: SpectrumSettings,
    rendered_mode: Mode,
    columns: ColumnStore,
    aggregator: BinAggregator,
    pacer: Pacer,
    rect: Rectangle,
    rotated: bool,
    left: [u8; SPECTRUM_SIZE],
    right: [u8; SPECTRUM_SIZE],
}

impl<S, Src> Canvas<S, Src>
where
    S: ColumnSurface,
    Src: SpectrumSource,
{
    pub fn new(surface: S, source: Src, settings: SpectrumSettings, palette: Palette) -> Self {
        let rect = Rectangle::new(Point::zero(), surface.size());
        Self {
            surface,
            source,
            palette,
            settings,
            rendered_mode: settings.mode,
            columns: ColumnStore::new(),
            aggregator: BinAggregator::new(DbTable::new()),
            pacer: Pacer::always_ready(),
            rect,
            rotated: false,
            left: [0; SPECTRUM_SIZE],
            right: [0; SPECTRUM_SIZE],
        }
    }

    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn with_rotation(mut self, rotated: bool) -> Self {
        self.rotated = rotated;
        self
    }

    pub fn with_db_scale<D>(mut self, scale: D) -> Self
    where
        D: DbScale + Send + 'static,
    {
        self.aggregator = BinAggregator::new(scale);
        self
    }

    /// Take the whole surface, apply rotation and palette, paint the
    /// background and forget all column state.
    pub fn initialize_surface(&mut self) -> Result<(), S::Error> {
        let size = self.surface.size();
        self.rect = Rectangle::new(Point::zero(), size);
        self.surface.set_rotated(self.rotated);
        self.surface.set_palette(&self.palette);
        self.surface.fill_rect(self.rect, self.palette.bg)?;
        self.columns.reset();
        self.rendered_mode = self.settings.mode;

        let geo = LayoutGeometry::for_width(size.width);
        info!(
            "Spectrum surface {}x{}{}, {} columns step {} width {}",
            size.width,
            size.height,
            if self.rotated { " (rotated)" } else { "" },
            geo.count,
            geo.step,
            geo.col_width
        );
        Ok(())
    }

    /// Paint the active rectangle with the palette background.
    pub fn clear_surface(&mut self) -> Result<(), S::Error> {
        self.surface.fill_rect(self.rect, self.palette.bg)
    }

    /// Render one frame.
    ///
    /// With `clear` set every column is erased and all animation state is
    /// zeroed; nothing is sampled and no column ticks.
    pub fn render_frame(&mut self, clear: bool) -> Result<(), S::Error> {
        if !clear && !self.pacer.is_ready() {
            trace!("Spectrum frame skipped, pacer not ready");
            return Ok(());
        }

        if self.settings.mode != self.rendered_mode {
            debug!("Spectrum mode {} -> {}", self.rendered_mode.name(), self.settings.mode.name());
            self.columns.reset();
            self.rendered_mode = self.settings.mode;
        }

        let bands = bands_for(self.settings.mode, self.rect);
        if bands.is_empty() {
            trace!("Spectrum mode {} draws nothing", self.settings.mode.name());
            return Ok(());
        }

        if clear {
            self.columns.reset();
        } else {
            self.sample_channels();
        }

        for band in &bands {
            self.draw_spectrum(band, clear)?;
        }
        Ok(())
    }

    fn sample_channels(&mut self) {
        self.source.sample(Channel::Left, &mut self.left, &self.aggregator);
        self.source.sample(Channel::Right, &mut self.right, &self.aggregator);
    }

    fn draw_spectrum(&mut self, band: &Band, clear: bool) -> Result<(), S::Error> {
        let geo = LayoutGeometry::for_width(band.rect.size.width);
        let height = band.rect.size.height;
        let ramp = GradientRamp::new(
            height,
            band.mirror,
            self.settings.gradient,
            self.palette.sp_col_b,
            self.palette.sp_col_g,
        );

        for col in 0..geo.count {
            let view = if clear {
                ColumnState::default()
            } else {
                let bucket = match band.channel {
                    Channel::Left => self.left[col],
                    Channel::Right => self.right[col],
                    Channel::Both => self.left[col].max(self.right[col]),
                };
                self.columns
                    .advance(band.channel, col, scale_height(height, bucket))
                    .map(|state| state.view(self.settings.show_peaks))
                    .unwrap_or_default()
            };

            let rect = geo.column_rect(&band.rect, col);
            self.surface.draw_column(clear, &view, rect, band.mirror, &ramp)?;
        }
        Ok(())
    }

    /// Switch presentation mode; column state restarts from zero.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.settings.mode {
            info!("Spectrum mode {}", mode.name());
            self.settings.mode = mode;
        }
        if mode != self.rendered_mode {
            self.columns.reset();
            self.rendered_mode = mode;
        }
    }

    pub fn mode(&self) -> Mode {
        self.settings.mode
    }

    pub fn set_flags(&mut self, gradient: bool, show_peaks: bool) {
        self.settings.gradient = gradient;
        self.settings.show_peaks = show_peaks;
    }

    pub fn settings(&self) -> &SpectrumSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SpectrumSettings {
        &mut self.settings
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: Palette) {
        debug!("Spectrum palette {}", palette.name);
        self.palette = palette;
        self.surface.set_palette(&palette);
    }

    pub fn rect(&self) -> Rectangle {
        self.rect
    }

    /// Restrict drawing to `rect`, which must lie inside the surface.
    pub fn set_rect(&mut self, rect: Rectangle) -> Result<(), DisplayError> {
        let size = self.surface.size();
        let fits = rect.top_left.x >= 0
            && rect.top_left.y >= 0
            && (rect.top_left.x as u32).checked_add(rect.size.width).is_some_and(|r| r <= size.width)
            && (rect.top_left.y as u32).checked_add(rect.size.height).is_some_and(|b| b <= size.height);
        if !fits {
            return Err(DisplayError::InvalidGeometry {
                rect,
                width: size.width,
                height: size.height,
            });
        }

        if rect != self.rect {
            info!(
                "Spectrum area {}x{} at ({}, {})",
                rect.size.width, rect.size.height, rect.top_left.x, rect.top_left.y
            );
            self.rect = rect;
            self.columns.reset();
        }
        Ok(())
    }

    /// Current animation state of one column.
    pub fn column(&self, channel: Channel, col: usize) -> Option<ColumnState> {
        self.columns.get(channel, col)
    }

    pub fn is_clear(&self) -> bool {
        self.columns.is_clear()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn source_mut(&mut self) -> &mut Src {
        &mut self.source
    }

    pub fn into_parts(self) -> (S, Src) {
        (self.surface, self.source)
    }
}
