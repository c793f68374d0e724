/*
 *  spectrum.rs
 *
 *  LySpectrum - column spectrum canvas
 *  (c) 2020-26 Stuart Hunter
 *
 *  Spectrum sources: PCM history to fixed point FFT bins to dB buckets
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

use std::sync::Arc;

use log::debug;
use rustfft::num_complex::Complex;

use crate::aggregator::{BinAggregator, RawBinSample};
use crate::column::Channel;
use crate::constants::{FFT_BINS, FFT_SIZE};

/// Anything that can fill a channel's decibel buckets for one frame.
pub trait SpectrumSource {
    /// Fill `out` with one decibel byte per bucket for `channel`.
    ///
    /// `Channel::Both` is the louder of left and right in each bucket.
    fn sample(&mut self, channel: Channel, out: &mut [u8], aggregator: &BinAggregator);
}

/// Louder of the left and right buckets, one bucket at a time.
fn sample_louder<S>(source: &mut S, out: &mut [u8], aggregator: &BinAggregator)
where
    S: SpectrumSource + ?Sized,
{
    source.sample(Channel::Left, out, aggregator);
    let mut right = vec![0u8; out.len()];
    source.sample(Channel::Right, &mut right, aggregator);
    for (o, r) in out.iter_mut().zip(right) {
        *o = (*o).max(r);
    }
}

/// rustfft backed source over a rolling PCM history per channel
pub struct FftSource {
    sample_rate: u32,
    fft: Arc<dyn rustfft::Fft<f32>>,
    window: Vec<f32>,
    amp_scale: f32,     // 2 / sum(window), full scale sine lands near i16::MAX
    buf: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
    bins: Vec<RawBinSample>,
    left: Vec<i16>,
    right: Vec<i16>,
}

impl FftSource {
    pub fn new(sample_rate: u32) -> Self {
        let mut planner = rustfft::FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(FFT_SIZE);

        // Hann
        let window = (0..FFT_SIZE)
            .map(|i| 0.5f32 * (1.0 - (2.0 * std::f32::consts::PI * (i as f32) / (FFT_SIZE as f32)).cos()))
            .collect::<Vec<_>>();
        let win_sum: f32 = window.iter().copied().sum();

        let scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];
        debug!("FFT source: {} point, {} Hz", FFT_SIZE, sample_rate);

        Self {
            sample_rate,
            fft,
            window,
            amp_scale: 2.0 / win_sum,
            buf: vec![Complex::new(0.0, 0.0); FFT_SIZE],
            scratch,
            bins: vec![RawBinSample::default(); FFT_BINS],
            left: Vec::with_capacity(FFT_SIZE * 2),
            right: Vec::with_capacity(FFT_SIZE * 2),
        }
    }

    /// Append per-channel PCM; only the newest `FFT_SIZE` samples are kept.
    pub fn push_pcm(&mut self, left: &[i16], right: &[i16]) {
        Self::push_history(&mut self.left, left);
        Self::push_history(&mut self.right, right);
    }

    fn push_history(history: &mut Vec<i16>, pcm: &[i16]) {
        history.extend_from_slice(pcm);
        if history.len() > FFT_SIZE {
            let excess = history.len() - FFT_SIZE;
            history.drain(..excess);
        }
    }

    /// Frequency of the centre of raw bin `k`.
    pub fn bin_hz(&self, k: usize) -> f32 {
        k as f32 * self.sample_rate as f32 / FFT_SIZE as f32
    }

    /// Window, transform and quantise one channel history into `self.bins`.
    fn transform(&mut self, right: bool) -> &[RawBinSample] {
        let pick = |i: usize, h: &[i16]| -> f32 {
            // newest samples sit at the end, older slots are zero padded
            let pad = FFT_SIZE - h.len();
            if i < pad { 0.0 } else { h[i - pad] as f32 }
        };

        let history = if right { &self.right } else { &self.left };
        for i in 0..FFT_SIZE {
            self.buf[i] = Complex::new(pick(i, history) * self.window[i], 0.0);
        }

        self.fft.process_with_scratch(&mut self.buf, &mut self.scratch);

        let quantise = |v: f32| v.round().clamp(i16::MIN as f32, i16::MAX as f32) as i16;
        for (bin, c) in self.bins.iter_mut().zip(self.buf.iter()) {
            *bin = RawBinSample::new(quantise(c.re * self.amp_scale), quantise(c.im * self.amp_scale));
        }
        &self.bins
    }
}

impl SpectrumSource for FftSource {
    fn sample(&mut self, channel: Channel, out: &mut [u8], aggregator: &BinAggregator) {
        let right = match channel {
            Channel::Left => false,
            Channel::Right => true,
            Channel::Both => return sample_louder(self, out, aggregator),
        };
        let bins = self.transform(right);
        aggregator.aggregate(bins, out);
    }
}

/// Fixed raw bins per channel, handy for replaying captured frames.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub left: Vec<RawBinSample>,
    pub right: Vec<RawBinSample>,
}

impl StaticSource {
    pub fn new(left: Vec<RawBinSample>, right: Vec<RawBinSample>) -> Self {
        Self { left, right }
    }

    /// Same value in every bin of both channels.
    pub fn uniform(bin: RawBinSample) -> Self {
        Self::new(vec![bin; FFT_BINS], vec![bin; FFT_BINS])
    }

    pub fn silent() -> Self {
        Self::uniform(RawBinSample::default())
    }
}

impl SpectrumSource for StaticSource {
    fn sample(&mut self, channel: Channel, out: &mut [u8], aggregator: &BinAggregator) {
        match channel {
            Channel::Left => {
                aggregator.aggregate(&self.left, out);
            }
            Channel::Right => {
                aggregator.aggregate(&self.right, out);
            }
            Channel::Both => sample_louder(self, out, aggregator),
        }
    }
}
