/*
 *  main.rs
 *
 *  LySpectrum - column spectrum canvas
 *  (c) 2020-26 Stuart Hunter
 *
 *  Demo: synthetic stereo signal rendered into an in-memory panel
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

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use embedded_graphics::pixelcolor::Rgb565;
use env_logger::Env;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::MissedTickBehavior;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use lyspectrum::config::{self, Cli};
use lyspectrum::{Canvas, ColumnPainter, FftSource, VarFrameBuf};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Two swept tones, a pulsing low end and a little hiss.
struct SignalGen {
    sample_rate: f32,
    t: u64,
    phase_l: f32,
    phase_r: f32,
    phase_kick: f32,
    rng: StdRng,
}

impl SignalGen {
    fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate as f32,
            t: 0,
            phase_l: 0.0,
            phase_r: 0.0,
            phase_kick: 0.0,
            rng: StdRng::seed_from_u64(0x5eed),
        }
    }

    // log sweep 60 Hz .. 12 kHz over `period` seconds, there and back
    fn sweep(&self, secs: f32, period: f32) -> f32 {
        let x = (secs / period).fract();
        let tri = if x < 0.5 { x * 2.0 } else { 2.0 - x * 2.0 };
        60.0 * (12_000.0f32 / 60.0).powf(tri)
    }

    fn fill(&mut self, left: &mut [i16], right: &mut [i16]) {
        let tau = 2.0 * std::f32::consts::PI;
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let secs = self.t as f32 / self.sample_rate;
            self.phase_l = (self.phase_l + tau * self.sweep(secs, 6.0) / self.sample_rate) % tau;
            self.phase_r = (self.phase_r + tau * self.sweep(secs + 1.5, 9.0) / self.sample_rate) % tau;
            self.phase_kick = (self.phase_kick + tau * 55.0 / self.sample_rate) % tau;

            // kick decays over each half second
            let env = (-(secs % 0.5) * 12.0).exp();
            let kick = self.phase_kick.sin() * env * 9_000.0;

            let hiss_l = self.rng.random_range(-400.0f32..400.0);
            let hiss_r = self.rng.random_range(-400.0f32..400.0);

            *l = (self.phase_l.sin() * 12_000.0 + kick + hiss_l) as i16;
            *r = (self.phase_r.sin() * 10_000.0 + kick + hiss_r) as i16;
            self.t += 1;
        }
    }
}

#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<()> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Stopping.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Stopping.");
        }
    }
    Ok(())
}

#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await?;
    info!("Ctrl-C received. Stopping.");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli)?;

    if cli.dump_config {
        // Pretty YAML of effective config
        let s = serde_yaml::to_string(&cfg)?;
        println!("{s}");
        return Ok(());
    }

    env_logger::Builder::from_env(Env::default().default_filter_or(cfg.log_level()))
        .format_timestamp_secs()
        .init();

    info!("{} v.{} built {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let (width, height) = cfg.display_size();
    let palette = cfg.palette();
    let settings = cfg.spectrum_settings();
    let sample_rate = cfg.sample_rate_hz();
    let fps = cfg.fps();

    let panel = VarFrameBuf::<Rgb565>::new(width, height, palette.bg);
    let mut canvas = Canvas::new(
        ColumnPainter::new(panel, &palette),
        FftSource::new(sample_rate),
        settings,
        palette,
    )
    .with_pacer(cfg.pacer())
    .with_rotation(cfg.rotated());
    canvas.initialize_surface()?;

    info!(
        "Mode {}, palette {}, gradient {}, peaks {}, {} fps",
        settings.mode.name(),
        palette.name,
        settings.gradient,
        settings.show_peaks,
        fps
    );

    let chunk = (sample_rate / fps).max(1) as usize;
    let mut left = vec![0i16; chunk];
    let mut right = vec![0i16; chunk];
    let mut signal = SignalGen::new(sample_rate);

    let mut ticker = tokio::time::interval(Duration::from_secs_f64(1.0 / fps as f64));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let mut frame: u64 = 0;
    loop {
        tokio::select! {
            res = &mut shutdown => {
                res.context("installing signal handlers")?;
                break;
            }
            _ = ticker.tick() => {
                signal.fill(&mut left, &mut right);
                canvas.source_mut().push_pcm(&left, &right);
                canvas.render_frame(false)?;
                frame += 1;

                if let Some(every) = cli.cycle_modes.filter(|n| *n > 0) {
                    if frame % every == 0 {
                        let next = canvas.mode().next();
                        canvas.clear_surface()?;
                        canvas.set_mode(next);
                    }
                }

                if frame % fps as u64 == 0 {
                    debug!("Frame {}", frame);
                }
                if cli.frames.is_some_and(|n| frame >= n) {
                    break;
                }
            }
        }
    }

    info!("Rendered {} frames", frame);

    if let Some(path) = cli.dump.as_ref() {
        let (painter, _) = canvas.into_parts();
        let ppm = painter.into_inner().to_ppm();
        std::fs::write(path, ppm).with_context(|| format!("writing {}", path.display()))?;
        info!("Last frame written to {}", path.display());
    }

    Ok(())
}
