/*
 *  config.rs
 *
 *  LySpectrum - column spectrum canvas
 *  (c) 2020-26 Stuart Hunter
 *
 *  Layered configuration: defaults, YAML file, command line
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

use serde::{Deserialize, Serialize};
use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::canvas::SpectrumSettings;
use crate::constants::{DEFAULT_DISPLAY_HEIGHT, DEFAULT_DISPLAY_WIDTH, DEFAULT_FPS, DEFAULT_SAMPLE_RATE_HZ};
use crate::layout::Mode;
use crate::pacer::Pacer;
use crate::palette::Palette;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level configuration, every field optional so layers can stack.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub log_level: Option<String>,     // e.g., "info" | "debug"
    pub display: Option<DisplayConfig>,
    pub spectrum: Option<SpectrumConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DisplayConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// landscape flipped, 180 degrees
    pub rotate: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SpectrumConfig {
    pub mode: Option<String>,
    pub gradient: Option<bool>,
    pub show_peaks: Option<bool>,
    pub palette: Option<String>,
    /// minimum interval between rendered frames, 0 renders every call
    pub min_tick_ms: Option<u64>,
    pub fps: Option<u32>,
    pub sample_rate_hz: Option<u32>,
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "lyspectrum", about = "LySpectrum column spectrum demo", version)]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    #[arg(long)]
    pub display_width: Option<u32>,
    #[arg(long)]
    pub display_height: Option<u32>,
    #[arg(long, action = ArgAction::Set)]
    pub display_rotate: Option<bool>,
    /// single | stereo | mirror | inverted | antimirror | mixed | waterfall
    #[arg(long)]
    pub mode: Option<String>,
    #[arg(long)]
    pub palette: Option<String>,
    #[arg(long, action = ArgAction::Set)]
    pub gradient: Option<bool>,
    #[arg(long, action = ArgAction::Set)]
    pub show_peaks: Option<bool>,
    #[arg(long)]
    pub min_tick_ms: Option<u64>,
    #[arg(long)]
    pub fps: Option<u32>,
    #[arg(long)]
    pub sample_rate_hz: Option<u32>,
    /// stop after this many frames (runs until Ctrl-C otherwise)
    #[arg(long)]
    pub frames: Option<u64>,
    /// step through the drawable modes every N frames
    #[arg(long)]
    pub cycle_modes: Option<u64>,
    /// write the last frame as a binary PPM
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub dump: Option<PathBuf>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Public entry point: read YAML, merge, apply `cli`, validate.
pub fn load(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;
    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/lyspectrum/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/lyspectrum/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/lyspectrum.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["lyspectrum.yaml", "config.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    parse_yaml(&s)
}

pub fn parse_yaml(s: &str) -> Result<Config, ConfigError> {
    let cfg: Config = serde_yaml::from_str(s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
pub fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some()      { dst.log_level = src.log_level; }
    match (&mut dst.display, src.display) {
        (None, Some(c)) => dst.display = Some(c),
        (Some(d), Some(s)) => merge_display(d, s),
        _ => {}
    }
    match (&mut dst.spectrum, src.spectrum) {
        (None, Some(c)) => dst.spectrum = Some(c),
        (Some(d), Some(s)) => merge_spectrum(d, s),
        _ => {}
    }
}

fn merge_display(dst: &mut DisplayConfig, src: DisplayConfig) {
    if src.width.is_some()       { dst.width = src.width; }
    if src.height.is_some()      { dst.height = src.height; }
    if src.rotate.is_some()      { dst.rotate = src.rotate; }
}

fn merge_spectrum(dst: &mut SpectrumConfig, src: SpectrumConfig) {
    if src.mode.is_some()            { dst.mode = src.mode; }
    if src.gradient.is_some()        { dst.gradient = src.gradient; }
    if src.show_peaks.is_some()      { dst.show_peaks = src.show_peaks; }
    if src.palette.is_some()         { dst.palette = src.palette; }
    if src.min_tick_ms.is_some()     { dst.min_tick_ms = src.min_tick_ms; }
    if src.fps.is_some()             { dst.fps = src.fps; }
    if src.sample_rate_hz.is_some()  { dst.sample_rate_hz = src.sample_rate_hz; }
}

pub fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some()       { cfg.log_level = cli.log_level.clone(); }

    let display = DisplayConfig {
        width: cli.display_width,
        height: cli.display_height,
        rotate: cli.display_rotate,
    };
    if display != DisplayConfig::default() {
        merge(cfg, Config { display: Some(display), ..Default::default() });
    }

    let spectrum = SpectrumConfig {
        mode: cli.mode.clone(),
        gradient: cli.gradient,
        show_peaks: cli.show_peaks,
        palette: cli.palette.clone(),
        min_tick_ms: cli.min_tick_ms,
        fps: cli.fps,
        sample_rate_hz: cli.sample_rate_hz,
    };
    if spectrum != SpectrumConfig::default() {
        merge(cfg, Config { spectrum: Some(spectrum), ..Default::default() });
    }
}

/// Put any invariants here (required fields, ranges, etc.)
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(display) = cfg.display.as_ref() {
        if display.width == Some(0) || display.height == Some(0) {
            return Err(ConfigError::Validation("display width/height must be > 0".into()));
        }
    }
    if let Some(spectrum) = cfg.spectrum.as_ref() {
        if spectrum.fps == Some(0) {
            return Err(ConfigError::Validation("spectrum fps must be > 0".into()));
        }
        if spectrum.sample_rate_hz == Some(0) {
            return Err(ConfigError::Validation("spectrum sample_rate_hz must be > 0".into()));
        }
        if let Some(name) = spectrum.palette.as_deref() {
            if Palette::by_name(name).is_none() {
                return Err(ConfigError::Validation(format!(
                    "unknown palette '{}', expected one of {}",
                    name,
                    Palette::names().join(", ")
                )));
            }
        }
    }
    Ok(())
}

impl Config {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    pub fn display_size(&self) -> (u32, u32) {
        let d = self.display.as_ref();
        (
            d.and_then(|d| d.width).unwrap_or(DEFAULT_DISPLAY_WIDTH),
            d.and_then(|d| d.height).unwrap_or(DEFAULT_DISPLAY_HEIGHT),
        )
    }

    pub fn rotated(&self) -> bool {
        self.display.as_ref().and_then(|d| d.rotate).unwrap_or(false)
    }

    fn spectrum_or_default(&self) -> SpectrumConfig {
        self.spectrum.clone().unwrap_or_default()
    }

    pub fn spectrum_settings(&self) -> SpectrumSettings {
        let s = self.spectrum_or_default();
        let defaults = SpectrumSettings::default();
        SpectrumSettings {
            mode: s.mode.as_deref().map(Mode::from_name).unwrap_or(defaults.mode),
            gradient: s.gradient.unwrap_or(defaults.gradient),
            show_peaks: s.show_peaks.unwrap_or(defaults.show_peaks),
        }
    }

    pub fn palette(&self) -> Palette {
        self.spectrum
            .as_ref()
            .and_then(|s| s.palette.as_deref())
            .and_then(Palette::by_name)
            .unwrap_or_default()
    }

    pub fn pacer(&self) -> Pacer {
        match self.spectrum.as_ref().and_then(|s| s.min_tick_ms) {
            Some(ms) => Pacer::from_millis(ms),
            None => Pacer::always_ready(),
        }
    }

    pub fn fps(&self) -> u32 {
        self.spectrum.as_ref().and_then(|s| s.fps).unwrap_or(DEFAULT_FPS)
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.spectrum.as_ref().and_then(|s| s.sample_rate_hz).unwrap_or(DEFAULT_SAMPLE_RATE_HZ)
    }
}
