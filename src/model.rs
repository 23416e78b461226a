//! Core data models for the life canvas.
//! Grid geometry, cell states, playback speed and the page-level view config.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::AppError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major index into the engine's flat cell buffer.
    pub fn index(&self, row: u32, col: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Cell {
    Dead = 0,
    Alive = 1,
}

impl Cell {
    pub fn from_byte(byte: u8) -> Self {
        if byte == 0 { Cell::Dead } else { Cell::Alive }
    }
}

/// Number of generations advanced per rendered frame. Never zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct PlaybackSpeed(NonZeroU32);

impl PlaybackSpeed {
    pub const ONE: PlaybackSpeed = PlaybackSpeed(NonZeroU32::MIN);

    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(PlaybackSpeed)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Interprets raw slider text under `policy`, bounded by `[min, max]`.
    pub fn parse(
        raw: &str,
        policy: SpeedPolicy,
        min: PlaybackSpeed,
        max: PlaybackSpeed,
    ) -> Result<Self, SpeedError> {
        let raw = raw.trim();
        match policy {
            SpeedPolicy::Strict => {
                let value: u32 = raw
                    .parse()
                    .map_err(|_| SpeedError::NotAnInteger(raw.to_string()))?;
                if value < min.get() || value > max.get() {
                    return Err(SpeedError::OutOfRange {
                        value: f64::from(value),
                        min: min.get(),
                        max: max.get(),
                    });
                }
                PlaybackSpeed::new(value).ok_or(SpeedError::OutOfRange {
                    value: 0.0,
                    min: min.get(),
                    max: max.get(),
                })
            }
            SpeedPolicy::Clamp => {
                let value: f64 = raw
                    .parse()
                    .map_err(|_| SpeedError::NotANumber(raw.to_string()))?;
                if !value.is_finite() {
                    return Err(SpeedError::NotANumber(raw.to_string()));
                }
                let clamped = value
                    .round()
                    .clamp(f64::from(min.get()), f64::from(max.get()));
                Ok(PlaybackSpeed::new(clamped as u32).unwrap_or(min))
            }
        }
    }
}

impl Default for PlaybackSpeed {
    fn default() -> Self {
        PlaybackSpeed::ONE
    }
}

impl fmt::Display for PlaybackSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// How slider input that is not a clean in-range integer is treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedPolicy {
    /// Round to the nearest integer and clamp into the configured bounds.
    #[default]
    Clamp,
    /// Reject anything that is not already an in-range integer.
    Strict,
}

#[derive(Debug, Error, PartialEq)]
pub enum SpeedError {
    #[error("speed `{0}` is not a number")]
    NotANumber(String),
    #[error("speed `{0}` is not an integer")]
    NotAnInteger(String),
    #[error("speed {value} outside {min}..={max}")]
    OutOfRange { value: f64, min: u32, max: u32 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Side of one cell square in backing pixels; the border adds one more.
    pub cell_size: u32,
    pub grid_color: String,
    pub dead_color: String,
    pub alive_color: String,
    pub initial_speed: u32,
    pub speed_min: u32,
    pub speed_max: u32,
    pub speed_policy: SpeedPolicy,
    /// Number of frame samples the FPS readout averages over.
    pub fps_window: usize,
    pub autoplay: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            cell_size: 5,
            grid_color: "#CCCCCC".to_string(),
            dead_color: "#FFFFFF".to_string(),
            alive_color: "#000000".to_string(),
            initial_speed: 1,
            speed_min: 1,
            speed_max: 10,
            speed_policy: SpeedPolicy::Clamp,
            fps_window: 100,
            autoplay: true,
        }
    }
}

impl ViewConfig {
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let config: ViewConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.cell_size == 0 {
            return Err(AppError::ConfigInvalid("cell_size must be at least 1".into()));
        }
        if self.fps_window == 0 {
            return Err(AppError::ConfigInvalid("fps_window must be at least 1".into()));
        }
        if self.speed_min == 0 || self.speed_min > self.speed_max {
            return Err(AppError::ConfigInvalid(format!(
                "speed bounds {}..={} must satisfy 1 <= min <= max",
                self.speed_min, self.speed_max
            )));
        }
        if self.initial_speed < self.speed_min || self.initial_speed > self.speed_max {
            return Err(AppError::ConfigInvalid(format!(
                "initial_speed {} outside {}..={}",
                self.initial_speed, self.speed_min, self.speed_max
            )));
        }
        Ok(())
    }

    pub fn speed_bounds(&self) -> (PlaybackSpeed, PlaybackSpeed) {
        let min = PlaybackSpeed::new(self.speed_min).unwrap_or_default();
        let max = PlaybackSpeed::new(self.speed_max).unwrap_or(min).max(min);
        (min, max)
    }

    pub fn initial_speed(&self) -> PlaybackSpeed {
        let (min, max) = self.speed_bounds();
        PlaybackSpeed::new(self.initial_speed)
            .unwrap_or(min)
            .clamp(min, max)
    }
}
