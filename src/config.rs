//! Game configuration
//!
//! Fixed tuning constants supplied at construction time. Every value is a
//! per-frame quantity against the 60 Hz reference clock (see [`crate::consts`]).
//! Invalid combinations are rejected up front so the simulation never has to
//! handle them.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a configuration is rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be a positive, finite number (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("flap_strength must be negative (upward), got {0}")]
    FlapNotUpward(f32),

    #[error("a {gap}px gap with {margin}px margins does not fit a {height}px tall viewport")]
    GapTooTall { gap: f32, margin: f32, height: f32 },

    #[error("tilt range is empty (up {up}, down {down})")]
    EmptyTiltRange { up: f32, down: f32 },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    // === Viewport ===
    /// Visible region width (px)
    pub visible_width: f32,
    /// Visible region height (px)
    pub visible_height: f32,

    // === Bird ===
    /// Downward acceleration (px/frame²)
    pub gravity: f32,
    /// Vertical velocity a flap sets (px/frame, negative = up)
    pub flap_strength: f32,
    /// Hit-box side length (px)
    pub bird_size: f32,
    /// Tilt after a flap (degrees)
    pub tilt_up: f32,
    /// Tilt limit while falling (degrees)
    pub tilt_down: f32,
    /// Tilt relaxation (degrees/frame)
    pub tilt_rate: f32,

    // === Pipes ===
    /// Horizontal scroll speed (px/frame)
    pub obstacle_speed: f32,
    /// Pipe width (px)
    pub obstacle_width: f32,
    /// Height of the passable gap (px)
    pub gap_height: f32,
    /// Minimum distance between the gap and the top/bottom edge (px)
    pub min_gap_margin: f32,
    /// Time between spawns (ms)
    pub spawn_interval_ms: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            visible_width: 400.0,
            visible_height: 600.0,

            gravity: 0.25,
            flap_strength: -7.0,
            bird_size: 30.0,
            tilt_up: 30.0,
            tilt_down: -70.0,
            tilt_rate: 2.0,

            obstacle_speed: 3.0,
            obstacle_width: 80.0,
            gap_height: 150.0,
            min_gap_margin: 75.0,
            spawn_interval_ms: 1500.0,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validated()
    }

    /// Consume the config, returning it only if it is valid
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }

    /// Check every invariant the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("visible_width", self.visible_width as f64)?;
        positive("visible_height", self.visible_height as f64)?;
        positive("bird_size", self.bird_size as f64)?;
        positive("obstacle_speed", self.obstacle_speed as f64)?;
        positive("obstacle_width", self.obstacle_width as f64)?;
        positive("gap_height", self.gap_height as f64)?;
        positive("spawn_interval_ms", self.spawn_interval_ms)?;
        non_negative("gravity", self.gravity as f64)?;
        non_negative("min_gap_margin", self.min_gap_margin as f64)?;
        non_negative("tilt_rate", self.tilt_rate as f64)?;

        if !(self.flap_strength.is_finite() && self.flap_strength < 0.0) {
            return Err(ConfigError::FlapNotUpward(self.flap_strength));
        }
        if !(self.tilt_down.is_finite() && self.tilt_up.is_finite() && self.tilt_down <= self.tilt_up)
        {
            return Err(ConfigError::EmptyTiltRange {
                up: self.tilt_up,
                down: self.tilt_down,
            });
        }

        let (lo, hi) = self.gap_center_range();
        if lo > hi {
            return Err(ConfigError::GapTooTall {
                gap: self.gap_height,
                margin: self.min_gap_margin,
                height: self.visible_height,
            });
        }
        Ok(())
    }

    /// Inclusive integer range gap centers are drawn from
    ///
    /// Keeps the whole gap plus `min_gap_margin` on both sides on screen.
    /// Empty (`lo > hi`) when the gap does not fit.
    pub fn gap_center_range(&self) -> (i32, i32) {
        let half = self.gap_height / 2.0 + self.min_gap_margin;
        let lo = half.ceil() as i32;
        let hi = (self.visible_height - half).floor() as i32;
        (lo, hi)
    }

    /// Where the bird starts (fixed x, vertically centered)
    pub fn bird_start(&self) -> Vec2 {
        Vec2::new(
            (self.visible_width / 3.0).floor(),
            (self.visible_height / 2.0).floor(),
        )
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
