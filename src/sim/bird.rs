//! The player's bird
//!
//! Horizontal position never changes; only `pos.y` moves. Tilt is cosmetic
//! and feeds the renderer only.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// The bird avatar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Center position (x fixed for the bird's lifetime)
    pub pos: Vec2,
    /// Vertical velocity (px/frame, negative = upward)
    pub vel: f32,
    /// Visual tilt in degrees (positive = nose up)
    pub tilt: f32,
    /// Hit-box side length
    pub size: f32,
}

impl Bird {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: config.bird_start(),
            vel: 0.0,
            tilt: 0.0,
            size: config.bird_size,
        }
    }

    /// Flap: override velocity with the upward impulse and snap the nose up
    pub fn flap(&mut self, config: &GameConfig) {
        self.vel = config.flap_strength;
        self.tilt = config.tilt_up;
    }

    /// Integrate gravity over `dt` frames and relax the tilt
    pub fn advance(&mut self, dt: f32, config: &GameConfig) {
        self.vel += config.gravity * dt;
        self.pos.y += self.vel * dt;

        let step = config.tilt_rate * dt;
        self.tilt = if self.vel < 0.0 {
            (self.tilt + step).min(config.tilt_up)
        } else {
            (self.tilt - step).max(config.tilt_down)
        };
    }

    /// True while moving upward
    #[inline]
    pub fn rising(&self) -> bool {
        self.vel < 0.0
    }
}
