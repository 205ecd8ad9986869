//! The player-controlled block: charge accumulation and flight integration

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::track::Direction;
use crate::consts::*;

/// Jumper pose and launch speeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jumper {
    pub position: Vec3,
    /// Tilt about the X (`.x`) and Z (`.y`) axes, radians
    pub rotation: Vec2,
    /// Vertical scale (1 = uncompressed)
    pub scale_y: f32,
    pub horizontal_speed: f32,
    pub vertical_speed: f32,
}

impl Default for Jumper {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, REST_HEIGHT, 0.0),
            rotation: Vec2::ZERO,
            scale_y: 1.0,
            horizontal_speed: 0.0,
            vertical_speed: 0.0,
        }
    }
}

impl Jumper {
    pub fn new() -> Self {
        Self::default()
    }

    /// One tick of holding the charge input.
    ///
    /// Returns false once the jumper is fully compressed and nothing changed.
    pub fn charge_step(&mut self) -> bool {
        if self.scale_y <= MIN_COMPRESSION {
            return false;
        }
        self.scale_y -= COMPRESS_STEP;
        self.horizontal_speed += CHARGE_HORIZONTAL;
        self.vertical_speed += CHARGE_VERTICAL;
        true
    }

    /// One tick of flight toward `direction`.
    ///
    /// Returns true when the jumper has come back below rest height; it is
    /// then snapped to rest and ready for landing evaluation.
    pub fn flight_step(&mut self, direction: Direction) -> bool {
        if self.scale_y < 1.0 {
            self.scale_y = (self.scale_y + DECOMPRESS_STEP).min(1.0);
        }
        *direction.axis_mut(&mut self.position) -= self.horizontal_speed;
        self.position.y += self.vertical_speed;
        self.vertical_speed -= GRAVITY;

        if self.position.y < REST_HEIGHT {
            self.settle();
            true
        } else {
            false
        }
    }

    /// Snap back to a resting pose where it stands
    pub fn settle(&mut self) {
        self.position.y = REST_HEIGHT;
        self.scale_y = 1.0;
        self.horizontal_speed = 0.0;
        self.vertical_speed = 0.0;
    }

    /// Rotation about the pivot axis used when tipping off a `direction` edge
    pub fn tilt_mut(&mut self, direction: Direction) -> &mut f32 {
        match direction {
            // Left jumps travel along X, so they tip about Z
            Direction::Left => &mut self.rotation.y,
            Direction::Right => &mut self.rotation.x,
        }
    }

    pub fn tilt(&self, direction: Direction) -> f32 {
        match direction {
            Direction::Left => self.rotation.y,
            Direction::Right => self.rotation.x,
        }
    }
}
