//! Camera look-at easing

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{CAMERA_SNAP, CAMERA_STEP};

/// Eases the camera's look-at point toward the middle of the active gap
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraTracker {
    pub look_at: Vec3,
    pub target: Vec3,
}

impl CameraTracker {
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Step toward the target on X and Z. Returns true if the point moved.
    pub fn step(&mut self) -> bool {
        let moved_x = ease_axis(&mut self.look_at.x, self.target.x);
        let moved_z = ease_axis(&mut self.look_at.z, self.target.z);
        moved_x || moved_z
    }
}

fn ease_axis(current: &mut f32, target: f32) -> bool {
    if *current == target {
        return false;
    }
    let delta = target - *current;
    if delta.abs() <= CAMERA_SNAP {
        *current = target;
    } else {
        *current += delta.clamp(-CAMERA_STEP, CAMERA_STEP);
        if (target - *current).abs() <= CAMERA_SNAP {
            *current = target;
        }
    }
    true
}
