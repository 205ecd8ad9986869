//! Platform abstraction layer
//!
//! The simulation never draws or owns scene objects. A host implements
//! [`Host`] to receive:
//! - Scene registration (platforms and the jumper)
//! - Frame render requests
//! - Success/failure notifications for the UI

use glam::Vec3;
use serde::Serialize;

use crate::consts::{CAMERA_FAR, CAMERA_PIXELS_PER_UNIT};
use crate::sim::Jumper;

/// Current drawable size, pushed in by the host's resize notifications
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl ViewportSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Orthographic frustum covering this viewport
    pub fn frustum(&self) -> Frustum {
        Frustum {
            left: self.width / -CAMERA_PIXELS_PER_UNIT,
            right: self.width / CAMERA_PIXELS_PER_UNIT,
            top: self.height / CAMERA_PIXELS_PER_UNIT,
            bottom: self.height / -CAMERA_PIXELS_PER_UNIT,
            near: 0.0,
            far: CAMERA_FAR,
        }
    }
}

/// Orthographic camera bounds in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frustum {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
}

/// Something the host adds to or removes from its scene graph
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneObject {
    Platform {
        id: u32,
        position: Vec3,
        label: String,
        size: Vec3,
        color: u32,
    },
    Jumper {
        size: Vec3,
        color: u32,
    },
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameView<'a> {
    pub jumper: &'a Jumper,
    pub look_at: Vec3,
    pub frustum: Frustum,
    pub background: u32,
}

/// Capabilities the session drives. All methods default to no-ops.
pub trait Host {
    fn add(&mut self, _object: &SceneObject) {}

    fn remove(&mut self, _object: &SceneObject) {}

    fn render_frame(&mut self, _view: &FrameView<'_>) {}

    /// A jump landed centered on the next platform
    fn on_success(&mut self, _score: u32) {}

    /// The jumper finished falling; the run is over
    fn on_failure(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frustum_scales_with_viewport() {
        let f = ViewportSize::new(1000.0, 500.0).frustum();
        assert_eq!(f.left, -20.0);
        assert_eq!(f.right, 20.0);
        assert_eq!(f.top, 10.0);
        assert_eq!(f.bottom, -10.0);
        assert_eq!(f.far, 5000.0);
    }

    #[test]
    fn test_scene_object_serializes_with_kind_tag() {
        let obj = SceneObject::Jumper {
            size: Vec3::new(1.0, 2.0, 1.0),
            color: 0x232323,
        };
        let json = serde_json::to_string(&obj).unwrap();
        assert!(json.contains("\"kind\":\"jumper\""));
    }
}
