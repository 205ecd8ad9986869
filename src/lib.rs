//! Gap Jump - A charge-and-release platform jumping arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (track generation, jump physics, landing, falling)
//! - `session`: Orchestration of the simulation against a host (scene, renderer, UI callbacks)
//! - `platform`: Host capabilities and viewport abstraction
//! - `settings`: Session configuration and game geometry

pub mod error;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, SimError};
pub use session::GameSession;
pub use settings::{GameConfig, SessionConfig};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one display frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Number of platforms kept alive in the track
    pub const VISIBLE_WINDOW: usize = 5;
    /// Minimum gap between consecutive platforms
    pub const MIN_GAP: f32 = 6.0;
    /// Maximum random extra added on top of the minimum gap
    pub const GAP_JITTER: f32 = 4.0;

    /// Elevation of the jumper's base while resting on a platform
    pub const REST_HEIGHT: f32 = 1.0;

    /// Charge: jumper stops compressing at this vertical scale
    pub const MIN_COMPRESSION: f32 = 0.02;
    /// Charge: scale lost per tick while held
    pub const COMPRESS_STEP: f32 = 0.01;
    /// Charge: horizontal speed gained per tick
    pub const CHARGE_HORIZONTAL: f32 = 0.004;
    /// Charge: vertical speed gained per tick
    pub const CHARGE_VERTICAL: f32 = 0.008;

    /// Flight: scale recovered per tick while airborne
    pub const DECOMPRESS_STEP: f32 = 0.1;
    /// Flight: vertical speed lost per tick
    pub const GRAVITY: f32 = 0.01;

    /// Fall: rotation per tick while tipping over an edge (radians)
    pub const FALL_ROTATE_STEP: f32 = 0.1;
    /// Fall: drop per tick once tipped over
    pub const FALL_DROP_STEP: f32 = 0.2;

    /// Camera: look-at step per axis per tick
    pub const CAMERA_STEP: f32 = 0.1;
    /// Camera: snap to target when this close
    pub const CAMERA_SNAP: f32 = 0.05;
    /// Camera: viewport pixels per world unit
    pub const CAMERA_PIXELS_PER_UNIT: f32 = 50.0;
    /// Camera: far clipping plane
    pub const CAMERA_FAR: f32 = 5000.0;
}
