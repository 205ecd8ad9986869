//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod camera;
pub mod falling;
pub mod jumper;
pub mod landing;
pub mod state;
pub mod tick;
pub mod track;

pub use camera::CameraTracker;
pub use falling::{FallAnimation, FallVariant};
pub use jumper::Jumper;
pub use landing::{Landing, LandingProbe, LandingResult, evaluate_landing};
pub use state::{GameEvent, GameState, JumpPhase};
pub use tick::{TickInput, tick};
pub use track::{Direction, Platform, Track};
