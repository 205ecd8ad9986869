//! Game state and core simulation types
//!
//! Everything the tick mutates lives in [`GameState`]; the session is the
//! only owner.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::CameraTracker;
use super::falling::FallAnimation;
use super::jumper::Jumper;
use super::landing::Landing;
use super::track::{Platform, Track};
use crate::settings::SessionConfig;

/// Where the jumper is in its jump cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JumpPhase {
    /// Standing on a platform, waiting for input
    #[default]
    Resting,
    /// Input held, compressing and building speed
    Charging,
    /// In flight toward the next platform
    Airborne,
    /// Playing the failure animation
    Falling,
    /// Run over; only a restart leaves this phase
    Fallen,
}

/// Side effects produced by a tick, drained by the session
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PlatformPlaced(Platform),
    PlatformEvicted(Platform),
    JumperSpawned,
    JumperDespawned,
    Landed(Landing),
    Scored { score: u32 },
    Fell,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: SessionConfig,
    rng: Pcg32,
    /// Bumped on every restart; stale animations compare against it
    pub generation: u64,
    pub score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: JumpPhase,
    pub track: Track,
    pub jumper: Jumper,
    pub camera: CameraTracker,
    /// Armed failure animation, if any
    pub fall: Option<FallAnimation>,
    /// Pending side effects, oldest first
    pub events: Vec<GameEvent>,
    /// Visible geometry changed since the last render
    pub dirty: bool,
}

impl GameState {
    /// Create a new game with two platforms and a resting jumper
    pub fn new(config: SessionConfig, seed: u64) -> Self {
        let mut state = Self {
            seed,
            config,
            rng: Pcg32::seed_from_u64(seed),
            generation: 0,
            score: 0,
            time_ticks: 0,
            phase: JumpPhase::Resting,
            track: Track::new(),
            jumper: Jumper::new(),
            camera: CameraTracker::default(),
            fall: None,
            events: Vec::new(),
            dirty: true,
        };
        state.seed_track();
        state
    }

    /// Clear everything and re-seed. The RNG keeps running so the new
    /// track differs from the old one.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.fall = None;

        for platform in self.track.reset() {
            self.events.push(GameEvent::PlatformEvicted(platform));
        }
        self.events.push(GameEvent::JumperDespawned);

        self.score = 0;
        self.phase = JumpPhase::Resting;
        self.jumper = Jumper::new();
        self.camera.reset();
        self.dirty = true;

        self.seed_track();
    }

    fn seed_track(&mut self) {
        self.grow_track();
        self.grow_track();
        self.events.push(GameEvent::JumperSpawned);
    }

    /// Place the next platform, labelled for the current score, and retarget
    /// the camera
    pub fn grow_track(&mut self) {
        let label = self.config.label_for(self.score).to_string();
        let evicted = self.track.grow(&mut self.rng, &label);

        if let Some(placed) = self.track.next() {
            self.events.push(GameEvent::PlatformPlaced(placed.clone()));
        }
        if let Some(evicted) = evicted {
            self.events.push(GameEvent::PlatformEvicted(evicted));
        }
        if let Some(focus) = self.track.focus_point() {
            self.camera.set_target(focus);
        }
        self.dirty = true;
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
