//! Game session: owns the simulation and drives the host
//!
//! The host owns the frame clock and calls [`GameSession::advance`] once per
//! displayed frame; the session turns elapsed time into fixed ticks and
//! forwards the resulting side effects.

use glam::Vec3;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::error::{ConfigError, SimError};
use crate::platform::{FrameView, Host, SceneObject, ViewportSize};
use crate::settings::{GameConfig, SessionConfig};
use crate::sim::{GameEvent, GameState, JumpPhase, Platform, TickInput, tick};

pub struct GameSession<H: Host> {
    state: GameState,
    host: H,
    input: TickInput,
    accumulator: f32,
    viewport: ViewportSize,
}

impl<H: Host> GameSession<H> {
    /// Validate the configuration and start a run with two platforms
    pub fn start(config: SessionConfig, seed: u64, host: H) -> Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            log::warn!("Rejected session config: {}", e);
            return Err(e);
        }
        log::info!(
            "Session starting (seed {}, {} places, difficulty {})",
            seed,
            config.place_names.len(),
            config.difficulty
        );

        let mut session = Self {
            state: GameState::new(config, seed),
            host,
            input: TickInput::default(),
            accumulator: 0.0,
            viewport: ViewportSize::default(),
        };
        session.dispatch_events();
        session.render_if_dirty();
        Ok(session)
    }

    /// Start over with the same place names and difficulty. Cancels any
    /// in-flight fall.
    pub fn restart(&mut self) -> Result<(), ConfigError> {
        self.state.config.validate()?;
        log::info!(
            "Session restarting (score was {}, phase {:?})",
            self.state.score,
            self.state.phase
        );
        self.state.reset();
        self.input = TickInput::default();
        self.accumulator = 0.0;
        self.dispatch_events();
        self.render_if_dirty();
        Ok(())
    }

    /// Charge input went down. A release queued earlier in the same frame
    /// belongs to the previous hold and is dropped.
    pub fn pointer_down(&mut self) {
        self.input.release = false;
        self.input.press = true;
    }

    /// Charge input went up
    pub fn pointer_up(&mut self) {
        self.input.release = true;
    }

    /// Host resize notification
    pub fn resize(&mut self, viewport: ViewportSize) {
        log::debug!("Viewport resized to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
        self.state.dirty = true;
        self.render_if_dirty();
    }

    /// Run as many fixed ticks as `dt` seconds cover
    pub fn advance(&mut self, dt: f32) -> Result<(), SimError> {
        // NaN collapses to zero
        let dt = dt.max(0.0).min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            // One-shot inputs are consumed by the first tick
            let input = std::mem::take(&mut self.input);
            let result = tick(&mut self.state, &input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            self.dispatch_events();
            if let Err(e) = result {
                log::error!("Simulation contract violation: {}", e);
                return Err(e);
            }
        }

        self.render_if_dirty();
        Ok(())
    }

    /// Label a platform placed at `score` would get
    pub fn label_for(&self, score: u32) -> &str {
        self.state.config.label_for(score)
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn phase(&self) -> JumpPhase {
        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.state.config
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    fn dispatch_events(&mut self) {
        let events = self.state.drain_events();
        let game = &self.state.config.game;
        for event in events {
            match event {
                GameEvent::PlatformPlaced(p) => self.host.add(&platform_object(p, game)),
                GameEvent::PlatformEvicted(p) => self.host.remove(&platform_object(p, game)),
                GameEvent::JumperSpawned => self.host.add(&jumper_object(game)),
                GameEvent::JumperDespawned => self.host.remove(&jumper_object(game)),
                GameEvent::Landed(_) => {}
                GameEvent::Scored { score } => self.host.on_success(score),
                GameEvent::Fell => self.host.on_failure(),
            }
        }
    }

    fn render_if_dirty(&mut self) {
        if !self.state.dirty {
            return;
        }
        self.state.dirty = false;
        let view = FrameView {
            jumper: &self.state.jumper,
            look_at: self.state.camera.look_at,
            frustum: self.viewport.frustum(),
            background: self.state.config.game.background,
        };
        self.host.render_frame(&view);
    }
}

fn platform_object(platform: Platform, game: &GameConfig) -> SceneObject {
    SceneObject::Platform {
        id: platform.id,
        position: platform.position,
        label: platform.label,
        size: Vec3::new(game.cube_width, game.cube_height, game.cube_deep),
        color: game.cube_color,
    }
}

fn jumper_object(game: &GameConfig) -> SceneObject {
    SceneObject::Jumper {
        size: Vec3::new(game.jumper_width, game.jumper_height, game.jumper_deep),
        color: game.jumper_color,
    }
}
