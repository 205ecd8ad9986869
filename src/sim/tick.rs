//! Fixed timestep simulation tick
//!
//! Advances the jump cycle one step:
//! Resting -> Charging -> Airborne -> Resting (or Falling -> Fallen).

use super::falling::{FallAnimation, FallVariant};
use super::landing::{LandingProbe, evaluate_landing};
use super::state::{GameEvent, GameState, JumpPhase};
use crate::error::SimError;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Charge input went down since the last tick
    pub press: bool,
    /// Charge input went up since the last tick
    pub release: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> Result<(), SimError> {
    state.time_ticks += 1;

    // Camera eases every frame, whatever the jumper is doing
    if state.camera.step() {
        state.dirty = true;
    }

    if input.press {
        if state.phase == JumpPhase::Resting {
            state.phase = JumpPhase::Charging;
        } else {
            log::debug!("Press ignored in {:?}", state.phase);
        }
    }
    if input.release {
        if state.phase == JumpPhase::Charging {
            log::debug!(
                "Launch: horizontal={:.3} vertical={:.3}",
                state.jumper.horizontal_speed,
                state.jumper.vertical_speed
            );
            state.phase = JumpPhase::Airborne;
        } else {
            log::debug!("Release ignored in {:?}", state.phase);
        }
    }

    match state.phase {
        JumpPhase::Resting | JumpPhase::Fallen => {}
        JumpPhase::Charging => {
            if state.jumper.charge_step() {
                state.dirty = true;
            }
        }
        JumpPhase::Airborne => {
            state.dirty = true;
            let direction = state.track.next_direction();
            if state.jumper.flight_step(direction) {
                state.phase = JumpPhase::Resting;
                resolve_landing(state)?;
            }
        }
        JumpPhase::Falling => advance_fall(state),
    }

    Ok(())
}

/// Classify the landing and either score or arm the failure animation
fn resolve_landing(state: &mut GameState) -> Result<(), SimError> {
    let (direction, probe) = match (state.track.current(), state.track.next()) {
        (Some(current), Some(next)) => {
            let direction = next.direction;
            let probe = LandingProbe {
                jumper: direction.axis(state.jumper.position),
                current: direction.axis(current.position),
                next: direction.axis(next.position),
                jumper_width: state.config.game.jumper_width,
                platform_width: state.config.game.cube_width,
            };
            (direction, probe)
        }
        _ => {
            log::warn!("Landing with fewer than two platforms, ignoring");
            return Ok(());
        }
    };

    let landing = evaluate_landing(&probe);
    log::info!(
        "Landed: {:?} (penetration {:?})",
        landing.result,
        landing.penetration
    );
    state.events.push(GameEvent::Landed(landing));

    if landing.result.is_success() {
        state.score += 1;
        state.grow_track();
        state.events.push(GameEvent::Scored { score: state.score });
        log::info!("Score: {}", state.score);
    } else {
        let variant = FallVariant::for_landing(&landing, direction, probe.jumper, probe.next)?;
        log::info!("Falling: {:?}", variant);
        state.fall = Some(FallAnimation::new(
            variant,
            &landing,
            &state.config.game,
            state.generation,
        ));
        state.phase = JumpPhase::Falling;
    }
    Ok(())
}

fn advance_fall(state: &mut GameState) {
    let Some(anim) = state.fall.as_mut() else {
        log::warn!("Falling without an animation, resting");
        state.phase = JumpPhase::Resting;
        return;
    };

    if anim.generation != state.generation {
        log::warn!(
            "Discarding stale fall from generation {} (now {})",
            anim.generation,
            state.generation
        );
        state.fall = None;
        state.phase = JumpPhase::Resting;
        return;
    }

    state.dirty = true;
    if anim.step(&mut state.jumper) {
        state.phase = JumpPhase::Fallen;
        state.events.push(GameEvent::Fell);
        log::info!("Run over at score {}", state.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SessionConfig;
    use crate::sim::landing::LandingResult;
    use crate::sim::track::Direction;

    fn new_state(seed: u64) -> GameState {
        let config = SessionConfig::new(vec!["a".into(), "b".into()], 1);
        let mut state = GameState::new(config, seed);
        state.drain_events();
        state
    }

    fn press() -> TickInput {
        TickInput {
            press: true,
            ..Default::default()
        }
    }

    fn release() -> TickInput {
        TickInput {
            release: true,
            ..Default::default()
        }
    }

    /// Fly until the jumper comes back to rest or starts falling
    fn fly(state: &mut GameState) {
        let mut guard = 0;
        while state.phase == JumpPhase::Airborne {
            tick(state, &TickInput::default()).unwrap();
            guard += 1;
            assert!(guard < 10_000);
        }
    }

    fn landed(state: &mut GameState) -> Option<LandingResult> {
        state.drain_events().into_iter().find_map(|e| match e {
            GameEvent::Landed(l) => Some(l.result),
            _ => None,
        })
    }

    /// Put the jumper directly above `axis_offset` from the next platform's
    /// center, just about to touch down
    fn drop_near_next(state: &mut GameState, axis_offset: f32) {
        let next = state.track.next().unwrap().clone();
        let mut pos = next.position;
        *next.direction.axis_mut(&mut pos) += axis_offset;
        state.jumper.position = pos;
        state.jumper.position.y = 1.0;
        state.jumper.horizontal_speed = 0.0;
        state.jumper.vertical_speed = 0.0;
        state.phase = JumpPhase::Airborne;
    }

    #[test]
    fn test_press_and_release_cycle() {
        let mut state = new_state(1);
        tick(&mut state, &press()).unwrap();
        assert_eq!(state.phase, JumpPhase::Charging);
        assert!(state.jumper.scale_y < 1.0);

        for _ in 0..10 {
            tick(&mut state, &TickInput::default()).unwrap();
        }
        assert!(state.jumper.horizontal_speed > 0.0);

        tick(&mut state, &release()).unwrap();
        assert_eq!(state.phase, JumpPhase::Airborne);
        fly(&mut state);
        assert_ne!(state.phase, JumpPhase::Airborne);
    }

    #[test]
    fn test_zero_hold_is_a_zero_distance_jump() {
        let mut state = new_state(2);
        let start = state.jumper.position;
        let both = TickInput {
            press: true,
            release: true,
        };
        tick(&mut state, &both).unwrap();
        fly(&mut state);
        assert_eq!(landed(&mut state), Some(LandingResult::CenteredOnCurrent));
        assert_eq!(state.jumper.position.x, start.x);
        assert_eq!(state.jumper.position.z, start.z);
        assert_eq!(state.phase, JumpPhase::Falling);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_release_without_charge_is_ignored() {
        let mut state = new_state(3);
        tick(&mut state, &release()).unwrap();
        assert_eq!(state.phase, JumpPhase::Resting);
    }

    #[test]
    fn test_centered_landing_scores_and_grows() {
        let mut state = new_state(4);
        let len = state.track.len();
        drop_near_next(&mut state, 0.0);
        fly(&mut state);

        assert_eq!(state.phase, JumpPhase::Resting);
        assert_eq!(state.score, 1);
        assert_eq!(state.track.len(), len + 1);
        assert!(state.fall.is_none());

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Scored { score: 1 }));
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::PlatformPlaced(p) if p.label == "b"))
        );
    }

    #[test]
    fn test_edge_landing_falls_once() {
        let mut state = new_state(5);
        let len = state.track.len();
        drop_near_next(&mut state, 2.4);
        fly(&mut state);
        assert_eq!(state.phase, JumpPhase::Falling);
        assert_eq!(landed(&mut state), Some(LandingResult::EdgeOfNext));
        assert_eq!(state.score, 0);
        assert_eq!(state.track.len(), len);

        let mut fell = 0;
        for _ in 0..200 {
            tick(&mut state, &TickInput::default()).unwrap();
            fell += state
                .drain_events()
                .iter()
                .filter(|e| **e == GameEvent::Fell)
                .count();
        }
        assert_eq!(fell, 1);
        assert_eq!(state.phase, JumpPhase::Fallen);

        // Input is dead after the fall
        tick(&mut state, &press()).unwrap();
        assert_eq!(state.phase, JumpPhase::Fallen);
    }

    #[test]
    fn test_miss_drops_straight_down() {
        let mut state = new_state(6);
        drop_near_next(&mut state, 3.0);
        fly(&mut state);
        assert_eq!(landed(&mut state), Some(LandingResult::Miss));
        let variant = state.fall.as_ref().unwrap().variant;
        assert_eq!(variant, FallVariant::None);

        while state.phase == JumpPhase::Falling {
            tick(&mut state, &TickInput::default()).unwrap();
            assert_eq!(state.jumper.rotation.x, 0.0);
            assert_eq!(state.jumper.rotation.y, 0.0);
        }
        assert!(state.jumper.position.y <= state.config.game.ground);
    }

    #[test]
    fn test_stale_fall_is_discarded() {
        let mut state = new_state(7);
        drop_near_next(&mut state, 3.0);
        fly(&mut state);
        assert_eq!(state.phase, JumpPhase::Falling);

        // Simulate a generation change that left the animation behind
        state.generation += 1;
        let y = state.jumper.position.y;
        tick(&mut state, &TickInput::default()).unwrap();
        assert!(state.fall.is_none());
        assert_eq!(state.phase, JumpPhase::Resting);
        assert_eq!(state.jumper.position.y, y);
    }

    #[test]
    fn test_flight_follows_next_direction() {
        let mut state = new_state(8);
        let direction = state.track.next_direction();
        tick(&mut state, &press()).unwrap();
        for _ in 0..20 {
            tick(&mut state, &TickInput::default()).unwrap();
        }
        tick(&mut state, &release()).unwrap();
        fly(&mut state);
        let other = match direction {
            Direction::Left => state.jumper.position.z,
            Direction::Right => state.jumper.position.x,
        };
        assert_eq!(other, 0.0);
        assert!(direction.axis(state.jumper.position) < 0.0);
    }
}
