//! Failure animation: tip over a platform edge, then drop
//!
//! A failed landing picks one of five variants. The four edge variants
//! rotate the jumper a quarter turn about the axis perpendicular to the jump
//! before dropping it; `None` (a clean miss) drops straight to the ground.

use std::f32::consts::FRAC_PI_2;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::jumper::Jumper;
use super::landing::{Landing, LandingResult};
use super::track::Direction;
use crate::consts::{FALL_DROP_STEP, FALL_ROTATE_STEP};
use crate::error::SimError;
use crate::settings::GameConfig;

/// Which way the jumper tips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallVariant {
    LeftTop,
    LeftBottom,
    RightTop,
    RightBottom,
    /// Missed everything, no tipping
    None,
}

impl FromStr for FallVariant {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LeftTop" => Ok(FallVariant::LeftTop),
            "LeftBottom" => Ok(FallVariant::LeftBottom),
            "RightTop" => Ok(FallVariant::RightTop),
            "RightBottom" => Ok(FallVariant::RightBottom),
            "None" => Ok(FallVariant::None),
            other => Err(SimError::UnknownFallVariant(other.to_string())),
        }
    }
}

impl FallVariant {
    /// Pick the variant for a failed landing.
    ///
    /// `jumper_axis` and `next_axis` are positions along the jump axis. A
    /// jumper past the center of the next platform (greater coordinate, as
    /// the track runs toward negative values) tips back; otherwise forward.
    pub fn for_landing(
        landing: &Landing,
        direction: Direction,
        jumper_axis: f32,
        next_axis: f32,
    ) -> Result<Self, SimError> {
        let variant = match (landing.result, direction) {
            (LandingResult::CenteredOnNext, _) => return Err(SimError::FallAfterSuccess),
            (LandingResult::EdgeOfNext, Direction::Left) if jumper_axis > next_axis => {
                FallVariant::LeftBottom
            }
            (LandingResult::EdgeOfNext, Direction::Right) if jumper_axis > next_axis => {
                FallVariant::RightBottom
            }
            (
                LandingResult::EdgeOfNext
                | LandingResult::EdgeOfCurrent
                | LandingResult::CenteredOnCurrent,
                Direction::Left,
            ) => FallVariant::LeftTop,
            (
                LandingResult::EdgeOfNext
                | LandingResult::EdgeOfCurrent
                | LandingResult::CenteredOnCurrent,
                Direction::Right,
            ) => FallVariant::RightTop,
            (LandingResult::Miss, _) => FallVariant::None,
        };
        Ok(variant)
    }

    /// Pivot axis and signed rotation step, `None` for a straight drop
    pub fn tilt(self) -> Option<(Direction, f32)> {
        match self {
            FallVariant::LeftTop => Some((Direction::Left, FALL_ROTATE_STEP)),
            FallVariant::LeftBottom => Some((Direction::Left, -FALL_ROTATE_STEP)),
            FallVariant::RightTop => Some((Direction::Right, -FALL_ROTATE_STEP)),
            FallVariant::RightBottom => Some((Direction::Right, FALL_ROTATE_STEP)),
            FallVariant::None => None,
        }
    }
}

/// An armed fall, advanced once per tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallAnimation {
    pub variant: FallVariant,
    /// Height the jumper must pass below before the fall is over
    pub floor: f32,
    /// Session generation this fall belongs to
    pub generation: u64,
    finished: bool,
}

impl FallAnimation {
    pub fn new(
        variant: FallVariant,
        landing: &Landing,
        config: &GameConfig,
        generation: u64,
    ) -> Self {
        let floor = match variant {
            FallVariant::None => config.ground,
            _ => {
                // How far past the platform edge the jumper settled
                let offset = landing.penetration.unwrap_or(0.0) - config.cube_width / 2.0;
                config.ground + config.jumper_width / 2.0 + offset
            }
        };
        Self {
            variant,
            floor,
            generation,
            finished: false,
        }
    }

    /// Advance one tick. Returns true only on the tick the fall ends.
    pub fn step(&mut self, jumper: &mut Jumper) -> bool {
        if self.finished {
            return false;
        }

        if let Some((pivot, step)) = self.variant.tilt() {
            let angle = jumper.tilt_mut(pivot);
            let tipping = if step > 0.0 {
                *angle < FRAC_PI_2
            } else {
                *angle > -FRAC_PI_2
            };
            if tipping {
                *angle += step;
                return false;
            }
        }

        if jumper.position.y > self.floor {
            jumper.position.y -= FALL_DROP_STEP;
            false
        } else {
            self.finished = true;
            true
        }
    }
}
