//! Procedurally grown track of platforms
//!
//! Platforms march away from the origin along -X (left) or -Z (right). Only
//! the newest [`VISIBLE_WINDOW`] platforms are kept.

use std::collections::VecDeque;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{GAP_JITTER, MIN_GAP, VISIBLE_WINDOW};

/// Axis along which a platform was offset from its predecessor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Offset along -X
    #[default]
    Left,
    /// Offset along -Z
    Right,
}

impl Direction {
    /// Coordinate of `pos` along this direction's axis
    #[inline]
    pub fn axis(self, pos: Vec3) -> f32 {
        match self {
            Direction::Left => pos.x,
            Direction::Right => pos.z,
        }
    }

    /// Mutable coordinate of `pos` along this direction's axis
    #[inline]
    pub fn axis_mut(self, pos: &mut Vec3) -> &mut f32 {
        match self {
            Direction::Left => &mut pos.x,
            Direction::Right => &mut pos.z,
        }
    }

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random::<f32>() > 0.5 {
            Direction::Left
        } else {
            Direction::Right
        }
    }
}

/// A placed landing surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub position: Vec3,
    /// Direction this platform was offset from the previous one
    pub direction: Direction,
    pub label: String,
}

/// Ordered platforms, newest last
#[derive(Debug, Clone, Default)]
pub struct Track {
    platforms: VecDeque<Platform>,
    next_id: u32,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a platform. Returns the evicted oldest platform when the
    /// window overflows.
    pub fn grow<R: Rng + ?Sized>(&mut self, rng: &mut R, label: &str) -> Option<Platform> {
        let (position, direction) = match self.platforms.back() {
            None => (Vec3::ZERO, Direction::default()),
            Some(prev) => {
                let mut position = prev.position;
                let direction = Direction::random(rng);
                let gap = (rng.random::<f32>() * GAP_JITTER + MIN_GAP).round();
                *direction.axis_mut(&mut position) -= gap;
                (position, direction)
            }
        };

        let id = self.next_id;
        self.next_id += 1;
        self.platforms.push_back(Platform {
            id,
            position,
            direction,
            label: label.to_string(),
        });
        log::debug!("Platform {} placed at {:?} ({:?})", id, position, direction);

        if self.platforms.len() > VISIBLE_WINDOW {
            let evicted = self.platforms.pop_front();
            if let Some(ref p) = evicted {
                log::debug!("Platform {} evicted", p.id);
            }
            evicted
        } else {
            None
        }
    }

    /// Remove every platform, returning them oldest first
    pub fn reset(&mut self) -> Vec<Platform> {
        self.platforms.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter()
    }

    /// Platform the jumper is standing on (second newest)
    pub fn current(&self) -> Option<&Platform> {
        let len = self.platforms.len();
        if len < 2 {
            return None;
        }
        self.platforms.get(len - 2)
    }

    /// Platform the jumper is aiming for (newest)
    pub fn next(&self) -> Option<&Platform> {
        self.platforms.back()
    }

    /// Direction of the upcoming jump
    pub fn next_direction(&self) -> Direction {
        self.next().map(|p| p.direction).unwrap_or_default()
    }

    /// Midpoint between the two newest platforms, on the ground plane
    pub fn focus_point(&self) -> Option<Vec3> {
        let (a, b) = (self.current()?, self.next()?);
        let mid = (a.position + b.position) / 2.0;
        Some(Vec3::new(mid.x, 0.0, mid.z))
    }
}
