//! Landing classification
//!
//! Once the jumper is back at rest height, decide where it settled relative
//! to the platform it left (current) and the one it aimed for (next). Only
//! the axis of the jump matters; the other horizontal axis never changes
//! during flight.

use serde::{Deserialize, Serialize};

/// Where the jumper settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LandingResult {
    /// Still on the platform it jumped from
    CenteredOnCurrent,
    /// Overhanging the edge of the platform it jumped from
    EdgeOfCurrent,
    /// Success
    CenteredOnNext,
    /// Overhanging the edge of the target platform
    EdgeOfNext,
    /// Touched nothing
    Miss,
}

impl LandingResult {
    pub fn is_success(self) -> bool {
        self == LandingResult::CenteredOnNext
    }
}

/// Result of a landing check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landing {
    pub result: LandingResult,
    /// Axis distance from the center of the platform that was touched
    /// (`None` on a miss)
    pub penetration: Option<f32>,
}

/// Inputs to a landing check, all measured along the jump axis
#[derive(Debug, Clone, Copy)]
pub struct LandingProbe {
    pub jumper: f32,
    pub current: f32,
    pub next: f32,
    pub jumper_width: f32,
    pub platform_width: f32,
}

impl LandingProbe {
    /// Farthest axis distance that still counts as touching a platform
    pub fn contact_radius(&self) -> f32 {
        (self.jumper_width + self.platform_width) / 2.0
    }

    /// Farthest axis distance that still counts as centered
    pub fn center_tolerance(&self) -> f32 {
        self.platform_width / 2.0
    }
}

/// Classify a landing.
///
/// The current platform is checked first. Consecutive platforms are always
/// at least `MIN_GAP` apart, which exceeds twice the contact radius for the
/// default geometry, so the two contact zones never overlap in play.
pub fn evaluate_landing(probe: &LandingProbe) -> Landing {
    let contact = probe.contact_radius();
    let center = probe.center_tolerance();

    let distance_current = (probe.jumper - probe.current).abs();
    let distance_next = (probe.jumper - probe.next).abs();

    if distance_current < contact {
        let result = if distance_current < center {
            LandingResult::CenteredOnCurrent
        } else {
            LandingResult::EdgeOfCurrent
        };
        Landing {
            result,
            penetration: Some(distance_current),
        }
    } else if distance_next < contact {
        let result = if distance_next < center {
            LandingResult::CenteredOnNext
        } else {
            LandingResult::EdgeOfNext
        };
        Landing {
            result,
            penetration: Some(distance_next),
        }
    } else {
        Landing {
            result: LandingResult::Miss,
            penetration: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(jumper: f32) -> LandingProbe {
        // Current at 0, next 8 units along -axis, default widths
        LandingProbe {
            jumper,
            current: 0.0,
            next: -8.0,
            jumper_width: 1.0,
            platform_width: 4.0,
        }
    }

    #[test]
    fn test_radii() {
        let p = probe(0.0);
        assert_eq!(p.contact_radius(), 2.5);
        assert_eq!(p.center_tolerance(), 2.0);
    }

    #[test]
    fn test_exact_center_of_next_is_success() {
        let landing = evaluate_landing(&probe(-8.0));
        assert_eq!(landing.result, LandingResult::CenteredOnNext);
        assert_eq!(landing.penetration, Some(0.0));
        assert!(landing.result.is_success());
    }

    #[test]
    fn test_near_edge_of_next() {
        let landing = evaluate_landing(&probe(-8.0 + 2.4));
        assert_eq!(landing.result, LandingResult::EdgeOfNext);
        assert!((landing.penetration.unwrap() - 2.4).abs() < 1e-5);

        let landing = evaluate_landing(&probe(-8.0 - 2.4));
        assert_eq!(landing.result, LandingResult::EdgeOfNext);
    }

    #[test]
    fn test_beyond_contact_radius_is_miss() {
        let landing = evaluate_landing(&probe(-8.0 + 3.0));
        assert_eq!(landing.result, LandingResult::Miss);
        assert_eq!(landing.penetration, None);

        let landing = evaluate_landing(&probe(-11.0));
        assert_eq!(landing.result, LandingResult::Miss);
    }

    #[test]
    fn test_short_hop_stays_on_current() {
        let landing = evaluate_landing(&probe(-1.0));
        assert_eq!(landing.result, LandingResult::CenteredOnCurrent);
        assert_eq!(landing.penetration, Some(1.0));

        let landing = evaluate_landing(&probe(-2.2));
        assert_eq!(landing.result, LandingResult::EdgeOfCurrent);
    }

    #[test]
    fn test_current_wins_when_zones_overlap() {
        // Platforms closer than any generated gap
        let p = LandingProbe {
            jumper: -2.2,
            current: 0.0,
            next: -4.0,
            jumper_width: 1.0,
            platform_width: 4.0,
        };
        assert_eq!(evaluate_landing(&p).result, LandingResult::EdgeOfCurrent);
    }
}
