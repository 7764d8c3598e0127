//! # Obstacle classification module
//!
//! Turns the eight raw proximity readings into obstacle flags. The flags are recomputed from
//! scratch every tick, nothing is remembered between ticks.
//!
//! | Flag       | Channels | Threshold            |
//! |------------|----------|----------------------|
//! | `front`    | 0, 7     | `obstacle_threshold` |
//! | `critical` | 0, 7     | `critical_threshold` |
//! | `left`     | 5, 6     | `lateral_threshold`  |
//! | `right`    | 1, 2     | `lateral_threshold`  |

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
pub use params::ObsClassParams;
use sim_if::eqpt::prox::ProxReadings;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Channels facing forwards.
pub const FRONT_CHANNELS: [usize; 2] = [0, 7];

/// Channels covering the front left.
pub const LEFT_CHANNELS: [usize; 2] = [5, 6];

/// Channels covering the front right.
pub const RIGHT_CHANNELS: [usize; 2] = [1, 2];

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Obstacle flags derived from one set of proximity readings.
///
/// The flags are independent, any combination may be set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ObstacleFlags {
    pub front: bool,
    pub left: bool,
    pub right: bool,
    pub critical: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ObstacleFlags {
    /// Classify a set of readings.
    pub fn classify(readings: &ProxReadings, params: &ObsClassParams) -> Self {
        let any_above =
            |channels: &[usize], threshold: f64| channels.iter().any(|&i| readings[i] > threshold);

        Self {
            front: any_above(&FRONT_CHANNELS, params.obstacle_threshold),
            critical: any_above(&FRONT_CHANNELS, params.critical_threshold),
            left: any_above(&LEFT_CHANNELS, params.lateral_threshold),
            right: any_above(&RIGHT_CHANNELS, params.lateral_threshold),
        }
    }

    /// True if any obstacle has been detected.
    pub fn any(&self) -> bool {
        self.front || self.left || self.right || self.critical
    }

    /// True if exactly one of the side flags is set.
    pub fn one_side_only(&self) -> bool {
        self.left != self.right
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn classify(readings: ProxReadings) -> ObstacleFlags {
        ObstacleFlags::classify(&readings, &ObsClassParams::default())
    }

    #[test]
    fn test_clear() {
        let flags = classify([0.0; 8]);
        assert_eq!(flags, ObstacleFlags::default());
        assert!(!flags.any());

        // Thresholds are strict, and the rear channels are never used
        let flags = classify([80.0, 60.0, 60.0, 1000.0, 1000.0, 60.0, 60.0, 80.0]);
        assert!(!flags.any());
    }

    #[test]
    fn test_front_and_critical() {
        let flags = classify([81.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(flags.front && !flags.critical);

        let flags = classify([0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 151.0]);
        assert!(flags.front && flags.critical);
        assert!(!flags.left && !flags.right);
    }

    #[test]
    fn test_sides() {
        let flags = classify([0.0, 0.0, 0.0, 0.0, 0.0, 61.0, 0.0, 0.0]);
        assert!(flags.left && !flags.right && !flags.front);
        assert!(flags.one_side_only());

        let flags = classify([0.0, 0.0, 61.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(flags.right && !flags.left);

        let flags = classify([0.0, 70.0, 0.0, 0.0, 0.0, 0.0, 70.0, 0.0]);
        assert!(flags.left && flags.right);
        assert!(!flags.one_side_only());
    }

    #[test]
    fn test_custom_thresholds() {
        let params = ObsClassParams {
            obstacle_threshold: 10.0,
            critical_threshold: 20.0,
            lateral_threshold: 5.0,
        };
        let flags = ObstacleFlags::classify(&[15.0, 6.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], &params);

        assert!(flags.front && !flags.critical && flags.right && !flags.left);
    }
}
