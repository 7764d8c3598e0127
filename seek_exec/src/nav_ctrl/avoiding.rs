//! # [`NavMode::Avoiding`] implementation

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Serialize;
use sim_if::eqpt::{drive::WheelDems, prox::ProxReadings};

use super::{NavCtrlParams, TurnDir};
use crate::obs_class::ObstacleFlags;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Evasive manoeuvre away from a critically close obstacle ahead.
///
/// The manoeuvre is purely time based:
///
/// 1. Reverse straight back.
/// 2. Pivot in place towards `dir`.
/// 3. Creep forwards until the manoeuvre is complete.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Avoiding {
    /// Time at which the manoeuvre started.
    ///
    /// Units: seconds
    pub start_time_s: f64,

    /// Side the rover pivots towards.
    pub dir: TurnDir,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Avoiding {
    pub fn new(start_time_s: f64, dir: TurnDir) -> Self {
        Self { start_time_s, dir }
    }

    /// Pick the pivot direction.
    ///
    /// Pivot right when there is an obstacle on the left or the front left channel sees more
    /// than the front right one, otherwise pivot left.
    pub fn choose_dir(flags: &ObstacleFlags, readings: &ProxReadings) -> TurnDir {
        if flags.left || readings[5] > readings[2] {
            TurnDir::Right
        } else {
            TurnDir::Left
        }
    }

    /// Time spent in the manoeuvre so far.
    ///
    /// Units: seconds
    pub fn elapsed_s(&self, time_s: f64) -> f64 {
        time_s - self.start_time_s
    }

    pub fn is_complete(&self, time_s: f64, params: &NavCtrlParams) -> bool {
        self.elapsed_s(time_s) > params.avoid.duration_s
    }

    /// Wheel demands for the current phase of the manoeuvre.
    pub fn wheel_dems(&self, time_s: f64, params: &NavCtrlParams) -> WheelDems {
        let avoid = &params.avoid;
        let elapsed_s = self.elapsed_s(time_s);

        if elapsed_s < avoid.reverse_end_s {
            let rate_rads = params.rev_rate_rads * avoid.reverse_rate_factor;
            WheelDems::new(rate_rads, rate_rads)
        } else if elapsed_s < avoid.pivot_end_s {
            // Pivoting left drives the right wheel forwards
            let rate_rads = self.dir.sign() * params.fwd_rate_rads * avoid.pivot_rate_factor;
            WheelDems::new(-rate_rads, rate_rads)
        } else {
            let rate_rads = params.fwd_rate_rads * avoid.creep_rate_factor;
            WheelDems::new(rate_rads, rate_rads)
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_choose_dir() {
        let critical = ObstacleFlags {
            front: true,
            critical: true,
            ..Default::default()
        };
        let critical_left = ObstacleFlags {
            left: true,
            ..critical
        };

        let mut readings = [0.0; 8];
        readings[5] = 40.0;
        readings[2] = 40.0;
        assert_eq!(Avoiding::choose_dir(&critical, &readings), TurnDir::Left);
        assert_eq!(Avoiding::choose_dir(&critical_left, &readings), TurnDir::Right);

        readings[2] = 10.0;
        assert_eq!(Avoiding::choose_dir(&critical, &readings), TurnDir::Right);

        readings[2] = 100.0;
        assert_eq!(Avoiding::choose_dir(&critical_left, &readings), TurnDir::Right);
    }

    #[test]
    fn test_phases() {
        let params = NavCtrlParams::default();
        let avoiding = Avoiding::new(10.0, TurnDir::Right);

        let reverse = avoiding.wheel_dems(10.5, &params);
        assert!(reverse.left_rads < 0.0 && reverse.right_rads < 0.0);
        assert!((reverse.left_rads + 2.4).abs() < 1e-9);

        // Pivoting right spins the left wheel forwards
        let pivot = avoiding.wheel_dems(11.0, &params);
        assert!(pivot.left_rads > 0.0 && pivot.right_rads < 0.0);
        assert!((pivot.left_rads - 2.4).abs() < 1e-9);

        let pivot = Avoiding::new(10.0, TurnDir::Left).wheel_dems(11.0, &params);
        assert!(pivot.left_rads < 0.0 && pivot.right_rads > 0.0);

        let creep = avoiding.wheel_dems(12.0, &params);
        assert!(creep.left_rads > 0.0);
        assert_eq!(creep.left_rads, creep.right_rads);

        assert!(!avoiding.is_complete(12.0, &params));
        assert!(avoiding.is_complete(12.1, &params));
    }
}
