//! # [`NavMode::Navigating`] implementation

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::warn;
use serde::Serialize;
use sim_if::eqpt::drive::WheelDems;

use super::NavCtrlParams;
use crate::obs_class::ObstacleFlags;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Tracks progress towards the target while navigating.
///
/// Persists across modes, the baseline is only moved when navigation resumes after an avoidance
/// or deflection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressTracker {
    /// Best distance to the target reached since the baseline was last set.
    ///
    /// Units: meters
    best_dist_m: f64,

    /// Number of consecutive navigating ticks without progress.
    stall_ticks: u32,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            best_dist_m: std::f64::INFINITY,
            stall_ticks: 0,
        }
    }

    pub fn best_dist_m(&self) -> f64 {
        self.best_dist_m
    }

    pub fn stall_ticks(&self) -> u32 {
        self.stall_ticks
    }

    /// Restart tracking from the given distance.
    pub fn rebase(&mut self, dist_m: f64) {
        self.best_dist_m = dist_m;
    }

    /// Record one navigating tick at the given distance.
    ///
    /// Returns true if a stall has been detected on this tick, in which case the stall counter is
    /// restarted.
    pub fn update(&mut self, dist_m: f64, min_progress_m: f64, stall_limit_ticks: u32) -> bool {
        if dist_m < self.best_dist_m - min_progress_m {
            self.stall_ticks = 0;
            self.best_dist_m = dist_m;
            return false;
        }

        self.stall_ticks += 1;

        if self.stall_ticks > stall_limit_ticks {
            warn!(
                "No progress towards the target for {} ticks (best distance {:.3} m)",
                self.stall_ticks, self.best_dist_m
            );
            self.stall_ticks = 0;
            true
        } else {
            false
        }
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Wheel demands steering the rover towards the target.
pub(super) fn wheel_dems(
    params: &NavCtrlParams,
    dist_m: f64,
    head_err_rad: f64,
    flags: &ObstacleFlags,
) -> WheelDems {
    let nav = &params.navigate;

    let mut base_rads = params.fwd_rate_rads;
    if head_err_rad.abs() > nav.large_head_err_rad {
        base_rads *= nav.large_head_err_rate_factor;
    } else if dist_m < nav.approach_dist_m {
        base_rads *= nav.approach_rate_factor;
    }

    // Bias away from an obstacle on one side only
    let mut err_rad = head_err_rad;
    if flags.left && !flags.right {
        err_rad -= nav.side_bias_rad;
    } else if flags.right && !flags.left {
        err_rad += nav.side_bias_rad;
    }

    WheelDems::new(
        base_rads - err_rad * nav.turn_gain,
        base_rads + err_rad * nav.turn_gain,
    )
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
