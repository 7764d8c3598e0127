//! # NavCtrl Parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Parameters for the navigation controller and all it's modes.
#[derive(Debug, Clone, Deserialize)]
pub struct NavCtrlParams {
    /// Nominal forward wheel rate.
    ///
    /// Units: radians/second
    pub fwd_rate_rads: f64,

    /// Wheel rate used when reversing, negative.
    ///
    /// Units: radians/second
    pub rev_rate_rads: f64,

    /// Wheel rate of the in-place rotation performed once the target is reached.
    ///
    /// Units: radians/second
    pub spin_rate_rads: f64,

    /// Distance to the target under which it is considered reached.
    ///
    /// Units: meters
    pub detection_radius_m: f64,

    /// Minimum change in distance to the target between two progress log lines.
    ///
    /// Units: meters
    pub progress_log_dist_m: f64,

    pub navigate: NavigateParams,

    pub avoid: AvoidParams,

    pub deflect: DeflectParams,
}

/// Parameters of the `Navigating` mode.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct NavigateParams {
    /// Differential gain applied to the heading error.
    ///
    /// Units: (radians/second)/radian
    pub turn_gain: f64,

    /// Heading error magnitude above which the rover slows down to turn.
    ///
    /// Units: radians
    pub large_head_err_rad: f64,

    /// Forward rate factor applied while the heading error is large.
    pub large_head_err_rate_factor: f64,

    /// Distance to the target under which the rover slows down for the approach.
    ///
    /// Units: meters
    pub approach_dist_m: f64,

    /// Forward rate factor applied during the approach.
    pub approach_rate_factor: f64,

    /// Heading error bias added to steer away from an obstacle on one side only.
    ///
    /// Units: radians
    pub side_bias_rad: f64,

    /// Reduction of the best distance to the target that counts as progress.
    ///
    /// Units: meters
    pub min_progress_m: f64,

    /// Number of ticks without progress after which a stall is reported.
    pub stall_limit_ticks: u32,
}

/// Parameters of the `Avoiding` manoeuvre.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AvoidParams {
    /// End of the reversing phase, relative to the start of the manoeuvre.
    ///
    /// Units: seconds
    pub reverse_end_s: f64,

    /// End of the pivot phase, relative to the start of the manoeuvre.
    ///
    /// Units: seconds
    pub pivot_end_s: f64,

    /// Duration after which the manoeuvre is complete.
    ///
    /// Units: seconds
    pub duration_s: f64,

    /// Factor applied to the reverse rate while reversing.
    pub reverse_rate_factor: f64,

    /// Factor applied to the forward rate while pivoting.
    pub pivot_rate_factor: f64,

    /// Factor applied to the forward rate while creeping forwards.
    pub creep_rate_factor: f64,
}

/// Parameters of the `Deflecting` mode.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DeflectParams {
    /// Number of ticks the deflection must last before navigation can resume.
    pub min_ticks: u32,

    /// Factor applied to the forward rate while deflecting.
    pub fwd_rate_factor: f64,

    /// Differential rate while an obstacle is still ahead.
    ///
    /// Units: radians/second
    pub curve_rate_blocked_rads: f64,

    /// Differential rate once the way ahead is clear.
    ///
    /// Units: radians/second
    pub curve_rate_clear_rads: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for NavCtrlParams {
    fn default() -> Self {
        Self {
            fwd_rate_rads: 3.0,
            rev_rate_rads: -2.0,
            spin_rate_rads: 2.0,
            detection_radius_m: 0.1,
            progress_log_dist_m: 0.1,
            navigate: NavigateParams::default(),
            avoid: AvoidParams::default(),
            deflect: DeflectParams::default(),
        }
    }
}

impl Default for NavigateParams {
    fn default() -> Self {
        Self {
            turn_gain: 2.0,
            large_head_err_rad: 1.0,
            large_head_err_rate_factor: 0.5,
            approach_dist_m: 0.4,
            approach_rate_factor: 0.7,
            side_bias_rad: 0.3,
            min_progress_m: 0.02,
            stall_limit_ticks: 100,
        }
    }
}

impl Default for AvoidParams {
    fn default() -> Self {
        Self {
            reverse_end_s: 0.8,
            pivot_end_s: 1.8,
            duration_s: 2.0,
            reverse_rate_factor: 1.2,
            pivot_rate_factor: 0.8,
            creep_rate_factor: 0.6,
        }
    }
}

impl Default for DeflectParams {
    fn default() -> Self {
        Self {
            min_ticks: 30,
            fwd_rate_factor: 0.7,
            curve_rate_blocked_rads: 2.5,
            curve_rate_clear_rads: 1.5,
        }
    }
}
