//! # [`NavMode::Deflecting`] implementation

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Serialize;
use sim_if::eqpt::drive::WheelDems;

use super::{NavCtrlParams, TurnDir};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Curve around a non-critical obstacle ahead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Deflecting {
    /// Number of ticks spent deflecting, not counting the entry tick.
    pub ticks: u32,

    /// Side the rover curves towards.
    pub dir: TurnDir,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Deflecting {
    pub fn new(dir: TurnDir) -> Self {
        Self { ticks: 0, dir }
    }

    /// Count one more tick, returning true if navigation may resume.
    ///
    /// Navigation resumes once the minimum number of ticks has passed and nothing is ahead.
    pub fn tick(&mut self, front_blocked: bool, params: &NavCtrlParams) -> bool {
        self.ticks += 1;

        self.ticks > params.deflect.min_ticks && !front_blocked
    }

    /// Wheel demands curving towards `dir`, harder while the way ahead is still blocked.
    pub fn wheel_dems(&self, front_blocked: bool, params: &NavCtrlParams) -> WheelDems {
        let deflect = &params.deflect;

        let base_rads = params.fwd_rate_rads * deflect.fwd_rate_factor;
        let curve_rads = self.dir.sign()
            * if front_blocked {
                deflect.curve_rate_blocked_rads
            } else {
                deflect.curve_rate_clear_rads
            };

        WheelDems::new(base_rads - curve_rads, base_rads + curve_rads)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
