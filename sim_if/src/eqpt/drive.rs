//! # Drive Equipment Demands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Angular velocity demands for the differential drive actuators.
///
/// Positive rates drive the rover forwards.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelDems {
    /// Left wheel rate demand.
    ///
    /// Units: radians/second
    pub left_rads: f64,

    /// Right wheel rate demand.
    ///
    /// Units: radians/second
    pub right_rads: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl WheelDems {
    pub fn new(left_rads: f64, right_rads: f64) -> Self {
        Self {
            left_rads,
            right_rads,
        }
    }

    /// Demands that hold both wheels still.
    pub fn stop() -> Self {
        Self::default()
    }
}
