//! # World bodies

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Opaque handle to a body in the world.
///
/// Holding a handle does not keep the body alive, it is only a key for lookups through the
/// [`crate::Supervisor`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub usize);

/// Pose of a body as reported by the world.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct BodyPose {
    /// Position of the body in the world frame.
    ///
    /// Units: meters
    pub position_m: [f64; 3],

    /// Orientation of the body as a 3x3 rotation matrix, flattened row-major.
    pub orientation: [f64; 9],
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl BodyPose {
    /// Pose of a body at `position_m` rotated by `heading_rad` about the vertical axis.
    pub fn from_heading(position_m: [f64; 3], heading_rad: f64) -> Self {
        let (s, c) = heading_rad.sin_cos();

        Self {
            position_m,
            orientation: [
                c, -s, 0.0, //
                s, c, 0.0, //
                0.0, 0.0, 1.0,
            ],
        }
    }
}
