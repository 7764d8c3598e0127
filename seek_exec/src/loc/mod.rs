//! # Localisation module
//!
//! The rover uses ground truth poses from the world rather than estimating its own. This module
//! converts raw body poses into the planar quantities navigation works with: a heading, a
//! distance in the horizontal plane, and a signed heading error towards a target.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::{Matrix3, Vector3};
use serde::Serialize;
use sim_if::world::BodyPose;
use util::maths::{norm, wrap_pi};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The pose of a body as used by navigation.
///
/// Only ever read, a new pose is sampled from the world each tick.
#[derive(Debug, Copy, Clone, Serialize, Default, PartialEq)]
pub struct Pose {
    /// The position in the world frame.
    ///
    /// Units: meters
    pub position_m: Vector3<f64>,

    /// Heading of the body, the angle from the world X axis about the vertical axis.
    ///
    /// Units: radians
    pub heading_rad: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pose {
    /// Planar distance from this pose to another.
    ///
    /// Units: meters
    pub fn distance_to(&self, other: &Pose) -> f64 {
        planar_distance(
            self.position_m[0],
            self.position_m[1],
            other.position_m[0],
            other.position_m[1],
        )
    }

    /// Heading error from this pose towards the position of `other`.
    ///
    /// Units: radians
    pub fn heading_error_to(&self, other: &Pose) -> f64 {
        heading_error(
            self.position_m[0],
            self.position_m[1],
            self.heading_rad,
            other.position_m[0],
            other.position_m[1],
        )
    }
}

impl From<BodyPose> for Pose {
    fn from(raw: BodyPose) -> Self {
        Self {
            position_m: Vector3::from(raw.position_m),
            heading_rad: heading_from_orientation(&raw.orientation),
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Signed angle the rover must turn through to face the target.
///
/// Positive errors mean the target is to the left (anticlockwise). The result is in the range
/// (-pi, pi].
pub fn heading_error(
    robot_x_m: f64,
    robot_y_m: f64,
    robot_heading_rad: f64,
    target_x_m: f64,
    target_y_m: f64,
) -> f64 {
    let bearing_rad = (target_y_m - robot_y_m).atan2(target_x_m - robot_x_m);

    wrap_pi(bearing_rad - robot_heading_rad)
}

/// Heading from a row-major 3x3 orientation matrix.
pub fn heading_from_orientation(orientation: &[f64; 9]) -> f64 {
    let m = Matrix3::from_row_slice(orientation);

    m[(1, 0)].atan2(m[(0, 0)])
}

/// Euclidean distance between two points in the horizontal plane.
///
/// Units: meters
pub fn planar_distance(ax_m: f64, ay_m: f64, bx_m: f64, by_m: f64) -> f64 {
    norm(&[ax_m, ay_m], &[bx_m, by_m]).unwrap_or(std::f64::NAN)
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
