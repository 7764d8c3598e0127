//! Parameters structure for ObsClass

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Thresholds applied to raw proximity readings.
///
/// Readings are in the sensor's raw units, higher means closer.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ObsClassParams {
    /// Front reading above which there is an obstacle ahead.
    pub obstacle_threshold: f64,

    /// Front reading above which the obstacle ahead is critically close.
    pub critical_threshold: f64,

    /// Side reading above which there is an obstacle on that side.
    pub lateral_threshold: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for ObsClassParams {
    fn default() -> Self {
        Self {
            obstacle_threshold: 80.0,
            critical_threshold: 150.0,
            lateral_threshold: 60.0,
        }
    }
}
