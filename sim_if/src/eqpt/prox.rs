//! # Proximity Sensor Equipment

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Number of proximity channels in the sensor ring.
pub const NUM_PROX_CHANNELS: usize = 8;

// ------------------------------------------------------------------------------------------------
// TYPES
// ------------------------------------------------------------------------------------------------

/// One reading per proximity channel, indexed by ring position.
///
/// Ring layout: 0 and 7 face forwards, 1 and 2 cover the front right, 5 and 6 the front left.
/// Readings are non-negative and grow as obstacles get closer.
pub type ProxReadings = [f64; NUM_PROX_CHANNELS];

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Handle to a resolved and enabled proximity sensor.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProxChannel(pub usize);
