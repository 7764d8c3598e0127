//! # Seeker Executable Parameters
//!
//! This module provide parameters for the seeker executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use sim_if::eqpt::prox::NUM_PROX_CHANNELS;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeekExecParams {
    /// Period of one control tick, also used as the proximity sensor sampling period.
    ///
    /// Units: milliseconds
    pub tick_period_ms: u32,

    /// Names of the proximity channels, in ring order.
    pub prox_channel_names: [String; NUM_PROX_CHANNELS],
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for SeekExecParams {
    fn default() -> Self {
        Self {
            tick_period_ms: 32,
            prox_channel_names: [
                "ps0".into(),
                "ps1".into(),
                "ps2".into(),
                "ps3".into(),
                "ps4".into(),
                "ps5".into(),
                "ps6".into(),
                "ps7".into(),
            ],
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
