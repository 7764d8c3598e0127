//! # Seeker library.
//!
//! This library allows other crates in the workspace (and the benchmarks) to access items defined
//! inside the seeker crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Target selection - picks the lightest candidate body before navigation starts
pub mod target_sel;

/// Localisation module - converts world poses into distance and heading error
pub mod loc;

/// Obstacle classification - turns raw proximity readings into obstacle flags
pub mod obs_class;

/// Navigation control module - the state machine driving the rover to the target
pub mod nav_ctrl;

/// Seeker - the per-tick control loop tying all modules together
pub mod seeker;

/// Kinematic simulation - a minimal world to run the seeker in
pub mod sim;

/// Executable parameters
pub mod params;
