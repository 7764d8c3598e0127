//! # NavCtrl module
//!
//! This module implements the [`NavCtrl`] state machine, which drives the rover towards the
//! selected target while reacting to obstacles seen by the proximity sensors. The state machine
//! is broken down into a number of modes:
//!
//! - `Navigating` - Steer towards the target, slowing down for large heading errors and for the
//!   final approach.
//! - `Avoiding` - Timed reverse, pivot and creep manoeuvre performed when an obstacle ahead is
//!   critically close.
//! - `Deflecting` - Curve around a non-critical obstacle ahead.
//! - `FinalSpin` - The target has been reached, rotate in place forever. This mode is never left,
//!   stopping the run is up to whatever supervises the rover.
//!
//! Transitions are evaluated first on every tick, then the wheel demands of the resulting mode
//! are computed.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod avoiding;
mod deflecting;
mod navigating;
mod params;
mod state;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::fmt::Display;

use serde::Serialize;

pub use self::{
    avoiding::Avoiding,
    deflecting::Deflecting,
    navigating::ProgressTracker,
    params::{AvoidParams, DeflectParams, NavCtrlParams, NavigateParams},
    state::{NavCtrl, NavInput, StatusReport},
};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors that can occur in the navigation controller.
#[derive(Debug, thiserror::Error)]
pub enum NavCtrlError {
    #[error("Failed to load NavCtrlParams: {0}")]
    ParamLoadError(util::params::LoadError),
}

/// Current mode of the navigation controller.
///
/// Each mode carries only the data it needs, so no timer or counter outlives the mode that uses
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum NavMode {
    Navigating,
    Avoiding(Avoiding),
    Deflecting(Deflecting),
    FinalSpin,
}

/// Side towards which the rover turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TurnDir {
    /// Anticlockwise when seen from above
    Left,

    /// Clockwise when seen from above
    Right,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl NavMode {
    pub fn is_navigating(&self) -> bool {
        matches!(self, NavMode::Navigating)
    }

    pub fn is_avoiding(&self) -> bool {
        matches!(self, NavMode::Avoiding(_))
    }

    pub fn is_deflecting(&self) -> bool {
        matches!(self, NavMode::Deflecting(_))
    }

    pub fn is_final_spin(&self) -> bool {
        matches!(self, NavMode::FinalSpin)
    }
}

impl Default for NavMode {
    fn default() -> Self {
        NavMode::Navigating
    }
}

impl Display for NavMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NavMode::Navigating => write!(f, "Navigating"),
            NavMode::Avoiding(_) => write!(f, "Avoiding"),
            NavMode::Deflecting(_) => write!(f, "Deflecting"),
            NavMode::FinalSpin => write!(f, "FinalSpin"),
        }
    }
}

impl TurnDir {
    /// Sign of the turn in the anticlockwise-positive convention.
    pub fn sign(&self) -> f64 {
        match self {
            TurnDir::Left => 1.0,
            TurnDir::Right => -1.0,
        }
    }
}

impl Display for TurnDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnDir::Left => write!(f, "LEFT"),
            TurnDir::Right => write!(f, "RIGHT"),
        }
    }
}
