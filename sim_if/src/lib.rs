//! # Simulation interface crate.
//!
//! Defines the contract between the rover software and whatever simulates (or drives) the rover's
//! world. The rover software never owns the bodies, devices or clock of the world, it only reads
//! from and writes to them through the traits in this crate:
//!
//! - [`Supervisor`] - privileged read access to named bodies in the world and their properties.
//! - [`Robot`] - the rover's own devices (proximity sensors and drive actuators), the clock, and
//!   the step signal that paces the control loop.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Equipment data exchanged with the rover's devices
pub mod eqpt;

/// Bodies in the simulated world
pub mod world;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt::{drive::WheelDems, prox::ProxChannel};
use world::{BodyId, BodyPose};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Result of advancing the world by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// The step completed, a new tick is available.
    Continue,

    /// The world is shutting down, the control loop must exit.
    Terminate,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Privileged access to the bodies of the world.
pub trait Supervisor {
    /// Find a body by its name, returning `None` if no such body exists.
    fn body_from_name(&self, name: &str) -> Option<BodyId>;

    /// The body of the robot running this software.
    fn self_body(&self) -> BodyId;

    /// Read the scalar `mass` property of a body, if it has one.
    fn body_mass(&self, body: BodyId) -> Option<f64>;

    /// Read the `size` vector property of a body, if it has one.
    fn body_size(&self, body: BodyId) -> Option<[f64; 3]>;

    /// Read the current pose of a body, `None` if the body no longer exists.
    fn body_pose(&self, body: BodyId) -> Option<BodyPose>;
}

/// The robot's own devices and the world's clock.
pub trait Robot {
    /// Resolve a proximity sensor by name and enable it with the given sampling period.
    ///
    /// Returns `None` if the sensor does not exist on this robot.
    fn proximity_channel(&mut self, name: &str, period_ms: u32) -> Option<ProxChannel>;

    /// Read the latest value of an enabled proximity channel.
    fn read_proximity(&self, channel: ProxChannel) -> f64;

    /// Set the angular velocity demands of the drive actuators.
    fn set_wheel_velocities(&mut self, dems: WheelDems);

    /// Elapsed simulated time since the start of the run.
    ///
    /// Units: seconds
    fn time_s(&self) -> f64;

    /// Advance the world by one period, blocking until the next tick is available.
    fn step(&mut self, period_ms: u32) -> StepResult;
}

/// Everything the rover software needs from its world.
pub trait SimInterface: Supervisor + Robot {}

impl<T> SimInterface for T where T: Supervisor + Robot {}
