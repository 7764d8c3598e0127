//! Parameters structure for the kinematic simulation

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

use super::SimError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Description of the simulated world.
#[derive(Debug, Clone, Deserialize)]
pub struct WorldParams {
    /// Simulated time after which the world terminates, unbounded if absent.
    ///
    /// Units: seconds
    #[serde(default)]
    pub max_time_s: Option<f64>,

    pub robot: RobotParams,

    pub sensors: SensorParams,

    /// Passive bodies in the world, targets and obstacles alike.
    #[serde(default)]
    pub bodies: Vec<BodyParams>,
}

/// The simulated differential drive robot.
#[derive(Debug, Clone, Deserialize)]
pub struct RobotParams {
    /// Name of the robot's body.
    pub name: String,

    /// Units: meters
    pub wheel_radius_m: f64,

    /// Distance between the two wheels.
    ///
    /// Units: meters
    pub axle_length_m: f64,

    /// Radius of the robot's circular body, the proximity sensors sit on its surface.
    ///
    /// Units: meters
    pub body_radius_m: f64,

    /// Initial position.
    ///
    /// Units: meters
    pub position_m: [f64; 3],

    /// Initial heading, anticlockwise from the world X axis.
    ///
    /// Units: radians
    pub heading_rad: f64,
}

/// Model of the proximity sensor ring.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorParams {
    pub channels: Vec<ChannelParams>,

    /// Distance to reading table, sorted by increasing distance. Obstacles further than the last
    /// entry read zero.
    ///
    /// Units: (meters, raw)
    pub lookup: Vec<[f64; 2]>,

    /// Amplitude of the uniform noise added to every non-zero reading.
    #[serde(default)]
    pub noise_amplitude: f64,

    /// Channels that exist in `channels` but are not fitted to the robot.
    #[serde(default)]
    pub omit: Vec<String>,
}

/// One proximity channel.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelParams {
    pub name: String,

    /// Mounting angle relative to the robot's heading, positive to the left.
    ///
    /// Units: radians
    pub angle_rad: f64,
}

/// A passive body.
#[derive(Debug, Clone, Deserialize)]
pub struct BodyParams {
    pub name: String,

    /// Units: meters
    pub position_m: [f64; 3],

    /// Units: kilograms
    #[serde(default)]
    pub mass: Option<f64>,

    /// Extent along the world X, Y and Z axes. Bodies without a size do not block the sensors.
    ///
    /// Units: meters
    #[serde(default)]
    pub size: Option<[f64; 3]>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl WorldParams {
    /// Check the world description is usable.
    pub fn validate(&self) -> Result<(), SimError> {
        let robot = &self.robot;

        if !(robot.wheel_radius_m > 0.0) {
            return Err(SimError::InvalidParams(format!(
                "wheel radius must be positive, found {}",
                robot.wheel_radius_m
            )));
        }

        if !(robot.axle_length_m > 0.0) {
            return Err(SimError::InvalidParams(format!(
                "axle length must be positive, found {}",
                robot.axle_length_m
            )));
        }

        if self.sensors.lookup.is_empty() {
            return Err(SimError::InvalidParams(
                "the sensor lookup table is empty".into(),
            ));
        }

        if self
            .sensors
            .lookup
            .windows(2)
            .any(|w| !(w[1][0] > w[0][0]))
        {
            return Err(SimError::InvalidParams(
                "the sensor lookup table must be sorted by increasing distance".into(),
            ));
        }

        if let Some(b) = self.bodies.iter().find(|b| b.name == robot.name) {
            return Err(SimError::DuplicateBody(b.name.clone()));
        }

        for (i, b) in self.bodies.iter().enumerate() {
            if self.bodies[..i].iter().any(|o| o.name == b.name) {
                return Err(SimError::DuplicateBody(b.name.clone()));
            }
        }

        Ok(())
    }
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            max_time_s: None,
            robot: RobotParams::default(),
            sensors: SensorParams::default(),
            bodies: Vec::new(),
        }
    }
}

impl Default for RobotParams {
    fn default() -> Self {
        Self {
            name: String::from("EPUCK"),
            wheel_radius_m: 0.0205,
            axle_length_m: 0.052,
            body_radius_m: 0.037,
            position_m: [0.0; 3],
            heading_rad: 0.0,
        }
    }
}

impl Default for SensorParams {
    fn default() -> Self {
        let angles = [-0.30, -0.80, -1.57, -2.64, 2.64, 1.57, 0.80, 0.30];

        Self {
            channels: angles
                .iter()
                .enumerate()
                .map(|(i, &angle_rad)| ChannelParams {
                    name: format!("ps{}", i),
                    angle_rad,
                })
                .collect(),
            lookup: vec![
                [0.0, 4095.0],
                [0.005, 2133.0],
                [0.01, 1465.0],
                [0.02, 601.0],
                [0.03, 383.0],
                [0.04, 234.0],
                [0.05, 158.0],
                [0.06, 120.0],
                [0.07, 67.0],
            ],
            noise_amplitude: 0.0,
            omit: Vec::new(),
        }
    }
}
