//! # Kinematic simulation
//!
//! A minimal stand-in for the external world, used to run the seeker without a full simulator.
//! It implements both [`Supervisor`] and [`Robot`]:
//!
//! - The robot is a differential drive integrated kinematically from the wheel demands, there are
//!   no dynamics and no collisions.
//! - Passive bodies never move.
//! - Proximity sensors are rays cast from the robot's surface onto the axis-aligned footprint of
//!   every body with a size.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod params;
pub mod prox_model;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};

// Internal
pub use params::*;
use sim_if::{
    eqpt::{drive::WheelDems, prox::ProxChannel},
    world::{BodyId, BodyPose},
    Robot, StepResult, Supervisor,
};
use util::{maths::wrap_pi, params as util_params, time::millis_to_seconds};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Body ID of the robot, passive bodies follow it in the order they are declared.
const ROBOT_BODY: BodyId = BodyId(0);

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Kinematic world simulation.
pub struct KinematicSim<R = StdRng> {
    params: WorldParams,

    /// Robot position, only X and Y ever change.
    ///
    /// Units: meters
    robot_position_m: [f64; 3],

    /// Units: radians
    robot_heading_rad: f64,

    /// Current wheel demands
    dems: WheelDems,

    /// Sampling period of each channel, `None` while disabled
    channel_periods_ms: Vec<Option<u32>>,

    /// Latest reading of each channel
    readings: Vec<f64>,

    /// Number of completed steps
    num_steps: u64,

    /// Simulated time
    ///
    /// Units: seconds
    time_s: f64,

    rng: R,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors that can occur in the simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("Failed to load the world parameters: {0}")]
    ParamLoadError(util_params::LoadError),

    #[error("Invalid world parameters: {0}")]
    InvalidParams(String),

    #[error("Body {0} is declared more than once")]
    DuplicateBody(String),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl KinematicSim<StdRng> {
    /// Load the world from a file in the parameters directory.
    pub fn init(params_path: &str) -> Result<Self, SimError> {
        Self::new(util_params::load(params_path).map_err(SimError::ParamLoadError)?)
    }

    /// Load the world from a file anywhere on disk.
    pub fn init_from_path(path: &str) -> Result<Self, SimError> {
        Self::new(util_params::load_from_path(path).map_err(SimError::ParamLoadError)?)
    }

    /// Create a new simulation with an entropy seeded noise source.
    pub fn new(params: WorldParams) -> Result<Self, SimError> {
        Self::with_rng(params, StdRng::from_entropy())
    }
}

impl<R: Rng> KinematicSim<R> {
    /// Create a new simulation using the given noise source.
    pub fn with_rng(params: WorldParams, rng: R) -> Result<Self, SimError> {
        params.validate()?;

        let num_channels = params.sensors.channels.len();

        info!(
            "Kinematic simulation created with {} bodies and {} proximity channels",
            params.bodies.len(),
            num_channels
        );

        Ok(Self {
            robot_position_m: params.robot.position_m,
            robot_heading_rad: params.robot.heading_rad,
            dems: WheelDems::stop(),
            channel_periods_ms: vec![None; num_channels],
            readings: vec![0.0; num_channels],
            num_steps: 0,
            time_s: 0.0,
            params,
            rng,
        })
    }

    pub fn params(&self) -> &WorldParams {
        &self.params
    }

    pub fn num_steps(&self) -> u64 {
        self.num_steps
    }

    /// Current wheel demands.
    pub fn wheel_dems(&self) -> WheelDems {
        self.dems
    }

    /// Integrate the robot's motion over `dt_s` from the current demands.
    fn integrate(&mut self, dt_s: f64) {
        let robot = &self.params.robot;

        let lin_vel_ms = robot.wheel_radius_m * (self.dems.left_rads + self.dems.right_rads) / 2.0;
        let ang_vel_rads =
            robot.wheel_radius_m * (self.dems.right_rads - self.dems.left_rads) / robot.axle_length_m;

        // Midpoint heading keeps arcs on the circle for constant demands
        let mid_heading_rad = self.robot_heading_rad + 0.5 * ang_vel_rads * dt_s;

        self.robot_position_m[0] += lin_vel_ms * mid_heading_rad.cos() * dt_s;
        self.robot_position_m[1] += lin_vel_ms * mid_heading_rad.sin() * dt_s;
        self.robot_heading_rad = wrap_pi(self.robot_heading_rad + ang_vel_rads * dt_s);
    }

    /// Recompute the readings of all enabled channels.
    fn sense(&mut self) {
        let robot = &self.params.robot;
        let sensors = &self.params.sensors;

        for (i, channel) in sensors.channels.iter().enumerate() {
            if self.channel_periods_ms[i].is_none() {
                continue;
            }

            let angle_rad = self.robot_heading_rad + channel.angle_rad;
            let origin_m = [
                self.robot_position_m[0] + robot.body_radius_m * angle_rad.cos(),
                self.robot_position_m[1] + robot.body_radius_m * angle_rad.sin(),
            ];

            let nearest_m = self
                .params
                .bodies
                .iter()
                .filter_map(|b| {
                    let size = b.size?;
                    prox_model::ray_to_footprint(
                        origin_m,
                        angle_rad,
                        [b.position_m[0], b.position_m[1]],
                        [size[0] / 2.0, size[1] / 2.0],
                    )
                })
                .fold(std::f64::INFINITY, f64::min);

            let mut reading = prox_model::lookup_reading(&sensors.lookup, nearest_m);

            if reading > 0.0 && sensors.noise_amplitude > 0.0 {
                reading += self
                    .rng
                    .gen_range(-sensors.noise_amplitude..=sensors.noise_amplitude);
            }

            self.readings[i] = reading.max(0.0);
        }
    }
}

impl<R> Supervisor for KinematicSim<R> {
    fn body_from_name(&self, name: &str) -> Option<BodyId> {
        if name == self.params.robot.name {
            return Some(ROBOT_BODY);
        }

        self.params
            .bodies
            .iter()
            .position(|b| b.name == name)
            .map(|i| BodyId(i + 1))
    }

    fn self_body(&self) -> BodyId {
        ROBOT_BODY
    }

    fn body_mass(&self, body: BodyId) -> Option<f64> {
        self.params.bodies.get(body.0.checked_sub(1)?)?.mass
    }

    fn body_size(&self, body: BodyId) -> Option<[f64; 3]> {
        self.params.bodies.get(body.0.checked_sub(1)?)?.size
    }

    fn body_pose(&self, body: BodyId) -> Option<BodyPose> {
        if body == ROBOT_BODY {
            return Some(BodyPose::from_heading(
                self.robot_position_m,
                self.robot_heading_rad,
            ));
        }

        self.params
            .bodies
            .get(body.0.checked_sub(1)?)
            .map(|b| BodyPose::from_heading(b.position_m, 0.0))
    }
}

impl<R: Rng> Robot for KinematicSim<R> {
    fn proximity_channel(&mut self, name: &str, period_ms: u32) -> Option<ProxChannel> {
        let sensors = &self.params.sensors;

        if sensors.omit.iter().any(|n| n == name) {
            return None;
        }

        let index = sensors.channels.iter().position(|c| c.name == name)?;
        self.channel_periods_ms[index] = Some(period_ms);

        debug!("Channel {} enabled with a {} ms period", name, period_ms);

        Some(ProxChannel(index))
    }

    fn read_proximity(&self, channel: ProxChannel) -> f64 {
        match self.channel_periods_ms.get(channel.0) {
            Some(Some(_)) => self.readings[channel.0],
            _ => 0.0,
        }
    }

    fn set_wheel_velocities(&mut self, dems: WheelDems) {
        self.dems = dems;
    }

    fn time_s(&self) -> f64 {
        self.time_s
    }

    fn step(&mut self, period_ms: u32) -> StepResult {
        if let Some(max_time_s) = self.params.max_time_s {
            if self.time_s >= max_time_s {
                return StepResult::Terminate;
            }
        }

        self.integrate(millis_to_seconds(period_ms));
        self.sense();

        self.num_steps += 1;
        self.time_s += millis_to_seconds(period_ms);

        StepResult::Continue
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        nav_ctrl::{NavCtrl, NavCtrlParams, NavMode},
        obs_class::ObsClassParams,
        params::SeekExecParams,
        seeker::Seeker,
        target_sel::TargetSelParams,
    };
    use rand::rngs::mock::StepRng;

    fn body(name: &str, x: f64, y: f64, mass: Option<f64>, size: Option<[f64; 3]>) -> BodyParams {
        BodyParams {
            name: name.into(),
            position_m: [x, y, 0.0],
            mass,
            size,
        }
    }

    fn sim(params: WorldParams) -> KinematicSim<StepRng> {
        KinematicSim::with_rng(params, StepRng::new(0, 0)).unwrap()
    }

    #[test]
    fn test_bodies() {
        let mut params = WorldParams::default();
        params.bodies.push(body("CAIXA01", 1.0, 2.0, Some(0.4), None));
        params
            .bodies
            .push(body("CAIXA02", 0.0, 0.5, None, Some([0.1, 0.2, 0.3])));
        let sim = sim(params);

        assert_eq!(sim.body_from_name("EPUCK"), Some(sim.self_body()));
        assert_eq!(sim.body_from_name("CAIXA03"), None);

        let c1 = sim.body_from_name("CAIXA01").unwrap();
        let c2 = sim.body_from_name("CAIXA02").unwrap();
        assert_eq!(sim.body_mass(c1), Some(0.4));
        assert_eq!(sim.body_size(c1), None);
        assert_eq!(sim.body_mass(c2), None);
        assert_eq!(sim.body_size(c2), Some([0.1, 0.2, 0.3]));
        assert_eq!(sim.body_mass(sim.self_body()), None);

        assert_eq!(sim.body_pose(c1).unwrap().position_m, [1.0, 2.0, 0.0]);
        assert!(sim.body_pose(BodyId(10)).is_none());
    }

    #[test]
    fn test_invalid_params() {
        let mut params = WorldParams::default();
        params.robot.axle_length_m = 0.0;
        assert!(matches!(
            KinematicSim::new(params),
            Err(SimError::InvalidParams(_))
        ));

        let mut params = WorldParams::default();
        params.bodies.push(body("CAIXA01", 1.0, 2.0, Some(0.4), None));
        params.bodies.push(body("CAIXA01", 1.0, 0.0, Some(0.4), None));
        assert!(matches!(
            KinematicSim::new(params),
            Err(SimError::DuplicateBody(_))
        ));
    }

    #[test]
    fn test_drive_kinematics() {
        let params = WorldParams {
            max_time_s: Some(1.0),
            ..Default::default()
        };
        let mut sim = sim(params);

        // Straight line, 1 s at 10 rad/s
        sim.set_wheel_velocities(WheelDems::new(10.0, 10.0));
        while sim.step(32) == StepResult::Continue {}

        let pose = sim.body_pose(sim.self_body()).unwrap();
        let expected_m = 0.0205 * 10.0 * sim.time_s();
        assert!((pose.position_m[0] - expected_m).abs() < 1e-9);
        assert!(pose.position_m[1].abs() < 1e-12);
        assert_eq!(sim.num_steps(), 32);

        // Spinning in place turns anticlockwise without moving
        let mut sim = super::KinematicSim::with_rng(WorldParams::default(), StepRng::new(0, 0))
            .unwrap();
        sim.set_wheel_velocities(WheelDems::new(-1.0, 1.0));
        sim.step(100);

        let pose = sim.body_pose(sim.self_body()).unwrap();
        let heading = crate::loc::heading_from_orientation(&pose.orientation);
        assert!((heading - 0.0205 * 2.0 / 0.052 * 0.1).abs() < 1e-9);
        assert!(pose.position_m[0].abs() < 1e-12);
    }

    #[test]
    fn test_proximity() {
        let mut params = WorldParams::default();
        params.sensors.omit.push("ps3".into());
        params
            .bodies
            .push(body("WALL", 0.037 + 0.03 + 0.05, 0.0, None, Some([0.1, 1.0, 0.1])));
        let mut sim = sim(params);

        let ps0 = sim.proximity_channel("ps0", 32).unwrap();
        let ps7 = sim.proximity_channel("ps7", 32).unwrap();
        let ps4 = sim.proximity_channel("ps4", 32).unwrap();
        assert!(sim.proximity_channel("ps3", 32).is_none());
        assert!(sim.proximity_channel("ps9", 32).is_none());

        // Nothing is read before the first step
        assert_eq!(sim.read_proximity(ps0), 0.0);

        sim.step(32);

        // Front sensors see the wall about 3 cm away, the rear one sees nothing
        let front = sim.read_proximity(ps0);
        assert!(front > 300.0 && front < 450.0, "front reading {}", front);
        assert!((sim.read_proximity(ps7) - front).abs() < 1e-9);
        assert_eq!(sim.read_proximity(ps4), 0.0);

        // Disabled channels read zero
        let ps1 = ProxChannel(1);
        assert_eq!(sim.read_proximity(ps1), 0.0);
    }

    #[test]
    fn test_terminates() {
        let params = WorldParams {
            max_time_s: Some(0.1),
            ..Default::default()
        };
        let mut sim = sim(params);

        let mut steps = 0;
        while sim.step(32) == StepResult::Continue {
            steps += 1;
        }
        assert_eq!(steps, 4);
        assert_eq!(sim.step(32), StepResult::Terminate);
    }

    #[test]
    fn test_seeker_reaches_target() {
        let mut params = WorldParams {
            max_time_s: Some(20.0),
            ..Default::default()
        };
        // Candidates have no footprint so the sensors stay clear
        params
            .bodies
            .push(body("CAIXA01", 0.5, 0.2, None, None));
        params
            .bodies
            .push(body("CAIXA02", -0.3, 0.4, Some(2.0), None));
        params
            .bodies
            .push(body("CAIXA03", 0.5, 0.2, Some(0.5), None));
        let mut sim = sim(params);

        let mut seeker = Seeker::init(
            &mut sim,
            &SeekExecParams::default(),
            &TargetSelParams::default(),
            &ObsClassParams::default(),
            NavCtrl::with_rng(NavCtrlParams::default(), StepRng::new(0, 0)),
        )
        .unwrap();

        assert_eq!(seeker.target().name, "CAIXA03");

        let summary = seeker.run(&mut sim);

        assert_eq!(summary.final_mode, NavMode::FinalSpin);
        assert!(summary.target_reached_tick.is_some());
        assert_eq!(summary.num_ticks, sim.num_steps());

        // Spinning in place at the end
        let dems = sim.wheel_dems();
        assert_eq!(dems, WheelDems::new(-2.0, 2.0));
    }
}
