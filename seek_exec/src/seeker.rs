//! # Seeker
//!
//! Ties target selection, localisation, obstacle classification and the navigation controller
//! together into the per-tick control loop. The seeker owns no world state, every tick it reads
//! the sensors and poses it needs through a [`SimInterface`] and writes the wheel demands back.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::{info, warn};
use rand::{rngs::StdRng, Rng};

// Internal
use crate::{
    loc::Pose,
    nav_ctrl::{NavCtrl, NavInput, NavMode, StatusReport},
    obs_class::{ObsClassParams, ObstacleFlags},
    params::SeekExecParams,
    target_sel::{self, Target, TargetSelError, TargetSelParams},
};
use sim_if::{
    eqpt::{
        drive::WheelDems,
        prox::{ProxChannel, ProxReadings, NUM_PROX_CHANNELS},
    },
    SimInterface, StepResult,
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The rover's control loop.
pub struct Seeker<R = StdRng> {
    /// The selected target, fixed for the whole run
    target: Target,

    /// Resolved proximity channels in ring order, `None` for absent sensors
    channels: [Option<ProxChannel>; NUM_PROX_CHANNELS],

    tick_period_ms: u32,

    obs_class_params: ObsClassParams,

    nav_ctrl: NavCtrl<R>,

    /// Distance to the target at the last progress log line
    last_logged_dist_m: f64,
}

/// Output of one control tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutput {
    /// Demands written to the drive actuators
    pub dems: WheelDems,

    /// Controller report, `None` if the controller could not run this tick
    pub report: Option<StatusReport>,
}

/// Summary of a complete run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Number of control ticks executed
    pub num_ticks: u64,

    /// Controller mode when the world terminated
    pub final_mode: NavMode,

    /// Tick at which the target was reached, if it was
    pub target_reached_tick: Option<u64>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors that can occur while setting up the seeker.
#[derive(Debug, thiserror::Error)]
pub enum SeekerError {
    #[error("Target selection failed: {0}")]
    TargetSelError(TargetSelError),

    #[error("The tick period must be greater than zero")]
    ZeroTickPeriod,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<R: Rng> Seeker<R> {
    /// Set up the seeker in the given world.
    ///
    /// The target is selected, the proximity sensors are resolved and enabled, and the wheels are
    /// stopped. Nothing is written to the wheels if target selection fails.
    pub fn init<S>(
        sim: &mut S,
        exec_params: &SeekExecParams,
        target_sel_params: &TargetSelParams,
        obs_class_params: &ObsClassParams,
        nav_ctrl: NavCtrl<R>,
    ) -> Result<Self, SeekerError>
    where
        S: SimInterface + ?Sized,
    {
        if exec_params.tick_period_ms == 0 {
            return Err(SeekerError::ZeroTickPeriod);
        }

        let target = target_sel::select_target(&*sim, target_sel_params)
            .map_err(SeekerError::TargetSelError)?;

        let channels = enable_channels(sim, exec_params);

        sim.set_wheel_velocities(WheelDems::stop());

        let seeker = Self {
            target,
            channels,
            tick_period_ms: exec_params.tick_period_ms,
            obs_class_params: *obs_class_params,
            nav_ctrl,
            last_logged_dist_m: 0.0,
        };

        seeker.log_initial_status(&*sim);

        Ok(seeker)
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn nav_ctrl(&self) -> &NavCtrl<R> {
        &self.nav_ctrl
    }

    pub fn tick_period_ms(&self) -> u32 {
        self.tick_period_ms
    }

    /// Run the control loop until the world terminates.
    pub fn run<S>(&mut self, sim: &mut S) -> RunSummary
    where
        S: SimInterface + ?Sized,
    {
        let mut num_ticks = 0;
        let mut target_reached_tick = None;

        while sim.step(self.tick_period_ms) == StepResult::Continue {
            let output = self.cycle(sim);
            num_ticks += 1;

            if let Some(report) = output.report {
                if report.mode_changed && report.mode.is_final_spin() {
                    target_reached_tick = Some(num_ticks);
                }
            }
        }

        info!("World terminated after {} ticks", num_ticks);

        RunSummary {
            num_ticks,
            final_mode: *self.nav_ctrl.mode(),
            target_reached_tick,
        }
    }

    /// Execute one control tick.
    ///
    /// Wheel demands are always written, even when the controller could not run. If either pose
    /// is unavailable the rover spins on in `FinalSpin` and stops in every other mode.
    pub fn cycle<S>(&mut self, sim: &mut S) -> TickOutput
    where
        S: SimInterface + ?Sized,
    {
        let prox = self.read_proximity(&*sim);

        let poses = (
            sim.body_pose(sim.self_body()).map(Pose::from),
            sim.body_pose(self.target.body).map(Pose::from),
        );

        let (robot, target) = match poses {
            (Some(r), Some(t)) => (r, t),
            _ => {
                warn!(
                    "Cannot read the pose of the rover or of {}, holding position",
                    self.target.name
                );

                let dems = match self.nav_ctrl.mode() {
                    NavMode::FinalSpin => {
                        let spin_rads = self.nav_ctrl.params().spin_rate_rads;
                        WheelDems::new(-spin_rads, spin_rads)
                    }
                    _ => WheelDems::stop(),
                };
                sim.set_wheel_velocities(dems);

                return TickOutput { dems, report: None };
            }
        };

        let input = NavInput {
            time_s: sim.time_s(),
            dist_m: robot.distance_to(&target),
            head_err_rad: robot.heading_error_to(&target),
            flags: ObstacleFlags::classify(&prox, &self.obs_class_params),
            prox,
        };

        self.log_progress(input.dist_m);

        let (dems, report) = self.nav_ctrl.step(&input);

        sim.set_wheel_velocities(dems);

        TickOutput {
            dems,
            report: Some(report),
        }
    }

    /// Read every channel, absent channels read zero.
    fn read_proximity<S>(&self, sim: &S) -> ProxReadings
    where
        S: SimInterface + ?Sized,
    {
        let mut readings = [0.0; NUM_PROX_CHANNELS];

        for (reading, channel) in readings.iter_mut().zip(self.channels.iter()) {
            if let Some(c) = channel {
                *reading = sim.read_proximity(*c);
            }
        }

        readings
    }

    /// Log the distance to the target whenever it changed enough since the last line, and on
    /// every tick once the target has been reached.
    fn log_progress(&mut self, dist_m: f64) {
        let mode = self.nav_ctrl.mode();

        if (dist_m - self.last_logged_dist_m).abs() > self.nav_ctrl.params().progress_log_dist_m
            || mode.is_final_spin()
        {
            info!(
                "Distance: {:.2} m | Target: {} | State: {}",
                dist_m, self.target.name, mode
            );
            self.last_logged_dist_m = dist_m;
        }
    }

    fn log_initial_status<S>(&self, sim: &S)
    where
        S: SimInterface + ?Sized,
    {
        let robot = sim.body_pose(sim.self_body()).map(Pose::from);
        let target = sim.body_pose(self.target.body).map(Pose::from);

        info!("=== INITIAL STATUS ===");

        if let Some(r) = robot {
            info!(
                "Rover position: ({:.2}, {:.2})",
                r.position_m[0], r.position_m[1]
            );
        }

        if let Some(t) = target {
            info!(
                "Target {} position: ({:.2}, {:.2})",
                self.target.name, t.position_m[0], t.position_m[1]
            );
        }

        match (robot, target) {
            (Some(r), Some(t)) => info!("Initial distance: {:.2} m", r.distance_to(&t)),
            _ => warn!("Initial distance unknown, a pose is unavailable"),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Resolve and enable all proximity channels by name.
fn enable_channels<S>(
    sim: &mut S,
    exec_params: &SeekExecParams,
) -> [Option<ProxChannel>; NUM_PROX_CHANNELS]
where
    S: SimInterface + ?Sized,
{
    let mut channels = [None; NUM_PROX_CHANNELS];

    for (channel, name) in channels
        .iter_mut()
        .zip(exec_params.prox_channel_names.iter())
    {
        *channel = sim.proximity_channel(name, exec_params.tick_period_ms);

        match channel {
            Some(_) => info!("Sensor {} enabled", name),
            None => warn!("Sensor {} not found, it will read zero", name),
        }
    }

    info!("Proximity sensors ready");

    channels
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
