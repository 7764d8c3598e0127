//! # Navigation controller state

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::{info, trace, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;

// Internal
use super::{
    navigating, Avoiding, Deflecting, NavCtrlError, NavCtrlParams, NavMode, ProgressTracker,
    TurnDir,
};
use crate::obs_class::ObstacleFlags;
use sim_if::eqpt::{drive::WheelDems, prox::ProxReadings};
use util::params;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Navigation controller.
///
/// Owns all of the control state. `R` is the source of randomness used to break ties when picking
/// a deflection direction.
pub struct NavCtrl<R = StdRng> {
    params: NavCtrlParams,

    /// Current mode
    mode: NavMode,

    /// Progress towards the target, only updated while navigating
    progress: ProgressTracker,

    rng: R,
}

/// Everything the controller needs to know about the current tick.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NavInput {
    /// Simulated time of this tick.
    ///
    /// Units: seconds
    pub time_s: f64,

    /// Planar distance to the target.
    ///
    /// Units: meters
    pub dist_m: f64,

    /// Heading error towards the target, positive to the left.
    ///
    /// Units: radians
    pub head_err_rad: f64,

    /// Obstacle flags classified from `prox`
    pub flags: ObstacleFlags,

    /// Raw proximity readings
    pub prox: ProxReadings,
}

/// Report on one tick of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusReport {
    /// Mode after this tick's transitions
    pub mode: NavMode,

    /// True if the mode changed on this tick
    pub mode_changed: bool,

    /// True if a lack of progress was detected on this tick
    pub stall_detected: bool,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl NavCtrl<StdRng> {
    /// Initialise the controller from a parameter file.
    pub fn init(params_path: &str) -> Result<Self, NavCtrlError> {
        let params = params::load(params_path).map_err(NavCtrlError::ParamLoadError)?;

        Ok(Self::new(params))
    }

    /// Create a new controller with an entropy seeded random source.
    pub fn new(params: NavCtrlParams) -> Self {
        Self::with_rng(params, StdRng::from_entropy())
    }
}

impl<R: Rng> NavCtrl<R> {
    /// Create a new controller using the given random source.
    pub fn with_rng(params: NavCtrlParams, rng: R) -> Self {
        Self {
            params,
            mode: NavMode::default(),
            progress: ProgressTracker::new(),
            rng,
        }
    }

    pub fn mode(&self) -> &NavMode {
        &self.mode
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn params(&self) -> &NavCtrlParams {
        &self.params
    }

    /// Process one tick, returning the wheel demands for it.
    pub fn step(&mut self, input: &NavInput) -> (WheelDems, StatusReport) {
        let mode_changed = self.update_mode(input);

        let mut stall_detected = false;

        let dems = match self.mode {
            NavMode::Navigating => {
                let dems = navigating::wheel_dems(
                    &self.params,
                    input.dist_m,
                    input.head_err_rad,
                    &input.flags,
                );

                stall_detected = self.progress.update(
                    input.dist_m,
                    self.params.navigate.min_progress_m,
                    self.params.navigate.stall_limit_ticks,
                );

                dems
            }
            NavMode::Avoiding(ref avoiding) => avoiding.wheel_dems(input.time_s, &self.params),
            NavMode::Deflecting(ref deflecting) => {
                deflecting.wheel_dems(input.flags.front, &self.params)
            }
            NavMode::FinalSpin => {
                WheelDems::new(-self.params.spin_rate_rads, self.params.spin_rate_rads)
            }
        };

        trace!(
            "NavCtrl output: {} left {:.3} rad/s, right {:.3} rad/s",
            self.mode,
            dems.left_rads,
            dems.right_rads
        );

        (
            dems,
            StatusReport {
                mode: self.mode,
                mode_changed,
                stall_detected,
            },
        )
    }

    /// Evaluate the mode transitions for this tick, returning true if the mode changed.
    ///
    /// Rules are checked in priority order, the first matching one applies.
    fn update_mode(&mut self, input: &NavInput) -> bool {
        if self.mode.is_final_spin() {
            return false;
        }

        let flags = &input.flags;

        if input.dist_m < self.params.detection_radius_m {
            info!(
                "*** Target reached at {:.2} m, starting final rotation ***",
                input.dist_m
            );
            self.mode = NavMode::FinalSpin;
            return true;
        }

        if flags.critical && !self.mode.is_avoiding() {
            let dir = Avoiding::choose_dir(flags, &input.prox);
            warn!("Critical obstacle! Starting avoidance manoeuvre ({})", dir);
            self.mode = NavMode::Avoiding(Avoiding::new(input.time_s, dir));
            return true;
        }

        if flags.front && self.mode.is_navigating() {
            let dir = self.choose_deflect_dir(flags);
            info!("Obstacle ahead, starting deflection ({})", dir);
            self.mode = NavMode::Deflecting(Deflecting::new(dir));
            return true;
        }

        let resume = match self.mode {
            NavMode::Deflecting(ref mut deflecting) => {
                let done = deflecting.tick(flags.front, &self.params);
                if done {
                    info!("Deflection complete, resuming navigation");
                }
                done
            }
            NavMode::Avoiding(ref avoiding) => {
                let done = avoiding.is_complete(input.time_s, &self.params);
                if done {
                    info!("Avoidance complete, resuming navigation");
                }
                done
            }
            _ => false,
        };

        if resume {
            self.mode = NavMode::Navigating;
            self.progress.rebase(input.dist_m);
        }

        resume
    }

    /// Pick the deflection direction, away from an obstacle on one side only, randomly otherwise.
    fn choose_deflect_dir(&mut self, flags: &ObstacleFlags) -> TurnDir {
        match (flags.left, flags.right) {
            (true, false) => TurnDir::Right,
            (false, true) => TurnDir::Left,
            _ => {
                if self.rng.gen_bool(0.5) {
                    TurnDir::Left
                } else {
                    TurnDir::Right
                }
            }
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::mock::StepRng;

    /// Random source for which `gen_bool(0.5)` is always true.
    fn always_true() -> StepRng {
        StepRng::new(0, 0)
    }

    /// Random source for which `gen_bool(0.5)` is always false.
    fn always_false() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn ctrl(rng: StepRng) -> NavCtrl<StepRng> {
        NavCtrl::with_rng(NavCtrlParams::default(), rng)
    }

    fn input(time_s: f64, dist_m: f64) -> NavInput {
        NavInput {
            time_s,
            dist_m,
            ..Default::default()
        }
    }

    fn flags(front: bool, left: bool, right: bool, critical: bool) -> ObstacleFlags {
        ObstacleFlags {
            front,
            left,
            right,
            critical,
        }
    }

    #[test]
    fn test_final_spin_is_terminal() {
        let mut nav = ctrl(always_true());

        for (i, &d) in [1.0, 0.5, 0.2, 0.11].iter().enumerate() {
            let (_, report) = nav.step(&input(i as f64 * 0.032, d));
            assert!(report.mode.is_navigating());
        }

        let (dems, report) = nav.step(&input(0.2, 0.09));
        assert!(report.mode.is_final_spin());
        assert!(report.mode_changed);
        assert_eq!(dems, WheelDems::new(-2.0, 2.0));

        // Nothing gets out of the final spin, not even obstacles or moving away
        let mut later = input(0.3, 5.0);
        later.flags = flags(true, true, false, true);
        for _ in 0..10 {
            let (dems, report) = nav.step(&later);
            assert!(report.mode.is_final_spin());
            assert!(!report.mode_changed);
            assert_eq!(dems, WheelDems::new(-2.0, 2.0));
        }
    }

    #[test]
    fn test_target_reached_beats_obstacles() {
        let mut nav = ctrl(always_true());
        let mut i = input(0.0, 0.05);
        i.flags = flags(true, false, false, true);

        let (_, report) = nav.step(&i);
        assert!(report.mode.is_final_spin());
    }

    #[test]
    fn test_deflect_direction() {
        // Obstacle ahead and on the left, deflect right whatever the random source says
        for rng in vec![always_true(), always_false()] {
            let mut nav = ctrl(rng);
            let mut i = input(0.0, 1.0);
            i.flags = flags(true, true, false, false);

            let (dems, report) = nav.step(&i);
            assert_eq!(
                report.mode,
                NavMode::Deflecting(Deflecting {
                    ticks: 0,
                    dir: TurnDir::Right
                })
            );
            assert!(dems.left_rads > dems.right_rads);
        }

        let mut nav = ctrl(always_false());
        let mut i = input(0.0, 1.0);
        i.flags = flags(true, false, true, false);
        nav.step(&i);
        assert!(matches!(
            nav.mode(),
            NavMode::Deflecting(Deflecting {
                dir: TurnDir::Left,
                ..
            })
        ));
    }

    #[test]
    fn test_deflect_random_tie_break() {
        for &(left, right) in [(false, false), (true, true)].iter() {
            let mut i = input(0.0, 1.0);
            i.flags = flags(true, left, right, false);

            let mut nav = ctrl(always_true());
            nav.step(&i);
            assert!(matches!(
                nav.mode(),
                NavMode::Deflecting(Deflecting {
                    dir: TurnDir::Left,
                    ..
                })
            ));

            let mut nav = ctrl(always_false());
            nav.step(&i);
            assert!(matches!(
                nav.mode(),
                NavMode::Deflecting(Deflecting {
                    dir: TurnDir::Right,
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_deflect_resumes_navigation() {
        let mut nav = ctrl(always_true());
        let mut blocked = input(0.0, 1.0);
        blocked.flags = flags(true, false, false, false);

        nav.step(&blocked);
        assert!(nav.mode().is_deflecting());

        // Still blocked, keeps deflecting well past the minimum
        for _ in 0..40 {
            nav.step(&blocked);
            assert!(nav.mode().is_deflecting());
        }

        let (_, report) = nav.step(&input(1.0, 0.8));
        assert!(report.mode.is_navigating());
        assert!(report.mode_changed);
        assert_eq!(nav.progress().best_dist_m(), 0.8);
    }

    #[test]
    fn test_deflect_minimum_ticks() {
        let mut nav = ctrl(always_true());
        let mut blocked = input(0.0, 1.0);
        blocked.flags = flags(true, false, false, false);
        nav.step(&blocked);

        let clear = input(0.0, 1.0);
        for _ in 0..30 {
            nav.step(&clear);
            assert!(nav.mode().is_deflecting());
        }
        nav.step(&clear);
        assert!(nav.mode().is_navigating());
    }

    #[test]
    fn test_critical_interrupts_deflection() {
        let mut nav = ctrl(always_true());
        let mut i = input(0.0, 1.0);
        i.flags = flags(true, false, false, false);
        nav.step(&i);
        assert!(nav.mode().is_deflecting());

        i.time_s = 0.5;
        i.flags = flags(true, false, false, true);
        let (_, report) = nav.step(&i);
        assert!(report.mode.is_avoiding());
        assert!(report.mode_changed);
    }

    #[test]
    fn test_avoidance_manoeuvre() {
        let mut nav = ctrl(always_true());

        let mut i = input(3.0, 1.0);
        i.flags = flags(true, false, false, true);
        i.prox[2] = 120.0;
        i.prox[5] = 20.0;

        let (dems, report) = nav.step(&i);
        assert_eq!(
            report.mode,
            NavMode::Avoiding(Avoiding {
                start_time_s: 3.0,
                dir: TurnDir::Left
            })
        );
        assert!(dems.left_rads < 0.0 && dems.right_rads < 0.0);

        // Staying critical does not restart the manoeuvre
        i.time_s = 3.5;
        let (dems, report) = nav.step(&i);
        assert!(!report.mode_changed);
        assert!(dems.left_rads < 0.0 && dems.right_rads < 0.0);

        let (dems, _) = nav.step(&input(4.0, 1.0));
        assert!(dems.left_rads * dems.right_rads < 0.0);

        let (dems, report) = nav.step(&input(5.0, 1.0));
        assert!(report.mode.is_avoiding());
        assert!(dems.left_rads > 0.0);
        assert_eq!(dems.left_rads, dems.right_rads);

        let (_, report) = nav.step(&input(5.1, 0.9));
        assert!(report.mode.is_navigating());
        assert_eq!(nav.progress().best_dist_m(), 0.9);
    }

    #[test]
    fn test_avoidance_direction_with_left_obstacle() {
        let mut nav = ctrl(always_true());
        let mut i = input(0.0, 1.0);
        i.flags = flags(true, true, false, true);
        i.prox[2] = 500.0;

        nav.step(&i);
        assert!(matches!(
            nav.mode(),
            NavMode::Avoiding(Avoiding {
                dir: TurnDir::Right,
                ..
            })
        ));
    }

    #[test]
    fn test_front_ignored_while_avoiding() {
        let mut nav = ctrl(always_true());
        let mut i = input(0.0, 1.0);
        i.flags = flags(true, false, false, true);
        nav.step(&i);

        i.time_s = 1.0;
        i.flags = flags(true, false, false, false);
        nav.step(&i);
        assert!(nav.mode().is_avoiding());
    }

    #[test]
    fn test_stall_reported() {
        let mut nav = ctrl(always_true());
        let mut stalls = 0;

        for tick in 0..250 {
            let (_, report) = nav.step(&input(tick as f64 * 0.032, 1.0));
            if report.stall_detected {
                stalls += 1;
            }
            assert!(report.mode.is_navigating());
        }

        // First tick is progress, then a stall every 101 ticks
        assert_eq!(stalls, 2);
    }
}
