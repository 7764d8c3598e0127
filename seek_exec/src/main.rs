//! Main seeker executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Load parameters and build the world
//!     - Select the target, enable the sensors and stop the wheels
//!     - Main loop, once per world step:
//!         - Proximity sensing and obstacle classification
//!         - Rover and target pose acquisition
//!         - Navigation control processing
//!         - Wheel demand output
//!
//! The loop ends when the world terminates.
//!
//! # Usage
//!
//! `seek_exec [WORLD_FILE]`, if no world file is given `sim_world.toml` is loaded from the
//! parameters directory.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use log::{debug, error, info};
use std::env;

// Internal
use seek_lib::{
    nav_ctrl::NavCtrl,
    obs_class::ObsClassParams,
    params::SeekExecParams,
    seeker::{Seeker, SeekerError},
    sim::KinematicSim,
    target_sel::TargetSelParams,
};
use util::{
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Exit code used when no target could be selected.
const TARGET_SEL_FAILED_EXIT_CODE: i32 = 2;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("seek_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Box Seeker Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let exec_params: SeekExecParams =
        util::params::load("seek_exec.toml").wrap_err("Could not load exec params")?;
    let target_sel_params: TargetSelParams =
        util::params::load("target_sel.toml").wrap_err("Could not load target selection params")?;
    let obs_class_params: ObsClassParams = util::params::load("obs_class.toml")
        .wrap_err("Could not load obstacle classification params")?;

    info!("Exec parameters loaded");

    // ---- INITIALISE WORLD ----

    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    let mut sim = match args.len() {
        1 => KinematicSim::init("sim_world.toml"),
        2 => {
            info!("Loading world from \"{}\"", &args[1]);
            KinematicSim::init_from_path(&args[1])
        }
        n => {
            return Err(eyre!(
                "Expected either zero or one argument, found {}",
                n - 1
            ))
        }
    }
    .wrap_err("Failed to initialise the simulation")?;

    info!("World initialised\n");

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let nav_ctrl = NavCtrl::init("nav_ctrl.toml").wrap_err("Failed to initialise NavCtrl")?;
    info!("NavCtrl init complete");

    let mut seeker = match Seeker::init(
        &mut sim,
        &exec_params,
        &target_sel_params,
        &obs_class_params,
        nav_ctrl,
    ) {
        Ok(s) => s,
        Err(SeekerError::TargetSelError(e)) => {
            error!("FATAL: could not select a target: {}", e);
            std::process::exit(TARGET_SEL_FAILED_EXIT_CODE);
        }
        Err(e) => return Err(e).wrap_err("Failed to initialise the Seeker"),
    };

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    let summary = seeker.run(&mut sim);

    match summary.target_reached_tick {
        Some(t) => info!(
            "Target {} reached on tick {} ({:.2} s)",
            seeker.target().name,
            t,
            t as f64 * util::time::millis_to_seconds(seeker.tick_period_ms())
        ),
        None => info!("Target {} was not reached", seeker.target().name),
    }

    info!("End of execution after {} ticks", summary.num_ticks);

    Ok(())
}
