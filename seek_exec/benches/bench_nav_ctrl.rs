//! # Navigation Control Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::mock::StepRng;

use seek_lib::{
    nav_ctrl::{NavCtrl, NavCtrlParams, NavInput},
    obs_class::{ObsClassParams, ObstacleFlags},
    sim::{BodyParams, KinematicSim, WorldParams},
};
use sim_if::Robot;

fn nav_ctrl_benchmark(c: &mut Criterion) {
    // ---- Build the controller inputs ----

    let obs_class_params = ObsClassParams::default();

    let mut prox = [0.0; 8];
    prox[0] = 90.0;
    prox[6] = 70.0;

    let input = NavInput {
        time_s: 1.0,
        dist_m: 0.8,
        head_err_rad: 0.4,
        flags: ObstacleFlags::classify(&prox, &obs_class_params),
        prox,
    };

    let clear = NavInput {
        flags: ObstacleFlags::default(),
        prox: [0.0; 8],
        ..input
    };

    // Bench classification
    c.bench_function("ObstacleFlags::classify", |b| {
        b.iter(|| ObstacleFlags::classify(black_box(&prox), &obs_class_params))
    });

    // Bench one tick of the controller while navigating
    let mut nav_ctrl = NavCtrl::with_rng(NavCtrlParams::default(), StepRng::new(0, 0));
    c.bench_function("NavCtrl::step::navigating", |b| {
        b.iter(|| nav_ctrl.step(black_box(&clear)))
    });

    // Bench one tick while deflecting, the obstacle ahead never clears
    let mut nav_ctrl = NavCtrl::with_rng(NavCtrlParams::default(), StepRng::new(0, 0));
    nav_ctrl.step(&input);
    c.bench_function("NavCtrl::step::deflecting", |b| {
        b.iter(|| nav_ctrl.step(black_box(&input)))
    });

    // Bench one step of the kinematic simulation with a few boxes in view
    let mut world = WorldParams::default();
    for i in 0..16 {
        world.bodies.push(BodyParams {
            name: format!("CAIXA{:02}", i + 1),
            position_m: [0.2 + 0.1 * i as f64, -0.4 + 0.05 * i as f64, 0.0],
            mass: None,
            size: Some([0.05, 0.05, 0.05]),
        });
    }
    let mut sim = KinematicSim::with_rng(world, StepRng::new(0, 0)).unwrap();
    for i in 0..8 {
        sim.proximity_channel(&format!("ps{}", i), 32);
    }
    c.bench_function("KinematicSim::step", |b| b.iter(|| sim.step(black_box(32))));
}

criterion_group!(benches, nav_ctrl_benchmark);
criterion_main!(benches);
