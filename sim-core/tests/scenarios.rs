use approx::{assert_abs_diff_eq, assert_relative_eq};
use glam::DVec2;
use rand::{SeedableRng, rngs::StdRng};
use sim_core::{
    body::{Body, MASS_UNIT, radius_for_mass},
    config::Config,
    force::GRAVITATIONAL_CONSTANT,
    state::{Placement, SimulationState},
    types::Bounds,
};

fn random_state(seed: u64, count: u32, cfg: Config) -> SimulationState {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut s = SimulationState::new(&cfg);
    s.initialize(count, cfg.base_mass, Placement::Random, &mut rng)
        .unwrap();
    s
}

#[test]
fn two_bodies_accelerate_towards_each_other_along_x() {
    let heavy = Body::new(0, 50.0 * MASS_UNIT, DVec2::new(100.0, 100.0), [255; 3]);
    let light = Body::new(1, 30.0 * MASS_UNIT, DVec2::new(200.0, 100.0), [255; 3]);
    let cfg = Config {
        gravitational_constant: GRAVITATIONAL_CONSTANT,
        border_enabled: false,
        ..Config::default()
    };
    let mut s = SimulationState::from_bodies(&cfg, vec![heavy, light]);

    let report = s.step();

    assert!(report.merges.is_empty());
    let [h, l] = s.bodies() else {
        panic!("expected two bodies, got {}", s.bodies().len());
    };

    let dh = h.position - DVec2::new(100.0, 100.0);
    let dl = l.position - DVec2::new(200.0, 100.0);

    // Heavy body moves right, light body moves left.
    assert!(dh.x > 0.0);
    assert!(dl.x < 0.0);
    assert_abs_diff_eq!(dh.y, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(dl.y, 0.0, epsilon = 1e-12);
    assert!(dh.length() < dl.length());

    // F = G m1 m2 / d^2, displacement after one tick equals F / m.
    let f = GRAVITATIONAL_CONSTANT * 50.0 * 30.0 * MASS_UNIT * MASS_UNIT / 100.0_f64.powi(2);
    assert_relative_eq!(dh.x, f / (50.0 * MASS_UNIT), max_relative = 1e-9);
    assert_relative_eq!(-dl.x, f / (30.0 * MASS_UNIT), max_relative = 1e-9);
}

#[test]
fn lone_body_at_rest_never_moves() {
    let body = Body::new(0, 50.0 * MASS_UNIT, DVec2::new(640.0, 360.0), [0; 3]);
    let cfg = Config {
        border_enabled: true,
        ..Config::default()
    };
    let mut s = SimulationState::from_bodies(&cfg, vec![body]);

    for _ in 0..100 {
        let report = s.step();
        assert!(report.merges.is_empty());
    }

    assert_eq!(s.bodies().len(), 1);
    assert_eq!(s.bodies()[0].position, DVec2::new(640.0, 360.0));
    assert_eq!(s.bodies()[0].velocity, DVec2::ZERO);
}

#[test]
fn total_mass_is_invariant_across_merges() {
    let cfg = Config {
        border_enabled: true,
        ..Config::default()
    };
    let mut s = random_state(11, 40, cfg);
    let initial = s.total_mass();
    let mut merges = 0;

    for _ in 0..500 {
        merges += s.step().merges.len();
        assert_relative_eq!(s.total_mass(), initial, max_relative = 1e-12);
    }

    assert_eq!(s.bodies().len(), 40 - merges);
}

#[test]
fn radius_always_matches_mass() {
    let mut s = random_state(12, 30, Config::default());

    for _ in 0..300 {
        s.step();
        for b in s.live_bodies() {
            assert_eq!(b.radius(), radius_for_mass(b.mass()));
        }
    }
}

#[test]
fn merged_bodies_never_survive_a_tick() {
    let mut s = random_state(13, 30, Config::default());

    for _ in 0..300 {
        s.step();
        assert!(s.bodies().iter().all(|b| !b.is_merged()));
    }
}

#[test]
fn runs_are_bit_identical() {
    let cfg = Config {
        border_enabled: true,
        speed_multiplier: 3,
        ..Config::default()
    };
    let mut a = random_state(14, 25, cfg);
    let mut b = random_state(14, 25, cfg);

    for i in 0..200 {
        if i == 100 {
            a.toggle_gravity_sign();
            b.toggle_gravity_sign();
        }
        let ra = a.step();
        let rb = b.step();
        assert_eq!(ra, rb);
    }

    assert_eq!(a.bodies(), b.bodies());
}

#[test]
fn border_keeps_bodies_inside_and_flips_velocity_once() {
    let bounds = Bounds::new(200.0, 100.0);
    let cfg = Config {
        bounds,
        border_enabled: true,
        ..Config::default()
    };
    let body =
        Body::new(0, MASS_UNIT, DVec2::new(190.0, 50.0), [0; 3]).with_velocity(DVec2::new(4.0, 0.0));
    let mut s = SimulationState::from_bodies(&cfg, vec![body]);

    let mut flips = 0;
    let mut last_vx = 4.0;
    for _ in 0..20 {
        s.step();
        let b = &s.bodies()[0];
        assert!(b.position.x + b.radius() <= bounds.width);
        assert!(b.position.x - b.radius() >= 0.0);
        if b.velocity.x.signum() != f64::signum(last_vx) {
            flips += 1;
        }
        last_vx = b.velocity.x;
    }

    assert_eq!(flips, 1);
    assert_eq!(last_vx, -4.0);
}

#[test]
fn head_on_collision_conserves_momentum() {
    let a = Body::new(0, 5.0 * MASS_UNIT, DVec2::new(100.0, 100.0), [0; 3])
        .with_velocity(DVec2::new(1.0, 0.5));
    let b = Body::new(1, 2.0 * MASS_UNIT, DVec2::new(102.0, 100.0), [0; 3])
        .with_velocity(DVec2::new(-3.0, 0.0));
    let p_before = a.momentum() + b.momentum();
    let cfg = Config {
        gravitational_constant: 0.0,
        ..Config::default()
    };
    let mut s = SimulationState::from_bodies(&cfg, vec![a, b]);

    let report = s.step();

    assert_eq!(report.merges.len(), 1);
    assert_eq!(report.removed, 1);
    let survivor = &s.bodies()[0];
    assert_eq!(survivor.id(), 0);
    assert_eq!(survivor.mass(), 7.0 * MASS_UNIT);
    assert_relative_eq!(survivor.momentum().x, p_before.x, max_relative = 1e-12);
    assert_relative_eq!(survivor.momentum().y, p_before.y, max_relative = 1e-12);
}

#[test]
fn saved_layout_replays_identically() {
    let mut original = random_state(15, 10, Config::default());
    let preset = original.to_preset();

    let mut replay = SimulationState::new(&Config::default());
    let mut rng = StdRng::seed_from_u64(99);
    replay.load_preset(&preset, &mut rng).unwrap();

    for _ in 0..50 {
        original.step();
        replay.step();
    }

    let pos_a: Vec<DVec2> = original.bodies().iter().map(|b| b.position).collect();
    let pos_b: Vec<DVec2> = replay.bodies().iter().map(|b| b.position).collect();
    assert_eq!(pos_a, pos_b);
}
