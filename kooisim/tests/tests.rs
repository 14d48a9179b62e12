use approx::assert_relative_eq;

use kooisim::simulation::biofouling::{integrate_depth, settling_velocity, BiofoulingIntegrator, DepthRegime};
use kooisim::simulation::environment::EnvironmentProfiler;
use kooisim::simulation::params::{PhysicalConstants, FLOOR_DEPTH, SURFACE_DEPTH};
use kooisim::simulation::scenario::Scenario;
use kooisim::simulation::states::{Environment, FieldSample, ParticleState, Plastic};
use kooisim::{ScenarioConfig, TrajectoryWriter};

/// Seawater at 15 degC, 1025 kg m-3, with the given phytoplankton and productivity
pub fn seawater(nd_phy: f64, d_phy: f64, tpp3: f64) -> Environment {
    EnvironmentProfiler.profile(&FieldSample {
        temp: 15.0,
        abs_salinity: 35.0,
        density: 1025.0,
        nd_phy,
        d_phy,
        tpp3,
        w_adv: 0.0,
    })
}

/// Integrator with reference constants
pub fn integrator() -> BiofoulingIntegrator {
    BiofoulingIntegrator::new(PhysicalConstants::reference())
}

/// Clean particle at the release depth
pub fn released() -> ParticleState {
    ParticleState::released_at(SURFACE_DEPTH)
}

/// Scenario YAML on a uniform field with an explicit release grid
pub fn uniform_yaml(runtime_days: f64, output_hours: f64, parallel: bool) -> String {
    format!(
        r#"
engine:
  dt: 60.0
  runtime_days: {runtime_days}
  output_interval_hours: {output_hours}
  parallel: {parallel}
fields:
  kind: "uniform"
  temp: 15.0
  abs_salinity: 35.0
  density: 1025.0
  nd_phy: 0.1
  d_phy: 0.05
  tpp3: 0.05
release:
  lat: [30.0, 31.0, 2]
  lon: [-140.0, -139.0, 2]
  plastics:
    - {{ r_pl: 1.0e-4, rho_pl: 920.0 }}
    - {{ r_pl: 1.0e-4, rho_pl: 2200.0 }}
"#
    )
}

// ==================================================================================
// Single particle steps
// ==================================================================================

#[test]
fn buoyant_particle_without_algae_stays_at_surface() {
    let plastic = Plastic { r_pl: 1e-4, rho_pl: 920.0 };
    let res = integrator().step(&plastic, released(), &seawater(0.0, 0.0, 0.0), 60.0);

    assert_eq!(res.state.a, 0.0);
    assert_eq!(res.diag.a_coll, 0.0);
    assert_eq!(res.diag.a_growth, 0.0);
    assert!(res.diag.delta_rho < 0.0);
    assert!(res.diag.vs_init < 0.0);

    // Rising from the release depth always leaves the band
    assert_eq!(res.regime, DepthRegime::OutOfBounds);
    assert_eq!(res.state.z, SURFACE_DEPTH);
    assert_eq!(res.state.vs, 0.0);
}

#[test]
fn dense_particle_sinks_by_vs_dt() {
    let plastic = Plastic { r_pl: 1e-4, rho_pl: 2200.0 };
    let res = integrator().step(&plastic, released(), &seawater(0.0, 0.0, 0.0), 60.0);

    assert!(res.diag.delta_rho > 0.0);
    assert!(res.state.vs > 0.0);
    assert_eq!(res.regime, DepthRegime::InBounds);
    assert_eq!(res.state.vs, res.diag.vs_init);
    assert_relative_eq!(res.state.z, SURFACE_DEPTH + res.state.vs * 60.0, max_relative = 1e-12);
}

#[test]
fn productivity_without_algae_gives_zero_growth() {
    let bf = integrator();
    let env = seawater(0.0, 0.0, 0.5);

    let algae = bf.ambient_algae(&env);
    assert_eq!(algae.aa, 0.0);
    assert_eq!(algae.mu_aa, 0.0);

    let state = ParticleState { a: 1e8, z: 50.0, vs: 1e-4 };
    let res = bf.step(&Plastic { r_pl: 1e-4, rho_pl: 920.0 }, state, &env, 60.0);
    assert_eq!(res.diag.a_growth, 0.0);
    assert!(res.state.a.is_finite());
    assert!(res.state.z.is_finite());
    assert!(res.state.a < state.a, "mortality and respiration must shrink the film");
}

#[test]
fn collision_rate_grows_with_ambient_algae() {
    let bf = integrator();
    let plastic = Plastic { r_pl: 1e-4, rho_pl: 920.0 };
    let state = ParticleState { a: 0.0, z: 10.0, vs: 1e-3 };

    let mut prev = -1.0;
    for phy in [0.01, 0.05, 0.1, 0.5, 1.0] {
        let res = bf.step(&plastic, state, &seawater(phy, phy, 0.0), 60.0);
        assert!(res.diag.a_coll > prev, "a_coll not increasing at phy = {phy}");
        prev = res.diag.a_coll;
    }
}

#[test]
fn neutrally_buoyant_particle_does_not_move() {
    let bf = integrator();
    let plastic = Plastic { r_pl: 1e-4, rho_pl: 1030.0 };
    let state = ParticleState { a: 0.0, z: 100.0, vs: 0.0 };

    let mut env = seawater(0.0, 0.0, 0.0);
    env.rho_sw = bf.geometry(&plastic, state.a).rho_tot;

    let res = bf.step(&plastic, state, &env, 60.0);
    assert_eq!(res.diag.delta_rho, 0.0);
    assert_eq!(res.diag.vs_init, 0.0);
    assert_eq!(res.state.vs, 0.0);
    assert_eq!(res.state.z, 100.0);

    assert_eq!(settling_velocity(9.81, 1e-6, 1.0, 0.0), 0.0);
}

#[test]
fn depth_stays_in_band_for_any_velocity() {
    for i in 0..2000 {
        let f = i as f64;
        let z = SURFACE_DEPTH + (FLOOR_DEPTH - SURFACE_DEPTH) * (f * 0.618).fract();
        let vs = 10f64.powf(-4.0 + 6.0 * (f * 0.311).fract()) * if i % 2 == 0 { 1.0 } else { -1.0 };

        let (z_next, vs_next, regime) = integrate_depth(z, vs, 60.0);
        assert!((SURFACE_DEPTH..=FLOOR_DEPTH).contains(&z_next), "z = {z_next} escaped the band");
        if regime == DepthRegime::OutOfBounds {
            assert_eq!(z_next, SURFACE_DEPTH);
            assert_eq!(vs_next, 0.0);
        }
    }
}

#[test]
fn fouled_particles_stay_in_band_over_many_steps() {
    let bf = integrator();
    let env = seawater(0.2, 0.1, 0.1);

    for (r_pl, rho_pl) in [(1e-2, 920.0), (1e-3, 840.0), (1e-4, 30.0), (1e-5, 1100.0), (1e-3, 2200.0)] {
        let plastic = Plastic { r_pl, rho_pl };
        let mut state = released();
        for _ in 0..1440 {
            state = bf.step(&plastic, state, &env, 60.0).state;
            assert!((SURFACE_DEPTH..=FLOOR_DEPTH).contains(&state.z));
            assert!(state.a.is_finite());
        }
    }
}

#[test]
fn floor_violation_snaps_to_surface() {
    let (z, vs, regime) = integrate_depth(3999.0, 1.0, 60.0);
    assert_eq!(regime, DepthRegime::OutOfBounds);
    assert_eq!(z, SURFACE_DEPTH);
    assert_eq!(vs, 0.0);
}

// ==================================================================================
// Scenario tests
// ==================================================================================

#[test]
fn scenario_releases_every_plastic_on_every_grid_point() {
    let cfg = ScenarioConfig::from_yaml_str(&uniform_yaml(1.0, 12.0, false)).unwrap();
    let sc = Scenario::build_scenario(cfg).unwrap();

    let ps = &sc.ensemble.particles;
    assert_eq!(ps.len(), 2 * 4);
    for (i, p) in ps.iter().enumerate() {
        assert_eq!(p.id, i);
        assert_eq!(p.state.z, SURFACE_DEPTH);
        assert!(p.env.is_none());
    }
    assert_eq!(ps[0].plastic.rho_pl, 920.0);
    assert_eq!(ps[4].plastic.rho_pl, 2200.0);
    assert_eq!((ps[1].lon(), ps[1].lat()), (-139.0, 30.0));

    assert_eq!(sc.parameters.t_end, 86400.0);
    assert_eq!(sc.parameters.output_dt, 43200.0);
    assert_eq!(sc.parameters.n_steps(), 1440);
    assert_eq!(sc.kernels.names(), vec!["profiles", "biofouling", "periodic"]);
}

#[test]
fn run_writes_one_frame_per_output_interval() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("trajectories.csv");

    // 6 h at 1 h output: initial frame plus six
    let cfg = ScenarioConfig::from_yaml_str(&uniform_yaml(0.25, 1.0, true)).unwrap();
    let mut sc = Scenario::build_scenario(cfg).unwrap();

    let mut writer = TrajectoryWriter::create(&path).unwrap();
    let summary = sc.run(|ens| writer.record(ens)).unwrap();
    assert_eq!(writer.rows(), 7 * 8);
    writer.finish().unwrap();

    assert_eq!(summary.steps, 360);
    assert_eq!(summary.frames, 7);
    assert_eq!(summary.deleted, 0);
    assert_eq!(summary.remaining, 8);
    assert_relative_eq!(sc.ensemble.t, 21600.0);

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(&headers[0], "id");
    assert_eq!(&headers[4], "depth");

    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 56);

    // Dense particles end deeper than they started
    let last = &rows[rows.len() - 1];
    let depth: f64 = last[4].parse().unwrap();
    let rho_pl: f64 = last[headers.len() - 1].parse().unwrap();
    assert_eq!(rho_pl, 2200.0);
    assert!(depth > SURFACE_DEPTH);
}

#[test]
fn run_ends_exactly_on_the_runtime() {
    // 864 s is not a whole number of 60 s steps
    let cfg = ScenarioConfig::from_yaml_str(&uniform_yaml(0.01, 1.0, false)).unwrap();
    let mut sc = Scenario::build_scenario(cfg).unwrap();
    let summary = sc.run(|_| Ok(())).unwrap();

    assert_eq!(summary.steps, 15);
    assert_eq!(summary.frames, 1);
    assert_relative_eq!(sc.ensemble.t, 864.0, max_relative = 1e-12);
}

#[test]
fn particles_outside_the_field_domain_are_deleted() {
    let yaml = r#"
engine:
  dt: 60.0
  runtime_days: 1.0
  output_interval_hours: 12.0
fields:
  kind: "profile"
  region: "Med"
release:
  region: "NPSG"
  plastics:
    - { r_pl: 1.0e-3, rho_pl: 920.0 }
"#;
    let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
    let mut sc = Scenario::build_scenario(cfg).unwrap();
    let released = sc.ensemble.particles.len();
    assert!(released > 0);

    let mut frames = Vec::new();
    let summary = sc.run(|ens| {
        frames.push(ens.particles.len());
        Ok(())
    })
    .unwrap();

    assert_eq!(summary.steps, 1);
    assert_eq!(summary.deleted, released);
    assert_eq!(summary.remaining, 0);
    assert_eq!(frames, vec![released]);
}

#[test]
fn sequential_and_parallel_runs_agree() {
    let run = |parallel: bool| {
        let cfg = ScenarioConfig::from_yaml_str(&uniform_yaml(0.1, 1.0, parallel)).unwrap();
        let mut sc = Scenario::build_scenario(cfg).unwrap();
        sc.run(|_| Ok(())).unwrap();
        sc.ensemble
    };

    let seq = run(false);
    let par = run(true);
    assert_eq!(seq.particles.len(), par.particles.len());
    for (a, b) in seq.particles.iter().zip(&par.particles) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.state, b.state);
    }
}
