use std::time::Instant;

use crate::simulation::fields::{ProfileField, Profiles};
use crate::simulation::integrator::advance_ensemble;
use crate::simulation::kernels::{DensitySource, KernelSet};
use crate::simulation::params::PhysicalConstants;
use crate::simulation::states::{Ensemble, Particle, Plastic};

/// Helper to build an ensemble of size `n` spread over depth and size
pub fn make_ensemble(n: usize) -> Ensemble {
    let particles = (0..n)
        .map(|i| {
            let i_f = i as f64;
            // deterministic spread, no rand needed
            let plastic = Plastic {
                r_pl: 10f64.powf(-6.0 + 4.0 * (i_f * 0.37).sin().abs()),
                rho_pl: 900.0 + 400.0 * (i_f * 0.13).cos().abs(),
            };
            let depth = 1.0 + 500.0 * (i_f * 0.07).sin().abs();
            Particle::release(i, (i_f * 0.11) % 360.0 - 180.0, 30.0, depth, plastic)
        })
        .collect();
    Ensemble { particles, t: 0.0 }
}

/// Time one ensemble step, sequential vs rayon, for growing N
pub fn bench_ensemble_step() {
    let ns = [1_000, 10_000, 100_000, 1_000_000];
    let steps = 5;

    let dt = 60.0;
    let fields = ProfileField::new(Profiles::default(), None);
    let kernels = KernelSet::biofouling(PhysicalConstants::reference(), DensitySource::Teos10);

    println!("N,sequential_ms,parallel_ms,threads");

    for n in ns {
        let mut seq = make_ensemble(n);
        let mut par = seq.clone();

        // Warm-up
        advance_ensemble(&mut seq, &kernels, &fields, dt, false);
        advance_ensemble(&mut par, &kernels, &fields, dt, true);

        let t0 = Instant::now();
        for _ in 0..steps {
            advance_ensemble(&mut seq, &kernels, &fields, dt, false);
        }
        let seq_ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        let t1 = Instant::now();
        for _ in 0..steps {
            advance_ensemble(&mut par, &kernels, &fields, dt, true);
        }
        let par_ms = t1.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.3},{:.3},{}", n, seq_ms, par_ms, rayon::current_num_threads());
    }
}
