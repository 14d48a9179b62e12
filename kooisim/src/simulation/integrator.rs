//! Fixed-step driver for the particle ensemble
//!
//! Every particle is independent within a step, so the kernel chain runs
//! either sequentially or on the rayon pool with no synchronisation. Particles
//! whose chain failed are deleted once the whole ensemble has been advanced.

use rayon::prelude::*;

use crate::error::KernelError;

use super::fields::FieldSampler;
use super::kernels::KernelSet;
use super::states::Ensemble;

/// A particle removed from the ensemble and why
#[derive(Debug, Clone, PartialEq)]
pub struct Deletion {
    pub id: usize,
    pub lon: f64,
    pub lat: f64,
    pub depth: f64,
    pub reason: KernelError,
}

/// Outcome of one ensemble step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub advanced: usize, // particles still alive after the step
    pub deleted: Vec<Deletion>,
}

/// Advance the ensemble by one step of `dt` seconds
/// Applies `kernels` to every particle at time `ens.t`, removes the failed
/// ones and advances `ens.t`
pub fn advance_ensemble(
    ens: &mut Ensemble,
    kernels: &KernelSet,
    fields: &dyn FieldSampler,
    dt: f64,
    parallel: bool,
) -> StepReport {
    let t = ens.t;

    let outcomes: Vec<Result<(), KernelError>> = if parallel {
        ens.particles.par_iter_mut().map(|p| kernels.apply(t, p, fields, dt)).collect()
    } else {
        ens.particles.iter_mut().map(|p| kernels.apply(t, p, fields, dt)).collect()
    };

    let mut report = StepReport::default();
    let mut alive = Vec::with_capacity(ens.particles.len());

    for (p, outcome) in ens.particles.drain(..).zip(outcomes) {
        match outcome {
            Ok(()) => alive.push(p),
            Err(reason) => {
                log::warn!(
                    "particle {} is deleted at lon = {}, lat = {}, depth = {}: {}",
                    p.id, p.lon(), p.lat(), p.state.z, reason
                );
                report.deleted.push(Deletion {
                    id: p.id,
                    lon: p.lon(),
                    lat: p.lat(),
                    depth: p.state.z,
                    reason,
                });
            }
        }
    }

    ens.particles = alive;
    ens.t += dt;
    report.advanced = ens.particles.len();
    report
}
