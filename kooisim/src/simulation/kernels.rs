//! Per-particle kernels for the ensemble driver
//!
//! A step applies an ordered [`KernelSet`] to every particle:
//! field sampling (with optional TEOS-10 density), biofouling, and the
//! periodic longitude boundary. A kernel that fails marks its particle for
//! deletion; the kernels after it are skipped.

use crate::error::KernelError;

use super::biofouling::BiofoulingIntegrator;
use super::density::poly_teos10_bsq;
use super::environment::EnvironmentProfiler;
use super::fields::FieldSampler;
use super::params::PhysicalConstants;
use super::states::Particle;

/// Ordered collection of kernels applied to one particle at a time
pub struct KernelSet {
    kernels: Vec<Box<dyn Kernel>>,
}

impl Default for KernelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl KernelSet {
    /// Create an empty kernel set
    pub fn new() -> Self {
        Self { kernels: Vec::new() }
    }

    /// Append a kernel
    pub fn with<K>(mut self, kernel: K) -> Self
    where
        K: Kernel + 'static,
    {
        self.kernels.push(Box::new(kernel));
        self
    }

    /// The standard chain: sample, biofoul, wrap longitude
    pub fn biofouling(constants: PhysicalConstants, density: DensitySource) -> Self {
        Self::new()
            .with(SampleProfiles { density })
            .with(Biofouling { integrator: BiofoulingIntegrator::new(constants) })
            .with(PeriodicBoundary)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.kernels.iter().map(|k| k.name()).collect()
    }

    /// Run every kernel in order on `p`, stopping at the first failure
    pub fn apply(&self, t: f64, p: &mut Particle, fields: &dyn FieldSampler, dt: f64) -> Result<(), KernelError> {
        for kernel in &self.kernels {
            kernel.apply(t, p, fields, dt)?;
        }
        Ok(())
    }
}

/// A per-particle operation run once per step
pub trait Kernel: Send + Sync {
    fn name(&self) -> &'static str;
    fn apply(&self, t: f64, p: &mut Particle, fields: &dyn FieldSampler, dt: f64) -> Result<(), KernelError>;
}

/// Where seawater density comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DensitySource {
    #[default]
    Sampled, // take the sampler's value
    Teos10, // recompute from sampled salinity, temperature and depth
}

/// Sample the fields at the particle and derive viscosities
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleProfiles {
    pub density: DensitySource,
}

impl Kernel for SampleProfiles {
    fn name(&self) -> &'static str {
        "profiles"
    }

    fn apply(&self, t: f64, p: &mut Particle, fields: &dyn FieldSampler, _dt: f64) -> Result<(), KernelError> {
        let depth = p.state.z;
        let mut sample = fields.sample(t, p.lon(), p.lat(), depth)?;
        if self.density == DensitySource::Teos10 {
            sample.density = poly_teos10_bsq(sample.abs_salinity, sample.temp, depth);
        }
        p.env = Some(EnvironmentProfiler.profile(&sample));
        Ok(())
    }
}

/// Attached algae, settling velocity and depth
#[derive(Debug, Clone, Default)]
pub struct Biofouling {
    pub integrator: BiofoulingIntegrator,
}

impl Kernel for Biofouling {
    fn name(&self) -> &'static str {
        "biofouling"
    }

    fn apply(&self, _t: f64, p: &mut Particle, _fields: &dyn FieldSampler, dt: f64) -> Result<(), KernelError> {
        let env = p.env.ok_or(KernelError::MissingEnvironment { id: p.id, kernel: "biofouling" })?;
        let out = self.integrator.step(&p.plastic, p.state, &env, dt);
        p.state = out.state;
        p.diag = out.diag;
        Ok(())
    }
}

/// Keep longitude inside (-180, 180)
#[derive(Debug, Clone, Copy, Default)]
pub struct PeriodicBoundary;

impl Kernel for PeriodicBoundary {
    fn name(&self) -> &'static str {
        "periodic"
    }

    fn apply(&self, _t: f64, p: &mut Particle, _fields: &dyn FieldSampler, _dt: f64) -> Result<(), KernelError> {
        if p.x.x <= -180.0 {
            p.x.x += 360.0;
        } else if p.x.x >= 180.0 {
            p.x.x -= 360.0;
        }
        Ok(())
    }
}
