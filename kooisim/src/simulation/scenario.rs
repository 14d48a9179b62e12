//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime `Scenario`
//! containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - the released particle ensemble at t = 0
//! - the kernel chain (`KernelSet`)
//! - the field sampler the particles read their environment from
//!
//! `Scenario::run` then steps the ensemble to the end time and hands every
//! output frame to a recorder callback.

use anyhow::Result;

use crate::configuration::config::{FieldConfig, ProfileConfig, ScenarioConfig, UniformConfig};
use crate::error::ConfigError;
use crate::simulation::engine::Engine;
use crate::simulation::fields::{FieldSampler, ProfileField, Profiles, UniformField};
use crate::simulation::integrator::advance_ensemble;
use crate::simulation::kernels::KernelSet;
use crate::simulation::params::{Parameters, SECONDS_PER_DAY};
use crate::simulation::states::{Ensemble, FieldSample, Particle, Plastic};

/// A runnable biofouling scenario
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub ensemble: Ensemble,
    pub kernels: KernelSet,
    pub fields: Box<dyn FieldSampler>,
}

/// Totals of a finished run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    pub frames: usize,
    pub deleted: usize,
    pub remaining: usize,
}

fn uniform_sample(v: &UniformConfig) -> FieldSample {
    FieldSample {
        temp: v.temp,
        abs_salinity: v.abs_salinity,
        density: v.density,
        nd_phy: v.nd_phy,
        d_phy: v.d_phy,
        tpp3: v.tpp3,
        w_adv: v.w_adv,
    }
}

fn profiles(cfg: &ProfileConfig) -> Profiles {
    let d = Profiles::default();
    Profiles {
        temp_surface: cfg.temp_surface.unwrap_or(d.temp_surface),
        temp_deep: cfg.temp_deep.unwrap_or(d.temp_deep),
        temp_scale: cfg.temp_scale.unwrap_or(d.temp_scale),
        salinity_surface: cfg.salinity_surface.unwrap_or(d.salinity_surface),
        salinity_deep: cfg.salinity_deep.unwrap_or(d.salinity_deep),
        salinity_scale: cfg.salinity_scale.unwrap_or(d.salinity_scale),
        mixed_layer_depth: cfg.mixed_layer_depth.unwrap_or(d.mixed_layer_depth),
        nd_phy_surface: cfg.nd_phy_surface.unwrap_or(d.nd_phy_surface),
        d_phy_surface: cfg.d_phy_surface.unwrap_or(d.d_phy_surface),
        phy_scale: cfg.phy_scale.unwrap_or(d.phy_scale),
        tpp3_surface: cfg.tpp3_surface.unwrap_or(d.tpp3_surface),
        tpp3_scale: cfg.tpp3_scale.unwrap_or(d.tpp3_scale),
        w_adv: cfg.w_adv.unwrap_or(d.w_adv),
    }
}

fn build_fields(cfg: &FieldConfig) -> Box<dyn FieldSampler> {
    match cfg {
        FieldConfig::Uniform { region, values } => Box::new(UniformField {
            sample: uniform_sample(values),
            bounds: region.map(|r| r.bounds()),
        }),
        FieldConfig::Profile { region, profiles: p } => {
            Box::new(ProfileField::new(profiles(p), region.map(|r| r.bounds())))
        }
    }
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;

        // Particles: every plastic type on every grid point, ids in release order
        let positions = cfg.release.grid()?.positions();
        let particles: Vec<Particle> = cfg
            .release
            .plastics()
            .iter()
            .flat_map(|pc| positions.iter().map(move |&(lon, lat)| (lon, lat, *pc)))
            .enumerate()
            .map(|(id, (lon, lat, pc))| {
                let plastic = Plastic { r_pl: pc.r_pl, rho_pl: pc.rho_pl };
                Particle::release(id, lon, lat, cfg.release.depth, plastic)
            })
            .collect();

        let e_cfg = &cfg.engine;
        let parameters = Parameters {
            t_end: e_cfg.runtime_days * SECONDS_PER_DAY,
            dt: e_cfg.dt,
            output_dt: e_cfg.output_interval_hours * 3600.0,
        };

        let engine = Engine {
            parallel: e_cfg.parallel,
            density: e_cfg.density.into(),
        };

        let kernels = KernelSet::biofouling(cfg.constants.resolve(), engine.density);

        Ok(Self {
            engine,
            parameters,
            ensemble: Ensemble { particles, t: 0.0 },
            kernels,
            fields: build_fields(&cfg.fields),
        })
    }

    /// Step to exactly `t_end`, calling `record` at t = 0 and after every output interval
    pub fn run<F>(&mut self, mut record: F) -> Result<RunSummary>
    where
        F: FnMut(&Ensemble) -> Result<()>,
    {
        let n_steps = self.parameters.n_steps();
        let output_dt = self.parameters.output_dt;
        let eps = 1e-9 * self.parameters.dt;

        log::info!(
            "running {} particles for {} steps of {} s (kernels: {})",
            self.ensemble.particles.len(),
            n_steps,
            self.parameters.dt,
            self.kernels.names().join(" + ")
        );

        let mut summary = RunSummary::default();
        record(&self.ensemble)?;
        summary.frames += 1;
        let mut next_output = output_dt;

        for _ in 0..n_steps {
            let dt = self.parameters.step_at(self.ensemble.t);
            let report = advance_ensemble(
                &mut self.ensemble,
                &self.kernels,
                self.fields.as_ref(),
                dt,
                self.engine.parallel,
            );
            summary.steps += 1;
            summary.deleted += report.deleted.len();

            if self.ensemble.t + eps >= next_output {
                log::debug!("output frame at t = {} s, {} particles", self.ensemble.t, report.advanced);
                record(&self.ensemble)?;
                summary.frames += 1;
                next_output += output_dt;
            }

            if self.ensemble.particles.is_empty() {
                log::info!("no particles left at t = {} s", self.ensemble.t);
                break;
            }
        }

        summary.remaining = self.ensemble.particles.len();
        log::info!(
            "finished: {} steps, {} frames, {} deleted, {} remaining",
            summary.steps, summary.frames, summary.deleted, summary.remaining
        );
        Ok(summary)
    }
}
