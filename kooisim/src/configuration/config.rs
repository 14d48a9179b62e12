//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! biofouling scenario. A scenario consists of:
//!
//! - [`EngineConfig`]    – time stepping, output interval, threading, density source
//! - [`ConstantsConfig`] – optional overrides of the physical constants
//! - [`FieldConfig`]     – the environment the particles are sampled in
//! - [`ReleaseConfig`]   – where, how deep and which plastics are released
//! - [`OutputConfig`]    – where trajectories are written
//!
//! # YAML format
//! An example scenario matching these types:
//!
//! ```yaml
//! engine:
//!   dt: 60.0                    # step [s]
//!   runtime_days: 170.0
//!   output_interval_hours: 12.0
//!   parallel: true
//!   density: "teos10"           # or "sampled"
//!
//! constants:
//!   q10: 2.0                    # any constant may be overridden
//!
//! fields:
//!   kind: "profile"             # or "uniform"
//!   region: "NPSG"              # optional domain box
//!   temp_surface: 24.0
//!
//! release:
//!   region: "NPSG"              # or explicit lat: [min, max, n] / lon: [min, max, n]
//!   depth: 0.6
//!   plastics:
//!     - { r_pl: 1.0e-4, rho_pl: 920.0 }
//!
//! output:
//!   path: "exports/npsg.csv"
//! ```
//!
//! The scenario builder then maps this configuration into its runtime
//! representation after [`ScenarioConfig::validate`] has accepted it.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::simulation::kernels::DensitySource;
use crate::simulation::params::{PhysicalConstants, FLOOR_DEPTH, SURFACE_DEPTH};
use crate::simulation::region::{Axis, Region, ReleaseGrid};

/// Seawater density source
/// `density: "sampled"` or `density: "teos10"`
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DensityConfig {
    #[default]
    #[serde(rename = "sampled")] // use the density the field sampler returns
    Sampled,

    #[serde(rename = "teos10")] // polyTEOS10-bsq from sampled salinity and temperature
    Teos10,
}

impl From<DensityConfig> for DensitySource {
    fn from(cfg: DensityConfig) -> Self {
        match cfg {
            DensityConfig::Sampled => DensitySource::Sampled,
            DensityConfig::Teos10 => DensitySource::Teos10,
        }
    }
}

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub dt: f64, // step size [s]
    pub runtime_days: f64, // simulated time [d]
    pub output_interval_hours: f64, // recording interval [h]
    #[serde(default)]
    pub parallel: bool, // advance particles on the rayon pool
    #[serde(default)]
    pub density: DensityConfig,
}

/// Optional overrides of [`PhysicalConstants`], all in SI units
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ConstantsConfig {
    pub g: Option<f64>,
    pub k: Option<f64>,
    pub rho_bf: Option<f64>,
    pub v_a: Option<f64>,
    pub m_a: Option<f64>,
    pub r20: Option<f64>,
    pub q10: Option<f64>,
    pub gamma: Option<f64>,
    pub wt_n: Option<f64>,
    pub med_n2cell: Option<f64>,
}

impl ConstantsConfig {
    /// Reference constants with the given overrides applied
    pub fn resolve(&self) -> PhysicalConstants {
        let r = PhysicalConstants::reference();
        PhysicalConstants {
            g: self.g.unwrap_or(r.g),
            k: self.k.unwrap_or(r.k),
            rho_bf: self.rho_bf.unwrap_or(r.rho_bf),
            v_a: self.v_a.unwrap_or(r.v_a),
            m_a: self.m_a.unwrap_or(r.m_a),
            r20: self.r20.unwrap_or(r.r20),
            q10: self.q10.unwrap_or(r.q10),
            gamma: self.gamma.unwrap_or(r.gamma),
            wt_n: self.wt_n.unwrap_or(r.wt_n),
            med_n2cell: self.med_n2cell.unwrap_or(r.med_n2cell),
        }
    }
}

/// Constant environment values
#[derive(Deserialize, Debug, Clone)]
pub struct UniformConfig {
    pub temp: f64, // [degC]
    pub abs_salinity: f64, // [g kg-1]
    pub density: f64, // [kg m-3]
    pub nd_phy: f64, // [mmol N m-3]
    pub d_phy: f64, // [mmol N m-3]
    pub tpp3: f64, // [mmol N m-3 d-1]
    #[serde(default)]
    pub w_adv: f64, // [m s-1]
}

/// Analytic depth profiles, every omitted value takes the subtropical default
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ProfileConfig {
    pub temp_surface: Option<f64>,
    pub temp_deep: Option<f64>,
    pub temp_scale: Option<f64>,
    pub salinity_surface: Option<f64>,
    pub salinity_deep: Option<f64>,
    pub salinity_scale: Option<f64>,
    pub mixed_layer_depth: Option<f64>,
    pub nd_phy_surface: Option<f64>,
    pub d_phy_surface: Option<f64>,
    pub phy_scale: Option<f64>,
    pub tpp3_surface: Option<f64>,
    pub tpp3_scale: Option<f64>,
    pub w_adv: Option<f64>,
}

/// Which field sampler to build
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind")]
pub enum FieldConfig {
    #[serde(rename = "uniform")]
    Uniform {
        region: Option<Region>,
        #[serde(flatten)]
        values: UniformConfig,
    },

    #[serde(rename = "profile")]
    Profile {
        region: Option<Region>,
        #[serde(flatten)]
        profiles: ProfileConfig,
    },
}

/// One plastic type released on every grid point
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PlasticConfig {
    pub r_pl: f64, // radius [m]
    pub rho_pl: f64, // density [kg m-3]
}

/// Reference plastic matrix: three densities by five radii
pub fn reference_plastics() -> Vec<PlasticConfig> {
    let mut plastics = Vec::with_capacity(15);
    for rho_pl in [920.0, 840.0, 30.0] {
        for r_pl in [1e-2, 1e-3, 1e-4, 1e-5, 1e-6] {
            plastics.push(PlasticConfig { r_pl, rho_pl });
        }
    }
    plastics
}

fn default_release_depth() -> f64 {
    SURFACE_DEPTH
}

/// Release configuration: a region preset or explicit axes `[start, end, n]`
#[derive(Deserialize, Debug, Clone)]
pub struct ReleaseConfig {
    pub region: Option<Region>,
    pub lat: Option<(f64, f64, usize)>,
    pub lon: Option<(f64, f64, usize)>,
    #[serde(default = "default_release_depth")]
    pub depth: f64,
    pub plastics: Option<Vec<PlasticConfig>>,
}

impl ReleaseConfig {
    /// Explicit axes win over the region preset
    pub fn grid(&self) -> Result<ReleaseGrid, ConfigError> {
        match (self.lat, self.lon, self.region) {
            (Some(lat), Some(lon), _) => Ok(ReleaseGrid {
                lat: Axis::new(lat.0, lat.1, lat.2),
                lon: Axis::new(lon.0, lon.1, lon.2),
            }),
            (_, _, Some(region)) => region
                .release_grid()
                .ok_or_else(|| ConfigError::NoReleaseGrid(region.name().to_string())),
            _ => Err(ConfigError::MissingReleaseGrid),
        }
    }

    pub fn plastics(&self) -> Vec<PlasticConfig> {
        self.plastics.clone().unwrap_or_else(reference_plastics)
    }
}

/// Trajectory output
#[derive(Deserialize, Debug, Clone)]
pub struct OutputConfig {
    pub path: String,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    #[serde(default)]
    pub constants: ConstantsConfig,
    pub fields: FieldConfig,
    pub release: ReleaseConfig,
    pub output: Option<OutputConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    /// Reject configurations the engine cannot run
    pub fn validate(&self) -> Result<(), ConfigError> {
        let e = &self.engine;
        for (field, value) in [
            ("dt", e.dt),
            ("runtime_days", e.runtime_days),
            ("output_interval_hours", e.output_interval_hours),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let depth = self.release.depth;
        if !(SURFACE_DEPTH..=FLOOR_DEPTH).contains(&depth) {
            return Err(ConfigError::ReleaseDepth(depth));
        }

        let grid = self.release.grid()?;
        if grid.lat.n == 0 {
            return Err(ConfigError::EmptyGrid { axis: "lat" });
        }
        if grid.lon.n == 0 {
            return Err(ConfigError::EmptyGrid { axis: "lon" });
        }

        let plastics = self.release.plastics();
        if plastics.is_empty() {
            return Err(ConfigError::NoPlastics);
        }
        for (index, p) in plastics.iter().enumerate() {
            if !(p.r_pl > 0.0) {
                return Err(ConfigError::InvalidPlastic { index, field: "r_pl", value: p.r_pl });
            }
            if !(p.rho_pl > 0.0) {
                return Err(ConfigError::InvalidPlastic { index, field: "rho_pl", value: p.rho_pl });
            }
        }

        Ok(())
    }
}
