//! Core state types for the particle ensemble.
//!
//! A [`Particle`] bundles:
//! - `Plastic`       – material constants fixed at release
//! - `ParticleState` – the quantities carried from one step to the next
//! - `Environment`   – the field sample of the current step plus derived viscosities
//! - `Diagnostics`   – per-step outputs recomputed every step
//!
//! The [`Ensemble`] holds the list of live particles and the current
//! simulation time `t`.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// Material constants of the bare plastic particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plastic {
    pub r_pl: f64, // plastic radius [m]
    pub rho_pl: f64, // plastic density [kg m-3]
}

/// The only quantities with cross-step memory
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleState {
    pub a: f64, // attached algae [no. m-2]
    pub z: f64, // depth, positive down [m]
    pub vs: f64, // settling velocity, positive = sinking [m s-1]
}

impl ParticleState {
    /// Clean particle at rest at depth `z`
    pub fn released_at(z: f64) -> Self {
        Self { a: 0.0, z, vs: 0.0 }
    }
}

/// Raw values handed over by a field sampler for one particle and step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSample {
    pub temp: f64, // conservative temperature [degC]
    pub abs_salinity: f64, // absolute salinity [g kg-1]
    pub density: f64, // seawater density [kg m-3]
    pub nd_phy: f64, // non-diatom phytoplankton [mmol N m-3]
    pub d_phy: f64, // diatom phytoplankton [mmol N m-3]
    pub tpp3: f64, // primary productivity [mmol N m-3 d-1]
    pub w_adv: f64, // ambient vertical current [m s-1]
}

/// Field sample plus viscosities, ready for the biofouling step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    pub temp: f64,
    pub rho_sw: f64,
    pub nd_phy: f64,
    pub d_phy: f64,
    pub tpp3: f64,
    pub w_adv: f64,
    pub sw_visc: f64, // dynamic viscosity [kg m-1 s-1]
    pub kin_visc: f64, // kinematic viscosity [m2 s-1]
}

/// Per-step outputs, no memory between steps
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Diagnostics {
    pub r_tot: f64, // plastic + biofilm radius [m]
    pub rho_tot: f64, // plastic + biofilm density [kg m-3]
    pub delta_rho: f64, // normalised density anomaly [-]
    pub a_coll: f64, // collision attachment [no. m-2 s-1]
    pub a_growth: f64, // growth [no. m-2 s-1]
    pub a_resp: f64, // respiration [no. m-2 s-1]
    pub vs_init: f64, // settling velocity before the depth clamp [m s-1]
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub id: usize, // stable index assigned at release
    pub x: NVec2, // horizontal position (lon, lat) [deg]
    pub plastic: Plastic,
    pub state: ParticleState,
    pub env: Option<Environment>, // None until the first sample
    pub diag: Diagnostics,
}

impl Particle {
    /// Particle at rest with no biofilm, so total radius and density equal the plastic's
    pub fn release(id: usize, lon: f64, lat: f64, depth: f64, plastic: Plastic) -> Self {
        Self {
            id,
            x: NVec2::new(lon, lat),
            plastic,
            state: ParticleState::released_at(depth),
            env: None,
            diag: Diagnostics {
                r_tot: plastic.r_pl,
                rho_tot: plastic.rho_pl,
                ..Diagnostics::default()
            },
        }
    }

    pub fn lon(&self) -> f64 {
        self.x.x
    }

    pub fn lat(&self) -> f64 {
        self.x.y
    }
}

#[derive(Debug, Clone, Default)]
pub struct Ensemble {
    pub particles: Vec<Particle>, // live particles
    pub t: f64, // time [s]
}
