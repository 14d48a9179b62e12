//! Biofouling and settling of a single plastic particle over one step
//!
//! The step follows Kooi et al. (2017):
//! 1. ambient algal concentration and growth rate from phytoplankton nitrogen
//!    and primary productivity,
//! 2. composite geometry and density of plastic plus biofilm,
//! 3. encounter rate of ambient algae (Brownian, shear, differential settling),
//! 4. explicit Euler update of the attached algae,
//! 5. settling velocity from the Dietrich dimensionless correlation,
//! 6. depth update with the surface/floor clamp.
//!
//! [`BiofoulingIntegrator::step`] takes the carried state by value and
//! returns the next one together with the per-step diagnostics, so what
//! persists between steps is exactly the [`ParticleState`].

use std::f64::consts::PI;

use super::params::{PhysicalConstants, FLOOR_DEPTH, SECONDS_PER_DAY, SURFACE_DEPTH};
use super::states::{Diagnostics, Environment, ParticleState, Plastic};

/// Above this `dstar` the Newtonian limit is used
pub const DSTAR_NEWTON: f64 = 5e9;
/// Below this `dstar` the Stokes limit is used
pub const DSTAR_STOKES: f64 = 0.05;

/// Ambient algae seen by the particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientAlgae {
    pub aa: f64, // concentration [no. m-3], never negative
    pub mu_aa: f64, // growth rate [s-1], never negative
}

/// Plastic plus biofilm geometry for the current algae load
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub theta_pl: f64, // plastic surface area [m2]
    pub r_a: f64, // algal cell radius [m]
    pub t_bf: f64, // biofilm thickness [m]
    pub r_tot: f64, // total radius [m]
    pub rho_tot: f64, // total density [kg m-3]
}

/// Which branch of the depth update applied in a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthRegime {
    InBounds,
    OutOfBounds,
}

/// Output of one biofouling step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    pub state: ParticleState,
    pub diag: Diagnostics,
    pub regime: DepthRegime,
}

#[derive(Debug, Clone, Default)]
pub struct BiofoulingIntegrator {
    pub constants: PhysicalConstants,
}

impl BiofoulingIntegrator {
    pub fn new(constants: PhysicalConstants) -> Self {
        Self { constants }
    }

    /// Convert phytoplankton nitrogen and productivity into cell counts and a
    /// per-cell growth rate. Growth is zero when there are no ambient algae.
    pub fn ambient_algae(&self, env: &Environment) -> AmbientAlgae {
        let c = &self.constants;

        let n0 = env.nd_phy + env.d_phy; // [mmol N m-3]
        let n = n0 * c.wt_n; // [mg N m-3]
        let n2 = n / c.med_n2cell; // [no. m-3]
        let aa = if n2 < 0.0 { 0.0 } else { n2 };

        let mu_n0 = env.tpp3 * c.wt_n; // [mg N m-3 d-1]
        let mu_n = mu_n0 / c.med_n2cell; // [no. m-3 d-1]
        let mu_aa = if aa == 0.0 {
            0.0
        } else {
            let mu_n2 = mu_n / aa; // [d-1]
            if mu_n2 < 0.0 { 0.0 } else { mu_n2 / SECONDS_PER_DAY }
        };

        AmbientAlgae { aa, mu_aa }
    }

    /// Volume balance of a uniform biofilm of `a` cells per m2 around the plastic sphere
    pub fn geometry(&self, plastic: &Plastic, a: f64) -> Geometry {
        let c = &self.constants;
        let r_pl = plastic.r_pl;

        let v_pl = (4.0 / 3.0) * PI * r_pl.powi(3);
        let theta_pl = 4.0 * PI * r_pl.powi(2);
        let r_a = ((3.0 / 4.0) * (c.v_a / PI)).powf(1.0 / 3.0);

        let v_bf = (c.v_a * a) * theta_pl;
        let v_tot = v_bf + v_pl;
        let t_bf = (v_tot * (3.0 / (4.0 * PI))).powf(1.0 / 3.0) - r_pl;

        let r_tot = r_pl + t_bf;
        let rho_tot = (r_pl.powi(3) * plastic.rho_pl + (r_tot.powi(3) - r_pl.powi(3)) * c.rho_bf) / r_tot.powi(3);

        Geometry { theta_pl, r_a, t_bf, r_tot, rho_tot }
    }

    /// Total encounter kernel `beta_a` [m3 s-1]. `vs_prev` is the settling
    /// velocity carried from the previous step.
    pub fn encounter_rate(&self, geom: &Geometry, env: &Environment, vs_prev: f64) -> f64 {
        let c = &self.constants;
        let kt = c.k * (env.temp + 273.16);

        let d_pl = kt / (6.0 * PI * env.sw_visc * geom.r_tot);
        let d_a = kt / (6.0 * PI * env.sw_visc * geom.r_a);

        let beta_brown = 4.0 * PI * (d_pl + d_a) * (geom.r_tot + geom.r_a);
        let beta_shear = 1.3 * c.gamma * (geom.r_tot + geom.r_a).powi(3);
        let beta_set = 0.5 * PI * geom.r_tot.powi(2) * vs_prev.abs();

        beta_brown + beta_shear + beta_set
    }

    /// Advance one particle by `dt` seconds
    pub fn step(&self, plastic: &Plastic, state: ParticleState, env: &Environment, dt: f64) -> StepResult {
        let c = &self.constants;
        let ParticleState { a, z, vs: vs_prev } = state;

        let algae = self.ambient_algae(env);
        let geom = self.geometry(plastic, a);
        let beta_a = self.encounter_rate(&geom, env, vs_prev);

        // Attached algae, explicit Euler
        let a_coll = (beta_a * algae.aa) / geom.theta_pl;
        let a_growth = algae.mu_aa * a;
        let a_mort = c.m_a * a;
        let a_resp = c.q10.powf((env.temp - 20.0) / 10.0) * c.r20 * a;
        let a_next = a + (a_coll + a_growth - a_mort - a_resp) * dt;

        // Settling
        let dn = 2.0 * geom.r_tot;
        let delta_rho = (geom.rho_tot - env.rho_sw) / env.rho_sw;
        let dstar = ((geom.rho_tot - env.rho_sw) * c.g * dn.powi(3)) / (env.rho_sw * env.kin_visc.powi(2));
        let w = dimensionless_velocity(dstar);
        let vs_init = settling_velocity(c.g, env.kin_visc, w, delta_rho);

        let (z_next, vs_next, regime) = integrate_depth(z, vs_init, dt);

        StepResult {
            state: ParticleState { a: a_next, z: z_next, vs: vs_next },
            diag: Diagnostics {
                r_tot: geom.r_tot,
                rho_tot: geom.rho_tot,
                delta_rho,
                a_coll,
                a_growth,
                a_resp,
                vs_init,
            },
            regime,
        }
    }
}

/// Dimensionless settling velocity `w*` for dimensionless diameter `dstar`
pub fn dimensionless_velocity(dstar: f64) -> f64 {
    if dstar > DSTAR_NEWTON {
        1000.0
    } else if dstar < DSTAR_STOKES {
        dstar.powi(2) * 1.71e-4
    } else {
        let l = dstar.log10();
        10f64.powf(-3.76715 + 1.92944 * l - 0.09815 * l.powi(2) - 0.00575 * l.powi(3) + 0.00056 * l.powi(4))
    }
}

/// Signed settling velocity; positive sinks, negative rises
pub fn settling_velocity(g: f64, kin_visc: f64, w: f64, delta_rho: f64) -> f64 {
    if delta_rho > 0.0 {
        (g * kin_visc * w * delta_rho).powf(1.0 / 3.0)
    } else {
        -(g * kin_visc * w * delta_rho.abs()).powf(1.0 / 3.0)
    }
}

/// Move the particle by `vs * dt`. A target outside `(SURFACE_DEPTH, FLOOR_DEPTH)`
/// puts the particle at the surface bound with zero velocity, for floor
/// violations too.
pub fn integrate_depth(z: f64, vs: f64, dt: f64) -> (f64, f64, DepthRegime) {
    let z0 = z + vs * dt;
    // NaN fails both comparisons and lands on the surface bound too
    if !(z0 > SURFACE_DEPTH && z0 < FLOOR_DEPTH) {
        (SURFACE_DEPTH, 0.0, DepthRegime::OutOfBounds)
    } else {
        (z0, vs, DepthRegime::InBounds)
    }
}
