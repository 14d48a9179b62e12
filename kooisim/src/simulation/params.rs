//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - time step and end time,
//! - output interval for trajectory recording
//!
//! `PhysicalConstants` holds the read-only constants shared by every
//! particle and every step (gravity, Boltzmann, biofilm and algal properties,
//! nitrogen conversion). Rates given per day in the literature are stored
//! per second.

/// Seconds per day, used to convert literature rates to SI
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Shallowest legal particle depth, NEMO's surface level [m]
pub const SURFACE_DEPTH: f64 = 0.6;

/// Deepest legal particle depth [m]
pub const FLOOR_DEPTH: f64 = 4000.0;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub t_end: f64, // total simulated time [s]
    pub dt: f64, // step size [s]
    pub output_dt: f64, // recording interval [s]
}

impl Parameters {
    /// Number of whole steps needed to cover `t_end`
    pub fn n_steps(&self) -> usize {
        (self.t_end / self.dt).ceil() as usize
    }

    /// Step size starting at `t`, shortened so the last step ends on `t_end`
    pub fn step_at(&self, t: f64) -> f64 {
        self.dt.min(self.t_end - t)
    }
}

/// Physical constants of the biofouling model
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalConstants {
    pub g: f64, // gravitational acceleration [m s-2]
    pub k: f64, // Boltzmann constant [m2 kg s-2 K-1]
    pub rho_bf: f64, // biofilm density [kg m-3]
    pub v_a: f64, // volume of one algal cell [m3]
    pub m_a: f64, // algal mortality [s-1]
    pub r20: f64, // respiration at 20 degC [s-1]
    pub q10: f64, // respiration temperature coefficient [-]
    pub gamma: f64, // shear rate [s-1]
    pub wt_n: f64, // atomic weight of nitrogen [g mol-1]
    pub med_n2cell: f64, // median nitrogen per algal cell [mg N cell-1]
}

impl PhysicalConstants {
    /// Reference values used by the NEMO-MEDUSA regional runs
    pub fn reference() -> Self {
        Self {
            g: 7.32e10 / (SECONDS_PER_DAY * SECONDS_PER_DAY),
            k: 1.0306e-13 / (SECONDS_PER_DAY * SECONDS_PER_DAY),
            rho_bf: 1388.0,
            v_a: 2.0e-16,
            m_a: 0.39 / SECONDS_PER_DAY,
            r20: 0.1 / SECONDS_PER_DAY,
            q10: 2.0,
            gamma: 1.728e5 / SECONDS_PER_DAY,
            wt_n: 14.007,
            med_n2cell: 356.04e-9,
        }
    }
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self::reference()
    }
}
