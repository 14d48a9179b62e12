//! Seawater viscosity from sampled temperature and salinity
//!
//! Pure water viscosity follows a fit in temperature, and the salinity
//! correction is quadratic in `S = SA / 1000`. The kinematic viscosity divides
//! by the local seawater density already attached to the sample.

use super::states::{Environment, FieldSample};

/// Stateless converter from a raw field sample to an [`Environment`]
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvironmentProfiler;

impl EnvironmentProfiler {
    /// Dynamic viscosity of seawater [kg m-1 s-1]
    pub fn dynamic_viscosity(t: f64, abs_salinity: f64) -> f64 {
        let mu_w = 4.2844e-5 + 1.0 / ((0.157 * (t + 64.993).powi(2)) - 91.296);
        let a = 1.541 + 1.998e-2 * t - 9.52e-5 * t.powi(2);
        let b = 7.974 - 7.561e-2 * t + 4.724e-4 * t.powi(2);
        let s = abs_salinity / 1000.0;
        mu_w * (1.0 + a * s + b * s.powi(2))
    }

    /// Derive viscosities and pass the remaining sample values through
    pub fn profile(&self, sample: &FieldSample) -> Environment {
        let sw_visc = Self::dynamic_viscosity(sample.temp, sample.abs_salinity);
        Environment {
            temp: sample.temp,
            rho_sw: sample.density,
            nd_phy: sample.nd_phy,
            d_phy: sample.d_phy,
            tpp3: sample.tpp3,
            w_adv: sample.w_adv,
            sw_visc,
            kin_visc: sw_visc / sample.density,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample(temp: f64, abs_salinity: f64, density: f64) -> FieldSample {
        FieldSample {
            temp,
            abs_salinity,
            density,
            nd_phy: 0.1,
            d_phy: 0.2,
            tpp3: 0.3,
            w_adv: -1e-5,
        }
    }

    #[test]
    fn fresh_water_at_20c_is_about_one_millipascal_second() {
        let mu = EnvironmentProfiler::dynamic_viscosity(20.0, 0.0);
        assert_relative_eq!(mu, 1.002e-3, max_relative = 5e-3);
    }

    #[test]
    fn salt_raises_viscosity_and_warmth_lowers_it() {
        let fresh = EnvironmentProfiler::dynamic_viscosity(15.0, 0.0);
        let salty = EnvironmentProfiler::dynamic_viscosity(15.0, 35.0);
        let warm = EnvironmentProfiler::dynamic_viscosity(25.0, 35.0);
        assert!(salty > fresh);
        assert!(warm < salty);
    }

    #[test]
    fn kinematic_viscosity_divides_by_local_density() {
        let env = EnvironmentProfiler.profile(&sample(10.0, 35.0, 1027.0));
        assert_relative_eq!(env.kin_visc, env.sw_visc / 1027.0);
        assert_relative_eq!(env.kin_visc, 1.35e-6, max_relative = 0.03);
    }

    #[test]
    fn sample_values_pass_through() {
        let s = sample(4.0, 34.0, 1026.0);
        let env = EnvironmentProfiler.profile(&s);
        assert_eq!(env.temp, s.temp);
        assert_eq!(env.rho_sw, s.density);
        assert_eq!(env.nd_phy, s.nd_phy);
        assert_eq!(env.d_phy, s.d_phy);
        assert_eq!(env.tpp3, s.tpp3);
        assert_eq!(env.w_adv, s.w_adv);
    }

    #[test]
    fn viscosity_matches_closed_form() {
        assert_relative_eq!(
            EnvironmentProfiler::dynamic_viscosity(10.0, 35.0),
            1.3967662508945387e-3,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            EnvironmentProfiler::dynamic_viscosity(25.0, 38.0),
            9.653620030422012e-4,
            max_relative = 1e-12
        );
    }
}
