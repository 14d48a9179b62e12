//! Field samplers: where particles get their environment from
//!
//! The biofouling core only sees a [`FieldSample`] per particle and step.
//! [`FieldSampler`] is the seam behind which gridded ocean-model output would
//! sit; two analytic samplers are provided for idealised runs and tests.

use crate::error::SampleError;

use super::density::poly_teos10_bsq;
use super::params::FLOOR_DEPTH;
use super::region::Bounds;
use super::states::FieldSample;

/// Supplies the environment at a time and position
pub trait FieldSampler: Send + Sync {
    fn sample(&self, t: f64, lon: f64, lat: f64, depth: f64) -> Result<FieldSample, SampleError>;
}

fn check_domain(bounds: Option<&Bounds>, lon: f64, lat: f64, depth: f64) -> Result<(), SampleError> {
    let inside = bounds.map_or(true, |b| b.contains(lon, lat));
    if !inside || !(0.0..=FLOOR_DEPTH).contains(&depth) {
        return Err(SampleError::OutOfBounds { lon, lat, depth });
    }
    Ok(())
}

/// The same sample everywhere inside `bounds`
#[derive(Debug, Clone)]
pub struct UniformField {
    pub sample: FieldSample,
    pub bounds: Option<Bounds>,
}

impl FieldSampler for UniformField {
    fn sample(&self, _t: f64, lon: f64, lat: f64, depth: f64) -> Result<FieldSample, SampleError> {
        check_domain(self.bounds.as_ref(), lon, lat, depth)?;
        Ok(self.sample)
    }
}

/// Shape of the analytic water column
#[derive(Debug, Clone, PartialEq)]
pub struct Profiles {
    pub temp_surface: f64, // [degC]
    pub temp_deep: f64,
    pub temp_scale: f64, // e-folding depth [m]
    pub salinity_surface: f64, // [g kg-1]
    pub salinity_deep: f64,
    pub salinity_scale: f64,
    pub mixed_layer_depth: f64, // phytoplankton uniform above [m]
    pub nd_phy_surface: f64, // [mmol N m-3]
    pub d_phy_surface: f64,
    pub phy_scale: f64, // decay below the mixed layer [m]
    pub tpp3_surface: f64, // [mmol N m-3 d-1]
    pub tpp3_scale: f64,
    pub w_adv: f64, // [m s-1]
}

impl Default for Profiles {
    /// Stratified subtropical column
    fn default() -> Self {
        Self {
            temp_surface: 22.0,
            temp_deep: 2.0,
            temp_scale: 500.0,
            salinity_surface: 35.5,
            salinity_deep: 34.7,
            salinity_scale: 800.0,
            mixed_layer_depth: 50.0,
            nd_phy_surface: 0.1,
            d_phy_surface: 0.05,
            phy_scale: 40.0,
            tpp3_surface: 0.05,
            tpp3_scale: 30.0,
            w_adv: 0.0,
        }
    }
}

/// Time-independent depth profiles, density from TEOS-10
#[derive(Debug, Clone)]
pub struct ProfileField {
    pub profiles: Profiles,
    pub bounds: Option<Bounds>,
}

fn relax(surface: f64, deep: f64, scale: f64, depth: f64) -> f64 {
    deep + (surface - deep) * (-depth / scale).exp()
}

impl ProfileField {
    pub fn new(profiles: Profiles, bounds: Option<Bounds>) -> Self {
        Self { profiles, bounds }
    }

    /// Sample without the domain check
    pub fn column(&self, depth: f64) -> FieldSample {
        let p = &self.profiles;
        let temp = relax(p.temp_surface, p.temp_deep, p.temp_scale, depth);
        let abs_salinity = relax(p.salinity_surface, p.salinity_deep, p.salinity_scale, depth);

        let phy_decay = if depth <= p.mixed_layer_depth {
            1.0
        } else {
            (-(depth - p.mixed_layer_depth) / p.phy_scale).exp()
        };

        FieldSample {
            temp,
            abs_salinity,
            density: poly_teos10_bsq(abs_salinity, temp, depth),
            nd_phy: p.nd_phy_surface * phy_decay,
            d_phy: p.d_phy_surface * phy_decay,
            tpp3: p.tpp3_surface * (-depth / p.tpp3_scale).exp(),
            w_adv: p.w_adv,
        }
    }
}

impl FieldSampler for ProfileField {
    fn sample(&self, _t: f64, lon: f64, lat: f64, depth: f64) -> Result<FieldSample, SampleError> {
        check_domain(self.bounds.as_ref(), lon, lat, depth)?;
        let column = self.column(depth);
        let values = [column.temp, column.abs_salinity, column.density, column.nd_phy, column.d_phy, column.tpp3];
        if values.iter().any(|v| !v.is_finite()) || !(column.density > 0.0) {
            return Err(SampleError::Interpolation {
                lon,
                lat,
                depth,
                reason: format!("degenerate column {column:?}"),
            });
        }
        Ok(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::region::Region;
    use approx::assert_relative_eq;

    #[test]
    fn profile_column_cools_and_densifies_with_depth() {
        let field = ProfileField::new(Profiles::default(), None);
        let top = field.column(1.0);
        let deep = field.column(1000.0);
        assert!(deep.temp < top.temp);
        assert!(deep.density > top.density);
        assert!(deep.tpp3 < top.tpp3);
    }

    #[test]
    fn phytoplankton_is_uniform_in_mixed_layer() {
        let field = ProfileField::new(Profiles::default(), None);
        assert_eq!(field.column(1.0).d_phy, field.column(50.0).d_phy);
        assert_relative_eq!(field.column(90.0).d_phy, 0.05 * (-1.0f64).exp());
    }

    #[test]
    fn outside_region_is_an_error() {
        let field = ProfileField::new(Profiles::default(), Some(Region::Med.bounds()));
        assert!(field.sample(0.0, 15.0, 35.0, 0.6).is_ok());
        let err = field.sample(0.0, -40.0, 35.0, 0.6).unwrap_err();
        assert_eq!(err, SampleError::OutOfBounds { lon: -40.0, lat: 35.0, depth: 0.6 });
    }

    #[test]
    fn below_the_floor_is_an_error() {
        let field = UniformField {
            sample: ProfileField::new(Profiles::default(), None).column(0.0),
            bounds: None,
        };
        assert!(field.sample(0.0, 0.0, 0.0, 4000.0).is_ok());
        assert!(field.sample(0.0, 0.0, 0.0, 4000.5).is_err());
        assert!(field.sample(0.0, 0.0, 0.0, -1.0).is_err());
    }

    #[test]
    fn degenerate_profile_is_an_interpolation_error() {
        let profiles = Profiles { tpp3_scale: 0.0, ..Profiles::default() };
        let field = ProfileField::new(profiles, None);
        let err = field.sample(0.0, 0.0, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, SampleError::Interpolation { depth, .. } if depth == 0.0));
        assert!(field.sample(0.0, 0.0, 0.0, 10.0).is_ok());
    }
}
