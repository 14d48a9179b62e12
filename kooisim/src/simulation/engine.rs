//! High-level runtime engine settings
//!
//! Selects sequential or parallel stepping and the seawater density source
//! used when building and running a `Scenario`

use super::kernels::DensitySource;

#[derive(Debug, Clone)]
pub struct Engine {
    pub parallel: bool, // false = single thread, true = rayon pool
    pub density: DensitySource, // sampled or TEOS-10
}
