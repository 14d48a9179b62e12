//! Error types for scenario loading and field sampling
//!
//! The physics core never fails. Only scenario validation and field sampling
//! can, and a sampling failure ends the life of the particle concerned.

use thiserror::Error;

/// Invalid scenario configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("engine.{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("plastic #{index}: {field} must be positive, got {value}")]
    InvalidPlastic { index: usize, field: &'static str, value: f64 },

    #[error("release has no plastic types")]
    NoPlastics,

    #[error("release grid axis {axis} has no points")]
    EmptyGrid { axis: &'static str },

    #[error("release must give either a region or both lat and lon axes")]
    MissingReleaseGrid,

    #[error("region {0} has no release grid")]
    NoReleaseGrid(String),

    #[error("release depth {0} m is outside the legal depth band")]
    ReleaseDepth(f64),
}

/// Failure of a field sampler at a particle position
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SampleError {
    #[error("out of bounds at lon = {lon}, lat = {lat}, depth = {depth}")]
    OutOfBounds { lon: f64, lat: f64, depth: f64 },

    #[error("interpolation failed at lon = {lon}, lat = {lat}, depth = {depth}: {reason}")]
    Interpolation { lon: f64, lat: f64, depth: f64, reason: String },
}

/// Failure of a kernel on one particle
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    #[error("field sampling failed: {0}")]
    Sample(#[from] SampleError),

    #[error("particle {id} has not been sampled before the {kernel} kernel")]
    MissingEnvironment { id: usize, kernel: &'static str },
}
