pub mod simulation;
pub mod configuration;
pub mod output;
pub mod benchmark;
pub mod error;

pub use simulation::states::{Particle, ParticleState, Plastic, FieldSample, Environment, Diagnostics, Ensemble, NVec2};
pub use simulation::params::{Parameters, PhysicalConstants, SURFACE_DEPTH, FLOOR_DEPTH};
pub use simulation::environment::EnvironmentProfiler;
pub use simulation::biofouling::{BiofoulingIntegrator, StepResult, DepthRegime};
pub use simulation::density::poly_teos10_bsq;
pub use simulation::fields::{FieldSampler, UniformField, ProfileField, Profiles};
pub use simulation::kernels::{Kernel, KernelSet, DensitySource};
pub use simulation::integrator::{advance_ensemble, StepReport};
pub use simulation::region::Region;
pub use simulation::scenario::{Scenario, RunSummary};

pub use configuration::config::ScenarioConfig;
pub use error::{ConfigError, SampleError, KernelError};

pub use output::trajectory::{TrajectoryWriter, TrajectoryRecord};

pub use benchmark::benchmark::bench_ensemble_step;
