pub mod states;
pub mod params;
pub mod engine;
pub mod environment;
pub mod density;
pub mod biofouling;
pub mod region;
pub mod fields;
pub mod kernels;
pub mod integrator;
pub mod scenario;
