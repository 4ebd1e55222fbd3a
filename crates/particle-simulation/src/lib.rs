//! # Particle Simulation Engine
//!
//! CPU pairwise N-body ensemble: inverse-square attraction, per-axis clamping,
//! drag and semi-implicit Euler integration, plus a host-facing driver.

pub mod config;
pub mod error;
pub mod params;
pub mod simulation;
pub mod system;

pub use config::*;
pub use error::SimulationError;
pub use params::*;
pub use simulation::*;
pub use system::*;
