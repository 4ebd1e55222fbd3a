//! Error types for the particle simulation.

use rand_distr::NormalError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    /// Rejected construction or tuning input
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Per-particle operation addressed a particle that does not exist
    #[error("Particle index {index} out of range for ensemble of {len}")]
    ParticleIndexOutOfRange { index: usize, len: usize },

    /// Mass distribution could not be built
    #[error("Sampling error: {0}")]
    Sampling(#[from] NormalError),
}

impl SimulationError {
    pub fn config(message: impl Into<String>) -> Self {
        SimulationError::InvalidConfiguration(message.into())
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;
