//! Construction-time configuration for a simulation run

use crate::error::{Result, SimulationError};
use crate::params::PhysicsParams;
use particle_physics::{
    DEFAULT_PARTICLE_COUNT, INITIAL_VELOCITY_SCALE, KICK_SCALE, MASS_MEAN, MASS_STD_DEV,
    SPAWN_SCALE,
};

/// Region initial positions are drawn from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpawnShape {
    /// Each axis uniform in `[-spawn_scale, spawn_scale]`
    #[default]
    Cube,
    /// Uniform inside a sphere of radius `spawn_scale`
    Ball,
}

/// Everything needed to build an ensemble and drive it
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Requested particle count; signed so hosts can pass raw user input
    pub particle_count: i64,
    /// Seed for all sampling; `None` seeds from the OS
    pub seed: Option<u64>,
    pub spawn_shape: SpawnShape,
    /// Half-extent of the spawn region
    pub spawn_scale: f32,
    /// Half-extent of the initial velocity box
    pub velocity_scale: f32,
    /// Half-extent of the random kick force box
    pub kick_scale: f32,
    pub mass_mean: f32,
    pub mass_std_dev: f32,
    pub physics: PhysicsParams,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT as i64,
            seed: None,
            spawn_shape: SpawnShape::Cube,
            spawn_scale: SPAWN_SCALE,
            velocity_scale: INITIAL_VELOCITY_SCALE,
            kick_scale: KICK_SCALE,
            mass_mean: MASS_MEAN,
            mass_std_dev: MASS_STD_DEV,
            physics: PhysicsParams::default(),
        }
    }
}

impl SimulationConfig {
    pub fn with_particle_count(mut self, count: i64) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_spawn_shape(mut self, shape: SpawnShape) -> Self {
        self.spawn_shape = shape;
        self
    }

    pub fn with_physics(mut self, physics: PhysicsParams) -> Self {
        self.physics = physics;
        self
    }

    /// Validate the configuration and return the particle count
    pub fn validate(&self) -> Result<usize> {
        let count = usize::try_from(self.particle_count).map_err(|_| {
            SimulationError::config(format!(
                "particle count must be non-negative, got {}",
                self.particle_count
            ))
        })?;

        for (name, value) in [
            ("spawn scale", self.spawn_scale),
            ("velocity scale", self.velocity_scale),
            ("kick scale", self.kick_scale),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::config(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }

        if !self.mass_mean.is_finite() {
            return Err(SimulationError::config(format!(
                "mass mean must be finite, got {}",
                self.mass_mean
            )));
        }

        if !self.mass_std_dev.is_finite() || self.mass_std_dev < 0.0 {
            return Err(SimulationError::config(format!(
                "mass standard deviation must be finite and non-negative, got {}",
                self.mass_std_dev
            )));
        }

        self.physics.validate()?;

        Ok(count)
    }
}
