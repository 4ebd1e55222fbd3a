//! Simulation constants
//!
//! Values are in simulation units, tuned for an ensemble of a few hundred
//! bodies spawned in a box a handful of units across.

/// Linear drag coefficient (fraction of velocity removed as acceleration)
pub const DRAG_COEFFICIENT: f32 = 0.1;

/// Lowest mass a particle may carry
pub const MIN_MASS: f32 = 0.5;

/// Mean of the normal distribution masses are drawn from
pub const MASS_MEAN: f32 = 3.0;

/// Standard deviation of the mass distribution
pub const MASS_STD_DEV: f32 = 0.5;

/// Half-extent of the spawn box
pub const SPAWN_SCALE: f32 = 5.0;

/// Half-extent of the initial velocity box
pub const INITIAL_VELOCITY_SCALE: f32 = 0.1;

/// Half-extent of the force box used by a random kick
pub const KICK_SCALE: f32 = 5.0;

/// Default number of particles
pub const DEFAULT_PARTICLE_COUNT: usize = 100;

/// Default integration time step
pub const DEFAULT_TIME_STEP: f32 = 0.1;

/// Default gravitational constant
pub const DEFAULT_GRAV_CONSTANT: f32 = 0.1;

/// Default per-axis acceleration bound
pub const DEFAULT_ACCEL_LIMIT: f32 = 2.0;
