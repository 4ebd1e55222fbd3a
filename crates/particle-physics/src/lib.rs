//! # Particle Physics Kernels
//!
//! Core math for the pairwise N-body simulation: inverse-square attraction,
//! per-axis acceleration clamping, linear drag, initial-state sampling and the
//! renderer-facing particle layout.

pub mod constants;
pub mod forces;
pub mod particle;
pub mod sampling;

pub use constants::*;
pub use forces::*;
pub use particle::*;
pub use sampling::*;
