//! Physics parameters for runtime tuning
//!
//! These are the live tunables a host exposes (sliders, CLI flags). They are
//! passed into every `step` call and never read from shared state.

use crate::error::{Result, SimulationError};
use glam::Vec3;
use particle_physics::{
    DEFAULT_ACCEL_LIMIT, DEFAULT_GRAV_CONSTANT, DEFAULT_TIME_STEP, DRAG_COEFFICIENT,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsParams {
    /// Integration time step
    pub dt: f32,
    /// Strength of the inverse-square attraction
    pub grav_constant: f32,
    /// Per-axis bound applied to accumulated acceleration
    pub accel_limit: Vec3,
    /// Linear drag coefficient
    pub drag: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            dt: DEFAULT_TIME_STEP,
            grav_constant: DEFAULT_GRAV_CONSTANT,
            accel_limit: Vec3::splat(DEFAULT_ACCEL_LIMIT),
            drag: DRAG_COEFFICIENT,
        }
    }
}

impl PhysicsParams {
    pub fn with_dt(mut self, dt: f32) -> Self {
        self.dt = dt;
        self
    }

    pub fn with_grav_constant(mut self, grav_constant: f32) -> Self {
        self.grav_constant = grav_constant;
        self
    }

    /// Same bound on every axis
    pub fn with_accel_limit(mut self, limit: f32) -> Self {
        self.accel_limit = Vec3::splat(limit);
        self
    }

    pub fn with_axis_limits(mut self, limits: Vec3) -> Self {
        self.accel_limit = limits;
        self
    }

    pub fn with_drag(mut self, drag: f32) -> Self {
        self.drag = drag;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(SimulationError::config(format!(
                "time step must be finite and positive, got {}",
                self.dt
            )));
        }
        if !self.grav_constant.is_finite() {
            return Err(SimulationError::config(format!(
                "gravitational constant must be finite, got {}",
                self.grav_constant
            )));
        }
        // Infinite limits are allowed and mean "unclamped"
        if self.accel_limit.is_nan() || self.accel_limit.min_element() < 0.0 {
            return Err(SimulationError::config(format!(
                "acceleration limit must be non-negative on every axis, got {}",
                self.accel_limit
            )));
        }
        if !self.drag.is_finite() || self.drag < 0.0 {
            return Err(SimulationError::config(format!(
                "drag must be finite and non-negative, got {}",
                self.drag
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(PhysicsParams::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_dt() {
        assert!(PhysicsParams::default().with_dt(0.0).validate().is_err());
        assert!(PhysicsParams::default().with_dt(-0.1).validate().is_err());
        assert!(PhysicsParams::default().with_dt(f32::NAN).validate().is_err());
    }

    #[test]
    fn rejects_negative_axis_limit() {
        let params = PhysicsParams::default().with_axis_limits(Vec3::new(1.0, -1.0, 1.0));
        assert!(matches!(
            params.validate(),
            Err(SimulationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn unbounded_limit_is_allowed() {
        let params = PhysicsParams::default().with_accel_limit(f32::INFINITY);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn rejects_negative_drag() {
        assert!(PhysicsParams::default().with_drag(-0.5).validate().is_err());
    }
}
