//! CPU particle ensemble
//!
//! State is kept as parallel arrays indexed by particle id. All four arrays are
//! created together and never change length, so index `i` always refers to
//! the same particle.

use crate::error::{Result, SimulationError};
use crate::params::PhysicsParams;
use glam::Vec3;
use particle_physics::{
    clamp_acceleration, drag, pairwise_acceleration, ParticleInstance, Sampler, MIN_MASS,
};

/// What happened during one `step`, for logging and diagnostics
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Pairs skipped because their separation was zero or vanishing
    pub degenerate_pairs: usize,
    /// Acceleration components cut back by the per-axis limit
    pub clamped_components: usize,
}

/// Fixed-size ensemble of mutually attracting point masses
#[derive(Clone, Debug)]
pub struct ParticleSystem {
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    /// Pending acceleration consumed by the next step (impulses)
    accelerations: Vec<Vec3>,
    masses: Vec<f32>,
}

/// Raise a sampled mass to the floor; NaN also lands on the floor
fn floor_mass(mass: f32) -> f32 {
    mass.max(MIN_MASS)
}

impl ParticleSystem {
    /// Build `n` particles from the given sampling strategies.
    ///
    /// Each particle draws its position, velocity and mass in that order.
    /// Masses below [`MIN_MASS`] are stored as exactly `MIN_MASS`.
    pub fn initialize<M, P, V>(
        n: usize,
        mass_sampler: &mut M,
        position_sampler: &mut P,
        velocity_sampler: &mut V,
    ) -> Self
    where
        M: Sampler<f32> + ?Sized,
        P: Sampler<Vec3> + ?Sized,
        V: Sampler<Vec3> + ?Sized,
    {
        let mut positions = Vec::with_capacity(n);
        let mut velocities = Vec::with_capacity(n);
        let mut masses = Vec::with_capacity(n);

        for _ in 0..n {
            positions.push(position_sampler.sample());
            velocities.push(velocity_sampler.sample());
            masses.push(floor_mass(mass_sampler.sample()));
        }

        log::debug!("Initialized particle system with {} particles", n);

        Self {
            positions,
            velocities,
            accelerations: vec![Vec3::ZERO; n],
            masses,
        }
    }

    /// Build an ensemble from explicit per-particle state.
    ///
    /// All three slices must have the same length.
    pub fn from_parts(
        positions: Vec<Vec3>,
        velocities: Vec<Vec3>,
        masses: Vec<f32>,
    ) -> Result<Self> {
        if positions.len() != velocities.len() || positions.len() != masses.len() {
            return Err(SimulationError::config(format!(
                "state arrays differ in length: {} positions, {} velocities, {} masses",
                positions.len(),
                velocities.len(),
                masses.len()
            )));
        }

        let n = positions.len();
        Ok(Self {
            positions,
            velocities,
            accelerations: vec![Vec3::ZERO; n],
            masses: masses.into_iter().map(floor_mass).collect(),
        })
    }

    /// Advance the ensemble by one time step.
    ///
    /// Pending impulses seed this step's acceleration buffer. Pairwise
    /// attraction is added on top, the result is clamped per axis, drag is
    /// subtracted and the state is integrated with semi-implicit Euler. The
    /// buffer is dropped at the end, leaving a fresh zeroed one behind.
    pub fn step(&mut self, params: &PhysicsParams) -> StepStats {
        let n = self.len();
        let mut stats = StepStats::default();

        let mut accel = std::mem::replace(&mut self.accelerations, vec![Vec3::ZERO; n]);

        // Step 1: pairwise attraction, once per unordered pair
        for i in 0..n {
            let pos_i = self.positions[i];
            for j in (i + 1)..n {
                match pairwise_acceleration(pos_i, self.positions[j], params.grav_constant) {
                    Some(a) => {
                        accel[i] += a;
                        accel[j] -= a;
                    }
                    None => {
                        stats.degenerate_pairs += 1;
                        log::trace!("Skipping degenerate pair ({}, {})", i, j);
                    }
                }
            }
        }

        // Steps 2 and 3: per-axis clamp, then drag
        for (a, v) in accel.iter_mut().zip(&self.velocities) {
            let clamped = clamp_acceleration(*a, params.accel_limit);
            stats.clamped_components += clamped.cmpne(*a).bitmask().count_ones() as usize;
            *a = clamped + drag(*v, params.drag);
        }

        // Step 4: semi-implicit Euler, position uses the updated velocity
        for (((p, v), a), m) in self
            .positions
            .iter_mut()
            .zip(self.velocities.iter_mut())
            .zip(&accel)
            .zip(&self.masses)
        {
            *v += *a / *m * params.dt;
            *p += *v * params.dt;
        }

        if stats.degenerate_pairs > 0 {
            log::debug!("Step skipped {} degenerate pair(s)", stats.degenerate_pairs);
        }

        stats
    }

    /// Set particle `index`'s pending acceleration to `force / mass`.
    ///
    /// Overwrites whatever was pending; the value is consumed by the next step.
    pub fn apply_impulse(&mut self, index: usize, force: Vec3) -> Result<()> {
        let len = self.len();
        let mass = *self
            .masses
            .get(index)
            .ok_or(SimulationError::ParticleIndexOutOfRange { index, len })?;

        self.accelerations[index] = force / mass;
        Ok(())
    }

    /// Apply a sampled impulse to every particle
    pub fn random_kick<S>(&mut self, force_sampler: &mut S)
    where
        S: Sampler<Vec3> + ?Sized,
    {
        for (a, m) in self.accelerations.iter_mut().zip(&self.masses) {
            *a = force_sampler.sample() / *m;
        }
    }

    /// Re-sample every position and velocity in place.
    ///
    /// Masses and particle count are kept; pending impulses are dropped.
    pub fn reset<P, V>(&mut self, position_sampler: &mut P, velocity_sampler: &mut V)
    where
        P: Sampler<Vec3> + ?Sized,
        V: Sampler<Vec3> + ?Sized,
    {
        for (p, v) in self.positions.iter_mut().zip(self.velocities.iter_mut()) {
            *p = position_sampler.sample();
            *v = velocity_sampler.sample();
        }
        self.accelerations = vec![Vec3::ZERO; self.len()];
    }

    /// Unweighted mean position, or the origin for an empty ensemble
    pub fn center_of_mass(&self) -> Vec3 {
        if self.positions.is_empty() {
            return Vec3::ZERO;
        }
        self.positions.iter().sum::<Vec3>() / self.positions.len() as f32
    }

    /// Total kinetic energy, Σ ½ m |v|²
    pub fn kinetic_energy(&self) -> f32 {
        self.velocities
            .iter()
            .zip(&self.masses)
            .map(|(v, m)| 0.5 * m * v.length_squared())
            .sum()
    }

    /// Snapshot for renderer upload
    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.positions
            .iter()
            .zip(&self.masses)
            .map(|(p, m)| ParticleInstance::new(*p, *m))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    /// Pending accelerations; all zero after every step unless an impulse was applied since
    pub fn accelerations(&self) -> &[Vec3] {
        &self.accelerations
    }

    pub fn masses(&self) -> &[f32] {
        &self.masses
    }
}
