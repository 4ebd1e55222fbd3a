//! Initial-state sampling strategies
//!
//! A [`Sampler`] produces one value per call. Closures returning the sampled
//! type are samplers too, which keeps tests and hosts free to pin exact values.

use crate::constants::{MASS_MEAN, MASS_STD_DEV};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, NormalError};

/// Source of per-particle values
pub trait Sampler<T> {
    fn sample(&mut self) -> T;
}

impl<T, F> Sampler<T> for F
where
    F: FnMut() -> T,
{
    fn sample(&mut self) -> T {
        self()
    }
}

/// Seeded RNG when a seed is given, otherwise one seeded from the OS
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Masses drawn from a normal distribution
///
/// Values are returned as drawn; the mass floor is applied by the ensemble
/// when it stores them.
pub struct NormalMass<R> {
    rng: R,
    dist: Normal<f32>,
}

impl<R: Rng> NormalMass<R> {
    /// Fails for a negative or non-finite standard deviation
    pub fn new(rng: R, mean: f32, std_dev: f32) -> Result<Self, NormalError> {
        if std_dev < 0.0 {
            return Err(NormalError::BadVariance);
        }
        Ok(Self {
            rng,
            dist: Normal::new(mean, std_dev)?,
        })
    }

    /// Mean 3, standard deviation 0.5
    pub fn standard(rng: R) -> Result<Self, NormalError> {
        Self::new(rng, MASS_MEAN, MASS_STD_DEV)
    }
}

impl<R: Rng> Sampler<f32> for NormalMass<R> {
    fn sample(&mut self) -> f32 {
        self.dist.sample(&mut self.rng)
    }
}

/// Vectors with each axis uniform in `[-scale, scale]`
pub struct UniformCube<R> {
    rng: R,
    scale: f32,
}

impl<R: Rng> UniformCube<R> {
    pub fn new(rng: R, scale: f32) -> Self {
        Self { rng, scale }
    }
}

impl<R: Rng> Sampler<Vec3> for UniformCube<R> {
    fn sample(&mut self) -> Vec3 {
        let x = self.rng.random_range(-1.0..=1.0);
        let y = self.rng.random_range(-1.0..=1.0);
        let z = self.rng.random_range(-1.0..=1.0);
        Vec3::new(x, y, z) * self.scale
    }
}

/// Vectors uniform inside a sphere of the given radius
pub struct UniformBall<R> {
    rng: R,
    radius: f32,
}

impl<R: Rng> UniformBall<R> {
    pub fn new(rng: R, radius: f32) -> Self {
        Self { rng, radius }
    }
}

impl<R: Rng> Sampler<Vec3> for UniformBall<R> {
    fn sample(&mut self) -> Vec3 {
        // Rejection sampling: draw from [-1, 1]³ until the point lands in the unit sphere
        loop {
            let x = self.rng.random_range(-1.0..1.0);
            let y = self.rng.random_range(-1.0..1.0);
            let z = self.rng.random_range(-1.0..1.0);

            let p = Vec3::new(x, y, z);
            if p.length_squared() <= 1.0 {
                return p * self.radius;
            }
        }
    }
}
