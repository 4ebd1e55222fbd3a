//! Host-facing simulation driver
//!
//! Wraps a [`ParticleSystem`] together with the live tunables, a seeded RNG for
//! resets and kicks, and the pause flag a host toggles between frames.

use crate::config::{SimulationConfig, SpawnShape};
use crate::error::Result;
use crate::params::PhysicsParams;
use crate::system::{ParticleSystem, StepStats};
use glam::Vec3;
use particle_physics::{
    make_rng, NormalMass, ParticleInstance, Sampler, UniformBall, UniformCube,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Position sampler for the configured spawn region, on its own RNG stream
fn position_sampler(rng: &mut StdRng, shape: SpawnShape, scale: f32) -> Box<dyn Sampler<Vec3>> {
    let stream = StdRng::from_rng(rng);
    match shape {
        SpawnShape::Cube => Box::new(UniformCube::new(stream, scale)),
        SpawnShape::Ball => Box::new(UniformBall::new(stream, scale)),
    }
}

/// CPU particle simulation driven once per frame
pub struct ParticleSimulation {
    system: ParticleSystem,
    params: PhysicsParams,
    rng: StdRng,

    spawn_shape: SpawnShape,
    spawn_scale: f32,
    velocity_scale: f32,
    kick_scale: f32,

    paused: bool,
    step_count: u64,
    elapsed: f64,
}

impl ParticleSimulation {
    pub fn new(config: &SimulationConfig) -> Result<Self> {
        let particle_count = config.validate()?;
        log::info!("Initializing ParticleSimulation with {} particles...", particle_count);

        let mut rng = make_rng(config.seed);

        // Independent streams so each attribute is reproducible on its own
        let mut masses = NormalMass::new(
            StdRng::from_rng(&mut rng),
            config.mass_mean,
            config.mass_std_dev,
        )?;
        let mut positions = position_sampler(&mut rng, config.spawn_shape, config.spawn_scale);
        let mut velocities = UniformCube::new(StdRng::from_rng(&mut rng), config.velocity_scale);

        let system = ParticleSystem::initialize(
            particle_count,
            &mut masses,
            positions.as_mut(),
            &mut velocities,
        );

        log::info!("Particles created");

        Ok(Self {
            system,
            params: config.physics,
            rng,
            spawn_shape: config.spawn_shape,
            spawn_scale: config.spawn_scale,
            velocity_scale: config.velocity_scale,
            kick_scale: config.kick_scale,
            paused: false,
            step_count: 0,
            elapsed: 0.0,
        })
    }

    /// Step the simulation forward by one timestep.
    ///
    /// Returns `None` while paused.
    pub fn tick(&mut self) -> Option<StepStats> {
        if self.paused {
            return None;
        }

        let stats = self.system.step(&self.params);
        self.step_count += 1;
        self.elapsed += f64::from(self.params.dt);
        Some(stats)
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        log::debug!("Simulation {}", if self.paused { "paused" } else { "resumed" });
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Give every particle a random force for the next step
    pub fn random_kick(&mut self) {
        let mut forces = UniformCube::new(&mut self.rng, self.kick_scale);
        self.system.random_kick(&mut forces);
        log::debug!("Random kick applied to {} particles", self.system.len());
    }

    /// Re-sample positions and velocities, keeping masses
    pub fn reset(&mut self) {
        let mut positions = position_sampler(&mut self.rng, self.spawn_shape, self.spawn_scale);
        let mut velocities =
            UniformCube::new(StdRng::from_rng(&mut self.rng), self.velocity_scale);
        self.system.reset(positions.as_mut(), &mut velocities);
        log::info!("Simulation reset");
    }

    /// Update physics parameters
    pub fn update_params(&mut self, params: PhysicsParams) -> Result<()> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    pub fn params(&self) -> &PhysicsParams {
        &self.params
    }

    pub fn center_of_mass(&self) -> Vec3 {
        self.system.center_of_mass()
    }

    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.system.instances()
    }

    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    /// Mutable access for per-particle impulses
    pub fn system_mut(&mut self) -> &mut ParticleSystem {
        &mut self.system
    }

    pub fn particle_count(&self) -> usize {
        self.system.len()
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Simulated time advanced so far
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimulationError;

    fn seeded(count: i64) -> ParticleSimulation {
        let config = SimulationConfig::default()
            .with_particle_count(count)
            .with_seed(9);
        ParticleSimulation::new(&config).unwrap()
    }

    #[test]
    fn builds_requested_count_within_bounds() {
        let sim = seeded(50);
        assert_eq!(sim.particle_count(), 50);
        assert!(sim
            .system()
            .positions()
            .iter()
            .all(|p| p.abs().max_element() <= 5.0));
        assert!(sim.system().masses().iter().all(|m| *m >= 0.5));
    }

    #[test]
    fn ball_spawn_stays_within_radius() {
        let config = SimulationConfig::default()
            .with_particle_count(200)
            .with_seed(4)
            .with_spawn_shape(SpawnShape::Ball);
        let sim = ParticleSimulation::new(&config).unwrap();
        assert!(sim
            .system()
            .positions()
            .iter()
            .all(|p| p.length() <= 5.0 + 1e-4));
    }

    #[test]
    fn negative_count_is_rejected() {
        let result = ParticleSimulation::new(&SimulationConfig::default().with_particle_count(-4));
        assert!(matches!(result, Err(SimulationError::InvalidConfiguration(_))));
    }

    #[test]
    fn bad_mass_distribution_is_rejected() {
        let config = SimulationConfig {
            mass_std_dev: -1.0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            ParticleSimulation::new(&config),
            Err(SimulationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn impulse_through_driver_moves_one_particle() {
        let mut sim = seeded(4);
        let params = PhysicsParams::default()
            .with_grav_constant(0.0)
            .with_accel_limit(f32::INFINITY);
        sim.update_params(params).unwrap();
        let before = sim.system().velocities().to_vec();

        sim.system_mut()
            .apply_impulse(2, Vec3::new(10_000.0, 0.0, 0.0))
            .unwrap();
        assert!(sim.system_mut().apply_impulse(4, Vec3::ONE).is_err());
        sim.tick();

        let after = sim.system().velocities();
        assert!(after[2].x > before[2].x + 1.0);
        for i in [0, 1, 3] {
            assert!((after[i] - before[i]).length() < 0.1);
        }
    }

    #[test]
    fn same_seed_same_run() {
        let mut a = seeded(20);
        let mut b = seeded(20);
        for _ in 0..10 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.system().positions(), b.system().positions());
    }

    #[test]
    fn paused_simulation_does_not_move() {
        let mut sim = seeded(10);
        let before = sim.system().positions().to_vec();

        assert!(sim.toggle_pause());
        assert!(sim.tick().is_none());
        assert_eq!(sim.system().positions(), before.as_slice());
        assert_eq!(sim.step_count(), 0);

        assert!(!sim.toggle_pause());
        assert!(sim.tick().is_some());
        assert_eq!(sim.step_count(), 1);
    }

    #[test]
    fn elapsed_tracks_time_step() {
        let mut sim = seeded(3);
        sim.update_params(PhysicsParams::default().with_dt(0.25)).unwrap();
        sim.tick();
        sim.tick();
        assert_eq!(sim.elapsed(), 0.5);
    }

    #[test]
    fn reset_keeps_masses_and_count() {
        let mut sim = seeded(30);
        let masses = sim.system().masses().to_vec();
        let positions = sim.system().positions().to_vec();

        sim.reset();

        assert_eq!(sim.system().masses(), masses.as_slice());
        assert_eq!(sim.particle_count(), 30);
        assert_ne!(sim.system().positions(), positions.as_slice());
    }

    #[test]
    fn kick_sets_pending_acceleration() {
        let mut sim = seeded(5);
        sim.random_kick();
        assert!(sim
            .system()
            .accelerations()
            .iter()
            .any(|a| *a != Vec3::ZERO));

        sim.tick();
        assert!(sim
            .system()
            .accelerations()
            .iter()
            .all(|a| *a == Vec3::ZERO));
    }

    #[test]
    fn invalid_params_are_not_applied() {
        let mut sim = seeded(2);
        assert!(sim.update_params(PhysicsParams::default().with_dt(-1.0)).is_err());
        assert_eq!(sim.params(), &PhysicsParams::default());
    }
}
