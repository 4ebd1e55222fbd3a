//! Pairwise N-body particle simulation
//!
//! Headless host: builds an ensemble from command-line settings, drives it one
//! step per tick and logs what a renderer would be shown.

use clap::{Parser, ValueEnum};
use particle_physics::{
    as_bytes, DEFAULT_ACCEL_LIMIT, DEFAULT_GRAV_CONSTANT, DEFAULT_PARTICLE_COUNT,
    DEFAULT_TIME_STEP, DRAG_COEFFICIENT,
};
use particle_simulation::{
    ParticleSimulation, PhysicsParams, SimulationConfig, SimulationError, SpawnShape,
};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Spawn {
    /// Uniform box
    Cube,
    /// Uniform sphere
    Ball,
}

impl From<Spawn> for SpawnShape {
    fn from(spawn: Spawn) -> Self {
        match spawn {
            Spawn::Cube => SpawnShape::Cube,
            Spawn::Ball => SpawnShape::Ball,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Pairwise inverse-square particle simulation")]
struct Args {
    /// Number of particles
    #[arg(long, default_value_t = DEFAULT_PARTICLE_COUNT as i64, allow_negative_numbers = true)]
    particles: i64,

    /// Number of steps to run
    #[arg(long, default_value_t = 600)]
    steps: u64,

    /// Seed for all sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Integration time step
    #[arg(long, default_value_t = DEFAULT_TIME_STEP)]
    dt: f32,

    /// Gravitational constant
    #[arg(long, default_value_t = DEFAULT_GRAV_CONSTANT)]
    grav_constant: f32,

    /// Per-axis acceleration bound
    #[arg(long, default_value_t = DEFAULT_ACCEL_LIMIT)]
    accel_limit: f32,

    /// Linear drag coefficient
    #[arg(long, default_value_t = DRAG_COEFFICIENT)]
    drag: f32,

    /// Region initial positions are drawn from
    #[arg(long, value_enum, default_value_t = Spawn::Cube)]
    spawn: Spawn,

    /// Log diagnostics every this many steps
    #[arg(long, default_value_t = 60)]
    log_every: u64,

    /// Apply a random kick before this step
    #[arg(long)]
    kick_at: Option<u64>,
}

impl Args {
    fn to_config(&self) -> SimulationConfig {
        let physics = PhysicsParams::default()
            .with_dt(self.dt)
            .with_grav_constant(self.grav_constant)
            .with_accel_limit(self.accel_limit)
            .with_drag(self.drag);

        SimulationConfig {
            particle_count: self.particles,
            seed: self.seed,
            spawn_shape: self.spawn.into(),
            physics,
            ..SimulationConfig::default()
        }
    }
}

fn log_state(sim: &ParticleSimulation) {
    let com = sim.center_of_mass();
    log::info!(
        "step {:>6}  t={:>8.2}  center=({:.3}, {:.3}, {:.3})  kinetic={:.4}",
        sim.step_count(),
        sim.elapsed(),
        com.x,
        com.y,
        com.z,
        sim.system().kinetic_energy()
    );
}

fn main() -> Result<(), SimulationError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Starting pairwise particle simulation...");

    let mut sim = ParticleSimulation::new(&args.to_config())?;
    log::info!("✓ Initialized {} particles", sim.particle_count());

    let mut degenerate_pairs = 0;
    let mut clamped_components = 0;

    log_state(&sim);
    for step in 0..args.steps {
        if args.kick_at == Some(step) {
            sim.random_kick();
            log::info!("Random kick at step {}", step);
        }

        if let Some(stats) = sim.tick() {
            degenerate_pairs += stats.degenerate_pairs;
            clamped_components += stats.clamped_components;
        }

        if args.log_every > 0 && sim.step_count() % args.log_every == 0 {
            log_state(&sim);
        }
    }

    let instances = sim.instances();
    log::info!(
        "✓ Finished {} steps ({} degenerate pairs skipped, {} components clamped)",
        sim.step_count(),
        degenerate_pairs,
        clamped_components
    );
    log::info!(
        "  Final instance buffer: {} bytes for {} particles",
        as_bytes(&instances).len(),
        instances.len()
    );

    Ok(())
}
