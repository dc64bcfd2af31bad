//! Semi-implicit Euler integration of the particle pool.

use glam::Vec3;
use rand::Rng;

use crate::particle::{ParticleState, SpawnRegion};

/// Vertical coordinate below which a particle expires and is respawned.
pub const DEADLINE: f32 = 0.0;

/// Advances a [`ParticleState`] once per frame.
///
/// Keeps the timestamp of the previous call so callers only pass the current
/// clock reading. The baseline starts at zero, so the first call integrates
/// over everything that elapsed since the clock started.
#[derive(Debug, Clone)]
pub struct Integrator {
    previous_time: f32,
    deadline: f32,
    spawn_region: SpawnRegion,
}

impl Integrator {
    pub fn new() -> Self {
        Self {
            previous_time: 0.0,
            deadline: DEADLINE,
            spawn_region: SpawnRegion::default(),
        }
    }

    /// Use a different respawn boundary.
    pub fn with_deadline(mut self, deadline: f32) -> Self {
        self.deadline = deadline;
        self
    }

    /// Use a different respawn region.
    pub fn with_spawn_region(mut self, region: SpawnRegion) -> Self {
        self.spawn_region = region;
        self
    }

    pub fn deadline(&self) -> f32 {
        self.deadline
    }

    pub fn spawn_region(&self) -> &SpawnRegion {
        &self.spawn_region
    }

    /// Timestamp seen by the last [`advance`](Self::advance) call.
    pub fn previous_time(&self) -> f32 {
        self.previous_time
    }

    /// Integrate from the previous call up to `now` (seconds).
    ///
    /// Returns the step that was applied.
    pub fn advance<const N: usize, R: Rng>(
        &mut self,
        state: &mut ParticleState<N>,
        now: f32,
        gravity: f32,
        rng: &mut R,
    ) -> f32 {
        let delta = now - self.previous_time;
        self.previous_time = now;
        self.step(state, delta, gravity, rng);
        delta
    }

    /// Integrate every particle over a fixed `delta`.
    ///
    /// A gravity of exactly zero freezes the pool. The position buffer is
    /// rewritten afterwards in every case.
    pub fn step<const N: usize, R: Rng>(
        &self,
        state: &mut ParticleState<N>,
        delta: f32,
        gravity: f32,
        rng: &mut R,
    ) {
        if gravity != 0.0 {
            let acceleration = Vec3::new(-gravity, gravity, 0.0);

            for particle in state.particles_mut().iter_mut() {
                particle.velocity += acceleration * delta;
                particle.position -= particle.velocity * delta * 0.5;

                if particle.position.y < self.deadline {
                    *particle = self.spawn_region.spawn(rng);
                }
            }
        }

        state.sync_positions();
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::{Particle, MAX_PARTICLES};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn spawned_state(seed: u64) -> (ParticleState, SmallRng) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let state = ParticleState::spawn(&SpawnRegion::default(), &mut rng);
        (state, rng)
    }

    fn assert_buffer_synced<const N: usize>(state: &ParticleState<N>) {
        for (i, (p, slot)) in state.particles().iter().zip(state.positions()).enumerate() {
            assert_eq!(p.position.to_array(), *slot, "buffer out of sync at {}", i);
        }
    }

    #[test]
    fn test_zero_gravity_freezes_pool() {
        let (mut state, mut rng) = spawned_state(11);
        let before = state.clone();

        let integrator = Integrator::new();
        integrator.step(&mut state, 0.5, 0.0, &mut rng);
        integrator.step(&mut state, 3.0, 0.0, &mut rng);

        assert_eq!(state, before);
    }

    #[test]
    fn test_unit_step_arithmetic() {
        let start = Particle::new(Vec3::new(-0.005, 0.002, 0.0), Vec3::new(1.5, 30.0, 0.25));
        let mut state = ParticleState::from_particles([start]);
        let mut rng = SmallRng::seed_from_u64(0);

        let g = 2.5;
        Integrator::new().step(&mut state, 1.0, g, &mut rng);

        let expected_velocity = start.velocity + Vec3::new(-g, g, 0.0);
        let expected_position = start.position - expected_velocity * 0.5;
        let p = state.particles()[0];
        assert_eq!(p.velocity, expected_velocity);
        assert_eq!(p.position, expected_position);
    }

    #[test]
    fn test_velocity_change_for_scenario_step() {
        let (mut state, mut rng) = spawned_state(12);
        let before = *state.particles();

        Integrator::new().step(&mut state, 0.1, 2.5, &mut rng);

        assert_eq!(state.len(), MAX_PARTICLES);
        for (old, new) in before.iter().zip(state.particles()) {
            assert!((new.velocity.x - (old.velocity.x - 0.25)).abs() < 1e-6);
            assert!((new.velocity.y - (old.velocity.y + 0.25)).abs() < 1e-6);
            assert_eq!(new.velocity.z, 0.0);
        }
    }

    #[test]
    fn test_particles_below_deadline_respawn() {
        // Strong upward velocity pushes position down past the deadline.
        let falling = Particle::new(Vec3::new(0.0, 10.0, 0.0), Vec3::new(1.0, 0.1, 0.0));
        let steady = Particle::new(Vec3::ZERO, Vec3::new(1.0, 3.0, 0.0));
        let mut state = ParticleState::from_particles([falling, steady, falling]);
        let mut rng = SmallRng::seed_from_u64(13);

        let integrator = Integrator::new();
        integrator.step(&mut state, 0.1, 1.0, &mut rng);

        let region = SpawnRegion::default();
        for i in [0, 2] {
            let p = state.particles()[i];
            assert!(region.contains(&p), "particle {} not respawned: {:?}", i, p);
            assert!((2.0..=4.0).contains(&p.position.y));
            assert!((1.0..=2.0).contains(&p.position.x));
            assert!((-0.01..=-0.001).contains(&p.velocity.x));
        }
        assert!(state.particles()[1].position.y > DEADLINE);
        assert_buffer_synced(&state);
    }

    #[test]
    fn test_buffer_synced_after_every_pass() {
        let (mut state, mut rng) = spawned_state(14);
        let mut integrator = Integrator::new();

        let mut now = 0.0;
        for _ in 0..200 {
            now += 0.05;
            integrator.advance(&mut state, now, 5.0, &mut rng);
            assert_buffer_synced(&state);
            for p in state.particles() {
                assert!(p.position.y >= DEADLINE);
            }
        }
    }

    #[test]
    fn test_advance_measures_from_zero_baseline() {
        let (mut state, mut rng) = spawned_state(15);
        let mut integrator = Integrator::new();

        let first = integrator.advance(&mut state, 1.25, 0.0, &mut rng);
        assert_eq!(first, 1.25);

        let second = integrator.advance(&mut state, 1.5, 0.0, &mut rng);
        assert_eq!(second, 0.25);
        assert_eq!(integrator.previous_time(), 1.5);
    }

    #[test]
    fn test_custom_deadline() {
        let p = Particle::new(Vec3::ZERO, Vec3::new(1.5, 1.0, 0.0));
        let mut state = ParticleState::from_particles([p]);
        let mut rng = SmallRng::seed_from_u64(16);

        // Nothing moves much, but y=1.0 already sits under a deadline of 1.5.
        Integrator::new()
            .with_deadline(1.5)
            .step(&mut state, 0.01, 1.0, &mut rng);

        assert!(state.particles()[0].position.y >= 2.0);
    }
}
