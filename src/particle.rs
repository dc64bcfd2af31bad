//! Particle storage and the respawn generator.
//!
//! The pool has a fixed capacity: particles are never created or destroyed
//! after startup, only overwritten when they expire. A flat position buffer
//! mirrors the pool so the renderer can upload it without reshaping.

use glam::Vec3;
use rand::Rng;
use std::ops::RangeInclusive;

/// Number of particles in the default pool.
pub const MAX_PARTICLES: usize = 10;

/// A single simulated particle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Particle {
    pub velocity: Vec3,
    pub position: Vec3,
}

impl Particle {
    pub fn new(velocity: Vec3, position: Vec3) -> Self {
        Self { velocity, position }
    }
}

/// Ranges a freshly spawned particle is drawn from.
///
/// Every component is sampled uniformly and independently. Bounds may be
/// given in either order: `1.0..=-1.0` samples the same interval as
/// `-1.0..=1.0`. The default region sits just in front of the emitter frame and gives particles a slow
/// drift towards negative x and positive y.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRegion {
    /// Range of the x velocity component.
    pub velocity_x: RangeInclusive<f32>,
    /// Range of the y velocity component.
    pub velocity_y: RangeInclusive<f32>,
    /// Position ranges per axis.
    pub position: [RangeInclusive<f32>; 3],
}

impl Default for SpawnRegion {
    fn default() -> Self {
        Self {
            velocity_x: -0.01..=-0.001,
            velocity_y: 0.001..=0.01,
            position: [1.0..=2.0, 2.0..=4.0, -1.0..=1.0],
        }
    }
}

impl SpawnRegion {
    /// Draw a new particle from this region. Velocity z is always zero.
    pub fn spawn<R: Rng>(&self, rng: &mut R) -> Particle {
        let velocity = Vec3::new(
            sample(rng, &self.velocity_x),
            sample(rng, &self.velocity_y),
            0.0,
        );
        let [x, y, z] = &self.position;
        let position = Vec3::new(sample(rng, x), sample(rng, y), sample(rng, z));
        Particle { velocity, position }
    }

    /// Whether `particle` could have been produced by [`spawn`](Self::spawn).
    pub fn contains(&self, particle: &Particle) -> bool {
        let [x, y, z] = &self.position;
        within(&self.velocity_x, particle.velocity.x)
            && within(&self.velocity_y, particle.velocity.y)
            && particle.velocity.z == 0.0
            && within(x, particle.position.x)
            && within(y, particle.position.y)
            && within(z, particle.position.z)
    }
}

fn ordered(range: &RangeInclusive<f32>) -> (f32, f32) {
    let (a, b) = (*range.start(), *range.end());
    (a.min(b), a.max(b))
}

fn sample<R: Rng>(rng: &mut R, range: &RangeInclusive<f32>) -> f32 {
    let (lo, hi) = ordered(range);
    rng.gen_range(lo..=hi)
}

fn within(range: &RangeInclusive<f32>, value: f32) -> bool {
    let (lo, hi) = ordered(range);
    (lo..=hi).contains(&value)
}

/// Fixed-capacity particle pool with an upload-ready position mirror.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleState<const N: usize = MAX_PARTICLES> {
    particles: [Particle; N],
    positions: [[f32; 3]; N],
}

impl<const N: usize> ParticleState<N> {
    /// Build a pool from explicit particles. The position buffer is synced.
    pub fn from_particles(particles: [Particle; N]) -> Self {
        let mut state = Self {
            particles,
            positions: [[0.0; 3]; N],
        };
        state.sync_positions();
        state
    }

    /// Fill the pool by spawning every particle from `region`.
    pub fn spawn<R: Rng>(region: &SpawnRegion, rng: &mut R) -> Self {
        Self::from_particles(std::array::from_fn(|_| region.spawn(rng)))
    }

    /// Number of live particles. Always the pool capacity.
    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn particles(&self) -> &[Particle; N] {
        &self.particles
    }

    pub(crate) fn particles_mut(&mut self) -> &mut [Particle; N] {
        &mut self.particles
    }

    /// Flat position buffer, one `[x, y, z]` triple per particle.
    ///
    /// Only guaranteed to match the particles right after an integration
    /// pass or construction.
    pub fn positions(&self) -> &[[f32; 3]; N] {
        &self.positions
    }

    /// The position buffer as raw bytes for a GPU upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions[..])
    }

    /// Rewrite the whole position buffer from the particles.
    pub(crate) fn sync_positions(&mut self) {
        for (slot, particle) in self.positions.iter_mut().zip(self.particles.iter()) {
            *slot = particle.position.to_array();
        }
    }
}
