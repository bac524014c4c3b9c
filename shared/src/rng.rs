//! Seeded session RNG.
//!
//! Same seed → same spawns and wander paths, which keeps tests and replays
//! deterministic.

use glam::Vec2;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::f32::consts::TAU;

#[derive(Clone, Debug)]
pub struct SimRng(StdRng);

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Uniform in `[0, 1)`.
    pub fn roll(&mut self) -> f32 {
        self.0.random::<f32>()
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn pick(&mut self, len: usize) -> usize {
        self.0.random_range(0..len)
    }

    /// Uniformly distributed point inside a disc of `radius`.
    pub fn point_in_disc(&mut self, radius: f32) -> Vec2 {
        let angle = self.0.random_range(0.0..TAU);
        let r = radius * self.roll().sqrt();
        Vec2::from_angle(angle) * r
    }

    /// Point in the annulus `[min, max]` around the origin.
    pub fn point_in_ring(&mut self, min: f32, max: f32) -> Vec2 {
        let angle = self.0.random_range(0.0..TAU);
        let r = if max > min {
            self.0.random_range(min..max)
        } else {
            min
        };
        Vec2::from_angle(angle) * r
    }
}
