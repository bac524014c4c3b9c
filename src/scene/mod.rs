//! The ground the combat world walks on.
//!
//! Rolling hills built from a few layered sine waves. Cheap to sample every
//! frame for every monster and deterministic for a given layer set.
use crate::*;
use emberglade_shared::Terrain;

pub fn plugin(app: &mut App) {
    app.init_resource::<Ground>();
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    pub amplitude: f32,
    /// Radians per world unit along x and z.
    pub frequency: Vec2,
    pub phase: f32,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Ground {
    pub base: f32,
    pub layers: Vec<Wave>,
}

impl Default for Ground {
    fn default() -> Self {
        Self {
            base: 0.0,
            layers: vec![
                Wave {
                    amplitude: 2.0,
                    frequency: Vec2::new(0.05, 0.04),
                    phase: 0.0,
                },
                Wave {
                    amplitude: 0.6,
                    frequency: Vec2::new(0.17, -0.13),
                    phase: 1.3,
                },
                Wave {
                    amplitude: 0.15,
                    frequency: Vec2::new(0.61, 0.47),
                    phase: 2.1,
                },
            ],
        }
    }
}

impl Ground {
    pub fn flat(base: f32) -> Self {
        Self {
            base,
            layers: Vec::new(),
        }
    }

    /// Upper bound of how far the ground strays from `base`.
    pub fn relief(&self) -> f32 {
        self.layers.iter().map(|w| w.amplitude.abs()).sum()
    }
}

impl Terrain for Ground {
    fn height(&self, x: f32, z: f32) -> f32 {
        self.base
            + self
                .layers
                .iter()
                .map(|w| w.amplitude * (w.frequency.x * x + w.frequency.y * z + w.phase).sin())
                .sum::<f32>()
    }
}
