//! Ground height collaborator.

/// Anything that can answer "how high is the ground at (x, z)".
pub trait Terrain {
    fn height(&self, x: f32, z: f32) -> f32;
}

impl<F> Terrain for F
where
    F: Fn(f32, f32) -> f32,
{
    fn height(&self, x: f32, z: f32) -> f32 {
        self(x, z)
    }
}

/// Level ground at a fixed height.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlatTerrain(pub f32);

impl Terrain for FlatTerrain {
    fn height(&self, _x: f32, _z: f32) -> f32 {
        self.0
    }
}
