//! Shape selection - which piece spawns next
//!
//! Production play draws uniformly over the seven shapes. Tests and replays
//! plug in a [`SequenceSelector`] to get a fixed, repeating order.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

/// Source of the next shape to spawn.
pub trait ShapeSelector {
    fn next_shape(&mut self) -> PieceKind;
}

/// Uniform draw over all seven shapes
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic stream for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeSelector for RandomSelector {
    fn next_shape(&mut self) -> PieceKind {
        let index = self.rng.gen_range(0..PieceKind::ALL.len());
        PieceKind::ALL[index]
    }
}

/// Cycles through a fixed list of shapes.
#[derive(Debug, Clone)]
pub struct SequenceSelector {
    shapes: Vec<PieceKind>,
    index: usize,
}

impl SequenceSelector {
    /// # Panics
    ///
    /// Panics if `shapes` is empty.
    pub fn new(shapes: impl Into<Vec<PieceKind>>) -> Self {
        let shapes = shapes.into();
        assert!(!shapes.is_empty(), "SequenceSelector needs at least one shape");
        Self { shapes, index: 0 }
    }

    /// Always the same shape.
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new(vec![kind])
    }
}

impl ShapeSelector for SequenceSelector {
    fn next_shape(&mut self) -> PieceKind {
        let kind = self.shapes[self.index];
        self.index = (self.index + 1) % self.shapes.len();
        kind
    }
}

impl<S: ShapeSelector + ?Sized> ShapeSelector for Box<S> {
    fn next_shape(&mut self) -> PieceKind {
        (**self).next_shape()
    }
}
