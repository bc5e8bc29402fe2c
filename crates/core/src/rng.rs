//! RNG module - owned piece sources
//!
//! Piece selection is uniform per spawn: every draw picks one of the seven
//! kinds independently, with no bag and no repeat protection. The source is an
//! explicit value owned by the session, so tests can seed it or swap in a
//! scripted sequence.
//!
//! Also provides a simple LCG for deterministic play.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    seed: u32,
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { seed, state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits, which have a much longer period than the low bits
    /// of a power-of-two LCG.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

/// Supplies the kind of each newly created piece
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

impl<S: PieceSource + ?Sized> PieceSource for &mut S {
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }
}

/// Uniform random selection over the seven kinds
///
/// Each draw consumes exactly one value from the generator.
#[derive(Debug, Clone)]
pub struct UniformPieces {
    rng: SimpleRng,
}

impl UniformPieces {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.rng.seed()
    }
}

impl Default for UniformPieces {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for UniformPieces {
    fn next_kind(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }
}

/// Replays a fixed list of kinds, wrapping around at the end
///
/// Intended for tests and demos that need exact control over spawns.
#[derive(Debug, Clone)]
pub struct ScriptedPieces {
    kinds: Vec<PieceKind>,
    pos: usize,
}

impl ScriptedPieces {
    /// Create a script; an empty list yields `I` forever
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        Self {
            kinds: kinds.into(),
            pos: 0,
        }
    }

    /// Script that always produces `kind`
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new(vec![kind])
    }

    /// Number of kinds handed out so far
    pub fn drawn(&self) -> usize {
        self.pos
    }
}

impl PieceSource for ScriptedPieces {
    fn next_kind(&mut self) -> PieceKind {
        if self.kinds.is_empty() {
            return PieceKind::I;
        }
        let kind = self.kinds[self.pos % self.kinds.len()];
        self.pos += 1;
        kind
    }
}
