//! RNG module - piece selection
//!
//! Every spawn picks one of the seven kinds uniformly at random, with no bag
//! and no repeat protection. A small seeded LCG keeps games reproducible for
//! tests and headless runs.
//!
//! [`PieceSource`] is the seam the engine draws from; [`ScriptedSource`]
//! plays a fixed sequence instead.

use crate::error::EngineError;
use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform value in `[0, max)`. `max` must be non-zero.
    ///
    /// Draws that fall in the final partial block of `u32` are rejected so
    /// every residue is equally likely.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        let max = max.max(1);
        let zone = u32::MAX - (u32::MAX % max);
        loop {
            let v = self.next_u32();
            if v < zone {
                return v % max;
            }
        }
    }
}

/// Supplier of the next piece kind.
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

/// Uniform choice over all seven kinds.
#[derive(Debug, Clone)]
pub struct UniformSource {
    rng: SimpleRng,
}

impl UniformSource {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl Default for UniformSource {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for UniformSource {
    fn next_kind(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }
}

/// Cycles through a fixed list of kinds.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: Vec<PieceKind>,
    pos: usize,
}

impl ScriptedSource {
    pub fn new(script: impl Into<Vec<PieceKind>>) -> Result<Self, EngineError> {
        let script = script.into();
        if script.is_empty() {
            return Err(EngineError::EmptyScript);
        }
        Ok(Self { script, pos: 0 })
    }

    /// Same kind forever.
    pub fn repeat(kind: PieceKind) -> Self {
        Self {
            script: vec![kind],
            pos: 0,
        }
    }
}

impl PieceSource for ScriptedSource {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.script[self.pos];
        self.pos = (self.pos + 1) % self.script.len();
        kind
    }
}

impl<S: PieceSource + ?Sized> PieceSource for Box<S> {
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_zero_seed_is_remapped() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in [1, 2, 7, 10, 1000] {
            for _ in 0..200 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn uniform_source_hits_every_kind_evenly() {
        let mut source = UniformSource::new(12345);
        let mut counts = [0u32; 7];
        let draws = 70_000;
        for _ in 0..draws {
            counts[source.next_kind().index()] += 1;
        }
        let expected = draws / 7;
        for (i, &n) in counts.iter().enumerate() {
            let diff = n.abs_diff(expected);
            assert!(diff < expected / 10, "kind {} drawn {} times", i, n);
        }
    }

    #[test]
    fn uniform_source_allows_repeats() {
        let mut source = UniformSource::new(99);
        let draws: Vec<_> = (0..200).map(|_| source.next_kind()).collect();
        assert!(draws.windows(2).any(|w| w[0] == w[1]));
    }

    #[test]
    fn scripted_source_cycles() {
        let mut source = ScriptedSource::new([PieceKind::I, PieceKind::O]).unwrap();
        assert_eq!(source.next_kind(), PieceKind::I);
        assert_eq!(source.next_kind(), PieceKind::O);
        assert_eq!(source.next_kind(), PieceKind::I);
    }

    #[test]
    fn scripted_source_rejects_empty_script() {
        assert_eq!(
            ScriptedSource::new(Vec::new()).unwrap_err(),
            EngineError::EmptyScript
        );
    }
}
