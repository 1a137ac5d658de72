//! Park-Miller Linear Congruential Generator (MINSTD)
//!
//! Every maze is reproducible from a `u32` seed: the same seed always
//! yields the same walls, start, and exit on every platform.
//!
//! Constants:
//! - Multiplier (a): 48271
//! - Modulus (m): 2^31 - 1 = 2147483647
//!
//! Reference: https://en.wikipedia.org/wiki/Lehmer_random_number_generator

const A: u64 = 48271;
const M: u64 = 2147483647; // 2^31 - 1

/// Source of uniform random indices.
///
/// The generator and episode setup only ever need "pick one of `len`
/// items", so that is the whole seam. Tests can plug in scripted sources.
pub trait RandomSource {
    /// Return an index in `[0, len)`. `len` is never zero.
    fn next_index(&mut self, len: usize) -> usize;
}

/// Park-Miller Linear Congruential Generator
///
/// Generates a deterministic sequence of pseudo-random numbers from a seed.
/// Same seed always produces the same sequence.
#[derive(Debug, Clone)]
pub struct SimpleLCG {
    state: u32,
}

impl SimpleLCG {
    /// Create a new LCG with the given seed
    ///
    /// If seed is 0, it's replaced with 1 to avoid degenerate sequence
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn advance(&mut self) {
        // u64 avoids overflow during multiplication
        self.state = ((self.state as u64 * A) % M) as u32;
    }

    /// Choose random index from a range [0, len)
    ///
    /// Uses pure integer arithmetic: (state * len) / M
    pub fn choice_index(&mut self, len: usize) -> usize {
        self.advance();
        let scaled = (self.state as u64 * len as u64) / M;
        scaled as usize
    }
}

impl RandomSource for SimpleLCG {
    fn next_index(&mut self, len: usize) -> usize {
        self.choice_index(len)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }
}
