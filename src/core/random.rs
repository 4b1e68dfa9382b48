// src/core/random.rs
//! Short random suffixes for output and asset filenames.
//!
//! Kept behind `SuffixSource` so callers (and tests) can pin the sequence.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub trait SuffixSource: Send + Sync {
    /// `len` characters drawn from [`LETTERS`].
    fn suffix(&self, len: usize) -> String;
}

/// Process randomness; each call uses the calling thread's generator.
pub struct ThreadRandom;

impl SuffixSource for ThreadRandom {
    fn suffix(&self, len: usize) -> String {
        draw(&mut rand::rng(), len)
    }
}

/// Reproducible sequence from a fixed seed.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }
}

impl SuffixSource for SeededRandom {
    fn suffix(&self, len: usize) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        draw(&mut *rng, len)
    }
}

fn draw<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| LETTERS[rng.random_range(0..LETTERS.len())] as char)
        .collect()
}
