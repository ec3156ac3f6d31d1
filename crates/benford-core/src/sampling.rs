//! Inverse-CDF sampling from a [`Benford`] distribution.
//!
//! The generator is always supplied by the caller so a fixed seed reproduces
//! the same digit sequence. [`SharedSampler`] serialises access when one
//! stream must be shared between threads.

use std::sync::Mutex;

use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::distribution::Benford;
use crate::types::Digit;

impl Benford {
    /// Draws one leading digit using `rng` as the uniform source.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Digit {
        let p: f64 = rng.gen();
        self.inverse_cdf(p)
    }

    /// Draws one leading digit from the thread-local default generator.
    pub fn sample_default(&self) -> Digit {
        self.sample(&mut rand::thread_rng())
    }

    /// Draws `n` leading digits from `rng`.
    pub fn sample_n<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<Digit> {
        let cdf = self.full_cdf();
        let fallback = self.base() - 1;
        let digits = (0..n)
            .map(|_| {
                let p: f64 = rng.gen();
                cdf.iter()
                    .position(|c| p < *c)
                    .map_or(fallback, |i| i as Digit + 1)
            })
            .collect();
        tracing::debug!(base = self.base(), n, "drew benford sample batch");
        digits
    }
}

impl Distribution<Digit> for Benford {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Digit {
        self.inverse_cdf(rng.gen())
    }
}

/// A seeded generator that several threads can draw from in turn.
#[derive(Debug)]
pub struct SharedSampler {
    rng: Mutex<StdRng>,
}

impl SharedSampler {
    pub fn seeded(seed: u64) -> Self {
        SharedSampler {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        SharedSampler {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Draws one digit, holding the lock for the whole draw.
    pub fn draw(&self, model: &Benford) -> Digit {
        // A poisoned lock still holds a usable generator state.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        model.sample(&mut *rng)
    }

    /// Draws `n` digits under a single lock acquisition.
    pub fn draw_n(&self, model: &Benford, n: usize) -> Vec<Digit> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        model.sample_n(&mut *rng, n)
    }
}
