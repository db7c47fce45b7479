//! Shared pseudo-random source.

use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::config::RandomConfig;

static INSTANCE: OnceLock<PrngService> = OnceLock::new();

/// Bounds rejected by a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    #[error("max must be non-negative, got {0}")]
    NegativeMax(i32),

    #[error("min ({min}) must not exceed max ({max})")]
    MinAboveMax { min: i32, max: i32 },
}

/// Pseudo-random generator shared across the process.
///
/// Not cryptographically secure. Every draw takes the generator lock, so
/// concurrent callers are serialized rather than racing on generator state.
#[derive(Debug)]
pub struct PrngService {
    rng: Mutex<StdRng>,
}

impl PrngService {
    /// The process-wide service, seeded from OS entropy on first access.
    pub fn instance() -> &'static PrngService {
        INSTANCE.get_or_init(|| {
            tracing::debug!("Seeding process-wide PRNG from entropy");
            Self::from_rng(StdRng::from_entropy())
        })
    }

    /// A detached service with a fixed seed, for replays and tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    /// A detached service honouring `config.seed`; entropy-seeded without one.
    pub fn from_config(config: &RandomConfig) -> Self {
        match config.seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::from_rng(StdRng::from_entropy()),
        }
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Non-negative value in `[0, i32::MAX)`.
    pub fn next(&self) -> i32 {
        self.lock().gen_range(0..i32::MAX)
    }

    /// Value in `[0, max)`. `max == 0` yields 0.
    pub fn next_below(&self, max: i32) -> Result<i32, InvalidArgument> {
        if max < 0 {
            return Err(InvalidArgument::NegativeMax(max));
        }
        self.next_in(0, max)
    }

    /// Value in `[min, max)`. `min == max` yields `min`.
    pub fn next_in(&self, min: i32, max: i32) -> Result<i32, InvalidArgument> {
        if min > max {
            return Err(InvalidArgument::MinAboveMax { min, max });
        }
        if min == max {
            return Ok(min);
        }
        Ok(self.lock().gen_range(min..max))
    }

    fn lock(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
