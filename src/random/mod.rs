//! Randomness for game code and tests.
//!
//! # Design Decisions
//! - One lazily seeded generator per process, reachable via
//!   `PrngService::instance()`
//! - Draws are serialized by a mutex around the generator
//! - Seeded, detached services reproduce a sequence exactly

pub mod prng;

pub use prng::{InvalidArgument, PrngService};
