//! Event channels and the wiring checker used by tests.
//!
//! # Design Decisions
//! - Each observable object owns one `EventChannel` per event it raises
//! - Objects describe their channels through `Observable` (usually derived
//!   with `observable!`) instead of runtime reflection
//! - `check_events` is call-scoped and holds no shared state

pub mod channel;
pub mod checker;

pub use channel::{EventChannel, SubscriptionId, Subscribers};
pub use checker::{check_events, first_unwired, Observable};
