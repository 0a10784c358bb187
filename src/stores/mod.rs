//! Storage layer for the ride store. Provides storage for:
//! - Rider and driver accounts keyed by username ([`AccountDirectory`])
//! - Per-rider ride history ([`RideLog`])
//!
//! Everything is in memory, owned by a single caller and accessed
//! synchronously.

mod accounts;
mod directory;
mod ride_log;

pub use accounts::{Credentials, Driver, Rider};
pub use directory::{bucket_index, AccountDirectory, AccountId};
pub use ride_log::{Backward, Forward, Ride, RideLog};
