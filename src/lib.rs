mod config;
mod csv_utils;
mod dto;
mod engine;
mod error;
mod runner;
mod service;
pub mod stores;

pub use config::{ConfigError, StoreConfig, DEFAULT_BUCKETS};
pub use dto::{Command, CommandType, Outcome, OutcomeRow};
pub use engine::Engine;
pub use error::Error;
pub use runner::{run, run_async};
pub use service::{AccountService, DriverId, RiderId};
