//! Store sizing. Read from an optional TOML file, then overridden by
//! `RUSTY_RIDES_*` environment variables.

use std::env;
use std::num::{NonZeroUsize, ParseIntError};
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

pub const DEFAULT_BUCKETS: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

const RIDER_BUCKETS_VAR: &str = "RUSTY_RIDES_RIDER_BUCKETS";
const DRIVER_BUCKETS_VAR: &str = "RUSTY_RIDES_DRIVER_BUCKETS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub rider_buckets: NonZeroUsize,
    pub driver_buckets: NonZeroUsize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            rider_buckets: DEFAULT_BUCKETS,
            driver_buckets: DEFAULT_BUCKETS,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
    #[error("failed to parse `{var}` as a non-zero bucket count: {source}")]
    ParseEnv {
        var: &'static str,
        source: ParseIntError,
    },
}

impl StoreConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Builds the config from `path` (if any) and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                info!("parsing config file at `{}`", path.display());
                Self::from_toml_str(&std::fs::read_to_string(path)?)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|var| env::var(var).ok())?;
        Ok(config)
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        if let Some(n) = parse_override(RIDER_BUCKETS_VAR, &lookup)? {
            self.rider_buckets = n;
        }
        if let Some(n) = parse_override(DRIVER_BUCKETS_VAR, &lookup)? {
            self.driver_buckets = n;
        }
        Ok(())
    }
}

fn parse_override<F>(var: &'static str, lookup: &F) -> Result<Option<NonZeroUsize>, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    debug!("overriding bucket count from `{var}`");
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|source| ConfigError::ParseEnv { var, source })
}
