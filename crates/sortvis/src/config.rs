//! Visualizer configuration.

use std::net::SocketAddr;

use sortvis_engine::{AlgorithmId, MAX_ARRAY_SIZE, MIN_ARRAY_SIZE};

use crate::error::{Error, Result};
use crate::playback::{Speed, DEFAULT_ARRAY_SIZE};

/// Configuration for the visualizer session and server.
#[derive(Debug, Clone, PartialEq)]
pub struct VisConfig {
    /// HTTP listen address
    pub addr: SocketAddr,
    /// Initial array size
    pub array_size: usize,
    /// Initial animation speed
    pub speed: Speed,
    /// Initially selected algorithm
    pub algorithm: AlgorithmId,
    /// Seed for reproducible arrays (random when unset)
    pub seed: Option<u64>,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            array_size: DEFAULT_ARRAY_SIZE,
            speed: Speed::default(),
            algorithm: AlgorithmId::default(),
            seed: None,
        }
    }
}

impl VisConfig {
    /// Read configuration from `SORTVIS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, falling back to
    /// defaults for missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup("SORTVIS_ADDR") {
            config.addr = parse("SORTVIS_ADDR", &addr)?;
        }
        if let Some(size) = lookup("SORTVIS_ARRAY_SIZE") {
            config.array_size = parse("SORTVIS_ARRAY_SIZE", &size)?;
        }
        if let Some(speed) = lookup("SORTVIS_SPEED") {
            config.speed = Speed::new(parse("SORTVIS_SPEED", &speed)?);
        }
        if let Some(algorithm) = lookup("SORTVIS_ALGORITHM") {
            config.algorithm = parse("SORTVIS_ALGORITHM", &algorithm)?;
        }
        if let Some(seed) = lookup("SORTVIS_SEED") {
            config.seed = Some(parse("SORTVIS_SEED", &seed)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply positional command-line overrides: `[port] [array-size]`.
    pub fn with_args<I, S>(mut self, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();
        if let Some(port) = args.next() {
            self.addr.set_port(parse("port", port.as_ref())?);
        }
        if let Some(size) = args.next() {
            self.array_size = parse("array size", size.as_ref())?;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if !(MIN_ARRAY_SIZE..=MAX_ARRAY_SIZE).contains(&self.array_size) {
            return Err(Error::Config(format!(
                "array size {} must be between {} and {}",
                self.array_size, MIN_ARRAY_SIZE, MAX_ARRAY_SIZE
            )));
        }
        Ok(())
    }
}

fn parse<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("invalid {}={:?}: {}", key, value, e)))
}
