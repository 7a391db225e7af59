//! Server configuration
//!
//! Read once at startup from the environment. All three variables are
//! required; nothing has a default. A `.env` file may supply any of them;
//! variables already set in the process environment win over the file.

use crate::error::ConfigError;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Listener port
pub const PORT_VAR: &str = "WS_PORT";
/// Events per second per connection
pub const RATE_VAR: &str = "MESSAGES_PER_SECOND";
/// Exclusive upper bound for generated ids and values
pub const ITEMS_VAR: &str = "NUM_ITEMS";

/// Typed server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Port for the WebSocket listener (0 picks a free port)
    pub port: u16,
    /// Events emitted per second on each ready connection
    pub messages_per_second: f64,
    /// Ids and values are drawn from `0..num_items`
    pub num_items: NonZeroU32,
}

impl ServerConfig {
    /// Create and validate a configuration
    ///
    /// # Errors
    /// `ConfigError::Invalid` if the rate is not a finite positive number
    /// with a representable period
    pub fn new(
        port: u16,
        messages_per_second: f64,
        num_items: NonZeroU32,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            port,
            messages_per_second,
            num_items,
        };
        config.period()?;
        Ok(config)
    }

    /// Read `WS_PORT`, `MESSAGES_PER_SECOND` and `NUM_ITEMS` from the process environment
    ///
    /// # Errors
    /// See [`from_lookup`](Self::from_lookup)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the process environment, falling back to `env_file` for unset
    /// variables
    ///
    /// A missing file is not an error.
    ///
    /// # Errors
    /// - `ConfigError::EnvFile` if the file exists but cannot be parsed
    /// - otherwise as [`from_lookup`](Self::from_lookup)
    pub fn from_env_with_file(env_file: &Path) -> Result<Self, ConfigError> {
        Self::from_file_and_lookup(env_file, |var| std::env::var(var).ok())
    }

    /// Like [`from_env_with_file`](Self::from_env_with_file) over any
    /// variable source
    ///
    /// # Errors
    /// See [`from_env_with_file`](Self::from_env_with_file)
    pub fn from_file_and_lookup<F>(env_file: &Path, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = read_env_file(env_file)?;
        Self::from_lookup(|var| lookup(var).or_else(|| file.get(var).cloned()))
    }

    /// Build from any variable source
    ///
    /// # Errors
    /// - `ConfigError::Missing` for an unset variable
    /// - `ConfigError::Invalid` for an unparsable or out-of-range value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = parse_var(&lookup, PORT_VAR, "expected a port number (0-65535)")?;
        let messages_per_second: f64 = parse_var(&lookup, RATE_VAR, "expected a number")?;
        let num_items: u32 = parse_var(&lookup, ITEMS_VAR, "expected a non-negative integer")?;
        let num_items = NonZeroU32::new(num_items)
            .ok_or_else(|| ConfigError::invalid(ITEMS_VAR, "0", "must be at least 1"))?;

        Self::new(port, messages_per_second, num_items)
    }

    /// With listener port
    #[inline]
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Time between the starts of two successive ticks
    #[must_use]
    pub fn tick_period(&self) -> Duration {
        // validated at construction
        self.period().unwrap_or(Duration::from_secs(1))
    }

    fn period(&self) -> Result<Duration, ConfigError> {
        let rate = self.messages_per_second;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(ConfigError::invalid(
                RATE_VAR,
                rate.to_string(),
                "must be a positive number",
            ));
        }
        Duration::try_from_secs_f64(1.0 / rate)
            .ok()
            .filter(|period| !period.is_zero())
            .ok_or_else(|| ConfigError::invalid(RATE_VAR, rate.to_string(), "period out of range"))
    }
}

/// Parse `KEY=VALUE` pairs from a dotenv file; empty if the file is absent
fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let env_error = |err: dotenvy::Error| ConfigError::EnvFile {
        path: path.display().to_string(),
        reason: err.to_string(),
    };

    match dotenvy::from_path_iter(path) {
        Ok(pairs) => pairs.collect::<Result<_, _>>().map_err(env_error),
        Err(err) if err.not_found() => {
            tracing::debug!("No env file at {}", path.display());
            Ok(HashMap::new())
        }
        Err(err) => Err(env_error(err)),
    }
}

/// Look up a required variable and parse it
fn parse_var<T, F>(lookup: &F, var: &'static str, reason: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(var).ok_or(ConfigError::Missing(var))?;
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::invalid(var, raw.as_str(), reason))
}
