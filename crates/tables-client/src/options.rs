//! Client options
//!
//! Same three knobs whether they come from a URL query string or from CLI
//! flags: `data` (table size), `refresh` (batched repaint period in ms) and
//! `sort` (`yes` selects batched-sorted mode). Out-of-range values are logged
//! and ignored, leaving the default in place.

use std::time::Duration;
use tables_core::{DisplayMode, MAX_ROWS};

/// Upper bound for `refresh`, in milliseconds
pub const MAX_REFRESH_MS: u64 = 60_000;

/// Default table size
pub const DEFAULT_DATA_SIZE: usize = 1000;

/// Default refresh period
pub const DEFAULT_REFRESH: Duration = Duration::from_millis(1000);

/// Typed client options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientOptions {
    /// Rows to seed (1..=5000)
    pub data_size: usize,
    /// Batched repaint period as given (0..=60000 ms)
    pub refresh: Duration,
    /// Repaint policy
    pub mode: DisplayMode,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            data_size: DEFAULT_DATA_SIZE,
            refresh: DEFAULT_REFRESH,
            mode: DisplayMode::Immediate,
        }
    }
}

impl ClientOptions {
    /// Parse a query string such as `?data=100&sort=yes`
    ///
    /// Unknown keys are ignored; when a key repeats, the last valid value wins.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut options = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            options.apply(&key, &value);
        }
        options
    }

    /// Apply one `key=value` override
    ///
    /// Returns whether the value was accepted.
    pub fn apply(&mut self, key: &str, value: &str) -> bool {
        match key {
            "data" => match value.trim().parse::<usize>() {
                Ok(size) if (1..=MAX_ROWS).contains(&size) => {
                    self.data_size = size;
                    tracing::info!("Table size overridden: {}", size);
                    true
                }
                _ => {
                    tracing::warn!("Ignoring data={} (expected 1..={})", value, MAX_ROWS);
                    false
                }
            },
            "refresh" => match value.trim().parse::<u64>() {
                Ok(ms) if ms <= MAX_REFRESH_MS => {
                    self.refresh = Duration::from_millis(ms);
                    tracing::info!("Refresh period overridden: {}ms", ms);
                    true
                }
                _ => {
                    tracing::warn!("Ignoring refresh={} (expected 0..={})", value, MAX_REFRESH_MS);
                    false
                }
            },
            "sort" => {
                if value == "yes" {
                    self.mode = DisplayMode::BatchedSorted;
                    true
                } else {
                    tracing::debug!("sort={} leaves immediate mode", value);
                    false
                }
            }
            _ => {
                tracing::debug!("Ignoring unknown option {}", key);
                false
            }
        }
    }

    /// Period for the batched refresh timer, at least 1ms
    #[must_use]
    pub fn refresh_period(&self) -> Duration {
        self.refresh.max(Duration::from_millis(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_without_query() {
        assert_eq!(ClientOptions::from_query(""), ClientOptions::default());
        assert_eq!(ClientOptions::from_query("?"), ClientOptions::default());

        let options = ClientOptions::default();
        assert_eq!(options.data_size, 1000);
        assert_eq!(options.refresh, Duration::from_millis(1000));
        assert_eq!(options.mode, DisplayMode::Immediate);
    }

    #[test]
    fn parses_all_three_options() {
        let options = ClientOptions::from_query("?data=100&refresh=250&sort=yes");
        assert_eq!(
            options,
            ClientOptions {
                data_size: 100,
                refresh: Duration::from_millis(250),
                mode: DisplayMode::BatchedSorted,
            }
        );
    }

    #[test]
    fn out_of_range_values_are_ignored() {
        for query in ["data=0", "data=5001", "data=-5", "data=lots", "data="] {
            assert_eq!(ClientOptions::from_query(query).data_size, 1000, "{query}");
        }
        for query in ["refresh=60001", "refresh=-1", "refresh=soon"] {
            assert_eq!(
                ClientOptions::from_query(query).refresh,
                DEFAULT_REFRESH,
                "{query}"
            );
        }
        for query in ["sort=no", "sort=YES", "sort=1"] {
            assert_eq!(
                ClientOptions::from_query(query).mode,
                DisplayMode::Immediate,
                "{query}"
            );
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(ClientOptions::from_query("data=1").data_size, 1);
        assert_eq!(ClientOptions::from_query("data=5000").data_size, 5000);
        assert_eq!(
            ClientOptions::from_query("refresh=60000").refresh,
            Duration::from_secs(60)
        );
    }

    #[test]
    fn zero_refresh_is_clamped_for_the_timer() {
        let options = ClientOptions::from_query("refresh=0&sort=yes");
        assert_eq!(options.refresh, Duration::ZERO);
        assert_eq!(options.refresh_period(), Duration::from_millis(1));
    }

    #[test]
    fn last_valid_value_wins() {
        let options = ClientOptions::from_query("data=100&data=250&data=9999");
        assert_eq!(options.data_size, 250);
    }

    #[test]
    fn apply_reports_acceptance() {
        let mut options = ClientOptions::default();
        assert!(options.apply("data", "42"));
        assert!(!options.apply("data", "0"));
        assert!(!options.apply("colour", "blue"));
        assert_eq!(options.data_size, 42);
    }
}
