//! Process configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::aggregate::{AggregatorConfig, DEFAULT_FEED_TIMEOUT_SECS};
use crate::domain::FeedGroup;
use crate::feeds::{
    DEFAULT_BULK_TRANSIT_URL, DEFAULT_RAIL_FEED_URL, DEFAULT_SUBWAY_FEED_URL, FeedConfig,
};

/// Address the server listens on by default.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// How often the UI polls by default, in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 15;

/// Error from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set to something unusable
    #[error("invalid {var}={value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// `BIND_ADDR`
    pub bind_addr: SocketAddr,

    /// `BULK_TRANSIT_URL`
    pub bulk_transit_url: String,

    /// `RAIL_FEED_URL`
    pub rail_feed_url: String,

    /// `SUBWAY_FEED_URL`
    pub subway_feed_url: String,

    /// `POLL_INTERVAL_SECS`: advertised to clients, not used by the server.
    pub poll_interval_secs: u64,

    /// `FEED_TIMEOUT_SECS`: deadline for each upstream fetch.
    pub feed_timeout_secs: u64,

    /// `FIXTURE_DIR`: when set, feeds are read from files in this
    /// directory instead of upstream.
    pub fixture_dir: Option<PathBuf>,

    /// `LINE_TABLE_PATH`: when set, replaces the built-in line table.
    pub line_table_path: Option<PathBuf>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`. Unset and blank variables take
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind_addr = parse_var(
            "BIND_ADDR",
            get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        )?;
        let poll_interval_secs = parse_positive(
            "POLL_INTERVAL_SECS",
            get("POLL_INTERVAL_SECS"),
            DEFAULT_POLL_INTERVAL_SECS,
        )?;
        let feed_timeout_secs = parse_positive(
            "FEED_TIMEOUT_SECS",
            get("FEED_TIMEOUT_SECS"),
            DEFAULT_FEED_TIMEOUT_SECS,
        )?;

        Ok(Self {
            bind_addr,
            bulk_transit_url: get("BULK_TRANSIT_URL")
                .unwrap_or_else(|| DEFAULT_BULK_TRANSIT_URL.to_string()),
            rail_feed_url: get("RAIL_FEED_URL").unwrap_or_else(|| DEFAULT_RAIL_FEED_URL.to_string()),
            subway_feed_url: get("SUBWAY_FEED_URL")
                .unwrap_or_else(|| DEFAULT_SUBWAY_FEED_URL.to_string()),
            poll_interval_secs,
            feed_timeout_secs,
            fixture_dir: get("FIXTURE_DIR").map(PathBuf::from),
            line_table_path: get("LINE_TABLE_PATH").map(PathBuf::from),
        })
    }

    /// HTTP client settings for one feed.
    pub fn feed_config(&self, group: FeedGroup) -> FeedConfig {
        let url = match group {
            FeedGroup::BulkTransit => &self.bulk_transit_url,
            FeedGroup::Rail => &self.rail_feed_url,
            FeedGroup::Subway => &self.subway_feed_url,
        };
        FeedConfig::new(url.as_str()).with_timeout(self.feed_timeout_secs)
    }

    pub fn aggregator_config(&self) -> AggregatorConfig {
        AggregatorConfig::default().with_feed_timeout(Duration::from_secs(self.feed_timeout_secs))
    }
}

fn parse_var<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        reason: e.to_string(),
        value,
    })
}

fn parse_positive(
    var: &'static str,
    value: Option<String>,
    default: u64,
) -> Result<u64, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    match parse_var::<u64>(var, value.clone())? {
        0 => Err(ConfigError::Invalid {
            var,
            value,
            reason: "must be at least 1".to_string(),
        }),
        n => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.bulk_transit_url, DEFAULT_BULK_TRANSIT_URL);
        assert_eq!(config.rail_feed_url, DEFAULT_RAIL_FEED_URL);
        assert_eq!(config.subway_feed_url, DEFAULT_SUBWAY_FEED_URL);
        assert_eq!(config.poll_interval_secs, 15);
        assert_eq!(config.feed_timeout_secs, 10);
        assert_eq!(config.fixture_dir, None);
        assert_eq!(config.line_table_path, None);
    }

    #[test]
    fn overrides() {
        let config = load(&[
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("RAIL_FEED_URL", "http://localhost:9000/rail"),
            ("POLL_INTERVAL_SECS", "30"),
            ("FEED_TIMEOUT_SECS", " 4 "),
            ("FIXTURE_DIR", "data/fixtures"),
            ("LINE_TABLE_PATH", "/etc/lines.json"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.rail_feed_url, "http://localhost:9000/rail");
        assert_eq!(config.poll_interval_secs, 30);
        assert_eq!(config.feed_timeout_secs, 4);
        assert_eq!(config.fixture_dir, Some(PathBuf::from("data/fixtures")));
        assert_eq!(config.line_table_path, Some(PathBuf::from("/etc/lines.json")));
    }

    #[test]
    fn blank_values_take_defaults() {
        let config = load(&[("POLL_INTERVAL_SECS", "  "), ("FIXTURE_DIR", "")]).unwrap();
        assert_eq!(config.poll_interval_secs, 15);
        assert_eq!(config.fixture_dir, None);
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = load(&[("BIND_ADDR", "localhost")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "BIND_ADDR", .. }));

        let err = load(&[("FEED_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "FEED_TIMEOUT_SECS", .. }));

        let err = load(&[("POLL_INTERVAL_SECS", "0")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid POLL_INTERVAL_SECS=\"0\": must be at least 1"
        );
    }

    #[test]
    fn feed_and_aggregator_settings() {
        let config = load(&[("FEED_TIMEOUT_SECS", "3")]).unwrap();

        let feed = config.feed_config(FeedGroup::Subway);
        assert_eq!(feed.url, DEFAULT_SUBWAY_FEED_URL);
        assert_eq!(feed.timeout_secs, 3);

        assert_eq!(config.aggregator_config().feed_timeout, Duration::from_secs(3));
    }
}
