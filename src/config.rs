use std::env;

pub const DEFAULT_DATA_SOURCE: &str = "data.csv";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_METRIC_PARALLELISM: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_source: String,
    pub request_timeout_secs: u64,
    pub metric_parallelism: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            metric_parallelism: DEFAULT_METRIC_PARALLELISM,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup. Unparseable numbers fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_source = lookup("PLAYER_DATA_SOURCE")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_SOURCE.to_string());
        let request_timeout_secs = lookup("REQUEST_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
            .clamp(1, 120);
        let metric_parallelism = lookup("METRIC_PARALLELISM")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_METRIC_PARALLELISM)
            .clamp(1, 32);
        Self {
            data_source,
            request_timeout_secs,
            metric_parallelism,
        }
    }
}
