use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const DATA_PATH_VAR: &str = "SPACEX_DASH_DATA";
pub const BIND_ADDR_VAR: &str = "SPACEX_DASH_ADDR";

pub const DEFAULT_DATA_PATH: &str = "spacex_launch_dash.csv";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8050";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: '{value}' is not a socket address")]
    BadAddress {
        var: &'static str,
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Process-level settings, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// CSV file, relative to the working directory unless absolute.
    pub data_path: PathBuf,
    /// Listen address for the HTTP surface.
    pub bind_addr: SocketAddr,
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup; unset or empty values fall
    /// back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let data_path = get(DATA_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let addr = get(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = addr
            .trim()
            .parse()
            .map_err(|source| ConfigError::BadAddress {
                var: BIND_ADDR_VAR,
                value: addr.clone(),
                source,
            })?;

        Ok(Self {
            data_path,
            bind_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = DashboardConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("spacex_launch_dash.csv"));
        assert_eq!(cfg.bind_addr, "127.0.0.1:8050".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn overrides_and_blank_values() {
        let cfg = DashboardConfig::from_lookup(lookup(&[
            (DATA_PATH_VAR, "data/launches.csv"),
            (BIND_ADDR_VAR, " "),
        ]))
        .unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("data/launches.csv"));
        assert_eq!(cfg.bind_addr.port(), 8050);

        let cfg = DashboardConfig::from_lookup(lookup(&[(BIND_ADDR_VAR, "0.0.0.0:9000")])).unwrap();
        assert_eq!(cfg.bind_addr.port(), 9000);
    }

    #[test]
    fn bad_address_is_an_error() {
        let err = DashboardConfig::from_lookup(lookup(&[(BIND_ADDR_VAR, "localhost")])).unwrap_err();
        assert!(err.to_string().contains("SPACEX_DASH_ADDR"), "{err}");
    }
}
