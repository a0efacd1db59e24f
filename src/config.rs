//! Runtime configuration for the binaries.
//!
//! Precedence: command-line flag, then environment (a `.env` file is read
//! first), then built-in defaults.

use crate::loader::default_candidates;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const BIND_ADDR_VAR: &str = "INSIGHTS_BIND_ADDR";
pub const DATA_PATH_VAR: &str = "INSIGHTS_DATA_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Dataset locations tried in order.
    pub data_paths: Vec<PathBuf>,
}

impl ServerConfig {
    pub fn resolve(bind: Option<String>, data: Option<PathBuf>) -> Self {
        dotenv::dotenv().ok();

        let bind_addr = bind
            .or_else(|| std::env::var(BIND_ADDR_VAR).ok())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        Self {
            bind_addr,
            data_paths: resolve_data_paths(data),
        }
    }
}

/// An explicit path (flag or `INSIGHTS_DATA_PATH`) replaces the default
/// candidates rather than extending them.
pub fn resolve_data_paths(data: Option<PathBuf>) -> Vec<PathBuf> {
    data.or_else(|| std::env::var(DATA_PATH_VAR).ok().map(PathBuf::from))
        .map(|path| vec![path])
        .unwrap_or_else(default_candidates)
}

/// Installs the global fmt subscriber. `RUST_LOG` wins over `level`.
pub fn init_logging(level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or(DEFAULT_LOG_LEVEL)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_values_win() {
        let config = ServerConfig::resolve(
            Some("127.0.0.1:9000".to_string()),
            Some(PathBuf::from("/srv/insights.json")),
        );
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.data_paths, vec![PathBuf::from("/srv/insights.json")]);
    }
}
