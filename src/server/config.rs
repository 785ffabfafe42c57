use std::env;
use std::path::PathBuf;

use serde::Serialize;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MOCK_DATA_PATH: &str = "dados-consignacoes-mock.json";
pub const DEFAULT_API_KEY: &str = "supersecretapikey";

/// Process configuration, read from the environment at startup.
///
/// | Variable | Default |
/// |----------|---------|
/// | `PORT` | `3000` |
/// | `CONSIGNACOES_BIND_HOST` | `0.0.0.0` |
/// | `CONSIGNACOES_MOCK_DATA` | `dados-consignacoes-mock.json` |
/// | `CONSIGNACOES_API_KEY` | `supersecretapikey` |
/// | `CONSIGNACOES_LOG_JSON` | `false` |
///
/// Unparsable values fall back to the default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerConfig {
    pub bind_host: String,
    pub port: u16,
    pub mock_data_path: PathBuf,
    #[serde(skip)]
    pub api_key: String,
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            mock_data_path: PathBuf::from(DEFAULT_MOCK_DATA_PATH),
            api_key: DEFAULT_API_KEY.to_string(),
            log_json: false,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        _ => None,
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source; `from_env` passes `std::env`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            bind_host: non_empty("CONSIGNACOES_BIND_HOST").unwrap_or(defaults.bind_host),
            port: non_empty("PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.port),
            mock_data_path: non_empty("CONSIGNACOES_MOCK_DATA")
                .map(PathBuf::from)
                .unwrap_or(defaults.mock_data_path),
            api_key: non_empty("CONSIGNACOES_API_KEY").unwrap_or(defaults.api_key),
            log_json: non_empty("CONSIGNACOES_LOG_JSON")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.log_json),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = from_pairs(&[]);
        assert_eq!(cfg, ServerConfig::default());
        assert_eq!(cfg.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn reads_all_variables() {
        let cfg = from_pairs(&[
            ("PORT", "8080"),
            ("CONSIGNACOES_BIND_HOST", "127.0.0.1"),
            ("CONSIGNACOES_MOCK_DATA", "/tmp/data.json"),
            ("CONSIGNACOES_API_KEY", "k"),
            ("CONSIGNACOES_LOG_JSON", "true"),
        ]);
        assert_eq!(cfg.bind_addr(), "127.0.0.1:8080");
        assert_eq!(cfg.mock_data_path, PathBuf::from("/tmp/data.json"));
        assert_eq!(cfg.api_key, "k");
        assert!(cfg.log_json);
    }

    #[test]
    fn invalid_values_fall_back() {
        let cfg = from_pairs(&[
            ("PORT", "http"),
            ("CONSIGNACOES_LOG_JSON", "maybe"),
            ("CONSIGNACOES_API_KEY", "  "),
        ]);
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert!(!cfg.log_json);
        assert_eq!(cfg.api_key, DEFAULT_API_KEY);
    }

    #[test]
    fn api_key_not_serialized() {
        let json = serde_json::to_string(&ServerConfig::default()).unwrap();
        assert!(!json.contains(DEFAULT_API_KEY));
    }
}
