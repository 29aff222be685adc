use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    7070
}

/// Ticket store configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// Push the two example tickets into the empty store at startup.
    #[serde(default = "default_seed_examples")]
    pub seed_examples: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_examples: default_seed_examples(),
        }
    }
}

fn default_seed_examples() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server.port, 7070);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert!(config.store.seed_examples);
    }

    #[test]
    fn test_deserialize_server_section() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
        assert!(config.store.seed_examples);
    }

    #[test]
    fn test_deserialize_partial_server_section() {
        let toml = r#"
[server]
port = 8081
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
    }

    #[test]
    fn test_deserialize_store_section() {
        let toml = r#"
[store]
seed_examples = false
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.store.seed_examples);
    }

    #[test]
    fn test_deserialize_invalid_host_fails() {
        let toml = r#"
[server]
host = "not-an-ip"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }
}
