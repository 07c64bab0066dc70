use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// Prometheus listener; metrics are off when unset.
    pub metrics_port: Option<u16>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 9091,
            metrics_port: None,
        }
    }
}

impl ServerConfig {
    /// Read `CARPOOL_BIND`, `CARPOOL_PORT` and `CARPOOL_METRICS_PORT`.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars().collect())
    }

    /// Unparseable values fall back to the defaults.
    pub fn from_vars(vars: HashMap<String, String>) -> Self {
        let defaults = Self::default();
        Self {
            bind: vars.get("CARPOOL_BIND").cloned().unwrap_or(defaults.bind),
            port: vars
                .get("CARPOOL_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            metrics_port: vars
                .get("CARPOOL_METRICS_PORT")
                .and_then(|s| s.parse().ok()),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn defaults() {
        let config = ServerConfig::from_vars(HashMap::new());
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.addr(), "0.0.0.0:9091");
        assert_eq!(config.metrics_port, None);
    }

    #[test]
    fn reads_overrides() {
        let config = ServerConfig::from_vars(vars(&[
            ("CARPOOL_BIND", "127.0.0.1"),
            ("CARPOOL_PORT", "8080"),
            ("CARPOOL_METRICS_PORT", "9000"),
        ]));
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.metrics_port, Some(9000));
    }

    #[test]
    fn bad_numbers_fall_back() {
        let config = ServerConfig::from_vars(vars(&[
            ("CARPOOL_PORT", "not-a-port"),
            ("CARPOOL_METRICS_PORT", "70000"),
        ]));
        assert_eq!(config.port, 9091);
        assert_eq!(config.metrics_port, None);
    }
}
