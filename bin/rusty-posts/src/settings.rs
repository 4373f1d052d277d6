//! Runtime configuration: built-in defaults overridden by `RUSTY_POSTS_*`
//! environment variables (a `.env` file is loaded first by `main`).

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

const ENV_PREFIX: &str = "RUSTY_POSTS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// sqlx connection string, e.g. `sqlite:rusty_posts.db`
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    /// Default `env_logger` filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("database_url", "sqlite:rusty_posts.db")?
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("max_connections", 5)?
            .set_default("log_level", "info")?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let source = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(source))
    }

    #[test]
    fn defaults_apply_without_environment() {
        let settings = Settings::from_env(env(&[])).unwrap();
        assert_eq!(
            settings,
            Settings {
                database_url: "sqlite:rusty_posts.db".into(),
                host: "127.0.0.1".into(),
                port: 8080,
                max_connections: 5,
                log_level: "info".into(),
            }
        );
    }

    #[test]
    fn environment_overrides_defaults() {
        let settings = Settings::from_env(env(&[
            ("RUSTY_POSTS_DATABASE_URL", "sqlite:/var/lib/posts.db"),
            ("RUSTY_POSTS_PORT", "9090"),
            ("RUSTY_POSTS_MAX_CONNECTIONS", "16"),
        ]))
        .unwrap();

        assert_eq!(settings.database_url, "sqlite:/var/lib/posts.db");
        assert_eq!(settings.bind_address(), ("127.0.0.1".to_string(), 9090));
        assert_eq!(settings.max_connections, 16);
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert!(Settings::from_env(env(&[("RUSTY_POSTS_PORT", "not-a-port")])).is_err());
    }
}
