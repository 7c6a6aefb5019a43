//! Service configuration.
//!
//! Values come from built-in defaults overlaid with environment variables
//! (`DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER`, `SECRET_NAME`, `AWS_REGION`,
//! `LISTEN_ADDR`, `LOGLEVEL` and the `*_TIMEOUT_SECS` knobs). The result is
//! extracted once at startup and handed to the router by value.

use crate::error::ConfigError;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

const ENV_KEYS: &[&str] = &[
    "db_host",
    "db_port",
    "db_name",
    "db_user",
    "secret_name",
    "aws_region",
    "listen_addr",
    "loglevel",
    "secret_timeout_secs",
    "connect_timeout_secs",
    "query_timeout_secs",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(deserialize_with = "text")]
    pub db_host: String,
    pub db_port: u16,
    #[serde(deserialize_with = "text")]
    pub db_name: String,
    #[serde(deserialize_with = "text")]
    pub db_user: String,
    #[serde(deserialize_with = "text")]
    pub secret_name: String,
    #[serde(deserialize_with = "text")]
    pub aws_region: String,
    #[serde(deserialize_with = "text")]
    pub listen_addr: String,
    #[serde(deserialize_with = "text")]
    pub loglevel: String,
    pub secret_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub query_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_host: "localhost".to_string(),
            db_port: 3306,
            db_name: "CustomerData".to_string(),
            db_user: "admin".to_string(),
            secret_name: "rds-result-page".to_string(),
            aws_region: "us-east-1".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
            secret_timeout_secs: 10,
            connect_timeout_secs: 10,
            query_timeout_secs: 15,
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::raw().only(ENV_KEYS))
    }

    /// Extract and validate the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cfg: Config = Self::figment().extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("DB_HOST", &self.db_host),
            ("DB_NAME", &self.db_name),
            ("DB_USER", &self.db_user),
            ("SECRET_NAME", &self.secret_name),
            ("AWS_REGION", &self.aws_region),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                field: *field,
                reason: "must not be empty",
            });
        }
        if self.db_port == 0 {
            return Err(ConfigError::Invalid {
                field: "DB_PORT",
                reason: "must be non-zero",
            });
        }
        let timeouts = [
            ("SECRET_TIMEOUT_SECS", self.secret_timeout_secs),
            ("CONNECT_TIMEOUT_SECS", self.connect_timeout_secs),
            ("QUERY_TIMEOUT_SECS", self.query_timeout_secs),
        ];
        if let Some((field, _)) = timeouts.iter().find(|(_, secs)| *secs == 0) {
            return Err(ConfigError::Invalid {
                field: *field,
                reason: "must be non-zero",
            });
        }
        Ok(())
    }

    pub fn connection(&self) -> ConnectionConfig {
        ConnectionConfig {
            host: self.db_host.clone(),
            port: self.db_port,
            database: self.db_name.clone(),
            username: self.db_user.clone(),
            secret_id: self.secret_name.clone(),
            region: self.aws_region.clone(),
        }
    }

    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            secret: Duration::from_secs(self.secret_timeout_secs),
            connect: Duration::from_secs(self.connect_timeout_secs),
            query: Duration::from_secs(self.query_timeout_secs),
        }
    }
}

/// `Env` parses values, so `SECRET_NAME=123456` arrives as a number.
/// Free-form settings take any scalar back as its text.
fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Bool(bool),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => s,
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Signed(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    })
}

/// Fixed connection parameters; the password is supplied by the secret store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub secret_id: String,
    pub region: String,
}

/// Per-request deadlines for the external calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub secret: Duration,
    pub connect: Duration,
    pub query: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Config::default().timeouts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn env_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("DB_HOST", "db.internal");
            jail.set_env("DB_PORT", "3307");
            jail.set_env("DB_NAME", "Registry");
            jail.set_env("DB_USER", "reader");
            jail.set_env("SECRET_NAME", "prod/registry");
            jail.set_env("AWS_REGION", "sa-east-1");
            jail.set_env("QUERY_TIMEOUT_SECS", "3");

            let cfg = Config::from_env().expect("config should load");
            assert_eq!(
                cfg.connection(),
                ConnectionConfig {
                    host: "db.internal".into(),
                    port: 3307,
                    database: "Registry".into(),
                    username: "reader".into(),
                    secret_id: "prod/registry".into(),
                    region: "sa-east-1".into(),
                }
            );
            assert_eq!(cfg.timeouts().query, Duration::from_secs(3));
            assert_eq!(cfg.listen_addr, "0.0.0.0:8000");
            Ok(())
        });
    }

    #[test]
    fn numeric_looking_names_stay_text() {
        Jail::expect_with(|jail| {
            jail.set_env("SECRET_NAME", "123456");
            jail.set_env("DB_NAME", "2024");
            jail.set_env("DB_USER", "-7");
            jail.set_env("DB_HOST", "10.5");

            let cfg = Config::from_env().expect("numeric names are valid");
            assert_eq!(cfg.secret_name, "123456");
            assert_eq!(cfg.db_name, "2024");
            assert_eq!(cfg.db_user, "-7");
            assert_eq!(cfg.db_host, "10.5");
            Ok(())
        });
    }

    #[test]
    fn blank_secret_name_is_rejected() {
        let cfg = Config {
            secret_name: "  ".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Invalid {
                field: "SECRET_NAME",
                ..
            })
        ));
    }

    #[test]
    fn non_numeric_port_fails_extraction() {
        Jail::expect_with(|jail| {
            jail.set_env("DB_PORT", "mysql");
            assert!(matches!(
                Config::from_env(),
                Err(ConfigError::Extract(_))
            ));
            Ok(())
        });
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let cfg = Config {
            secret_timeout_secs: 0,
            ..Config::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Invalid {
                field: "SECRET_TIMEOUT_SECS",
                ..
            })
        ));
    }
}
