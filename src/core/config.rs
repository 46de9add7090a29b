use crate::domain::schedule::DEFAULT_BULK_CONCURRENCY;
use crate::domain::schedule::compliance::ComplianceThresholds;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    FSError(#[from] std::io::Error),
    #[error(transparent)]
    SerdeError(#[from] toml::de::Error),
}

#[derive(Deserialize, Clone, Default)]
pub struct DB {
    pub database: String,
    pub host: String,
    pub user: String,
    pub password: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl DB {
    fn is_valid(&self) -> bool {
        !self.database.is_empty()
            && !self.host.is_empty()
            && !self.password.is_empty()
            && !self.user.is_empty()
            && self.max_connections > 0
    }

    pub fn connection_string(&self) -> String {
        let password: String =
            url::form_urlencoded::byte_serialize(self.password.as_bytes()).collect();

        format!(
            "postgres://{}:{}@{}/{}",
            self.user, password, self.host, self.database
        )
    }
}

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_bulk_concurrency() -> usize {
    DEFAULT_BULK_CONCURRENCY
}

fn default_max_bulk_pairs() -> usize {
    10_000
}

#[derive(Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub cors_hosts: Vec<String>,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Upper bound on (item, company) pairs processed at once by a bulk request.
    #[serde(default = "default_bulk_concurrency")]
    pub bulk_concurrency: usize,
    /// Largest items x companies product a single bulk request may expand to.
    #[serde(default = "default_max_bulk_pairs")]
    pub max_bulk_pairs: usize,
    #[serde(default)]
    pub compliance: ComplianceThresholds,
    pub db: DB,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cors_hosts: Vec::new(),
            bind_address: default_bind_address(),
            bulk_concurrency: default_bulk_concurrency(),
            max_bulk_pairs: default_max_bulk_pairs(),
            compliance: ComplianceThresholds::default(),
            db: DB::default(),
        }
    }
}

impl Config {
    pub fn parse(path: Option<String>) -> Result<Self, ConfigError> {
        let path = path.unwrap_or("config.toml".to_string());
        let path = Path::new(path.as_str());
        let config_text = fs::read_to_string(path)?;

        Self::from_toml(config_text.as_str())
    }

    pub fn from_toml(config_text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(config_text)?;

        Ok(config)
    }

    pub fn is_valid(&self) -> bool {
        self.db.is_valid() && self.bulk_concurrency > 0 && self.max_bulk_pairs > 0
    }
}
