use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use wayfarer_core::credentials::{self, AuthConfig as CredentialConfig};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory of static site assets served for any non-API path.
    pub public_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string. Without it the service keeps everything in memory.
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            acquire_timeout_seconds: default_acquire_timeout(),
        }
    }
}

fn default_max_connections() -> u32 { 5 }
fn default_acquire_timeout() -> u64 { 3 }

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: wayfarer_shared::Masked<String>,
    #[serde(default = "default_expiration")]
    pub jwt_expiration_seconds: u64,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

fn default_expiration() -> u64 { credentials::DEFAULT_TOKEN_TTL_SECONDS }
fn default_bcrypt_cost() -> u32 { credentials::DEFAULT_BCRYPT_COST }

impl AuthConfig {
    pub fn credential_config(&self) -> CredentialConfig {
        CredentialConfig {
            secret: self.jwt_secret.clone(),
            expiration: self.jwt_expiration_seconds,
            bcrypt_cost: self.bcrypt_cost,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    pub fn load_from(dir: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        let dir = dir.as_ref();
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let file = |name: &str| dir.join(name).to_string_lossy().into_owned();

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name(&file("default")))
            // Per-environment overrides, e.g. config/production.toml
            .add_source(config::File::with_name(&file(&run_mode)).required(false))
            // Local overrides, never checked in
            .add_source(config::File::with_name(&file("local")).required(false))
            // Eg. `WAYFARER__AUTH__JWT_SECRET=...` sets `auth.jwt_secret`
            .add_source(config::Environment::with_prefix("WAYFARER").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
