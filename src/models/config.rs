//! Configuration model loaded from external sources.

use std::path::Path;

use config::{Config, ConfigError};
use serde::Deserialize;

use crate::repository::cache::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL};
use crate::repository::fixture::DEFAULT_TOTAL_USERS;

fn default_total_users() -> usize {
    DEFAULT_TOTAL_USERS
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL.as_secs()
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

fn default_assets_dir() -> String {
    "./assets".to_string()
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
    /// Size of the generated user set served by the mock API.
    #[serde(default = "default_total_users")]
    pub mock_total_users: usize,
    /// Seconds a fetched page stays cached.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl ServerConfig {
    /// Reads `<dir>/default.yaml`, the optional `<dir>/<app_env>.yaml` and
    /// `APP_*` environment variables, later sources winning.
    pub fn load(config_dir: &Path, app_env: &str) -> Result<Self, ConfigError> {
        let default_file = config_dir.join("default");
        let env_file = config_dir.join(app_env);

        Config::builder()
            .add_source(config::File::with_name(&default_file.to_string_lossy()))
            .add_source(config::File::with_name(&env_file.to_string_lossy()).required(false))
            .add_source(config::Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }
}
