use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub features: FeatureConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Public address used to build returned short URLs, no trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// "redis" or "memory"
    #[serde(default = "default_cache_backend")]
    pub backend: String,
    #[serde(default = "default_redis_url")]
    pub redis_url: String,
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// TTL for url:{code} entries, seconds. Click counters never expire.
    #[serde(default = "default_cache_ttl")]
    pub default_ttl: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureConfig {
    #[serde(default = "default_code_length")]
    pub code_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_database_url() -> String {
    "sqlite://snaplink.db?mode=rwc".to_string()
}

fn default_cache_backend() -> String {
    "redis".to_string()
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379/".to_string()
}

fn default_key_prefix() -> String {
    "snaplink:".to_string()
}

fn default_cache_ttl() -> u64 {
    3600
}

fn default_code_length() -> usize {
    6
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            cache: CacheConfig::default(),
            features: FeatureConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            base_url: default_base_url(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: default_cache_backend(),
            redis_url: default_redis_url(),
            key_prefix: default_key_prefix(),
            default_ttl: default_cache_ttl(),
        }
    }
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, then apply environment overrides.
    pub fn load() -> Self {
        let mut config = Self::load_from_file();
        config.override_with_env();
        config
    }

    fn load_from_file() -> Self {
        let config_paths = ["config.toml", "snaplink.toml", "/etc/snaplink/config.toml"];

        for path in &config_paths {
            if Path::new(path).exists() {
                match fs::read_to_string(path) {
                    Ok(content) => match toml::from_str::<Config>(&content) {
                        Ok(config) => {
                            debug!("Loaded config from: {}", path);
                            return config;
                        }
                        Err(e) => {
                            warn!("Failed to parse config file {}: {}", path, e);
                        }
                    },
                    Err(e) => {
                        warn!("Failed to read config file {}: {}", path, e);
                    }
                }
            }
        }

        debug!("No config file found, using defaults");
        Self::default()
    }

    fn override_with_env(&mut self) {
        if let Ok(host) = env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("SERVER_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(base_url) = env::var("BASE_URL") {
            self.server.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Ok(database_url) = env::var("DATABASE_URL") {
            self.storage.database_url = database_url;
        }

        if let Ok(backend) = env::var("CACHE_BACKEND") {
            self.cache.backend = backend;
        }
        if let Ok(redis_url) = env::var("REDIS_URL") {
            self.cache.redis_url = redis_url;
        }
        if let Ok(key_prefix) = env::var("REDIS_KEY_PREFIX") {
            self.cache.key_prefix = key_prefix;
        }
        if let Ok(ttl) = env::var("CACHE_TTL") {
            if let Ok(ttl) = ttl.parse() {
                self.cache.default_ttl = ttl;
            }
        }

        if let Ok(length) = env::var("CODE_LENGTH") {
            if let Ok(length) = length.parse() {
                self.features.code_length = length;
            }
        }

        if let Ok(level) = env::var("RUST_LOG") {
            self.logging.level = level;
        }
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration instance.
pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(Config::load)
}

/// Initialize the global configuration eagerly at startup.
pub fn init_config() {
    CONFIG.get_or_init(Config::load);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.cache.default_ttl, 3600);
        assert_eq!(config.features.code_length, 6);
        assert_eq!(config.cache.backend, "redis");
    }

    #[test]
    fn toml_sections_are_optional() {
        let config: Config = toml::from_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.storage.database_url, default_database_url());
        assert_eq!(config.logging.level, "info");
    }
}
