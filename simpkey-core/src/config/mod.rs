mod loader;
pub mod value;

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

pub use value::{ConfigValue, FromConfigValue};

/// Error type for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// The requested key was not found in the configuration.
    NotFound(String),
    /// The value could not be converted to the requested type.
    TypeMismatch { key: String, expected: &'static str },
    /// An I/O or YAML parsing error occurred while loading config files.
    Load(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(key) => write!(f, "Config key not found: {key}"),
            ConfigError::TypeMismatch { key, expected } => {
                write!(f, "Config type mismatch for '{key}': expected {expected}")
            }
            ConfigError::Load(msg) => write!(f, "Config load error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Raw application configuration loaded from YAML files, `.env` files, and
/// environment variables.
///
/// Resolution order (lowest to highest priority):
/// 1. `application.yaml`
/// 2. `application-{profile}.yaml`
/// 3. `.env` then `.env.{profile}` (loaded into the process environment,
///    never overwriting variables that are already set)
/// 4. Environment variables (`SERVER_ADDR` overrides `server.addr`)
///
/// Profile is `SIMPKEY_PROFILE` if set, otherwise the argument.
///
/// Keys are compared with dashes and dots treated alike, so
/// `remote.timeout-secs` in YAML and `REMOTE_TIMEOUT_SECS` in the
/// environment name the same entry.
#[derive(Debug, Clone)]
pub struct SimpkeyConfig {
    values: HashMap<String, ConfigValue>,
    profile: String,
}

impl SimpkeyConfig {
    /// Load configuration for the given profile from the current directory.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        Self::load_from(Path::new("."), profile)
    }

    /// Load configuration for the given profile from `dir`.
    pub fn load_from(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        let active_profile =
            std::env::var("SIMPKEY_PROFILE").unwrap_or_else(|_| profile.to_string());

        let mut raw = HashMap::new();
        loader::load_yaml_file(&dir.join("application.yaml"), &mut raw)?;
        loader::load_yaml_file(&dir.join(format!("application-{active_profile}.yaml")), &mut raw)?;

        let _ = dotenvy::from_path(dir.join(".env"));
        let _ = dotenvy::from_path(dir.join(format!(".env.{active_profile}")));

        let mut values: HashMap<String, ConfigValue> = raw
            .into_iter()
            .map(|(k, v)| (loader::normalize_key(&k), v))
            .collect();

        for (env_key, env_val) in std::env::vars() {
            values.insert(
                loader::env_key_to_config_key(&env_key),
                ConfigValue::String(env_val),
            );
        }

        tracing::debug!(profile = %active_profile, keys = values.len(), "configuration loaded");

        Ok(SimpkeyConfig {
            values,
            profile: active_profile,
        })
    }

    /// Create a config from a YAML string (useful for testing).
    pub fn from_yaml_str(yaml: &str, profile: &str) -> Result<Self, ConfigError> {
        let mut raw = HashMap::new();
        loader::load_yaml_str(yaml, &mut raw)?;
        Ok(SimpkeyConfig {
            values: raw
                .into_iter()
                .map(|(k, v)| (loader::normalize_key(&k), v))
                .collect(),
            profile: profile.to_string(),
        })
    }

    /// Create an empty config (useful for testing).
    pub fn empty() -> Self {
        SimpkeyConfig {
            values: HashMap::new(),
            profile: "test".to_string(),
        }
    }

    /// Set a value programmatically.
    pub fn set(&mut self, key: &str, value: ConfigValue) {
        self.values.insert(loader::normalize_key(key), value);
    }

    /// Get a typed value for the given dot-separated key.
    pub fn get<V: FromConfigValue>(&self, key: &str) -> Result<V, ConfigError> {
        let value = self
            .values
            .get(&loader::normalize_key(key))
            .ok_or_else(|| ConfigError::NotFound(key.to_string()))?;
        V::from_config_value(value, key)
    }

    /// Get a typed value, returning a default if the key is missing.
    ///
    /// A present value of the wrong type is still an error.
    pub fn get_or<V: FromConfigValue>(&self, key: &str, default: V) -> Result<V, ConfigError> {
        match self.get(key) {
            Err(ConfigError::NotFound(_)) => Ok(default),
            other => other,
        }
    }

    /// The active profile name.
    pub fn profile(&self) -> &str {
        &self.profile
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromConfigValue for LogFormat {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        match String::from_config_value(value, key)?.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::TypeMismatch {
                key: key.to_string(),
                expected: "\"pretty\" or \"json\"",
            }),
        }
    }
}

/// Typed settings the server needs at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen address.
    pub addr: String,
    /// Scheme used to reach remote instances.
    pub remote_scheme: String,
    /// Per-call timeout for the remote client. `None` means wait forever.
    pub remote_timeout: Option<Duration>,
    pub remote_user_agent: String,
    /// Mark session cookies `Secure`.
    pub session_secure: bool,
    /// `Strict-Transport-Security` max-age. `None` leaves the header off.
    pub hsts_max_age: Option<u64>,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:3000".to_string(),
            remote_scheme: "https".to_string(),
            remote_timeout: None,
            remote_user_agent: concat!("simpkey/", env!("CARGO_PKG_VERSION")).to_string(),
            session_secure: false,
            hsts_max_age: None,
            log_format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    pub fn from_config(config: &SimpkeyConfig) -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();
        let timeout_secs: Option<u64> = config.get_or("remote.timeout-secs", None)?;
        Ok(AppConfig {
            addr: config.get_or("server.addr", defaults.addr)?,
            remote_scheme: config.get_or("remote.scheme", defaults.remote_scheme)?,
            remote_timeout: timeout_secs.map(Duration::from_secs),
            remote_user_agent: config.get_or("remote.user-agent", defaults.remote_user_agent)?,
            session_secure: config.get_or("session.secure", defaults.session_secure)?,
            hsts_max_age: config.get_or("server.hsts-max-age-secs", None)?,
            log_format: config.get_or("log.format", defaults.log_format)?,
        })
    }
}
