//! Query settings.
//!
//! [`QueryConfig`] holds the knobs of the query layer. Applications load it from
//! `config/config.toml` (section `[query]`) or `BUOY__QUERY__*` environment variables
//! with [`QueryConfig::load`], and attach it to a schema with
//! [`SchemaBuilder::settings`](crate::SchemaBuilder::settings). A schema never loads the
//! file itself; without `settings` it uses [`QueryConfig::default`].
//!
//! ```toml
//! [query]
//! default_limit = 500
//! log_statements = false
//! ```

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Row ceiling applied when a query sets no limit.
pub const DEFAULT_LIMIT: u64 = 1000;

const CONFIG_FILE: &str = "config/config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// `LIMIT` used for queries without an explicit limit
    #[serde(default = "default_limit")]
    pub default_limit: u64,
    /// Log every compiled statement at `debug` level
    #[serde(default = "default_log_statements")]
    pub log_statements: bool,
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

fn default_log_statements() -> bool {
    true
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            log_statements: default_log_statements(),
        }
    }
}

impl QueryConfig {
    /// Load the query configuration from `config/config.toml`, falling back to env vars.
    ///
    /// A missing `[query]` section yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(env_source());

        let settings = match builder.build() {
            Ok(cfg) => cfg,
            Err(err) => {
                // The file exists but is unreadable; keep going with the environment alone.
                if std::path::Path::new(CONFIG_FILE).exists() {
                    log::warn!("failed to load {CONFIG_FILE}, falling back to env: {err}");
                }
                Config::builder()
                    .add_source(env_source())
                    .build()
                    .map_err(|env_err| {
                        ConfigError::Message(format!(
                            "Failed to load configuration from file and env: {err}, \
                             then env-only error: {env_err}"
                        ))
                    })?
            }
        };

        Self::from_settings(&settings)
    }

    /// Parse a TOML document containing a `[query]` section.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Self::from_settings(&settings)
    }

    fn from_settings(settings: &Config) -> Result<Self, ConfigError> {
        match settings.get::<QueryConfig>("query") {
            Ok(cfg) => Ok(cfg),
            Err(ConfigError::NotFound(_)) => Ok(Self::default()),
            Err(e) => Err(ConfigError::Message(format!(
                "Query configuration could not be loaded: {e}"
            ))),
        }
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("BUOY")
        .separator("__")
        .try_parsing(true)
}
