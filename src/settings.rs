//! Layered service configuration.
//!
//! Values are resolved in order, later layers winning:
//!
//! 1. built-in defaults
//! 2. an optional config file (`--config`, format picked from the extension)
//! 3. environment variables prefixed with `REGIONSTAT_`, nested keys joined
//!    with `__` (e.g. `REGIONSTAT_CORS__ALLOW_ORIGIN`)
//! 4. command-line overrides
//!
//! ```toml
//! listen_addr = "0.0.0.0:8000"
//! data_file = "q-vercel-latency.json"
//!
//! [cors]
//! allow_origin = "*"
//! allow_credentials = true
//! ```

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::server::{CorsPolicy, ServerConfig};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "REGIONSTAT";

/// Fully resolved settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Address to listen on (e.g., "0.0.0.0:8000")
    pub listen_addr: String,
    /// Path for the statistics endpoint (e.g., "/api/latency")
    pub api_path: String,
    /// JSON file holding the observations
    pub data_file: PathBuf,
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
    /// Largest request body accepted, in bytes
    pub max_body_bytes: usize,
    /// Cross-origin policy
    pub cors: CorsSettings,
}

/// Cross-origin settings, mapped onto [`CorsPolicy`].
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origin, or "*" for any
    pub allow_origin: String,
    /// Whether credentialed requests are allowed
    pub allow_credentials: bool,
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Overrides `listen_addr`
    pub listen_addr: Option<String>,
    /// Overrides `api_path`
    pub api_path: Option<String>,
    /// Overrides `data_file`
    pub data_file: Option<PathBuf>,
    /// Overrides `log_level`
    pub log_level: Option<String>,
}

impl Settings {
    /// Resolve settings from defaults, file, environment and overrides.
    pub fn load(config_file: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        Self::load_with_prefix(ENV_PREFIX, config_file, overrides)
    }

    /// Like [`Settings::load`], reading environment variables under `env_prefix`.
    pub fn load_with_prefix(
        env_prefix: &str,
        config_file: Option<&Path>,
        overrides: &Overrides,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("listen_addr", "0.0.0.0:8000")?
            .set_default("api_path", "/api/latency")?
            .set_default("data_file", "q-vercel-latency.json")?
            .set_default("log_level", "info")?
            .set_default("max_body_bytes", 1_048_576i64)?
            .set_default("cors.allow_origin", "*")?
            .set_default("cors.allow_credentials", true)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path));
        }

        builder
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("listen_addr", overrides.listen_addr.clone())?
            .set_override_option("api_path", overrides.api_path.clone())?
            .set_override_option(
                "data_file",
                overrides
                    .data_file
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned()),
            )?
            .set_override_option("log_level", overrides.log_level.clone())?
            .build()?
            .try_deserialize()
    }

    /// HTTP server configuration derived from these settings.
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::builder()
            .listen_addr(self.listen_addr.clone())
            .api_path(self.api_path.clone())
            .max_body_bytes(self.max_body_bytes)
            .cors(CorsPolicy {
                allow_origin: self.cors.allow_origin.clone(),
                allow_credentials: self.cors.allow_credentials,
            })
            .build()
    }
}
