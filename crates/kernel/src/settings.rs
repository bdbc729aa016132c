//! Layered application settings.
//!
//! Configuration is assembled from, in increasing precedence:
//! `config/base.toml`, `config/{environment}.toml`, and `FOLIO_*` environment
//! variables. A `.env` file is honored when present. Every knob has a default,
//! so the application runs with no configuration files at all.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context};
use serde::Deserialize;

const ENV_VAR: &str = "FOLIO_ENV";
const CONFIG_DIR_VAR: &str = "FOLIO_CONFIG_DIR";

/// Deployment environment, selected by `FOLIO_ENV`.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Environment::Local),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => bail!(
                "unknown environment '{other}', expected local, staging, or production"
            ),
        }
    }
}

/// Top-level settings tree.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

impl Settings {
    /// Load and validate settings from the layered sources.
    pub fn load() -> anyhow::Result<Self> {
        // A missing `.env` is fine.
        let _ = dotenvy::dotenv();

        let env_name = std::env::var(ENV_VAR)
            .unwrap_or_else(|_| Environment::default().as_str().to_string());
        let environment: Environment = env_name.parse()?;
        let config_dir = config_dir()?;

        let cfg = config::Config::builder()
            .add_source(config::File::from(config_dir.join("base.toml")).required(false))
            .add_source(
                config::File::from(config_dir.join(format!("{env_name}.toml"))).required(false),
            )
            .add_source(config::Environment::with_prefix("FOLIO").separator("_"))
            .build()
            .context("could not assemble configuration sources")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .context("configuration does not match the expected shape")?;
        settings.environment = environment;
        settings.validate()?;

        Ok(settings)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.catalog.page_size == 0 {
            bail!("catalog.page_size must be at least 1");
        }
        Ok(())
    }
}

fn config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_VAR) {
        return Ok(PathBuf::from(dir));
    }
    let cwd = std::env::current_dir().context("could not resolve the working directory")?;
    Ok(cwd.join("config"))
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "ServerSettings::default_host")]
    pub host: String,
    #[serde(default = "ServerSettings::default_port")]
    pub port: u16,
    #[serde(default = "ServerSettings::default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl ServerSettings {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        8080
    }

    fn default_request_timeout_ms() -> u64 {
        15000
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            request_timeout_ms: Self::default_request_timeout_ms(),
        }
    }
}

/// Knobs for the catalog browse view.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    /// Books shown per page. Must be at least 1.
    #[serde(default = "CatalogSettings::default_page_size")]
    pub page_size: usize,
}

impl CatalogSettings {
    fn default_page_size() -> usize {
        3
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            page_size: Self::default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub log_format: LogFormat,
    /// Tracing filter directives, e.g. `"info,folio_app=debug"`.
    /// `RUST_LOG` takes precedence when set.
    #[serde(default)]
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parses_its_known_names() {
        assert_eq!("local".parse::<Environment>().unwrap(), Environment::Local);
        assert_eq!(
            "production".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert!("sandbox".parse::<Environment>().is_err());
    }

    #[test]
    fn defaults_cover_every_section() {
        let settings = Settings::default();
        assert_eq!(settings.environment, Environment::Local);
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.catalog.page_size, 3);
        assert_eq!(settings.telemetry.log_format, LogFormat::Pretty);
    }

    #[test]
    fn a_zero_page_size_fails_validation() {
        let mut settings = Settings::default();
        settings.catalog.page_size = 0;
        assert!(settings.validate().is_err());
    }
}
