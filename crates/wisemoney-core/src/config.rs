//! Application configuration
//!
//! Loaded from TOML. Lookup order:
//! 1. An explicit path (`--config`), which must exist
//! 2. `<data_local_dir>/wisemoney/config.toml`, if present
//! 3. Built-in defaults
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8000
//! allowed_origins = ["http://localhost:8501"]
//!
//! [forecast]
//! default_days = 30
//! max_days = 365
//!
//! [reports]
//! trend_months = 12
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::forecast::DEFAULT_FORECAST_DAYS;

/// Web server settings
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Empty means same-origin only
    pub allowed_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            allowed_origins: vec![],
        }
    }
}

/// Forecast request limits
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSettings {
    pub default_days: u32,
    pub max_days: u32,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            default_days: DEFAULT_FORECAST_DAYS,
            max_days: 365,
        }
    }
}

/// Report defaults
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    /// Months shown by the trend report when none are requested
    pub trend_months: u32,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self { trend_months: 12 }
    }
}

/// Full application configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub server: ServerSettings,
    pub forecast: ForecastSettings,
    pub reports: ReportSettings,
}

impl Config {
    /// Load configuration (explicit path, then default location, then defaults)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                let content = fs::read_to_string(p).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", p.display(), e))
                })?;
                debug!(path = %p.display(), "Loaded config");
                Self::parse(&content)
            }
            None => match default_config_path().filter(|p| p.exists()) {
                Some(p) => Self::load(Some(&p)),
                None => Ok(Self::default()),
            },
        }
    }

    /// Parse config from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = Config::default();

        if let Some(server) = raw.server {
            if let Some(host) = server.host {
                config.server.host = host;
            }
            if let Some(port) = server.port {
                config.server.port = port;
            }
            if let Some(origins) = server.allowed_origins {
                config.server.allowed_origins = origins;
            }
        }

        if let Some(forecast) = raw.forecast {
            if let Some(days) = forecast.default_days {
                config.forecast.default_days = days;
            }
            if let Some(max) = forecast.max_days {
                config.forecast.max_days = max;
            }
        }

        if let Some(reports) = raw.reports {
            if let Some(months) = reports.trend_months {
                config.reports.trend_months = months;
            }
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.forecast.default_days == 0 {
            return Err(Error::Config(
                "forecast.default_days must be at least 1".to_string(),
            ));
        }
        if self.forecast.max_days < self.forecast.default_days {
            return Err(Error::Config(format!(
                "forecast.max_days ({}) is below forecast.default_days ({})",
                self.forecast.max_days, self.forecast.default_days
            )));
        }
        if self.reports.trend_months == 0 {
            return Err(Error::Config(
                "reports.trend_months must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Default config path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("wisemoney").join("config.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    server: Option<RawServer>,
    forecast: Option<RawForecast>,
    reports: Option<RawReports>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawServer {
    host: Option<String>,
    port: Option<u16>,
    allowed_origins: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawForecast {
    default_days: Option<u32>,
    max_days: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawReports {
    trend_months: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.forecast.default_days, 30);
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_partial_override() {
        let config = Config::parse(
            r#"
            [server]
            port = 9000

            [forecast]
            default_days = 14
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.forecast.default_days, 14);
        assert_eq!(config.forecast.max_days, 365);
        assert_eq!(config.reports.trend_months, 12);
    }

    #[test]
    fn test_rejects_zero_default_days() {
        let result = Config::parse("[forecast]\ndefault_days = 0\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_max_below_default() {
        let result = Config::parse("[forecast]\ndefault_days = 60\nmax_days = 30\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let result = Config::parse("[server]\nprot = 1\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[reports]\ntrend_months = 6").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.reports.trend_months, 6);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let result = Config::load(Some(Path::new("/nonexistent/wisemoney.toml")));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
