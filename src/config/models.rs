// src/config/models.rs
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_SERVICE_NAME: &str = "Resilience2Relief AI";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SmokeConfig {
    #[serde(default = "default_base_url")]
    pub base_url: Url,

    /// Timeout for the lightweight GET checks.
    #[serde(default = "default_timeout_secs")]
    pub default_timeout_secs: u64,

    #[serde(default = "default_upload_timeout_secs")]
    pub upload_timeout_secs: u64,

    /// Project generation does real work server-side, so it gets longer.
    #[serde(default = "default_generation_timeout_secs")]
    pub generation_timeout_secs: u64,

    /// Grace period before the first request, for freshly started servers.
    #[serde(default = "default_startup_delay_secs")]
    pub startup_delay_secs: u64,

    /// Substring the `/api` message must contain.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// When false, missing project sub-fields only produce warnings.
    #[serde(default = "default_strict_fields")]
    pub strict_fields: bool,

    /// Directory for the upload check's scratch document. System temp dir if unset.
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,

    /// Prometheus textfile written after each run.
    #[serde(default)]
    pub metrics_file: Option<PathBuf>,

    #[serde(default)]
    pub format: ReportFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("base URL must use http or https, got `{0}`")]
    UnsupportedScheme(String),

    #[error("base URL `{0}` has no host")]
    MissingHost(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("service name must not be empty")]
    EmptyServiceName,
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid")
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_upload_timeout_secs() -> u64 {
    10
}

fn default_generation_timeout_secs() -> u64 {
    30
}

fn default_startup_delay_secs() -> u64 {
    2
}

fn default_service_name() -> String {
    DEFAULT_SERVICE_NAME.to_string()
}

fn default_strict_fields() -> bool {
    true
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_timeout_secs: default_timeout_secs(),
            upload_timeout_secs: default_upload_timeout_secs(),
            generation_timeout_secs: default_generation_timeout_secs(),
            startup_delay_secs: default_startup_delay_secs(),
            service_name: default_service_name(),
            strict_fields: default_strict_fields(),
            scratch_dir: None,
            metrics_file: None,
            format: ReportFormat::default(),
        }
    }
}

impl SmokeConfig {
    /// Config pointed at `base_url` with every other setting at its default
    /// and no startup delay.
    pub fn for_base_url(base_url: Url) -> Self {
        Self {
            base_url,
            startup_delay_secs: 0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.base_url.scheme() {
            "http" | "https" => {}
            other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
        if self.base_url.host_str().map_or(true, str::is_empty) {
            return Err(ConfigError::MissingHost(self.base_url.to_string()));
        }
        if self.default_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("default_timeout_secs"));
        }
        if self.upload_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("upload_timeout_secs"));
        }
        if self.generation_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("generation_timeout_secs"));
        }
        if self.service_name.trim().is_empty() {
            return Err(ConfigError::EmptyServiceName);
        }
        Ok(())
    }

    pub fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.default_timeout_secs)
    }

    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    pub fn startup_delay(&self) -> Duration {
        Duration::from_secs(self.startup_delay_secs)
    }

    /// Apply values coming from the environment or the command line.
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(url) = &overrides.base_url {
            self.base_url = url.clone();
        }
        if let Some(secs) = overrides.default_timeout_secs {
            self.default_timeout_secs = secs;
        }
        if let Some(secs) = overrides.upload_timeout_secs {
            self.upload_timeout_secs = secs;
        }
        if let Some(secs) = overrides.generation_timeout_secs {
            self.generation_timeout_secs = secs;
        }
        if let Some(secs) = overrides.startup_delay_secs {
            self.startup_delay_secs = secs;
        }
        if let Some(dir) = &overrides.scratch_dir {
            self.scratch_dir = Some(dir.clone());
        }
        if let Some(path) = &overrides.metrics_file {
            self.metrics_file = Some(path.clone());
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        if overrides.lenient {
            self.strict_fields = false;
        }
    }
}

/// Highest-precedence settings, filled from CLI flags and environment variables.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<Url>,
    pub default_timeout_secs: Option<u64>,
    pub upload_timeout_secs: Option<u64>,
    pub generation_timeout_secs: Option<u64>,
    pub startup_delay_secs: Option<u64>,
    pub scratch_dir: Option<PathBuf>,
    pub metrics_file: Option<PathBuf>,
    pub format: Option<ReportFormat>,
    pub lenient: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_script() {
        let config = SmokeConfig::default();
        assert_eq!(config.base_url.as_str(), "http://localhost:8000/");
        assert_eq!(config.default_timeout(), Duration::from_secs(5));
        assert_eq!(config.upload_timeout(), Duration::from_secs(10));
        assert_eq!(config.generation_timeout(), Duration::from_secs(30));
        assert_eq!(config.startup_delay(), Duration::from_secs(2));
        assert!(config.strict_fields);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_http_scheme() {
        let config = SmokeConfig::for_base_url(Url::parse("ftp://example.com").unwrap());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnsupportedScheme(s)) if s == "ftp"
        ));
    }

    #[test]
    fn rejects_zero_generation_timeout() {
        let mut config = SmokeConfig::default();
        config.generation_timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroTimeout("generation_timeout_secs"))
        ));
    }

    #[test]
    fn overrides_replace_only_what_they_set() {
        let mut config = SmokeConfig::default();
        config.apply(&ConfigOverrides {
            default_timeout_secs: Some(1),
            format: Some(ReportFormat::Json),
            lenient: true,
            ..ConfigOverrides::default()
        });
        assert_eq!(config.default_timeout_secs, 1);
        assert_eq!(config.generation_timeout_secs, 30);
        assert_eq!(config.format, ReportFormat::Json);
        assert!(!config.strict_fields);
        assert_eq!(config.base_url.as_str(), "http://localhost:8000/");
    }
}
