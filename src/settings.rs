//! Exporter configuration.
//!
//! Settings are layered, lowest precedence first: built-in defaults, an
//! optional TOML file, `ECOBEE_EXPORTER_*` environment variables, and finally
//! command-line flags passed in as [`Overrides`].
//!
//! ```toml
//! listen_addr = "0.0.0.0:9500"
//! metrics_path = "/metrics"
//! prefix = "ecobee"
//! api_endpoint = "https://api.ecobee.com"
//! access_token = "..."
//! timeout = 10
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:9500";
pub const DEFAULT_METRICS_PATH: &str = "/metrics";
pub const DEFAULT_PREFIX: &str = "ecobee";
pub const DEFAULT_API_ENDPOINT: &str = "https://api.ecobee.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const ENV_PREFIX: &str = "ECOBEE_EXPORTER";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid listen address {0:?}")]
    ListenAddr(String),

    #[error("metrics path {0:?} must start with '/'")]
    MetricsPath(String),

    #[error("invalid metric prefix {0:?}")]
    Prefix(String),

    #[error("an access token is required unless a thermostat file is given")]
    MissingToken,
}

/// Validated exporter settings.
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    pub listen_addr: SocketAddr,
    pub metrics_path: String,
    pub prefix: String,
    pub api_endpoint: String,
    pub access_token: Option<String>,
    pub timeout: Duration,
    /// Read thermostats from this saved API response instead of the API.
    pub file: Option<PathBuf>,
}

/// Values given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub listen_addr: Option<String>,
    pub metrics_path: Option<String>,
    pub prefix: Option<String>,
    pub api_endpoint: Option<String>,
    pub access_token: Option<String>,
    pub timeout_secs: Option<u64>,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    listen_addr: String,
    metrics_path: String,
    prefix: String,
    api_endpoint: String,
    #[serde(default)]
    access_token: Option<String>,
    timeout: u64,
    #[serde(default)]
    file: Option<PathBuf>,
}

impl ExporterConfig {
    pub fn builder() -> ExporterConfigBuilder {
        ExporterConfigBuilder::default()
    }

    /// Load settings from every layer and validate them.
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        Self::load_from(path, Environment::with_prefix(ENV_PREFIX), overrides)
    }

    fn load_from(
        path: Option<&Path>,
        env: Environment,
        overrides: &Overrides,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("listen_addr", DEFAULT_LISTEN_ADDR)?
            .set_default("metrics_path", DEFAULT_METRICS_PATH)?
            .set_default("prefix", DEFAULT_PREFIX)?
            .set_default("api_endpoint", DEFAULT_API_ENDPOINT)?
            .set_default("timeout", DEFAULT_TIMEOUT_SECS)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        let raw: RawConfig = builder
            .add_source(env)
            .set_override_option("listen_addr", overrides.listen_addr.clone())?
            .set_override_option("metrics_path", overrides.metrics_path.clone())?
            .set_override_option("prefix", overrides.prefix.clone())?
            .set_override_option("api_endpoint", overrides.api_endpoint.clone())?
            .set_override_option("access_token", overrides.access_token.clone())?
            .set_override_option("timeout", overrides.timeout_secs)?
            .set_override_option(
                "file",
                overrides
                    .file
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned()),
            )?
            .build()?
            .try_deserialize()?;

        let mut config = Self::builder()
            .listen_addr(raw.listen_addr)
            .metrics_path(raw.metrics_path)
            .prefix(raw.prefix)
            .api_endpoint(raw.api_endpoint)
            .timeout(Duration::from_secs(raw.timeout));
        if let Some(token) = raw.access_token {
            config = config.access_token(token);
        }
        if let Some(file) = raw.file {
            config = config.file(file);
        }
        config.build()
    }
}

/// Builder for ExporterConfig.
#[derive(Debug, Default)]
pub struct ExporterConfigBuilder {
    listen_addr: Option<String>,
    metrics_path: Option<String>,
    prefix: Option<String>,
    api_endpoint: Option<String>,
    access_token: Option<String>,
    timeout: Option<Duration>,
    file: Option<PathBuf>,
}

impl ExporterConfigBuilder {
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.listen_addr = Some(addr.into());
        self
    }

    pub fn metrics_path(mut self, path: impl Into<String>) -> Self {
        self.metrics_path = Some(path.into());
        self
    }

    /// Set the prefix shared by every metric name.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = Some(endpoint.into());
        self
    }

    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Apply defaults and validate.
    pub fn build(self) -> Result<ExporterConfig, ConfigError> {
        let listen_addr = self
            .listen_addr
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr: SocketAddr = listen_addr
            .parse()
            .map_err(|_| ConfigError::ListenAddr(listen_addr.clone()))?;

        let metrics_path = self
            .metrics_path
            .unwrap_or_else(|| DEFAULT_METRICS_PATH.to_string());
        if !metrics_path.starts_with('/') {
            return Err(ConfigError::MetricsPath(metrics_path));
        }

        let prefix = self.prefix.unwrap_or_else(|| DEFAULT_PREFIX.to_string());
        if !is_valid_prefix(&prefix) {
            return Err(ConfigError::Prefix(prefix));
        }

        let access_token = self.access_token.filter(|t| !t.is_empty());
        if access_token.is_none() && self.file.is_none() {
            return Err(ConfigError::MissingToken);
        }

        Ok(ExporterConfig {
            listen_addr,
            metrics_path,
            prefix,
            api_endpoint: self
                .api_endpoint
                .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string()),
            access_token,
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            file: self.file,
        })
    }
}

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`
fn is_valid_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let vars: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(vars))
    }

    fn toml(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_builder_defaults() {
        let config = ExporterConfig::builder().access_token("abc").build().unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:9500".parse().unwrap());
        assert_eq!(config.metrics_path, "/metrics");
        assert_eq!(config.prefix, "ecobee");
        assert_eq!(config.api_endpoint, "https://api.ecobee.com");
        assert_eq!(config.access_token.as_deref(), Some("abc"));
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.file.is_none());
    }

    #[test]
    fn test_token_required_without_file() {
        assert!(matches!(
            ExporterConfig::builder().build(),
            Err(ConfigError::MissingToken)
        ));
        assert!(matches!(
            ExporterConfig::builder().access_token("").build(),
            Err(ConfigError::MissingToken)
        ));
        assert!(ExporterConfig::builder()
            .file("/tmp/thermostats.json")
            .build()
            .is_ok());
    }

    #[test]
    fn test_validation() {
        let base = || ExporterConfig::builder().access_token("abc");

        assert!(matches!(
            base().metrics_path("metrics").build(),
            Err(ConfigError::MetricsPath(_))
        ));
        assert!(matches!(
            base().prefix("9lives").build(),
            Err(ConfigError::Prefix(_))
        ));
        assert!(matches!(
            base().prefix("my-home").build(),
            Err(ConfigError::Prefix(_))
        ));
        assert!(matches!(
            base().listen_addr("localhost").build(),
            Err(ConfigError::ListenAddr(_))
        ));
        assert!(base().prefix("home:ecobee_2").build().is_ok());
    }

    #[test]
    fn test_load_defaults_only() {
        let config = ExporterConfig::load_from(
            None,
            env(&[("ECOBEE_EXPORTER_ACCESS_TOKEN", "t")]),
            &Overrides::default(),
        )
        .unwrap();

        assert_eq!(config.prefix, "ecobee");
        assert_eq!(config.access_token.as_deref(), Some("t"));
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_load_layers() {
        let file = toml(
            r#"
            listen_addr = "127.0.0.1:9600"
            prefix = "home"
            access_token = "from-file"
            timeout = 30
            "#,
        );
        let overrides = Overrides {
            prefix: Some("cli".to_string()),
            ..Overrides::default()
        };

        let config = ExporterConfig::load_from(
            Some(file.path()),
            env(&[
                ("ECOBEE_EXPORTER_ACCESS_TOKEN", "from-env"),
                ("ECOBEE_EXPORTER_PREFIX", "env"),
            ]),
            &overrides,
        )
        .unwrap();

        assert_eq!(config.listen_addr, "127.0.0.1:9600".parse().unwrap());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.access_token.as_deref(), Some("from-env"));
        assert_eq!(config.prefix, "cli");
        assert_eq!(config.metrics_path, "/metrics");
    }

    #[test]
    fn test_load_file_override_skips_token() {
        let overrides = Overrides {
            file: Some(PathBuf::from("/tmp/thermostats.json")),
            timeout_secs: Some(3),
            ..Overrides::default()
        };

        let config = ExporterConfig::load_from(None, env(&[]), &overrides).unwrap();

        assert_eq!(config.file, Some(PathBuf::from("/tmp/thermostats.json")));
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert!(config.access_token.is_none());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = ExporterConfig::load_from(
            Some(Path::new("/nonexistent/ecobee.toml")),
            env(&[]),
            &Overrides::default(),
        );
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_is_valid_prefix() {
        assert!(is_valid_prefix("ecobee"));
        assert!(is_valid_prefix("_x"));
        assert!(is_valid_prefix(":a:b"));
        assert!(!is_valid_prefix(""));
        assert!(!is_valid_prefix("a b"));
    }
}
