//! Generator configuration management.

use std::{path::Path, time::Duration};

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for Nichepage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input and output locations.
    #[serde(default)]
    pub site: SiteConfig,

    /// Product search API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Affiliate link settings.
    #[serde(default)]
    pub affiliate: AffiliateConfig,
}

/// Site generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Directory holding the template document and its assets.
    #[serde(default = "default_template_dir")]
    pub template_dir: String,

    /// File name of the template document inside `template_dir`.
    #[serde(default = "default_template_file")]
    pub template_file: String,

    /// Root directory receiving one sub-directory per niche.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// CSV file listing the niches to build.
    #[serde(default = "default_niches_file")]
    pub niches_file: String,

    /// Year shown in page titles and headings.
    #[serde(default = "default_year")]
    pub year: i32,

    /// Skip niches that returned no products instead of writing an empty page.
    #[serde(default)]
    pub skip_empty: bool,

    /// Optional JSON snapshot of the normalized products, written next to the page.
    #[serde(default)]
    pub data_file: Option<String>,
}

/// Product search API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API host, also sent as the `x-rapidapi-host` header.
    #[serde(default = "default_api_host")]
    pub host: String,

    /// Search endpoint path on `host`.
    #[serde(default = "default_api_path")]
    pub path: String,

    /// Marketplace country code.
    #[serde(default = "default_country")]
    pub country: String,

    /// Result page to request.
    #[serde(default = "default_page")]
    pub page: u32,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// API key. Usually injected from the environment rather than written to the file.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Affiliate configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AffiliateConfig {
    /// Tracking tag appended to product links. Empty or absent disables rewriting.
    #[serde(default)]
    pub tag: Option<String>,
}

// Default value functions
fn default_template_dir() -> String {
    "site_template".to_string()
}

fn default_template_file() -> String {
    "index.html".to_string()
}

fn default_output_dir() -> String {
    "dist".to_string()
}

fn default_niches_file() -> String {
    "niches.csv".to_string()
}

fn default_year() -> i32 {
    Utc::now().year()
}

fn default_api_host() -> String {
    "amazon24.p.rapidapi.com".to_string()
}

fn default_api_path() -> String {
    "/api/product".to_string()
}

fn default_country() -> String {
    "US".to_string()
}

fn default_page() -> u32 {
    1
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            template_dir: default_template_dir(),
            template_file: default_template_file(),
            output_dir: default_output_dir(),
            niches_file: default_niches_file(),
            year: default_year(),
            skip_empty: false,
            data_file: None,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_api_host(),
            path: default_api_path(),
            country: default_country(),
            page: default_page(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}

impl ApiConfig {
    /// Full search endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> String {
        let path = self.path.trim_start_matches('/');
        format!("https://{}/{path}", self.host.trim_end_matches('/'))
    }

    /// Request timeout as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AffiliateConfig {
    /// The configured tag, or an empty string when links stay untagged.
    #[must_use]
    pub fn tag(&self) -> &str {
        self.tag.as_deref().map(str::trim).unwrap_or_default()
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration using the config crate, layering `NICHEPAGE__*` environment variables.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix("NICHEPAGE").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.site.template_file.is_empty() {
            return Err(CoreError::config("site.template_file cannot be empty"));
        }

        if self.site.output_dir.is_empty() {
            return Err(CoreError::config("site.output_dir cannot be empty"));
        }

        if self.api.host.is_empty() {
            return Err(CoreError::config("api.host cannot be empty"));
        }

        if !self.api.path.starts_with('/') {
            tracing::warn!("api.path should start with a slash");
        }

        if self.api.timeout_secs == 0 {
            return Err(CoreError::config("api.timeout_secs must be positive"));
        }

        Ok(())
    }

    /// Path of the template document.
    #[must_use]
    pub fn template_path(&self) -> std::path::PathBuf {
        Path::new(&self.site.template_dir).join(&self.site.template_file)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn create_test_config() -> String {
        r#"
[site]
template_dir = "templates/shop"
output_dir = "public"
niches_file = "data/niches.csv"
year = 2025
skip_empty = true
data_file = "products.json"

[api]
host = "amazon-real-time-api.p.rapidapi.com"
path = "/search"
country = "DE"
timeout_secs = 15

[affiliate]
tag = "scconnec0d-20"
"#
        .to_string()
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("nichepage.toml");
        let mut file = std::fs::File::create(&config_path).expect("create file");
        file.write_all(create_test_config().as_bytes())
            .expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.template_dir, "templates/shop");
        assert_eq!(config.site.template_file, "index.html");
        assert_eq!(config.site.output_dir, "public");
        assert_eq!(config.site.niches_file, "data/niches.csv");
        assert_eq!(config.site.year, 2025);
        assert!(config.site.skip_empty);
        assert_eq!(config.site.data_file.as_deref(), Some("products.json"));
        assert_eq!(config.api.host, "amazon-real-time-api.p.rapidapi.com");
        assert_eq!(config.api.country, "DE");
        assert_eq!(config.api.page, 1);
        assert_eq!(config.api.timeout(), Duration::from_secs(15));
        assert_eq!(config.affiliate.tag(), "scconnec0d-20");
    }

    #[test]
    fn test_config_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("nichepage.toml");
        std::fs::write(&config_path, "").expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.template_dir, "site_template");
        assert_eq!(config.site.output_dir, "dist");
        assert_eq!(config.site.niches_file, "niches.csv");
        assert!(!config.site.skip_empty);
        assert!(config.site.data_file.is_none());
        assert_eq!(config.api.host, "amazon24.p.rapidapi.com");
        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.api.api_key.is_none());
        assert_eq!(config.affiliate.tag(), "");
    }

    #[test]
    fn test_endpoint() {
        let api = ApiConfig::default();
        assert_eq!(api.endpoint(), "https://amazon24.p.rapidapi.com/api/product");

        let api = ApiConfig {
            host: "example.test/".to_string(),
            path: "search".to_string(),
            ..ApiConfig::default()
        };
        assert_eq!(api.endpoint(), "https://example.test/search");
    }

    #[test]
    fn test_blank_tag_is_empty() {
        let affiliate = AffiliateConfig {
            tag: Some("   ".to_string()),
        };
        assert_eq!(affiliate.tag(), "");
    }

    #[test]
    fn test_template_path() {
        let config = Config::default();
        assert_eq!(
            config.template_path(),
            Path::new("site_template").join("index.html")
        );
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("nichepage.toml");
        std::fs::write(&config_path, "[api]\ntimeout_secs = 0\n").expect("write");

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("timeout_secs must be positive")
        );
    }

    #[test]
    fn test_config_not_found() {
        let result = Config::load(Path::new("/nonexistent/nichepage.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_malformed_config_is_config_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("nichepage.toml");
        std::fs::write(&config_path, "[site\nyear = ").expect("write");

        let err = Config::load(&config_path).unwrap_err();
        assert!(matches!(err, CoreError::Config { source: Some(_), .. }));
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_with_env_without_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = Config::load_with_env(&dir.path().join("missing.toml")).expect("load");
        assert_eq!(config.site.template_file, "index.html");
    }
}
