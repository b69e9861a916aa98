//! Configuration types for formasi-export

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, time::Duration};

/// Upstream vacancy API settings
///
/// Describes where pages are fetched from and how requests are shaped.
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Endpoint returning one page of vacancies per request
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Query parameter carrying the education code (default: "kode_ref_pend")
    #[serde(default = "default_education_param")]
    pub education_param: String,

    /// Query parameter carrying the category code (default: "pengadaan_kd")
    #[serde(default = "default_category_param")]
    pub category_param: String,

    /// Category (procurement type) code sent with every request (default: "2")
    #[serde(default = "default_category_code")]
    pub category_code: String,

    /// Records per upstream page; must match what the upstream serves (default: 10)
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// User-Agent header sent upstream
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Origin header sent upstream
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Referer header sent upstream
    #[serde(default = "default_referer")]
    pub referer: String,

    /// Base of the per-record detail link; the record identifier is appended
    #[serde(default = "default_detail_base_url")]
    pub detail_base_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            education_param: default_education_param(),
            category_param: default_category_param(),
            category_code: default_category_code(),
            page_size: default_page_size(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            origin: default_origin(),
            referer: default_referer(),
            detail_base_url: default_detail_base_url(),
        }
    }
}

/// HTTP server integration configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ServerIntegrationConfig {
    /// HTTP surface configuration
    #[serde(default)]
    pub api: ApiConfig,
}

/// HTTP surface configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Address to bind to (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Enable CORS for browser access (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Enable Swagger UI at /swagger-ui (default: false)
    #[serde(default)]
    pub swagger_ui: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
            swagger_ui: false,
        }
    }
}

/// Main configuration
///
/// - [`upstream`](UpstreamConfig) - where and how vacancy pages are fetched
/// - [`server`](ServerIntegrationConfig) - the HTTP surface
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream API settings
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// HTTP surface settings
    #[serde(default)]
    pub server: ServerIntegrationConfig,
}

impl Config {
    /// Build a configuration from defaults overlaid with environment variables
    ///
    /// Recognized variables:
    /// - `PORT` - port to listen on (host stays 0.0.0.0)
    /// - `FORMASI_API_URL` - upstream endpoint
    /// - `FORMASI_CATEGORY_CODE` - category code sent upstream
    /// - `FORMASI_TIMEOUT_SECS` - per-request timeout
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reading variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(port) = lookup("PORT") {
            let port: u16 = port.trim().parse().map_err(|_| Error::Config {
                message: format!("invalid port: {port}"),
                key: Some("PORT".to_string()),
            })?;
            config.server.api.bind_address.set_port(port);
        }

        if let Some(url) = lookup("FORMASI_API_URL") {
            config.upstream.base_url = url;
        }

        if let Some(code) = lookup("FORMASI_CATEGORY_CODE") {
            config.upstream.category_code = code;
        }

        if let Some(secs) = lookup("FORMASI_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| Error::Config {
                message: format!("invalid timeout: {secs}"),
                key: Some("FORMASI_TIMEOUT_SECS".to_string()),
            })?;
            config.upstream.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the fetcher cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.upstream.page_size == 0 {
            return Err(Error::Config {
                message: "page size must be greater than zero".to_string(),
                key: Some("page_size".to_string()),
            });
        }
        if self.upstream.timeout.is_zero() {
            return Err(Error::Config {
                message: "timeout must be greater than zero".to_string(),
                key: Some("timeout".to_string()),
            });
        }
        url::Url::parse(&self.upstream.base_url).map_err(|e| Error::Config {
            message: format!("invalid upstream URL '{}': {}", self.upstream.base_url, e),
            key: Some("base_url".to_string()),
        })?;
        Ok(())
    }
}

fn default_base_url() -> String {
    "https://api-sscasn.bkn.go.id/2024/portal/spf".to_string()
}

fn default_education_param() -> String {
    "kode_ref_pend".to_string()
}

fn default_category_param() -> String {
    "pengadaan_kd".to_string()
}

fn default_category_code() -> String {
    "2".to_string()
}

fn default_page_size() -> usize {
    10
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/127.0.0.0 Safari/537.36".to_string()
}

fn default_origin() -> String {
    "https://sscasn.bkn.go.id".to_string()
}

fn default_referer() -> String {
    "https://sscasn.bkn.go.id/".to_string()
}

fn default_detail_base_url() -> String {
    "https://sscasn.bkn.go.id/detailformasi".to_string()
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".into()]
}

fn default_true() -> bool {
    true
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
