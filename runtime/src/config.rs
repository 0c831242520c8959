//! Extractor configuration.
//!
//! Built up in layers: defaults, then an optional JSON file, then
//! `HN_FRONT_*` environment overrides, then whatever the CLI sets last.

use crate::error::{ExtractError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Hacker News front page.
pub const DEFAULT_URL: &str = "https://news.ycombinator.com/";

/// Number of stories extracted when nothing else is configured.
pub const DEFAULT_LIMIT: usize = 5;

/// Upper bound on page navigation, in seconds.
pub const DEFAULT_NAVIGATION_TIMEOUT_SECS: u64 = 30;

/// Everything one extraction cycle needs to know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum number of stories to return.
    pub limit: usize,
    /// Page to navigate to.
    pub url: String,
    /// Bound on the navigation step.
    pub navigation_timeout_secs: u64,
    /// Optional bound on the whole cycle (launch, navigate, extract).
    pub deadline_secs: Option<u64>,
    /// Run Chromium without a window.
    pub headless: bool,
    /// Explicit Chromium binary. Discovered automatically when unset.
    pub chromium_path: Option<PathBuf>,
    /// Pass `--no-sandbox` to Chromium (needed in most containers).
    pub no_sandbox: bool,
    /// Outbound proxy for the browser.
    pub proxy: ProxyConfig,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            url: DEFAULT_URL.to_string(),
            navigation_timeout_secs: DEFAULT_NAVIGATION_TIMEOUT_SECS,
            deadline_secs: None,
            headless: true,
            chromium_path: None,
            no_sandbox: false,
            proxy: ProxyConfig::default(),
        }
    }
}

/// Proxy section of the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    pub enabled: bool,
    /// Scheme, e.g. `socks5` or `http`.
    #[serde(rename = "type")]
    pub kind: String,
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            kind: "socks5".to_string(),
            host: "127.0.0.1".to_string(),
            port: 18080,
            username: None,
            password: None,
        }
    }
}

impl ProxyConfig {
    /// Parse a proxy URL such as `socks5://127.0.0.1:1080` into an enabled config.
    pub fn from_url(raw: &str) -> Result<Self> {
        let parsed =
            Url::parse(raw).map_err(|e| ExtractError::Config(format!("proxy {raw}: {e}")))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| ExtractError::Config(format!("proxy {raw} has no host")))?;
        let port = parsed
            .port_or_known_default()
            .ok_or_else(|| ExtractError::Config(format!("proxy {raw} has no port")))?;
        let username = Some(parsed.username().to_string()).filter(|u| !u.is_empty());

        Ok(Self {
            enabled: true,
            kind: parsed.scheme().to_string(),
            host: host.to_string(),
            port,
            username,
            password: parsed.password().map(str::to_string),
        })
    }

    /// The value for Chromium's `--proxy-server` flag, if the proxy is on.
    ///
    /// Chromium does not accept credentials in this flag, so they are dropped.
    pub fn server_arg(&self) -> Option<String> {
        if !self.enabled {
            return None;
        }
        if self.username.is_some() || self.password.is_some() {
            warn!("proxy credentials are not supported by Chromium's --proxy-server; ignoring them");
        }
        Some(format!("{}://{}:{}", self.kind, self.host, self.port))
    }
}

impl ExtractorConfig {
    /// Default location of the config file: `<config_dir>/hn-front/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("hn-front").join("config.json"))
    }

    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ExtractError::Config(format!("reading {}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| ExtractError::Config(format!("parsing {}: {e}", path.display())))?;
        info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration from `explicit`, or from the default path when it
    /// exists, then apply environment overrides.
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_json_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_json_file(&path)?,
                None => {
                    debug!("no config file found, using defaults");
                    Self::default()
                }
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `HN_FRONT_*` overrides using `lookup` to read variables.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("HN_FRONT_URL") {
            self.url = url;
        }
        if let Some(path) = lookup("HN_FRONT_CHROMIUM_PATH") {
            self.chromium_path = Some(PathBuf::from(path));
        }
        if lookup("HN_FRONT_CHROMIUM_NO_SANDBOX").is_some() {
            self.no_sandbox = true;
        }
    }

    /// Check the values that cannot be enforced by the type system.
    pub fn validate(&self) -> Result<()> {
        let url = self.base_url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ExtractError::Config(format!(
                "url must be http or https, got {}",
                url.scheme()
            )));
        }
        if self.navigation_timeout_secs == 0 {
            return Err(ExtractError::Config(
                "navigation_timeout_secs must be greater than zero".into(),
            ));
        }
        if self.deadline_secs == Some(0) {
            return Err(ExtractError::Config(
                "deadline_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// The configured page URL, parsed.
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.url).map_err(|e| ExtractError::Config(format!("url {}: {e}", self.url)))
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }
}
