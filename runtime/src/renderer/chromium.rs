//! Headless Chromium renderer built on `chromiumoxide`.

use super::{NavigationResult, RenderContext, Renderer};
use crate::config::ExtractorConfig;
use crate::error::{ExtractError, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Binaries looked up on `PATH` when no explicit Chromium path is configured.
const CHROMIUM_NAMES: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
];

/// chromiumoxide's own per-command timeout when none is configured.
const MIN_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Slack on top of the navigation bound, so the extractor's own timeout
/// fires before the CDP request is dropped.
const REQUEST_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

/// Locate a Chromium binary: `HN_FRONT_CHROMIUM_PATH` first, then `PATH`.
pub fn find_chromium() -> Option<PathBuf> {
    if let Ok(p) = std::env::var("HN_FRONT_CHROMIUM_PATH") {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    CHROMIUM_NAMES.iter().find_map(|name| which::which(name).ok())
}

/// Launches one Chromium process per context.
#[derive(Debug, Clone)]
pub struct ChromiumRenderer {
    headless: bool,
    no_sandbox: bool,
    executable: Option<PathBuf>,
    proxy_server: Option<String>,
    navigation_timeout: Duration,
    profile_root: PathBuf,
}

impl ChromiumRenderer {
    /// Build a renderer from the browser-related parts of the configuration.
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            headless: config.headless,
            no_sandbox: config.no_sandbox,
            executable: config.chromium_path.clone().or_else(find_chromium),
            proxy_server: config.proxy.server_arg(),
            navigation_timeout: config.navigation_timeout(),
            profile_root: std::env::temp_dir(),
        }
    }

    /// Create per-context profile directories under `root` instead of the
    /// system temp dir.
    pub fn with_profile_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.profile_root = root.into();
        self
    }

    /// Timeout chromiumoxide applies to each CDP request, `Page.navigate`
    /// included. Never shorter than the navigation bound.
    fn request_timeout(&self) -> Duration {
        (self.navigation_timeout + REQUEST_TIMEOUT_MARGIN).max(MIN_REQUEST_TIMEOUT)
    }

    fn browser_config(&self, profile_dir: &Path) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .user_data_dir(profile_dir)
            .request_timeout(self.request_timeout());
        if !self.headless {
            builder = builder.with_head();
        }
        if self.no_sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(path) = &self.executable {
            builder = builder.chrome_executable(path);
        }
        if let Some(proxy) = &self.proxy_server {
            builder = builder.arg(format!("--proxy-server={proxy}"));
        }
        builder.build().map_err(ExtractError::Resource)
    }
}

#[async_trait]
impl Renderer for ChromiumRenderer {
    async fn new_context(&self) -> Result<Box<dyn RenderContext>> {
        // Removed on drop, so a failed launch or a cancelled future cleans up
        // after itself.
        let profile = tempfile::Builder::new()
            .prefix("hn-front-")
            .tempdir_in(&self.profile_root)
            .map_err(|e| ExtractError::Resource(format!("creating browser profile: {e}")))?;
        let config = self.browser_config(profile.path())?;

        let start = Instant::now();
        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ExtractError::Resource(format!("failed to launch Chromium: {e}")))?;

        // The handler drives the CDP connection and must be polled for the
        // browser to make progress.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("browser handler event error: {e}");
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                // The page never opened; still tear the process down.
                if let Err(close_err) = browser.close().await {
                    warn!("closing browser after failed page open: {close_err}");
                }
                let _ = browser.wait().await;
                handler_task.abort();
                return Err(ExtractError::Resource(format!("failed to open page: {e}")));
            }
        };

        info!("launched Chromium in {}ms", start.elapsed().as_millis());

        Ok(Box::new(ChromiumContext {
            browser,
            page,
            handler_task,
            navigation_timeout: self.navigation_timeout,
            profile,
        }))
    }
}

/// A running Chromium process and its single page.
struct ChromiumContext {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    navigation_timeout: Duration,
    profile: TempDir,
}

#[async_trait]
impl RenderContext for ChromiumContext {
    async fn navigate(&mut self, url: &str) -> Result<NavigationResult> {
        let start = Instant::now();
        self.page
            .goto(url)
            .await
            .map_err(|e| navigation_error(url, self.navigation_timeout, e))?;

        let final_url = self
            .page
            .url()
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| url.to_string());

        Ok(NavigationResult {
            final_url,
            load_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn content(&mut self) -> Result<String> {
        self.page
            .content()
            .await
            .map_err(|e| ExtractError::ExtractionFailure(format!("reading page DOM: {e}")))
    }

    async fn close(self: Box<Self>) -> Result<()> {
        let Self {
            mut browser,
            page,
            handler_task,
            profile,
            ..
        } = *self;
        drop(page);

        let closed = browser
            .close()
            .await
            .map_err(|e| ExtractError::Resource(format!("closing browser: {e}")));
        if let Err(e) = browser.wait().await {
            warn!("waiting for browser exit: {e}");
        }
        handler_task.abort();
        if let Err(e) = profile.close() {
            debug!("leaving browser profile behind: {e}");
        }
        debug!("browser closed");

        closed.map(|_| ())
    }
}

/// chromiumoxide reports an evicted `Page.navigate` as `CdpError::Timeout`.
fn navigation_error(url: &str, timeout: Duration, err: CdpError) -> ExtractError {
    match err {
        CdpError::Timeout => ExtractError::NavigationTimeout {
            url: url.to_string(),
            timeout,
        },
        other => ExtractError::Navigation(format!("{url}: {other}")),
    }
}
