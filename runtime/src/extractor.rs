//! One extraction cycle: launch, navigate, extract, close.
//!
//! The browser context is closed on every exit path. Navigation has its own
//! bound; the optional overall deadline covers launch, navigation and
//! extraction together, and closing happens after it either way.

use crate::config::ExtractorConfig;
use crate::error::{ExtractError, Result};
use crate::extraction::{parse_front_page, StoryEntry};
use crate::renderer::{ChromiumRenderer, RenderContext, Renderer};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, warn};
use url::Url;

/// Result of one extraction cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontPage {
    /// URL that was requested.
    pub source_url: String,
    /// URL the browser ended up on.
    pub final_url: String,
    pub fetched_at: DateTime<Utc>,
    /// Number of story rows present on the page.
    pub total_rows: usize,
    pub load_time_ms: u64,
    /// At most `limit` stories, in page order.
    pub stories: Vec<StoryEntry>,
}

/// Runs extraction cycles against a [`Renderer`].
pub struct Extractor {
    renderer: Arc<dyn Renderer>,
    config: ExtractorConfig,
}

impl Extractor {
    /// Create an extractor over any renderer.
    pub fn new(renderer: Arc<dyn Renderer>, config: ExtractorConfig) -> Self {
        Self { renderer, config }
    }

    /// Validate `config` and build an extractor that drives headless Chromium.
    pub fn with_chromium(config: ExtractorConfig) -> Result<Self> {
        config.validate()?;
        let renderer = Arc::new(ChromiumRenderer::new(&config));
        Ok(Self::new(renderer, config))
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract the top `limit` stories from the configured page.
    pub async fn extract_top_stories(&self, limit: usize) -> Result<Vec<StoryEntry>> {
        Ok(self.cycle(limit).await?.stories)
    }

    /// Run one cycle with the configured limit and return the full result.
    pub async fn extract_front_page(&self) -> Result<FrontPage> {
        self.cycle(self.config.limit).await
    }

    async fn cycle(&self, limit: usize) -> Result<FrontPage> {
        let started = Instant::now();
        let deadline = self.config.deadline();

        // A launch cut short by the deadline never yields a context to close.
        let mut context = within(deadline, started, self.renderer.new_context()).await?;

        let outcome = within(deadline, started, self.run_page(&mut *context, limit)).await;
        let closed = context.close().await;

        match (outcome, closed) {
            (Ok(page), Ok(())) => Ok(page),
            (Ok(_), Err(close_err)) => Err(close_err),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(close_err)) => {
                warn!("browser close also failed: {close_err}");
                Err(e)
            }
        }
    }

    async fn run_page(&self, context: &mut dyn RenderContext, limit: usize) -> Result<FrontPage> {
        let url = self.config.url.as_str();
        let timeout = self.config.navigation_timeout();

        info!("navigating to {url}");
        let nav = tokio::time::timeout(timeout, context.navigate(url))
            .await
            .map_err(|_| ExtractError::NavigationTimeout {
                url: url.to_string(),
                timeout,
            })??;

        let html = context.content().await?;
        let base = match Url::parse(&nav.final_url) {
            Ok(u) => u,
            Err(_) => self.config.base_url()?,
        };
        let (total_rows, stories) = parse_front_page(&html, limit, &base)?;

        info!(
            "extracted {} of {total_rows} stories in {}ms",
            stories.len(),
            nav.load_time_ms
        );

        Ok(FrontPage {
            source_url: url.to_string(),
            final_url: nav.final_url,
            fetched_at: Utc::now(),
            total_rows,
            load_time_ms: nav.load_time_ms,
            stories,
        })
    }
}

/// Await `fut`, bounded by whatever is left of `deadline` since `started`.
async fn within<T, F>(deadline: Option<Duration>, started: Instant, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match deadline {
        None => fut.await,
        Some(limit) => {
            let remaining = limit.saturating_sub(started.elapsed());
            tokio::time::timeout(remaining, fut)
                .await
                .map_err(|_| ExtractError::DeadlineExceeded(limit))?
        }
    }
}
