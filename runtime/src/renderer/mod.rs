//! Browser rendering abstraction.
//!
//! A [`Renderer`] launches isolated [`RenderContext`]s. Each context owns one
//! browser process and one page; it must be closed with
//! [`RenderContext::close`] when the caller is done with it.

pub mod chromium;

use crate::error::Result;
use async_trait::async_trait;

pub use chromium::ChromiumRenderer;

/// Outcome of a completed navigation.
#[derive(Debug, Clone, Default)]
pub struct NavigationResult {
    /// URL the page ended up on after redirects.
    pub final_url: String,
    /// Time spent navigating, in milliseconds.
    pub load_time_ms: u64,
}

/// Launches browser contexts.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Start a fresh browser context with one blank page.
    async fn new_context(&self) -> Result<Box<dyn RenderContext>>;
}

/// One browser process with one open page.
#[async_trait]
pub trait RenderContext: Send {
    /// Navigate the page and wait for it to finish loading.
    ///
    /// Callers bound this with their own timeout; dropping the future
    /// abandons the navigation.
    async fn navigate(&mut self, url: &str) -> Result<NavigationResult>;

    /// Serialized DOM of the current page.
    async fn content(&mut self) -> Result<String>;

    /// Shut the browser down and release the process.
    async fn close(self: Box<Self>) -> Result<()>;
}
