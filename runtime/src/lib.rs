//! Extract the top stories from the Hacker News front page with a headless
//! browser.
//!
//! One [`Extractor`] cycle launches Chromium, navigates to the front page,
//! reads the rendered DOM and returns at most `limit` [`StoryEntry`] values
//! in page order. The browser is closed on every exit path.
//!
//! ```no_run
//! # async fn demo() -> hn_front::Result<()> {
//! use hn_front::{Extractor, ExtractorConfig};
//!
//! let extractor = Extractor::with_chromium(ExtractorConfig::default())?;
//! for story in extractor.extract_top_stories(5).await? {
//!     println!("{}. {}", story.rank, story.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod extraction;
pub mod extractor;
pub mod renderer;

pub use config::ExtractorConfig;
pub use error::{ExtractError, Result};
pub use extraction::StoryEntry;
pub use extractor::{Extractor, FrontPage};
