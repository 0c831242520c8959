//! DOM extraction.
//!
//! Turns a rendered page snapshot into typed story records. Selectors are
//! fixed to the Hacker News markup; if the site changes its layout the
//! extraction fails or comes back empty rather than guessing.

pub mod front_page;

pub use front_page::{normalize_rank, parse_front_page, StoryEntry};
