//! Story rows from a rendered Hacker News front page.

use crate::error::{ExtractError, Result};
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

/// One story row.
pub const ROW_SELECTOR: &str = ".athing";
/// Title anchor inside a row; carries both the title text and the link.
pub const TITLE_SELECTOR: &str = ".titleline > a";
/// Rank label inside a row, e.g. `"3."`.
pub const RANK_SELECTOR: &str = ".rank";

/// A single story as shown on the front page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryEntry {
    /// Position label with trailing punctuation stripped.
    pub rank: u32,
    pub title: String,
    /// `href` of the title anchor, exactly as the page wrote it.
    pub link: Option<String>,
    /// Hacker News item id, taken from the row's `id` attribute.
    pub item_id: Option<u64>,
    /// Comment thread for the story.
    pub discussion_url: Option<String>,
}

/// Strip whitespace and trailing punctuation from a rank label and parse it.
///
/// `"3."` becomes `3`. Returns `None` when what remains is not a number.
pub fn normalize_rank(label: &str) -> Option<u32> {
    label
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_punctuation())
        .trim()
        .parse()
        .ok()
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| ExtractError::ExtractionFailure(format!("bad selector {css}: {e}")))
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse the page and extract at most `limit` stories in page order.
///
/// Returns the number of rows found on the page alongside the stories.
/// A page without rows yields an empty list; a row missing its title anchor
/// or rank label fails the whole extraction.
pub fn parse_front_page(html: &str, limit: usize, base: &Url) -> Result<(usize, Vec<StoryEntry>)> {
    let row_sel = selector(ROW_SELECTOR)?;
    let title_sel = selector(TITLE_SELECTOR)?;
    let rank_sel = selector(RANK_SELECTOR)?;

    let document = Html::parse_document(html);
    let rows: Vec<ElementRef<'_>> = document.select(&row_sel).collect();
    let total = rows.len();
    debug!("found {total} story rows");

    let mut stories = Vec::with_capacity(limit.min(total));
    for (index, row) in rows.into_iter().take(limit).enumerate() {
        stories.push(parse_row(row, index, &title_sel, &rank_sel, base)?);
    }

    Ok((total, stories))
}

fn parse_row(
    row: ElementRef<'_>,
    index: usize,
    title_sel: &Selector,
    rank_sel: &Selector,
    base: &Url,
) -> Result<StoryEntry> {
    let anchor = row.select(title_sel).next().ok_or_else(|| {
        ExtractError::ExtractionFailure(format!("row {} has no {TITLE_SELECTOR} element", index + 1))
    })?;
    let rank_el = row.select(rank_sel).next().ok_or_else(|| {
        ExtractError::ExtractionFailure(format!("row {} has no {RANK_SELECTOR} element", index + 1))
    })?;

    let rank_label = element_text(rank_el);
    let rank = normalize_rank(&rank_label).ok_or_else(|| {
        ExtractError::ExtractionFailure(format!(
            "row {} has a non-numeric rank label {rank_label:?}",
            index + 1
        ))
    })?;

    let title = element_text(anchor);
    let link = anchor.value().attr("href").map(str::to_string);
    if link.is_none() {
        warn!("story {rank} has no link");
    }

    let item_id = row.value().attr("id").and_then(|id| id.parse::<u64>().ok());
    let discussion_url = item_id
        .and_then(|id| base.join(&format!("item?id={id}")).ok())
        .map(String::from);

    debug!("story {rank}: {title}");

    Ok(StoryEntry {
        rank,
        title,
        link,
        item_id,
        discussion_url,
    })
}
