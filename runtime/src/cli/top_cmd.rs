//! `hn-front top` — print the top stories from the front page.

use crate::cli::output::{self, Styled};
use crate::cli::progress;
use crate::config::ExtractorConfig;
use crate::extractor::{Extractor, FrontPage};
use anyhow::{Context, Result};
use indicatif::ProgressBar;
use std::io::Write;

/// Run one extraction cycle and print the result.
pub async fn run(config: ExtractorConfig) -> Result<()> {
    let extractor = Extractor::with_chromium(config).context("invalid configuration")?;
    let json = output::is_json();
    let spinner = progress::create_spinner(
        &format!("Loading {}", extractor.config().url),
        !json && !output::is_quiet(),
    );

    let page = match extractor.extract_front_page().await {
        Ok(page) => page,
        Err(e) => {
            spinner.finish_and_clear();
            if json {
                output::print_json(&serde_json::json!({
                    "error": e.kind(),
                    "message": e.to_string(),
                }));
            }
            return Err(e).context("extraction failed");
        }
    };

    if json {
        spinner.finish_and_clear();
        let value = serde_json::to_value(&page).context("serializing stories")?;
        output::print_json(&value);
        return Ok(());
    }

    finish_with_summary(&spinner, &page);
    print_human(&page)
}

/// Leave the "Found N stories" line in place of the spinner.
fn finish_with_summary(spinner: &ProgressBar, page: &FrontPage) {
    progress::finish(
        spinner,
        &output::summary_line(page.total_rows, page.stories.len()),
    );
}

fn print_human(page: &FrontPage) -> Result<()> {
    let s = Styled::new();
    if !output::is_quiet() {
        eprintln!();
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    output::write_stories(&mut out, &s, &page.stories).context("writing stories")?;
    out.flush().context("flushing stdout")?;

    if output::is_verbose() {
        eprintln!(
            "  {}",
            s.dim(&format!(
                "loaded {} in {}ms",
                page.final_url, page.load_time_ms
            ))
        );
    }
    Ok(())
}
