//! Shared CLI output: colors, check lines, and story rendering.
//!
//! Stories go to stdout; everything else (progress, checks, hints) goes to
//! stderr so the story list can be piped on its own.

use crate::extraction::StoryEntry;
use std::io::{IsTerminal, Write};

/// Check if color output is enabled.
pub fn color_enabled() -> bool {
    // Respect NO_COLOR env (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("HN_FRONT_NO_COLOR").is_ok() {
        return false;
    }
    std::io::stdout().is_terminal()
}

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Colored string builder.
pub struct Styled {
    use_color: bool,
}

impl Default for Styled {
    fn default() -> Self {
        Self::new()
    }
}

impl Styled {
    pub fn new() -> Self {
        Self {
            use_color: color_enabled(),
        }
    }

    /// A builder that never emits escape codes.
    pub fn plain() -> Self {
        Self { use_color: false }
    }

    /// Green checkmark symbol.
    pub fn ok_sym(&self) -> &str {
        if self.use_color {
            "\x1b[32m\u{2713}\x1b[0m"
        } else {
            "OK"
        }
    }

    /// Red X symbol.
    pub fn fail_sym(&self) -> &str {
        if self.use_color {
            "\x1b[31m\u{2717}\x1b[0m"
        } else {
            "!!"
        }
    }

    /// Yellow warning symbol.
    pub fn warn_sym(&self) -> &str {
        if self.use_color {
            "\x1b[33m\u{26a0}\x1b[0m"
        } else {
            "??"
        }
    }

    fn paint(&self, code: &str, s: &str) -> String {
        if self.use_color {
            format!("{code}{s}{RESET}")
        } else {
            s.to_string()
        }
    }

    pub fn green(&self, s: &str) -> String {
        self.paint(GREEN, s)
    }

    pub fn red(&self, s: &str) -> String {
        self.paint(RED, s)
    }

    pub fn yellow(&self, s: &str) -> String {
        self.paint(YELLOW, s)
    }

    pub fn dim(&self, s: &str) -> String {
        self.paint(DIM, s)
    }

    pub fn bold(&self, s: &str) -> String {
        self.paint(BOLD, s)
    }
}

/// Print a branded header for CLI output.
pub fn print_header(s: &Styled) {
    eprintln!(
        "  {} {}",
        s.bold("hn-front"),
        s.dim(&format!("v{}", env!("CARGO_PKG_VERSION")))
    );
    eprintln!();
}

/// Print a section header (e.g., "System", "Browser").
pub fn print_section(s: &Styled, title: &str) {
    eprintln!("  {}", s.bold(title));
}

/// Print a check result line with symbol and label/value.
pub fn print_check(symbol: &str, label: &str, value: &str) {
    eprintln!("    {symbol} {label:<16} {value}");
}

/// Print an indented detail/fix line under a check.
pub fn print_detail(msg: &str) {
    eprintln!("                        {msg}");
}

/// Print a status summary line at the bottom.
pub fn print_status(s: &Styled, status: &str, msg: &str) {
    eprintln!();
    eprintln!("  {}: {status} ({msg})", s.bold("Status"));
}

/// Write one story block: rank and title, the indented link, a blank line.
pub fn write_story<W: Write>(w: &mut W, s: &Styled, story: &StoryEntry) -> std::io::Result<()> {
    writeln!(w, "{}. {}", story.rank, s.bold(&story.title))?;
    match &story.link {
        Some(link) => writeln!(w, "   {link}")?,
        None => writeln!(w, "   {}", s.dim("(no link)"))?,
    }
    writeln!(w)
}

/// Write every story in order.
pub fn write_stories<W: Write>(
    w: &mut W,
    s: &Styled,
    stories: &[StoryEntry],
) -> std::io::Result<()> {
    for story in stories {
        write_story(w, s, story)?;
    }
    Ok(())
}

/// The line announcing how many stories were found and how many are shown.
pub fn summary_line(total_rows: usize, shown: usize) -> String {
    format!("Found {total_rows} stories, showing the first {shown}:")
}

/// Check if --quiet mode is active.
pub fn is_quiet() -> bool {
    std::env::var("HN_FRONT_QUIET").is_ok()
}

/// Check if --verbose mode is active.
pub fn is_verbose() -> bool {
    std::env::var("HN_FRONT_VERBOSE").is_ok()
}

/// Check if --json mode is active.
pub fn is_json() -> bool {
    std::env::var("HN_FRONT_JSON").is_ok()
}

/// Print JSON output to stdout.
pub fn print_json(value: &serde_json::Value) {
    if let Ok(s) = serde_json::to_string_pretty(value) {
        println!("{s}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story(rank: u32, title: &str, link: Option<&str>) -> StoryEntry {
        StoryEntry {
            rank,
            title: title.into(),
            link: link.map(String::from),
            item_id: None,
            discussion_url: None,
        }
    }

    #[test]
    fn test_story_block_layout() {
        let mut buf = Vec::new();
        write_story(&mut buf, &Styled::plain(), &story(1, "Hello", Some("https://a.b/"))).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "1. Hello\n   https://a.b/\n\n");
    }

    #[test]
    fn test_story_without_link() {
        let mut buf = Vec::new();
        write_story(&mut buf, &Styled::plain(), &story(2, "Orphan", None)).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "2. Orphan\n   (no link)\n\n");
    }

    #[test]
    fn test_stories_in_order() {
        let mut buf = Vec::new();
        let stories = [story(1, "A", Some("a")), story(2, "B", Some("b"))];
        write_stories(&mut buf, &Styled::plain(), &stories).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "1. A\n   a\n\n2. B\n   b\n\n"
        );
    }

    #[test]
    fn test_plain_styling() {
        let s = Styled::plain();
        assert_eq!(s.ok_sym(), "OK");
        assert_eq!(s.red("x"), "x");
        assert_eq!(summary_line(30, 5), "Found 30 stories, showing the first 5:");
    }
}
