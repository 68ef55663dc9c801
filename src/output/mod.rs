//! Output module for presenting harvested posts
//!
//! This module handles:
//! - Plain text listings for the terminal
//! - JSON export (one record per post)
//! - Markdown reports with a summary header

mod markdown;

pub use markdown::format_markdown;

use crate::crawler::{Article, CrawlSettings, HarvestSummary};
use crate::HarvestError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Supported result formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line per post
    #[default]
    Text,
    /// Pretty-printed JSON array
    Json,
    /// Markdown report
    Markdown,
}

/// Renders posts in the requested format
///
/// # Example
///
/// ```
/// use ptt_harvest::board::BoardRegistry;
/// use ptt_harvest::crawler::{Article, CrawlSettings, HarvestSummary};
/// use ptt_harvest::output::{render, OutputFormat};
///
/// let settings = CrawlSettings {
///     board: BoardRegistry::builtin().resolve("表特").unwrap(),
///     target_date: "10/17".to_string(),
///     min_push_count: 10,
///     max_articles: 5,
/// };
/// let articles = vec![Article {
///     title: "[正妹] 早安".to_string(),
///     date: "10/17".to_string(),
///     link: "https://www.ptt.cc/bbs/Beauty/M.1.A.html".to_string(),
///     push_count: 42,
/// }];
///
/// let text = render(&articles, OutputFormat::Text, &settings, &HarvestSummary::default()).unwrap();
/// assert!(text.contains("[正妹] 早安"));
/// ```
pub fn render(
    articles: &[Article],
    format: OutputFormat,
    settings: &CrawlSettings,
    summary: &HarvestSummary,
) -> Result<String, HarvestError> {
    match format {
        OutputFormat::Text => Ok(format_text(articles)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(articles)? + "\n"),
        OutputFormat::Markdown => Ok(format_markdown(articles, settings, summary)),
    }
}

/// Formats posts as aligned text lines: pushes, date, title, link
pub fn format_text(articles: &[Article]) -> String {
    let mut out = String::new();

    for article in articles {
        out.push_str(&format!(
            "{:>4}  {:>5}  {}  {}\n",
            display_push(article.push_count),
            article.date,
            article.title,
            article.link
        ));
    }

    out
}

/// Writes rendered output to `path`
pub fn write_output(content: &str, path: &Path) -> Result<(), HarvestError> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Push count as the site would show it
pub(crate) fn display_push(push_count: i32) -> String {
    match push_count {
        100 => "爆".to_string(),
        -10 => "XX".to_string(),
        0 => String::new(),
        n => n.to_string(),
    }
}
