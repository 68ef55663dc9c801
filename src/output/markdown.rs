//! Markdown report generation

use crate::crawler::{Article, CrawlSettings, HarvestSummary, StopReason};
use crate::output::display_push;

/// Formats harvested posts as a markdown report
///
/// # Arguments
///
/// * `articles` - Posts to list, in harvest order
/// * `settings` - The settings the harvest ran with
/// * `summary` - Walk counters
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown(
    articles: &[Article],
    settings: &CrawlSettings,
    summary: &HarvestSummary,
) -> String {
    let mut md = String::new();

    // Title
    md.push_str(&format!(
        "# {} ({}) {}\n\n",
        settings.board.name(),
        settings.board.path(),
        settings.target_date
    ));

    // Run metadata
    md.push_str(&format!(
        "- **Minimum pushes**: {}\n",
        settings.min_push_count
    ));
    md.push_str(&format!("- **Maximum posts**: {}\n", settings.max_articles));
    md.push_str(&format!("- **Pages visited**: {}\n", summary.pages_visited));
    md.push_str(&format!("- **Rows seen**: {}\n", summary.entries_seen));
    if summary.unrecognized_push > 0 {
        md.push_str(&format!(
            "- **Unrecognized push cells**: {}\n",
            summary.unrecognized_push
        ));
    }
    if let Some(reason) = &summary.stop_reason {
        let reason = match reason {
            StopReason::DateBoundary { date } => format!("reached posts from {}", date),
            StopReason::CapReached => "post limit reached".to_string(),
        };
        md.push_str(&format!("- **Stopped**: {}\n", reason));
    }
    md.push('\n');

    if articles.is_empty() {
        md.push_str("_No posts matched._\n");
        return md;
    }

    md.push_str("| Pushes | Date | Title |\n");
    md.push_str("|-------:|------|-------|\n");
    for article in articles {
        md.push_str(&format!(
            "| {} | {} | [{}]({}) |\n",
            display_push(article.push_count),
            article.date,
            escape_cell(&article.title),
            article.link
        ));
    }

    md
}

/// Keeps titles from breaking the table or the link syntax
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
        .replace('[', "\\[")
        .replace(']', "\\]")
}
