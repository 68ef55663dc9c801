//! Crawler module for walking a board index
//!
//! This module contains the harvesting logic:
//! - HTTP fetching with the age-gate cookie
//! - Index page parsing (post rows and the previous-page link)
//! - Post row classification (date, push count, deleted or not)
//! - The page walk and its stop conditions

mod classifier;
mod fetcher;
mod parser;
mod traversal;

pub use classifier::{classify, Classification, PushReading};
pub use fetcher::{HttpFetcher, PageFetcher, AGE_GATE_COOKIE};
pub use parser::{extract_listing, EntryBlock, EntryLink, ListingPage};
pub use traversal::{
    target_date_for, today_target_date, Article, CrawlSettings, HarvestSummary, Harvester,
    StopReason,
};

use crate::board::Board;
use crate::HarvestError;

/// Harvests today's posts from `board` over HTTP
///
/// This is the main entry point. It will:
/// 1. Open an HTTP session carrying the `over18=1` cookie
/// 2. Walk the board from its newest index page backwards
/// 3. Return the posts dated `target_date` with at least `min_push_count` pushes
///
/// # Example
///
/// ```no_run
/// use ptt_harvest::board::BoardRegistry;
/// use ptt_harvest::crawler::{harvest, today_target_date};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let board = BoardRegistry::builtin().resolve("八卦")?;
/// let articles = harvest(board, &today_target_date(8)?, 30, 5).await?;
/// for article in articles {
///     println!("{} {}", article.push_count, article.title);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn harvest(
    board: Board,
    target_date: &str,
    min_push_count: i32,
    max_articles: usize,
) -> Result<Vec<Article>, HarvestError> {
    let fetcher = HttpFetcher::new(board.domain())?;
    let settings = CrawlSettings {
        board,
        target_date: target_date.to_string(),
        min_push_count,
        max_articles,
    };

    Harvester::new(fetcher, settings).run().await
}
