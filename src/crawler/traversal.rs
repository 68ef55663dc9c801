//! Page walk - the harvest loop
//!
//! Starting from a board's newest index page, the harvester scans each page's
//! rows top to bottom and follows the previous-page link until it meets a post
//! from another day or has collected enough posts.
//!
//! # Per-page scan
//!
//! | Row condition                  | Action                                   |
//! |--------------------------------|------------------------------------------|
//! | push < min_push_count          | skip (date still recorded as last seen)  |
//! | no hyperlink (deleted)         | skip                                     |
//! | date != target_date            | stop scanning this page                  |
//! | otherwise                      | accept                                   |
//!
//! # Walk decision
//!
//! A scanned page is committed when it is the first page, or when its last
//! seen date is the target date, and only while fewer than `max_articles`
//! posts are held. A committed page leads to the previous page; anything else
//! stops the walk. The result is truncated to `max_articles` at the very end.

use crate::board::Board;
use crate::crawler::classifier::classify;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::{extract_listing, ListingPage};
use crate::state::TraversalState;
use crate::{ConfigError, HarvestError};
use chrono::{Datelike, FixedOffset, NaiveDate, Utc};
use serde::Serialize;

/// One accepted post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub title: String,

    /// Date exactly as shown on the index page (e.g. "10/17", "9/05")
    pub date: String,

    /// Absolute URL of the post
    pub link: String,

    pub push_count: i32,
}

/// What to harvest
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    pub board: Board,

    /// "M/DD" with no leading zero on the month
    pub target_date: String,

    pub min_push_count: i32,

    pub max_articles: usize,
}

/// Why the walk ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// A page ended on a post from another day
    DateBoundary { date: String },

    /// Enough posts were already held
    CapReached,
}

/// Counters describing one walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestSummary {
    pub pages_visited: usize,
    pub entries_seen: usize,
    pub skipped_low_push: usize,
    pub skipped_deleted: usize,
    pub unrecognized_push: usize,
    pub stop_reason: Option<StopReason>,
}

/// Outcome of scanning one page
#[derive(Debug)]
struct PageScan {
    articles: Vec<Article>,
    previous_page_link: String,
    /// Date of the row the scan ended on
    terminal_date: String,
}

/// Walks a board and collects today's popular posts
pub struct Harvester<F: PageFetcher> {
    fetcher: F,
    settings: CrawlSettings,
}

impl<F: PageFetcher> Harvester<F> {
    pub fn new(fetcher: F, settings: CrawlSettings) -> Self {
        Self { fetcher, settings }
    }

    pub fn settings(&self) -> &CrawlSettings {
        &self.settings
    }

    /// Runs the walk and returns the accepted posts, newest page first
    ///
    /// Any fetch or parse failure aborts the walk; posts collected up to that
    /// point are discarded.
    pub async fn run(&self) -> crate::Result<Vec<Article>> {
        self.run_with_summary().await.map(|(articles, _)| articles)
    }

    /// Same as [`Harvester::run`], also returning walk counters
    pub async fn run_with_summary(&self) -> crate::Result<(Vec<Article>, HarvestSummary)> {
        let settings = &self.settings;
        let mut summary = HarvestSummary::default();
        let mut results: Vec<Article> = Vec::new();
        let mut state = TraversalState::FetchingPage;
        let mut url = settings.board.index_url();

        tracing::info!(
            "Harvesting {} ({}) for {} (min pushes {}, max {})",
            settings.board.name(),
            settings.board.path(),
            settings.target_date,
            settings.min_push_count,
            settings.max_articles
        );

        while !state.is_terminal() {
            let listing = self.fetch_listing(&url).await?;
            advance(&mut state, TraversalState::ClassifyingEntries)?;

            let scan = self.scan_page(listing, &mut summary);
            let first_page = summary.pages_visited == 0;
            summary.pages_visited += 1;

            let same_day = first_page || scan.terminal_date == settings.target_date;
            if !same_day {
                tracing::info!(
                    "Page {} ended on {}, stopping",
                    url,
                    scan.terminal_date
                );
                summary.stop_reason = Some(StopReason::DateBoundary {
                    date: scan.terminal_date,
                });
                advance(&mut state, TraversalState::Stop)?;
                continue;
            }

            if results.len() >= settings.max_articles {
                tracing::info!("Already holding {} posts, stopping", results.len());
                summary.stop_reason = Some(StopReason::CapReached);
                advance(&mut state, TraversalState::Stop)?;
                continue;
            }

            tracing::debug!("Committing {} posts from {}", scan.articles.len(), url);
            results.extend(scan.articles);
            url = scan.previous_page_link;

            advance(&mut state, TraversalState::ContinueToPreviousPage)?;
            advance(&mut state, TraversalState::FetchingPage)?;
        }

        results.truncate(settings.max_articles);

        tracing::info!(
            "Harvest finished: {} posts from {} pages",
            results.len(),
            summary.pages_visited
        );

        Ok((results, summary))
    }

    async fn fetch_listing(&self, url: &str) -> crate::Result<ListingPage> {
        let html = self.fetcher.fetch(url).await?;
        extract_listing(&html, url, self.settings.board.domain())
    }

    /// Scans rows top to bottom, stopping at the first qualifying row from
    /// another day
    fn scan_page(&self, listing: ListingPage, summary: &mut HarvestSummary) -> PageScan {
        let settings = &self.settings;
        let mut articles = Vec::new();
        let mut last_date = String::new();

        for block in &listing.entries {
            let classification = classify(block);
            summary.entries_seen += 1;

            if classification.push.is_unrecognized() {
                summary.unrecognized_push += 1;
                tracing::warn!(
                    "Unrecognized push text {}, counting as 0",
                    classification.push
                );
            }

            last_date = classification.date.clone();
            let push_count = classification.push.value();

            if push_count < settings.min_push_count {
                summary.skipped_low_push += 1;
                continue;
            }

            if !classification.exists {
                summary.skipped_deleted += 1;
                tracing::debug!("Skipping deleted post dated {}", classification.date);
                continue;
            }

            if classification.date != settings.target_date {
                break;
            }

            if let Some(link) = &block.link {
                articles.push(Article {
                    title: link.title.clone(),
                    date: classification.date,
                    link: format!("{}{}", settings.board.domain(), link.href),
                    push_count,
                });
            }
        }

        PageScan {
            articles,
            previous_page_link: listing.previous_page_link,
            terminal_date: last_date,
        }
    }
}

fn advance(state: &mut TraversalState, next: TraversalState) -> crate::Result<()> {
    if !state.can_transition_to(next) {
        return Err(HarvestError::InvalidTransition {
            from: *state,
            to: next,
        });
    }

    tracing::trace!("{} -> {}", state, next);
    *state = next;
    Ok(())
}

/// Formats a date the way index pages show it: "M/DD"
///
/// ```
/// use chrono::NaiveDate;
/// use ptt_harvest::crawler::target_date_for;
///
/// let date = NaiveDate::from_ymd_opt(2026, 9, 5).unwrap();
/// assert_eq!(target_date_for(date), "9/05");
/// ```
pub fn target_date_for(date: NaiveDate) -> String {
    format!("{}/{:02}", date.month(), date.day())
}

/// Today's target date at a fixed UTC offset (8 for Asia/Taipei)
pub fn today_target_date(utc_offset_hours: i32) -> crate::Result<String> {
    let offset = utc_offset_hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| {
            ConfigError::Validation(format!("Invalid UTC offset: {} hours", utc_offset_hours))
        })?;

    Ok(target_date_for(
        Utc::now().with_timezone(&offset).date_naive(),
    ))
}
