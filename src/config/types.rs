use crate::board::DEFAULT_DOMAIN;
use serde::Deserialize;

/// Main configuration structure for ptt-harvest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default, rename = "board")]
    pub boards: Vec<BoardEntry>,
}

/// Where the forum lives
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Site root, e.g. "https://www.ptt.cc" (no trailing slash)
    #[serde(default = "default_domain")]
    pub domain: String,
}

/// Harvest behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Board display name to crawl
    #[serde(default = "default_board")]
    pub board: String,

    /// Posts with fewer pushes than this are skipped
    #[serde(rename = "min-push-count", default = "default_min_push_count")]
    pub min_push_count: i32,

    /// Maximum number of posts returned
    #[serde(rename = "max-articles", default = "default_max_articles")]
    pub max_articles: usize,

    /// Offset from UTC used to decide what "today" is
    #[serde(rename = "utc-offset-hours", default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
}

/// Additional board mapping
#[derive(Debug, Clone, Deserialize)]
pub struct BoardEntry {
    /// Display name (e.g. "笨版")
    pub name: String,

    /// Path segment under /bbs/ (e.g. "StupidClown")
    pub path: String,
}

fn default_domain() -> String {
    DEFAULT_DOMAIN.to_string()
}

fn default_board() -> String {
    "八卦".to_string()
}

fn default_min_push_count() -> i32 {
    30
}

fn default_max_articles() -> usize {
    5
}

fn default_utc_offset_hours() -> i32 {
    8
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            domain: default_domain(),
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            board: default_board(),
            min_push_count: default_min_push_count(),
            max_articles: default_max_articles(),
            utc_offset_hours: default_utc_offset_hours(),
        }
    }
}
