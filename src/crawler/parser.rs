//! Index page parser
//!
//! Turns the raw markup of one board index page into a [`ListingPage`]:
//! - the post rows (`div.r-ent`), top to bottom as rendered
//! - the link to the chronologically previous index page
//!
//! The paging bar on an index page looks like
//!
//! ```text
//! <div class="btn-group btn-group-paging">
//!   <a class="btn wide" href="/bbs/Gossiping/index1.html">最舊</a>
//!   <a class="btn wide" href="/bbs/Gossiping/index39000.html">‹ 上頁</a>
//!   <a class="btn wide disabled">下頁 ›</a>
//!   <a class="btn wide" href="/bbs/Gossiping/index.html">最新</a>
//! </div>
//! ```
//!
//! and the previous page is always the second `a.btn` in it. That position is
//! a contract with the site layout.

use crate::HarvestError;
use scraper::{ElementRef, Html, Selector};

const PAGING_SELECTOR: &str = "div.btn-group.btn-group-paging";
const PAGING_LINK_SELECTOR: &str = "a.btn";
const ENTRY_SELECTOR: &str = "div.r-ent";
const DATE_SELECTOR: &str = "div.date";
const PUSH_SELECTOR: &str = "div.nrec";
const LINK_SELECTOR: &str = "a";

/// One parsed index page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    /// Post rows in rendered order
    pub entries: Vec<EntryBlock>,

    /// Absolute URL of the previous (older) index page
    pub previous_page_link: String,
}

/// Raw fields of one post row, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryBlock {
    /// Text of `div.date`, untrimmed; `None` if the row has no date cell
    pub date_text: Option<String>,

    /// Text of `div.nrec`, untrimmed; `None` if the row has no push cell
    pub push_text: Option<String>,

    /// First hyperlink of the row; `None` for deleted posts and for rows whose
    /// first anchor has no `href`
    pub link: Option<EntryLink>,
}

/// Title hyperlink of a post row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLink {
    /// `href` as written in the markup (site-relative)
    pub href: String,

    /// Link text, trimmed
    pub title: String,
}

/// Parses an index page
///
/// # Arguments
///
/// * `html` - Raw markup of the index page
/// * `page_url` - URL the markup came from (used in error messages)
/// * `domain` - Site root prefixed to the previous-page `href`
///
/// # Returns
///
/// * `Ok(ListingPage)` - Rows and previous-page link
/// * `Err(HarvestError::MalformedPage)` - Paging bar or post rows are missing
///
/// # Example
///
/// ```
/// use ptt_harvest::crawler::extract_listing;
///
/// let html = r#"
///     <div class="btn-group btn-group-paging">
///       <a class="btn wide" href="/bbs/Beauty/index1.html">最舊</a>
///       <a class="btn wide" href="/bbs/Beauty/index41.html">‹ 上頁</a>
///     </div>
///     <div class="r-ent">
///       <div class="nrec"><span>12</span></div>
///       <div class="title"><a href="/bbs/Beauty/M.1.A.1.html">[正妹] test</a></div>
///       <div class="meta"><div class="date">10/17</div></div>
///     </div>"#;
///
/// let page = extract_listing(html, "https://www.ptt.cc/bbs/Beauty/index.html", "https://www.ptt.cc").unwrap();
/// assert_eq!(page.previous_page_link, "https://www.ptt.cc/bbs/Beauty/index41.html");
/// assert_eq!(page.entries.len(), 1);
/// ```
pub fn extract_listing(html: &str, page_url: &str, domain: &str) -> Result<ListingPage, HarvestError> {
    let document = Html::parse_document(html);

    let previous_page_link = extract_previous_page_link(&document, page_url, domain)?;
    let entries = extract_entries(&document)?;

    if entries.is_empty() {
        return Err(malformed(page_url, "no post rows (div.r-ent) on page"));
    }

    Ok(ListingPage {
        entries,
        previous_page_link,
    })
}

/// Finds the second paging link and makes it absolute
fn extract_previous_page_link(
    document: &Html,
    page_url: &str,
    domain: &str,
) -> Result<String, HarvestError> {
    let paging_selector = selector(PAGING_SELECTOR)?;
    let link_selector = selector(PAGING_LINK_SELECTOR)?;

    let paging = document
        .select(&paging_selector)
        .next()
        .ok_or_else(|| malformed(page_url, "paging controls not found"))?;

    let previous = paging
        .select(&link_selector)
        .nth(1)
        .ok_or_else(|| malformed(page_url, "fewer than two paging links"))?;

    let href = previous
        .value()
        .attr("href")
        .ok_or_else(|| malformed(page_url, "previous page link has no href"))?;

    Ok(format!("{}{}", domain, href))
}

/// Collects the post rows in document order
fn extract_entries(document: &Html) -> Result<Vec<EntryBlock>, HarvestError> {
    let entry_selector = selector(ENTRY_SELECTOR)?;
    let date_selector = selector(DATE_SELECTOR)?;
    let push_selector = selector(PUSH_SELECTOR)?;
    let link_selector = selector(LINK_SELECTOR)?;

    let entries = document
        .select(&entry_selector)
        .map(|row| EntryBlock {
            date_text: first_text(&row, &date_selector),
            push_text: first_text(&row, &push_selector),
            link: row.select(&link_selector).next().and_then(|a| {
                // An anchor without href points nowhere; treat the row as deleted
                let href = a.value().attr("href").filter(|h| !h.trim().is_empty())?;
                Some(EntryLink {
                    href: href.to_string(),
                    title: a.text().collect::<String>().trim().to_string(),
                })
            }),
        })
        .collect();

    Ok(entries)
}

fn first_text(row: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    row.select(selector)
        .next()
        .map(|element| element.text().collect::<String>())
}

fn selector(css: &str) -> Result<Selector, HarvestError> {
    Selector::parse(css).map_err(|e| HarvestError::Selector {
        selector: css.to_string(),
        message: format!("{:?}", e),
    })
}

fn malformed(page_url: &str, reason: &str) -> HarvestError {
    HarvestError::MalformedPage {
        url: page_url.to_string(),
        reason: reason.to_string(),
    }
}
