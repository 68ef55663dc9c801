//! End-to-end harvest tests
//!
//! Each test mounts a small board on a wiremock server and walks it with the
//! real `HttpFetcher`.

use ptt_harvest::board::BoardRegistry;
use ptt_harvest::crawler::{harvest, CrawlSettings, Harvester, HttpFetcher, PageFetcher, StopReason};
use ptt_harvest::HarvestError;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TODAY: &str = "10/17";
const YESTERDAY: &str = "10/16";

/// Builds an index page whose previous-page link points at `index{previous}.html`
fn index_page(previous: u32, rows: &[(&str, &str, Option<u32>)]) -> String {
    let mut html = format!(
        r#"<!DOCTYPE html><html><head><title>看板 Gossiping 文章列表 - 批踢踢實業坊</title></head><body>
        <div id="action-bar-container"><div class="action-bar"><div class="btn-group btn-group-paging">
            <a class="btn wide" href="/bbs/Gossiping/index1.html">最舊</a>
            <a class="btn wide" href="/bbs/Gossiping/index{}.html">&lsaquo; 上頁</a>
            <a class="btn wide disabled">下頁 &rsaquo;</a>
            <a class="btn wide" href="/bbs/Gossiping/index.html">最新</a>
        </div></div></div>
        <div class="r-list-container action-bar-margin bbs-screen">"#,
        previous
    );

    for (push, date, id) in rows {
        let title = match id {
            Some(id) => format!(
                r#"<a href="/bbs/Gossiping/M.{id}.A.ABC.html">[問卦] 第{id}篇</a>"#,
                id = id
            ),
            None => "(本文已被刪除) [someone]".to_string(),
        };
        html.push_str(&format!(
            r#"<div class="r-ent">
                <div class="nrec"><span class="hl f2">{}</span></div>
                <div class="title">{}</div>
                <div class="meta">
                    <div class="author">someone</div>
                    <div class="article-mark"></div>
                    <div class="date">{:>5}</div>
                    <div class="mark"></div>
                </div>
            </div>"#,
            push, title, date
        ));
    }

    html.push_str("</div></body></html>");
    html
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .and(header("cookie", "over18=1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(server)
        .await;
}

fn settings(server: &MockServer, min_push_count: i32, max_articles: usize) -> CrawlSettings {
    CrawlSettings {
        board: BoardRegistry::new(&server.uri(), &[])
            .resolve("八卦")
            .expect("builtin board"),
        target_date: TODAY.to_string(),
        min_push_count,
        max_articles,
    }
}

#[tokio::test]
async fn test_harvest_across_pages() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/bbs/Gossiping/index.html",
        index_page(
            500,
            &[
                ("50", TODAY, Some(1)),
                ("10", TODAY, Some(2)),
                ("", TODAY, None),
                ("爆", TODAY, Some(3)),
            ],
        ),
    )
    .await;
    mount_page(
        &mock_server,
        "/bbs/Gossiping/index500.html",
        index_page(499, &[("31", TODAY, Some(4)), ("X1", TODAY, Some(5))]),
    )
    .await;
    mount_page(
        &mock_server,
        "/bbs/Gossiping/index499.html",
        index_page(498, &[("99", YESTERDAY, Some(6)), ("99", TODAY, Some(7))]),
    )
    .await;

    let fetcher = HttpFetcher::new(&mock_server.uri()).expect("client");
    let (articles, summary) = Harvester::new(fetcher, settings(&mock_server, 30, 10))
        .run_with_summary()
        .await
        .expect("harvest");

    let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["[問卦] 第1篇", "[問卦] 第3篇", "[問卦] 第4篇"]);

    let pushes: Vec<i32> = articles.iter().map(|a| a.push_count).collect();
    assert_eq!(pushes, vec![50, 100, 31]);

    assert_eq!(
        articles[0].link,
        format!("{}/bbs/Gossiping/M.1.A.ABC.html", mock_server.uri())
    );
    assert!(articles.iter().all(|a| a.date == TODAY));

    assert_eq!(summary.pages_visited, 3);
    assert_eq!(
        summary.stop_reason,
        Some(StopReason::DateBoundary {
            date: YESTERDAY.to_string()
        })
    );
}

#[tokio::test]
async fn test_cap_truncates_after_first_page() {
    let mock_server = MockServer::start().await;

    let rows: Vec<(&str, &str, Option<u32>)> =
        (1..=5).map(|i| ("1", TODAY, Some(i))).collect();
    mount_page(&mock_server, "/bbs/Gossiping/index.html", index_page(500, &rows)).await;
    mount_page(
        &mock_server,
        "/bbs/Gossiping/index500.html",
        index_page(499, &[("1", YESTERDAY, Some(6))]),
    )
    .await;

    let board = BoardRegistry::new(&mock_server.uri(), &[])
        .resolve("八卦")
        .expect("builtin board");
    let articles = harvest(board, TODAY, 0, 3).await.expect("harvest");

    assert_eq!(articles.len(), 3);
    assert_eq!(articles[2].title, "[問卦] 第3篇");
}

#[tokio::test]
async fn test_non_success_status_aborts() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/bbs/Gossiping/index.html",
        index_page(500, &[("50", TODAY, Some(1))]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/bbs/Gossiping/index500.html"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&mock_server.uri()).expect("client");
    let result = Harvester::new(fetcher, settings(&mock_server, 0, 10)).run().await;

    match result {
        Err(HarvestError::Fetch { url, status }) => {
            assert_eq!(status, 503);
            assert!(url.ends_with("/bbs/Gossiping/index500.html"));
        }
        other => panic!("expected fetch error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_age_gate_cookie_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bbs/Beauty/index.html"))
        .and(header("cookie", "over18=1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&mock_server.uri()).expect("client");
    let url = format!("{}/bbs/Beauty/index.html", mock_server.uri());

    // Every request in the session carries the cookie
    assert_eq!(fetcher.fetch(&url).await.expect("first"), "<html>ok</html>");
    assert_eq!(fetcher.fetch(&url).await.expect("second"), "<html>ok</html>");
}

#[tokio::test]
async fn test_maintenance_page_is_malformed() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/bbs/Gossiping/index.html",
        "<html><body><p>系統維護中</p></body></html>".to_string(),
    )
    .await;

    let fetcher = HttpFetcher::new(&mock_server.uri()).expect("client");
    let result = Harvester::new(fetcher, settings(&mock_server, 0, 10)).run().await;

    assert!(matches!(result, Err(HarvestError::MalformedPage { .. })));
}

#[tokio::test]
async fn test_unknown_board() {
    let result = BoardRegistry::builtin().resolve("NoSuchBoard");
    assert!(matches!(
        result,
        Err(HarvestError::UnknownBoard { ref name }) if name == "NoSuchBoard"
    ));
}
