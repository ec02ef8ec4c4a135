//! End-to-end scraper tests
//!
//! These tests run the full listing and detail flows against wiremock
//! servers standing in for the mod listing site.

use modscout::config::{Config, RetryConfig, ScrapeConfig, SiteConfig};
use modscout::scraper::ScraperService;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at a mock server, with short
/// delays so retry and pacing paths run fast.
fn create_test_config(base_url: &str) -> Config {
    Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
            category: "mods".to_string(),
        },
        retry: RetryConfig {
            max_retries: 3,
            base_delay_ms: 10,
            step_delay_ms: 5,
        },
        scrape: ScrapeConfig {
            worker_pool_size: 5,
            detail_delay_ms: 1,
            max_dependency_depth: 3,
        },
        ..Config::default()
    }
}

fn listing_page(entries: &[(&str, &str)]) -> String {
    let blocks: String = entries
        .iter()
        .map(|(title, href)| {
            format!(
                r#"<div class="box box_grass post">
                    <h2 class="box__title"><a href="{href}">{title}</a></h2>
                    <a class="post__cover" href="{href}"><img src="/uploads/icons/icon.png"></a>
                    <i class="icon" title="Forge"></i>
                    <div class="box__body"><div>A mod.</div></div>
                </div>"#
            )
        })
        .collect();
    format!("<html><body>{blocks}</body></html>")
}

fn mod_page(version_label: &str, download_href: &str) -> String {
    format!(
        r#"<html><body>
        <h1>Iron Chests [1.20.1]</h1>
        <table><tr><td class="dl__info">
            <a href="{download_href}"><span class="dl__link" title="Скачиваний: 42">get</span></a>
            <span class="dl__name">{version_label}</span>
            <span class="dl__loader">Forge</span>
        </td></tr></table>
        <div class="box__body">
            <img src="/uploads/files/2024-01/shot.png">
            <ol><li><a href="/mods/9-lib.html">Some Library</a></li></ol>
        </div>
        </body></html>"#
    )
}

#[tokio::test]
async fn test_list_mods_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/mods/page/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[
            ("Iron Chests [1.20.1]", "/mods/1-iron.html"),
            ("Waystones [1.19.2]", "/mods/2-way.html"),
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/mods/1-iron.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(mod_page("Для 1.20.1 Forge", "/download/abc/")),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/mods/2-way.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(mod_page("Для 1.19.2 Forge", "/download/def/")),
        )
        .mount(&mock_server)
        .await;

    let service = ScraperService::new(create_test_config(&mock_server.uri())).unwrap();
    let mods = service.list_mods(1, None).await.expect("listing failed");

    assert_eq!(mods.len(), 2);
    assert_eq!(mods[0].name, "Iron Chests");
    assert_eq!(mods[0].versions, vec!["1.20.1"]);
    assert_eq!(mods[0].loaders, vec!["Forge"]);

    // Details populated the summary they were paired with by index
    assert_eq!(mods[0].downloads.len(), 1);
    assert_eq!(mods[0].downloads[0].version, "1.20.1, Forge");
    assert_eq!(mods[0].downloads[0].download_count, "42");
    assert!(mods[0].downloads[0].url.ends_with("/download/abc/"));
    assert!(mods[1].downloads[0].url.ends_with("/download/def/"));

    assert_eq!(mods[0].screenshots.len(), 1);
    assert!(mods[0].screenshots[0].ends_with("/uploads/files/2024-01/shot.png"));
}

#[tokio::test]
async fn test_listing_failure_is_fatal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/mods/page/1/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let service = ScraperService::new(create_test_config(&mock_server.uri())).unwrap();
    assert!(service.list_mods(1, None).await.is_err());
}

#[tokio::test]
async fn test_detail_failure_keeps_summary() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/mods/page/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[
            ("Broken Mod [1.20.1]", "/mods/1-broken.html"),
            ("Fine Mod [1.20.1]", "/mods/2-fine.html"),
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/mods/1-broken.html"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/mods/2-fine.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(mod_page("Для 1.20.1 Forge", "/download/ok/")),
        )
        .mount(&mock_server)
        .await;

    let service = ScraperService::new(create_test_config(&mock_server.uri())).unwrap();
    let mods = service.list_mods(1, None).await.expect("listing failed");

    // A failed detail fetch does not drop the summary or its siblings
    assert_eq!(mods.len(), 2);
    assert_eq!(mods[0].name, "Broken Mod");
    assert!(mods[0].downloads.is_empty());
    assert_eq!(mods[1].downloads.len(), 1);
}

#[tokio::test]
async fn test_search_term_encodes_spaces() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/mods/page/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[])))
        .mount(&mock_server)
        .await;

    let service = ScraperService::new(create_test_config(&mock_server.uri())).unwrap();
    let mods = service.list_mods(1, Some("iron chests")).await.unwrap();
    assert!(mods.is_empty());

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), Some("q=iron+chests"));
}

#[tokio::test]
async fn test_rate_limited_fetch_recovers() {
    let mock_server = MockServer::start().await;

    // Two 429 responses, then the real page
    Mock::given(method("GET"))
        .and(path("/mods/page/1/"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/mods/page/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[(
            "Iron Chests [1.20.1]",
            "/mods/1-iron.html",
        )])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/mods/1-iron.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(mod_page("Для 1.20.1 Forge", "/download/abc/")),
        )
        .mount(&mock_server)
        .await;

    let service = ScraperService::new(create_test_config(&mock_server.uri())).unwrap();
    let mods = service.list_mods(1, None).await.expect("retry should recover");
    assert_eq!(mods.len(), 1);
}

#[tokio::test]
async fn test_rate_limit_exhaustion_after_four_attempts() {
    let mock_server = MockServer::start().await;

    // First dispatch plus three retries, then the request is abandoned
    Mock::given(method("GET"))
        .and(path("/mods/page/1/"))
        .respond_with(ResponseTemplate::new(429))
        .expect(4)
        .mount(&mock_server)
        .await;

    let service = ScraperService::new(create_test_config(&mock_server.uri())).unwrap();
    let result = service.list_mods(1, None).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_get_mod_details_filters_rows() {
    let mock_server = MockServer::start().await;

    let page = r#"<html><body>
        <h1>Iron Chests [1.19.2] [1.20.1]</h1>
        <table><tr>
        <td class="dl__info">
            <a href="/download/new/"></a>
            <span class="dl__name">Для 1.20.1 Forge</span>
        </td>
        <td class="dl__info">
            <a href="/download/old/"></a>
            <span class="dl__name">Для 1.19.2 Forge</span>
        </td>
        </tr></table>
        <div class="box__body">
            <img src="/uploads/files/mini/thumb1.png">
            <img src="/uploads/files/2024-03/full.png">
            <ol>
                <li><a href="/mods/9-lib.html">Some Library</a></li>
                <li><a href="/forge.html">Minecraft Forge</a></li>
            </ol>
        </div>
    </body></html>"#;

    Mock::given(method("GET"))
        .and(path("/mods/1-iron.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&mock_server)
        .await;

    let service = ScraperService::new(create_test_config(&mock_server.uri())).unwrap();
    let url = format!("{}/mods/1-iron.html", mock_server.uri());
    let summary = service
        .get_mod_details(&url, &["1.20.1".to_string()])
        .await
        .expect("details failed");

    assert_eq!(summary.name, "Iron Chests");
    assert_eq!(summary.versions, vec!["1.19.2", "1.20.1"]);
    assert_eq!(summary.page_link, url);

    // Only the matching row survives the target filter
    assert_eq!(summary.downloads.len(), 1);
    assert!(summary.downloads[0].url.ends_with("/download/new/"));

    // Thumbnail excluded, remaining screenshot absolutized
    assert_eq!(summary.screenshots.len(), 1);
    assert!(summary.screenshots[0].ends_with("/uploads/files/2024-03/full.png"));

    // Implicit loader entry skipped
    assert_eq!(summary.dependencies.len(), 1);
    assert_eq!(summary.dependencies[0].name, "Some Library");
}

#[tokio::test]
async fn test_mod_file_records_unfiltered() {
    let mock_server = MockServer::start().await;

    let page = r#"<html><head><script>
        var dbox_data = {
            files: [{"name": "1.20 Forge", "id": "abc", "downloads": "17", "size": "2 MB", "created": "2024-05-01", "loaders": ["Forge"]},
                    {"name": "1.18.2 Fabric", "id": "def", "loaders": ["Fabric"]}]
        };
    </script></head><body></body></html>"#;

    Mock::given(method("GET"))
        .and(path("/mods/1-iron.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&mock_server)
        .await;

    let service = ScraperService::new(create_test_config(&mock_server.uri())).unwrap();
    let url = format!("{}/mods/1-iron.html", mock_server.uri());
    let records = service.mod_file_records(&url).await.expect("files failed");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].file_id, "abc");
    assert_eq!(records[0].version, "1.20");
    assert!(records[0].download_url.ends_with("/download/abc/"));
    assert_eq!(records[1].version, "1.18.2");
}
