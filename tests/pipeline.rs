//! End-to-end pipeline tests against a canned local HTTP stub.
//!
//! The stub answers fixed JSON bodies per path, which is enough to exercise
//! the real transport: status classification, payload validation, fallback
//! resolution, and the full build into a temp directory.

use showfolio::catalog::ALL_WORK;
use showfolio::config::SiteConfig;
use showfolio::fetch::Fetcher;
use showfolio::site;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

type Routes = HashMap<&'static str, (u16, &'static str)>;

/// Spawn a single-threaded HTTP stub on an ephemeral port and return its
/// base URL. Unknown paths answer 404. The serving thread lives for the
/// rest of the test process.
fn spawn_stub(routes: Routes) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
    let addr = listener.local_addr().expect("stub addr");
    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            // GET requests are small; read until the header terminator.
            loop {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => {
                        request.extend_from_slice(&buf[..n]);
                        if request.windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                    }
                }
            }
            let request = String::from_utf8_lossy(&request);
            let path = request
                .split_whitespace()
                .nth(1)
                .unwrap_or("/")
                .split('?')
                .next()
                .unwrap_or("/");
            let (status, body) = routes
                .get(path)
                .copied()
                .unwrap_or((404, r#"{"error":"not found"}"#));
            let reason = if status == 200 { "OK" } else { "Error" };
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{addr}")
}

const PORTFOLIO: &str = r#"[
    {"id": 1, "filename": "dawn.jpg", "title": "Dawn", "categories": ["Landscape"]},
    {"id": 2, "filename": "owl.jpg", "title": "Owl",
     "categories": [{"id": 3, "name": "Wildlife"}, {"id": 1, "name": "Landscape"}]},
    {"id": 3, "filename": "pier.jpg", "title": "Pier", "categories": []}
]"#;

fn healthy_routes() -> Routes {
    let mut routes = Routes::new();
    routes.insert("/api/portfolio", (200, PORTFOLIO));
    routes.insert("/api/categories", (200, r#"[{"id":1,"name":"Landscape"},{"id":3,"name":"Wildlife"}]"#));
    routes.insert("/api/background-image", (200, r#"{"id": 9, "filename": "mist.jpg", "title": "Mist"}"#));
    routes.insert("/api/about-content", (200, r#"{"title": "About the Studio", "content": "Based in **Madison**."}"#));
    routes.insert("/api/about-image", (200, r#"{"id": 12, "filename": "studio.jpg", "title": "The studio"}"#));
    routes.insert(
        "/api/featured",
        (200, r#"{"image": "heron.jpg", "title": "Heron", "categories": ["Wildlife"],
                  "exif_data": {"camera": "Canon EOS R5", "aperture": "5.6", "iso": 400,
                                "lens": "Unknown"},
                  "story": "Shot at dawn."}"#),
    );
    routes
}

fn fetcher(base_url: &str) -> Fetcher {
    Fetcher::new(base_url, Duration::from_secs(2)).expect("build fetcher")
}

#[tokio::test]
async fn healthy_backend_loads_every_resource() {
    let base = spawn_stub(healthy_routes());
    let config = SiteConfig::default();
    let (manifest, report) = site::fetch_content(&fetcher(&base), &config, Some(1)).await;

    assert!(report.all_loaded(), "statuses: {:?}", report.statuses);
    assert_eq!(manifest.images.len(), 3);
    assert_eq!(manifest.facets[0].label, ALL_WORK);
    assert_eq!(manifest.facets[0].count, 3);
    // First-seen order after All Work.
    let labels: Vec<&str> = manifest.facets.iter().map(|f| f.label.as_str()).collect();
    assert_eq!(labels, vec![ALL_WORK, "Landscape", "Wildlife"]);

    assert_eq!(manifest.background.unwrap().filename.as_deref(), Some("mist.jpg"));
    assert_eq!(manifest.about.title, "About the Studio");
    assert_eq!(manifest.about_images.len(), 1);

    let featured = manifest.featured.expect("featured loaded");
    let exif = featured.exif.expect("exif present");
    assert_eq!(exif.iso.as_deref(), Some("400"));
    assert_eq!(exif.lens, None, "Unknown normalizes to absent");
}

#[tokio::test]
async fn failing_backend_degrades_to_fallbacks() {
    // Every resource 404s (no routes registered at all).
    let base = spawn_stub(Routes::new());
    let config = SiteConfig::default();
    let (manifest, report) = site::fetch_content(&fetcher(&base), &config, None).await;

    assert!(report.statuses.iter().all(|(_, s)| *s == "failed"));
    assert!(manifest.images.is_empty());
    assert!(manifest.background.is_none());
    assert!(manifest.featured.is_none());
    // The about baseline comes from config, not from an error.
    assert_eq!(manifest.about.title, config.fallbacks.about_title);
    assert_eq!(manifest.about.content, config.fallbacks.about_body);
}

#[tokio::test]
async fn empty_catalog_is_valid_not_failed() {
    let mut routes = Routes::new();
    routes.insert("/api/portfolio", (200, "[]"));
    routes.insert("/api/featured", (200, "null"));
    let base = spawn_stub(routes);
    let config = SiteConfig::default();
    let (manifest, report) = site::fetch_content(&fetcher(&base), &config, None).await;

    let portfolio_status = report.statuses.iter().find(|(k, _)| format!("{k}") == "portfolio");
    assert_eq!(portfolio_status.unwrap().1, "empty");
    assert!(manifest.images.is_empty());
    assert_eq!(manifest.facets.len(), 1, "only the synthetic facet remains");
    assert!(manifest.featured.is_none());
}

#[tokio::test]
async fn malformed_payload_is_failed_not_a_panic() {
    let mut routes = Routes::new();
    routes.insert("/api/portfolio", (200, "{not json"));
    let base = spawn_stub(routes);
    let config = SiteConfig::default();
    let (manifest, report) = site::fetch_content(&fetcher(&base), &config, None).await;

    let portfolio_status = report.statuses.iter().find(|(k, _)| format!("{k}") == "portfolio");
    assert_eq!(portfolio_status.unwrap().1, "failed");
    assert!(manifest.images.is_empty());
}

#[tokio::test]
async fn build_renders_the_whole_site_from_remote_content() {
    let base = spawn_stub(healthy_routes());
    let config = SiteConfig::default();
    let (manifest, _) = site::fetch_content(&fetcher(&base), &config, Some(2)).await;

    let dir = tempfile::TempDir::new().unwrap();
    let report = site::build_site(&config, &manifest, dir.path()).unwrap();

    let home = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert!(home.contains("/data/mist.jpg"), "background resolves against the asset prefix");

    let landing = std::fs::read_to_string(dir.path().join("portfolio/index.html")).unwrap();
    assert!(landing.contains("There are currently 3 images"));
    assert!(landing.contains("Wildlife"));

    let about = std::fs::read_to_string(dir.path().join("about.html")).unwrap();
    assert!(about.contains("<strong>Madison</strong>"));

    let featured = std::fs::read_to_string(dir.path().join("featured.html")).unwrap();
    assert!(featured.contains("f/5.6"));
    assert!(featured.contains("Shot at dawn."));

    assert!(report.pages.contains(&"portfolio/wildlife/1.html".to_string()));
}

#[tokio::test]
async fn failed_background_still_renders_home_with_fallback() {
    let mut routes = healthy_routes();
    routes.insert("/api/background-image", (500, r#"{"error":"boom"}"#));
    let base = spawn_stub(routes);
    let config = SiteConfig::default();
    let (manifest, _) = site::fetch_content(&fetcher(&base), &config, None).await;
    assert!(manifest.background.is_none());

    let dir = tempfile::TempDir::new().unwrap();
    site::build_site(&config, &manifest, dir.path()).unwrap();
    let home = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert!(home.contains(&format!("background-color:{}", config.fallbacks.background_color)));
    assert!(!home.contains("boom"), "raw failure reasons never reach markup");
}
