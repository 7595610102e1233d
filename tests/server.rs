use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use cuzillion::config::model::{
    NetworkSettings, OriginPreference, PageConfig, ResourceConfig, ScriptConfig, StyleConfig,
};
use cuzillion::factory::Factory;
use cuzillion::http::server::run_with_listener;
use cuzillion::serialization::serialize_config;
use pretty_assertions::assert_eq;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

struct Response {
    status: u16,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl Response {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

async fn start_server(origins: Vec<String>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let factory = Arc::new(Factory::new(Factory::default_url_map(), origins));
    tokio::spawn(async move {
        let _ = run_with_listener(listener, factory).await;
    });
    addr
}

async fn get(addr: SocketAddr, path_and_query: &str) -> Response {
    let mut stream = TcpStream::connect(addr).await.expect("connect");
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        path_and_query
    );
    stream.write_all(request.as_bytes()).await.expect("write request");

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.expect("read response");

    let header_end = raw
        .windows(4)
        .position(|window| window == b"\r\n\r\n")
        .expect("header terminator");
    let head = String::from_utf8_lossy(&raw[..header_end]).to_string();
    let body = raw[header_end + 4..].to_vec();

    let mut lines = head.lines();
    let status_line = lines.next().expect("status line");
    let status: u16 = status_line
        .split_whitespace()
        .nth(1)
        .expect("status code")
        .parse()
        .expect("numeric status");

    let mut headers = HashMap::new();
    for line in lines {
        if let Some(idx) = line.find(':') {
            headers.insert(
                line[..idx].trim().to_ascii_lowercase(),
                line[idx + 1..].trim().to_string(),
            );
        }
    }

    Response { status, headers, body }
}

fn config_url(route: &str, config: &ResourceConfig) -> String {
    format!("{}?config={}", route, urlencoding::encode(&serialize_config(config)))
}

fn page_with(network: NetworkSettings) -> ResourceConfig {
    ResourceConfig::Page(PageConfig {
        network,
        ..PageConfig::default()
    })
}

fn head_script(preference: OriginPreference) -> ResourceConfig {
    ResourceConfig::Page(PageConfig {
        head: Some(vec![ResourceConfig::Script(ScriptConfig {
            network: NetworkSettings {
                origin_preference: Some(preference),
                ..NetworkSettings::default()
            },
            ..ScriptConfig::default()
        })]),
        ..PageConfig::default()
    })
}

#[tokio::test]
async fn serves_resources_with_their_content_types() {
    let addr = start_server(vec![]).await;

    let response = get(addr, &config_url("/api/page.html", &page_with(NetworkSettings::default()))).await;
    assert_eq!(response.status, 200);
    assert_eq!(response.headers.get("content-type").map(String::as_str), Some("text/html"));
    assert!(response.text().contains("<!DOCTYPE html>"));

    let css = ResourceConfig::Stylesheet(StyleConfig::default());
    let response = get(addr, &config_url("/api/style.css", &css)).await;
    assert_eq!(response.status, 200);
    assert_eq!(response.headers.get("content-type").map(String::as_str), Some("text/css"));
}

#[tokio::test]
async fn honors_the_configured_status_code() {
    let addr = start_server(vec![]).await;
    let config = page_with(NetworkSettings {
        status_code: Some(403),
        ..NetworkSettings::default()
    });

    let response = get(addr, &config_url("/api/page.html", &config)).await;
    assert_eq!(response.status, 403);
}

#[tokio::test]
async fn pads_bodies_to_the_configured_size() {
    let addr = start_server(vec![]).await;

    for route in ["/api/page.html", "/api/script.js", "/api/style.css"] {
        let kind = route.rsplit('.').next().expect("route extension");
        let network = NetworkSettings {
            size_in_bytes: Some(14000),
            ..NetworkSettings::default()
        };
        let config = match kind {
            "html" => page_with(network),
            "js" => ResourceConfig::Script(ScriptConfig {
                network,
                ..ScriptConfig::default()
            }),
            _ => ResourceConfig::Stylesheet(StyleConfig {
                network,
                ..StyleConfig::default()
            }),
        };

        let response = get(addr, &config_url(route, &config)).await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body.len(), 14000, "route {} pads exactly", route);
    }
}

#[tokio::test]
async fn follows_a_redirect_chain_to_completion() {
    let addr = start_server(vec![]).await;
    let config = page_with(NetworkSettings {
        redirect_count: Some(2),
        ..NetworkSettings::default()
    });

    let first = get(addr, &config_url("/api/page.html", &config)).await;
    assert_eq!(first.status, 302);
    let location = first.headers.get("location").expect("location header").clone();
    assert!(location.starts_with("/api/page.html?config="));

    let second = get(addr, &location).await;
    assert_eq!(second.status, 302);
    let location = second.headers.get("location").expect("location header").clone();

    let last = get(addr, &location).await;
    assert_eq!(last.status, 200);
    assert!(last.headers.get("location").is_none());
}

#[tokio::test]
async fn waits_for_the_fetch_delay_before_redirecting() {
    let addr = start_server(vec![]).await;
    let config = page_with(NetworkSettings {
        redirect_count: Some(1),
        fetch_delay: Some(250),
        ..NetworkSettings::default()
    });

    let start = Instant::now();
    let response = get(addr, &config_url("/api/page.html", &config)).await;
    assert_eq!(response.status, 302);
    assert!(start.elapsed().as_millis() >= 250);
}

#[tokio::test]
async fn resolves_origin_preferences_with_degradation() {
    let origins = vec![
        "http://origin-one.test".to_string(),
        "http://origin-two.test".to_string(),
    ];
    let addr = start_server(origins).await;

    let response = get(addr, &config_url("/api/page.html", &head_script(OriginPreference::SameOrigin))).await;
    assert!(!response.text().contains("origin-one.test"));

    let response = get(addr, &config_url("/api/page.html", &head_script(OriginPreference::Primary))).await;
    assert!(response.text().contains("http://origin-one.test/api/script.js?config="));
    assert!(!response.text().contains("origin-two.test"));

    let response = get(addr, &config_url("/api/page.html", &head_script(OriginPreference::Secondary))).await;
    assert!(response.text().contains("http://origin-two.test/api/script.js?config="));

    // Only two origins are configured, so later preferences fall back to
    // the last one instead of failing.
    let response = get(addr, &config_url("/api/page.html", &head_script(OriginPreference::Quaternary))).await;
    assert!(response.text().contains("http://origin-two.test/api/script.js?config="));
    assert!(!response.text().contains("origin-one.test"));
}

#[tokio::test]
async fn rejects_unknown_routes_and_bad_configs() {
    let addr = start_server(vec![]).await;

    let response = get(addr, "/api/nope.bin").await;
    assert_eq!(response.status, 404);

    let response = get(addr, "/api/page.html").await;
    assert_eq!(response.status, 500);

    let response = get(addr, "/api/page.html?config=%21%21garbage").await;
    assert_eq!(response.status, 500);
}
