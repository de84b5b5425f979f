//! Tests for the one-shot `handle` entry point: printed reply and exit status.

use weather_core::Config;
use weather_server::handle_once;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LONDON: &str = r#"{"name":"London","weather":[{"main":"Clouds","description":"overcast clouds"}],"main":{"temp":15.2}}"#;

fn config_for(base_url: &str) -> Config {
    Config {
        api_key: Some("TEST_KEY".into()),
        base_url: base_url.to_string(),
        ..Config::default()
    }
}

async fn run(config: &Config, city: Option<&str>) -> (u8, String) {
    let mut out = Vec::new();
    let status = handle_once(config, city, &mut out).await.unwrap();
    (status, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn success_prints_report_and_exits_zero() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "London"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LONDON))
        .expect(1)
        .mount(&upstream)
        .await;

    let (status, out) = run(&config_for(&upstream.uri()), Some("London")).await;

    assert_eq!(status, 0);
    assert_eq!(out, format!("{LONDON}\n"));
}

#[tokio::test]
async fn missing_city_prints_400_body_and_exits_nonzero() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LONDON))
        .expect(0)
        .mount(&upstream)
        .await;

    for city in [None, Some(""), Some("  ")] {
        let (status, out) = run(&config_for(&upstream.uri()), city).await;

        assert_eq!(status, 1, "{city:?}");
        assert_eq!(out, "{\"error\":\"City name required\"}\n");
    }
}

#[tokio::test]
async fn upstream_404_prints_500_body_and_exits_nonzero() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("q", "Zzzznotacity"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"cod":"404","message":"city not found"}"#),
        )
        .expect(1)
        .mount(&upstream)
        .await;

    let (status, out) = run(&config_for(&upstream.uri()), Some("Zzzznotacity")).await;

    assert_eq!(status, 1);
    assert_eq!(out, "{\"error\":\"Failed to fetch weather data\"}\n");
}

#[tokio::test]
async fn missing_api_key_is_a_startup_error() {
    let config = Config::default();
    let mut out = Vec::new();

    let err = handle_once(&config, Some("London"), &mut out).await.unwrap_err();

    assert!(err.to_string().contains("No API key configured"));
    assert!(out.is_empty());
}
