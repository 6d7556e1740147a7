//! End-to-end tests: a stub provider and the proxy, both on local ports.

use std::time::Duration;

use axum::{Router, extract::Path, http::StatusCode, routing::get};

use departures_server::upstream::{UpstreamClient, UpstreamConfig};
use departures_server::web::{AppState, create_router};

const SITE_9001: &str = r#"{
    "departures": [
        {
            "destination": "Uptown",
            "direction": "South",
            "scheduled": "2024-01-15T08:10:00",
            "expected": "2024-01-15T08:10:00",
            "line": { "id": 2, "designation": "2" }
        },
        {
            "destination": "Downtown",
            "direction": "North",
            "scheduled": "2024-01-15T08:00:00",
            "expected": "2024-01-15T08:05:00",
            "line": { "id": 1, "designation": "1" }
        }
    ]
}"#;

/// Serve `router` on an ephemeral local port and return its base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Stub provider: site 9001 has two departures, site 0 returns garbage,
/// any other site has none.
fn stub_provider() -> Router {
    Router::new().route(
        "/v1/sites/:site/departures",
        get(|Path(site): Path<String>| async move {
            match site.as_str() {
                "9001" => SITE_9001.to_string(),
                "0" => "Internal Server Error".to_string(),
                _ => r#"{"departures": []}"#.to_string(),
            }
        }),
    )
}

/// Start the proxy against the given provider base URL.
async fn start_proxy(provider: &str) -> String {
    let config = UpstreamConfig::new()
        .with_url_template(format!("{provider}/v1/sites/{{siteId}}/departures"))
        .with_timeout(Duration::from_secs(5));
    let upstream = UpstreamClient::new(config).unwrap();
    serve(create_router(AppState::new(upstream))).await
}

async fn start() -> String {
    let provider = serve(stub_provider()).await;
    start_proxy(&provider).await
}

async fn get_text(url: &str) -> (StatusCode, String, String) {
    let response = reqwest::get(url).await.unwrap();
    let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    (status, content_type, response.text().await.unwrap())
}

#[tokio::test]
async fn text_report_orders_by_expected_time() {
    let proxy = start().await;

    let (status, content_type, body) = get_text(&format!("{proxy}/departures?siteId=9001")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(
        body,
        "\
Upcoming Departures for site ID 9001 (sorted by expected departure time):
--------------------
Line 1 (ID: 1) to Downtown
  Direction: North
  Scheduled: 08:00
  Expected:  08:05
  Delay:     5 minutes
--------------------
Line 2 (ID: 2) to Uptown
  Direction: South
  Scheduled: 08:10
  Expected:  08:10
--------------------
"
    );
}

#[tokio::test]
async fn text_report_with_line_filter() {
    let proxy = start().await;

    let (status, _, body) = get_text(&format!("{proxy}/departures?siteId=9001&lineId=2")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Line 2 (ID: 2) to Uptown"));
    assert!(!body.contains("Downtown"));
}

#[tokio::test]
async fn text_report_when_nothing_matches() {
    let proxy = start().await;

    let (status, _, body) =
        get_text(&format!("{proxy}/departures?siteId=9001&direction=West")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        "No departures found matching the criteria for site ID: 9001\n"
    );
}

#[tokio::test]
async fn repeated_query_keys_use_first_value() {
    let proxy = start().await;

    let (status, _, body) =
        get_text(&format!("{proxy}/departures?siteId=9001&lineId=1&lineId=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Line 1 (ID: 1) to Downtown"), "{body}");
    assert!(!body.contains("Uptown"), "{body}");

    let (status, _, body) =
        get_text(&format!("{proxy}/departures?siteId=9001&siteId=0&direction=South&direction=North")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("Upcoming Departures for site ID 9001 "), "{body}");
    assert!(body.contains("to Uptown"), "{body}");
    assert!(!body.contains("Downtown"), "{body}");

    let response = reqwest::get(format!("{proxy}/departures/json?siteId=9001&lineId=2&lineId=1"))
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["line"]["id"], 2);
}

#[tokio::test]
async fn missing_site_id_is_500() {
    let proxy = start().await;

    for path in ["/departures", "/departures/json", "/departures?siteId="] {
        let (status, content_type, body) = get_text(&format!("{proxy}{path}")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{path}");
        assert!(content_type.starts_with("text/plain"), "{path}");
        assert_eq!(body.trim_end(), "siteId query parameter is required", "{path}");
    }
}

#[tokio::test]
async fn json_lists_sorted_departures() {
    let proxy = start().await;

    let response = reqwest::get(format!("{proxy}/departures/json?siteId=9001"))
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers().get(reqwest::header::CONTENT_TYPE).unwrap(),
        "application/json"
    );

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!([
            {
                "destination": "Downtown",
                "direction": "North",
                "scheduled": "2024-01-15T08:00:00",
                "expected": "2024-01-15T08:05:00",
                "line": { "id": 1, "designation": "1" }
            },
            {
                "destination": "Uptown",
                "direction": "South",
                "scheduled": "2024-01-15T08:10:00",
                "expected": "2024-01-15T08:10:00",
                "line": { "id": 2, "designation": "2" }
            }
        ])
    );
}

#[tokio::test]
async fn json_empty_result_is_empty_array() {
    let proxy = start().await;

    let (status, _, body) = get_text(&format!("{proxy}/departures/json?siteId=X")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");

    let (_, _, body) = get_text(&format!("{proxy}/departures/json?siteId=9001&lineId=abc")).await;
    assert_eq!(body, "[]");
}

#[tokio::test]
async fn undecodable_upstream_is_500() {
    let proxy = start().await;

    for path in ["/departures?siteId=0", "/departures/json?siteId=0"] {
        let (status, content_type, body) = get_text(&format!("{proxy}{path}")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{path}");
        assert!(content_type.starts_with("text/plain"), "{path}");
        assert!(
            body.starts_with("Error fetching departure data: error parsing JSON: "),
            "{path}: {body}"
        );
    }
}

#[tokio::test]
async fn unreachable_upstream_is_500() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let proxy = start_proxy(&dead).await;

    let (status, _, body) = get_text(&format!("{proxy}/departures?siteId=9001")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        body.starts_with("Error fetching departure data: error making request: "),
        "{body}"
    );
}

#[tokio::test]
async fn unknown_route_is_404() {
    let proxy = start().await;

    let (status, _, _) = get_text(&format!("{proxy}/health")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
