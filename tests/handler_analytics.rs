mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use shortlytics::routes::app_router;
use tower::ServiceExt;

fn hour_sum(json: &Value) -> u64 {
    json["clicksPerHour"]
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_u64().unwrap())
        .sum()
}

#[tokio::test]
async fn test_analytics_for_fresh_link() {
    let server = common::create_test_server();
    let short_id = common::shorten(&server, "https://example.com/page").await;

    let json = common::analytics(&server, &short_id).await;

    assert_eq!(json["longUrl"], "https://example.com/page");
    assert_eq!(json["totalClicks"], 0);
    assert_eq!(json["uniqueVisitors"], 0);

    let hours = json["clicksPerHour"].as_object().unwrap();
    assert_eq!(hours.len(), 24);
    for hour in 0..24 {
        assert_eq!(hours[&hour.to_string()], 0);
    }
    assert!(json.get("clicks").is_none());
}

#[tokio::test]
async fn test_analytics_counts_clicks_and_unique_visitors() {
    let server = common::create_test_server();
    let short_id = common::shorten(&server, "https://example.com/page").await;

    for ip in ["1.1.1.1", "1.1.1.1", "2.2.2.2"] {
        common::visit(&server, &short_id, ip)
            .await
            .assert_status(StatusCode::FOUND);
    }

    let json = common::analytics(&server, &short_id).await;

    assert_eq!(json["totalClicks"], 3);
    assert_eq!(json["uniqueVisitors"], 2);
    assert_eq!(hour_sum(&json), 3);
}

#[tokio::test]
async fn test_analytics_total_matches_redirect_count() {
    let server = common::create_test_server();
    let short_id = common::shorten(&server, "https://example.com").await;

    let ips = ["10.0.0.1", "10.0.0.2", "10.0.0.3", "10.0.0.4", "10.0.0.5"];
    for ip in ips {
        common::visit(&server, &short_id, ip).await;
    }

    let json = common::analytics(&server, &short_id).await;

    assert_eq!(json["totalClicks"], ips.len());
    assert_eq!(json["uniqueVisitors"], ips.len());
    assert_eq!(hour_sum(&json), ips.len() as u64);
}

#[tokio::test]
async fn test_analytics_is_read_only() {
    let server = common::create_test_server();
    let short_id = common::shorten(&server, "https://example.com").await;
    common::visit(&server, &short_id, "1.1.1.1").await;

    let first = common::analytics(&server, &short_id).await;
    let second = common::analytics(&server, &short_id).await;

    assert_eq!(first, second);
    assert_eq!(second["totalClicks"], 1);
}

#[tokio::test]
async fn test_analytics_scoped_to_link() {
    let server = common::create_test_server();
    let first = common::shorten(&server, "https://example.com/a").await;
    let second = common::shorten(&server, "https://example.com/b").await;

    common::visit(&server, &first, "1.1.1.1").await;
    common::visit(&server, &first, "2.2.2.2").await;
    common::visit(&server, &second, "3.3.3.3").await;

    assert_eq!(common::analytics(&server, &first).await["totalClicks"], 2);
    assert_eq!(common::analytics(&server, &second).await["totalClicks"], 1);
}

#[tokio::test]
async fn test_analytics_lists_clicks_in_order() {
    let server = common::create_test_server();
    let short_id = common::shorten(&server, "https://example.com").await;

    for ip in ["1.1.1.1", "2.2.2.2", "3.3.3.3"] {
        common::visit(&server, &short_id, ip).await;
    }

    let response = server
        .get(&format!("/an/{short_id}"))
        .add_query_param("clicks", "true")
        .await;
    response.assert_status_ok();

    let json = response.json::<Value>();
    let ips: Vec<_> = json["clicks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["ip"].as_str().unwrap().to_string())
        .collect();

    assert_eq!(ips, vec!["1.1.1.1", "2.2.2.2", "3.3.3.3"]);
}

#[tokio::test]
async fn test_analytics_not_found() {
    let server = common::create_test_server();

    let response = server.get("/an/unknownId").await;

    response.assert_status_not_found();

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["details"]["shortId"], "unknownId");
}

#[tokio::test]
async fn test_analytics_undecodable_path_is_json_not_found() {
    let server = common::create_test_server();

    let response = server.get("/an/%FF").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_analytics_invalid_clicks_flag() {
    let server = common::create_test_server();
    let short_id = common::shorten(&server, "https://example.com").await;

    let response = server
        .get(&format!("/an/{short_id}"))
        .add_query_param("clicks", "1")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(json["error"]["details"]["reason"].is_string());
}

#[tokio::test]
async fn test_analytics_trailing_slash_is_normalized() {
    let state = common::create_test_state();
    let short_id = state
        .link_service
        .create_short_link("https://example.com")
        .await
        .unwrap()
        .short_id;

    let response = app_router(state)
        .oneshot(
            Request::builder()
                .uri(format!("/an/{short_id}/"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
