//! Integration tests for the country reference data and health endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create, get, graphql};
use serde_json::{Value, json};

#[tokio::test]
async fn countries_lists_the_catalog() {
    let app = build_test_app();
    let body = graphql(&app, "query { countries { id name code language } }", json!({})).await;

    let countries = body["data"]["countries"].as_array().unwrap();
    assert_eq!(countries.len(), 27);
    assert_eq!(countries[0]["code"], "US");
    assert!(countries.iter().all(|c| c["id"].is_string()));
}

#[tokio::test]
async fn country_by_code_returns_default_coordinates() {
    let app = build_test_app();
    let body = graphql(
        &app,
        "query Country($code: String!) { country(code: $code) { name defaultLatitude defaultLongitude language } }",
        json!({ "code": "JP" }),
    )
    .await;

    let japan = &body["data"]["country"];
    assert_eq!(japan["name"], "Japan");
    assert_eq!(japan["defaultLatitude"], 36.2048);
    assert_eq!(japan["defaultLongitude"], 138.2529);
    assert_eq!(japan["language"], json!(["Japanese"]));
}

#[tokio::test]
async fn unknown_country_is_null() {
    let app = build_test_app();
    let body = graphql(&app, "query { country(code: \"ZZ\") { name } }", json!({})).await;

    assert!(body.get("errors").is_none(), "{body}");
    assert_eq!(body["data"]["country"], Value::Null);
}

#[tokio::test]
async fn health_reports_location_count() {
    let app = build_test_app();
    create(&app, "A", 1.0, 2.0, "#fff").await;

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["locations"], 1);
    assert_eq!(json["persistent"], false);
}

#[tokio::test]
async fn graphiql_page_is_served() {
    let app = build_test_app();
    let response = get(app, "/graphql").await;
    assert_eq!(response.status(), StatusCode::OK);
}
