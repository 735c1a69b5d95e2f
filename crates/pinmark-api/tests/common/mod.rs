#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use pinmark_api::AppStateInner;
use pinmark_db::LocationStore;

/// Build the same router `main.rs` serves, over a fresh in-memory store.
pub fn build_test_app() -> Router {
    pinmark_api::router(AppStateInner::new(LocationStore::new()), true)
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a GraphQL document and return the decoded response body.
pub async fn graphql(app: &Router, query: &str, variables: Value) -> Value {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/graphql")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "query": query, "variables": variables }).to_string(),
        ))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

pub const LIST: &str = "query { locations { id name latitude longitude color imageBase64 } }";

pub const CREATE: &str = "mutation Create($latitude: Float!, $longitude: Float!, $name: String!, $color: String!, $imageBase64: String) {
    createLocation(latitude: $latitude, longitude: $longitude, name: $name, color: $color, imageBase64: $imageBase64) {
        id name latitude longitude color imageBase64
    }
}";

pub const UPDATE: &str = "mutation Update($id: ID!, $name: String, $latitude: Float, $longitude: Float, $color: String, $imageBase64: String) {
    updateLocation(id: $id, name: $name, latitude: $latitude, longitude: $longitude, color: $color, imageBase64: $imageBase64) {
        id name latitude longitude color imageBase64
    }
}";

pub const DELETE: &str = "mutation Delete($id: ID!) { deleteLocation(id: $id) }";

pub async fn list(app: &Router) -> Vec<Value> {
    let body = graphql(app, LIST, json!({})).await;
    body["data"]["locations"].as_array().unwrap().clone()
}

pub async fn create(app: &Router, name: &str, lat: f64, lng: f64, color: &str) -> Value {
    let body = graphql(
        app,
        CREATE,
        json!({ "latitude": lat, "longitude": lng, "name": name, "color": color }),
    )
    .await;
    assert!(body.get("errors").is_none(), "{body}");
    body["data"]["createLocation"].clone()
}
