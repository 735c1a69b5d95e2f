use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Json,
    extract::State,
    response::{Html, IntoResponse},
};
use tracing::debug;

use crate::ServerState;

/// POST /graphql
pub async fn graphql(State(state): State<ServerState>, req: GraphQLRequest) -> GraphQLResponse {
    let req = req.into_inner();
    debug!(operation = ?req.operation_name, "GraphQL request");
    state.schema.execute(req).await.into()
}

/// GET /graphql, the GraphiQL explorer.
pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

/// GET /health
pub async fn health(State(state): State<ServerState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "locations": state.app.store.len().await,
        "persistent": state.app.store.is_persistent(),
    }))
}
