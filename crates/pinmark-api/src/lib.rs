pub mod routes;
pub mod schema;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use pinmark_db::{CountryCatalog, LocationStore};

pub use schema::PinmarkSchema;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: LocationStore,
    pub countries: CountryCatalog,
}

impl AppStateInner {
    pub fn new(store: LocationStore) -> AppState {
        Arc::new(Self {
            store,
            countries: CountryCatalog::builtin(),
        })
    }
}

/// State handed to the axum handlers.
#[derive(Clone)]
pub struct ServerState {
    pub app: AppState,
    pub schema: PinmarkSchema,
}

/// Full router with CORS and request tracing. `graphiql` also serves the
/// explorer page on `GET /graphql`.
pub fn router(app: AppState, graphiql: bool) -> Router {
    let state = ServerState {
        schema: schema::build(app.clone()),
        app,
    };

    let graphql = if graphiql {
        get(routes::graphiql).post(routes::graphql)
    } else {
        axum::routing::post(routes::graphql)
    };

    Router::new()
        .route("/graphql", graphql)
        .route("/health", get(routes::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
