use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;

use config::Config;
use services::EntryService;
use store::MoodStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MoodStore>,
    pub entries: EntryService,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn MoodStore>, config: Arc<Config>) -> Self {
        let entries = EntryService::new(store.clone());
        Self {
            store,
            entries,
            config,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz));

    let protected_routes = Router::new()
        .route("/api/moods", post(handlers::entries::create_entry))
        .route("/api/moods", get(handlers::entries::list_entries))
        .route("/api/moods/stats", get(handlers::entries::entry_statistics))
        .route("/api/moods/:id", put(handlers::entries::update_entry))
        .route("/api/moods/:id", delete(handlers::entries::delete_entry))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    let cors = CorsLayer::new()
        .allow_origin(
            state
                .config
                .frontend_url
                .parse::<axum::http::HeaderValue>()
                .unwrap(),
        )
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
