//! REST sidecar for the note board
//!
//! Exposes the same board as the MCP tools over plain HTTP/JSON, for
//! dashboards and scripts that do not speak MCP.

pub mod api;

use anyhow::Result;
use axum::{
    routing::{get, patch},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::store::NoteStore;

/// Start the HTTP server and run until it fails
pub async fn serve(addr: SocketAddr, store: NoteStore) -> Result<()> {
    let app = create_router(store);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("REST API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the router with all routes
pub fn create_router(store: NoteStore) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/notes",
            get(api::list_notes)
                .post(api::create_note)
                .delete(api::clear_notes),
        )
        .route(
            "/notes/:id",
            patch(api::update_note).delete(api::delete_note),
        )
        .route("/snapshot", get(api::snapshot))
        .route("/health", get(api::health_check));

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(store)
}
