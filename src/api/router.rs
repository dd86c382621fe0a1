use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_author, create_book, delete_author, delete_book, get_author, get_book,
    list_authors, list_books, update_author, update_book,
};

/// Creates the API router with all catalog endpoints
///
/// Author endpoints:
/// - POST /v1/authors, GET /v1/authors
/// - GET, PATCH, DELETE /v1/authors/:id
///
/// Book endpoints:
/// - POST /v1/books, GET /v1/books
/// - GET, PATCH, DELETE /v1/books/:id
pub fn create_router(state: Arc<AppState>) -> Router {
    let v1 = Router::new()
        .route("/authors", get(list_authors).post(create_author))
        .route(
            "/authors/:id",
            get(get_author).patch(update_author).delete(delete_author),
        )
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/:id",
            get(get_book).patch(update_book).delete(delete_book),
        );

    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .nest("/v1", v1)
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
