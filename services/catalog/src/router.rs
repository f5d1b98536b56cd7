use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{delete, get, patch, post},
};
use tower_http::cors::CorsLayer;

use bookshelf_core::health::{healthz, readyz};
use bookshelf_core::middleware::{request_id_layer, trace_layer};

use crate::handlers::{
    auth::{get_session, google_authorize, google_callback, login, logout, signup},
    book::{
        create_book, delete_book, get_book, list_books, list_genres, search_books, update_book,
    },
    user::{delete_user, get_user, list_active_users, list_users, update_user_role},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // The frontend sends the session cookie cross-origin, so CORS must name
    // the exact origin and allow credentials.
    let cors = CorsLayer::new()
        .allow_origin(
            state
                .frontend_origin
                .parse::<HeaderValue>()
                .expect("FRONTEND_ORIGIN must be a valid origin"),
        )
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/session", get(get_session))
        .route("/auth/session", delete(logout))
        .route("/auth/google", get(google_authorize))
        .route("/auth/google/callback", get(google_callback))
        // Catalog
        .route("/genres", get(list_genres))
        .route("/books", get(list_books))
        .route("/books/search", get(search_books))
        .route("/books/{id}", get(get_book))
        .route("/books", post(create_book))
        .route("/books/{id}", patch(update_book))
        .route("/books/{id}", delete(delete_book))
        // User administration
        .route("/users", get(list_users))
        .route("/users/active", get(list_active_users))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/role", patch(update_user_role))
        .route("/users/{id}", delete(delete_user))
        .layer(cors)
        .layer(trace_layer())
        .layer(request_id_layer())
        .with_state(state)
}
