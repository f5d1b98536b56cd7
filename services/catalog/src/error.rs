use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Catalog service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("admin access required")]
    Forbidden,
    #[error("user not found")]
    UserNotFound,
    #[error("book not found")]
    BookNotFound,
    #[error("user already exists with this email or username")]
    UserAlreadyExists,
    #[error("missing data")]
    MissingData,
    #[error("invalid genre")]
    InvalidGenre,
    #[error("invalid publication year")]
    InvalidYear,
    #[error("invalid role")]
    InvalidRole,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl CatalogError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::BookNotFound => "BOOK_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::MissingData => "MISSING_DATA",
            Self::InvalidGenre => "INVALID_GENRE",
            Self::InvalidYear => "INVALID_YEAR",
            Self::InvalidRole => "INVALID_ROLE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotAuthenticated | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound | Self::BookNotFound => StatusCode::NOT_FOUND,
            Self::UserAlreadyExists => StatusCode::CONFLICT,
            Self::MissingData | Self::InvalidGenre | Self::InvalidYear | Self::InvalidRole => {
                StatusCode::BAD_REQUEST
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — the trace layer already records method/uri/status for
        // all requests, and 4xx are expected client errors. Internal errors need
        // the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
