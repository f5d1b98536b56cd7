use axum::http::StatusCode;

/// Handler for `GET /healthz` — liveness check.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz` — readiness check.
///
/// Intentionally does not probe the database: the service keeps serving in a
/// degraded mode when the store is down, so a store outage must not make the
/// process unready.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
