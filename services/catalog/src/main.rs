use sea_orm::{Database, DatabaseConnection, SqlxPostgresConnector};
use tracing::{info, warn};

use bookshelf_catalog::config::CatalogConfig;
use bookshelf_catalog::infra::oauth::GoogleOAuthClient;
use bookshelf_catalog::router::build_router;
use bookshelf_catalog::state::AppState;
use bookshelf_core::tracing::init_tracing;

/// Connect to PostgreSQL. An unreachable database at boot does not stop the
/// process: the server comes up degraded with a lazy pool that retries on
/// first use, so health checks and static routes stay available.
async fn connect_db(database_url: &str) -> DatabaseConnection {
    match Database::connect(database_url).await {
        Ok(db) => db,
        Err(e) => {
            warn!(error = %e, "database unreachable at startup, continuing degraded");
            let pool = sea_orm::sqlx::postgres::PgPoolOptions::new()
                .connect_lazy(database_url)
                .expect("invalid DATABASE_URL");
            SqlxPostgresConnector::from_sqlx_postgres_pool(pool)
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let config = CatalogConfig::from_env();

    let db = connect_db(&config.database_url).await;

    // Pool creation is lazy; Redis being down surfaces per-request, not here.
    let redis_cfg = deadpool_redis::Config::from_url(&config.redis_url);
    let redis = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .expect("failed to create Redis pool");

    let oauth = GoogleOAuthClient::new(
        config.google_client_id,
        config.google_client_secret,
        config.google_redirect_url,
    );

    let state = AppState {
        db,
        redis,
        oauth,
        cookie_domain: config.cookie_domain,
        frontend_origin: config.frontend_origin,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.catalog_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("catalog service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
