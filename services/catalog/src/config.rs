/// Catalog service configuration loaded from environment variables.
///
/// The Google client id and secret are required external configuration: the
/// process refuses to start without them, and no fallback value exists in
/// source.
#[derive(Debug)]
pub struct CatalogConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Redis connection URL (session store).
    pub redis_url: String,
    /// Google OAuth client id.
    pub google_client_id: String,
    /// Google OAuth client secret.
    pub google_client_secret: String,
    /// Redirect URL registered with Google (the `/auth/google/callback` route).
    pub google_redirect_url: String,
    /// Cookie domain attribute (root domain, e.g. "example.com").
    pub cookie_domain: String,
    /// Frontend origin, used for CORS and post-OAuth redirects.
    pub frontend_origin: String,
    /// TCP port to listen on (default 5000). Env var: `CATALOG_PORT`.
    pub catalog_port: u16,
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            redis_url: std::env::var("REDIS_URL").expect("REDIS_URL"),
            google_client_id: std::env::var("GOOGLE_CLIENT_ID").expect("GOOGLE_CLIENT_ID"),
            google_client_secret: std::env::var("GOOGLE_CLIENT_SECRET")
                .expect("GOOGLE_CLIENT_SECRET"),
            google_redirect_url: std::env::var("GOOGLE_REDIRECT_URL")
                .expect("GOOGLE_REDIRECT_URL"),
            cookie_domain: std::env::var("COOKIE_DOMAIN").expect("COOKIE_DOMAIN"),
            frontend_origin: std::env::var("FRONTEND_ORIGIN").expect("FRONTEND_ORIGIN"),
            catalog_port: std::env::var("CATALOG_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
        }
    }
}
