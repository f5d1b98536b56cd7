use deadpool_redis::Pool;
use deadpool_redis::redis::AsyncCommands;
use uuid::Uuid;

use crate::cookie::SESSION_TTL_SECS;
use crate::domain::repository::SessionStore;
use crate::error::CatalogError;

fn session_key(token: &str) -> String {
    format!("session:{token}")
}

/// Sessions live in Redis so every catalog instance sees the same state and
/// expiry is handled by the store itself.
#[derive(Clone)]
pub struct RedisSessionStore {
    pub pool: Pool,
}

impl SessionStore for RedisSessionStore {
    async fn put(&self, token: &str, user_id: Uuid) -> Result<(), CatalogError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| CatalogError::Internal(e.into()))?;
        let _: () = conn
            .set_ex(
                session_key(token),
                user_id.to_string(),
                SESSION_TTL_SECS as u64,
            )
            .await
            .map_err(|e| CatalogError::Internal(e.into()))?;
        Ok(())
    }

    async fn resolve(&self, token: &str) -> Result<Option<Uuid>, CatalogError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| CatalogError::Internal(e.into()))?;
        let raw: Option<String> = conn
            .get(session_key(token))
            .await
            .map_err(|e| CatalogError::Internal(e.into()))?;
        // A value we cannot parse is treated the same as no session at all.
        Ok(raw.and_then(|v| Uuid::parse_str(&v).ok()))
    }

    async fn destroy(&self, token: &str) -> Result<(), CatalogError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| CatalogError::Internal(e.into()))?;
        let _: () = conn
            .del(session_key(token))
            .await
            .map_err(|e| CatalogError::Internal(e.into()))?;
        Ok(())
    }
}
