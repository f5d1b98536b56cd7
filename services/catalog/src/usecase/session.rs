use rand::RngExt;

use crate::domain::repository::{SessionStore, UserRepository};
use crate::domain::types::User;
use crate::error::CatalogError;

/// Charset for session tokens (uppercase alphanumeric).
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a session token in characters.
pub const SESSION_TOKEN_LEN: usize = 48;

pub(crate) fn generate_token() -> String {
    let mut rng = rand::rng();
    (0..SESSION_TOKEN_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// Resolve a request's session token to the logged-in user, if any. Absent,
/// unknown, and stale tokens all resolve to `None`; none of them is an error.
pub struct ResolveSessionUseCase<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    pub users: U,
    pub sessions: S,
}

impl<U, S> ResolveSessionUseCase<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    pub async fn execute(&self, token: Option<String>) -> Result<Option<User>, CatalogError> {
        let Some(token) = token else {
            return Ok(None);
        };
        let Some(user_id) = self.sessions.resolve(&token).await? else {
            return Ok(None);
        };
        // The session may outlive the account; a deleted user is anonymous.
        self.users.find_by_id(user_id).await
    }
}

/// Destroy the caller's session. Logging out without a session succeeds.
pub struct LogoutUseCase<S>
where
    S: SessionStore,
{
    pub sessions: S,
}

impl<S> LogoutUseCase<S>
where
    S: SessionStore,
{
    pub async fn execute(&self, token: Option<String>) -> Result<(), CatalogError> {
        if let Some(token) = token {
            self.sessions.destroy(&token).await?;
        }
        Ok(())
    }
}

/// Gate for admin-only operations. An anonymous caller gets 401 and a
/// non-admin caller gets 403; there is no fallback identity.
pub struct RequireAdminUseCase<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    pub users: U,
    pub sessions: S,
}

impl<U, S> RequireAdminUseCase<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    pub async fn execute(&self, token: Option<String>) -> Result<User, CatalogError> {
        let token = token.ok_or(CatalogError::NotAuthenticated)?;
        let user_id = self
            .sessions
            .resolve(&token)
            .await?
            .ok_or(CatalogError::NotAuthenticated)?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(CatalogError::NotAuthenticated)?;
        if !user.role.is_admin() {
            return Err(CatalogError::Forbidden);
        }
        Ok(user)
    }
}
