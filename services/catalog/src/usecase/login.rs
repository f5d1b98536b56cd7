use chrono::Utc;

use crate::domain::repository::{SessionStore, UserRepository};
use crate::domain::types::User;
use crate::error::CatalogError;
use crate::usecase::session::generate_token;

pub struct LoginInput {
    pub email: String,
    pub secret: String,
}

pub struct LoginUseCase<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    pub users: U,
    pub sessions: S,
}

impl<U, S> LoginUseCase<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    /// Log in with a local credential. Every failure path returns the same
    /// `InvalidCredentials` so the response does not reveal whether the email
    /// is registered.
    pub async fn execute(&self, input: LoginInput) -> Result<(User, String), CatalogError> {
        let email = input.email.trim().to_lowercase();

        // 1. Unknown email
        let mut user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(CatalogError::InvalidCredentials)?;

        // 2. Google-only accounts have no local secret to check
        let stored = user
            .credential
            .secret()
            .ok_or(CatalogError::InvalidCredentials)?;

        // 3. Exact byte comparison against the stored secret
        if stored.as_bytes() != input.secret.as_bytes() {
            return Err(CatalogError::InvalidCredentials);
        }

        // 4. Record the login and open a session
        self.users.touch_last_login(user.id).await?;
        user.last_login_at = Some(Utc::now());

        let token = generate_token();
        self.sessions.put(&token, user.id).await?;
        Ok((user, token))
    }
}
