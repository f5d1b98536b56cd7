use chrono::Utc;
use uuid::Uuid;

use bookshelf_domain::user::UserRole;

use crate::domain::repository::{GoogleOAuthPort, SessionStore, UserRepository};
use crate::domain::types::{Credential, GoogleProfile, User};
use crate::error::CatalogError;
use crate::usecase::session::generate_token;

pub struct GoogleLoginInput {
    pub code: String,
}

pub struct GoogleLoginUseCase<U, S, G>
where
    U: UserRepository,
    S: SessionStore,
    G: GoogleOAuthPort,
{
    pub users: U,
    pub sessions: S,
    pub oauth: G,
}

impl<U, S, G> GoogleLoginUseCase<U, S, G>
where
    U: UserRepository,
    S: SessionStore,
    G: GoogleOAuthPort,
{
    /// Exchange the callback code and resolve it to an account: an existing
    /// Google identity wins, then an email match gets the identity linked,
    /// and otherwise a fresh account is provisioned.
    pub async fn execute(&self, input: GoogleLoginInput) -> Result<(User, String), CatalogError> {
        let profile = self.oauth.exchange_code(&input.code).await?;
        let mut user = self.resolve_account(&profile).await?;

        self.users.touch_last_login(user.id).await?;
        user.last_login_at = Some(Utc::now());

        let token = generate_token();
        self.sessions.put(&token, user.id).await?;
        Ok((user, token))
    }

    async fn resolve_account(&self, profile: &GoogleProfile) -> Result<User, CatalogError> {
        // 1. Returning Google user
        if let Some(user) = self.users.find_by_google_id(&profile.id).await? {
            return Ok(user);
        }

        // Linking and provisioning both need the canonical address
        let email = profile
            .emails
            .first()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .ok_or_else(|| {
                CatalogError::Internal(anyhow::anyhow!(
                    "google profile {} carries no email address",
                    profile.id
                ))
            })?;

        // 2. Same email, locally registered: link the identity to that account
        if let Some(user) = self.users.find_by_email(&email).await? {
            self.users
                .link_google(user.id, &profile.id, &profile.display_name)
                .await?;
            let credential = user
                .credential
                .clone()
                .with_google(&profile.id, &profile.display_name);
            return Ok(User { credential, ..user });
        }

        // 3. First visit: provision a Google-only account
        let user = User {
            id: Uuid::now_v7(),
            credential: Credential::External {
                google_id: profile.id.clone(),
                display_name: profile.display_name.clone(),
            },
            email,
            role: UserRole::User,
            last_login_at: None,
            created_at: Utc::now(),
        };
        self.users.insert(&user).await?;
        Ok(user)
    }
}
