use chrono::Utc;
use uuid::Uuid;

use bookshelf_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::{Credential, User};
use crate::error::CatalogError;

pub struct SignupInput {
    pub username: String,
    pub email: String,
    pub secret: String,
}

pub struct SignupUseCase<U>
where
    U: UserRepository,
{
    pub users: U,
}

impl<U> SignupUseCase<U>
where
    U: UserRepository,
{
    pub async fn execute(&self, input: SignupInput) -> Result<User, CatalogError> {
        // 1. All three fields are required
        let username = input.username.trim();
        let email = input.email.trim().to_lowercase();
        if username.is_empty() || email.is_empty() || input.secret.is_empty() {
            return Err(CatalogError::MissingData);
        }

        // 2. Single probe over both unique fields; the response does not say
        //    which one collided
        if self
            .users
            .find_by_username_or_email(username, &email)
            .await?
            .is_some()
        {
            return Err(CatalogError::UserAlreadyExists);
        }

        // 3. New accounts are plain users; the first admin is promoted out of
        //    band
        let user = User {
            id: Uuid::now_v7(),
            credential: Credential::Local {
                username: username.to_owned(),
                secret: input.secret,
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
