use chrono::{Duration, Utc};
use uuid::Uuid;

use bookshelf_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::{ACTIVE_WINDOW_MINUTES, User};
use crate::error::CatalogError;

pub struct ListUsersUseCase<U>
where
    U: UserRepository,
{
    pub users: U,
}

impl<U> ListUsersUseCase<U>
where
    U: UserRepository,
{
    pub async fn execute(&self) -> Result<Vec<User>, CatalogError> {
        self.users.list().await
    }
}

/// Users who logged in within the activity window.
pub struct ListActiveUsersUseCase<U>
where
    U: UserRepository,
{
    pub users: U,
}

impl<U> ListActiveUsersUseCase<U>
where
    U: UserRepository,
{
    pub async fn execute(&self) -> Result<Vec<User>, CatalogError> {
        let since = Utc::now() - Duration::minutes(ACTIVE_WINDOW_MINUTES);
        self.users.list_active_since(since).await
    }
}

pub struct GetUserUseCase<U>
where
    U: UserRepository,
{
    pub users: U,
}

impl<U> GetUserUseCase<U>
where
    U: UserRepository,
{
    pub async fn execute(&self, id: Uuid) -> Result<User, CatalogError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::UserNotFound)
    }
}

pub struct UpdateRoleUseCase<U>
where
    U: UserRepository,
{
    pub users: U,
}

impl<U> UpdateRoleUseCase<U>
where
    U: UserRepository,
{
    pub async fn execute(&self, id: Uuid, role: &str) -> Result<User, CatalogError> {
        let role = UserRole::from_str(role).ok_or(CatalogError::InvalidRole)?;
        self.users
            .update_role(id, role)
            .await?
            .ok_or(CatalogError::UserNotFound)
    }
}

pub struct DeleteUserUseCase<U>
where
    U: UserRepository,
{
    pub users: U,
}

impl<U> DeleteUserUseCase<U>
where
    U: UserRepository,
{
    /// Deleting an account does not remove the books it created; their
    /// attribution is simply cleared by the store.
    pub async fn execute(&self, id: Uuid) -> Result<(), CatalogError> {
        if !self.users.delete(id).await? {
            return Err(CatalogError::UserNotFound);
        }
        Ok(())
    }
}
