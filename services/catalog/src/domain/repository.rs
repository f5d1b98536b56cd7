#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use bookshelf_domain::genre::Genre;
use bookshelf_domain::user::UserRole;

use crate::domain::types::{Book, BookChanges, GoogleProfile, User};
use crate::error::CatalogError;

/// Repository for user accounts. Uniqueness of email, username, and google_id
/// is enforced by the store.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, CatalogError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CatalogError>;

    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, CatalogError>;

    /// Combined existence probe for signup: matches on either field, so the
    /// caller cannot tell which one collided.
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, CatalogError>;

    async fn insert(&self, user: &User) -> Result<(), CatalogError>;

    /// All users, newest-first by creation time.
    async fn list(&self) -> Result<Vec<User>, CatalogError>;

    /// Users whose last login is at or after `since`, most recent first.
    async fn list_active_since(&self, since: DateTime<Utc>) -> Result<Vec<User>, CatalogError>;

    /// Attach a Google identity to an existing account, preserving any local
    /// credential on the row.
    async fn link_google(
        &self,
        id: Uuid,
        google_id: &str,
        google_name: &str,
    ) -> Result<(), CatalogError>;

    async fn touch_last_login(&self, id: Uuid) -> Result<(), CatalogError>;

    /// Set a user's role. Returns the updated user, or `None` if the id is
    /// unknown.
    async fn update_role(&self, id: Uuid, role: UserRole) -> Result<Option<User>, CatalogError>;

    /// Delete a user. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, CatalogError>;
}

/// Repository for catalog books.
pub trait BookRepository: Send + Sync {
    /// All books, newest-first by creation time.
    async fn list(&self) -> Result<Vec<Book>, CatalogError>;

    /// Books of one genre, newest-first by creation time.
    async fn list_by_genre(&self, genre: Genre) -> Result<Vec<Book>, CatalogError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, CatalogError>;

    async fn insert(&self, book: &Book) -> Result<(), CatalogError>;

    /// Apply a partial update. Returns the updated book, or `None` if the id
    /// is unknown.
    async fn update(&self, id: Uuid, changes: &BookChanges)
    -> Result<Option<Book>, CatalogError>;

    /// Delete a book. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, CatalogError>;
}

/// Server-side session store keyed by opaque token, fixed TTL, no renewal on
/// access.
pub trait SessionStore: Send + Sync {
    async fn put(&self, token: &str, user_id: Uuid) -> Result<(), CatalogError>;

    /// Resolve a token to a user id. Expired or unknown tokens yield `None`.
    async fn resolve(&self, token: &str) -> Result<Option<Uuid>, CatalogError>;

    /// Destroy a session. Idempotent: destroying an absent token is not an
    /// error.
    async fn destroy(&self, token: &str) -> Result<(), CatalogError>;
}

/// Port for the Google authorization-code exchange.
pub trait GoogleOAuthPort: Send + Sync {
    /// Trade a callback code for the user's profile.
    async fn exchange_code(&self, code: &str) -> Result<GoogleProfile, CatalogError>;
}
