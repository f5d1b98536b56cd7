use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use bookshelf_catalog::domain::repository::{
    BookRepository, GoogleOAuthPort, SessionStore, UserRepository,
};
use bookshelf_catalog::domain::types::{
    Book, BookChanges, Credential, GoogleProfile, PLACEHOLDER_COVER_URL, User,
};
use bookshelf_catalog::error::CatalogError;
use bookshelf_domain::genre::Genre;
use bookshelf_domain::user::UserRole;

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn local_user(username: &str, email: &str, secret: &str) -> User {
    User {
        id: Uuid::now_v7(),
        credential: Credential::Local {
            username: username.to_owned(),
            secret: secret.to_owned(),
        },
        email: email.to_owned(),
        role: UserRole::User,
        last_login_at: None,
        created_at: Utc::now(),
    }
}

pub fn admin_user(username: &str, email: &str, secret: &str) -> User {
    User {
        role: UserRole::Admin,
        ..local_user(username, email, secret)
    }
}

pub fn google_user(google_id: &str, display_name: &str, email: &str) -> User {
    User {
        id: Uuid::now_v7(),
        credential: Credential::External {
            google_id: google_id.to_owned(),
            display_name: display_name.to_owned(),
        },
        email: email.to_owned(),
        role: UserRole::User,
        last_login_at: None,
        created_at: Utc::now(),
    }
}

pub fn book(title: &str, author: &str, genre: Genre, description: &str) -> Book {
    Book {
        id: Uuid::now_v7(),
        title: title.to_owned(),
        author: author.to_owned(),
        genre,
        description: description.to_owned(),
        publication_year: None,
        cover_image_url: PLACEHOLDER_COVER_URL.to_owned(),
        owner_admin_id: None,
        created_at: Utc::now(),
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, CatalogError> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CatalogError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, CatalogError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.credential.google_id() == Some(google_id))
            .cloned())
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, CatalogError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.credential.username() == Some(username) || u.email == email)
            .cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), CatalogError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, CatalogError> {
        let mut users = self.users.lock().unwrap().clone();
        users.sort_by_key(|u| std::cmp::Reverse(u.created_at));
        Ok(users)
    }

    async fn list_active_since(&self, since: DateTime<Utc>) -> Result<Vec<User>, CatalogError> {
        let mut users: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.last_login_at.is_some_and(|at| at >= since))
            .cloned()
            .collect();
        users.sort_by_key(|u| std::cmp::Reverse(u.last_login_at));
        Ok(users)
    }

    async fn link_google(
        &self,
        id: Uuid,
        google_id: &str,
        google_name: &str,
    ) -> Result<(), CatalogError> {
        let mut users = self.users.lock().unwrap();
        if let Some(u) = users.iter_mut().find(|u| u.id == id) {
            u.credential = u.credential.clone().with_google(google_id, google_name);
        }
        Ok(())
    }

    async fn touch_last_login(&self, id: Uuid) -> Result<(), CatalogError> {
        let mut users = self.users.lock().unwrap();
        if let Some(u) = users.iter_mut().find(|u| u.id == id) {
            u.last_login_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn update_role(&self, id: Uuid, role: UserRole) -> Result<Option<User>, CatalogError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == id) {
            Some(u) => {
                u.role = role;
                Ok(Some(u.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CatalogError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

// ── MockBookRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockBookRepo {
    pub books: Arc<Mutex<Vec<Book>>>,
}

impl MockBookRepo {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: Arc::new(Mutex::new(books)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn get(&self, id: Uuid) -> Option<Book> {
        self.books.lock().unwrap().iter().find(|b| b.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.books.lock().unwrap().len()
    }
}

impl BookRepository for MockBookRepo {
    async fn list(&self) -> Result<Vec<Book>, CatalogError> {
        Ok(self.books.lock().unwrap().clone())
    }

    async fn list_by_genre(&self, genre: Genre) -> Result<Vec<Book>, CatalogError> {
        Ok(self
            .books
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.genre == genre)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, CatalogError> {
        Ok(self.get(id))
    }

    async fn insert(&self, book: &Book) -> Result<(), CatalogError> {
        self.books.lock().unwrap().push(book.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &BookChanges,
    ) -> Result<Option<Book>, CatalogError> {
        let mut books = self.books.lock().unwrap();
        let Some(b) = books.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        if let Some(ref title) = changes.title {
            b.title = title.clone();
        }
        if let Some(ref author) = changes.author {
            b.author = author.clone();
        }
        if let Some(genre) = changes.genre {
            b.genre = genre;
        }
        if let Some(ref description) = changes.description {
            b.description = description.clone();
        }
        if let Some(year) = changes.publication_year {
            b.publication_year = Some(year);
        }
        if let Some(ref cover) = changes.cover_image_url {
            b.cover_image_url = cover.clone();
        }
        Ok(Some(b.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CatalogError> {
        let mut books = self.books.lock().unwrap();
        let before = books.len();
        books.retain(|b| b.id != id);
        Ok(books.len() < before)
    }
}

// ── MockSessionStore ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockSessionStore {
    pub sessions: Arc<Mutex<HashMap<String, Uuid>>>,
}

impl MockSessionStore {
    pub fn empty() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn with_session(token: &str, user_id: Uuid) -> Self {
        let store = Self::empty();
        store
            .sessions
            .lock()
            .unwrap()
            .insert(token.to_owned(), user_id);
        store
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

impl SessionStore for MockSessionStore {
    async fn put(&self, token: &str, user_id: Uuid) -> Result<(), CatalogError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(token.to_owned(), user_id);
        Ok(())
    }

    async fn resolve(&self, token: &str) -> Result<Option<Uuid>, CatalogError> {
        Ok(self.sessions.lock().unwrap().get(token).copied())
    }

    async fn destroy(&self, token: &str) -> Result<(), CatalogError> {
        self.sessions.lock().unwrap().remove(token);
        Ok(())
    }
}

// ── MockGoogleOAuth ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockGoogleOAuth {
    pub profile: Option<GoogleProfile>,
}

impl MockGoogleOAuth {
    pub fn returning(profile: GoogleProfile) -> Self {
        Self {
            profile: Some(profile),
        }
    }

    pub fn failing() -> Self {
        Self { profile: None }
    }
}

impl GoogleOAuthPort for MockGoogleOAuth {
    async fn exchange_code(&self, _code: &str) -> Result<GoogleProfile, CatalogError> {
        self.profile
            .clone()
            .ok_or_else(|| CatalogError::Internal(anyhow::anyhow!("code exchange failed")))
    }
}
