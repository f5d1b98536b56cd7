use chrono::{DateTime, Datelike, Utc};
use uuid::Uuid;

use bookshelf_domain::genre::Genre;
use bookshelf_domain::search::Searchable;
use bookshelf_domain::user::UserRole;

/// How a user can authenticate. A local credential and a linked Google
/// identity may coexist; the variants make the three login paths exhaustive
/// instead of an optional-field bag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    Local {
        username: String,
        secret: String,
    },
    External {
        google_id: String,
        display_name: String,
    },
    Linked {
        username: String,
        secret: String,
        google_id: String,
        display_name: String,
    },
}

impl Credential {
    pub fn username(&self) -> Option<&str> {
        match self {
            Credential::Local { username, .. } | Credential::Linked { username, .. } => {
                Some(username)
            }
            Credential::External { .. } => None,
        }
    }

    /// The stored local secret, if this account has one.
    pub fn secret(&self) -> Option<&str> {
        match self {
            Credential::Local { secret, .. } | Credential::Linked { secret, .. } => Some(secret),
            Credential::External { .. } => None,
        }
    }

    pub fn google_id(&self) -> Option<&str> {
        match self {
            Credential::External { google_id, .. } | Credential::Linked { google_id, .. } => {
                Some(google_id)
            }
            Credential::Local { .. } => None,
        }
    }

    /// Name shown in listings: the Google profile name when linked, else the
    /// local username.
    pub fn display_name(&self) -> &str {
        match self {
            Credential::Local { username, .. } => username,
            Credential::External { display_name, .. } | Credential::Linked { display_name, .. } => {
                display_name
            }
        }
    }

    /// Attach a Google identity, preserving any local credential.
    pub fn with_google(self, google_id: &str, display_name: &str) -> Credential {
        match self {
            Credential::Local { username, secret } | Credential::Linked { username, secret, .. } => {
                Credential::Linked {
                    username,
                    secret,
                    google_id: google_id.to_owned(),
                    display_name: display_name.to_owned(),
                }
            }
            Credential::External { .. } => Credential::External {
                google_id: google_id.to_owned(),
                display_name: display_name.to_owned(),
            },
        }
    }
}

/// User account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub credential: Credential,
    pub email: String,
    pub role: UserRole,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Catalog book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub genre: Genre,
    pub description: String,
    pub publication_year: Option<i32>,
    pub cover_image_url: String,
    pub owner_admin_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Searchable for Book {
    fn title(&self) -> &str {
        &self.title
    }
    fn author(&self) -> &str {
        &self.author
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn publication_year(&self) -> Option<i32> {
        self.publication_year
    }
}

/// Partial update for a book. `None` fields are left untouched.
///
/// Set-only on purpose: `None` means "unchanged", so an update can never
/// clear `publication_year` back to absent or reset the cover. Clearing a
/// field would need an explicit-null wrapper on the wire, and no caller
/// asks for that.
#[derive(Debug, Clone, Default)]
pub struct BookChanges {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<Genre>,
    pub description: Option<String>,
    pub publication_year: Option<i32>,
    pub cover_image_url: Option<String>,
}

impl BookChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.genre.is_none()
            && self.description.is_none()
            && self.publication_year.is_none()
            && self.cover_image_url.is_none()
    }
}

/// Profile delivered by the Google authorization-code callback.
#[derive(Debug, Clone)]
pub struct GoogleProfile {
    pub id: String,
    pub display_name: String,
    pub emails: Vec<String>,
}

/// Cover shown when a book is created without one.
pub const PLACEHOLDER_COVER_URL: &str = "https://via.placeholder.com/300x400?text=Book+Cover";

/// Earliest accepted publication year.
pub const MIN_PUBLICATION_YEAR: i32 = 1000;

/// Window for the active-user listing, in minutes.
pub const ACTIVE_WINDOW_MINUTES: i64 = 30;

/// A year is plausible if it is no earlier than 1000 and at most one year in
/// the future.
pub fn valid_publication_year(year: i32) -> bool {
    year >= MIN_PUBLICATION_YEAR && year <= Utc::now().year() + 1
}
