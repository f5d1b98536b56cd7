//! Book genre categories.

use serde::{Deserialize, Serialize};

/// Genre of a catalog book. The set is closed; writes with any other value
/// are rejected at the usecase layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Genre {
    Comedy,
    Horror,
    Romance,
    SciFi,
    Fantasy,
    Mystery,
    Biography,
    History,
}

impl Genre {
    /// Every genre, in display order. Backs the `GET /genres` listing.
    pub const ALL: [Genre; 8] = [
        Genre::Comedy,
        Genre::Horror,
        Genre::Romance,
        Genre::SciFi,
        Genre::Fantasy,
        Genre::Mystery,
        Genre::Biography,
        Genre::History,
    ];

    /// Wire/storage string (kebab-case, matching the serde representation).
    pub fn as_str(self) -> &'static str {
        match self {
            Genre::Comedy => "comedy",
            Genre::Horror => "horror",
            Genre::Romance => "romance",
            Genre::SciFi => "sci-fi",
            Genre::Fantasy => "fantasy",
            Genre::Mystery => "mystery",
            Genre::Biography => "biography",
            Genre::History => "history",
        }
    }

    /// Parse a storage/wire string. Returns `None` for anything outside the set.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "comedy" => Some(Genre::Comedy),
            "horror" => Some(Genre::Horror),
            "romance" => Some(Genre::Romance),
            "sci-fi" => Some(Genre::SciFi),
            "fantasy" => Some(Genre::Fantasy),
            "mystery" => Some(Genre::Mystery),
            "biography" => Some(Genre::Biography),
            "history" => Some(Genre::History),
            _ => None,
        }
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
