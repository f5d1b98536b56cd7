use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bookshelf_domain::genre::Genre;

use crate::domain::types::Book;
use crate::error::CatalogError;
use crate::state::AppState;
use crate::usecase::book::{
    CreateBookInput, CreateBookUseCase, DeleteBookUseCase, GetBookUseCase, ListBooksUseCase,
    SearchBooksUseCase, UpdateBookInput, UpdateBookUseCase,
};

#[derive(Serialize)]
pub struct BookResponse {
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub description: String,
    pub publication_year: Option<i32>,
    pub cover_image_url: String,
    pub created_by: Option<String>,
    #[serde(serialize_with = "bookshelf_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        BookResponse {
            id: book.id.to_string(),
            title: book.title,
            author: book.author,
            genre: book.genre.as_str().to_owned(),
            description: book.description,
            publication_year: book.publication_year,
            cover_image_url: book.cover_image_url,
            created_by: book.owner_admin_id.map(|id| id.to_string()),
            created_at: book.created_at,
        }
    }
}

fn parse_genre(raw: Option<String>) -> Result<Option<Genre>, CatalogError> {
    raw.map(|g| Genre::from_str(&g).ok_or(CatalogError::InvalidGenre))
        .transpose()
}

// ── GET /genres ──────────────────────────────────────────────────────────────

pub async fn list_genres() -> Json<Vec<&'static str>> {
    Json(Genre::ALL.iter().map(|g| g.as_str()).collect())
}

// ── GET /books ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ListBooksQuery {
    pub genre: Option<String>,
}

pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<ListBooksQuery>,
) -> Result<Json<Vec<BookResponse>>, CatalogError> {
    let genre = parse_genre(query.genre)?;
    let books = ListBooksUseCase {
        books: state.book_repo(),
    }
    .execute(genre)
    .await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

// ── GET /books/search ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SearchBooksQuery {
    pub q: Option<String>,
    pub genre: Option<String>,
}

#[derive(Serialize)]
pub struct SearchBooksResponse {
    /// Number of books that matched the query at all.
    pub total: usize,
    /// Full listing, best match first.
    pub books: Vec<BookResponse>,
}

pub async fn search_books(
    State(state): State<AppState>,
    Query(query): Query<SearchBooksQuery>,
) -> Result<Json<SearchBooksResponse>, CatalogError> {
    let genre = parse_genre(query.genre)?;
    let (books, total) = SearchBooksUseCase {
        books: state.book_repo(),
    }
    .execute(query.q, genre)
    .await?;
    Ok(Json(SearchBooksResponse {
        total,
        books: books.into_iter().map(BookResponse::from).collect(),
    }))
}

// ── GET /books/{id} ──────────────────────────────────────────────────────────

pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookResponse>, CatalogError> {
    let book = GetBookUseCase {
        books: state.book_repo(),
    }
    .execute(id)
    .await?;
    Ok(Json(book.into()))
}

// ── POST /books ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub description: String,
    pub publication_year: Option<i32>,
    pub cover_image_url: Option<String>,
}

pub async fn create_book(
    jar: CookieJar,
    State(state): State<AppState>,
    Json(body): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), CatalogError> {
    let admin = super::user::require_admin(&state, &jar).await?;
    let book = CreateBookUseCase {
        books: state.book_repo(),
    }
    .execute(
        admin.id,
        CreateBookInput {
            title: body.title,
            author: body.author,
            genre: body.genre,
            description: body.description,
            publication_year: body.publication_year,
            cover_image_url: body.cover_image_url,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(book.into())))
}

// ── PATCH /books/{id} ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub publication_year: Option<i32>,
    pub cover_image_url: Option<String>,
}

pub async fn update_book(
    jar: CookieJar,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateBookRequest>,
) -> Result<Json<BookResponse>, CatalogError> {
    super::user::require_admin(&state, &jar).await?;
    let book = UpdateBookUseCase {
        books: state.book_repo(),
    }
    .execute(
        id,
        UpdateBookInput {
            title: body.title,
            author: body.author,
            genre: body.genre,
            description: body.description,
            publication_year: body.publication_year,
            cover_image_url: body.cover_image_url,
        },
    )
    .await?;
    Ok(Json(book.into()))
}

// ── DELETE /books/{id} ───────────────────────────────────────────────────────

pub async fn delete_book(
    jar: CookieJar,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, CatalogError> {
    super::user::require_admin(&state, &jar).await?;
    DeleteBookUseCase {
        books: state.book_repo(),
    }
    .execute(id)
    .await?;
    Ok(StatusCode::NO_CONTENT)
}
