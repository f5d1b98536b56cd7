use chrono::Utc;
use uuid::Uuid;

use bookshelf_domain::genre::Genre;
use bookshelf_domain::search::{match_count, rank};

use crate::domain::repository::BookRepository;
use crate::domain::types::{Book, BookChanges, PLACEHOLDER_COVER_URL, valid_publication_year};
use crate::error::CatalogError;

pub struct ListBooksUseCase<B>
where
    B: BookRepository,
{
    pub books: B,
}

impl<B> ListBooksUseCase<B>
where
    B: BookRepository,
{
    pub async fn execute(&self, genre: Option<Genre>) -> Result<Vec<Book>, CatalogError> {
        match genre {
            Some(genre) => self.books.list_by_genre(genre).await,
            None => self.books.list().await,
        }
    }
}

pub struct GetBookUseCase<B>
where
    B: BookRepository,
{
    pub books: B,
}

impl<B> GetBookUseCase<B>
where
    B: BookRepository,
{
    pub async fn execute(&self, id: Uuid) -> Result<Book, CatalogError> {
        self.books
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::BookNotFound)
    }
}

/// Ranked search over the catalog.
pub struct SearchBooksUseCase<B>
where
    B: BookRepository,
{
    pub books: B,
}

impl<B> SearchBooksUseCase<B>
where
    B: BookRepository,
{
    /// Returns the ranked listing plus the number of books that matched at
    /// all. With zero matches the listing keeps its stored order.
    pub async fn execute(
        &self,
        query: Option<String>,
        genre: Option<Genre>,
    ) -> Result<(Vec<Book>, usize), CatalogError> {
        let pool = match genre {
            Some(genre) => self.books.list_by_genre(genre).await?,
            None => self.books.list().await?,
        };
        let query = query.unwrap_or_default();
        let total = match_count(&pool, &query);
        Ok((rank(&pool, &query), total))
    }
}

pub struct CreateBookInput {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub description: String,
    pub publication_year: Option<i32>,
    pub cover_image_url: Option<String>,
}

pub struct CreateBookUseCase<B>
where
    B: BookRepository,
{
    pub books: B,
}

impl<B> CreateBookUseCase<B>
where
    B: BookRepository,
{
    pub async fn execute(
        &self,
        admin_id: Uuid,
        input: CreateBookInput,
    ) -> Result<Book, CatalogError> {
        // 1. Required fields
        let title = input.title.trim();
        let author = input.author.trim();
        let description = input.description.trim();
        if title.is_empty() || author.is_empty() || description.is_empty() {
            return Err(CatalogError::MissingData);
        }

        // 2. Genre must be one of the known set
        let genre = Genre::from_str(input.genre.trim()).ok_or(CatalogError::InvalidGenre)?;

        // 3. Year bounds
        if let Some(year) = input.publication_year {
            if !valid_publication_year(year) {
                return Err(CatalogError::InvalidYear);
            }
        }

        // 4. Default cover
        let cover_image_url = input
            .cover_image_url
            .map(|u| u.trim().to_owned())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_COVER_URL.to_owned());

        let book = Book {
            id: Uuid::now_v7(),
            title: title.to_owned(),
            author: author.to_owned(),
            genre,
            description: description.to_owned(),
            publication_year: input.publication_year,
            cover_image_url,
            owner_admin_id: Some(admin_id),
            created_at: Utc::now(),
        };
        self.books.insert(&book).await?;
        Ok(book)
    }
}

#[derive(Default)]
pub struct UpdateBookInput {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub publication_year: Option<i32>,
    pub cover_image_url: Option<String>,
}

pub struct UpdateBookUseCase<B>
where
    B: BookRepository,
{
    pub books: B,
}

impl<B> UpdateBookUseCase<B>
where
    B: BookRepository,
{
    pub async fn execute(&self, id: Uuid, input: UpdateBookInput) -> Result<Book, CatalogError> {
        // Provided fields must still be usable values
        let mut changes = BookChanges::default();
        if let Some(title) = input.title {
            let title = title.trim().to_owned();
            if title.is_empty() {
                return Err(CatalogError::MissingData);
            }
            changes.title = Some(title);
        }
        if let Some(author) = input.author {
            let author = author.trim().to_owned();
            if author.is_empty() {
                return Err(CatalogError::MissingData);
            }
            changes.author = Some(author);
        }
        if let Some(genre) = input.genre {
            changes.genre = Some(Genre::from_str(genre.trim()).ok_or(CatalogError::InvalidGenre)?);
        }
        if let Some(description) = input.description {
            let description = description.trim().to_owned();
            if description.is_empty() {
                return Err(CatalogError::MissingData);
            }
            changes.description = Some(description);
        }
        if let Some(year) = input.publication_year {
            if !valid_publication_year(year) {
                return Err(CatalogError::InvalidYear);
            }
            changes.publication_year = Some(year);
        }
        if let Some(cover) = input.cover_image_url {
            let cover = cover.trim().to_owned();
            if cover.is_empty() {
                return Err(CatalogError::MissingData);
            }
            changes.cover_image_url = Some(cover);
        }

        if changes.is_empty() {
            return Err(CatalogError::MissingData);
        }

        self.books
            .update(id, &changes)
            .await?
            .ok_or(CatalogError::BookNotFound)
    }
}

pub struct DeleteBookUseCase<B>
where
    B: BookRepository,
{
    pub books: B,
}

impl<B> DeleteBookUseCase<B>
where
    B: BookRepository,
{
    pub async fn execute(&self, id: Uuid) -> Result<(), CatalogError> {
        if !self.books.delete(id).await? {
            return Err(CatalogError::BookNotFound);
        }
        Ok(())
    }
}
