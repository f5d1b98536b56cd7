use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

use bookshelf_catalog_schema::{books, users};
use bookshelf_domain::genre::Genre;
use bookshelf_domain::user::UserRole;

use crate::domain::repository::{BookRepository, UserRepository};
use crate::domain::types::{Book, BookChanges, Credential, User};
use crate::error::CatalogError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, CatalogError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CatalogError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, CatalogError> {
        let model = users::Entity::find()
            .filter(users::Column::GoogleId.eq(google_id))
            .one(&self.db)
            .await
            .context("find user by google id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, CatalogError> {
        let model = users::Entity::find()
            .filter(
                Condition::any()
                    .add(users::Column::Username.eq(username))
                    .add(users::Column::Email.eq(email)),
            )
            .one(&self.db)
            .await
            .context("find user by username or email")?;
        model.map(user_from_model).transpose()
    }

    async fn insert(&self, user: &User) -> Result<(), CatalogError> {
        users::ActiveModel {
            id: Set(user.id),
            username: Set(user.credential.username().map(str::to_owned)),
            secret: Set(user.credential.secret().map(str::to_owned)),
            google_id: Set(user.credential.google_id().map(str::to_owned)),
            google_name: Set(user
                .credential
                .google_id()
                .map(|_| user.credential.display_name().to_owned())),
            email: Set(user.email.clone()),
            role: Set(user.role.as_str().to_owned()),
            last_login_at: Set(user.last_login_at),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await
        .context("insert user")?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, CatalogError> {
        let models = users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list users")?;
        models.into_iter().map(user_from_model).collect()
    }

    async fn list_active_since(&self, since: DateTime<Utc>) -> Result<Vec<User>, CatalogError> {
        let models = users::Entity::find()
            .filter(users::Column::LastLoginAt.gte(since))
            .order_by_desc(users::Column::LastLoginAt)
            .all(&self.db)
            .await
            .context("list active users")?;
        models.into_iter().map(user_from_model).collect()
    }

    async fn link_google(
        &self,
        id: Uuid,
        google_id: &str,
        google_name: &str,
    ) -> Result<(), CatalogError> {
        users::ActiveModel {
            id: Set(id),
            google_id: Set(Some(google_id.to_owned())),
            google_name: Set(Some(google_name.to_owned())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("link google identity")?;
        Ok(())
    }

    async fn touch_last_login(&self, id: Uuid) -> Result<(), CatalogError> {
        users::ActiveModel {
            id: Set(id),
            last_login_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("touch last login")?;
        Ok(())
    }

    async fn update_role(&self, id: Uuid, role: UserRole) -> Result<Option<User>, CatalogError> {
        let existing = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user for role update")?;
        if existing.is_none() {
            return Ok(None);
        }
        let model = users::ActiveModel {
            id: Set(id),
            role: Set(role.as_str().to_owned()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update user role")?;
        user_from_model(model).map(Some)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CatalogError> {
        let result = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(result.rows_affected > 0)
    }
}

fn user_from_model(model: users::Model) -> Result<User, CatalogError> {
    let users::Model {
        id,
        username,
        secret,
        google_id,
        google_name,
        email,
        role,
        last_login_at,
        created_at,
    } = model;

    let credential = match (username, secret, google_id) {
        (Some(username), Some(secret), Some(google_id)) => {
            let display_name = google_name.unwrap_or_else(|| username.clone());
            Credential::Linked {
                username,
                secret,
                google_id,
                display_name,
            }
        }
        (Some(username), Some(secret), None) => Credential::Local { username, secret },
        (None, None, Some(google_id)) => Credential::External {
            google_id,
            display_name: google_name.unwrap_or_default(),
        },
        _ => {
            return Err(anyhow::anyhow!("user row {id} has no usable credential").into());
        }
    };

    let role = UserRole::from_str(&role)
        .ok_or_else(|| anyhow::anyhow!("user row {id} has unknown role {role:?}"))?;

    Ok(User {
        id,
        credential,
        email,
        role,
        last_login_at,
        created_at,
    })
}

// ── Book repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbBookRepository {
    pub db: DatabaseConnection,
}

impl BookRepository for DbBookRepository {
    async fn list(&self) -> Result<Vec<Book>, CatalogError> {
        let models = books::Entity::find()
            .order_by_desc(books::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list books")?;
        models.into_iter().map(book_from_model).collect()
    }

    async fn list_by_genre(&self, genre: Genre) -> Result<Vec<Book>, CatalogError> {
        let models = books::Entity::find()
            .filter(books::Column::Genre.eq(genre.as_str()))
            .order_by_desc(books::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list books by genre")?;
        models.into_iter().map(book_from_model).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, CatalogError> {
        let model = books::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find book by id")?;
        model.map(book_from_model).transpose()
    }

    async fn insert(&self, book: &Book) -> Result<(), CatalogError> {
        books::ActiveModel {
            id: Set(book.id),
            title: Set(book.title.clone()),
            author: Set(book.author.clone()),
            genre: Set(book.genre.as_str().to_owned()),
            description: Set(book.description.clone()),
            publication_year: Set(book.publication_year),
            cover_image_url: Set(book.cover_image_url.clone()),
            owner_admin_id: Set(book.owner_admin_id),
            created_at: Set(book.created_at),
        }
        .insert(&self.db)
        .await
        .context("insert book")?;
        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &BookChanges,
    ) -> Result<Option<Book>, CatalogError> {
        let existing = books::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find book for update")?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut am = books::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(ref title) = changes.title {
            am.title = Set(title.clone());
        }
        if let Some(ref author) = changes.author {
            am.author = Set(author.clone());
        }
        if let Some(genre) = changes.genre {
            am.genre = Set(genre.as_str().to_owned());
        }
        if let Some(ref description) = changes.description {
            am.description = Set(description.clone());
        }
        if let Some(year) = changes.publication_year {
            am.publication_year = Set(Some(year));
        }
        if let Some(ref cover) = changes.cover_image_url {
            am.cover_image_url = Set(cover.clone());
        }

        let model = am.update(&self.db).await.context("update book")?;
        book_from_model(model).map(Some)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CatalogError> {
        let result = books::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete book")?;
        Ok(result.rows_affected > 0)
    }
}

fn book_from_model(model: books::Model) -> Result<Book, CatalogError> {
    let genre = Genre::from_str(&model.genre).ok_or_else(|| {
        anyhow::anyhow!("book row {} has unknown genre {:?}", model.id, model.genre)
    })?;
    Ok(Book {
        id: model.id,
        title: model.title,
        author: model.author,
        genre,
        description: model.description,
        publication_year: model.publication_year,
        cover_image_url: model.cover_image_url,
        owner_admin_id: model.owner_admin_id,
        created_at: model.created_at,
    })
}
