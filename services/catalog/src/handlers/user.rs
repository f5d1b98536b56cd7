use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use axum_extra::extract::cookie::CookieJar;

use crate::cookie::session_token;
use crate::domain::types::User;
use crate::error::CatalogError;
use crate::state::AppState;
use crate::usecase::session::RequireAdminUseCase;
use crate::usecase::user::{
    DeleteUserUseCase, GetUserUseCase, ListActiveUsersUseCase, ListUsersUseCase, UpdateRoleUseCase,
};

/// Wire shape of a user. The local secret is never serialized.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub username: Option<String>,
    pub display_name: String,
    pub role: String,
    #[serde(serialize_with = "bookshelf_core::serde::to_rfc3339_ms_opt")]
    pub last_login_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(serialize_with = "bookshelf_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id.to_string(),
            email: user.email,
            username: user.credential.username().map(str::to_owned),
            display_name: user.credential.display_name().to_owned(),
            role: user.role.as_str().to_owned(),
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

pub(crate) async fn require_admin(
    state: &AppState,
    jar: &CookieJar,
) -> Result<User, CatalogError> {
    RequireAdminUseCase {
        users: state.user_repo(),
        sessions: state.session_store(),
    }
    .execute(session_token(jar))
    .await
}

// ── GET /users ───────────────────────────────────────────────────────────────

pub async fn list_users(
    jar: CookieJar,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, CatalogError> {
    require_admin(&state, &jar).await?;
    let users = ListUsersUseCase {
        users: state.user_repo(),
    }
    .execute()
    .await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// ── GET /users/active ────────────────────────────────────────────────────────

pub async fn list_active_users(
    jar: CookieJar,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, CatalogError> {
    require_admin(&state, &jar).await?;
    let users = ListActiveUsersUseCase {
        users: state.user_repo(),
    }
    .execute()
    .await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    jar: CookieJar,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, CatalogError> {
    require_admin(&state, &jar).await?;
    let user = GetUserUseCase {
        users: state.user_repo(),
    }
    .execute(id)
    .await?;
    Ok(Json(user.into()))
}

// ── PATCH /users/{id}/role ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

pub async fn update_user_role(
    jar: CookieJar,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateRoleRequest>,
) -> Result<Json<UserResponse>, CatalogError> {
    require_admin(&state, &jar).await?;
    let user = UpdateRoleUseCase {
        users: state.user_repo(),
    }
    .execute(id, &body.role)
    .await?;
    Ok(Json(user.into()))
}

// ── DELETE /users/{id} ───────────────────────────────────────────────────────

pub async fn delete_user(
    jar: CookieJar,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, CatalogError> {
    require_admin(&state, &jar).await?;
    DeleteUserUseCase {
        users: state.user_repo(),
    }
    .execute(id)
    .await?;
    Ok(StatusCode::NO_CONTENT)
}
