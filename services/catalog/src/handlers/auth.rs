use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::Redirect,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::cookie::{clear_session_cookie, session_token, set_session_cookie};
use crate::error::CatalogError;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::google::{GoogleLoginInput, GoogleLoginUseCase};
use crate::usecase::login::{LoginInput, LoginUseCase};
use crate::usecase::session::{LogoutUseCase, ResolveSessionUseCase};
use crate::usecase::signup::{SignupInput, SignupUseCase};

// ── POST /auth/signup ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserResponse>), CatalogError> {
    let user = SignupUseCase {
        users: state.user_repo(),
    }
    .execute(SignupInput {
        username: body.username,
        email: body.email,
        secret: body.password,
    })
    .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    jar: CookieJar,
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<UserResponse>), CatalogError> {
    let (user, token) = LoginUseCase {
        users: state.user_repo(),
        sessions: state.session_store(),
    }
    .execute(LoginInput {
        email: body.email,
        secret: body.password,
    })
    .await?;
    let jar = set_session_cookie(jar, token, state.cookie_domain.clone());
    Ok((jar, Json(user.into())))
}

// ── GET /auth/session ────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

/// Whoami. Always 200: an anonymous caller is a valid answer, not an error.
pub async fn get_session(
    jar: CookieJar,
    State(state): State<AppState>,
) -> Result<Json<SessionResponse>, CatalogError> {
    let user = ResolveSessionUseCase {
        users: state.user_repo(),
        sessions: state.session_store(),
    }
    .execute(session_token(&jar))
    .await?;
    Ok(Json(SessionResponse {
        authenticated: user.is_some(),
        user: user.map(UserResponse::from),
    }))
}

// ── DELETE /auth/session ─────────────────────────────────────────────────────

pub async fn logout(
    jar: CookieJar,
    State(state): State<AppState>,
) -> Result<(CookieJar, StatusCode), CatalogError> {
    LogoutUseCase {
        sessions: state.session_store(),
    }
    .execute(session_token(&jar))
    .await?;
    let jar = clear_session_cookie(jar, state.cookie_domain.clone());
    Ok((jar, StatusCode::NO_CONTENT))
}

// ── GET /auth/google ─────────────────────────────────────────────────────────

pub async fn google_authorize(State(state): State<AppState>) -> Redirect {
    Redirect::to(&state.oauth.authorize_url())
}

// ── GET /auth/google/callback ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct GoogleCallbackQuery {
    pub code: Option<String>,
}

/// Finish the Google flow. Failures never surface as API errors here; the
/// browser is mid-redirect, so it is sent back to the login page instead.
pub async fn google_callback(
    jar: CookieJar,
    State(state): State<AppState>,
    Query(query): Query<GoogleCallbackQuery>,
) -> (CookieJar, Redirect) {
    let failure = Redirect::to(&format!("{}/login?error=google_auth_failed", state.frontend_origin));

    let Some(code) = query.code else {
        return (jar, failure);
    };

    let result = GoogleLoginUseCase {
        users: state.user_repo(),
        sessions: state.session_store(),
        oauth: state.oauth.clone(),
    }
    .execute(GoogleLoginInput { code })
    .await;

    match result {
        Ok((_user, token)) => {
            let jar = set_session_cookie(jar, token, state.cookie_domain.clone());
            (
                jar,
                Redirect::to(&format!("{}/dashboard", state.frontend_origin)),
            )
        }
        Err(e) => {
            tracing::warn!(error = %e, "google login failed");
            (jar, failure)
        }
    }
}
