use bookshelf_catalog::domain::types::{Credential, GoogleProfile};
use bookshelf_catalog::error::CatalogError;
use bookshelf_catalog::usecase::google::{GoogleLoginInput, GoogleLoginUseCase};
use bookshelf_catalog::usecase::login::{LoginInput, LoginUseCase};
use bookshelf_catalog::usecase::session::{
    LogoutUseCase, RequireAdminUseCase, ResolveSessionUseCase, SESSION_TOKEN_LEN,
};
use bookshelf_catalog::usecase::signup::{SignupInput, SignupUseCase};
use bookshelf_domain::user::UserRole;

use crate::helpers::{
    MockGoogleOAuth, MockSessionStore, MockUserRepo, admin_user, google_user, local_user,
};

// ── Signup ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_sign_up_new_user_as_plain_user() {
    let users = MockUserRepo::empty();
    let usecase = SignupUseCase {
        users: users.clone(),
    };

    let user = usecase
        .execute(SignupInput {
            username: "alice".into(),
            email: "Alice@Example.COM".into(),
            secret: "hunter2".into(),
        })
        .await
        .unwrap();

    assert_eq!(user.role, UserRole::User);
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.credential.username(), Some("alice"));
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn should_reject_signup_with_blank_fields() {
    let usecase = SignupUseCase {
        users: MockUserRepo::empty(),
    };
    let err = usecase
        .execute(SignupInput {
            username: "   ".into(),
            email: "a@example.com".into(),
            secret: "pw".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::MissingData));
}

#[tokio::test]
async fn should_reject_signup_when_username_or_email_taken() {
    let existing = local_user("alice", "alice@example.com", "pw");
    let usecase = SignupUseCase {
        users: MockUserRepo::new(vec![existing]),
    };

    // Same username, different email
    let err = usecase
        .execute(SignupInput {
            username: "alice".into(),
            email: "other@example.com".into(),
            secret: "pw".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::UserAlreadyExists));

    // Same email, different username
    let err = usecase
        .execute(SignupInput {
            username: "bob".into(),
            email: "alice@example.com".into(),
            secret: "pw".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::UserAlreadyExists));
}

// ── Password login ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_log_in_and_open_session() {
    let users = MockUserRepo::new(vec![local_user("alice", "alice@example.com", "hunter2")]);
    let sessions = MockSessionStore::empty();
    let usecase = LoginUseCase {
        users: users.clone(),
        sessions: sessions.clone(),
    };

    let (user, token) = usecase
        .execute(LoginInput {
            email: "alice@example.com".into(),
            secret: "hunter2".into(),
        })
        .await
        .unwrap();

    assert_eq!(token.len(), SESSION_TOKEN_LEN);
    assert_eq!(sessions.len(), 1);
    assert!(user.last_login_at.is_some());
    assert!(users.get(user.id).unwrap().last_login_at.is_some());
}

#[tokio::test]
async fn should_reject_unknown_email_with_generic_error() {
    let usecase = LoginUseCase {
        users: MockUserRepo::empty(),
        sessions: MockSessionStore::empty(),
    };
    let err = usecase
        .execute(LoginInput {
            email: "nobody@example.com".into(),
            secret: "pw".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidCredentials));
}

#[tokio::test]
async fn should_reject_wrong_password_with_generic_error() {
    let usecase = LoginUseCase {
        users: MockUserRepo::new(vec![local_user("alice", "alice@example.com", "hunter2")]),
        sessions: MockSessionStore::empty(),
    };
    let err = usecase
        .execute(LoginInput {
            email: "alice@example.com".into(),
            secret: "wrong".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidCredentials));
}

#[tokio::test]
async fn should_compare_password_bytes_exactly() {
    let usecase = LoginUseCase {
        users: MockUserRepo::new(vec![local_user("alice", "alice@example.com", "Secret")]),
        sessions: MockSessionStore::empty(),
    };
    // Case differs, no match
    let err = usecase
        .execute(LoginInput {
            email: "alice@example.com".into(),
            secret: "secret".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidCredentials));
}

#[tokio::test]
async fn should_reject_password_login_for_google_only_account() {
    let usecase = LoginUseCase {
        users: MockUserRepo::new(vec![google_user("g1", "Alice G", "alice@example.com")]),
        sessions: MockSessionStore::empty(),
    };
    let err = usecase
        .execute(LoginInput {
            email: "alice@example.com".into(),
            secret: "anything".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidCredentials));
}

// ── Session resolution ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_resolve_session_to_user() {
    let alice = local_user("alice", "alice@example.com", "pw");
    let usecase = ResolveSessionUseCase {
        users: MockUserRepo::new(vec![alice.clone()]),
        sessions: MockSessionStore::with_session("TOK", alice.id),
    };
    let resolved = usecase.execute(Some("TOK".into())).await.unwrap();
    assert_eq!(resolved.unwrap().id, alice.id);
}

#[tokio::test]
async fn should_resolve_missing_or_unknown_token_to_anonymous() {
    let usecase = ResolveSessionUseCase {
        users: MockUserRepo::empty(),
        sessions: MockSessionStore::empty(),
    };
    assert!(usecase.execute(None).await.unwrap().is_none());
    assert!(usecase.execute(Some("BOGUS".into())).await.unwrap().is_none());
}

#[tokio::test]
async fn should_resolve_session_of_deleted_user_to_anonymous() {
    let alice = local_user("alice", "alice@example.com", "pw");
    // Session survives in the store, the account does not
    let usecase = ResolveSessionUseCase {
        users: MockUserRepo::empty(),
        sessions: MockSessionStore::with_session("TOK", alice.id),
    };
    assert!(usecase.execute(Some("TOK".into())).await.unwrap().is_none());
}

#[tokio::test]
async fn should_log_out_idempotently() {
    let alice = local_user("alice", "alice@example.com", "pw");
    let sessions = MockSessionStore::with_session("TOK", alice.id);
    let usecase = LogoutUseCase {
        sessions: sessions.clone(),
    };

    usecase.execute(Some("TOK".into())).await.unwrap();
    assert_eq!(sessions.len(), 0);

    // Again, and without any token at all
    usecase.execute(Some("TOK".into())).await.unwrap();
    usecase.execute(None).await.unwrap();
}

// ── Admin gate ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_anonymous_caller_at_admin_gate() {
    let usecase = RequireAdminUseCase {
        users: MockUserRepo::empty(),
        sessions: MockSessionStore::empty(),
    };
    let err = usecase.execute(None).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotAuthenticated));

    let err = usecase.execute(Some("BOGUS".into())).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotAuthenticated));
}

#[tokio::test]
async fn should_reject_non_admin_at_admin_gate() {
    let alice = local_user("alice", "alice@example.com", "pw");
    let usecase = RequireAdminUseCase {
        users: MockUserRepo::new(vec![alice.clone()]),
        sessions: MockSessionStore::with_session("TOK", alice.id),
    };
    let err = usecase.execute(Some("TOK".into())).await.unwrap_err();
    assert!(matches!(err, CatalogError::Forbidden));
}

#[tokio::test]
async fn should_pass_admin_through_admin_gate() {
    let root = admin_user("root", "root@example.com", "pw");
    let usecase = RequireAdminUseCase {
        users: MockUserRepo::new(vec![root.clone()]),
        sessions: MockSessionStore::with_session("TOK", root.id),
    };
    let user = usecase.execute(Some("TOK".into())).await.unwrap();
    assert_eq!(user.id, root.id);
}

// ── Google login ─────────────────────────────────────────────────────────────

fn profile(id: &str, name: &str, emails: &[&str]) -> GoogleProfile {
    GoogleProfile {
        id: id.to_owned(),
        display_name: name.to_owned(),
        emails: emails.iter().map(|e| e.to_string()).collect(),
    }
}

#[tokio::test]
async fn should_reuse_account_matched_by_google_id() {
    let existing = google_user("g1", "Alice G", "alice@example.com");
    let users = MockUserRepo::new(vec![existing.clone()]);
    let usecase = GoogleLoginUseCase {
        users: users.clone(),
        sessions: MockSessionStore::empty(),
        oauth: MockGoogleOAuth::returning(profile("g1", "Alice G", &["alice@example.com"])),
    };

    let (user, _token) = usecase
        .execute(GoogleLoginInput { code: "c".into() })
        .await
        .unwrap();

    assert_eq!(user.id, existing.id);
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn should_link_google_identity_to_existing_local_account() {
    let existing = local_user("alice", "alice@example.com", "hunter2");
    let users = MockUserRepo::new(vec![existing.clone()]);
    let usecase = GoogleLoginUseCase {
        users: users.clone(),
        sessions: MockSessionStore::empty(),
        oauth: MockGoogleOAuth::returning(profile("g1", "Alice G", &["Alice@Example.com"])),
    };

    let (user, _token) = usecase
        .execute(GoogleLoginInput { code: "c".into() })
        .await
        .unwrap();

    assert_eq!(user.id, existing.id);
    assert_eq!(users.len(), 1);

    // The local secret survives linking
    let stored = users.get(existing.id).unwrap();
    assert_eq!(stored.credential.google_id(), Some("g1"));
    assert_eq!(stored.credential.secret(), Some("hunter2"));
    assert!(matches!(stored.credential, Credential::Linked { .. }));

    // A second Google login now resolves by identity, still one account
    let (again, _token) = usecase
        .execute(GoogleLoginInput { code: "c".into() })
        .await
        .unwrap();
    assert_eq!(again.id, existing.id);
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn should_provision_account_from_first_google_login() {
    let users = MockUserRepo::empty();
    let sessions = MockSessionStore::empty();
    let usecase = GoogleLoginUseCase {
        users: users.clone(),
        sessions: sessions.clone(),
        oauth: MockGoogleOAuth::returning(profile("g9", "New User", &["new@example.com"])),
    };

    let (user, token) = usecase
        .execute(GoogleLoginInput { code: "c".into() })
        .await
        .unwrap();

    assert_eq!(user.role, UserRole::User);
    assert_eq!(user.email, "new@example.com");
    assert_eq!(user.credential.google_id(), Some("g9"));
    assert_eq!(user.credential.username(), None);
    assert_eq!(users.len(), 1);
    assert_eq!(token.len(), SESSION_TOKEN_LEN);
    assert_eq!(sessions.len(), 1);
}

#[tokio::test]
async fn should_fail_google_login_without_email() {
    let usecase = GoogleLoginUseCase {
        users: MockUserRepo::empty(),
        sessions: MockSessionStore::empty(),
        oauth: MockGoogleOAuth::returning(profile("g9", "No Email", &[])),
    };
    let err = usecase
        .execute(GoogleLoginInput { code: "c".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Internal(_)));
}

#[tokio::test]
async fn should_fail_google_login_when_exchange_fails() {
    let usecase = GoogleLoginUseCase {
        users: MockUserRepo::empty(),
        sessions: MockSessionStore::empty(),
        oauth: MockGoogleOAuth::failing(),
    };
    let err = usecase
        .execute(GoogleLoginInput { code: "c".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Internal(_)));
}
