use chrono::{Duration, Utc};
use uuid::Uuid;

use bookshelf_catalog::error::CatalogError;
use bookshelf_catalog::usecase::user::{
    DeleteUserUseCase, GetUserUseCase, ListActiveUsersUseCase, UpdateRoleUseCase,
};
use bookshelf_domain::user::UserRole;

use crate::helpers::{MockUserRepo, local_user};

#[tokio::test]
async fn should_list_only_recently_active_users() {
    let mut recent = local_user("alice", "alice@example.com", "pw");
    recent.last_login_at = Some(Utc::now() - Duration::minutes(10));

    let mut stale = local_user("bob", "bob@example.com", "pw");
    stale.last_login_at = Some(Utc::now() - Duration::hours(2));

    // Never logged in
    let dormant = local_user("carol", "carol@example.com", "pw");

    let usecase = ListActiveUsersUseCase {
        users: MockUserRepo::new(vec![recent.clone(), stale, dormant]),
    };
    let active = usecase.execute().await.unwrap();

    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, recent.id);
}

#[tokio::test]
async fn should_update_role() {
    let alice = local_user("alice", "alice@example.com", "pw");
    let users = MockUserRepo::new(vec![alice.clone()]);
    let usecase = UpdateRoleUseCase {
        users: users.clone(),
    };

    let updated = usecase.execute(alice.id, "admin").await.unwrap();
    assert_eq!(updated.role, UserRole::Admin);
    assert_eq!(users.get(alice.id).unwrap().role, UserRole::Admin);

    let updated = usecase.execute(alice.id, "user").await.unwrap();
    assert_eq!(updated.role, UserRole::User);
}

#[tokio::test]
async fn should_reject_unknown_role() {
    let alice = local_user("alice", "alice@example.com", "pw");
    let usecase = UpdateRoleUseCase {
        users: MockUserRepo::new(vec![alice.clone()]),
    };
    let err = usecase.execute(alice.id, "superadmin").await.unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRole));
}

#[tokio::test]
async fn should_return_not_found_for_unknown_user() {
    let usecase = UpdateRoleUseCase {
        users: MockUserRepo::empty(),
    };
    let err = usecase.execute(Uuid::now_v7(), "admin").await.unwrap_err();
    assert!(matches!(err, CatalogError::UserNotFound));

    let usecase = GetUserUseCase {
        users: MockUserRepo::empty(),
    };
    let err = usecase.execute(Uuid::now_v7()).await.unwrap_err();
    assert!(matches!(err, CatalogError::UserNotFound));

    let usecase = DeleteUserUseCase {
        users: MockUserRepo::empty(),
    };
    let err = usecase.execute(Uuid::now_v7()).await.unwrap_err();
    assert!(matches!(err, CatalogError::UserNotFound));
}

#[tokio::test]
async fn should_delete_user() {
    let alice = local_user("alice", "alice@example.com", "pw");
    let users = MockUserRepo::new(vec![alice.clone()]);
    let usecase = DeleteUserUseCase {
        users: users.clone(),
    };

    usecase.execute(alice.id).await.unwrap();
    assert_eq!(users.len(), 0);
}
