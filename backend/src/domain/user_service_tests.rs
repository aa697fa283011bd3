//! Tests for the user service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockUserRepository;
use crate::domain::{UserChanges, UserLookup, UserName};

fn name(raw: &str) -> UserName {
    UserName::new(raw).expect("valid name")
}

#[fixture]
fn alice() -> User {
    User::new(UserId::new(1), name("Alice"), 27, None)
}

fn make_service(repo: MockUserRepository) -> UserService<MockUserRepository> {
    UserService::new(Arc::new(repo))
}

#[rstest]
#[case(0)]
#[case(10)]
#[case(13)]
#[tokio::test]
async fn create_rejects_ages_below_minimum(#[case] age: u32) {
    let mut repo = MockUserRepository::new();
    repo.expect_create().never();

    let service = make_service(repo);
    let err = service
        .create_user(NewUser::new(name("Bob"), age))
        .await
        .expect_err("age rejected");

    assert_eq!(err, UserError::InvalidAge { age: age.into() });
}

#[rstest]
#[tokio::test]
async fn create_accepts_the_boundary_age() {
    let mut repo = MockUserRepository::new();
    repo.expect_create()
        .times(1)
        .returning(|user| Ok(user.clone().into_user(UserId::new(3))));

    let service = make_service(repo);
    let created = service
        .create_user(NewUser::new(name("Bob"), MIN_AGE))
        .await
        .expect("created");

    assert_eq!(created.id(), UserId::new(3));
    assert_eq!(created.age(), MIN_AGE);
}

#[rstest]
#[tokio::test]
async fn get_lifts_repository_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .with(eq(UserId::new(9)))
        .times(1)
        .returning(|id| Err(UserRepositoryError::not_found(id)));

    let err = make_service(repo)
        .get_user(UserId::new(9))
        .await
        .expect_err("missing");

    assert_eq!(
        err,
        UserError::NotFound {
            lookup: UserLookup::Id(UserId::new(9))
        }
    );
}

#[rstest]
#[tokio::test]
async fn get_by_name_passes_other_failures_through() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_name()
        .times(1)
        .returning(|_| Err(UserRepositoryError::connection("refused")));

    let err = make_service(repo)
        .get_user_by_name("Alice")
        .await
        .expect_err("unavailable");

    assert_eq!(
        err,
        UserError::Persistence(UserRepositoryError::connection("refused"))
    );
}

#[rstest]
#[tokio::test]
async fn update_with_only_age_keeps_name(alice: User) {
    let mut repo = MockUserRepository::new();
    let current = alice.clone();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(current));
    repo.expect_update()
        .withf(|id, changes| {
            *id == UserId::new(1) && changes.name.as_ref() == "Alice" && changes.age == 30
        })
        .times(1)
        .returning(|id, changes: &UserChanges| {
            Ok(User::new(id, changes.name.clone(), changes.age, None))
        });

    let patch = UserPatch {
        name: None,
        age: Some(30),
    };
    let updated = make_service(repo)
        .update_user(UserId::new(1), patch)
        .await
        .expect("updated");

    assert_eq!(updated.name().as_ref(), "Alice");
    assert_eq!(updated.age(), 30);
}

#[rstest]
#[tokio::test]
async fn empty_update_skips_the_write(alice: User) {
    let mut repo = MockUserRepository::new();
    let current = alice.clone();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(current));
    repo.expect_update().never();

    let unchanged = make_service(repo)
        .update_user(UserId::new(1), UserPatch::default())
        .await
        .expect("no-op update");

    assert_eq!(unchanged, alice);
}

#[rstest]
#[tokio::test]
async fn update_with_young_age_keeps_stored_record(alice: User) {
    let mut repo = MockUserRepository::new();
    let current = alice.clone();
    repo.expect_find_by_id()
        .with(eq(UserId::new(1)))
        .times(1)
        .return_once(move |_| Ok(current));
    repo.expect_update().never();

    let patch = UserPatch {
        name: None,
        age: Some(12),
    };
    let unchanged = make_service(repo)
        .update_user(UserId::new(1), patch)
        .await
        .expect("young age is ignored");

    assert_eq!(unchanged, alice);
}

#[rstest]
#[tokio::test]
async fn update_with_young_age_still_applies_name(alice: User) {
    let mut repo = MockUserRepository::new();
    let current = alice.clone();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(current));
    repo.expect_update()
        .withf(|id, changes| {
            *id == UserId::new(1) && changes.name.as_ref() == "Alicia" && changes.age == 27
        })
        .times(1)
        .returning(|id, changes: &UserChanges| {
            Ok(User::new(id, changes.name.clone(), changes.age, None))
        });

    let patch = UserPatch {
        name: Some(name("Alicia")),
        age: Some(9),
    };
    let updated = make_service(repo)
        .update_user(UserId::new(1), patch)
        .await
        .expect("name applied");

    assert_eq!(updated.age(), 27);
}

#[rstest]
#[tokio::test]
async fn update_of_missing_user_with_young_age_reports_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .returning(|id| Err(UserRepositoryError::not_found(id)));
    repo.expect_update().never();

    let patch = UserPatch {
        name: None,
        age: Some(10),
    };
    let err = make_service(repo)
        .update_user(UserId::new(99), patch)
        .await
        .expect_err("missing");

    assert!(matches!(err, UserError::NotFound { .. }));
}

#[rstest]
#[tokio::test]
async fn update_of_missing_user_reports_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .returning(|id| Err(UserRepositoryError::not_found(id)));

    let patch = UserPatch {
        name: Some(name("Zed")),
        age: None,
    };
    let err = make_service(repo)
        .update_user(UserId::new(5), patch)
        .await
        .expect_err("missing");

    assert!(matches!(err, UserError::NotFound { .. }));
}

#[rstest]
#[tokio::test]
async fn delete_delegates_to_repository() {
    let mut repo = MockUserRepository::new();
    repo.expect_delete()
        .with(eq(UserId::new(4)))
        .times(1)
        .returning(|_| Ok(()));

    make_service(repo)
        .delete_user(UserId::new(4))
        .await
        .expect("deleted");
}

#[rstest]
#[tokio::test]
async fn list_passes_records_through(alice: User) {
    let mut repo = MockUserRepository::new();
    let users = vec![alice.clone()];
    repo.expect_list().times(1).return_once(move || Ok(users));

    let listed = make_service(repo).list_users().await.expect("listed");

    assert_eq!(listed, vec![alice]);
}
