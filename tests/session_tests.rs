//! Unit-of-work semantics: staged visibility, commit, rollback, and
//! constraint failures.

use rosterr::db::{Change, Store, StoreError};
use rosterr::entities::prelude::*;
use rosterr::entities::users;
use rosterr::models::{NewEmail, NewRole, NewUser};
use sea_orm::ColumnTrait;

async fn test_store() -> Store {
    let db_path = std::env::temp_dir().join(format!("rosterr-test-{}.db", uuid::Uuid::new_v4()));
    Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to open store")
}

async fn seed_users(store: &Store) {
    let mut session = store.session().await.expect("failed to open session");
    session.add_user(NewUser::new(
        "Alice",
        Some("Alice Algebra".into()),
        Some("al".into()),
    ));
    session.add_all([
        Change::AddUser(NewUser::new(
            "Bobby",
            Some("Bobby Bongo".into()),
            Some("bob".into()),
        )),
        Change::AddUser(NewUser::new(
            "Calvin",
            Some("Calvin Chemistry".into()),
            Some("cal".into()),
        )),
    ]);
    session.commit().await.expect("failed to seed users");
}

#[tokio::test]
async fn committed_changes_are_visible_to_new_sessions() {
    let store = test_store().await;
    seed_users(&store).await;

    // Committed state is there for store-level reads...
    let users = store.list_users().await.unwrap();
    assert_eq!(
        users.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(),
        vec!["Alice", "Bobby", "Calvin"]
    );

    // ...and for a fresh session.
    let mut session = store.session().await.unwrap();
    let rows = session.query::<Users>().await.unwrap();
    assert_eq!(rows.len(), 3);
    session.rollback().await.unwrap();
}

#[tokio::test]
async fn staged_changes_are_visible_inside_the_session_only() {
    let store = test_store().await;
    seed_users(&store).await;

    let mut session = store.session().await.unwrap();
    session.add_user(NewUser::new("Deakin", Some("Deakin Drama".into()), None));

    // The session sees its own staged insert.
    let rows = session.query::<Users>().await.unwrap();
    assert_eq!(rows.len(), 4);

    // Outside the session only committed state is visible.
    assert_eq!(store.list_users().await.unwrap().len(), 3);

    session.commit().await.unwrap();
    assert_eq!(store.list_users().await.unwrap().len(), 4);
}

#[tokio::test]
async fn query_by_id_returns_exactly_one_user() {
    let store = test_store().await;
    seed_users(&store).await;

    let mut session = store.session().await.unwrap();
    let rows = session
        .query_where::<Users, _>(users::Column::Id.eq(2))
        .await
        .unwrap();
    session.rollback().await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Bobby");
    assert_eq!(rows[0].fullname.as_deref(), Some("Bobby Bongo"));
}

#[tokio::test]
async fn deleted_rows_disappear_after_commit() {
    let store = test_store().await;
    seed_users(&store).await;

    let calvin = &store.find_users_by_name("Calvin").await.unwrap()[0];

    let mut session = store.session().await.unwrap();
    session.delete_user(calvin.id);
    session.commit().await.unwrap();

    let users = store.list_users().await.unwrap();
    assert_eq!(
        users.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(),
        vec!["Alice", "Bobby"]
    );
}

#[tokio::test]
async fn rollback_restores_pre_staging_state() {
    let store = test_store().await;
    seed_users(&store).await;
    let before = store.list_users().await.unwrap();

    let mut session = store.session().await.unwrap();
    session.delete_user(3);
    session.add_user(NewUser::new("Deakin", Some("Deakin Drama".into()), None));

    // Both staged changes apply inside the session.
    let rows = session.query::<Users>().await.unwrap();
    let names: Vec<_> = rows.iter().map(|u| u.name.as_str()).collect();
    assert!(names.contains(&"Deakin"));
    assert!(!names.contains(&"Calvin"));

    session.rollback().await.unwrap();

    let after = store.list_users().await.unwrap();
    assert_eq!(after, before);
}

#[tokio::test]
async fn dropping_a_session_discards_staged_changes() {
    let store = test_store().await;
    seed_users(&store).await;

    {
        let mut session = store.session().await.unwrap();
        session.add_user(NewUser::new("Deakin", None, None));
        session.flush().await.unwrap();
    }

    assert_eq!(store.list_users().await.unwrap().len(), 3);
}

#[tokio::test]
async fn email_with_unknown_owner_fails_the_unit_of_work() {
    let store = test_store().await;
    seed_users(&store).await;

    let mut session = store.session().await.unwrap();
    session.add_email(999, NewEmail::parse("ghost@nowhere.org").unwrap());

    let err = session.commit().await.unwrap_err();
    assert!(matches!(err, StoreError::ForeignKeyViolation(_)));

    // Nothing leaked into the committed state.
    assert!(store.list_emails().await.unwrap().is_empty());
}

#[tokio::test]
async fn batch_with_one_bad_row_commits_nothing() {
    let store = test_store().await;
    seed_users(&store).await;

    let mut session = store.session().await.unwrap();
    session.add_email(1, NewEmail::parse("alice@yahoo.com").unwrap());
    session.add_email(999, NewEmail::parse("ghost@nowhere.org").unwrap());

    assert!(session.commit().await.is_err());

    // The valid staged email must not survive its failed batch.
    assert!(store.list_emails().await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_role_name_fails_the_unit_of_work() {
    let store = test_store().await;
    store
        .create_role(NewRole::new("student", 0, None))
        .await
        .unwrap();

    let mut session = store.session().await.unwrap();
    session.add_role(NewRole::new("student", 1, None));

    let err = session.commit().await.unwrap_err();
    assert!(matches!(err, StoreError::UniqueViolation(_)));

    let role = store.get_role("student").await.unwrap().unwrap();
    assert_eq!(role.access_lvl, 0);
}

#[tokio::test]
async fn duplicate_assignment_fails_the_unit_of_work() {
    let store = test_store().await;
    seed_users(&store).await;
    store
        .create_role(NewRole::new("student", 0, None))
        .await
        .unwrap();
    store.assign_role(1, "student").await.unwrap();

    let mut session = store.session().await.unwrap();
    session.assign_role(1, "student");

    let err = session.commit().await.unwrap_err();
    assert!(matches!(err, StoreError::UniqueViolation(_)));
    assert_eq!(store.list_assignments().await.unwrap().len(), 1);
}

#[tokio::test]
async fn one_session_builds_the_whole_scenario_atomically() {
    let store = test_store().await;
    seed_users(&store).await;

    let mut session = store.session().await.unwrap();
    session.add_role(NewRole::new("student", 0, None));
    session.add_role(NewRole::new("ta", 1, Some("teaching assistant".into())));
    session.add_email(1, NewEmail::parse("alice@yahoo.com").unwrap());
    session.assign_role(1, "student");
    session.assign_role(1, "ta");
    session.assign_role(2, "student");
    session.commit().await.unwrap();

    let alice_roles = store.roles_for_user(1).await.unwrap();
    assert_eq!(
        alice_roles
            .iter()
            .map(|r| r.name.as_str())
            .collect::<Vec<_>>(),
        vec!["student", "ta"]
    );

    let students = store.members_of("student").await.unwrap();
    assert_eq!(students.len(), 2);

    assert_eq!(store.emails_for_user(1).await.unwrap().len(), 1);
}
