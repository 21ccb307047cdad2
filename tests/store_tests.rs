//! Store-level CRUD and relationship coverage.

use rosterr::db::Store;
use rosterr::models::{NewEmail, NewRole, NewUser};

async fn test_store() -> Store {
    let db_path = std::env::temp_dir().join(format!("rosterr-test-{}.db", uuid::Uuid::new_v4()));
    Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to open store")
}

fn sample_users() -> Vec<NewUser> {
    vec![
        NewUser::new("Alice", Some("Alice Algebra".into()), Some("al".into())),
        NewUser::new("Bobby", Some("Bobby Bongo".into()), Some("bob".into())),
        NewUser::new("Calvin", Some("Calvin Chemistry".into()), Some("cal".into())),
    ]
}

#[tokio::test]
async fn create_and_get_user() {
    let store = test_store().await;

    let created = store
        .create_user(NewUser::new("Alice", Some("Alice Algebra".into()), None))
        .await
        .unwrap();

    assert_eq!(created.name, "Alice");
    assert_eq!(created.fullname.as_deref(), Some("Alice Algebra"));

    let fetched = store.get_user(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn surrogate_ids_are_assigned_in_insert_order() {
    let store = test_store().await;

    for user in sample_users() {
        store.create_user(user).await.unwrap();
    }

    let bobby = store.get_user(2).await.unwrap().unwrap();
    assert_eq!(bobby.name, "Bobby");
    assert_eq!(bobby.nickname.as_deref(), Some("bob"));

    let users = store.list_users().await.unwrap();
    assert_eq!(users.len(), 3);
    assert_eq!(
        users.iter().map(|u| u.id).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[tokio::test]
async fn find_users_by_name_misses_yield_empty() {
    let store = test_store().await;
    store
        .create_user(NewUser::new("Alice", None, None))
        .await
        .unwrap();

    let hits = store.find_users_by_name("Alice").await.unwrap();
    assert_eq!(hits.len(), 1);

    let misses = store.find_users_by_name("Nobody").await.unwrap();
    assert!(misses.is_empty());
}

#[tokio::test]
async fn remove_user_reports_whether_row_existed() {
    let store = test_store().await;
    let user = store
        .create_user(NewUser::new("Alice", None, None))
        .await
        .unwrap();

    assert!(store.remove_user(user.id).await.unwrap());
    assert!(!store.remove_user(user.id).await.unwrap());
    assert!(store.get_user(user.id).await.unwrap().is_none());
}

#[tokio::test]
async fn emails_belong_to_users() {
    let store = test_store().await;
    let alice = store
        .create_user(NewUser::new("Alice", None, None))
        .await
        .unwrap();
    let bobby = store
        .create_user(NewUser::new("Bobby", None, None))
        .await
        .unwrap();

    store
        .add_email(alice.id, NewEmail::parse("alice@yahoo.com").unwrap())
        .await
        .unwrap();
    store
        .add_email(alice.id, NewEmail::parse("alice@gmail.com").unwrap())
        .await
        .unwrap();
    store
        .add_email(bobby.id, NewEmail::parse("bob@hcmiu.edu.vn").unwrap())
        .await
        .unwrap();

    let alice_emails = store.emails_for_user(alice.id).await.unwrap();
    assert_eq!(alice_emails.len(), 2);
    assert_eq!(alice_emails[0].address(), "alice@yahoo.com");

    let fetched = store.get_email(alice_emails[0].id).await.unwrap().unwrap();
    assert_eq!(fetched, alice_emails[0]);

    let listing = store.users_with_emails().await.unwrap();
    assert_eq!(listing.len(), 2);
    assert_eq!(listing[0].1.len(), 2);
    assert_eq!(listing[1].1.len(), 1);
    assert_eq!(listing[1].1[0].address(), "bob@hcmiu.edu.vn");
}

#[tokio::test]
async fn roles_are_shared_across_users() {
    let store = test_store().await;
    for user in sample_users() {
        store.create_user(user).await.unwrap();
    }

    store
        .create_role(NewRole::new("student", 0, None))
        .await
        .unwrap();
    store
        .create_role(NewRole::new("ta", 1, Some("teaching assistant".into())))
        .await
        .unwrap();
    store
        .create_role(NewRole::new("ra", 1, Some("research assistant".into())))
        .await
        .unwrap();
    store.create_role(NewRole::new("staff", 2, None)).await.unwrap();

    // Alice is student and ta, Bobby student and ra, Calvin staff.
    store.assign_role(1, "student").await.unwrap();
    store.assign_role(1, "ta").await.unwrap();
    store.assign_role(2, "student").await.unwrap();
    store.assign_role(2, "ra").await.unwrap();
    store.assign_role(3, "staff").await.unwrap();

    let assignments = store.list_assignments().await.unwrap();
    assert_eq!(assignments.len(), 5);

    let students = store.members_of("student").await.unwrap();
    assert_eq!(
        students.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(),
        vec!["Alice", "Bobby"]
    );

    let alice_roles = store.roles_for_user(1).await.unwrap();
    assert_eq!(
        alice_roles
            .iter()
            .map(|r| r.name.as_str())
            .collect::<Vec<_>>(),
        vec!["student", "ta"]
    );
}

#[tokio::test]
async fn revoke_role_only_touches_one_assignment() {
    let store = test_store().await;
    for user in sample_users() {
        store.create_user(user).await.unwrap();
    }
    store
        .create_role(NewRole::new("student", 0, None))
        .await
        .unwrap();
    store.assign_role(1, "student").await.unwrap();
    store.assign_role(2, "student").await.unwrap();

    assert!(store.revoke_role(1, "student").await.unwrap());
    assert!(!store.revoke_role(1, "student").await.unwrap());

    let students = store.members_of("student").await.unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].name, "Bobby");
}

#[tokio::test]
async fn removing_a_user_cascades_owned_rows() {
    let store = test_store().await;
    let alice = store
        .create_user(NewUser::new("Alice", None, None))
        .await
        .unwrap();

    store
        .add_email(alice.id, NewEmail::parse("alice@yahoo.com").unwrap())
        .await
        .unwrap();
    store
        .create_role(NewRole::new("student", 0, None))
        .await
        .unwrap();
    store.assign_role(alice.id, "student").await.unwrap();

    assert!(store.remove_user(alice.id).await.unwrap());

    assert!(store.list_emails().await.unwrap().is_empty());
    assert!(store.list_assignments().await.unwrap().is_empty());

    // The role definition itself stays.
    assert!(store.get_role("student").await.unwrap().is_some());
}

#[tokio::test]
async fn ping_succeeds_on_open_store() {
    let store = test_store().await;
    store.ping().await.unwrap();
}
