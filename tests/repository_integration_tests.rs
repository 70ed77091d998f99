use accessible_platform::{
    models::{NewContent, NewMessage},
    repository::{Repository, SqliteRepository},
};
use sqlx::sqlite::SqlitePoolOptions;

async fn test_repo() -> SqliteRepository {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite in tests");
    let repo = SqliteRepository::new(pool);
    repo.init_schema().await.expect("schema init failed");
    repo
}

fn content(title: &str) -> NewContent {
    NewContent {
        title: title.to_string(),
        body: format!("{} body", title),
        alt_text: String::new(),
        category: "general".to_string(),
    }
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let repo = test_repo().await;
    let id = repo
        .create_content(&NewContent {
            title: "Welcome".to_string(),
            body: "Hello".to_string(),
            alt_text: "An illustration".to_string(),
            category: "features".to_string(),
        })
        .await
        .unwrap();

    let item = repo.get_content(id).await.unwrap().expect("item missing");
    assert_eq!(item.id, id);
    assert_eq!(item.title, "Welcome");
    assert_eq!(item.body, "Hello");
    assert_eq!(item.alt_text.as_deref(), Some("An illustration"));
    assert_eq!(item.category, "features");
    assert_eq!(item.created_at, item.updated_at);
}

#[tokio::test]
async fn get_missing_id_is_none() {
    let repo = test_repo().await;
    assert!(repo.get_content(42).await.unwrap().is_none());
}

#[tokio::test]
async fn update_missing_id_never_creates_a_row() {
    let repo = test_repo().await;
    let matched = repo.update_content(42, &content("Ghost")).await.unwrap();
    assert!(!matched);
    assert!(repo.list_content().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_refreshes_updated_at_only() {
    let repo = test_repo().await;
    let id = repo.create_content(&content("Initial")).await.unwrap();
    let before = repo.get_content(id).await.unwrap().unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    assert!(repo.update_content(id, &content("Edited")).await.unwrap());

    let after = repo.get_content(id).await.unwrap().unwrap();
    assert_eq!(after.title, "Edited");
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at > before.updated_at);
}

#[tokio::test]
async fn delete_affects_exactly_one_id() {
    let repo = test_repo().await;
    let keep = repo.create_content(&content("Keep")).await.unwrap();
    let gone = repo.create_content(&content("Gone")).await.unwrap();

    // First delete succeeds, second on the same id finds nothing.
    assert!(repo.delete_content(gone).await.unwrap());
    assert!(!repo.delete_content(gone).await.unwrap());

    let remaining = repo.list_content().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, keep);
}

#[tokio::test]
async fn list_is_newest_first() {
    let repo = test_repo().await;
    let a = repo.create_content(&content("A")).await.unwrap();
    let b = repo.create_content(&content("B")).await.unwrap();
    let c = repo.create_content(&content("C")).await.unwrap();

    let ids: Vec<i64> = repo
        .list_content()
        .await
        .unwrap()
        .iter()
        .map(|i| i.id)
        .collect();
    assert_eq!(ids, vec![c, b, a]);
}

#[tokio::test]
async fn messages_are_newest_first_and_unread() {
    let repo = test_repo().await;
    for name in ["first", "second", "third"] {
        repo.create_message(&NewMessage {
            name: name.to_string(),
            email: "a@b.co".to_string(),
            message: "hi".to_string(),
        })
        .await
        .unwrap();
    }

    let messages = repo.list_messages().await.unwrap();
    let names: Vec<&str> = messages.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["third", "second", "first"]);
    assert!(messages.iter().all(|m| !m.read));
}

#[tokio::test]
async fn absent_admin_is_a_valid_outcome() {
    let repo = test_repo().await;
    assert!(repo.find_admin_by_username("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_username_violates_constraint() {
    let repo = test_repo().await;
    repo.create_admin("admin", "hash", Some("a@example.com"))
        .await
        .unwrap();

    let err = repo
        .create_admin("admin", "other-hash", None)
        .await
        .expect_err("duplicate should fail");
    match err {
        sqlx::Error::Database(db_err) => assert!(db_err.is_unique_violation()),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn bootstrap_inserts_exactly_once() {
    let repo = test_repo().await;
    assert!(
        repo.create_admin_if_missing("admin", "hash", "a@example.com")
            .await
            .unwrap()
    );
    // Second bootstrap is a no-op, even with a different username.
    assert!(
        !repo
            .create_admin_if_missing("admin2", "hash2", "b@example.com")
            .await
            .unwrap()
    );

    let admin = repo
        .find_admin_by_username("admin")
        .await
        .unwrap()
        .expect("bootstrap admin missing");
    assert_eq!(admin.email.as_deref(), Some("a@example.com"));
    assert!(repo.find_admin_by_username("admin2").await.unwrap().is_none());
}
