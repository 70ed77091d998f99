use crate::models::{Admin, ContactMessage, ContentItem, NewContent, NewMessage};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Repository Trait
///
/// Defines the abstract contract for all persistence operations. Handlers interact
/// with the data layer through this trait without knowing the concrete
/// implementation (SQLite here, mocks elsewhere).
///
/// Every operation is a single statement, so per-statement atomicity from the store
/// is the only coordination the application relies on. Storage failures propagate
/// as `sqlx::Error`; a `None`/`false` outcome is "not found", which is a valid
/// result, not a failure.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Schema & Bootstrap ---
    /// Creates the three tables idempotently. Safe to call on every startup.
    async fn init_schema(&self) -> Result<(), sqlx::Error>;
    /// Creates the default admin unless an admin row already exists. Expressed as
    /// one atomic INSERT ... WHERE NOT EXISTS so two racing bootstraps cannot both
    /// insert. Returns true when a row was created.
    async fn create_admin_if_missing(
        &self,
        username: &str,
        password_hash: &str,
        email: &str,
    ) -> Result<bool, sqlx::Error>;

    // --- Credential Store ---
    async fn find_admin_by_username(&self, username: &str) -> Result<Option<Admin>, sqlx::Error>;
    /// Fails with a unique-violation database error if the username already exists.
    async fn create_admin(
        &self,
        username: &str,
        password_hash: &str,
        email: Option<&str>,
    ) -> Result<i64, sqlx::Error>;

    // --- Content Store ---
    /// All items, newest first.
    async fn list_content(&self) -> Result<Vec<ContentItem>, sqlx::Error>;
    async fn get_content(&self, id: i64) -> Result<Option<ContentItem>, sqlx::Error>;
    async fn create_content(&self, new: &NewContent) -> Result<i64, sqlx::Error>;
    /// Full replace; refreshes updated_at. Returns false when no row matched.
    async fn update_content(&self, id: i64, new: &NewContent) -> Result<bool, sqlx::Error>;
    /// Irreversible. Returns false when the id did not exist.
    async fn delete_content(&self, id: i64) -> Result<bool, sqlx::Error>;

    // --- Message Store ---
    async fn create_message(&self, new: &NewMessage) -> Result<i64, sqlx::Error>;
    /// All submissions, newest first.
    async fn list_messages(&self) -> Result<Vec<ContactMessage>, sqlx::Error>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer access across the
/// application state.
pub type RepositoryState = Arc<dyn Repository>;

/// SqliteRepository
///
/// The concrete implementation of the `Repository` trait, backed by SQLite.
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS admins (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                email TEXT,
                created_at DATETIME NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS content (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                body TEXT NOT NULL,
                alt_text TEXT,
                category TEXT NOT NULL DEFAULT 'general',
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contact_messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                message TEXT NOT NULL,
                created_at DATETIME NOT NULL,
                read BOOLEAN NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn create_admin_if_missing(
        &self,
        username: &str,
        password_hash: &str,
        email: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO admins (username, password_hash, email, created_at)
            SELECT ?, ?, ?, ?
            WHERE NOT EXISTS (SELECT 1 FROM admins)
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(email)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_admin_by_username(&self, username: &str) -> Result<Option<Admin>, sqlx::Error> {
        sqlx::query_as::<_, Admin>(
            "SELECT id, username, password_hash, email, created_at FROM admins WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }

    async fn create_admin(
        &self,
        username: &str,
        password_hash: &str,
        email: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO admins (username, password_hash, email, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(username)
        .bind(password_hash)
        .bind(email)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    async fn list_content(&self) -> Result<Vec<ContentItem>, sqlx::Error> {
        // The id tiebreak keeps the ordering stable for rows created within the same
        // timestamp tick.
        sqlx::query_as::<_, ContentItem>(
            r#"
            SELECT id, title, body, alt_text, category, created_at, updated_at
            FROM content
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_content(&self, id: i64) -> Result<Option<ContentItem>, sqlx::Error> {
        sqlx::query_as::<_, ContentItem>(
            "SELECT id, title, body, alt_text, category, created_at, updated_at FROM content WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn create_content(&self, new: &NewContent) -> Result<i64, sqlx::Error> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO content (title, body, alt_text, category, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new.title)
        .bind(&new.body)
        .bind(&new.alt_text)
        .bind(&new.category)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    async fn update_content(&self, id: i64, new: &NewContent) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE content
            SET title = ?, body = ?, alt_text = ?, category = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&new.title)
        .bind(&new.body)
        .bind(&new.alt_text)
        .bind(&new.category)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_content(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM content WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_message(&self, new: &NewMessage) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO contact_messages (name, email, message, created_at, read)
            VALUES (?, ?, ?, ?, 0)
            "#,
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.message)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    async fn list_messages(&self) -> Result<Vec<ContactMessage>, sqlx::Error> {
        sqlx::query_as::<_, ContactMessage>(
            r#"
            SELECT id, name, email, message, created_at, read
            FROM contact_messages
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
