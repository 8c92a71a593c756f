use super::FeedbackStore;
use crate::error::AppError;
use crate::feedback::{ChangeKind, FeedbackEntry, FeedbackId, Priority, SiteArea};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS feedback_entries (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL,
    timestamp TEXT NOT NULL,
    area TEXT NOT NULL,
    change_type TEXT NOT NULL,
    details TEXT NOT NULL,
    priority TEXT NOT NULL,
    page TEXT NOT NULL,
    user_agent TEXT NOT NULL,
    screen_size TEXT NOT NULL,
    ip TEXT
);
"#;

const INSERT_ENTRY: &str = "INSERT INTO feedback_entries     (id, timestamp, area, change_type, details, priority, page, user_agent, screen_size, ip)     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";

const SELECT_ENTRIES: &str = "SELECT id, timestamp, area, change_type, details, priority, page, user_agent, screen_size, ip     FROM feedback_entries ORDER BY seq DESC";

#[derive(Debug, FromRow)]
struct FeedbackRow {
    id: String,
    timestamp: String,
    area: String,
    change_type: String,
    details: String,
    priority: String,
    page: String,
    user_agent: String,
    screen_size: String,
    ip: Option<String>,
}

impl FeedbackRow {
    fn into_domain(self) -> Result<FeedbackEntry, AppError> {
        let id = FeedbackId::new(self.id).map_err(AppError::Storage)?;
        Ok(FeedbackEntry {
            id,
            timestamp: self.timestamp,
            area: SiteArea::from(self.area.as_str()),
            change_kind: ChangeKind::from(self.change_type.as_str()),
            details: self.details,
            priority: Priority::from(self.priority.as_str()),
            page: self.page,
            user_agent: self.user_agent,
            screen_size: self.screen_size,
            ip: self.ip,
        })
    }
}

/// Durable list store backed by SQLite. The schema is ensured at connect
/// time; entries are only ever inserted.
pub struct SqliteFeedbackStore {
    pool: SqlitePool,
}

impl SqliteFeedbackStore {
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        Self::with_pool(pool).await
    }

    /// A private in-memory database; one connection so every query sees the
    /// same data.
    pub async fn in_memory() -> Result<Self, AppError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self, AppError> {
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl FeedbackStore for SqliteFeedbackStore {
    async fn append(&self, entry: &FeedbackEntry) -> Result<(), AppError> {
        sqlx::query(INSERT_ENTRY)
            .bind(entry.id.as_str())
            .bind(&entry.timestamp)
            .bind(entry.area.as_str())
            .bind(entry.change_kind.as_str())
            .bind(&entry.details)
            .bind(entry.priority.as_str())
            .bind(&entry.page)
            .bind(&entry.user_agent)
            .bind(&entry.screen_size)
            .bind(entry.ip.as_deref())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<FeedbackEntry>, AppError> {
        let rows = sqlx::query_as::<_, FeedbackRow>(SELECT_ENTRIES)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(FeedbackRow::into_domain).collect()
    }

    async fn check_ready(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
