mod log_only;
mod sqlite;

pub use log_only::LogFeedbackStore;
pub use sqlite::SqliteFeedbackStore;

use crate::error::AppError;
use crate::feedback::FeedbackEntry;
use async_trait::async_trait;
use std::sync::Arc;

/// Append-only list of feedback entries. There is no update or delete;
/// divergence between this list and any client-side copy is accepted.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    async fn append(&self, entry: &FeedbackEntry) -> Result<(), AppError>;

    /// Newest first.
    async fn list(&self) -> Result<Vec<FeedbackEntry>, AppError>;

    async fn check_ready(&self) -> Result<(), AppError>;
}

/// Strategy selection happens once at process start: a configured database
/// URL selects the durable store, otherwise entries only reach the process
/// logs and `list` stays empty.
pub async fn connect_store(
    database_url: Option<&str>,
) -> Result<Arc<dyn FeedbackStore>, AppError> {
    match database_url {
        Some(url) => {
            let store = SqliteFeedbackStore::connect(url).await?;
            tracing::info!("feedback store: sqlite");
            Ok(Arc::new(store))
        }
        None => {
            tracing::info!("feedback store: log-only (no database configured)");
            Ok(Arc::new(LogFeedbackStore))
        }
    }
}
