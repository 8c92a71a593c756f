use super::FeedbackStore;
use crate::error::AppError;
use crate::feedback::FeedbackEntry;
use async_trait::async_trait;
use tracing::info;

/// Best-effort mode for deployments without a database: every entry is
/// written to the process logs as a readable block and nothing is listed
/// back.
pub struct LogFeedbackStore;

#[async_trait]
impl FeedbackStore for LogFeedbackStore {
    async fn append(&self, entry: &FeedbackEntry) -> Result<(), AppError> {
        let banner = "=".repeat(50);
        info!("{banner}");
        info!("FEEDBACK ENTRY - {}", FeedbackEntry::now_timestamp());
        info!("{banner}");
        info!("ID: {}", entry.id);
        info!("Area: {}", entry.area);
        info!("Type: {}", entry.change_kind);
        info!("Priority: {}", entry.priority);
        info!("Details: {}", entry.details);
        info!("Page: {}", entry.page);
        info!("Screen: {}", entry.screen_size);
        info!("{banner}");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<FeedbackEntry>, AppError> {
        Ok(Vec::new())
    }

    async fn check_ready(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{ChangeKind, FeedbackId, Priority, SiteArea};

    #[tokio::test]
    async fn append_succeeds_and_list_stays_empty() {
        let store = LogFeedbackStore;
        let entry = FeedbackEntry {
            id: FeedbackId::generate(),
            timestamp: FeedbackEntry::now_timestamp(),
            area: SiteArea::Footer,
            change_kind: ChangeKind::Text,
            details: "Update the copyright year".to_string(),
            priority: Priority::Low,
            page: "/".to_string(),
            user_agent: "test-agent".to_string(),
            screen_size: "unknown".to_string(),
            ip: None,
        };

        store.append(&entry).await.expect("append");
        assert!(store.list().await.expect("list").is_empty());
        assert!(store.check_ready().await.is_ok());
    }
}
