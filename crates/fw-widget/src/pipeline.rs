use crate::api_client::ApiClient;
use crate::local_store::WidgetStorage;
use fw_core::feedback::{ChangeKind, FeedbackEntry, FeedbackId, Priority, SiteArea};
use std::sync::Arc;
use tracing::{debug, warn};

/// Input from the change-request form; the form's option sets already
/// constrain the values.
#[derive(Debug, Clone)]
pub struct FeedbackForm {
    pub area: SiteArea,
    pub change_kind: ChangeKind,
    pub details: String,
    pub priority: Priority,
}

/// Metadata the page session attaches to a submission.
#[derive(Debug, Clone)]
pub struct SubmissionContext {
    pub page: String,
    pub user_agent: String,
    pub screen_size: String,
}

impl Default for SubmissionContext {
    fn default() -> Self {
        Self {
            page: "/".to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))
                .to_string(),
            screen_size: "unknown".to_string(),
        }
    }
}

/// Dual-write submission: one remote attempt, then the local backup copy,
/// then success — in that order, and never failing the caller. The remote
/// list and the local log are allowed to diverge and are never reconciled.
pub struct SubmissionPipeline {
    api: ApiClient,
    storage: Arc<WidgetStorage>,
}

impl SubmissionPipeline {
    pub fn new(api: ApiClient, storage: Arc<WidgetStorage>) -> Self {
        Self { api, storage }
    }

    pub async fn submit(&self, form: FeedbackForm, context: &SubmissionContext) -> FeedbackEntry {
        let entry = build_entry(form, context);

        if let Err(err) = self.api.submit(&entry).await {
            warn!(error = %err, "endpoint not reachable, keeping local copy only");
        }

        if let Err(err) = self.storage.append(&entry).await {
            warn!(error = %err, "failed to store feedback locally");
        }

        self.dump_history(&entry).await;

        entry
    }

    /// Debug visibility only: the submitted record and the full local
    /// history, the way the page logged both to the console.
    async fn dump_history(&self, entry: &FeedbackEntry) {
        let history = match self.storage.list().await {
            Ok(history) => history,
            Err(_) => return,
        };
        if let (Ok(record), Ok(log)) = (
            serde_json::to_string(entry),
            serde_json::to_string(&history),
        ) {
            debug!(record = %record, entries = history.len(), log = %log, "feedback submitted");
        }
    }
}

fn build_entry(form: FeedbackForm, context: &SubmissionContext) -> FeedbackEntry {
    FeedbackEntry {
        id: FeedbackId::generate(),
        timestamp: FeedbackEntry::now_timestamp(),
        area: form.area,
        change_kind: form.change_kind,
        details: form.details,
        priority: form.priority,
        page: context.page.clone(),
        user_agent: context.user_agent.clone(),
        screen_size: context.screen_size.clone(),
        ip: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_form() -> FeedbackForm {
        FeedbackForm {
            area: SiteArea::Hero,
            change_kind: ChangeKind::Image,
            details: "Replace the banner with the team photo".to_string(),
            priority: Priority::High,
        }
    }

    fn sample_context() -> SubmissionContext {
        SubmissionContext {
            page: "/listings".to_string(),
            user_agent: "test-agent".to_string(),
            screen_size: "1440x900".to_string(),
        }
    }

    fn pipeline_for(url: &str, dir: &std::path::Path) -> (SubmissionPipeline, Arc<WidgetStorage>) {
        let storage = Arc::new(WidgetStorage::new(dir));
        let api = ApiClient::new(url).expect("client");
        (SubmissionPipeline::new(api, storage.clone()), storage)
    }

    #[tokio::test]
    async fn submission_reaches_endpoint_and_local_log() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/feedback")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success":true,"message":"Feedback submitted successfully","id":"fb_x"}"#)
            .create_async()
            .await;

        let dir = tempdir().expect("tempdir");
        let (pipeline, storage) = pipeline_for(&server.url(), dir.path());

        let entry = pipeline.submit(sample_form(), &sample_context()).await;

        mock.assert_async().await;
        assert!(entry.id.as_str().starts_with("fb_"));
        assert_eq!(entry.page, "/listings");
        assert_eq!(entry.user_agent, "test-agent");
        assert_eq!(entry.screen_size, "1440x900");

        let local = storage.list().await.expect("list");
        assert_eq!(local, vec![entry]);
    }

    #[tokio::test]
    async fn unreachable_endpoint_still_produces_a_local_copy() {
        let dir = tempdir().expect("tempdir");
        let (pipeline, storage) = pipeline_for("http://127.0.0.1:9", dir.path());

        let entry = pipeline.submit(sample_form(), &sample_context()).await;

        let local = storage.list().await.expect("list");
        assert_eq!(local.len(), 1);
        assert_eq!(local[0].id, entry.id);
    }

    #[tokio::test]
    async fn server_error_still_produces_a_local_copy() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/feedback")
            .with_status(500)
            .with_body(r#"{"success":false,"error":"Failed to store feedback"}"#)
            .create_async()
            .await;

        let dir = tempdir().expect("tempdir");
        let (pipeline, storage) = pipeline_for(&server.url(), dir.path());

        pipeline.submit(sample_form(), &sample_context()).await;

        assert_eq!(storage.list().await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn each_submission_appends_to_the_history() {
        let dir = tempdir().expect("tempdir");
        let (pipeline, storage) = pipeline_for("http://127.0.0.1:9", dir.path());

        pipeline.submit(sample_form(), &sample_context()).await;
        pipeline.submit(sample_form(), &sample_context()).await;

        assert_eq!(storage.list().await.expect("list").len(), 2);
    }
}
