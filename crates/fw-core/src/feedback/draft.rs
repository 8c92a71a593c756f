use super::{ChangeKind, FeedbackEntry, FeedbackId, Priority, SiteArea};
use crate::error::AppError;
use serde::Deserialize;

/// The one rejection the endpoint knows; both fields are reported together
/// no matter which is missing.
pub const MISSING_REQUIRED_FIELDS: &str = "Missing required fields: area and details";

/// Incoming `POST /api/feedback` payload. Everything is optional until
/// validated; blank strings count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub area: Option<SiteArea>,
    #[serde(default, rename = "type")]
    pub change_kind: Option<ChangeKind>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub screen_size: Option<String>,
}

impl FeedbackDraft {
    /// Validates presence of `area` and `details`, then fills the
    /// server-side defaults. Client-supplied id and timestamp are kept
    /// verbatim when usable.
    pub fn into_entry(
        self,
        fallback_user_agent: Option<String>,
        ip: Option<String>,
    ) -> Result<FeedbackEntry, AppError> {
        let area = self.area.filter(|area| !area.as_str().trim().is_empty());
        let details = self.details.filter(|details| !details.trim().is_empty());
        let (Some(area), Some(details)) = (area, details) else {
            return Err(AppError::Validation(MISSING_REQUIRED_FIELDS.to_string()));
        };

        let id = self
            .id
            .and_then(|id| FeedbackId::new(id).ok())
            .unwrap_or_else(FeedbackId::generate);

        Ok(FeedbackEntry {
            id,
            timestamp: self
                .timestamp
                .filter(|timestamp| !timestamp.trim().is_empty())
                .unwrap_or_else(FeedbackEntry::now_timestamp),
            area,
            change_kind: self.change_kind.unwrap_or_default(),
            details,
            priority: self.priority.unwrap_or_default(),
            page: non_blank(self.page).unwrap_or_else(|| "/".to_string()),
            user_agent: non_blank(self.user_agent)
                .or(fallback_user_agent)
                .unwrap_or_else(|| "unknown".to_string()),
            screen_size: non_blank(self.screen_size).unwrap_or_else(|| "unknown".to_string()),
            ip,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
