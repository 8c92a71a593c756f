use super::{ChangeKind, FeedbackId, Priority, SiteArea};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A single change request. Immutable once created: nothing in the system
/// updates or deletes an entry.
///
/// The wire format is camelCase JSON; `ip` only exists on entries the
/// endpoint built and is omitted from client-side copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    pub id: FeedbackId,
    pub timestamp: String,
    pub area: SiteArea,
    #[serde(rename = "type")]
    pub change_kind: ChangeKind,
    pub details: String,
    pub priority: Priority,
    pub page: String,
    pub user_agent: String,
    pub screen_size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

impl FeedbackEntry {
    /// ISO-8601 with millisecond precision, the format the wire and the
    /// stored log both use.
    pub fn now_timestamp() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> FeedbackEntry {
        FeedbackEntry {
            id: FeedbackId::new("fb_sample123".to_string()).unwrap(),
            timestamp: "2025-11-02T09:30:00.000Z".to_string(),
            area: SiteArea::Hero,
            change_kind: ChangeKind::Image,
            details: "Replace the hero image with the team photo".to_string(),
            priority: Priority::High,
            page: "/".to_string(),
            user_agent: "test-agent".to_string(),
            screen_size: "1440x900".to_string(),
            ip: None,
        }
    }

    #[test]
    fn serializes_with_the_wire_field_names() {
        let value = serde_json::to_value(sample_entry()).unwrap();
        assert_eq!(value["id"], "fb_sample123");
        assert_eq!(value["area"], "hero");
        assert_eq!(value["type"], "image");
        assert_eq!(value["priority"], "high");
        assert_eq!(value["userAgent"], "test-agent");
        assert_eq!(value["screenSize"], "1440x900");
        assert!(value.get("ip").is_none());
    }

    #[test]
    fn wire_round_trip_preserves_the_entry() {
        let entry = sample_entry();
        let json = serde_json::to_string(&entry).unwrap();
        let back: FeedbackEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn timestamps_are_utc_iso8601() {
        let timestamp = FeedbackEntry::now_timestamp();
        assert!(timestamp.ends_with('Z'));
        assert!(timestamp.contains('T'));
    }
}
