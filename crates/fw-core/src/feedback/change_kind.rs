use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of change is being requested. `other` when the client omits
/// the field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChangeKind {
    Color,
    Image,
    Text,
    Layout,
    Add,
    Remove,
    #[default]
    Other,
    Unknown(String),
}

impl ChangeKind {
    pub fn as_str(&self) -> &str {
        match self {
            ChangeKind::Color => "color",
            ChangeKind::Image => "image",
            ChangeKind::Text => "text",
            ChangeKind::Layout => "layout",
            ChangeKind::Add => "add",
            ChangeKind::Remove => "remove",
            ChangeKind::Other => "other",
            ChangeKind::Unknown(value) => value.as_str(),
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ChangeKind {
    fn from(value: &str) -> Self {
        match value {
            "color" => ChangeKind::Color,
            "image" => ChangeKind::Image,
            "text" => ChangeKind::Text,
            "layout" => ChangeKind::Layout,
            "add" => ChangeKind::Add,
            "remove" => ChangeKind::Remove,
            "other" => ChangeKind::Other,
            other => ChangeKind::Unknown(other.to_string()),
        }
    }
}

impl From<String> for ChangeKind {
    fn from(value: String) -> Self {
        ChangeKind::from(value.as_str())
    }
}

impl From<ChangeKind> for String {
    fn from(value: ChangeKind) -> Self {
        value.as_str().to_string()
    }
}
