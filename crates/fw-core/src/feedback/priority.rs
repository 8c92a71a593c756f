use serde::{Deserialize, Serialize};
use std::fmt;

/// How urgent the requester considers the change. `medium` when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Unknown(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Unknown(value) => value.as_str(),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Priority {
    fn from(value: &str) -> Self {
        match value {
            "low" => Priority::Low,
            "medium" => Priority::Medium,
            "high" => Priority::High,
            other => Priority::Unknown(other.to_string()),
        }
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        Priority::from(value.as_str())
    }
}

impl From<Priority> for String {
    fn from(value: Priority) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_priority_defaults_to_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn known_values_round_trip() {
        for raw in ["low", "medium", "high"] {
            assert_eq!(Priority::from(raw).as_str(), raw);
        }
    }
}
