use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

const ID_PREFIX: &str = "fb_";
const RANDOM_SUFFIX_LEN: usize = 9;
const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Identifier of a feedback entry: `fb_` followed by the creation time in
/// base36 millis and a random base36 suffix. Not guaranteed globally
/// unique; collisions are tolerated by every consumer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedbackId(String);

impl FeedbackId {
    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
        let mut value = String::with_capacity(ID_PREFIX.len() + 13 + RANDOM_SUFFIX_LEN);
        value.push_str(ID_PREFIX);
        value.push_str(&to_base36(millis));

        let mut rng = rand::thread_rng();
        for _ in 0..RANDOM_SUFFIX_LEN {
            let digit = BASE36_ALPHABET[rng.gen_range(0..BASE36_ALPHABET.len())];
            value.push(digit as char);
        }

        Self(value)
    }

    /// Client-supplied ids are kept verbatim; only blank values are
    /// rejected.
    pub fn new(value: String) -> Result<Self, String> {
        if value.trim().is_empty() {
            return Err("Feedback ID cannot be empty".to_string());
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeedbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<FeedbackId> for String {
    fn from(id: FeedbackId) -> Self {
        id.0
    }
}

impl FromStr for FeedbackId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

fn to_base36(mut value: u64) -> String {
    let mut digits = [0u8; 13];
    let mut at = digits.len();
    loop {
        at -= 1;
        digits[at] = BASE36_ALPHABET[(value % 36) as usize];
        value /= 36;
        if value == 0 {
            break;
        }
    }
    String::from_utf8_lossy(&digits[at..]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_have_the_wire_shape() {
        let id = FeedbackId::generate();
        let suffix = id.as_str().strip_prefix("fb_").expect("fb_ prefix");
        assert!(suffix.len() > RANDOM_SUFFIX_LEN);
        assert!(suffix
            .bytes()
            .all(|byte| byte.is_ascii_digit() || byte.is_ascii_lowercase()));
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(FeedbackId::generate(), FeedbackId::generate());
    }

    #[test]
    fn blank_ids_are_rejected() {
        assert!(FeedbackId::new("  ".to_string()).is_err());
        assert!(FeedbackId::new(String::new()).is_err());
    }

    #[test]
    fn client_ids_are_kept_verbatim() {
        let id = FeedbackId::new("fb_custom".to_string()).unwrap();
        assert_eq!(id.as_str(), "fb_custom");
    }

    #[test]
    fn base36_encodes_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1295), "zz");
        assert_eq!(to_base36(1296), "100");
    }
}
