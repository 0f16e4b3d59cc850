use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// Persona record as published in the model directory.
///
/// `visibility` and `created_at` are often missing from directory records;
/// they are filled in when a chat session is loaded. Values that do not fit
/// either field read as absent instead of rejecting the record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetadata {
    pub role: String,
    pub text_sample: String,
    pub address: String,
    #[serde(
        default,
        deserialize_with = "lenient_visibility",
        skip_serializing_if = "Option::is_none"
    )]
    pub visibility: Option<Visibility>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        serialize_with = "time::serde::rfc3339::option::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<OffsetDateTime>,
}

const DATE_ONLY: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

fn lenient_visibility<'de, D>(deserializer: D) -> Result<Option<Visibility>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| Visibility::deserialize(v).ok()))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_timestamp))
}

/// RFC 3339, a bare `YYYY-MM-DD` (UTC midnight), or Unix milliseconds.
fn parse_timestamp(value: &Value) -> Option<OffsetDateTime> {
    match value {
        Value::String(raw) => OffsetDateTime::parse(raw, &Rfc3339).ok().or_else(|| {
            Date::parse(raw, DATE_ONLY)
                .ok()
                .map(|date| date.midnight().assume_utc())
        }),
        Value::Number(number) => {
            let millis = number
                .as_i64()
                .or_else(|| number.as_f64().map(|f| f as i64))?;
            OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).ok()
        }
        _ => None,
    }
}

const DISPLAY_SAMPLE_CHARS: usize = 15;
const ADDRESS_HEAD_CHARS: usize = 8;
const ADDRESS_TAIL_CHARS: usize = 6;

impl ModelMetadata {
    pub fn is_private(&self) -> bool {
        matches!(self.visibility, Some(Visibility::Private))
    }

    /// Card title: role plus the first few characters of the expertise sample.
    pub fn display_name(&self) -> String {
        let sample: String = self.text_sample.chars().take(DISPLAY_SAMPLE_CHARS).collect();
        let ellipsis = if self.text_sample.chars().count() > DISPLAY_SAMPLE_CHARS {
            "..."
        } else {
            ""
        };
        format!("{} ({sample}{ellipsis})", self.role)
    }

    pub fn short_address(&self) -> String {
        let chars: Vec<char> = self.address.chars().collect();
        if chars.len() <= ADDRESS_HEAD_CHARS + ADDRESS_TAIL_CHARS {
            return self.address.clone();
        }
        let head: String = chars[..ADDRESS_HEAD_CHARS].iter().collect();
        let tail: String = chars[chars.len() - ADDRESS_TAIL_CHARS..].iter().collect();
        format!("{head}...{tail}")
    }
}

/// Per-user data attached to requests for private models.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<serde_json::Value>>,
}

impl UserContext {
    // Placeholder until a user-profile service exists.
    pub fn stub() -> Self {
        Self {
            user_id: Some("user123".to_string()),
            preferences: Some(serde_json::json!({ "theme": "dark", "language": "en" })),
            history: Some(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn metadata(text_sample: &str, address: &str) -> ModelMetadata {
        ModelMetadata {
            role: "Teacher".to_string(),
            text_sample: text_sample.to_string(),
            address: address.to_string(),
            visibility: None,
            created_at: None,
        }
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&ChatMessage::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }

    #[test]
    fn test_metadata_parses_directory_record() {
        let raw = r#"{"role":"Coach","textSample":"marathon training","address":"0xabc","extra":1}"#;
        let parsed: ModelMetadata = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.role, "Coach");
        assert_eq!(parsed.text_sample, "marathon training");
        assert_eq!(parsed.visibility, None);
        assert_eq!(parsed.created_at, None);
    }

    #[test]
    fn test_metadata_round_trips_created_at() {
        let raw = r#"{"role":"Coach","textSample":"x","address":"a","visibility":"private","createdAt":"2024-05-01T12:00:00Z"}"#;
        let parsed: ModelMetadata = serde_json::from_str(raw).unwrap();
        assert!(parsed.is_private());
        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["createdAt"], "2024-05-01T12:00:00Z");
        assert_eq!(json["visibility"], "private");
    }

    #[test]
    fn test_metadata_tolerates_odd_optional_fields() {
        let raw = r#"{"role":"Coach","textSample":"x","address":"a","visibility":"","createdAt":"soon"}"#;
        let parsed: ModelMetadata = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.visibility, None);
        assert_eq!(parsed.created_at, None);

        let raw = r#"{"role":"Coach","textSample":"x","address":"a","visibility":null,"createdAt":false}"#;
        let parsed: ModelMetadata = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.visibility, None);
        assert_eq!(parsed.created_at, None);
    }

    #[test]
    fn test_created_at_accepts_date_and_millis() {
        let date_only = r#"{"role":"Coach","textSample":"x","address":"a","createdAt":"2024-05-01"}"#;
        let parsed: ModelMetadata = serde_json::from_str(date_only).unwrap();
        assert_eq!(parsed.created_at, Some(datetime!(2024-05-01 0:00 UTC)));

        let millis = r#"{"role":"Coach","textSample":"x","address":"a","createdAt":1714564800000}"#;
        let parsed: ModelMetadata = serde_json::from_str(millis).unwrap();
        assert_eq!(parsed.created_at, Some(datetime!(2024-05-01 12:00 UTC)));
    }

    #[test]
    fn test_display_name_truncates_long_samples() {
        assert_eq!(
            metadata("linear algebra and calculus", "a").display_name(),
            "Teacher (linear algebra ...)"
        );
        assert_eq!(metadata("algebra", "a").display_name(), "Teacher (algebra)");
    }

    #[test]
    fn test_short_address() {
        let long = metadata("x", "0x1234567890abcdef1234567890");
        assert_eq!(long.short_address(), "0x123456...567890");
        let short = metadata("x", "0xabc");
        assert_eq!(short.short_address(), "0xabc");
    }

    #[test]
    fn test_user_context_skips_missing_fields() {
        let json = serde_json::to_string(&UserContext::default()).unwrap();
        assert_eq!(json, "{}");
        let stub = serde_json::to_value(UserContext::stub()).unwrap();
        assert_eq!(stub["userId"], "user123");
        assert_eq!(stub["preferences"]["language"], "en");
    }
}
