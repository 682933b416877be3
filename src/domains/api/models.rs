//! Typed views of the email service's JSON replies.
//!
//! Field names are fixed by the remote service; renames here are load-bearing.
//! Scalar fields accept an explicit `null` wherever a missing field is fine.

use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::Number;

/// Reply of `GET /api/email/domains`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainList {
    pub domains: Vec<String>,
}

/// Reply of `POST /api/emails/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedEmail {
    pub id: String,
    pub email: String,
}

/// An email address owned by the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Email {
    pub id: String,
    pub address: String,
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
    #[serde(rename = "createdAt", default, deserialize_with = "null_as_default")]
    pub created_at: String,
    /// Absent or null for addresses that never expire.
    #[serde(rename = "expiresAt", default)]
    pub expires_at: Option<String>,
}

/// One page of `GET /api/emails`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailPage {
    pub emails: Vec<Email>,
    #[serde(rename = "nextCursor", default)]
    pub next_cursor: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u64,
}

/// A message received by one address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub from_address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    /// Epoch milliseconds.
    #[serde(deserialize_with = "epoch_millis")]
    pub received_at: i64,
}

/// One page of `GET /api/emails/{emailId}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePage {
    pub messages: Vec<Message>,
    #[serde(rename = "nextCursor", default)]
    pub next_cursor: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u64,
}

/// Reply of `GET /api/emails/{emailId}/{messageId}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDetail {
    pub message: Message,
}

/// Webhook settings, one per account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Empty when no webhook was ever configured.
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled: bool,
}

/// Outcome flag returned by mutating endpoints.
///
/// A missing `success` field counts as a failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OperationStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Whole milliseconds, also when the service encodes them as a float.
fn epoch_millis<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;
    number
        .as_i64()
        .or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        })
        .ok_or_else(|| D::Error::custom(format!("expected epoch milliseconds, got {number}")))
}
