//! Typed tool calls.
//!
//! A [`ToolCall`] is a validated invocation with its arguments extracted. It
//! knows its one outbound request and how to render the service's reply.

use reqwest::Url;
use rmcp::model::JsonObject;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::error::ToolError;
use super::format;
use super::registry::{ToolKind, as_integer};
use crate::domains::api::ApiRequest;
use crate::domains::api::models::{
    CreatedEmail, DomainList, EmailPage, MessageDetail, MessagePage, OperationStatus,
    WebhookConfig,
};

/// A tool invocation with typed arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    GetEmailDomains,
    CreateEmail {
        name: String,
        domain: String,
        expiry_time: i64,
    },
    ListEmails {
        cursor: Option<String>,
    },
    DeleteEmail {
        email_id: String,
    },
    GetMessages {
        email_id: String,
        cursor: Option<String>,
    },
    GetMessageDetail {
        email_id: String,
        message_id: String,
    },
    DeleteMessage {
        email_id: String,
        message_id: String,
    },
    GetWebhookConfig,
    SetWebhookConfig {
        url: String,
        enabled: bool,
    },
}

impl ToolCall {
    /// Extract typed arguments for the given tool.
    pub fn from_arguments(kind: ToolKind, args: &JsonObject) -> Result<Self, ToolError> {
        let call = match kind {
            ToolKind::GetEmailDomains => Self::GetEmailDomains,
            ToolKind::CreateEmail => Self::CreateEmail {
                name: required_str(args, "name")?,
                domain: required_str(args, "domain")?,
                expiry_time: required_integer(args, "expiryTime")?,
            },
            ToolKind::ListEmails => Self::ListEmails {
                cursor: optional_str(args, "cursor")?,
            },
            ToolKind::DeleteEmail => Self::DeleteEmail {
                email_id: required_id(args, "emailId")?,
            },
            ToolKind::GetMessages => Self::GetMessages {
                email_id: required_id(args, "emailId")?,
                cursor: optional_str(args, "cursor")?,
            },
            ToolKind::GetMessageDetail => Self::GetMessageDetail {
                email_id: required_id(args, "emailId")?,
                message_id: required_id(args, "messageId")?,
            },
            ToolKind::DeleteMessage => Self::DeleteMessage {
                email_id: required_id(args, "emailId")?,
                message_id: required_id(args, "messageId")?,
            },
            ToolKind::GetWebhookConfig => Self::GetWebhookConfig,
            ToolKind::SetWebhookConfig => {
                let url = required_str(args, "url")?;
                check_webhook_url(&url)?;
                Self::SetWebhookConfig {
                    url,
                    enabled: required_bool(args, "enabled")?,
                }
            }
        };
        Ok(call)
    }

    /// The single request this call maps to.
    pub fn request(&self) -> ApiRequest {
        match self {
            Self::GetEmailDomains => ApiRequest::get(["api", "email", "domains"]),
            Self::CreateEmail {
                name,
                domain,
                expiry_time,
            } => ApiRequest::post(["api", "emails", "generate"]).with_body(json!({
                "name": name,
                "domain": domain,
                "expiryTime": expiry_time,
            })),
            Self::ListEmails { cursor } => {
                ApiRequest::get(["api", "emails"]).with_cursor(cursor.as_deref())
            }
            Self::DeleteEmail { email_id } => {
                ApiRequest::delete(["api", "emails", email_id.as_str()])
            }
            Self::GetMessages { email_id, cursor } => {
                ApiRequest::get(["api", "emails", email_id.as_str()])
                    .with_cursor(cursor.as_deref())
            }
            Self::GetMessageDetail {
                email_id,
                message_id,
            } => ApiRequest::get(["api", "emails", email_id.as_str(), message_id.as_str()]),
            Self::DeleteMessage {
                email_id,
                message_id,
            } => ApiRequest::delete(["api", "emails", email_id.as_str(), message_id.as_str()]),
            Self::GetWebhookConfig => ApiRequest::get(["api", "webhook"]),
            Self::SetWebhookConfig { url, enabled } => ApiRequest::post(["api", "webhook"])
                .with_body(json!({
                    "url": url,
                    "enabled": enabled,
                })),
        }
    }

    /// Render the decoded reply body as text.
    pub fn render(&self, body: Value) -> Result<String, ToolError> {
        let text = match self {
            Self::GetEmailDomains => format::domains(&decode::<DomainList>(body)?),
            Self::CreateEmail { expiry_time, .. } => {
                format::created_email(&decode::<CreatedEmail>(body)?, *expiry_time)
            }
            Self::ListEmails { .. } => format::email_page(&decode::<EmailPage>(body)?),
            Self::DeleteEmail { email_id } => {
                format::email_deleted(&decode::<OperationStatus>(body)?, email_id)
            }
            Self::GetMessages { .. } => format::message_page(&decode::<MessagePage>(body)?),
            Self::GetMessageDetail { .. } => {
                format::message_detail(&decode::<MessageDetail>(body)?)
            }
            Self::DeleteMessage { message_id, .. } => {
                format::message_deleted(&decode::<OperationStatus>(body)?, message_id)
            }
            Self::GetWebhookConfig => format::webhook_config(&decode::<WebhookConfig>(body)?),
            Self::SetWebhookConfig { url, enabled } => {
                format::webhook_updated(&decode::<OperationStatus>(body)?, url, *enabled)
            }
        };
        Ok(text)
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ToolError> {
    serde_json::from_value(body).map_err(|e| ToolError::invalid_response(e.to_string()))
}

fn required_str(args: &JsonObject, field: &str) -> Result<String, ToolError> {
    optional_str(args, field)?.ok_or_else(|| ToolError::missing_argument(field))
}

/// A string that is used verbatim as one URL path segment.
///
/// Empty and dot-only values would collapse or re-target the path.
fn required_id(args: &JsonObject, field: &str) -> Result<String, ToolError> {
    let id = required_str(args, field)?;
    match id.as_str() {
        "" => Err(ToolError::invalid_argument(field, "must not be empty")),
        "." | ".." => Err(ToolError::invalid_argument(
            field,
            format!("'{id}' is not a valid ID"),
        )),
        _ => Ok(id),
    }
}

fn optional_str(args: &JsonObject, field: &str) -> Result<Option<String>, ToolError> {
    match args.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ToolError::invalid_argument(field, "expected string")),
    }
}

fn required_integer(args: &JsonObject, field: &str) -> Result<i64, ToolError> {
    match args.get(field) {
        None | Some(Value::Null) => Err(ToolError::missing_argument(field)),
        Some(value) => {
            as_integer(value).ok_or_else(|| ToolError::invalid_argument(field, "expected an integer"))
        }
    }
}

fn required_bool(args: &JsonObject, field: &str) -> Result<bool, ToolError> {
    match args.get(field) {
        None | Some(Value::Null) => Err(ToolError::missing_argument(field)),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(ToolError::invalid_argument(field, "expected boolean")),
    }
}

fn check_webhook_url(url: &str) -> Result<(), ToolError> {
    let parsed = Url::parse(url).map_err(|e| ToolError::invalid_argument("url", e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ToolError::invalid_argument(
            "url",
            format!("unsupported scheme '{scheme}', expected http or https"),
        )),
    }
}
