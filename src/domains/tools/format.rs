//! Text rendering of service replies.
//!
//! One formatter per tool. All of them are pure functions of the decoded
//! body (plus, for a few tools, the caller's own arguments).

use chrono::{DateTime, Local};

use super::registry::{EXPIRY_ONE_DAY, EXPIRY_ONE_HOUR, EXPIRY_PERMANENT, EXPIRY_THREE_DAYS};
use crate::domains::api::models::{
    CreatedEmail, DomainList, Email, EmailPage, Message, MessageDetail, MessagePage,
    OperationStatus, WebhookConfig,
};

/// Local timestamp format used in listings.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const NO_MESSAGES: &str = "This mailbox has no messages yet.";
pub const NO_CONTENT: &str = "(no content)";
pub const NO_HTML_CONTENT: &str = "(no HTML content)";
pub const URL_NOT_SET: &str = "(not set)";
pub const WEBHOOK_UPDATE_FAILED: &str = "Failed to update webhook configuration";

pub fn domains(list: &DomainList) -> String {
    if list.domains.is_empty() {
        return "Available domains:\n(none)".to_string();
    }
    let lines: Vec<String> = list.domains.iter().map(|d| format!("- {d}")).collect();
    format!("Available domains:\n{}", lines.join("\n"))
}

pub fn created_email(created: &CreatedEmail, expiry_time: i64) -> String {
    format!(
        "Temporary email created:\nAddress: {}\nID: {}\nExpires: {}",
        created.email,
        created.id,
        expiry_label(expiry_time)
    )
}

/// Human label for an `expiryTime` value.
pub fn expiry_label(expiry_time: i64) -> String {
    match expiry_time {
        EXPIRY_PERMANENT => "permanent".to_string(),
        EXPIRY_ONE_HOUR => "1 hour".to_string(),
        EXPIRY_ONE_DAY => "1 day".to_string(),
        EXPIRY_THREE_DAYS => "3 days".to_string(),
        other => format!("{other} milliseconds"),
    }
}

pub fn email_page(page: &EmailPage) -> String {
    let items: Vec<String> = page.emails.iter().map(email_item).collect();
    format!(
        "Email addresses ({} total):\n\n{}{}",
        page.total,
        items.join("\n\n"),
        next_cursor_line(page.next_cursor.as_deref())
    )
}

fn email_item(email: &Email) -> String {
    let expires = email
        .expires_at
        .as_deref()
        .map(format_timestamp)
        .unwrap_or_else(|| "never".to_string());
    format!(
        "- {} (ID: {})\n  Created: {}\n  Expires: {}",
        email.address,
        email.id,
        format_timestamp(&email.created_at),
        expires
    )
}

pub fn message_page(page: &MessagePage) -> String {
    if page.messages.is_empty() {
        return NO_MESSAGES.to_string();
    }
    let items: Vec<String> = page.messages.iter().map(message_item).collect();
    format!(
        "Messages ({} total):\n\n{}{}",
        page.total,
        items.join("\n\n"),
        next_cursor_line(page.next_cursor.as_deref())
    )
}

fn message_item(msg: &Message) -> String {
    format!(
        "- Message ID: {}\n  From: {}\n  Subject: {}\n  Received: {}",
        msg.id,
        msg.from_address,
        msg.subject,
        format_epoch_millis(msg.received_at)
    )
}

pub fn message_detail(detail: &MessageDetail) -> String {
    let msg = &detail.message;
    format!(
        "Message details:\n\nMessage ID: {}\nFrom: {}\nSubject: {}\nReceived: {}\n\n\
         Plain text content:\n{}\n\nHTML content:\n{}",
        msg.id,
        msg.from_address,
        msg.subject,
        format_epoch_millis(msg.received_at),
        non_empty_or(msg.content.as_deref(), NO_CONTENT),
        non_empty_or(msg.html.as_deref(), NO_HTML_CONTENT),
    )
}

pub fn email_deleted(status: &OperationStatus, email_id: &str) -> String {
    if status.success {
        format!("Email {email_id} deleted successfully")
    } else {
        format!("Failed to delete email {email_id}")
    }
}

pub fn message_deleted(status: &OperationStatus, message_id: &str) -> String {
    if status.success {
        format!("Message {message_id} deleted successfully")
    } else {
        format!("Failed to delete message {message_id}")
    }
}

pub fn webhook_config(config: &WebhookConfig) -> String {
    format!(
        "Webhook configuration:\nURL: {}\nStatus: {}",
        if config.url.is_empty() {
            URL_NOT_SET
        } else {
            config.url.as_str()
        },
        status_label(config.enabled)
    )
}

pub fn webhook_updated(status: &OperationStatus, url: &str, enabled: bool) -> String {
    if status.success {
        format!(
            "Webhook configuration updated:\nURL: {}\nStatus: {}",
            url,
            status_label(enabled)
        )
    } else {
        WEBHOOK_UPDATE_FAILED.to_string()
    }
}

fn status_label(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "disabled" }
}

fn next_cursor_line(cursor: Option<&str>) -> String {
    match cursor {
        Some(c) if !c.is_empty() => format!("\n\nMore results available, next page cursor: {c}"),
        _ => String::new(),
    }
}

fn non_empty_or<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    value.filter(|v| !v.is_empty()).unwrap_or(placeholder)
}

/// Render an RFC 3339 timestamp in local time; anything else verbatim.
pub fn format_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Render epoch milliseconds in local time.
pub fn format_epoch_millis(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| millis.to_string())
}
