//! Tool Registry - the static catalogue of tools.
//!
//! Each tool is a plain [`ToolDescriptor`] record: name, description and an
//! ordered input contract. This is the single source of truth for:
//! - the `tools/list` reply (via [`ToolDescriptor::to_tool`])
//! - upfront argument validation (via [`ToolDescriptor::validate`])

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use rmcp::model::{JsonObject, Tool, ToolAnnotations};
use serde_json::{Value, json};

use super::error::ToolError;

// ============================================================================
// Expiry options
// ============================================================================

pub const EXPIRY_ONE_HOUR: i64 = 3_600_000;
pub const EXPIRY_ONE_DAY: i64 = 86_400_000;
pub const EXPIRY_THREE_DAYS: i64 = 259_200_000;
pub const EXPIRY_PERMANENT: i64 = 0;

/// Legal `expiryTime` values, in milliseconds.
pub const EXPIRY_OPTIONS: &[i64] = &[
    EXPIRY_ONE_HOUR,
    EXPIRY_ONE_DAY,
    EXPIRY_THREE_DAYS,
    EXPIRY_PERMANENT,
];

// ============================================================================
// Descriptor types
// ============================================================================

/// Identifies which request shape and formatter a tool uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    GetEmailDomains,
    CreateEmail,
    ListEmails,
    DeleteEmail,
    GetMessages,
    GetMessageDetail,
    DeleteMessage,
    GetWebhookConfig,
    SetWebhookConfig,
}

impl ToolKind {
    /// Tools that never change remote state.
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            Self::GetEmailDomains
                | Self::ListEmails
                | Self::GetMessages
                | Self::GetMessageDetail
                | Self::GetWebhookConfig
        )
    }

    /// Tools that irreversibly remove remote data.
    pub fn is_destructive(&self) -> bool {
        matches!(self, Self::DeleteEmail | Self::DeleteMessage)
    }
}

/// JSON type of an input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
    Boolean,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }

    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
        }
    }
}

/// One named field of a tool's input contract.
#[derive(Debug)]
pub struct FieldContract {
    pub name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    pub description: &'static str,
    /// Enumerated legal values, empty when unconstrained.
    pub allowed_values: &'static [i64],
}

impl FieldContract {
    const fn required(name: &'static str, field_type: FieldType, description: &'static str) -> Self {
        Self {
            name,
            field_type,
            required: true,
            description,
            allowed_values: &[],
        }
    }

    const fn optional(name: &'static str, field_type: FieldType, description: &'static str) -> Self {
        Self {
            name,
            field_type,
            required: false,
            description,
            allowed_values: &[],
        }
    }

    const fn one_of(self, allowed_values: &'static [i64]) -> Self {
        Self {
            allowed_values,
            ..self
        }
    }

    /// Check a present, non-null value against the declared type.
    fn check(&self, value: &Value) -> Result<(), ToolError> {
        if !self.field_type.matches(value) {
            return Err(ToolError::invalid_argument(
                self.name,
                format!(
                    "expected {}, got {}",
                    self.field_type.as_str(),
                    json_type_name(value)
                ),
            ));
        }
        if self.field_type == FieldType::Number && as_integer(value).is_none() {
            return Err(ToolError::invalid_argument(
                self.name,
                "expected an integer",
            ));
        }
        Ok(())
    }

    fn schema(&self) -> Value {
        let mut schema = json!({
            "type": self.field_type.as_str(),
            "description": self.description,
        });
        if !self.allowed_values.is_empty() {
            schema["enum"] = json!(self.allowed_values);
        }
        schema
    }
}

/// Static metadata describing one tool.
#[derive(Debug)]
pub struct ToolDescriptor {
    pub kind: ToolKind,
    pub name: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldContract],
}

impl ToolDescriptor {
    /// Names of the required fields, in contract order.
    pub fn required_fields(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect()
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldContract> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Verify required fields are present and every present field is well typed.
    ///
    /// A `null` value counts as absent.
    pub fn validate(&self, arguments: &JsonObject) -> Result<(), ToolError> {
        for field in self.fields {
            match arguments.get(field.name) {
                None | Some(Value::Null) if field.required => {
                    return Err(ToolError::missing_argument(field.name));
                }
                None | Some(Value::Null) => {}
                Some(value) => field.check(value)?,
            }
        }
        Ok(())
    }

    /// JSON schema of the input contract.
    pub fn input_schema(&self) -> JsonObject {
        let properties: JsonObject = self
            .fields
            .iter()
            .map(|f| (f.name.to_string(), f.schema()))
            .collect();

        let mut schema = JsonObject::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        schema.insert("required".to_string(), json!(self.required_fields()));
        schema
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.into(),
            description: Some(self.description.into()),
            input_schema: Arc::new(self.input_schema()),
            annotations: Some(ToolAnnotations {
                read_only_hint: Some(self.kind.is_read_only()),
                destructive_hint: Some(self.kind.is_destructive()),
                open_world_hint: Some(true),
                ..Default::default()
            }),
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

// ============================================================================
// Catalogue
// ============================================================================

const EMAIL_ID: FieldContract =
    FieldContract::required("emailId", FieldType::String, "ID of the email address");
const MESSAGE_ID: FieldContract =
    FieldContract::required("messageId", FieldType::String, "ID of the message");
const CURSOR: FieldContract =
    FieldContract::optional("cursor", FieldType::String, "Pagination cursor (optional)");

static TOOLS: [ToolDescriptor; 9] = [
    ToolDescriptor {
        kind: ToolKind::GetEmailDomains,
        name: "get_email_domains",
        description: "List all email domains available for creating addresses",
        fields: &[],
    },
    ToolDescriptor {
        kind: ToolKind::CreateEmail,
        name: "create_email",
        description: "Create a new temporary email address",
        fields: &[
            FieldContract::required("name", FieldType::String, "Local part of the address"),
            FieldContract::required("domain", FieldType::String, "Domain of the address"),
            FieldContract::required(
                "expiryTime",
                FieldType::Number,
                "Expiry time in milliseconds. Allowed values: 3600000 (1 hour), \
                 86400000 (1 day), 259200000 (3 days), 0 (permanent)",
            )
            .one_of(EXPIRY_OPTIONS),
        ],
    },
    ToolDescriptor {
        kind: ToolKind::ListEmails,
        name: "list_emails",
        description: "List all email addresses owned by the account",
        fields: &[CURSOR],
    },
    ToolDescriptor {
        kind: ToolKind::DeleteEmail,
        name: "delete_email",
        description: "Delete an email address and all of its messages",
        fields: &[EMAIL_ID],
    },
    ToolDescriptor {
        kind: ToolKind::GetMessages,
        name: "get_messages",
        description: "List the messages received by an email address",
        fields: &[EMAIL_ID, CURSOR],
    },
    ToolDescriptor {
        kind: ToolKind::GetMessageDetail,
        name: "get_message_detail",
        description: "Get the full content of a message",
        fields: &[EMAIL_ID, MESSAGE_ID],
    },
    ToolDescriptor {
        kind: ToolKind::DeleteMessage,
        name: "delete_message",
        description: "Delete a message",
        fields: &[EMAIL_ID, MESSAGE_ID],
    },
    ToolDescriptor {
        kind: ToolKind::GetWebhookConfig,
        name: "get_webhook_config",
        description: "Get the current webhook configuration",
        fields: &[],
    },
    ToolDescriptor {
        kind: ToolKind::SetWebhookConfig,
        name: "set_webhook_config",
        description: "Set or update the webhook configuration",
        fields: &[
            FieldContract::required(
                "url",
                FieldType::String,
                "Webhook URL (must be a valid HTTP/HTTPS URL)",
            ),
            FieldContract::required("enabled", FieldType::Boolean, "Whether the webhook is enabled"),
        ],
    },
];

static TOOLS_BY_NAME: LazyLock<HashMap<&'static str, &'static ToolDescriptor>> =
    LazyLock::new(|| TOOLS.iter().map(|t| (t.name, t)).collect());

/// All tools, in catalogue order.
pub fn list_tools() -> &'static [ToolDescriptor] {
    &TOOLS
}

/// Look up a tool by its exact name.
pub fn find_tool(name: &str) -> Option<&'static ToolDescriptor> {
    TOOLS_BY_NAME.get(name).copied()
}

/// Get all tools as Tool models (metadata).
pub fn all_tools() -> Vec<Tool> {
    TOOLS.iter().map(ToolDescriptor::to_tool).collect()
}

/// Read a JSON number as a whole integer, accepting integral floats.
pub(crate) fn as_integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_catalogue_required_fields() {
        let expected: &[(&str, &[&str])] = &[
            ("get_email_domains", &[]),
            ("create_email", &["name", "domain", "expiryTime"]),
            ("list_emails", &[]),
            ("delete_email", &["emailId"]),
            ("get_messages", &["emailId"]),
            ("get_message_detail", &["emailId", "messageId"]),
            ("delete_message", &["emailId", "messageId"]),
            ("get_webhook_config", &[]),
            ("set_webhook_config", &["url", "enabled"]),
        ];

        let tools = list_tools();
        assert_eq!(tools.len(), expected.len());
        for (tool, (name, required)) in tools.iter().zip(expected) {
            assert_eq!(tool.name, *name);
            assert_eq!(tool.required_fields(), required.to_vec(), "tool {name}");
        }
    }

    #[test]
    fn test_names_are_unique_and_found() {
        for tool in list_tools() {
            let found = find_tool(tool.name).unwrap();
            assert_eq!(found.kind, tool.kind);
        }
        assert_eq!(TOOLS_BY_NAME.len(), TOOLS.len());
        assert!(find_tool("send_email").is_none());
        assert!(find_tool("CREATE_EMAIL").is_none());
    }

    #[test]
    fn test_optional_cursor_fields() {
        for name in ["list_emails", "get_messages"] {
            let cursor = find_tool(name).unwrap().field("cursor").unwrap();
            assert!(!cursor.required);
            assert_eq!(cursor.field_type, FieldType::String);
        }
    }

    #[test]
    fn test_expiry_schema_enum() {
        let schema = find_tool("create_email").unwrap().input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(
            schema["properties"]["expiryTime"]["enum"],
            json!([3600000, 86400000, 259200000, 0])
        );
        assert_eq!(schema["properties"]["expiryTime"]["type"], "number");
        assert_eq!(schema["required"], json!(["name", "domain", "expiryTime"]));
    }

    #[test]
    fn test_empty_contract_schema() {
        let schema = find_tool("get_webhook_config").unwrap().input_schema();
        assert_eq!(schema["properties"], json!({}));
        assert_eq!(schema["required"], json!([]));
    }

    #[test]
    fn test_to_tool_annotations() {
        let tool = find_tool("delete_email").unwrap().to_tool();
        assert_eq!(tool.name, "delete_email");
        let annotations = tool.annotations.unwrap();
        assert_eq!(annotations.destructive_hint, Some(true));
        assert_eq!(annotations.read_only_hint, Some(false));

        let tool = find_tool("get_messages").unwrap().to_tool();
        assert_eq!(tool.annotations.unwrap().read_only_hint, Some(true));
        assert_eq!(all_tools().len(), 9);
    }

    #[test]
    fn test_validate_missing_and_null() {
        let tool = find_tool("get_message_detail").unwrap();
        let err = tool.validate(&args(json!({"emailId": "e1"}))).unwrap_err();
        assert!(matches!(err, ToolError::MissingArgument(ref f) if f == "messageId"));

        let err = tool
            .validate(&args(json!({"emailId": null, "messageId": "m1"})))
            .unwrap_err();
        assert!(matches!(err, ToolError::MissingArgument(ref f) if f == "emailId"));
    }

    #[test]
    fn test_validate_types() {
        let tool = find_tool("set_webhook_config").unwrap();
        assert!(
            tool.validate(&args(json!({"url": "https://x/y", "enabled": true})))
                .is_ok()
        );
        let err = tool
            .validate(&args(json!({"url": "https://x/y", "enabled": "yes"})))
            .unwrap_err();
        assert!(err.to_string().contains("expected boolean, got string"));

        let tool = find_tool("create_email").unwrap();
        let err = tool
            .validate(&args(json!({"name": "a", "domain": "b.com", "expiryTime": 1.5})))
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument { .. }));
    }

    #[test]
    fn test_validate_optional_field_type() {
        let tool = find_tool("list_emails").unwrap();
        assert!(tool.validate(&JsonObject::new()).is_ok());
        assert!(tool.validate(&args(json!({"cursor": null}))).is_ok());
        assert!(tool.validate(&args(json!({"cursor": 5}))).is_err());
    }

    #[test]
    fn test_as_integer() {
        assert_eq!(as_integer(&json!(3600000)), Some(3600000));
        assert_eq!(as_integer(&json!(86400000.0)), Some(86400000));
        assert_eq!(as_integer(&json!(0.5)), None);
        assert_eq!(as_integer(&json!("1")), None);
    }
}
