//! Dispatch Gateway - routes one tool invocation to one API call.
//!
//! The gateway is the error boundary of the server: [`DispatchGateway::handle`]
//! always returns a `CallToolResult`, with `is_error` set when anything
//! failed. [`DispatchGateway::dispatch`] is the typed core it folds.

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::call::ToolCall;
use super::error::ToolError;
use super::registry::{all_tools, find_tool};
use crate::domains::api::ApiClient;

/// One request to execute a tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub name: String,
    #[serde(default)]
    pub arguments: JsonObject,
}

impl ToolInvocation {
    pub fn new(name: impl Into<String>, arguments: JsonObject) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// Validates invocations, issues the matching request and formats the reply.
pub struct DispatchGateway {
    client: Arc<dyn ApiClient>,
}

impl DispatchGateway {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self { client }
    }

    /// The full tool catalogue.
    pub fn list_tools(&self) -> Vec<Tool> {
        all_tools()
    }

    /// Handle an invocation, converting every failure into an error envelope.
    #[instrument(skip_all, fields(tool = %invocation.name))]
    pub async fn handle(&self, invocation: ToolInvocation) -> CallToolResult {
        match self.dispatch(&invocation).await {
            Ok(text) => {
                info!("Tool '{}' completed", invocation.name);
                CallToolResult::success(vec![Content::text(text)])
            }
            Err(e) => {
                warn!("Tool '{}' failed: {}", invocation.name, e);
                CallToolResult::error(vec![Content::text(format!("Error: {e}"))])
            }
        }
    }

    /// Validate, send and render. Validation failures never reach the network.
    pub async fn dispatch(&self, invocation: &ToolInvocation) -> Result<String, ToolError> {
        let descriptor =
            find_tool(&invocation.name).ok_or_else(|| ToolError::unknown_tool(&invocation.name))?;
        descriptor.validate(&invocation.arguments)?;

        let call = ToolCall::from_arguments(descriptor.kind, &invocation.arguments)?;
        let request = call.request();
        debug!("{} {}", request.method, request.path());

        let body = self.client.send(request).await?;
        call.render(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::api::HttpMethod;
    use crate::domains::api::testing::StubClient;
    use crate::domains::tools::format::{NO_MESSAGES, WEBHOOK_UPDATE_FAILED};
    use crate::domains::tools::registry::list_tools;
    use rmcp::model::RawContent;
    use serde_json::{Value, json};

    fn gateway(stub: &Arc<StubClient>) -> DispatchGateway {
        DispatchGateway::new(stub.clone())
    }

    fn invocation(name: &str, arguments: Value) -> ToolInvocation {
        ToolInvocation::new(name, arguments.as_object().cloned().unwrap())
    }

    fn text(result: &CallToolResult) -> &str {
        assert_eq!(result.content.len(), 1);
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    /// Arguments satisfying every required field of the tool.
    fn complete_arguments(name: &str) -> Value {
        match name {
            "create_email" => json!({"name": "a", "domain": "b.com", "expiryTime": 3600000}),
            "delete_email" | "get_messages" => json!({"emailId": "e1"}),
            "get_message_detail" | "delete_message" => json!({"emailId": "e1", "messageId": "m1"}),
            "set_webhook_config" => json!({"url": "https://x/y", "enabled": true}),
            _ => json!({}),
        }
    }

    #[tokio::test]
    async fn test_missing_required_argument_skips_network() {
        for tool in list_tools() {
            for field in tool.required_fields() {
                let stub = Arc::new(StubClient::json(json!({})));
                let mut args = complete_arguments(tool.name);
                args.as_object_mut().unwrap().remove(field);

                let result = gateway(&stub).handle(invocation(tool.name, args)).await;

                assert_eq!(result.is_error, Some(true), "{}: {}", tool.name, field);
                assert!(text(&result).contains("Missing required argument"));
                assert!(text(&result).contains(field));
                assert_eq!(stub.calls(), 0, "{} issued a request", tool.name);
            }
        }
    }

    #[tokio::test]
    async fn test_unknown_tool_skips_network() {
        let stub = Arc::new(StubClient::json(json!({})));
        let result = gateway(&stub)
            .handle(invocation("send_email", json!({})))
            .await;
        assert_eq!(result.is_error, Some(true));
        assert!(text(&result).contains("Unknown tool: send_email"));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_argument_type_skips_network() {
        let stub = Arc::new(StubClient::json(json!({})));
        let result = gateway(&stub)
            .handle(invocation("delete_email", json!({"emailId": 42})))
            .await;
        assert_eq!(result.is_error, Some(true));
        assert!(text(&result).contains("emailId"));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_create_email() {
        let stub = Arc::new(StubClient::json(json!({"id": "e1", "email": "a@b.com"})));
        let result = gateway(&stub)
            .handle(invocation(
                "create_email",
                json!({"name": "a", "domain": "b.com", "expiryTime": 3600000}),
            ))
            .await;

        assert_eq!(result.is_error, Some(false));
        let text = text(&result);
        assert!(text.contains("a@b.com"));
        assert!(text.contains("e1"));
        assert!(text.contains("1 hour"));

        let request = stub.last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path(), "/api/emails/generate");
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_messages() {
        let stub = Arc::new(StubClient::json(
            json!({"messages": [], "nextCursor": "", "total": 0}),
        ));
        let result = gateway(&stub)
            .handle(invocation("get_messages", json!({"emailId": "e1"})))
            .await;
        assert_eq!(result.is_error, Some(false));
        assert_eq!(text(&result), NO_MESSAGES);
    }

    #[tokio::test]
    async fn test_list_emails_cursor_line() {
        let page = |cursor: &str| {
            json!({
                "emails": [{
                    "id": "e1",
                    "address": "a@b.com",
                    "userId": "u1",
                    "createdAt": "2024-01-01T00:00:00.000Z",
                    "expiresAt": "2024-01-02T00:00:00.000Z"
                }],
                "nextCursor": cursor,
                "total": 1
            })
        };

        let stub = Arc::new(StubClient::json(page("c2")));
        let result = gateway(&stub)
            .handle(invocation("list_emails", json!({})))
            .await;
        assert!(text(&result).contains("next page cursor: c2"));

        let stub = Arc::new(StubClient::json(page("")));
        let result = gateway(&stub)
            .handle(invocation("list_emails", json!({})))
            .await;
        assert!(!text(&result).contains("next page cursor"));
    }

    #[tokio::test]
    async fn test_cursor_forwarded_as_query() {
        let stub = Arc::new(StubClient::json(json!({"messages": [], "total": 0})));
        gateway(&stub)
            .handle(invocation("get_messages", json!({"emailId": "e1", "cursor": "abc"})))
            .await;
        assert_eq!(stub.last_request().unwrap().path(), "/api/emails/e1?cursor=abc");
    }

    #[tokio::test]
    async fn test_upstream_500_is_error_envelope() {
        let stub = Arc::new(StubClient::status(500, "Internal Server Error", "oops"));
        let gateway = gateway(&stub);

        for tool in list_tools() {
            let first = gateway
                .handle(invocation(tool.name, complete_arguments(tool.name)))
                .await;
            let second = gateway
                .handle(invocation(tool.name, complete_arguments(tool.name)))
                .await;

            assert_eq!(first.is_error, Some(true), "{}", tool.name);
            assert!(text(&first).contains("500"), "{}", tool.name);
            assert_eq!(text(&first), text(&second));
        }
        assert_eq!(stub.calls(), list_tools().len() * 2);
    }

    #[tokio::test]
    async fn test_transport_failure_is_error_envelope() {
        let stub = Arc::new(StubClient::transport_failure("Connection failed"));
        let result = gateway(&stub)
            .handle(invocation("get_webhook_config", json!({})))
            .await;
        assert_eq!(result.is_error, Some(true));
        assert!(text(&result).contains("Connection failed"));
    }

    #[tokio::test]
    async fn test_set_webhook_config() {
        let args = json!({"url": "https://x/y", "enabled": true});

        let stub = Arc::new(StubClient::json(json!({"success": true})));
        let result = gateway(&stub)
            .handle(invocation("set_webhook_config", args.clone()))
            .await;
        assert_eq!(result.is_error, Some(false));
        assert!(text(&result).contains("https://x/y"));
        assert!(text(&result).contains("enabled"));

        let stub = Arc::new(StubClient::json(json!({"success": false})));
        let result = gateway(&stub)
            .handle(invocation("set_webhook_config", args))
            .await;
        assert_eq!(result.is_error, Some(false));
        assert_eq!(text(&result), WEBHOOK_UPDATE_FAILED);
    }

    #[tokio::test]
    async fn test_delete_failure_is_business_outcome() {
        let stub = Arc::new(StubClient::json(json!({"success": false})));
        let result = gateway(&stub)
            .handle(invocation("delete_email", json!({"emailId": "e1"})))
            .await;
        assert_eq!(result.is_error, Some(false));
        assert_eq!(text(&result), "Failed to delete email e1");
    }

    #[tokio::test]
    async fn test_dot_and_empty_ids_skip_network() {
        let cases = [
            ("delete_message", json!({"emailId": "e1", "messageId": ".."})),
            ("delete_message", json!({"emailId": "e1", "messageId": "."})),
            ("get_message_detail", json!({"emailId": "..", "messageId": "m1"})),
            ("delete_email", json!({"emailId": ".."})),
            ("delete_email", json!({"emailId": ""})),
            ("get_messages", json!({"emailId": ""})),
        ];
        for (name, args) in cases {
            let stub = Arc::new(StubClient::json(json!({"success": true})));
            let result = gateway(&stub).handle(invocation(name, args.clone())).await;
            assert_eq!(result.is_error, Some(true), "{name} {args}");
            assert!(text(&result).contains("Invalid argument"), "{name} {args}");
            assert_eq!(stub.calls(), 0, "{name} {args}");
        }
    }

    #[tokio::test]
    async fn test_unset_webhook_url_renders_placeholder() {
        let stub = Arc::new(StubClient::json(json!({"url": null, "enabled": false})));
        let result = gateway(&stub)
            .handle(invocation("get_webhook_config", json!({})))
            .await;
        assert_eq!(result.is_error, Some(false));
        assert!(text(&result).contains("URL: (not set)"));
        assert!(text(&result).contains("disabled"));
    }

    #[tokio::test]
    async fn test_messages_with_null_subject_and_float_timestamp() {
        let stub = Arc::new(StubClient::json(json!({
            "messages": [{
                "id": "m1",
                "from_address": "x@y.com",
                "subject": null,
                "received_at": 1_700_000_000_000.0
            }],
            "total": 1
        })));
        let result = gateway(&stub)
            .handle(invocation("get_messages", json!({"emailId": "e1"})))
            .await;
        assert_eq!(result.is_error, Some(false));
        assert!(text(&result).contains("Message ID: m1"));

        let stub = Arc::new(StubClient::json(json!({
            "message": {
                "id": "m1",
                "from_address": "x@y.com",
                "subject": null,
                "received_at": 1_700_000_000_000.0
            }
        })));
        let result = gateway(&stub)
            .handle(invocation(
                "get_message_detail",
                json!({"emailId": "e1", "messageId": "m1"}),
            ))
            .await;
        assert_eq!(result.is_error, Some(false));
        assert!(text(&result).contains("(no content)"));
    }

    #[tokio::test]
    async fn test_malformed_reply_is_error_envelope() {
        let stub = Arc::new(StubClient::json(json!({"unexpected": true})));
        let result = gateway(&stub)
            .handle(invocation("get_email_domains", json!({})))
            .await;
        assert_eq!(result.is_error, Some(true));
        assert!(text(&result).contains("Unexpected response"));
    }

    #[tokio::test]
    async fn test_dispatch_reports_typed_errors() {
        let stub = Arc::new(StubClient::json(json!({})));
        let err = gateway(&stub)
            .dispatch(&invocation("delete_message", json!({"emailId": "e1"})))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::MissingArgument(ref f) if f == "messageId"));
    }

    #[test]
    fn test_list_tools() {
        let stub = Arc::new(StubClient::json(json!({})));
        let names: Vec<_> = gateway(&stub)
            .list_tools()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        assert_eq!(
            names,
            [
                "get_email_domains",
                "create_email",
                "list_emails",
                "delete_email",
                "get_messages",
                "get_message_detail",
                "delete_message",
                "get_webhook_config",
                "set_webhook_config",
            ]
        );
    }
}
