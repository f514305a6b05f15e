//! Wire types for the backend JSON payloads

use serde::{Deserialize, Deserializer, Serialize};

/// Response of `GET /api/status`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SystemStatus {
    #[serde(default, deserialize_with = "null_as_false")]
    pub healthy: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub mcp_client: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub llm_processor: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub dingtalk_bot: bool,
    #[serde(default)]
    pub tools_count: Option<u64>,
    /// Set by the backend when building the status itself failed
    #[serde(default)]
    pub error: Option<String>,
}

/// `null` is falsy, like a missing field
fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

impl SystemStatus {
    pub fn tools_count(&self) -> u64 {
        self.tools_count.unwrap_or(0)
    }
}

/// One entry of `GET /api/tools`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tool {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub usage_count: Option<u64>,
}

impl Tool {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            usage_count: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Description if the backend sent a non-empty one
    pub fn description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|value| !value.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolsResponse {
    #[serde(default)]
    pub tools: Vec<Tool>,
}

/// Body of `POST /api/test`
#[derive(Debug, Clone, Serialize)]
pub struct TestRequest<'a> {
    pub message: &'a str,
}

/// Successful reply of `POST /api/test`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestReply {
    #[serde(default)]
    pub response: Option<String>,
}

/// Error payload sent with non-2xx responses.
///
/// The test endpoint documents `error`; the backend framework reports
/// `detail` for raised HTTP errors, which may be a string or a list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn message(self) -> Option<String> {
        self.error.filter(|e| !e.is_empty()).or_else(|| {
            self.detail
                .and_then(|detail| detail.as_str().map(str::to_string))
                .filter(|d| !d.is_empty())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_defaults_missing_fields() {
        let status: SystemStatus = serde_json::from_str(r#"{"healthy": true}"#).unwrap();
        assert!(status.healthy);
        assert!(!status.mcp_client);
        assert_eq!(status.tools_count(), 0);

        let status: SystemStatus =
            serde_json::from_str(r#"{"healthy": false, "tools_count": null, "timestamp": 1.5}"#)
                .unwrap();
        assert_eq!(status.tools_count(), 0);
    }

    #[test]
    fn test_status_null_flags_read_as_offline() {
        let status: SystemStatus = serde_json::from_str(
            r#"{"healthy": true, "mcp_client": null, "llm_processor": true, "dingtalk_bot": null}"#,
        )
        .unwrap();
        assert!(status.healthy);
        assert!(!status.mcp_client);
        assert!(status.llm_processor);
        assert!(!status.dingtalk_bot);
    }

    #[test]
    fn test_tool_description_treats_empty_as_missing() {
        let tools: ToolsResponse = serde_json::from_str(
            r#"{"tools": [{"name": "a", "description": ""}, {"name": "b", "description": "list pods", "parameters": {}}]}"#,
        )
        .unwrap();
        assert_eq!(tools.tools[0].description(), None);
        assert_eq!(tools.tools[1].description(), Some("list pods"));
    }

    #[test]
    fn test_tools_response_without_tools_key() {
        let tools: ToolsResponse = serde_json::from_str("{}").unwrap();
        assert!(tools.tools.is_empty());
    }

    #[test]
    fn test_error_body_prefers_error_over_detail() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error": "boom", "detail": "other"}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("boom"));

        let body: ErrorBody = serde_json::from_str(r#"{"detail": "消息不能为空"}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("消息不能为空"));

        let body: ErrorBody = serde_json::from_str(r#"{"detail": [{"loc": ["body"]}]}"#).unwrap();
        assert_eq!(body.message(), None);
    }
}
