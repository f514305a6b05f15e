use thiserror::Error;

/// Failure of a single backend call
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure: connection refused, DNS, reset, ...
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The body was not the JSON shape we expected
    #[error("invalid response body: {0}")]
    Parse(#[from] serde_json::Error),

    /// Non-2xx response, with the error text from the payload if any
    #[error("backend returned HTTP {status}")]
    Application { status: u16, message: Option<String> },
}

impl ApiError {
    /// Text suitable for the UI. Application errors show the backend's own
    /// message, or `fallback` when it sent none.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Application { message, .. } => message
                .clone()
                .unwrap_or_else(|| fallback.to_string()),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_uses_payload_or_fallback() {
        let err = ApiError::Application {
            status: 500,
            message: Some("LLM处理器未初始化".to_string()),
        };
        assert_eq!(err.user_message("测试失败"), "LLM处理器未初始化");

        let err = ApiError::Application {
            status: 502,
            message: None,
        };
        assert_eq!(err.user_message("测试失败"), "测试失败");
        assert_eq!(err.to_string(), "backend returned HTTP 502");
    }

    #[test]
    fn test_parse_error_message_is_descriptive() {
        let json_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = ApiError::from(json_err);
        assert!(err.user_message("unused").starts_with("invalid response body"));
    }
}
