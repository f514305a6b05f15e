//! reqwest client for the bot backend

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::endpoints;
use super::error::ApiError;
use super::types::{ErrorBody, SystemStatus, TestReply, TestRequest, Tool, ToolsResponse};

/// Operations the dashboard needs from the backend.
///
/// The async worker only talks to this trait, so it can be driven by the
/// real HTTP client or by an in-process double.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /api/status`
    async fn status(&self) -> Result<SystemStatus, ApiError>;

    /// `GET /api/tools`, in server order
    async fn tools(&self) -> Result<Vec<Tool>, ApiError>;

    /// `POST /api/test`; returns the `response` text if the backend sent one
    async fn send_test(&self, message: &str) -> Result<Option<String>, ApiError>;
}

/// HTTP implementation of [`Backend`]
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base: String,
}

impl BackendClient {
    /// Create a client for `base` (e.g. `http://127.0.0.1:8000`).
    /// An empty base means same-origin paths, which only makes sense in tests.
    pub fn new(base: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_http(http, base))
    }

    pub fn with_http(http: reqwest::Client, base: impl Into<String>) -> Self {
        let base = base.into().trim().trim_end_matches('/').to_string();
        Self { http, base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(application_error(status, &body));
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

fn application_error(status: StatusCode, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::message);
    ApiError::Application {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl Backend for BackendClient {
    async fn status(&self) -> Result<SystemStatus, ApiError> {
        self.get_json(endpoints::STATUS).await
    }

    async fn tools(&self) -> Result<Vec<Tool>, ApiError> {
        let response: ToolsResponse = self.get_json(endpoints::TOOLS).await?;
        Ok(response.tools)
    }

    async fn send_test(&self, message: &str) -> Result<Option<String>, ApiError> {
        let url = self.url(endpoints::TEST);
        tracing::debug!(%url, len = message.len(), "POST");
        let response = self
            .http
            .post(&url)
            .json(&TestRequest { message })
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;

        // The body must be JSON on both paths; a non-JSON error page is a
        // parse failure, not an application error.
        if status.is_success() {
            let reply: TestReply = serde_json::from_slice(&body)?;
            Ok(reply.response)
        } else {
            let payload: ErrorBody = serde_json::from_slice(&body)?;
            Err(ApiError::Application {
                status: status.as_u16(),
                message: payload.message(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_and_path() {
        let client = BackendClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base(), "http://localhost:8000");
        assert_eq!(
            client.url(endpoints::STATUS),
            "http://localhost:8000/api/status"
        );
    }

    #[test]
    fn test_application_error_reads_payload() {
        let err = application_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"detail": "获取工具列表失败: boom"}"#.as_bytes(),
        );
        match err {
            ApiError::Application { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message.as_deref(), Some("获取工具列表失败: boom"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = application_error(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>");
        assert!(matches!(
            err,
            ApiError::Application {
                status: 502,
                message: None
            }
        ));
    }
}
