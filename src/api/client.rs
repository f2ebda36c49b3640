//! HTTP client for the travel booking backend.

use std::time::Duration;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{ApiOutcome, RawEnvelope};
use crate::errors::AppError;
use crate::forms::FormPayload;

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Authenticated client. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: Option<HeaderValue>,
}

impl ApiClient {
    /// Create a client for `base_url`, sending `token` as a bearer token when
    /// present.
    pub fn new(base_url: &str, token: Option<&str>, timeout: Duration) -> Result<Self, AppError> {
        let auth_header = token
            .map(|t| {
                HeaderValue::from_str(&format!("Bearer {}", t))
                    .map_err(|e| AppError::BadRequest(format!("Invalid token format: {}", e)))
            })
            .transpose()?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_header.is_some()
    }

    fn request(&self, method: Method, path: &str) -> (RequestBuilder, String) {
        let url = format!("{}{}", self.base_url, path);
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(%request_id, %method, %url, "backend request");

        let mut builder = self
            .client
            .request(method, &url)
            .header(REQUEST_ID_HEADER, &request_id);
        if let Some(auth) = &self.auth_header {
            builder = builder.header(AUTHORIZATION, auth.clone());
        }
        (builder, request_id)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<ApiOutcome<T>, AppError> {
        let (builder, request_id) = self.request(Method::GET, path);
        self.execute(builder.query(query), &request_id).await
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiOutcome<T>, AppError> {
        self.send_json(Method::POST, path, body).await
    }

    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiOutcome<T>, AppError> {
        self.send_json(Method::PUT, path, body).await
    }

    pub async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiOutcome<T>, AppError> {
        self.send_json(Method::PATCH, path, body).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<ApiOutcome<T>, AppError> {
        let (builder, request_id) = self.request(Method::DELETE, path);
        self.execute(builder, &request_id).await
    }

    /// Send a multipart form. `method` is POST for creates, PUT or PATCH for
    /// updates depending on the feature.
    pub async fn send_multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: FormPayload,
    ) -> Result<ApiOutcome<T>, AppError> {
        tracing::debug!(
            fields = payload.fields().len(),
            files = payload.files().len(),
            "multipart payload for {}",
            path
        );
        let form = payload.into_multipart()?;
        let (builder, request_id) = self.request(method, path);
        self.execute(builder.multipart(form), &request_id).await
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<ApiOutcome<T>, AppError> {
        let (builder, request_id) = self.request(method, path);
        self.execute(builder.json(body), &request_id).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        request_id: &str,
    ) -> Result<ApiOutcome<T>, AppError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(%request_id, status = status.as_u16(), "backend response");

        parse_response(status, &body)
    }
}

/// Map status + body onto an outcome. 401 and 404 become typed errors; other
/// non-2xx answers are failures carrying the backend's message.
pub(crate) fn parse_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> Result<ApiOutcome<T>, AppError> {
    if !status.is_success() {
        let message = serde_json::from_str::<RawEnvelope<serde_json::Value>>(body)
            .ok()
            .and_then(|env| env.message)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

        return match status {
            StatusCode::UNAUTHORIZED => Err(AppError::Unauthorized(message)),
            StatusCode::NOT_FOUND => Err(AppError::NotFound(message)),
            _ => Ok(ApiOutcome::Failure { message }),
        };
    }

    let raw: RawEnvelope<T> = serde_json::from_str(body).map_err(|e| {
        AppError::Decode(format!(
            "Failed to parse response: {} - {}",
            e,
            body.chars().take(200).collect::<String>()
        ))
    })?;

    Ok(ApiOutcome::from_envelope(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_success_statuses() {
        let err = parse_response::<()>(StatusCode::UNAUTHORIZED, r#"{"message":"jwt expired"}"#)
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(ref m) if m == "jwt expired"));

        let err = parse_response::<()>(StatusCode::NOT_FOUND, "<html>").unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "HTTP 404"));

        let outcome = parse_response::<()>(
            StatusCode::BAD_REQUEST,
            r#"{"status":false,"message":"Code already exists"}"#,
        )
        .unwrap();
        assert!(matches!(
            outcome,
            ApiOutcome::Failure { ref message } if message == "Code already exists"
        ));
    }

    #[test]
    fn test_garbage_body_on_success_is_decode_error() {
        let err = parse_response::<Vec<String>>(StatusCode::OK, "not json").unwrap_err();
        assert_eq!(err.error_code(), "DECODE_ERROR");
    }

    #[test]
    fn test_invalid_token_rejected() {
        let err =
            ApiClient::new("http://x", Some("bad\ntoken"), Duration::from_secs(1)).unwrap_err();
        assert_eq!(err.error_code(), "BAD_REQUEST");
    }
}
