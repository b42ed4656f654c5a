use axum::body::Body;
use http::HeaderName;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::TtsError;

/// Header carrying the caller's request id, echoed back on responses
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Per-call context for synthesis requests
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Caller-supplied `x-request-id`, or a fresh UUID
    pub request_id: String,
}

impl RequestContext {
    fn from_headers(headers: &http::HeaderMap) -> Self {
        let request_id = headers
            .get(&REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map_or_else(|| Uuid::new_v4().to_string(), str::to_string);

        Self { request_id }
    }
}

/// Extractor for JSON request bodies
pub struct ExtractPayload<T>(pub RequestContext, pub T);

/// Body limit for synthesis requests (1 MiB)
const BODY_LIMIT_BYTES: usize = 1 << 20;

fn is_json(headers: &http::HeaderMap) -> bool {
    headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}

impl<S, T: DeserializeOwned> axum::extract::FromRequest<S> for ExtractPayload<T>
where
    S: Send + Sync,
{
    type Rejection = TtsError;

    async fn from_request(request: http::Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();

        if !is_json(&parts.headers) {
            return Err(TtsError::UnsupportedMediaType(
                "Unsupported Content-Type, expected: 'Content-Type: application/json'".to_string(),
            ));
        }

        let bytes = axum::body::to_bytes(body, BODY_LIMIT_BYTES).await.map_err(|err| {
            if std::error::Error::source(&err).is_some_and(|source| source.is::<http_body_util::LengthLimitError>()) {
                TtsError::PayloadTooLarge(format!("Request body is too large, limit is {BODY_LIMIT_BYTES} bytes"))
            } else {
                TtsError::InvalidRequest(format!("Failed to read request body: {err}"))
            }
        })?;

        let payload = serde_json::from_slice::<T>(&bytes)
            .map_err(|e| TtsError::InvalidRequest(format!("Failed to parse request body: {e}")))?;

        Ok(Self(RequestContext::from_headers(&parts.headers), payload))
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::FromRequest;

    use super::*;
    use crate::types::SynthesisRequest;

    fn request(content_type: Option<&str>, body: impl Into<Body>) -> http::Request<Body> {
        let mut builder = http::Request::builder().method("POST").uri("/synthesize");
        if let Some(content_type) = content_type {
            builder = builder.header(http::header::CONTENT_TYPE, content_type);
        }
        builder.body(body.into()).unwrap()
    }

    async fn extract(request: http::Request<Body>) -> Result<ExtractPayload<SynthesisRequest>, TtsError> {
        ExtractPayload::<SynthesisRequest>::from_request(request, &()).await
    }

    #[tokio::test]
    async fn parses_json_body() {
        let ExtractPayload(context, payload) = extract(request(
            Some("application/json"),
            r#"{"text":"Hello","language":"ta","accent_id":2}"#,
        ))
        .await
        .unwrap();

        assert_eq!(payload.language, "ta");
        assert_eq!(payload.accent_id, 2);
        assert!(Uuid::parse_str(&context.request_id).is_ok());
    }

    #[tokio::test]
    async fn accepts_charset_parameter() {
        let result = extract(request(Some("Application/JSON; charset=utf-8"), r#"{"text":"x"}"#)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn keeps_caller_request_id() {
        let mut req = request(Some("application/json"), r#"{"text":"x"}"#);
        req.headers_mut()
            .insert(&REQUEST_ID_HEADER, http::HeaderValue::from_static("req-42"));

        let ExtractPayload(context, _) = extract(req).await.unwrap();
        assert_eq!(context.request_id, "req-42");
    }

    #[tokio::test]
    async fn rejects_missing_content_type() {
        let result = extract(request(None, r#"{"text":"x"}"#)).await;
        assert!(matches!(result, Err(TtsError::UnsupportedMediaType(_))));
    }

    #[tokio::test]
    async fn rejects_malformed_json() {
        let result = extract(request(Some("application/json"), "{not json")).await;
        assert!(matches!(result, Err(TtsError::InvalidRequest(message)) if message.starts_with("Failed to parse")));
    }

    #[tokio::test]
    async fn rejects_oversized_body() {
        let body = format!(r#"{{"text":"{}"}}"#, "a".repeat(BODY_LIMIT_BYTES));
        let result = extract(request(Some("application/json"), body)).await;
        assert!(matches!(result, Err(TtsError::PayloadTooLarge(_))));
    }
}
