//! Analysis route handlers.

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use tracescan_core::model::DEFAULT_MIME_TYPE;
use tracescan_core::{AnalysisResult, ImageInput};
use tracing::warn;

use crate::state::AppState;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    #[serde(alias = "mimeType")]
    pub mime_type: String,
    /// Base64 payload or `data:` URL.
    #[serde(alias = "base64")]
    pub data: String,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

/// POST /api/analyze - JSON body with base64 image data.
pub async fn analyze_json(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(req) = payload.map_err(|r| {
        warn!(error = %r, "Rejected request body");
        let status = match r.status() {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        api_error(status, r.body_text())
    })?;

    let image = ImageInput::from_base64(&req.data, req.mime_type).map_err(|e| {
        warn!(error = %e, "Rejected image payload");
        api_error(StatusCode::BAD_REQUEST, e.to_string())
    })?;

    run(&state, image).await
}

/// POST /api/analyze/raw - raw image bytes, MIME type from `Content-Type`.
pub async fn analyze_raw(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<AnalysisResult>, ApiError> {
    let mime_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.split(';').next().unwrap_or(s).trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());

    run(&state, ImageInput::new(body.to_vec(), mime_type)).await
}

async fn run(state: &AppState, image: ImageInput) -> Result<Json<AnalysisResult>, ApiError> {
    state
        .analyzer
        .analyze(&image)
        .await
        .map(Json)
        .map_err(|e| api_error(StatusCode::BAD_GATEWAY, e.message()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;
    use tracescan_core::{
        Citation, GroundedRequest, GroundedResponse, GroundedSearch, Locale, PresenceAnalyzer,
        UpstreamError,
    };

    use crate::create_router;
    use crate::state::AppState;

    /// Reports the MIME type and size it received as the description.
    struct EchoSearch;

    #[async_trait]
    impl GroundedSearch for EchoSearch {
        async fn generate(&self, request: &GroundedRequest<'_>) -> Result<GroundedResponse, UpstreamError> {
            Ok(GroundedResponse {
                text: Some(format!("{} {}", request.image.mime_type, request.image.bytes.len())),
                citations: vec![
                    Citation::web("https://www.facebook.com/somepage", None),
                    Citation::web("https://example.com", Some("Example".to_string())),
                ],
            })
        }

        fn provider_name(&self) -> &str {
            "echo"
        }
    }

    struct DownSearch;

    #[async_trait]
    impl GroundedSearch for DownSearch {
        async fn generate(&self, _request: &GroundedRequest<'_>) -> Result<GroundedResponse, UpstreamError> {
            Err(UpstreamError::Status {
                status: 429,
                body: "quota exceeded".to_string(),
            })
        }

        fn provider_name(&self) -> &str {
            "down"
        }
    }

    fn app(search: Arc<dyn GroundedSearch>) -> axum::Router {
        let analyzer = PresenceAnalyzer::new(search, Locale::English);
        create_router(AppState::new(analyzer), 1024)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(Arc::new(EchoSearch))
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_analyze_json() {
        let response = app(Arc::new(EchoSearch))
            .oneshot(json_request(
                "/api/analyze",
                r#"{"mime_type": "image/png", "data": "aGVsbG8="}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["description"], "image/png 5");
        let matches = json["matches"].as_array().unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["url"], "https://www.facebook.com/somepage");
        assert_eq!(matches[0]["title"], Locale::English.placeholder_title());
    }

    #[tokio::test]
    async fn test_analyze_json_camel_case_data_url() {
        let response = app(Arc::new(EchoSearch))
            .oneshot(json_request(
                "/api/analyze",
                r#"{"mimeType": "image/jpeg", "data": "data:image/jpeg;base64,aGk="}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["description"], "image/jpeg 2");
    }

    #[tokio::test]
    async fn test_analyze_json_bad_base64() {
        let response = app(Arc::new(EchoSearch))
            .oneshot(json_request(
                "/api/analyze",
                r#"{"mime_type": "image/png", "data": "%%%"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_analyze_json_missing_field() {
        let response = app(Arc::new(EchoSearch))
            .oneshot(json_request("/api/analyze", r#"{"mime_type": "image/png"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = body_json(response).await["error"].as_str().unwrap().to_string();
        assert!(error.contains("data"));
    }

    #[tokio::test]
    async fn test_analyze_json_not_json() {
        let response = app(Arc::new(EchoSearch))
            .oneshot(json_request("/api/analyze", "not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_analyze_raw_uses_content_type() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze/raw")
            .header("content-type", "image/webp; charset=binary")
            .body(Body::from(vec![1u8, 2, 3]))
            .unwrap();
        let response = app(Arc::new(EchoSearch)).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["description"], "image/webp 3");
    }

    #[tokio::test]
    async fn test_analyze_raw_defaults_to_jpeg() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze/raw")
            .body(Body::from(vec![1u8]))
            .unwrap();
        let response = app(Arc::new(EchoSearch)).oneshot(request).await.unwrap();
        assert_eq!(body_json(response).await["description"], "image/jpeg 1");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_single_message() {
        let response = app(Arc::new(DownSearch))
            .oneshot(json_request(
                "/api/analyze",
                r#"{"mime_type": "image/png", "data": "aGVsbG8="}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let json = body_json(response).await;
        assert_eq!(json["error"], Locale::English.failure_message());
        assert!(json.get("matches").is_none());
    }

    #[tokio::test]
    async fn test_body_limit() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze/raw")
            .header("content-type", "image/png")
            .body(Body::from(vec![0u8; 4096]))
            .unwrap();
        let response = app(Arc::new(EchoSearch)).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
