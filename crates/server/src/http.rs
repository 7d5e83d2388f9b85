//! HTTP endpoints

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use meeting_core::{Error, ParseOutcome};

use crate::state::AppState;
use crate::stt::guess_content_type;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.settings.server.cors_origins);
    let body_limit = DefaultBodyLimit::max(state.settings.server.max_upload_bytes);

    Router::new()
        .route("/api/parse-meeting", post(parse_meeting))
        .route("/api/speech-to-text", post(speech_to_text))
        .route("/health", get(health))
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Mobile clients ship without a stable origin, so an empty allow-list
/// means permissive CORS rather than none.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[derive(Debug, Deserialize)]
struct ParseRequest {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct TranscriptResponse {
    success: bool,
    text: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::ExtractionTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Error::Transcription(detail) if detail.contains("timed out") => {
                StatusCode::GATEWAY_TIMEOUT
            }
            Error::Extraction(_) | Error::Transcription(_) | Error::MalformedPayload(_) => {
                StatusCode::BAD_GATEWAY
            }
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

async fn parse_meeting(
    State(state): State<AppState>,
    Json(request): Json<ParseRequest>,
) -> Result<Json<ParseOutcome>, ApiError> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(ApiError::bad_request("text is required"));
    }

    let request_id = uuid::Uuid::new_v4();
    tracing::info!(%request_id, chars = text.chars().count(), "parse request");

    let outcome = state.pipeline.parse(text).await;
    tracing::info!(%request_id, success = outcome.success, "parse complete");
    Ok(Json(outcome))
}

async fn speech_to_text(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let mut upload: Option<(Vec<u8>, String, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(&e.to_string()))?
    {
        if !matches!(field.name(), Some("file") | Some("audio")) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("audio.wav").to_string();
        // Mobile clients tend to send octet-stream; the extension knows better
        let content_type = match field.content_type() {
            Some(ct) if ct != "application/octet-stream" => ct.to_string(),
            _ => guess_content_type(&file_name).to_string(),
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(&e.to_string()))?;
        upload = Some((bytes.to_vec(), file_name, content_type));
        break;
    }

    let Some((audio, file_name, content_type)) = upload else {
        return Err(ApiError::bad_request("audio file is required"));
    };
    if audio.is_empty() {
        return Err(ApiError::bad_request("audio file is empty"));
    }

    tracing::info!(file = %file_name, bytes = audio.len(), "transcription request");
    let text = state
        .transcriber
        .transcribe(audio, &file_name, &content_type)
        .await?;
    Ok(Json(TranscriptResponse {
        success: true,
        text,
    }))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use meeting_config::Settings;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let state = AppState::new(Settings::default()).unwrap();
        create_router(state)
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = test_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let payload: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload["status"], "ok");
    }

    #[tokio::test]
    async fn parse_rejects_empty_text() {
        let request = Request::post("/api/parse-meeting")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"text":"   "}"#))
            .unwrap();
        let response = test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn speech_to_text_requires_a_file() {
        let request = Request::post("/api/speech-to-text")
            .header("content-type", "multipart/form-data; boundary=x")
            .body(Body::from("--x--\r\n"))
            .unwrap();
        let response = test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn error_statuses() {
        let timeout: ApiError = Error::ExtractionTimeout(30).into();
        assert_eq!(timeout.status, StatusCode::GATEWAY_TIMEOUT);

        let stt_timeout: ApiError = Error::Transcription("request timed out".to_string()).into();
        assert_eq!(stt_timeout.status, StatusCode::GATEWAY_TIMEOUT);

        let upstream: ApiError = Error::Extraction("boom".to_string()).into();
        assert_eq!(upstream.status, StatusCode::BAD_GATEWAY);
    }
}
