//! HTTP API server for integration with other systems.
//!
//! A thin adapter over the acquirer: it validates the outer request shape,
//! calls into the core, and translates the failure taxonomy to HTTP status
//! codes. The failure JSON carries `{code, message, suggestion}` verbatim so
//! a UI can render localized, actionable messaging.

use crate::acquire::Acquirer;
use crate::cli::Output;
use crate::config::Settings;
use crate::error::{AcquisitionFailure, FailureCode};
use crate::export::TranscriptExport;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state.
struct AppState {
    acquirer: Acquirer,
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let acquirer = Acquirer::from_settings(&settings)?;

    let state = Arc::new(AppState { acquirer });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/transcript", post(transcript))
        .route("/tracks", post(tracks))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Tekst API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Transcript", "POST /transcript");
    Output::kv("Tracks", "POST /tracks");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct TranscriptRequest {
    /// YouTube video URL
    url: String,
    /// Preferred caption language code
    #[serde(default)]
    language: Option<String>,
}

/// Map a failure code to the HTTP status the adapter responds with.
fn status_for(code: FailureCode) -> StatusCode {
    match code {
        FailureCode::InvalidInput => StatusCode::BAD_REQUEST,
        FailureCode::NoCaptionsAvailable => StatusCode::NOT_FOUND,
        FailureCode::Timeout => StatusCode::GATEWAY_TIMEOUT,
        FailureCode::ParseFailure | FailureCode::UpstreamRequestError => StatusCode::BAD_GATEWAY,
    }
}

/// Validate the outer request shape before calling into the core.
///
/// The core still extracts the video ID itself; this only rejects requests
/// that are not well-formed at the transport boundary.
fn validate_request(req: &TranscriptRequest) -> Option<AcquisitionFailure> {
    if url::Url::parse(&req.url).is_err() {
        return Some(AcquisitionFailure::new(
            FailureCode::InvalidInput,
            format!("'{}' is not a well-formed URL", req.url),
            "Send an absolute URL, e.g. https://www.youtube.com/watch?v=...",
        ));
    }
    if let Some(lang) = &req.language {
        let plausible = !lang.is_empty()
            && lang.len() <= 16
            && lang.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !plausible {
            return Some(AcquisitionFailure::new(
                FailureCode::InvalidInput,
                format!("'{}' is not a valid language code", lang),
                "Use a short code such as \"en\" or \"pt-BR\".",
            ));
        }
    }
    None
}

fn failure_response(failure: AcquisitionFailure) -> axum::response::Response {
    (status_for(failure.code), Json(failure)).into_response()
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn transcript(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TranscriptRequest>,
) -> impl IntoResponse {
    if let Some(failure) = validate_request(&req) {
        return failure_response(failure);
    }

    match state.acquirer.acquire(&req.url, req.language.as_deref()).await {
        Ok(transcript) => Json(TranscriptExport::from(&transcript)).into_response(),
        Err(failure) => failure_response(failure),
    }
}

async fn tracks(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TranscriptRequest>,
) -> impl IntoResponse {
    if let Some(failure) = validate_request(&req) {
        return failure_response(failure);
    }

    match state.acquirer.discover_tracks(&req.url).await {
        Ok(tracks) => Json(serde_json::json!({ "tracks": tracks })).into_response(),
        Err(failure) => failure_response(failure),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_is_total() {
        assert_eq!(status_for(FailureCode::InvalidInput), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(FailureCode::NoCaptionsAvailable), StatusCode::NOT_FOUND);
        assert_eq!(status_for(FailureCode::Timeout), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(status_for(FailureCode::ParseFailure), StatusCode::BAD_GATEWAY);
        assert_eq!(status_for(FailureCode::UpstreamRequestError), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_validate_rejects_malformed_url() {
        let req = TranscriptRequest {
            url: "not a url".to_string(),
            language: None,
        };
        let failure = validate_request(&req).unwrap();
        assert_eq!(failure.code, FailureCode::InvalidInput);
    }

    #[test]
    fn test_validate_rejects_bad_language_code() {
        let req = TranscriptRequest {
            url: "https://youtu.be/abc123".to_string(),
            language: Some("english language please".to_string()),
        };
        assert!(validate_request(&req).is_some());
    }

    #[test]
    fn test_validate_accepts_well_formed_request() {
        let req = TranscriptRequest {
            url: "https://www.youtube.com/watch?v=abc123".to_string(),
            language: Some("pt-BR".to_string()),
        };
        assert!(validate_request(&req).is_none());
    }
}
