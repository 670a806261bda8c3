//! Inbound HTTP adapter.
//!
//! Thin layer over the application services: validation and JSON mapping
//! only, no pipeline logic.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::adapters::ffmpeg::FfmpegRenderer;
use crate::adapters::whisper::WhisperTranscriber;
use crate::adapters::ytdlp::YtDlpFetcher;
use crate::application::runner::JobRunner;
use crate::domain::jobs::{ClipRequest, JobRecord, JobStatus};
use crate::domain::markers::parse_markers;
use crate::domain::profiles::RenderProfile;

/// Runner wired with the real external tools.
pub type AppRunner = JobRunner<YtDlpFetcher, WhisperTranscriber, FfmpegRenderer>;

#[derive(Clone)]
pub struct AppState {
    pub runner: Arc<AppRunner>,
    pub work_dir: PathBuf,
}

type ApiError = (StatusCode, Json<Value>);

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/extract-clips", post(extract_clips))
        .route("/api/progress/:task_id", get(progress))
        .route("/api/download/:task_id", get(download))
        .route("/api/health", get(health))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct ExtractClipsBody {
    #[serde(default)]
    pub video_url: String,
    #[serde(default)]
    pub timestamps_input: String,
    #[serde(default = "default_clip_duration")]
    pub clip_duration: u64,
    #[serde(default)]
    pub profiles: Vec<String>,
    #[serde(default)]
    pub captions: bool,
}

fn default_clip_duration() -> u64 {
    60
}

/// Validate a submission and turn it into a [`ClipRequest`].
///
/// Rejections here mean no job record is ever created.
fn build_request(body: &ExtractClipsBody) -> Result<ClipRequest, String> {
    let source_url = body.video_url.trim();
    let raw_markers = body.timestamps_input.trim();

    if source_url.is_empty() || raw_markers.is_empty() {
        return Err("video_url and timestamps_input are required".to_string());
    }
    if body.clip_duration == 0 {
        return Err("clip_duration must be positive".to_string());
    }

    let markers = parse_markers(raw_markers);
    if markers.is_empty() {
        return Err("No valid markers found".to_string());
    }

    let mut profiles = RenderProfile::parse_list(&body.profiles);
    if profiles.is_empty() {
        profiles = vec![RenderProfile::Horizontal];
    }

    Ok(ClipRequest {
        source_url: source_url.to_string(),
        markers,
        clip_duration: body.clip_duration,
        profiles,
        captions: body.captions,
    })
}

fn bad_request(message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "success": false, "error": message })),
    )
}

fn not_found(message: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "error": message })),
    )
}

async fn extract_clips(
    State(state): State<AppState>,
    Json(body): Json<ExtractClipsBody>,
) -> Result<Json<Value>, ApiError> {
    let request = build_request(&body).map_err(|e| bad_request(&e))?;
    let task_id = state.runner.submit(request);

    Ok(Json(json!({
        "success": true,
        "task_id": task_id,
        "message": "Extraction started",
    })))
}

async fn progress(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<JobRecord>, ApiError> {
    state
        .runner
        .store()
        .get(&task_id)
        .map(Json)
        .ok_or_else(|| not_found("Task not found"))
}

async fn download(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Response, ApiError> {
    let record = state
        .runner
        .store()
        .get(&task_id)
        .ok_or_else(|| not_found("Results not found"))?;

    if record.status != JobStatus::Completed {
        return Err(not_found("Results not found"));
    }

    let zip_path = record
        .result
        .and_then(|r| r.zip_path)
        .ok_or_else(|| not_found("No file to download"))?;

    let file = tokio::fs::File::open(&zip_path)
        .await
        .map_err(|_| not_found("File not found"))?;

    let filename = zip_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("clips.zip"));

    Response::builder()
        .header(header::CONTENT_TYPE, "application/zip")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": e.to_string() })),
            )
        })
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "work_dir": state.work_dir,
    }))
}

async fn index() -> Json<Value> {
    Json(json!({
        "message": "Timestamp Clip Extractor API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "POST /api/extract-clips",
            "GET /api/progress/<task_id>",
            "GET /api/download/<task_id>",
            "GET /api/health",
        ],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(video_url: &str, timestamps: &str) -> ExtractClipsBody {
        ExtractClipsBody {
            video_url: video_url.to_string(),
            timestamps_input: timestamps.to_string(),
            clip_duration: 60,
            profiles: Vec::new(),
            captions: false,
        }
    }

    #[test]
    fn test_rejects_missing_fields() {
        let err = build_request(&body("", "0:01-0:03")).unwrap_err();
        assert!(err.contains("required"));

        let err = build_request(&body("https://example.com/v", "   ")).unwrap_err();
        assert!(err.contains("required"));
    }

    #[test]
    fn test_rejects_unparseable_marker_text() {
        let err = build_request(&body("https://example.com/v", "no markers here")).unwrap_err();
        assert_eq!(err, "No valid markers found");
    }

    #[test]
    fn test_rejects_zero_duration() {
        let mut b = body("https://example.com/v", "0:01-0:03");
        b.clip_duration = 0;
        assert!(build_request(&b).unwrap_err().contains("positive"));
    }

    #[test]
    fn test_defaults_to_horizontal_profile() {
        let request = build_request(&body("https://example.com/v", "0:01-0:03")).unwrap();
        assert_eq!(request.profiles, vec![RenderProfile::Horizontal]);
        assert_eq!(request.clip_duration, 60);
        assert_eq!(request.markers.len(), 1);
    }

    #[test]
    fn test_parses_requested_profiles() {
        let mut b = body(
            "https://example.com/v",
            "0:10:00 Stream Time Marker - highlight",
        );
        b.profiles = vec!["vertical".to_string(), "bogus".to_string()];
        b.captions = true;

        let request = build_request(&b).unwrap();
        assert_eq!(request.profiles, vec![RenderProfile::Vertical]);
        assert!(request.captions);
        assert_eq!(request.markers[0].label, "highlight");
    }
}
