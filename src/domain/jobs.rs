use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::markers::Marker;
use crate::domain::profiles::RenderProfile;

/// Everything one job needs, built once at submission and immutable after.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipRequest {
    /// Source video reference (URL or anything the fetcher understands)
    pub source_url: String,
    /// Markers in input order
    pub markers: Vec<Marker>,
    /// Length of the window extracted around each marker, in seconds
    pub clip_duration: u64,
    /// Target renditions per marker
    pub profiles: Vec<RenderProfile>,
    /// Whether to attempt caption generation and burn-in
    pub captions: bool,
}

/// One successfully rendered profile output for one marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenditionResult {
    pub profile: RenderProfile,
    pub file: PathBuf,
    pub size_bytes: u64,
}

/// Outcome for a single marker. Immutable once the pipeline moves on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipResult {
    pub marker: Marker,
    pub success: bool,
    pub renditions: Vec<RenditionResult>,
    pub has_captions: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate outcome of a whole job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResult {
    pub clips: Vec<ClipResult>,
    pub successful_clips: usize,
    pub total_clips: usize,
    pub total_size_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

/// Job lifecycle: `Starting -> Processing -> {Completed | Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Starting,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Starting => "starting",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    /// Terminal states accept no further writes.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of one job as seen by polling clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: String,
    pub status: JobStatus,
    /// Progress percentage, 0-100, monotonically non-decreasing per job
    pub progress: u8,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JobResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobRecord {
    /// Fresh record for a just-accepted job.
    pub fn starting(id: String) -> Self {
        Self {
            id,
            status: JobStatus::Starting,
            progress: 0,
            message: "Starting extraction...".to_string(),
            result: None,
            error: None,
        }
    }
}
