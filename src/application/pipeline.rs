use sha2::{Digest, Sha256};
use std::error::Error;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::application::packager::Packager;
use crate::domain::jobs::{ClipRequest, ClipResult, JobResult, RenditionResult};
use crate::domain::markers::Marker;
use crate::domain::window::clip_window;
use crate::ports::fetcher::MediaFetcher;
use crate::ports::renderer::Renderer;
use crate::ports::transcriber::Transcriber;

/// Orchestrates one job: fetch, optional transcription, render fan-out,
/// cleanup and packaging. Per-marker failures are absorbed into the clip
/// results; only a structurally invalid request fails the whole run.
pub struct ClipPipeline<F, T, R> {
    fetcher: F,
    transcriber: T,
    renderer: R,
    packager: Packager,
    work_dir: PathBuf,
}

impl<F, T, R> ClipPipeline<F, T, R>
where
    F: MediaFetcher,
    T: Transcriber,
    R: Renderer,
{
    pub fn new(fetcher: F, transcriber: T, renderer: R, work_dir: PathBuf) -> Self {
        let packager = Packager::new(work_dir.clone());
        Self {
            fetcher,
            transcriber,
            renderer,
            packager,
            work_dir,
        }
    }

    /// Run the full pipeline for one job.
    ///
    /// `on_progress` receives `(percent, message)` before each marker starts
    /// (20-80), at packaging (85) and at completion (100); percentages are
    /// non-decreasing across the run.
    pub async fn run(
        &self,
        job_id: &str,
        request: &ClipRequest,
        mut on_progress: impl FnMut(u8, String),
    ) -> Result<JobResult, Box<dyn Error + Send + Sync>> {
        if request.markers.is_empty() {
            return Err("No valid markers found".into());
        }

        tokio::fs::create_dir_all(&self.work_dir).await?;
        let url_hash = short_hash(&request.source_url);
        let total = request.markers.len();

        let mut clips = Vec::with_capacity(total);
        for (index, marker) in request.markers.iter().enumerate() {
            let percent = (20 + index * 60 / total) as u8;
            on_progress(
                percent,
                format!("Downloading clip {}/{}...", index + 1, total),
            );
            clips.push(self.process_marker(request, marker, index, &url_hash).await);
        }

        on_progress(85, "Creating zip package...".to_string());
        let packager = self.packager.clone();
        let packed_clips = clips.clone();
        let packed_id = job_id.to_string();
        let (zip_path, files_added) =
            tokio::task::spawn_blocking(move || packager.pack(&packed_clips, &packed_id))
                .await??;

        on_progress(100, "Completed!".to_string());

        let successful_clips = clips.iter().filter(|c| c.success).count();
        let total_size_bytes = clips
            .iter()
            .filter(|c| c.success)
            .flat_map(|c| &c.renditions)
            .map(|r| r.size_bytes)
            .sum();
        info!(
            "Job {}: {}/{} clips, {} files packaged",
            job_id, successful_clips, total, files_added
        );

        let download_url = zip_path.as_ref().map(|_| format!("/api/download/{}", job_id));
        Ok(JobResult {
            clips,
            successful_clips,
            total_clips: total,
            total_size_bytes,
            zip_path,
            download_url,
        })
    }

    async fn process_marker(
        &self,
        request: &ClipRequest,
        marker: &Marker,
        index: usize,
        url_hash: &str,
    ) -> ClipResult {
        let window = clip_window(marker.seconds, request.clip_duration);
        let source_name = format!(
            "clip_{}_{}_{:02}m{:02}s.mp4",
            url_hash,
            index + 1,
            marker.seconds / 60,
            marker.seconds % 60
        );
        let source_file = self.work_dir.join(&source_name);

        if let Err(e) = self
            .fetcher
            .fetch(&request.source_url, window.start, window.duration, &source_file)
            .await
        {
            warn!("Clip {} fetch failed: {}", index + 1, e);
            return ClipResult {
                marker: marker.clone(),
                success: false,
                renditions: Vec::new(),
                has_captions: false,
                error: Some(e.to_string()),
            };
        }

        // Caption failures degrade the clip, never fail it.
        let captions = if request.captions {
            match self.transcriber.transcribe(&source_file).await {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("Clip {} continues without captions: {}", index + 1, e);
                    None
                }
            }
        } else {
            None
        };

        let mut renditions = Vec::new();
        let mut last_error = None;
        for profile in &request.profiles {
            let output = self
                .work_dir
                .join(format!("{}_{}", profile.as_filename_part(), source_name));
            match self
                .renderer
                .render(&source_file, *profile, captions.clone(), &output)
                .await
            {
                Ok(()) => {
                    let size_bytes = tokio::fs::metadata(&output)
                        .await
                        .map(|m| m.len())
                        .unwrap_or(0);
                    renditions.push(RenditionResult {
                        profile: *profile,
                        file: output,
                        size_bytes,
                    });
                }
                Err(e) => {
                    warn!("Clip {} render failed for {}: {}", index + 1, profile, e);
                    last_error = Some(e.to_string());
                }
            }
        }

        // Intermediates never outlive one marker's iteration.
        let _ = tokio::fs::remove_file(&source_file).await;
        if let Some(captions) = &captions {
            let _ = tokio::fs::remove_file(captions).await;
        }

        let success = !renditions.is_empty();
        ClipResult {
            marker: marker.clone(),
            success,
            renditions,
            has_captions: captions.is_some(),
            error: if success {
                None
            } else {
                last_error.or_else(|| Some("No renditions produced".to_string()))
            },
        }
    }
}

/// Short content hash used in intermediate file names, so parallel jobs for
/// different sources never collide.
fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    digest.iter().take(3).map(|b| format!("{:02x}", b)).collect()
}
