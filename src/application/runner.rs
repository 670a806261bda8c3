use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use crate::application::pipeline::ClipPipeline;
use crate::application::store::JobStore;
use crate::domain::jobs::{ClipRequest, JobRecord, JobResult, JobStatus};
use crate::ports::fetcher::MediaFetcher;
use crate::ports::renderer::Renderer;
use crate::ports::transcriber::Transcriber;

/// Accepts jobs and runs each one on its own task.
///
/// Spawning is unbounded: every accepted request starts immediately. The
/// runner is the single place a worker pool or admission control would go
/// if one is ever needed.
pub struct JobRunner<F, T, R> {
    store: Arc<JobStore>,
    pipeline: Arc<ClipPipeline<F, T, R>>,
}

impl<F, T, R> JobRunner<F, T, R>
where
    F: MediaFetcher + 'static,
    T: Transcriber + 'static,
    R: Renderer + 'static,
{
    pub fn new(pipeline: ClipPipeline<F, T, R>) -> Self {
        Self {
            store: Arc::new(JobStore::new()),
            pipeline: Arc::new(pipeline),
        }
    }

    pub fn store(&self) -> &Arc<JobStore> {
        &self.store
    }

    /// Allocate a job id, record it as `Starting` before any work happens,
    /// and launch the pipeline concurrently. Returns the id immediately so a
    /// client polling right after submission always finds a record.
    pub fn submit(&self, request: ClipRequest) -> String {
        let id = Uuid::new_v4().to_string();
        self.store.put(JobRecord::starting(id.clone()));

        let store = self.store.clone();
        let pipeline = self.pipeline.clone();
        let job_id = id.clone();
        tokio::spawn(async move {
            let progress_store = store.clone();
            let progress_id = job_id.clone();
            let on_progress = move |progress: u8, message: String| {
                progress_store.put(JobRecord {
                    id: progress_id.clone(),
                    status: JobStatus::Processing,
                    progress,
                    message,
                    result: None,
                    error: None,
                });
            };

            match pipeline.run(&job_id, &request, on_progress).await {
                Ok(result) => finish(&store, job_id, result),
                Err(e) => {
                    error!("Job {} failed: {}", job_id, e);
                    store.put(JobRecord {
                        id: job_id,
                        status: JobStatus::Failed,
                        progress: 0,
                        message: format!("Error: {}", e),
                        result: None,
                        error: Some(e.to_string()),
                    });
                }
            }
        });

        id
    }
}

fn finish(store: &JobStore, job_id: String, result: JobResult) {
    store.put(JobRecord {
        id: job_id,
        status: JobStatus::Completed,
        progress: 100,
        message: "Completed!".to_string(),
        result: Some(result),
        error: None,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::markers::Marker;
    use crate::domain::profiles::RenderProfile;
    use crate::ports::fetcher::MockMediaFetcher;
    use crate::ports::renderer::MockRenderer;
    use crate::ports::transcriber::MockTranscriber;
    use std::time::Duration;
    use tempfile::TempDir;

    fn test_marker(seconds: u64) -> Marker {
        Marker {
            original: format!("{}", seconds),
            seconds,
            label: format!("Clip at {}", seconds),
        }
    }

    fn test_request(marker_count: usize) -> ClipRequest {
        ClipRequest {
            source_url: "https://example.com/v".to_string(),
            markers: (1..=marker_count as u64).map(|i| test_marker(i * 60)).collect(),
            clip_duration: 60,
            profiles: vec![RenderProfile::Horizontal],
            captions: false,
        }
    }

    fn working_runner(dir: &TempDir) -> JobRunner<MockMediaFetcher, MockTranscriber, MockRenderer> {
        let mut fetcher = MockMediaFetcher::new();
        fetcher.expect_fetch().returning(|_, _, _, dest| {
            std::fs::write(dest, b"fetched").unwrap();
            Box::pin(async { Ok(()) })
        });

        let mut renderer = MockRenderer::new();
        renderer.expect_render().returning(|_, _, _, output| {
            std::fs::write(output, b"rendered").unwrap();
            Box::pin(async { Ok(()) })
        });

        let pipeline = ClipPipeline::new(
            fetcher,
            MockTranscriber::new(),
            renderer,
            dir.path().to_path_buf(),
        );
        JobRunner::new(pipeline)
    }

    async fn wait_terminal(store: &JobStore, id: &str) -> JobRecord {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if let Some(record) = store.get(id) {
                    if record.status.is_terminal() {
                        return record;
                    }
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("job did not reach a terminal state")
    }

    #[tokio::test]
    async fn test_submit_records_job_before_any_work() {
        let dir = TempDir::new().unwrap();
        let runner = working_runner(&dir);

        let id = runner.submit(test_request(1));

        // Visible synchronously, whatever state the spawned task is in.
        let record = runner.store().get(&id).expect("record must exist at once");
        assert_eq!(record.id, id);
    }

    #[tokio::test]
    async fn test_job_completes_with_result() {
        let dir = TempDir::new().unwrap();
        let runner = working_runner(&dir);

        let id = runner.submit(test_request(2));
        let record = wait_terminal(runner.store(), &id).await;

        assert_eq!(record.status, JobStatus::Completed);
        assert_eq!(record.progress, 100);
        let result = record.result.expect("completed jobs carry a result");
        assert_eq!(result.total_clips, 2);
        assert_eq!(result.successful_clips, 2);
        assert!(result.zip_path.is_some());
        assert_eq!(
            result.download_url.as_deref(),
            Some(format!("/api/download/{}", id).as_str())
        );
    }

    #[tokio::test]
    async fn test_invalid_request_fails_job() {
        let dir = TempDir::new().unwrap();
        let runner = working_runner(&dir);

        // Empty marker list slips past submission only in tests; the
        // pipeline still rejects it as job-fatal.
        let id = runner.submit(test_request(0));
        let record = wait_terminal(runner.store(), &id).await;

        assert_eq!(record.status, JobStatus::Failed);
        assert_eq!(record.progress, 0);
        assert!(record.error.unwrap().contains("No valid markers"));
        assert!(record.result.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_jobs_keep_separate_records() {
        let dir = TempDir::new().unwrap();
        let runner = working_runner(&dir);

        let id_a = runner.submit(test_request(1));
        let id_b = runner.submit(test_request(3));
        assert_ne!(id_a, id_b);

        let record_a = wait_terminal(runner.store(), &id_a).await;
        let record_b = wait_terminal(runner.store(), &id_b).await;

        assert_eq!(record_a.id, id_a);
        assert_eq!(record_b.id, id_b);
        assert_eq!(record_a.result.unwrap().total_clips, 1);
        assert_eq!(record_b.result.unwrap().total_clips, 3);
    }
}
