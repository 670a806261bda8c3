//! Service binary: wires the real adapters into the pipeline and serves the
//! extraction API.

use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use clipmark::adapters::ffmpeg::FfmpegRenderer;
use clipmark::adapters::http::{router, AppState};
use clipmark::adapters::whisper::WhisperTranscriber;
use clipmark::adapters::ytdlp::YtDlpFetcher;
use clipmark::application::pipeline::ClipPipeline;
use clipmark::application::runner::JobRunner;
use clipmark::config::Config;

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    tracing_subscriber::fmt::init();

    let work_dir = PathBuf::from(&config.work_dir);
    if let Err(e) = tokio::fs::create_dir_all(&work_dir).await {
        eprintln!("Failed to create work dir {:?}: {}", work_dir, e);
        std::process::exit(1);
    }

    // 1. Adapters (external tools)
    let fetcher = YtDlpFetcher::new();
    let transcriber = WhisperTranscriber::new(config.whisper_model.clone());
    let renderer = FfmpegRenderer::new();

    // 2. Application services
    let pipeline = ClipPipeline::new(fetcher, transcriber, renderer, work_dir.clone());
    let runner = Arc::new(JobRunner::new(pipeline));

    // 3. HTTP layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = AppState {
        runner,
        work_dir: work_dir.clone(),
    };
    let app = router(state).layer(cors);

    // 4. Start server
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", config.addr, config.port))
        .await
        .expect("Failed to bind TCP listener");
    println!("Listening at {}:{}", config.addr, config.port);
    println!("Work dir: {:?}", work_dir);
    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
