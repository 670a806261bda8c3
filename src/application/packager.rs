use chrono::Utc;
use serde_json::json;
use std::error::Error;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::domain::jobs::ClipResult;

/// Manifest entry embedded in every archive.
const REPORT_ENTRY: &str = "extraction_report.json";

/// Assembles the renditions of all successful clips plus a JSON manifest
/// into one zip archive.
#[derive(Clone)]
pub struct Packager {
    out_dir: PathBuf,
}

impl Packager {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }

    /// Build `timestamp_clips_{job_id}.zip`.
    ///
    /// Every rendition file of every successful clip is added under its own
    /// profile-prefixed name. The manifest records all clips, failed ones
    /// included, for diagnostics. When zero media files were added the
    /// archive is deleted and `(None, 0)` is returned instead of shipping a
    /// manifest-only bundle.
    pub fn pack(
        &self,
        clips: &[ClipResult],
        job_id: &str,
    ) -> Result<(Option<PathBuf>, usize), Box<dyn Error + Send + Sync>> {
        let zip_path = self.out_dir.join(format!("timestamp_clips_{}.zip", job_id));
        let file = File::create(&zip_path)?;
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut files_added = 0;
        for clip in clips.iter().filter(|c| c.success) {
            for rendition in &clip.renditions {
                if !rendition.file.exists() {
                    warn!("Rendition file missing, skipping: {:?}", rendition.file);
                    continue;
                }
                let entry_name = rendition
                    .file
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .ok_or("rendition path has no file name")?;

                zip.start_file(entry_name, options)?;
                let mut source = File::open(&rendition.file)?;
                std::io::copy(&mut source, &mut zip)?;
                files_added += 1;
            }
        }

        let report = json!({
            "extraction_date": Utc::now().to_rfc3339(),
            "total_clips": clips.len(),
            "successful_clips": clips.iter().filter(|c| c.success).count(),
            "clips": clips,
        });
        zip.start_file(REPORT_ENTRY, options)?;
        zip.write_all(serde_json::to_string_pretty(&report)?.as_bytes())?;
        zip.finish()?;

        if files_added > 0 {
            info!("Packaged {} files into {:?}", files_added, zip_path);
            Ok((Some(zip_path), files_added))
        } else {
            std::fs::remove_file(&zip_path)?;
            Ok((None, 0))
        }
    }
}
