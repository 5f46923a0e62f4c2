//! Pipeline orchestration - wires together all processing stages.

use chrono::Utc;
use std::time::Instant;

use crate::config::Config;
use crate::error::PipelineError;
use crate::report::ReportWriter;
use crate::types::{RunContext, RunSummary};

use super::discovery::PhotoCatalog;
use super::enrich::{enrich_timestamps, EnrichOptions};
use super::thumbnail::ThumbnailBatch;

/// Runs catalog, enrichment, thumbnails and report in order, stopping at the first failure.
pub struct JourneyPipeline {
    enrich: EnrichOptions,
    thumbnails: ThumbnailBatch,
    report: ReportWriter,
}

impl JourneyPipeline {
    /// Create a pipeline with the given configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            enrich: EnrichOptions::from(&config.enrichment),
            thumbnails: ThumbnailBatch::new(config.thumbnail.clone()),
            report: ReportWriter::new(config),
        }
    }

    /// Run every stage against `ctx`.
    ///
    /// Nothing is rolled back on failure: a thumbnails directory or
    /// thumbnails created before the failing stage stay on disk.
    pub async fn run(&self, ctx: &mut RunContext) -> Result<RunSummary, PipelineError> {
        let start = Instant::now();
        tracing::info!("Building journey for {:?}", ctx.input_dir);

        let stage = Instant::now();
        let photos = PhotoCatalog::build(&ctx.input_dir, &ctx.output_names())?;
        ctx.photos = photos;
        tracing::info!("Found {} photo(s)", ctx.photos.len());
        tracing::trace!("  Catalog: {:?}", stage.elapsed());

        let stage = Instant::now();
        enrich_timestamps(&mut ctx.photos, &self.enrich).await?;
        tracing::trace!("  Enrich: {:?}", stage.elapsed());

        let stage = Instant::now();
        self.thumbnails.create_dir(ctx).await?;
        self.thumbnails.run(ctx).await?;
        tracing::trace!("  Thumbnails: {:?}", stage.elapsed());

        let stage = Instant::now();
        self.report.write(ctx, Utc::now()).await?;
        tracing::trace!("  Report: {:?}", stage.elapsed());

        tracing::debug!("Journey built in {:?}", start.elapsed());
        Ok(RunSummary {
            photos: ctx.photos.len(),
            thumbnails_dir: ctx.thumbnails_dir.clone(),
            report_path: ctx.report_path.clone(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::error::BatchFailure;
    use crate::testing::{fake_tool, jpeg_with_exif, write_photo, ExifFixture, TOUCHING_BATCH};
    use std::path::Path;

    fn setup(tool_body: &str) -> (tempfile::TempDir, tempfile::TempDir, Config) {
        let tools = tempfile::tempdir().unwrap();
        let input = tempfile::tempdir().unwrap();
        let config = Config::with_tool(fake_tool(tools.path(), tool_body));
        (tools, input, config)
    }

    fn context(input: &Path, config: &Config) -> RunContext {
        RunContext::new(std::fs::canonicalize(input).unwrap(), config)
    }

    fn thumbnail_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_full_run_produces_thumbnails_and_report() {
        let (tools, input, config) = setup(TOUCHING_BATCH);
        write_photo(input.path(), "02-harbour.jpg", "2017:01:01 10:30:45");
        write_photo(input.path(), "01-airport.jpg", "2017:01:01 06:12:00");
        write_photo(input.path(), "03-dinner.jpg", "2017:01:01 20:45:10");

        let mut ctx = context(input.path(), &config);
        let summary = JourneyPipeline::new(&config).run(&mut ctx).await.unwrap();

        assert_eq!(summary.photos, 3);
        assert_eq!(
            thumbnail_names(&ctx.thumbnails_dir),
            vec!["01-airport.jpg", "02-harbour.jpg", "03-dinner.jpg"]
        );

        let log = std::fs::read_to_string(tools.path().join("directives.log")).unwrap();
        let order: Vec<bool> = ["01-airport", "02-harbour", "03-dinner"]
            .iter()
            .zip(log.lines())
            .map(|(name, line)| line.contains(name))
            .collect();
        assert_eq!(order, vec![true, true, true]);

        let html = std::fs::read_to_string(&summary.report_path).unwrap();
        assert_eq!(html.matches("<figure>").count(), 3);
        let positions: Vec<usize> = ["01-airport", "02-harbour", "03-dinner"]
            .iter()
            .map(|name| html.find(name).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(html.contains("Photo captured at 2017-01-01T10:30:45."));
    }

    #[tokio::test]
    async fn test_one_photo_without_capture_time_aborts_everything() {
        let (_tools, input, config) = setup(TOUCHING_BATCH);
        write_photo(input.path(), "a.jpg", "2017:01:01 10:30:45");
        std::fs::write(
            input.path().join("b.jpg"),
            jpeg_with_exif(ExifFixture::NoCaptureTime),
        )
        .unwrap();
        write_photo(input.path(), "c.jpg", "2017:01:01 11:00:00");

        let mut ctx = context(input.path(), &config);
        let err = JourneyPipeline::new(&config).run(&mut ctx).await.unwrap_err();

        assert!(matches!(err, PipelineError::CaptureTimeMissing { .. }));
        assert!(!ctx.thumbnails_dir.exists());
        assert!(!ctx.report_path.exists());
    }

    #[tokio::test]
    async fn test_non_photo_entry_aborts_the_run() {
        let (_tools, input, config) = setup(TOUCHING_BATCH);
        write_photo(input.path(), "a.jpg", "2017:01:01 10:30:45");
        std::fs::write(input.path().join("README.txt"), "trip notes").unwrap();

        let mut ctx = context(input.path(), &config);
        let err = JourneyPipeline::new(&config).run(&mut ctx).await.unwrap_err();

        assert!(matches!(err, PipelineError::MetadataUnavailable { .. }));
        assert!(!ctx.report_path.exists());
    }

    #[tokio::test]
    async fn test_empty_directory_yields_empty_report() {
        let (_tools, input, config) = setup(TOUCHING_BATCH);

        let mut ctx = context(input.path(), &config);
        let summary = JourneyPipeline::new(&config).run(&mut ctx).await.unwrap();

        assert_eq!(summary.photos, 0);
        assert!(thumbnail_names(&summary.thumbnails_dir).is_empty());
        let html = std::fs::read_to_string(&summary.report_path).unwrap();
        assert_eq!(html.matches("<figure>").count(), 0);
    }

    #[tokio::test]
    async fn test_rerun_fails_on_existing_thumbnails_dir() {
        let (_tools, input, config) = setup(TOUCHING_BATCH);
        write_photo(input.path(), "a.jpg", "2017:01:01 10:30:45");
        let pipeline = JourneyPipeline::new(&config);

        let mut first = context(input.path(), &config);
        pipeline.run(&mut first).await.unwrap();
        let report_before = std::fs::read_to_string(&first.report_path).unwrap();

        let mut second = context(input.path(), &config);
        let err = pipeline.run(&mut second).await.unwrap_err();

        assert!(matches!(err, PipelineError::DirectoryCreate { .. }));
        assert_eq!(
            std::fs::read_to_string(&second.report_path).unwrap(),
            report_before
        );
    }

    #[tokio::test]
    async fn test_failed_batch_produces_no_report() {
        let (_tools, input, config) = setup("cat > /dev/null\nexit 1");
        write_photo(input.path(), "a.jpg", "2017:01:01 10:30:45");

        let mut ctx = context(input.path(), &config);
        let err = JourneyPipeline::new(&config).run(&mut ctx).await.unwrap_err();

        assert!(matches!(
            err,
            PipelineError::ThumbnailBatch(BatchFailure::Exit { code: Some(1), .. })
        ));
        assert!(ctx.thumbnails_dir.exists());
        assert!(!ctx.report_path.exists());
    }
}
