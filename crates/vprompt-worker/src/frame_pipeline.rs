//! Video → best single-person frame.

use std::path::PathBuf;

use tracing::Instrument;
use vprompt_gemini::InferenceService;
use vprompt_media::{frame_file_name, FrameExtractor};
use vprompt_models::{FrameAnalysis, MediaAsset, RemoteFile};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::instructions;
use crate::logging::{preview, RunLogger};
use crate::parse;
use crate::upload::{release_remote, upload_and_wait};

const PIPELINE: &str = "person_frame";

/// Finds a moment with exactly one clearly visible person and saves it.
pub struct PersonFrameExtractor<'a> {
    service: &'a dyn InferenceService,
    extractor: &'a dyn FrameExtractor,
    config: &'a PipelineConfig,
}

impl<'a> PersonFrameExtractor<'a> {
    pub fn new(
        service: &'a dyn InferenceService,
        extractor: &'a dyn FrameExtractor,
        config: &'a PipelineConfig,
    ) -> Self {
        Self {
            service,
            extractor,
            config,
        }
    }

    /// Run the pipeline and return the path of the saved frame.
    pub async fn run(&self, asset: &MediaAsset) -> PipelineResult<PathBuf> {
        let logger = RunLogger::new(asset.stem(), PIPELINE);
        let span = logger.create_span();

        async {
            logger.log_start(&asset.to_string());
            let result = self.run_inner(asset, &logger).await;
            match &result {
                Ok(path) => logger.log_completion(&format!("Person frame: {}", path.display())),
                Err(e) => logger.log_error(&e.to_string()),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run_inner(&self, asset: &MediaAsset, logger: &RunLogger) -> PipelineResult<PathBuf> {
        let file = upload_and_wait(self.service, asset, &self.config.upload, logger).await?;

        logger.log_progress("Finding best single person frame");
        let analysis = self.analyze(&file).await;
        release_remote(self.service, &file, &self.config.upload).await;
        let analysis = analysis?;

        let timestamp = validate(&analysis)?;
        logger.log_progress(&format!(
            "Found at {}s: {}",
            timestamp,
            preview(&analysis.reason, 50)
        ));

        self.extract(asset, timestamp, logger).await
    }

    /// Ask for the best single-person timestamp and parse the answer.
    pub async fn analyze(&self, file: &RemoteFile) -> PipelineResult<FrameAnalysis> {
        let response = self
            .service
            .generate_with_file(file, instructions::PERSON_FRAME)
            .await
            .map_err(PipelineError::analysis)?;

        Ok(FrameAnalysis {
            timestamp: parse::parse_timestamp(&response),
            people_count: parse::parse_people_count(&response),
            reason: parse::parse_frame_reason(&response),
        })
    }

    async fn extract(
        &self,
        asset: &MediaAsset,
        timestamp: f64,
        logger: &RunLogger,
    ) -> PipelineResult<PathBuf> {
        let dir = self.config.frames_dir();
        tokio::fs::create_dir_all(&dir).await?;
        let output = dir.join(frame_file_name(asset.stem(), timestamp));

        logger.log_progress(&format!("Extracting frame at {}s", timestamp));
        self.extractor
            .extract_frame(asset.path(), timestamp, &output)
            .await?;

        Ok(output)
    }
}

/// Gate extraction on a present timestamp and exactly one person.
pub fn validate(analysis: &FrameAnalysis) -> PipelineResult<f64> {
    analysis
        .single_person_timestamp()
        .ok_or(PipelineError::NoSinglePersonFrame {
            timestamp: analysis.timestamp,
            people_count: analysis.people_count,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingExtractor, ScriptedService};
    use crate::upload::UploadConfig;
    use std::time::Duration;

    struct Fixture {
        _tmp: tempfile::TempDir,
        video: PathBuf,
        config: PipelineConfig,
    }

    fn fixture() -> Fixture {
        let tmp = tempfile::tempdir().unwrap();
        let video = tmp.path().join("IMG_0889.mp4");
        std::fs::write(&video, b"video").unwrap();
        let config = PipelineConfig {
            upload: UploadConfig {
                poll_interval: Duration::from_millis(1),
                max_wait: Duration::from_millis(10),
                delete_remote: true,
            },
            ..PipelineConfig::default()
        }
        .with_video_path(&video)
        .with_output_dir(tmp.path().join("output"));

        Fixture {
            _tmp: tmp,
            video,
            config,
        }
    }

    #[tokio::test]
    async fn test_extracts_frame_at_reported_timestamp() {
        let fx = fixture();
        let service = ScriptedService::new()
            .file_reply("BEST_TIMESTAMP: 12.5\nREASON: clear face\nPEOPLE_COUNT: 1");
        let extractor = RecordingExtractor::new();

        let path = PersonFrameExtractor::new(&service, &extractor, &fx.config)
            .run(&MediaAsset::new(&fx.video))
            .await
            .unwrap();

        let expected = fx.config.frames_dir().join("IMG_0889_person_12.5s.jpg");
        assert_eq!(path, expected);
        assert!(path.ends_with("output/frames/IMG_0889_person_12.5s.jpg"));
        assert!(path.exists());

        let calls = extractor.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].timestamp, 12.5);
        assert_eq!(calls[0].source, fx.video);
        assert_eq!(*service.deleted.lock().unwrap(), vec!["files/scripted"]);
    }

    #[tokio::test]
    async fn test_no_frame_sentinel_skips_extraction() {
        let fx = fixture();
        let service = ScriptedService::new().file_reply("BEST_TIMESTAMP: NONE");
        let extractor = RecordingExtractor::new();

        let err = PersonFrameExtractor::new(&service, &extractor, &fx.config)
            .run(&MediaAsset::new(&fx.video))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::NoSinglePersonFrame {
                timestamp: None,
                people_count: 0
            }
        ));
        assert!(extractor.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_two_people_is_rejected() {
        let fx = fixture();
        let service = ScriptedService::new()
            .file_reply("BEST_TIMESTAMP: 4.0\nREASON: two friends\nPEOPLE_COUNT: 2");
        let extractor = RecordingExtractor::new();

        let err = PersonFrameExtractor::new(&service, &extractor, &fx.config)
            .run(&MediaAsset::new(&fx.video))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::NoSinglePersonFrame {
                timestamp: Some(_),
                people_count: 2
            }
        ));
        assert!(extractor.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_analysis_failure_is_fatal_and_releases_remote() {
        let fx = fixture();
        let service = ScriptedService::new().file_failure();
        let extractor = RecordingExtractor::new();

        let err = PersonFrameExtractor::new(&service, &extractor, &fx.config)
            .run(&MediaAsset::new(&fx.video))
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::AnalysisFailed(_)));
        assert_eq!(service.deleted.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_extraction_failure_carries_diagnostics() {
        let fx = fixture();
        let service = ScriptedService::new()
            .file_reply("BEST_TIMESTAMP: 1.0\nREASON: ok\nPEOPLE_COUNT: 1");
        let extractor = RecordingExtractor::failing("moov atom not found");

        let err = PersonFrameExtractor::new(&service, &extractor, &fx.config)
            .run(&MediaAsset::new(&fx.video))
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::ExtractionFailed(_)));
        assert_eq!(err.diagnostics(), Some("moov atom not found"));
    }

    #[tokio::test]
    async fn test_missing_video_never_uploads() {
        let fx = fixture();
        let service = ScriptedService::new();
        let extractor = RecordingExtractor::new();

        let err = PersonFrameExtractor::new(&service, &extractor, &fx.config)
            .run(&MediaAsset::new(fx.video.with_file_name("missing.mp4")))
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::SourceNotFound(_)));
        assert!(service.uploads.lock().unwrap().is_empty());
    }

    #[test]
    fn test_validate() {
        let ok = FrameAnalysis {
            timestamp: Some(3.0),
            people_count: 1,
            reason: "ok".to_string(),
        };
        assert_eq!(validate(&ok).unwrap(), 3.0);
    }
}
