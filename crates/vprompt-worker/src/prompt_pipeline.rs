//! Video → best raw prompt → anime and space versions.

use std::path::PathBuf;

use tracing::{debug, Instrument};
use vprompt_gemini::InferenceService;
use vprompt_models::{
    FinalPrompts, MediaAsset, PromptAnalysis, PromptRecord, PromptStyle, RemoteFile,
};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::instructions::{self, CANDIDATE_FRAMINGS};
use crate::logging::{preview, RunLogger};
use crate::parse;
use crate::select;
use crate::upload::{release_remote, upload_and_wait};
use crate::writer::write_prompt_record;

const PIPELINE: &str = "prompts";

/// Result of a successful prompt run.
#[derive(Debug, Clone)]
pub struct PromptOutcome {
    pub analysis: PromptAnalysis,
    /// Where the JSON record was written
    pub record_path: PathBuf,
}

impl PromptOutcome {
    pub fn final_prompts(&self) -> FinalPrompts {
        FinalPrompts {
            raw_prompt: self.analysis.selected_raw.clone(),
            anime_prompt: self.analysis.anime.clone(),
            space_prompt: self.analysis.space.clone(),
        }
    }
}

/// Generates a raw description of a video plus styled rewrites.
pub struct PromptGenerator<'a> {
    service: &'a dyn InferenceService,
    config: &'a PipelineConfig,
}

impl<'a> PromptGenerator<'a> {
    pub fn new(service: &'a dyn InferenceService, config: &'a PipelineConfig) -> Self {
        Self { service, config }
    }

    /// Run the pipeline and persist the record.
    pub async fn run(&self, asset: &MediaAsset) -> PipelineResult<PromptOutcome> {
        let logger = RunLogger::new(asset.stem(), PIPELINE);
        let span = logger.create_span();

        async {
            logger.log_start(&asset.to_string());
            let result = self.run_inner(asset, &logger).await;
            match &result {
                Ok(outcome) => logger.log_completion(&format!(
                    "Saved {}",
                    outcome.record_path.display()
                )),
                Err(e) => logger.log_error(&e.to_string()),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run_inner(
        &self,
        asset: &MediaAsset,
        logger: &RunLogger,
    ) -> PipelineResult<PromptOutcome> {
        let file = upload_and_wait(self.service, asset, &self.config.upload, logger).await?;

        let analysis = self.analyze(&file, logger).await;
        release_remote(self.service, &file, &self.config.upload).await;
        let analysis = analysis?;

        let generated_at = chrono::Local::now().naive_local();
        let prompts = FinalPrompts {
            raw_prompt: analysis.selected_raw.clone(),
            anime_prompt: analysis.anime.clone(),
            space_prompt: analysis.space.clone(),
        };
        let record = PromptRecord::new(asset, generated_at, prompts);
        let record_path =
            write_prompt_record(&self.config.prompts_dir(), asset.stem(), generated_at, &record)
                .await?;
        logger.log_progress(&format!("Saved: {}", record_path.display()));

        Ok(PromptOutcome {
            analysis,
            record_path,
        })
    }

    /// Candidates, selection and styled versions for an uploaded video.
    ///
    /// Only candidate generation can fail; selection and styling fall back.
    pub async fn analyze(
        &self,
        file: &RemoteFile,
        logger: &RunLogger,
    ) -> PipelineResult<PromptAnalysis> {
        logger.log_progress("Generating raw prompt candidates");
        let raw_candidates = self.generate_candidates(file, logger).await?;

        logger.log_progress("Selecting best raw prompt");
        let selected_raw = self.select_best(file, &raw_candidates, logger).await?;

        logger.log_progress("Creating styled versions");
        let anime = self.stylize(PromptStyle::Anime, &selected_raw, logger).await;
        let space = self.stylize(PromptStyle::Space, &selected_raw, logger).await;

        Ok(PromptAnalysis {
            raw_candidates,
            selected_raw,
            anime,
            space,
        })
    }

    async fn generate_candidates(
        &self,
        file: &RemoteFile,
        logger: &RunLogger,
    ) -> PipelineResult<Vec<String>> {
        let mut candidates = Vec::with_capacity(CANDIDATE_FRAMINGS.len());

        for framing in CANDIDATE_FRAMINGS {
            let response = self
                .service
                .generate_with_file(file, framing.instruction)
                .await
                .map_err(PipelineError::analysis)?;

            let candidate = parse::parse_raw_prompt(&response);
            if candidate == parse::RAW_PROMPT_FAILED {
                debug!(
                    framing = framing.label,
                    "Service returned: {}",
                    preview(&response, 100)
                );
            }
            logger.log_progress(&format!(
                "{} candidate: {}",
                framing.label,
                preview(&candidate, 50)
            ));
            candidates.push(candidate);
        }

        Ok(candidates)
    }

    /// Selected candidate, or the first one if the selection call failed.
    async fn select_best(
        &self,
        file: &RemoteFile,
        candidates: &[String],
        logger: &RunLogger,
    ) -> PipelineResult<String> {
        match self.request_selection(file, candidates, logger).await {
            Ok(chosen) => Ok(chosen),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                logger.log_warning(&format!("{}; using first candidate", e));
                select::first_candidate(candidates)
                    .map(str::to_string)
                    .ok_or_else(|| PipelineError::AnalysisFailed("no candidates".to_string()))
            }
        }
    }

    async fn request_selection(
        &self,
        file: &RemoteFile,
        candidates: &[String],
        logger: &RunLogger,
    ) -> PipelineResult<String> {
        let response = self
            .service
            .generate_with_file(file, &instructions::selection(candidates))
            .await
            .map_err(|e| PipelineError::selection(e.to_string()))?;

        let index = parse::parse_best_candidate(&response);
        let reason = parse::parse_selection_reason(&response);
        let chosen = select::select_candidate(candidates, index)
            .ok_or_else(|| PipelineError::selection("no candidates to choose from"))?;

        logger.log_progress(&format!(
            "Selected candidate {}: {}",
            index,
            preview(&reason, 60)
        ));
        Ok(chosen.to_string())
    }

    /// Styled rewrite of `raw_prompt`, or the fixed-suffix fallback.
    async fn stylize(&self, style: PromptStyle, raw_prompt: &str, logger: &RunLogger) -> String {
        match self
            .service
            .generate_text(&instructions::style_transform(style, raw_prompt))
            .await
        {
            Ok(response) => {
                logger.log_progress(&format!("{} version created", style));
                parse::parse_styled_prompt(&response, style)
            }
            Err(e) => {
                logger.log_warning(&format!("{} generation failed: {}", style, e));
                style.fallback_prompt(raw_prompt)
            }
        }
    }
}
