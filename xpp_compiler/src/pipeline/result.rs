use super::options::{CompileOptions, Stage};
use super::output::PipelineOutput;
use crate::file_processor::FileMetadata;
use crate::lexical::{Dialect, LexicalMetrics};
use crate::logging::codes;
use std::time::Duration;

/// A finished compilation
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub dialect: Dialect,
    pub stage: Stage,
    /// Present when the source came from a file
    pub file_metadata: Option<FileMetadata>,
    /// Present for the lex stage when metrics were requested
    pub lexical_metrics: Option<LexicalMetrics>,
    pub output: PipelineOutput,
    pub processing_duration: Duration,
}

impl PipelineResult {
    pub fn new(options: &CompileOptions, output: PipelineOutput, duration: Duration) -> Self {
        Self {
            dialect: options.dialect,
            stage: options.stage,
            file_metadata: None,
            lexical_metrics: None,
            output,
            processing_duration: duration,
        }
    }

    pub fn with_metadata(mut self, metadata: FileMetadata) -> Self {
        self.file_metadata = Some(metadata);
        self
    }

    pub fn with_metrics(mut self, metrics: LexicalMetrics) -> Self {
        self.lexical_metrics = Some(metrics);
        self
    }

    pub fn log_success(&self) {
        let file = self
            .file_metadata
            .as_ref()
            .map(|m| m.path.display().to_string())
            .unwrap_or_else(|| "<memory>".to_string());

        log_performance!(codes::success::FILE_PROCESSING_SUCCESS, "Compilation succeeded",
            duration = self.processing_duration,
            "file" => file,
            "dialect" => self.dialect,
            "stage" => self.stage
        );
    }
}
