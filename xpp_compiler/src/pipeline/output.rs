use crate::tokens::{format_trace, Token};
use crate::syntax::ParseReport;
use serde::Serialize;

/// Message printed when a parser stage succeeds
pub const SUCCESS_MESSAGE: &str = "Compilation finished successfully.";

/// What a compilation produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PipelineOutput {
    /// Every token through END_OF_FILE
    TokenTrace(Vec<Token>),
    Parse(ParseReport),
}

impl PipelineOutput {
    /// Text for stdout: the trace, or the success message
    pub fn render(&self) -> String {
        match self {
            PipelineOutput::TokenTrace(tokens) => format_trace(tokens),
            PipelineOutput::Parse(_) => SUCCESS_MESSAGE.to_string(),
        }
    }

    /// The token array for a trace, the report for a parse
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        match self {
            PipelineOutput::TokenTrace(tokens) => serde_json::to_string_pretty(tokens),
            PipelineOutput::Parse(report) => serde_json::to_string_pretty(report),
        }
    }

    pub fn tokens(&self) -> Option<&[Token]> {
        match self {
            PipelineOutput::TokenTrace(tokens) => Some(tokens),
            PipelineOutput::Parse(_) => None,
        }
    }

    pub fn report(&self) -> Option<&ParseReport> {
        match self {
            PipelineOutput::TokenTrace(_) => None,
            PipelineOutput::Parse(report) => Some(report),
        }
    }
}
