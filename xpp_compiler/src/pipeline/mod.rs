//! End-to-end compilation: file → tokens → parse report
//!
//! The lex stage drains the scanner into a trace. The parser stages let the
//! parser pull tokens itself, so no token vector is built for them.

mod error;
mod options;
mod output;
mod result;

pub use error::PipelineError;
pub use options::{CompileOptions, Stage};
pub use output::{PipelineOutput, SUCCESS_MESSAGE};
pub use result::PipelineResult;

use crate::file_processor::FileProcessor;
use crate::lexical::{self, Dialect};
use crate::logging;
use crate::syntax::{self, ParseReport};
use crate::tokens::Token;
use std::path::Path;
use std::time::Instant;

/// Tokenize an in-memory source
pub fn tokenize_source(
    source: impl Into<Vec<u8>>,
    dialect: Dialect,
) -> Result<Vec<Token>, PipelineError> {
    Ok(lexical::tokenize(source, dialect)?)
}

/// Run a parser stage over an in-memory Xpp source
pub fn parse_source(
    source: impl Into<Vec<u8>>,
    stage: Stage,
) -> Result<ParseReport, PipelineError> {
    let mode = stage
        .parse_mode()
        .ok_or_else(|| PipelineError::usage("the lex stage does not parse"))?;
    Ok(syntax::parse(source, mode)?)
}

/// Reject stage and dialect combinations the front end cannot run
pub fn validate_options(options: &CompileOptions) -> Result<(), PipelineError> {
    if options.stage.parse_mode().is_some() && !options.dialect.supports_parsing() {
        return Err(PipelineError::usage(format!(
            "dialect '{}' supports only the lex stage, '{}' requested",
            options.dialect, options.stage
        )));
    }
    Ok(())
}

/// Compile an in-memory source
pub fn compile_source(
    source: impl Into<Vec<u8>>,
    options: &CompileOptions,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();
    validate_options(options)?;

    log_info!("Compilation started",
        "dialect" => options.dialect,
        "stage" => options.stage
    );

    let mut metrics = None;
    let output = match options.stage.parse_mode() {
        None => {
            let (tokens, lexical_metrics) =
                lexical::tokenize_with_metrics(source, options.dialect)?;
            if options.collect_metrics {
                metrics = Some(lexical_metrics);
            }
            PipelineOutput::TokenTrace(tokens)
        }
        Some(mode) => PipelineOutput::Parse(syntax::parse(source, mode)?),
    };

    let mut result = PipelineResult::new(options, output, start_time.elapsed());
    if let Some(metrics) = metrics {
        result = result.with_metrics(metrics);
    }
    Ok(result)
}

/// Load a file and compile it
///
/// Every event logged along the way carries the file path.
pub fn process_file(
    path: &Path,
    options: &CompileOptions,
) -> Result<PipelineResult, PipelineError> {
    validate_options(options).map_err(|error| {
        log_error!(error.error_code(), "Invalid compile options", "detail" => &error);
        error
    })?;

    logging::with_file_context(path.to_path_buf(), || {
        let start_time = Instant::now();
        let file_result = FileProcessor::new().process_file(path)?;

        let mut result = compile_source(file_result.source, options)?;
        result.processing_duration = start_time.elapsed();
        let result = result.with_metadata(file_result.metadata);

        result.log_success();
        Ok(result)
    })
}
