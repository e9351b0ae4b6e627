//! Global logging for the X++ compiler
//!
//! A process-wide [`LoggingService`] receives events from the macros in
//! [`macros`]. Until `init_global_logging` runs, events are dropped, which
//! keeps library use and unit tests silent.

pub mod codes;
pub mod config;
pub mod events;
#[macro_use]
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

thread_local! {
    static FILE_CONTEXT: RefCell<Option<FileContext>> = const { RefCell::new(None) };
}

/// Source file currently being compiled on this thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContext {
    pub file_path: PathBuf,
}

// ============================================================================
// INITIALIZATION
// ============================================================================

pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    let logging_service = Arc::new(service::create_configured_service());
    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized".to_string())?;

    // Every code the front end can emit must be registered
    let required = [
        codes::system::INTERNAL_ERROR,
        codes::file_processing::FILE_NOT_FOUND,
        codes::lexical::INVALID_CHARACTER,
        codes::syntax::UNEXPECTED_TOKEN,
        codes::semantic::UNDECLARED_IDENTIFIER,
    ];
    for code in required {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!("Missing metadata for error code: {}", code));
        }
    }

    logging_service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));
    Ok(())
}

/// Install a specific service, typically a [`MemoryLogger`] in tests
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

// ============================================================================
// FILE CONTEXT
// ============================================================================

pub fn set_file_context(file_path: PathBuf) {
    FILE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(FileContext { file_path });
    });
}

pub fn clear_file_context() {
    FILE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Run `f` with every event on this thread tagged with `file_path`
pub fn with_file_context<F, R>(file_path: PathBuf, f: F) -> R
where
    F: FnOnce() -> R,
{
    set_file_context(file_path);
    let result = f();
    clear_file_context();
    result
}

pub fn get_current_file_context() -> Option<FileContext> {
    FILE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// MACRO SUPPORT
// ============================================================================

/// Tag with the file context and hand to the global logger
pub fn dispatch(mut event: LogEvent) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };
    if !logger.should_log(event.level) {
        return;
    }
    if let Some(file_ctx) = get_current_file_context() {
        event = event.with_context("file", &file_ctx.file_path.display().to_string());
    }
    logger.log_event(event);
}

fn with_pairs(mut event: LogEvent, context: Vec<(&str, &str)>) -> LogEvent {
    for (key, value) in context {
        event = event.with_context(key, value);
    }
    event
}

pub fn log_error_with_context(
    code: Code,
    message: &str,
    span: Option<crate::utils::Span>,
    context: Vec<(&str, &str)>,
) {
    let mut event = with_pairs(LogEvent::error(code, message), context);
    if let Some(s) = span {
        event = event.with_span(s);
    }
    dispatch(event);
}

pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch(with_pairs(LogEvent::success(code, message), context));
}

pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(with_pairs(LogEvent::info(message), context));
}

/// Writes to stderr directly when the global logger is not up yet
pub fn safe_log_error(code: Code, message: &str) {
    match try_get_global_logger() {
        Some(logger) => logger.log_event(LogEvent::error(code, message)),
        None => eprintln!("[ERROR] {} - {}", code.as_str(), message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_context_management() {
        let file_path = PathBuf::from("shapes.xpp");

        assert!(get_current_file_context().is_none());

        set_file_context(file_path.clone());
        assert_eq!(
            get_current_file_context().map(|ctx| ctx.file_path),
            Some(file_path)
        );

        clear_file_context();
        assert!(get_current_file_context().is_none());
    }

    #[test]
    fn test_with_file_context_clears_afterwards() {
        let file_path = PathBuf::from("point.xpp");

        let result = with_file_context(file_path.clone(), || {
            assert_eq!(
                get_current_file_context().map(|ctx| ctx.file_path),
                Some(file_path.clone())
            );
            42
        });

        assert_eq!(result, 42);
        assert!(get_current_file_context().is_none());
    }

    fn memory_logger() -> &'static Arc<MemoryLogger> {
        static MEMORY: OnceLock<Arc<MemoryLogger>> = OnceLock::new();
        MEMORY.get_or_init(|| {
            let logger = Arc::new(MemoryLogger::new());
            let service = LoggingService::new(logger.clone(), LogLevel::Info);
            init_global_logging_with_service(Arc::new(service))
                .expect("no other test installs a global logger");
            logger
        })
    }

    #[test]
    fn test_parse_failure_is_logged_with_file_context() {
        let logger = memory_logger();
        let source = "class A { int x; int x; constructor() {} }";

        let result = with_file_context(PathBuf::from("duplicate.xpp"), || {
            crate::syntax::parse(source, crate::syntax::ParseMode::Semantic)
        });
        assert!(result.is_err());

        let events: Vec<LogEvent> = logger
            .get_events()
            .into_iter()
            .filter(|e| e.context.get("file").map(String::as_str) == Some("duplicate.xpp"))
            .collect();
        assert!(events
            .iter()
            .any(|e| e.is_error() && e.code == codes::semantic::DUPLICATE_SYMBOL));
        assert!(events.iter().any(|e| e.is_info() && e.message == "Parsing started"));
    }

    #[test]
    fn test_dispatch_applies_context_and_level_filter() {
        let logger = memory_logger();

        log_info_with_context("Context pairs attached", vec![("k", "v")]);
        dispatch(LogEvent::debug("Filtered below info"));
        log_error_with_context(
            codes::system::INTERNAL_ERROR,
            "Spanned failure",
            Some(crate::utils::Span::default()),
            vec![],
        );

        let events = logger.get_events();
        let info = events
            .iter()
            .find(|e| e.message == "Context pairs attached")
            .expect("info event captured");
        assert_eq!(info.context.get("k").map(String::as_str), Some("v"));
        assert!(!info.context.contains_key("file"));

        assert!(!events.iter().any(|e| e.message == "Filtered below info"));
        assert!(events
            .iter()
            .any(|e| e.message == "Spanned failure" && e.span.is_some() && e.is_error()));
    }
}
