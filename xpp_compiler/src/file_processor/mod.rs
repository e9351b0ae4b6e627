//! Loading source files into scanner-ready buffers

mod processor;

pub use processor::{
    normalize_lines, FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError,
};
use std::path::Path;

/// Load a file with the default size limit
pub fn process_file(path: &Path) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(path)
}

/// Compile-time maximum source size in bytes
pub fn get_max_file_size() -> u64 {
    crate::config::constants::compile_time::file_processing::MAX_FILE_SIZE
}
