//! Source file loading

use crate::config::constants::compile_time::file_processing::{LARGE_FILE_THRESHOLD, MAX_FILE_SIZE};
use crate::logging::codes;
use crate::{log_debug, log_error, log_file_metrics, log_warning};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },
}

impl FileProcessorError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    fn from_io(error: std::io::Error, path: &Path) -> Self {
        match error.kind() {
            ErrorKind::NotFound => FileProcessorError::FileNotFound {
                path: path.display().to_string(),
            },
            ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                path: path.display().to_string(),
            },
            _ => FileProcessorError::IoError {
                message: format!("{}: {}", path.display(), error),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub path: PathBuf,
    /// Size on disk, before line normalization
    pub size: u64,
    pub extension: Option<String>,
    /// Physical lines, a final unterminated line included
    pub line_count: usize,
}

impl FileMetadata {
    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }

    /// Whether the extension names an X++ source
    pub fn has_xpp_extension(&self) -> bool {
        self.extension.as_deref() == Some("xpp")
    }
}

/// A loaded source buffer ready for the scanner
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    /// Every physical line terminated by `\n`
    pub source: Vec<u8>,
    pub metadata: FileMetadata,
}

pub struct FileProcessor {
    max_file_size: u64,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
        }
    }

    /// Lower the size limit; the compile-time maximum still applies
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size.min(MAX_FILE_SIZE);
        self
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    pub fn process_file(&self, path: &Path) -> Result<FileProcessingResult, FileProcessorError> {
        log_debug!("Starting file processing", "file" => path.display());

        let metadata = self.check_path(path).map_err(|error| {
            log_error!(error.error_code(), "Cannot open source file",
                "path" => path.display(),
                "detail" => &error
            );
            error
        })?;

        let bytes = fs::read(path).map_err(|e| {
            let error = FileProcessorError::from_io(e, path);
            log_error!(error.error_code(), "Failed to read source file",
                "path" => path.display(),
                "detail" => &error
            );
            error
        })?;

        let (source, line_count) = normalize_lines(&bytes);
        if line_count == 0 {
            log_warning!("Source file is empty", "path" => path.display());
        }

        let metadata = FileMetadata {
            line_count,
            ..metadata
        };

        log_file_metrics!(codes::success::FILE_PROCESSING_SUCCESS, "Source file loaded",
            file = path.display(),
            size = metadata.size,
            lines = metadata.line_count,
            "large" => metadata.is_large_file()
        );

        Ok(FileProcessingResult { source, metadata })
    }

    fn check_path(&self, path: &Path) -> Result<FileMetadata, FileProcessorError> {
        if path.as_os_str().is_empty() {
            return Err(FileProcessorError::InvalidPath {
                path: String::new(),
            });
        }

        let stat = fs::metadata(path).map_err(|e| FileProcessorError::from_io(e, path))?;
        if !stat.is_file() {
            return Err(FileProcessorError::InvalidPath {
                path: path.display().to_string(),
            });
        }
        if stat.len() > self.max_file_size {
            return Err(FileProcessorError::FileTooLarge {
                size: stat.len(),
                max_size: self.max_file_size,
            });
        }

        Ok(FileMetadata {
            path: path.to_path_buf(),
            size: stat.len(),
            extension: path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(str::to_lowercase),
            line_count: 0,
        })
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Re-terminate every physical line with `\n`
///
/// `\r\n` endings collapse to `\n`; a final line without a terminator gets
/// one. Returns the buffer and the number of lines.
pub fn normalize_lines(bytes: &[u8]) -> (Vec<u8>, usize) {
    let mut source = Vec::with_capacity(bytes.len() + 1);
    let mut lines = 0;

    for line in bytes.split_inclusive(|&b| b == b'\n') {
        let body = line.strip_suffix(b"\n").unwrap_or(line);
        let body = body.strip_suffix(b"\r").unwrap_or(body);
        source.extend_from_slice(body);
        source.push(b'\n');
        lines += 1;
    }

    (source, lines)
}
