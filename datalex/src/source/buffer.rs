//! Source buffer acquisition with compile-time limits and logging integration
//!
//! A parser either borrows the caller's bytes or owns bytes read from a path
//! or stream. The enum makes the release rule structural: only owned storage
//! is freed on drop.

use crate::config::constants::compile_time::source::{LARGE_SOURCE_THRESHOLD, MAX_SOURCE_SIZE};
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::io::Read;
use std::path::Path;

/// Source acquisition errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid source path: {path}")]
    InvalidPath { path: String },

    #[error("Source too large: {size} bytes (max: {max_size})")]
    TooLarge { size: u64, max_size: u64 },

    #[error("I/O error reading source: {message}")]
    Io { message: String },
}

impl SourceError {
    /// Get the appropriate error code for this error type
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            SourceError::NotFound { .. } => codes::source::FILE_NOT_FOUND,
            SourceError::PermissionDenied { .. } => codes::source::PERMISSION_DENIED,
            SourceError::InvalidPath { .. } => codes::source::INVALID_PATH,
            SourceError::TooLarge { .. } => codes::source::SOURCE_TOO_LARGE,
            SourceError::Io { .. } => codes::source::IO_ERROR,
        }
    }

    fn from_io(err: std::io::Error, path: &Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => SourceError::NotFound {
                path: path.display().to_string(),
            },
            std::io::ErrorKind::PermissionDenied => SourceError::PermissionDenied {
                path: path.display().to_string(),
            },
            _ => SourceError::Io {
                message: err.to_string(),
            },
        }
    }
}

/// Source bytes for one parse, either borrowed from the caller or owned.
#[derive(Debug)]
pub enum SourceBuffer<'a> {
    Borrowed(&'a [u8]),
    Owned(Vec<u8>),
}

impl<'a> SourceBuffer<'a> {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            SourceBuffer::Borrowed(bytes) => bytes,
            SourceBuffer::Owned(bytes) => bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, SourceBuffer::Owned(_))
    }
}

impl<'a> From<&'a [u8]> for SourceBuffer<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        SourceBuffer::Borrowed(bytes)
    }
}

impl From<Vec<u8>> for SourceBuffer<'static> {
    fn from(bytes: Vec<u8>) -> Self {
        SourceBuffer::Owned(bytes)
    }
}

/// Read a source file into an owned buffer, enforcing the size limit.
pub fn read_path(path: &Path) -> Result<Vec<u8>, SourceError> {
    log_debug!("Loading source file", "path" => path.display());

    let metadata = std::fs::metadata(path).map_err(|e| {
        let err = SourceError::from_io(e, path);
        log_error!(err.error_code(), &err.to_string());
        err
    })?;

    if !metadata.is_file() {
        let err = SourceError::InvalidPath {
            path: path.display().to_string(),
        };
        log_error!(err.error_code(), &err.to_string());
        return Err(err);
    }

    if metadata.len() > MAX_SOURCE_SIZE {
        let err = SourceError::TooLarge {
            size: metadata.len(),
            max_size: MAX_SOURCE_SIZE,
        };
        log_error!(err.error_code(), &err.to_string(), "path" => path.display());
        return Err(err);
    }

    let bytes = std::fs::read(path).map_err(|e| {
        let err = SourceError::from_io(e, path);
        log_error!(err.error_code(), &err.to_string());
        err
    })?;

    log_success!(codes::success::SOURCE_LOAD_SUCCESS, "Source file loaded",
        "path" => path.display(),
        "size_bytes" => bytes.len(),
        "is_large" => bytes.len() as u64 > LARGE_SOURCE_THRESHOLD
    );

    Ok(bytes)
}

/// Read a byte stream to end into an owned buffer, enforcing the size limit.
pub fn read_stream<R: Read>(reader: R) -> Result<Vec<u8>, SourceError> {
    let mut bytes = Vec::new();

    // Read one byte past the limit so oversize is detectable
    let mut limited = reader.take(MAX_SOURCE_SIZE + 1);
    limited.read_to_end(&mut bytes).map_err(|e| {
        let err = SourceError::Io {
            message: e.to_string(),
        };
        log_error!(err.error_code(), &err.to_string());
        err
    })?;

    if bytes.len() as u64 > MAX_SOURCE_SIZE {
        let err = SourceError::TooLarge {
            size: bytes.len() as u64,
            max_size: MAX_SOURCE_SIZE,
        };
        log_error!(err.error_code(), &err.to_string());
        return Err(err);
    }

    log_success!(codes::success::SOURCE_LOAD_SUCCESS, "Source stream loaded",
        "size_bytes" => bytes.len()
    );

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_buffer_borrowed_vs_owned() {
        let borrowed = SourceBuffer::from(&b"1 2 3"[..]);
        assert!(!borrowed.is_owned());
        assert_eq!(borrowed.as_bytes(), b"1 2 3");
        assert_eq!(borrowed.len(), 5);

        let owned = SourceBuffer::from(b"abc".to_vec());
        assert!(owned.is_owned());
        assert_eq!(owned.as_bytes(), b"abc");
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = SourceBuffer::from(&b""[..]);
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
    }

    #[test]
    fn test_read_path_success() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"1 2.5 alpha\n").unwrap();

        let bytes = read_path(file.path()).unwrap();
        assert_eq!(bytes, b"1 2.5 alpha\n");
    }

    #[test]
    fn test_read_path_missing_file() {
        let result = read_path(Path::new("/nonexistent/almanac.txt"));
        assert_matches!(result, Err(SourceError::NotFound { .. }));
    }

    #[test]
    fn test_read_path_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_path(dir.path());
        assert_matches!(result, Err(SourceError::InvalidPath { .. }));
    }

    #[test]
    fn test_read_stream() {
        let bytes = read_stream(&b"7 8 9"[..]).unwrap();
        assert_eq!(bytes, b"7 8 9");
    }

    #[test]
    fn test_read_stream_too_large() {
        let endless = std::io::repeat(b'0');
        let result = read_stream(endless);
        assert_matches!(result, Err(SourceError::TooLarge { .. }));
    }

    #[test]
    fn test_error_codes() {
        let err = SourceError::NotFound {
            path: "x".to_string(),
        };
        assert_eq!(err.error_code().as_str(), "E005");

        let err = SourceError::TooLarge {
            size: 20,
            max_size: 10,
        };
        assert_eq!(err.error_code().as_str(), "E007");
    }
}
