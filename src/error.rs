//! Unified error types for slackhist.
//!
//! This module provides a single [`SlackhistError`] enum that covers all
//! error cases in the library. Structural failures (an unreadable archive,
//! malformed JSON, a bad timestamp or timezone) are fatal and propagate to
//! the binary, which reports them and exits non-zero.
//!
//! Unknown user identifiers are deliberately *not* errors: name resolution
//! degrades to an empty string so a single stale id never aborts an export.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for slackhist operations.
pub type Result<T> = std::result::Result<T, SlackhistError>;

/// The error type for all slackhist operations.
///
/// Each variant contains context about what went wrong and, where
/// applicable, the underlying source error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SlackhistError {
    /// An I/O error occurred reading an archive entry or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The export archive could not be opened or walked.
    ///
    /// The path does not exist, is not a ZIP container, or an entry in the
    /// central directory could not be read.
    #[error("cannot read archive {}: {source}", path.display())]
    ArchiveUnreadable {
        /// Path of the archive that failed to open
        path: PathBuf,
        /// The underlying ZIP error
        #[source]
        source: zip::result::ZipError,
    },

    /// A metadata sidecar file (`users.json` or `channels.json`) held
    /// malformed JSON.
    #[error("failed to decode metadata file {file}: {source}")]
    MetadataDecodeFailed {
        /// Archive-relative name of the sidecar file
        file: String,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A channel record file held malformed JSON.
    ///
    /// Decode failures are fatal to the whole run; the export never emits a
    /// partial workbook.
    #[error("failed to decode record file {file}: {source}")]
    RecordDecodeFailed {
        /// Archive-relative name of the record file
        file: String,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A record carried a timestamp whose seconds portion is not numeric.
    #[error("malformed record timestamp '{value}'")]
    MalformedTimestamp {
        /// The raw timestamp string from the record
        value: String,
    },

    /// The configured timezone name is neither `local` nor a known IANA
    /// zone.
    #[error("unknown timezone '{name}'")]
    UnknownTimezone {
        /// The name that failed to resolve
        name: String,
    },

    /// The workbook could not be rendered or saved.
    #[error("workbook error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
}

impl SlackhistError {
    /// Creates an archive error for the given path.
    pub fn archive_unreadable(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        SlackhistError::ArchiveUnreadable {
            path: path.into(),
            source,
        }
    }

    /// Creates a metadata decode error for the given sidecar file.
    pub fn metadata_decode(file: impl Into<String>, source: serde_json::Error) -> Self {
        SlackhistError::MetadataDecodeFailed {
            file: file.into(),
            source,
        }
    }

    /// Creates a record decode error for the given record file.
    pub fn record_decode(file: impl Into<String>, source: serde_json::Error) -> Self {
        SlackhistError::RecordDecodeFailed {
            file: file.into(),
            source,
        }
    }

    /// Creates a malformed timestamp error.
    pub fn malformed_timestamp(value: impl Into<String>) -> Self {
        SlackhistError::MalformedTimestamp {
            value: value.into(),
        }
    }

    /// Creates an unknown timezone error.
    pub fn unknown_timezone(name: impl Into<String>) -> Self {
        SlackhistError::UnknownTimezone { name: name.into() }
    }

    /// Returns `true` if this is an archive-level error.
    pub fn is_archive(&self) -> bool {
        matches!(self, SlackhistError::ArchiveUnreadable { .. })
    }

    /// Returns `true` if this is a JSON decode error (sidecar or record).
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            SlackhistError::MetadataDecodeFailed { .. } | SlackhistError::RecordDecodeFailed { .. }
        )
    }

    /// Returns `true` if this is a timestamp error.
    pub fn is_timestamp(&self) -> bool {
        matches!(self, SlackhistError::MalformedTimestamp { .. })
    }

    /// Returns `true` if this is a timezone error.
    pub fn is_timezone(&self) -> bool {
        matches!(self, SlackhistError::UnknownTimezone { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_error_display() {
        let err = SlackhistError::archive_unreadable(
            "/no/such/export.zip",
            zip::result::ZipError::FileNotFound,
        );
        let display = err.to_string();
        assert!(display.contains("/no/such/export.zip"));
        assert!(err.is_archive());
    }

    #[test]
    fn test_metadata_decode_display() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = SlackhistError::metadata_decode("users.json", json_err);
        assert!(err.to_string().contains("users.json"));
        assert!(err.is_decode());
    }

    #[test]
    fn test_record_decode_display() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SlackhistError::record_decode("general/2020-09-13.json", json_err);
        assert!(err.to_string().contains("general/2020-09-13.json"));
        assert!(err.is_decode());
    }

    #[test]
    fn test_malformed_timestamp_display() {
        let err = SlackhistError::malformed_timestamp("abc.000100");
        assert!(err.to_string().contains("abc.000100"));
        assert!(err.is_timestamp());
        assert!(!err.is_timezone());
    }

    #[test]
    fn test_unknown_timezone_display() {
        let err = SlackhistError::unknown_timezone("Mars/Olympus_Mons");
        assert!(err.to_string().contains("Mars/Olympus_Mons"));
        assert!(err.is_timezone());
        assert!(!err.is_archive());
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err = SlackhistError::from(io_err);
        assert!(err.source().is_some());
    }
}
