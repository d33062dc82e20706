//! # Conversion Error Taxonomy
//!
//! Error types for the cover-conversion pipeline, classified the way the
//! batch loop needs them: almost everything is a per-file failure that gets
//! recorded and skipped, and only batch-setup errors (the output directory
//! itself) abort a whole run.
//!
//! ## Error Classification
//!
//! - **Per-file**: unknown slot, undecodable source, scaling failure,
//!   encode/write failure. Converted into that file's outcome, never
//!   propagated past the conversion boundary.
//! - **Batch-fatal**: output directory creation. Nothing can be written
//!   regardless, so the batch aborts.

use std::path::PathBuf;
use std::{error::Error as StdError, fmt};

use opl_scale::ScaleError;

/// Severity attached to each error kind; the CLI and logs use it to decide
/// between a warning line and a hard failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Affects one file; the batch continues.
    Error,
    /// Nothing in the batch can proceed.
    Fatal,
}

/// All the ways converting a cover image can fail.
#[derive(Debug)]
pub enum ConvertError {
    /// Slot name did not resolve to a known slot.
    InvalidSlot { name: String },
    /// Source image could not be opened or decoded.
    Decode { path: PathBuf, reason: String },
    /// The scaling subsystem failed (after its own fallback ran out).
    Scale { source: ScaleError },
    /// Encoded output could not be produced or written.
    Encode { path: PathBuf, reason: String },
    /// Filesystem error outside decode/encode proper.
    Io {
        operation: String,
        source: std::io::Error,
    },
    /// The batch output directory could not be created.
    BatchSetup {
        dir: PathBuf,
        source: std::io::Error,
    },
}

impl ConvertError {
    pub fn invalid_slot(name: impl Into<String>) -> Self {
        Self::InvalidSlot { name: name.into() }
    }

    pub fn decode(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self::Decode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn encode(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self::Encode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    pub fn batch_setup(dir: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::BatchSetup {
            dir: dir.into(),
            source,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ConvertError::BatchSetup { .. } => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Error,
        }
    }

    /// True when the whole batch must stop rather than skip one file.
    pub fn is_batch_fatal(&self) -> bool {
        self.severity() == ErrorSeverity::Fatal
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::InvalidSlot { name } => write!(f, "Unknown image slot '{}'", name),
            ConvertError::Decode { path, reason } => {
                write!(f, "Cannot read image '{}': {}", path.display(), reason)
            }
            ConvertError::Scale { source } => write!(f, "Scaling failed: {}", source),
            ConvertError::Encode { path, reason } => {
                write!(f, "Cannot write image '{}': {}", path.display(), reason)
            }
            ConvertError::Io { operation, source } => {
                write!(f, "I/O error during {}: {}", operation, source)
            }
            ConvertError::BatchSetup { dir, source } => write!(
                f,
                "Cannot create batch directory '{}': {}",
                dir.display(),
                source
            ),
        }
    }
}

impl StdError for ConvertError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ConvertError::Scale { source } => Some(source),
            ConvertError::Io { source, .. } => Some(source),
            ConvertError::BatchSetup { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ScaleError> for ConvertError {
    fn from(source: ScaleError) -> Self {
        Self::Scale { source }
    }
}

/// Convenience alias used throughout the conversion crate.
pub type ConvertResult<T> = Result<T, ConvertError>;
