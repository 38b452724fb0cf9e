// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Graymap.
//
// Only recoverable failures live here (memory, files, malformed headers).
// Contract violations such as an out-of-range pixel position are panics.

use std::fmt;

use thiserror::Error;

/// Top-level error type for all Graymap operations.
#[derive(Debug, Error)]
pub enum GraymapError {
    #[error("cannot allocate memory for {0}")]
    Allocation(String),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("{op} failed: {source}")]
    Io {
        op: IoOp,
        #[source]
        source: std::io::Error,
    },

    #[error("image conversion failed: {0}")]
    Conversion(String),

    #[error("configuration error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Malformed raw PGM header, one variant per header field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("invalid file format")]
    InvalidMagic,

    #[error("invalid width")]
    InvalidWidth,

    #[error("invalid height")]
    InvalidHeight,

    #[error("invalid maxval")]
    InvalidMaxval,

    #[error("whitespace expected after maxval")]
    MissingSeparator,
}

/// The file or stream step during which an I/O error happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOp {
    Open,
    Create,
    ReadHeader,
    ReadPixels,
    WriteHeader,
    WritePixels,
    Flush,
}

impl fmt::Display for IoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Open => "open",
            Self::Create => "create",
            Self::ReadHeader => "reading header",
            Self::ReadPixels => "reading pixels",
            Self::WriteHeader => "writing header",
            Self::WritePixels => "writing pixels",
            Self::Flush => "flush",
        };
        f.write_str(label)
    }
}

/// Coarse classification of a [`GraymapError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Allocation,
    Format,
    Io,
    Conversion,
    Config,
}

impl GraymapError {
    /// Wrap an I/O error together with the step that produced it.
    pub fn io(op: IoOp, source: std::io::Error) -> Self {
        Self::Io { op, source }
    }

    /// Which class of failure this is.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Allocation(_) => ErrorKind::Allocation,
            Self::Format(_) => ErrorKind::Format,
            Self::Io { .. } => ErrorKind::Io,
            Self::Conversion(_) => ErrorKind::Conversion,
            Self::Serialization(_) => ErrorKind::Config,
        }
    }

    /// The operating system error code behind an I/O failure, if any.
    ///
    /// The code is the one observed when the failing call returned; closing
    /// the file afterwards never replaces it.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::Io { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, GraymapError>;
