//! Structured error types shared across numseq crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`SeqError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (offending values, computed quantities).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller adjust the inputs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the numseq engine.
///
/// Every error is terminal for the call that raised it; the engine performs
/// no internal recovery and never converts a failure into a sentinel result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum SeqError {
    /// A requested digit has no example in the corpus.
    #[error("unknown label: {0}")]
    UnknownLabel(ErrorInfo),
    /// Invalid caller-supplied inputs or run configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(ErrorInfo),
    /// Fixed-spacing pixels do not divide evenly across the gap slots.
    #[error("indivisible width: {0}")]
    IndivisibleWidth(ErrorInfo),
    /// A computed fixed gap width falls outside the caller's range.
    #[error("spacing out of range: {0}")]
    SpacingOutOfRange(ErrorInfo),
    /// A defensive invariant was violated; should be unreachable.
    #[error("internal consistency: {0}")]
    InternalConsistency(ErrorInfo),
    /// Corpus loading and validation errors.
    #[error("corpus error: {0}")]
    Corpus(ErrorInfo),
    /// Label-group cache store errors.
    #[error("store error: {0}")]
    Store(ErrorInfo),
    /// Filesystem and image-encoding errors from collaborators.
    #[error("i/o error: {0}")]
    Io(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl SeqError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            SeqError::UnknownLabel(info)
            | SeqError::InvalidConfiguration(info)
            | SeqError::IndivisibleWidth(info)
            | SeqError::SpacingOutOfRange(info)
            | SeqError::InternalConsistency(info)
            | SeqError::Corpus(info)
            | SeqError::Store(info)
            | SeqError::Io(info) => info,
        }
    }
}
