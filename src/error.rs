//! Error types for building calls and classifying their responses.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Result type used by the protocol layer.
pub type Result<T> = std::result::Result<T, CallError>;

/// Errors a call can end in.
///
/// `Validation` and `Failure` are produced locally from a response that did
/// arrive; `Status`, `MissingCredential` and `Transport` come from the
/// transport side. Nothing in this crate retries.
#[derive(Error, Debug)]
pub enum CallError {
    /// The response body (or redirect) could not be decoded.
    #[error("{call}: could not parse response: {reason}")]
    Parse { call: &'static str, reason: String },

    /// The decoded document does not match the call's schema.
    #[error("{call}: response failed validation: {failure}")]
    Validation {
        call: &'static str,
        failure: ValidationFailure,
    },

    /// The document is well shaped but the server rejected the request.
    #[error("{call}: {failure}")]
    Failure {
        call: &'static str,
        failure: CallFailure,
    },

    #[error("{call}: server answered with HTTP status {status}")]
    Status { call: &'static str, status: u16 },

    #[error("{call}: no session credential configured")]
    MissingCredential { call: &'static str },

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl CallError {
    pub fn is_validation(&self) -> bool {
        matches!(self, CallError::Validation { .. })
    }

    pub fn is_call_failure(&self) -> bool {
        matches!(self, CallError::Failure { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, CallError::Parse { .. })
    }

    /// True for failures that happened before a response could be classified.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CallError::Transport(_) | CallError::Status { .. } | CallError::MissingCredential { .. }
        )
    }
}

/// First schema violation found in a document.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailure {
    /// JSON path of the offending node, e.g. `$.entries[0].track.title`.
    pub path: String,
    pub violation: Violation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    MissingField(String),
    UnexpectedField(String),
    WrongType {
        expected: String,
        found: &'static str,
    },
    UnknownReference(String),
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.violation {
            Violation::MissingField(name) => {
                write!(f, "{}: missing required field '{}'", self.path, name)
            }
            Violation::UnexpectedField(name) => {
                write!(f, "{}: unexpected field '{}'", self.path, name)
            }
            Violation::WrongType { expected, found } => {
                write!(f, "{}: expected {}, found {}", self.path, expected, found)
            }
            Violation::UnknownReference(name) => {
                write!(f, "{}: unknown schema reference '{}'", self.path, name)
            }
        }
    }
}

impl std::error::Error for ValidationFailure {}

/// A well-shaped response that the server used to reject the request.
#[derive(Debug, Clone, PartialEq)]
pub struct CallFailure {
    pub reason: String,
    /// Mutations whose response code was not `OK`, in submission order.
    pub rejected: Vec<RejectedMutation>,
    /// Value of a top-level `error` key, when the server sent one.
    pub server_error: Option<Value>,
}

impl CallFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        CallFailure {
            reason: reason.into(),
            rejected: Vec::new(),
            server_error: None,
        }
    }
}

impl fmt::Display for CallFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)?;
        for rejected in &self.rejected {
            write!(f, "; {}", rejected)?;
        }
        if let Some(error) = &self.server_error {
            write!(f, "; server error: {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for CallFailure {}

#[derive(Debug, Clone, PartialEq)]
pub struct RejectedMutation {
    /// Position in the submitted mutation list.
    pub index: usize,
    pub id: Option<String>,
    pub response_code: Option<String>,
}

impl fmt::Display for RejectedMutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mutation #{} ({}) returned {}",
            self.index,
            self.id.as_deref().unwrap_or("no id"),
            self.response_code.as_deref().unwrap_or("no response code")
        )
    }
}
