use derive_more::Display;
use serde::{Deserialize, Serialize};
use skelforge_core::{emit::EmitError, parse::ParseError};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::new(ErrorKind::Parse, ErrorOrigin::Parser, err.to_string())
    }
}

impl From<EmitError> for Error {
    fn from(err: EmitError) -> Self {
        Self::new(ErrorKind::Emit, ErrorOrigin::Emitter, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// Malformed input; the whole document was rejected.
    Parse,

    /// The artifact emitter rejected a specific entity.
    Emit,

    /// The caller cannot remediate this.
    Internal,
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Parser,
    Resolver,
    Scheduler,
    Emitter,
}
