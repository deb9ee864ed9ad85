//! Error types for the apigw command surface.
//!
//! Every command operation fails with a [`ComposedError`]: a root-cause message plus the
//! exit code and console presentation flags the dispatcher acts on. Call sites wrap an
//! underlying failure with [`ComposedError::wrap`]; when the wrapped value is itself a
//! `ComposedError` its exit code wins and its flags are OR-merged with the caller's.

use crate::endpoint::name::QualifiedNameError;
use crate::gateway::GatewayError;
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Process exit codes returned by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitCode {
    General,
    Usage,
    Network,
    HttpResponse,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        match self {
            ExitCode::General => 1,
            ExitCode::Usage => 2,
            ExitCode::Network => 3,
            ExitCode::HttpResponse => 4,
        }
    }
}

/// Console presentation flags carried by a [`ComposedError`].
///
/// [`DisplayFlags::merge`] ORs every field independently:
///
/// | prior | caller | merged |
/// |-------|--------|--------|
/// | false | false  | false  |
/// | false | true   | true   |
/// | true  | false  | true   |
/// | true  | true   | true   |
///
/// `display_message` follows the same rule as the other three; a wrap can never reset a
/// flag to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DisplayFlags {
    /// Print the message to the console.
    pub display_message: bool,
    /// Print the command usage after the message.
    pub display_usage: bool,
    /// The message was already printed; do not print it again.
    pub already_displayed: bool,
    /// The failure was reported by the remote application rather than the client.
    pub application_fault: bool,
}

impl DisplayFlags {
    pub const NONE: DisplayFlags = DisplayFlags {
        display_message: false,
        display_usage: false,
        already_displayed: false,
        application_fault: false,
    };

    pub const fn message() -> Self {
        DisplayFlags {
            display_message: true,
            ..Self::NONE
        }
    }

    pub const fn message_and_usage() -> Self {
        DisplayFlags {
            display_message: true,
            display_usage: true,
            ..Self::NONE
        }
    }

    pub const fn with_usage(self) -> Self {
        DisplayFlags {
            display_usage: true,
            ..self
        }
    }

    pub const fn with_already_displayed(self) -> Self {
        DisplayFlags {
            already_displayed: true,
            ..self
        }
    }

    pub const fn with_application_fault(self) -> Self {
        DisplayFlags {
            application_fault: true,
            ..self
        }
    }

    /// OR-merge `self` (the wrapped error's flags) with `other` (the caller's flags).
    pub const fn merge(self, other: DisplayFlags) -> Self {
        DisplayFlags {
            display_message: self.display_message || other.display_message,
            display_usage: self.display_usage || other.display_usage,
            already_displayed: self.already_displayed || other.already_displayed,
            application_fault: self.application_fault || other.application_fault,
        }
    }
}

/// Failure taxonomy. The payload is the human-readable message shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Malformed or missing command arguments.
    #[error("{0}")]
    Usage(String),

    /// Well-formed but semantically invalid input.
    #[error("{0}")]
    Validation(String),

    /// A local file could not be read.
    #[error("{0}")]
    Io(String),

    /// The remote route-management service call failed.
    #[error("{0}")]
    Network(String),

    /// A query matched no API.
    #[error("{0}")]
    NotFound(String),

    /// Client configuration is missing or invalid.
    #[error("{0}")]
    Config(String),
}

impl ErrorKind {
    pub fn message(&self) -> &str {
        match self {
            ErrorKind::Usage(m)
            | ErrorKind::Validation(m)
            | ErrorKind::Io(m)
            | ErrorKind::Network(m)
            | ErrorKind::NotFound(m)
            | ErrorKind::Config(m) => m,
        }
    }

    /// Same category, new message.
    pub fn with_message(&self, message: String) -> ErrorKind {
        match self {
            ErrorKind::Usage(_) => ErrorKind::Usage(message),
            ErrorKind::Validation(_) => ErrorKind::Validation(message),
            ErrorKind::Io(_) => ErrorKind::Io(message),
            ErrorKind::Network(_) => ErrorKind::Network(message),
            ErrorKind::NotFound(_) => ErrorKind::NotFound(message),
            ErrorKind::Config(_) => ErrorKind::Config(message),
        }
    }
}

/// The value a [`ComposedError`] wraps.
///
/// Whether a wrapped error already carries an exit code and flags is decided by matching
/// on [`Cause::Composed`].
#[derive(Debug, Error)]
pub enum Cause {
    #[error(transparent)]
    Composed(Box<ComposedError>),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Name(#[from] QualifiedNameError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

impl From<ComposedError> for Cause {
    fn from(err: ComposedError) -> Self {
        Cause::Composed(Box::new(err))
    }
}

/// Layered command error. Immutable once constructed; wrapping produces a new value.
#[derive(Debug)]
pub struct ComposedError {
    kind: ErrorKind,
    exit_code: ExitCode,
    flags: DisplayFlags,
    source: Option<Box<Cause>>,
}

impl ComposedError {
    /// Fresh construction at the point a failure is first detected.
    pub fn new(kind: ErrorKind, exit_code: ExitCode, flags: DisplayFlags) -> Self {
        Self {
            kind,
            exit_code,
            flags,
            source: None,
        }
    }

    /// Wrap `prior` under a new root-cause message.
    ///
    /// A wrapped `ComposedError` contributes its exit code (overriding `fallback`) and its
    /// flags (OR-merged with `flags`). Any other cause is kept for diagnostics only, and
    /// the result uses `fallback` and `flags` as given.
    pub fn wrap(
        kind: ErrorKind,
        prior: impl Into<Cause>,
        fallback: ExitCode,
        flags: DisplayFlags,
    ) -> Self {
        let prior = prior.into();
        let (exit_code, flags) = match &prior {
            Cause::Composed(inner) => (inner.exit_code, inner.flags.merge(flags)),
            _ => (fallback, flags),
        };
        Self {
            kind,
            exit_code,
            flags,
            source: Some(Box::new(prior)),
        }
    }

    /// Missing or malformed arguments: exit code 2, message and usage displayed.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::Usage(message.into()),
            ExitCode::Usage,
            DisplayFlags::message_and_usage(),
        )
    }

    /// Semantically invalid input: exit code 1, message and usage displayed.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::Validation(message.into()),
            ExitCode::General,
            DisplayFlags::message_and_usage(),
        )
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        self.kind.message()
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }

    pub fn flags(&self) -> DisplayFlags {
        self.flags
    }

    pub fn cause(&self) -> Option<&Cause> {
        self.source.as_deref()
    }

    /// True when the dispatcher should print the message.
    pub fn should_print_message(&self) -> bool {
        self.flags.display_message && !self.flags.already_displayed
    }

    /// Walk the source chain to the innermost error.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        let mut current: &(dyn StdError + 'static) = self;
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }

    /// This error followed by every error in its source chain.
    pub fn chain(&self) -> impl Iterator<Item = &(dyn StdError + 'static)> {
        std::iter::successors(Some(self as &(dyn StdError + 'static)), |e: &&(dyn StdError + 'static)| (*e).source())
    }
}

impl fmt::Display for ComposedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.message())
    }
}

impl StdError for ComposedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_deref().map(|c| c as &(dyn StdError + 'static))
    }
}
