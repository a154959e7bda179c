//! Error types for the minilex pipeline.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// The main error type for minilex operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Pushes a frame onto this error's context, creating the context if needed.
    #[must_use]
    pub fn in_frame(mut self, frame: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_frame(frame));
        self
    }

    /// Creates an illegal registration error.
    #[must_use]
    pub fn illegal_registration(component: &'static str, what: impl Into<String>) -> Self {
        Self::new(ErrorKind::IllegalRegistration {
            component,
            what: what.into(),
        })
    }

    /// Creates an unrecognized input error.
    #[must_use]
    pub fn unrecognized_input(text: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnrecognizedInput(text.into()))
    }

    /// Creates a malformed tree error.
    #[must_use]
    pub fn malformed_tree(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedTree(detail.into()))
    }

    /// Creates a non-flat sequence error.
    #[must_use]
    pub fn non_flat(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::NonFlatSequence(detail.into()))
    }

    /// Creates an invalid pattern error.
    #[must_use]
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        })
    }

    /// Creates an arity mismatch error.
    #[must_use]
    pub fn arity_mismatch(tag: &'static str, expected: usize, actual: usize) -> Self {
        Self::new(ErrorKind::ArityMismatch {
            tag,
            expected,
            actual,
        })
    }

    /// Returns true if this error is fatal to the whole pipeline rather than
    /// to a single input text.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self.kind, ErrorKind::UnrecognizedInput(_))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A rule, case, or handler was registered after the component was frozen.
    #[error("cannot register {what} on {component} after first use")]
    IllegalRegistration {
        /// The component that rejected the registration.
        component: &'static str,
        /// What was being registered.
        what: String,
    },

    /// No rule matched and no default is registered.
    #[error("unrecognized input: {0:?}")]
    UnrecognizedInput(String),

    /// The flattener met a value it cannot treat as a node.
    #[error("malformed symbol tree: {0}")]
    MalformedTree(String),

    /// A produced line carries nested structure, or the sequence sentinel leaked.
    #[error("non-flat symbol sequence: {0}")]
    NonFlatSequence(String),

    /// A regex pattern failed to compile at registration.
    #[error("invalid pattern {pattern:?}: {message}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Compiler message.
        message: String,
    },

    /// A variant was constructed with the wrong number of field values.
    #[error("arity mismatch for {tag}: expected {expected} fields, got {actual}")]
    ArityMismatch {
        /// Tag of the variant being constructed.
        tag: &'static str,
        /// Number of declared fields.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// File or terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source tag of the text being processed.
    pub source: Option<String>,
    /// The offending text, if known.
    pub text: Option<String>,
    /// Stack of pipeline frames (rule tags, handler names).
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source tag.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the offending text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "in source {source}")?;
        }
        if let Some(text) = &self.text {
            write!(f, " for {text:?}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
