//! Error types for collaborator fetch operations.
//!
//! Errors carry the failing fetch and its subject so the snapshot loader can
//! log exactly which input degraded to its default.

use std::fmt;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Where a repository error happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Trait method that failed, e.g. `fetch_onchain_count`.
    pub operation: Option<&'static str>,
    /// What was being fetched, e.g. `collection badges` or `wallet 0x1`.
    pub subject: Option<String>,
    /// Upstream-provided cause, verbatim.
    pub cause: Option<String>,
    /// Whether calling again may succeed.
    pub retryable: bool,
}

impl ErrorContext {
    pub fn during(operation: &'static str) -> Self {
        Self {
            operation: Some(operation),
            ..Default::default()
        }
    }

    pub fn about(mut self, kind: &str, id: impl fmt::Display) -> Self {
        self.subject = Some(format!("{} {}", kind, id));
        self
    }

    pub fn caused_by(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.operation.unwrap_or("unknown operation");
        write!(f, "({}", op)?;
        if let Some(subject) = &self.subject {
            write!(f, " on {}", subject)?;
        }
        if let Some(cause) = &self.cause {
            write!(f, "; {}", cause)?;
        }
        if self.retryable {
            f.write_str("; retryable")?;
        }
        f.write_str(")")
    }
}

/// Failure of one collaborator fetch.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Upstream unreachable: chain RPC, indexer or catalog service.
    #[error("Upstream unavailable: {message} {context}")]
    Unavailable {
        message: String,
        context: ErrorContext,
    },

    #[error("Not found: {message} {context}")]
    NotFound {
        message: String,
        context: ErrorContext,
    },

    /// Upstream answered with data that could not be understood.
    #[error("Malformed upstream data: {message} {context}")]
    Malformed {
        message: String,
        context: ErrorContext,
    },

    #[error("Repository misconfigured: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message} {context}")]
    Internal {
        message: String,
        context: ErrorContext,
    },
}

impl RepositoryError {
    /// Upstream outage; always retryable.
    pub fn unavailable(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Unavailable {
            message: message.into(),
            context: context.retryable(),
        }
    }

    pub fn not_found(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::NotFound {
            message: message.into(),
            context,
        }
    }

    pub fn malformed(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Malformed {
            message: message.into(),
            context,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Internal {
            message: message.into(),
            context,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.context().is_some_and(|ctx| ctx.retryable)
    }

    /// Fetch context; configuration errors happen before any fetch and have none.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::Unavailable { context, .. }
            | Self::NotFound { context, .. }
            | Self::Malformed { context, .. }
            | Self::Internal { context, .. } => Some(context),
            Self::Configuration { .. } => None,
        }
    }

    /// Name of the failing fetch, when known.
    pub fn operation(&self) -> Option<&'static str> {
        self.context().and_then(|ctx| ctx.operation)
    }
}

impl From<crate::parsing::ParseError> for RepositoryError {
    fn from(err: crate::parsing::ParseError) -> Self {
        RepositoryError::malformed(
            "snapshot document rejected",
            ErrorContext::default().caused_by(err.to_string()),
        )
    }
}
