use crate::domain::order::OrderError;

// ============================================================================
// Error Taxonomy
// ============================================================================
//
// `CancellationError` fails the whole call and is rendered as a GraphQL-style
// error by the transport. `DomainError` is a recoverable, user-facing failure
// that resolvers turn into an `{error}` payload. Eligibility rejections are
// not errors at all.
//
// ============================================================================

/// Errors that abort a resolver call
#[derive(Debug, thiserror::Error)]
pub enum CancellationError {
    #[error("{0}")]
    Input(String),

    #[error("{0}")]
    Authorization(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CancellationError {
    /// Category reported in the error's `extensions`
    pub fn category(&self) -> &'static str {
        match self {
            CancellationError::Input(_) => "graphql-input",
            CancellationError::Authorization(_) => "graphql-authorization",
            CancellationError::NotFound(_) => "graphql-no-such-entity",
            CancellationError::Internal(_) => "internal",
        }
    }
}

/// Business rule violation reported by order management
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct DomainError {
    pub message: String,
}

impl DomainError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<OrderError> for DomainError {
    fn from(err: OrderError) -> Self {
        Self::new(err.to_string())
    }
}

/// Failure of a delegated cancellation action
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<OrderError> for ActionError {
    fn from(err: OrderError) -> Self {
        ActionError::Domain(err.into())
    }
}

/// Failure of an order repository lookup
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("The entity that was requested doesn't exist. Verify the entity and try again.")]
    NoSuchEntity { id: i64 },

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}
