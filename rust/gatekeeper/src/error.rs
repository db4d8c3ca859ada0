use std::fmt::{Display, Formatter};
use tracing::debug;

/// Classification of an [`AuthorizationError`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AuthorizationErrorKind {
    /// Generic failure. Errors that surface while authorizing a call and were
    /// not already classified end up with this kind.
    #[default]
    BadRequest,
    /// No caller identifier could be resolved from the call context.
    MissingIdentity,
    /// The resolved caller failed validation.
    Unauthorized,
    /// The validated caller lacks the required permissions.
    Forbidden,
}

impl Display for AuthorizationErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Self::BadRequest => "bad request",
            Self::MissingIdentity => "missing identity",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
        };
        f.write_str(kind)
    }
}

/// The error a guard fails a call with.
///
/// Carries a human-readable message and a [`AuthorizationErrorKind`]. Use
/// [`AuthorizationError::wrap`] to turn an arbitrary error into one without
/// losing an existing classification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AuthorizationError {
    message: String,
    kind: AuthorizationErrorKind,
}

impl AuthorizationError {
    /// Create an error of the default [`AuthorizationErrorKind::BadRequest`] kind.
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_kind(message, AuthorizationErrorKind::default())
    }

    /// Create an error with an explicit classification.
    pub fn with_kind(message: impl Into<String>, kind: AuthorizationErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// No caller identifier was found in the payload or the arguments.
    pub fn missing_identity() -> Self {
        Self::with_kind(
            "No user ID found in request",
            AuthorizationErrorKind::MissingIdentity,
        )
    }

    /// The caller failed validation.
    pub fn unauthorized() -> Self {
        Self::with_kind("Unauthorized user", AuthorizationErrorKind::Unauthorized)
    }

    /// The caller lacks required permissions.
    pub fn forbidden() -> Self {
        Self::with_kind("Insufficient permissions", AuthorizationErrorKind::Forbidden)
    }

    /// Convert any error into an [`AuthorizationError`].
    ///
    /// An error that already is an [`AuthorizationError`] is returned as is.
    /// Anything else becomes a [`AuthorizationErrorKind::BadRequest`] whose
    /// message retains the original one along with all of its context.
    pub fn wrap(error: anyhow::Error) -> Self {
        match error.downcast::<Self>() {
            Ok(error) => error,
            Err(error) => {
                let error = format!("{error:#}");
                debug!(%error, "Wrapping unclassified authorization failure");
                Self::new(format!("Authorization failed: {error}"))
            }
        }
    }

    /// Human-readable description of the failure.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Classification of the failure.
    pub fn kind(&self) -> AuthorizationErrorKind {
        self.kind
    }
}
