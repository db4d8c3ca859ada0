use crate::{Arguments, AuthorizationError, Identifier, Payload};
use tracing::trace;

type Accessor<P> = fn(&P) -> Result<Option<Identifier>, AuthorizationError>;

/// Argument keys consulted when the payload does not identify the caller,
/// in priority order.
pub const IDENTITY_ARGUMENTS: [&str; 2] = ["user_id", "admin_id"];

/// Payload accessors in priority order.
fn identity_fields<P: Payload + ?Sized>() -> [(&'static str, Accessor<P>); 3] {
    [
        ("admin_id", P::admin_id as Accessor<P>),
        ("user_id", P::user_id as Accessor<P>),
        ("id", P::id as Accessor<P>),
    ]
}

/// Resolve the caller's [`Identifier`] from a call context.
///
/// A present, non-empty payload is read first (`admin_id`, `user_id`,
/// `id`). Only when it yields nothing are the arguments consulted (`user_id`,
/// then `admin_id`). The two sources are never mixed: a payload field always
/// wins over any argument.
///
/// Fails with [`AuthorizationErrorKind::MissingIdentity`] when neither source
/// names the caller, and with [`AuthorizationErrorKind::BadRequest`] when the
/// first identity field or argument present holds something other than a
/// string or an integer.
///
/// [`AuthorizationErrorKind::MissingIdentity`]: crate::AuthorizationErrorKind::MissingIdentity
/// [`AuthorizationErrorKind::BadRequest`]: crate::AuthorizationErrorKind::BadRequest
pub fn resolve<P: Payload + ?Sized>(
    payload: Option<&P>,
    arguments: &Arguments,
) -> Result<Identifier, AuthorizationError> {
    if let Some(payload) = payload.filter(|payload| !payload.is_empty()) {
        for (field, accessor) in identity_fields::<P>() {
            if let Some(identifier) = accessor(payload)? {
                trace!(source = "payload", field, %identifier, "Resolved caller");
                return Ok(identifier);
            }
        }
    }

    for key in IDENTITY_ARGUMENTS {
        if let Some(value) = arguments.get(key) {
            let identifier = Identifier::from_value(value).ok_or_else(|| {
                AuthorizationError::new(format!("Invalid identifier in argument `{key}`"))
            })?;
            trace!(source = "arguments", field = key, %identifier, "Resolved caller");
            return Ok(identifier);
        }
    }

    Err(AuthorizationError::missing_identity())
}
