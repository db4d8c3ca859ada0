use crate::{
    Action, Arguments, AuthorizationError, ConditionalSend, Identifier, Operation, Payload,
    PermissionSource, Requirement, Resource, first_unmet, resolve,
};
use async_trait::async_trait;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tracing::{debug, warn};

/// Declared permission requirements paired with the [`PermissionSource`]
/// that checks callers against them.
///
/// A guard is built once and then used to [`protect`](Guard::protect) any
/// number of operations. Cloning a guard is cheap; clones share the same
/// requirements and source.
pub struct Guard<R: Resource, A: Action, S: ?Sized> {
    requirements: Arc<[Requirement<R, A>]>,
    source: Arc<S>,
}

impl<R: Resource, A: Action, S: ?Sized> Clone for Guard<R, A, S> {
    fn clone(&self) -> Self {
        Self {
            requirements: self.requirements.clone(),
            source: self.source.clone(),
        }
    }
}

impl<R: Resource, A: Action, S: ?Sized> Debug for Guard<R, A, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guard")
            .field("requirements", &self.requirements)
            .finish_non_exhaustive()
    }
}

impl<R, A, S> Guard<R, A, S>
where
    R: Resource,
    A: Action,
    S: PermissionSource<R, A> + ?Sized,
{
    /// Build a guard requiring every entry of `requirements`, checked
    /// against `source`.
    pub fn new<I>(requirements: I, source: S) -> Self
    where
        S: Sized,
        I: IntoIterator,
        I::Item: Into<Requirement<R, A>>,
    {
        Self::shared(requirements, Arc::new(source))
    }

    /// Like [`Guard::new`], for a source that is already shared elsewhere.
    /// The source may be a trait object such as
    /// `Arc<dyn PermissionSource<R, A>>`.
    pub fn shared<I>(requirements: I, source: Arc<S>) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Requirement<R, A>>,
    {
        Self {
            requirements: requirements.into_iter().map(Into::into).collect(),
            source,
        }
    }

    /// The declared requirements, in declaration order.
    pub fn requirements(&self) -> &[Requirement<R, A>] {
        &self.requirements
    }

    /// The source callers are checked against.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Wrap `operation` so that every call is authorized first.
    pub fn protect<O>(&self, operation: O) -> Protected<R, A, S, O> {
        Protected {
            guard: self.clone(),
            operation,
        }
    }

    /// Check an already resolved caller: validate them, fetch their grants
    /// and match the grants against the requirements.
    pub async fn authorize(&self, identifier: &Identifier) -> Result<(), AuthorizationError> {
        let valid = self
            .source
            .validate_user(identifier)
            .await
            .map_err(AuthorizationError::wrap)?;
        if !valid {
            warn!(%identifier, "Rejected caller that failed validation");
            return Err(AuthorizationError::unauthorized());
        }

        let granted = self
            .source
            .get_permissions(identifier)
            .await
            .map_err(AuthorizationError::wrap)?;
        if let Some(requirement) = first_unmet(&granted, &self.requirements) {
            warn!(%identifier, %requirement, "Rejected caller lacking permissions");
            return Err(AuthorizationError::forbidden());
        }

        debug!(%identifier, "Authorized caller");
        Ok(())
    }

    /// Resolve the caller from a call context and [`authorize`](Guard::authorize)
    /// them. Returns the resolved identifier.
    pub async fn check<P: Payload + ?Sized>(
        &self,
        payload: Option<&P>,
        arguments: &Arguments,
    ) -> Result<Identifier, AuthorizationError> {
        let identifier = resolve(payload, arguments)?;
        self.authorize(&identifier).await?;
        Ok(identifier)
    }
}

/// An [`Operation`] that only runs once its [`Guard`] authorizes the caller.
///
/// The output is the wrapped operation's output, untouched, inside `Ok`.
/// Authorization failures are reported as `Err`.
pub struct Protected<R: Resource, A: Action, S: ?Sized, O> {
    guard: Guard<R, A, S>,
    operation: O,
}

impl<R: Resource, A: Action, S: ?Sized, O: Clone> Clone for Protected<R, A, S, O> {
    fn clone(&self) -> Self {
        Self {
            guard: self.guard.clone(),
            operation: self.operation.clone(),
        }
    }
}

impl<R: Resource, A: Action, S: ?Sized, O> Debug for Protected<R, A, S, O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Protected")
            .field("guard", &self.guard)
            .finish_non_exhaustive()
    }
}

impl<R: Resource, A: Action, S: ?Sized, O> Protected<R, A, S, O> {
    /// The guard enforcing access to this operation.
    pub fn guard(&self) -> &Guard<R, A, S> {
        &self.guard
    }

    /// The wrapped operation.
    pub fn inner(&self) -> &O {
        &self.operation
    }

    /// Drop the guard and return the wrapped operation.
    pub fn into_inner(self) -> O {
        self.operation
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<P, R, A, S, O> Operation<P> for Protected<R, A, S, O>
where
    P: Payload + ConditionalSend + 'static,
    R: Resource,
    A: Action,
    S: PermissionSource<R, A> + ?Sized,
    O: Operation<P>,
{
    type Output = Result<O::Output, AuthorizationError>;

    async fn call(&self, payload: Option<P>, arguments: Arguments) -> Self::Output {
        // Resolve before the first await so the payload is not borrowed
        // across suspension points.
        let identifier = resolve(payload.as_ref(), &arguments)?;
        self.guard.authorize(&identifier).await?;

        Ok(self.operation.call(payload, arguments).await)
    }
}
