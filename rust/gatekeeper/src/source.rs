use crate::{Action, ConditionalSync, Identifier, Permission, Resource};
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for stores that know who callers are and what they may do.
///
/// A [`Guard`](crate::Guard) asks the source to validate the caller and then
/// to list the caller's grants. Both lookups are async and may perform I/O.
/// One source instance serves every call of every operation its guard
/// protects, so implementations must tolerate concurrent use.
///
/// Errors are reported through [`anyhow`]. Returning an
/// [`AuthorizationError`](crate::AuthorizationError) keeps its
/// classification; any other error fails the call as a bad request that
/// carries the original message.
///
/// # Example
///
/// ```
/// use gatekeeper::{Identifier, Permission, PermissionSource};
/// use async_trait::async_trait;
/// use std::collections::HashMap;
///
/// #[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// enum Resource { Project }
///
/// #[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// enum Action { View }
///
/// struct Members(HashMap<Identifier, Vec<Permission<Resource, Action>>>);
///
/// #[cfg_attr(not(target_arch = "wasm32"), async_trait)]
/// #[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
/// impl PermissionSource<Resource, Action> for Members {
///     async fn validate_user(&self, identifier: &Identifier) -> anyhow::Result<bool> {
///         Ok(self.0.contains_key(identifier))
///     }
///
///     async fn get_permissions(
///         &self,
///         identifier: &Identifier,
///     ) -> anyhow::Result<Vec<Permission<Resource, Action>>> {
///         Ok(self.0.get(identifier).cloned().unwrap_or_default())
///     }
/// }
/// ```
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait PermissionSource<R: Resource, A: Action>: ConditionalSync {
    /// Whether `identifier` refers to an existing caller that is allowed to
    /// act at all.
    async fn validate_user(&self, identifier: &Identifier) -> anyhow::Result<bool>;

    /// The caller's current grants. An empty list means no grants.
    async fn get_permissions(&self, identifier: &Identifier)
    -> anyhow::Result<Vec<Permission<R, A>>>;
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<R, A, S> PermissionSource<R, A> for Arc<S>
where
    R: Resource,
    A: Action,
    S: PermissionSource<R, A> + ?Sized,
{
    async fn validate_user(&self, identifier: &Identifier) -> anyhow::Result<bool> {
        (**self).validate_user(identifier).await
    }

    async fn get_permissions(
        &self,
        identifier: &Identifier,
    ) -> anyhow::Result<Vec<Permission<R, A>>> {
        (**self).get_permissions(identifier).await
    }
}
