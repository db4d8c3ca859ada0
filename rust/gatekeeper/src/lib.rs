#![warn(missing_docs)]

//! Permission guards for async operations.
//!
//! This crate wraps arbitrary async operations with an access check: before
//! the operation runs, the caller is identified, validated, and their granted
//! permissions are compared against the permissions the guard requires. It is
//! independent of any web framework or data store.
//!
//! # Quick Example
//!
//! ```rust
//! use gatekeeper::{
//!     Arguments, Guard, Identifier, Operation, Permission, PermissionSource, Requirement,
//!     operation_fn,
//! };
//! use serde_json::Value;
//!
//! #[derive(Debug, Clone, PartialEq, Eq, Hash)]
//! enum Resource { User }
//!
//! #[derive(Debug, Clone, PartialEq, Eq, Hash)]
//! enum Action { Read, Write }
//!
//! // The permission source is the integrator's store adapter.
//! struct Accounts;
//!
//! #[async_trait::async_trait]
//! impl PermissionSource<Resource, Action> for Accounts {
//!     async fn validate_user(&self, identifier: &Identifier) -> anyhow::Result<bool> {
//!         Ok(*identifier == Identifier::from(7))
//!     }
//!
//!     async fn get_permissions(
//!         &self,
//!         _identifier: &Identifier,
//!     ) -> anyhow::Result<Vec<Permission<Resource, Action>>> {
//!         Ok(vec![Permission::new(Resource::User, [Action::Read, Action::Write])])
//!     }
//! }
//!
//! # async fn example() -> anyhow::Result<()> {
//! let guard = Guard::new([Requirement::new(Resource::User, [Action::Read])], Accounts);
//!
//! let get_user = guard.protect(operation_fn(
//!     |_payload: Option<Value>, arguments: Arguments| async move {
//!         arguments.get("user_id").cloned()
//!     },
//! ));
//!
//! let user = get_user.call(None, Arguments::new().with("user_id", 7)).await?;
//! assert_eq!(user, Some(Value::from(7)));
//! # Ok(())
//! # }
//! ```
//!
//! # Flow
//!
//! Every call of a [`Protected`] operation goes through the same steps, in
//! this order:
//!
//! ```text
//! payload + arguments ─▶ resolve ─▶ Identifier
//!                                     │
//!                    PermissionSource::validate_user   (false ⇒ Unauthorized)
//!                                     │
//!                    PermissionSource::get_permissions
//!                                     │
//!                    satisfies(granted, required)      (false ⇒ Forbidden)
//!                                     │
//!                    wrapped Operation::call
//! ```
//!
//! # Key Types
//!
//! | Type | Role |
//! |------|------|
//! | [`Permission<R, A>`] | A grant of a set of actions on one resource |
//! | [`Requirement<R, A>`] | A (resource, actions) pair a guard demands |
//! | [`Identifier`] | Opaque caller token |
//! | [`Payload`] | Typed accessors for identity fields on a request payload |
//! | [`Arguments`] | Open map of named call arguments |
//! | [`PermissionSource`] | Validates callers and fetches their grants |
//! | [`Operation`] | An async operation taking a payload and arguments |
//! | [`Guard`] | Declared requirements plus a permission source |
//! | [`Protected`] | An operation wrapped by a guard |
//! | [`AuthorizationError`] | The single failure type of a guard |

mod sync;
pub use sync::*;

mod error;
pub use error::*;

mod permission;
pub use permission::*;

mod matcher;
pub use matcher::*;

mod identifier;
pub use identifier::*;

mod payload;
pub use payload::*;

mod identity;
pub use identity::*;

mod source;
pub use source::*;

mod operation;
pub use operation::*;

mod guard;
pub use guard::*;

#[cfg(any(test, feature = "helpers"))]
pub mod helpers;
