//! In-memory permission source for tests and prototypes.
//!
//! Enabled with the `helpers` feature.
//!
//! ```
//! # #[cfg(feature = "helpers")]
//! # mod example {
//! use gatekeeper::helpers::Directory;
//! use gatekeeper::Permission;
//!
//! #[derive(Debug, Clone, PartialEq, Eq, Hash)]
//! enum Resource { Invoice }
//!
//! #[derive(Debug, Clone, PartialEq, Eq, Hash)]
//! enum Action { Read, Approve }
//!
//! pub fn example() -> Directory<Resource, Action> {
//!     Directory::default()
//!         .with_permission("clerk", Permission::new(Resource::Invoice, [Action::Read]))
//!         .with_permission(
//!             "manager",
//!             Permission::new(Resource::Invoice, [Action::Read, Action::Approve]),
//!         )
//!         .with_disabled_user("intern")
//! }
//! # }
//! ```

use crate::{Action, Identifier, Permission, PermissionSource, Resource};
use async_trait::async_trait;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct Account<R: Resource, A: Action> {
    enabled: bool,
    permissions: Vec<Permission<R, A>>,
}

impl<R: Resource, A: Action> Default for Account<R, A> {
    fn default() -> Self {
        Self {
            enabled: true,
            permissions: Vec::new(),
        }
    }
}

/// A fixed set of callers and their grants.
///
/// Callers that were never added fail validation and have no grants.
#[derive(Debug, Clone)]
pub struct Directory<R: Resource, A: Action> {
    accounts: HashMap<Identifier, Account<R, A>>,
}

impl<R: Resource, A: Action> Default for Directory<R, A> {
    fn default() -> Self {
        Self {
            accounts: HashMap::new(),
        }
    }
}

impl<R: Resource, A: Action> Directory<R, A> {
    /// Add an enabled caller without grants.
    pub fn with_user(mut self, identifier: impl Into<Identifier>) -> Self {
        self.accounts.entry(identifier.into()).or_default();
        self
    }

    /// Add `permission` to the caller's grants, adding the caller if needed.
    pub fn with_permission(
        mut self,
        identifier: impl Into<Identifier>,
        permission: Permission<R, A>,
    ) -> Self {
        self.accounts
            .entry(identifier.into())
            .or_default()
            .permissions
            .push(permission);
        self
    }

    /// Add a caller that exists but fails validation.
    pub fn with_disabled_user(mut self, identifier: impl Into<Identifier>) -> Self {
        self.accounts.entry(identifier.into()).or_default().enabled = false;
        self
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<R: Resource, A: Action> PermissionSource<R, A> for Directory<R, A> {
    async fn validate_user(&self, identifier: &Identifier) -> anyhow::Result<bool> {
        Ok(self
            .accounts
            .get(identifier)
            .is_some_and(|account| account.enabled))
    }

    async fn get_permissions(
        &self,
        identifier: &Identifier,
    ) -> anyhow::Result<Vec<Permission<R, A>>> {
        Ok(self
            .accounts
            .get(identifier)
            .map(|account| account.permissions.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testresult::TestResult;

    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
    use wasm_bindgen_test::wasm_bindgen_test;
    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
    wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_dedicated_worker);

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    enum Resource {
        Invoice,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    enum Action {
        Read,
    }

    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), tokio::test)]
    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    async fn it_knows_only_added_users() -> TestResult {
        let directory = Directory::<Resource, Action>::default().with_user("ann");

        assert!(directory.validate_user(&"ann".into()).await?);
        assert!(!directory.validate_user(&"bob".into()).await?);
        assert!(directory.get_permissions(&"bob".into()).await?.is_empty());
        Ok(())
    }

    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), tokio::test)]
    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    async fn it_keeps_grants_of_disabled_users() -> TestResult {
        let grant = Permission::new(Resource::Invoice, [Action::Read]);
        let directory = Directory::default()
            .with_permission(4, grant.clone())
            .with_disabled_user(4);

        assert!(!directory.validate_user(&4.into()).await?);
        assert_eq!(directory.get_permissions(&4.into()).await?, vec![grant]);
        Ok(())
    }
}
