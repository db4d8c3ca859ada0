use crate::ConditionalSync;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{Debug, Display, Formatter};
use std::hash::Hash;

/// A protected entity category, usually a fieldless enum owned by the
/// integrator.
///
/// This trait is auto-implemented for every type that satisfies its bounds.
pub trait Resource: Clone + Eq + Hash + Debug + ConditionalSync + 'static {}

impl<T> Resource for T where T: Clone + Eq + Hash + Debug + ConditionalSync + 'static {}

/// An operation verb that may be granted on a [`Resource`].
///
/// This trait is auto-implemented for every type that satisfies its bounds.
pub trait Action: Clone + Eq + Hash + Debug + ConditionalSync + 'static {}

impl<T> Action for T where T: Clone + Eq + Hash + Debug + ConditionalSync + 'static {}

/// A grant of a set of actions on one resource.
///
/// Permissions are produced by a [`PermissionSource`](crate::PermissionSource)
/// for every check and are not retained by the guard afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission<R: Resource, A: Action> {
    resource: R,
    actions: HashSet<A>,
}

impl<R: Resource, A: Action> Permission<R, A> {
    /// Grant `actions` on `resource`. Duplicate actions collapse.
    pub fn new(resource: R, actions: impl IntoIterator<Item = A>) -> Self {
        Self {
            resource,
            actions: actions.into_iter().collect(),
        }
    }

    /// The resource this permission applies to.
    pub fn resource(&self) -> &R {
        &self.resource
    }

    /// The granted actions.
    pub fn actions(&self) -> &HashSet<A> {
        &self.actions
    }

    /// Whether this single grant covers the whole `requirement`: same resource
    /// and every required action granted.
    pub fn covers(&self, requirement: &Requirement<R, A>) -> bool {
        self.resource == requirement.resource && requirement.actions.is_subset(&self.actions)
    }
}

impl<R: Resource, A: Action> Display for Permission<R, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Permission(resource={:?}, actions={:?})",
            self.resource, self.actions
        )
    }
}

/// A (resource, actions) pair a [`Guard`](crate::Guard) demands from callers.
///
/// Requirements are declared once when the guard is built. A tuple of a
/// resource and any iterable of actions converts into a requirement:
///
/// ```
/// use gatekeeper::Requirement;
///
/// #[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// enum Resource { Report }
///
/// #[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// enum Action { Read, Export }
///
/// let requirement: Requirement<_, _> = (Resource::Report, [Action::Read, Action::Export]).into();
/// assert_eq!(requirement.actions().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement<R: Resource, A: Action> {
    resource: R,
    actions: HashSet<A>,
}

impl<R: Resource, A: Action> Requirement<R, A> {
    /// Require `actions` on `resource`.
    pub fn new(resource: R, actions: impl IntoIterator<Item = A>) -> Self {
        Self {
            resource,
            actions: actions.into_iter().collect(),
        }
    }

    /// The required resource.
    pub fn resource(&self) -> &R {
        &self.resource
    }

    /// The actions that must all be granted by a single permission.
    pub fn actions(&self) -> &HashSet<A> {
        &self.actions
    }
}

impl<R: Resource, A: Action, I: IntoIterator<Item = A>> From<(R, I)> for Requirement<R, A> {
    fn from((resource, actions): (R, I)) -> Self {
        Self::new(resource, actions)
    }
}

impl<R: Resource, A: Action> Display for Requirement<R, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?})", self.resource, self.actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    enum Resource {
        User,
        Invoice,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    enum Action {
        Read,
        Write,
    }

    #[test]
    fn it_deduplicates_actions() {
        let permission = Permission::new(Resource::User, [Action::Read, Action::Read]);
        assert_eq!(permission.actions().len(), 1);
    }

    #[test]
    fn it_ignores_action_order_in_equality() {
        let left = Permission::new(Resource::User, [Action::Read, Action::Write]);
        let right = Permission::new(Resource::User, [Action::Write, Action::Read]);
        assert_eq!(left, right);
    }

    #[test]
    fn it_covers_a_subset_of_its_actions() {
        let permission = Permission::new(Resource::User, [Action::Read, Action::Write]);
        assert!(permission.covers(&Requirement::new(Resource::User, [Action::Read])));
        assert!(permission.covers(&Requirement::new(Resource::User, [])));
    }

    #[test]
    fn it_does_not_cover_another_resource() {
        let permission = Permission::new(Resource::User, [Action::Read]);
        assert!(!permission.covers(&Requirement::new(Resource::Invoice, [Action::Read])));
    }

    #[test]
    fn it_does_not_cover_a_superset_of_its_actions() {
        let permission = Permission::new(Resource::User, [Action::Read]);
        assert!(!permission.covers(&Requirement::new(
            Resource::User,
            [Action::Read, Action::Write]
        )));
    }

    #[test]
    fn it_builds_requirements_from_tuples() {
        let requirement: Requirement<_, _> = (Resource::Invoice, vec![Action::Write]).into();
        assert_eq!(requirement, Requirement::new(Resource::Invoice, [Action::Write]));
    }

    #[test]
    fn it_renders_permissions_for_humans() {
        let permission = Permission::new(Resource::User, [Action::Read]);
        assert_eq!(
            permission.to_string(),
            "Permission(resource=User, actions={Read})"
        );
    }

    #[test]
    fn it_loads_grants_stored_as_json() -> testresult::TestResult {
        let permission: Permission<Resource, Action> = serde_json::from_str(
            r#"{ "resource": "invoice", "actions": ["read", "write", "read"] }"#,
        )?;
        assert_eq!(
            permission,
            Permission::new(Resource::Invoice, [Action::Read, Action::Write])
        );
        Ok(())
    }
}
