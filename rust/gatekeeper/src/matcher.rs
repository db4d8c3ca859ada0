use crate::{Action, Permission, Requirement, Resource};

/// Whether `granted` satisfies every entry of `required`.
///
/// Each requirement must be covered by a single granted permission on its
/// resource; actions are never combined across several permissions that
/// share a resource. An empty `required` list is always satisfied.
pub fn satisfies<R: Resource, A: Action>(
    granted: &[Permission<R, A>],
    required: &[Requirement<R, A>],
) -> bool {
    first_unmet(granted, required).is_none()
}

/// The first requirement in `required` that no single permission in
/// `granted` covers.
pub fn first_unmet<'a, R: Resource, A: Action>(
    granted: &[Permission<R, A>],
    required: &'a [Requirement<R, A>],
) -> Option<&'a Requirement<R, A>> {
    required
        .iter()
        .find(|requirement| !granted.iter().any(|permission| permission.covers(requirement)))
}
