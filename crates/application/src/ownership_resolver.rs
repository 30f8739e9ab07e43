use dispatchdesk_core::UserIdentity;
use dispatchdesk_domain::AssignedResource;

/// Decides whether an identity owns an assigned resource.
///
/// Ownership is keyed by email, compared case-insensitively. Unassigned
/// resources are owned by nobody.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnershipResolver;

impl OwnershipResolver {
    /// Returns whether the identity appears among the resource assignees.
    #[must_use]
    pub fn owns<R>(identity: &UserIdentity, resource: &R) -> bool
    where
        R: AssignedResource + ?Sized,
    {
        resource
            .assignees()
            .iter()
            .any(|assignee| assignee.matches_email(identity.email()))
    }
}
