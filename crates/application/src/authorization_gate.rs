use dispatchdesk_core::{AppError, AppResult, UserIdentity};
use dispatchdesk_domain::{
    AssignedResource, DenialReason, PermissionSet, ReservedRole, RoleRequirement, TicketAction,
};

use crate::OwnershipResolver;

/// Explicit per-request caller context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    identity: Option<UserIdentity>,
}

impl RequestContext {
    /// Context of a request without a session identity.
    #[must_use]
    pub fn anonymous() -> Self {
        Self { identity: None }
    }

    /// Context of a request carrying a session identity.
    #[must_use]
    pub fn authenticated(identity: UserIdentity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// Returns the attached identity, if any.
    #[must_use]
    pub fn identity(&self) -> Option<&UserIdentity> {
        self.identity.as_ref()
    }
}

/// Outcome of a fine-grained authorization decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// The caller may proceed.
    Granted,
    /// The caller is denied for the attached reason.
    Denied(DenialReason),
}

impl AccessDecision {
    /// Returns whether access was granted.
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Converts the decision into an application result.
    pub fn into_result(self) -> AppResult<()> {
        match self {
            Self::Granted => Ok(()),
            Self::Denied(reason) => Err(AppError::from(reason)),
        }
    }
}

/// Coarse request guards and the owned-resource combinator.
///
/// Gates compose in order: authenticated, then optionally elevated or super,
/// then fine-grained capability and ownership checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationGate;

impl AuthorizationGate {
    /// Returns the caller identity or fails with `Unauthorized`.
    pub fn require_authenticated(context: &RequestContext) -> AppResult<&UserIdentity> {
        context
            .identity()
            .ok_or_else(|| AppError::from(DenialReason::MissingAuthentication))
    }

    /// Requires an administrator or super-role caller.
    pub fn require_elevated(context: &RequestContext) -> AppResult<&UserIdentity> {
        let identity = Self::require_authenticated(context)?;
        Self::check_elevated(identity)?;
        Ok(identity)
    }

    /// Requires a super-role caller.
    pub fn require_super(context: &RequestContext) -> AppResult<&UserIdentity> {
        let identity = Self::require_authenticated(context)?;
        Self::check_super(identity)?;
        Ok(identity)
    }

    /// Fails with `Forbidden` unless the identity holds an elevated role.
    pub fn check_elevated(identity: &UserIdentity) -> AppResult<()> {
        let elevated = ReservedRole::from_name(identity.role())
            .map(|role| role.is_elevated())
            .unwrap_or(false);
        if elevated {
            return Ok(());
        }

        Err(AppError::from(DenialReason::InsufficientRole {
            role: identity.role().to_owned(),
            required: RoleRequirement::Elevated,
        }))
    }

    /// Fails with `Forbidden` unless the identity holds the super-role.
    pub fn check_super(identity: &UserIdentity) -> AppResult<()> {
        if ReservedRole::is_super_name(identity.role()) {
            return Ok(());
        }

        Err(AppError::from(DenialReason::InsufficientRole {
            role: identity.role().to_owned(),
            required: RoleRequirement::Super,
        }))
    }

    /// Combines the "all" and "own" capability pair of an action with
    /// resource ownership.
    ///
    /// Grants when the "all" capability is on, or when the "own" capability is
    /// on and the caller is an assignee.
    #[must_use]
    pub fn authorize_owned_action<R>(
        identity: &UserIdentity,
        permissions: &PermissionSet,
        action: TicketAction,
        resource: &R,
    ) -> AccessDecision
    where
        R: AssignedResource + ?Sized,
    {
        if permissions.is_granted(action.all_capability()) {
            return AccessDecision::Granted;
        }

        if !permissions.is_granted(action.own_capability()) {
            return AccessDecision::Denied(DenialReason::MissingCapability {
                role: identity.role().to_owned(),
                capabilities: vec![action.all_capability(), action.own_capability()],
            });
        }

        if OwnershipResolver::owns(identity, resource) {
            return AccessDecision::Granted;
        }

        AccessDecision::Denied(DenialReason::NotAssigned {
            action,
            email: identity.email().to_owned(),
            assignees: resource
                .assignees()
                .iter()
                .map(|assignee| assignee.email().to_owned())
                .collect(),
        })
    }
}
