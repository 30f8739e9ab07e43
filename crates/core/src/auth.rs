use serde::{Deserialize, Serialize};

use crate::TenantId;

/// Caller identity persisted in the authenticated session.
///
/// The session collaborator writes this value; the authorization core only
/// reads it. `role` is a plain role name and may reference a role that no
/// longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    subject: String,
    display_name: String,
    email: String,
    role: String,
    #[serde(default = "approved_by_default")]
    approved: bool,
    tenant_id: TenantId,
}

fn approved_by_default() -> bool {
    true
}

impl UserIdentity {
    /// Creates an approved user identity from session and tenancy data.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
        tenant_id: TenantId,
    ) -> Self {
        Self {
            subject: subject.into(),
            display_name: display_name.into(),
            email: email.into(),
            role: role.into(),
            approved: true,
            tenant_id,
        }
    }

    /// Overrides the approval flag.
    #[must_use]
    pub fn with_approved(mut self, approved: bool) -> Self {
        self.approved = approved;
        self
    }

    /// Returns the identity holding a different role name.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Returns the stable identity identifier.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the display name for the current user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the email address used as the ownership identifier.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns the role name recorded for the identity.
    #[must_use]
    pub fn role(&self) -> &str {
        self.role.as_str()
    }

    /// Returns whether an administrator approved the account.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.approved
    }

    /// Returns the tenant linked to the identity.
    #[must_use]
    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}
