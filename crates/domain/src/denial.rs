use std::fmt::{Display, Formatter};

use dispatchdesk_core::AppError;

use crate::{Capability, TicketAction};

/// Coarse role requirement enforced by the request gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleRequirement {
    /// Administrator or super-role.
    Elevated,
    /// Super-role only.
    Super,
}

impl RoleRequirement {
    /// Returns a stable label for messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Elevated => "administrator or sysadmin",
            Self::Super => "sysadmin",
        }
    }
}

/// Reason an authorization decision denied the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialReason {
    /// No identity is attached to the request.
    MissingAuthentication,
    /// The caller's role does not meet a coarse role requirement.
    InsufficientRole {
        /// Caller role.
        role: String,
        /// Requirement that failed.
        required: RoleRequirement,
    },
    /// The caller's role lacks every one of the listed capabilities.
    MissingCapability {
        /// Caller role.
        role: String,
        /// Capabilities any of which would have granted access.
        capabilities: Vec<Capability>,
    },
    /// The caller may act on assigned resources only and is not an assignee.
    NotAssigned {
        /// Attempted action.
        action: TicketAction,
        /// Caller email.
        email: String,
        /// Assignee emails that would have matched.
        assignees: Vec<String>,
    },
}

impl Display for DenialReason {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingAuthentication => formatter.write_str("authentication required"),
            Self::InsufficientRole { role, required } => write!(
                formatter,
                "role '{role}' is not permitted; requires {}",
                required.as_str()
            ),
            Self::MissingCapability { role, capabilities } => {
                let names = capabilities
                    .iter()
                    .map(|capability| format!("'{}'", capability.as_str()))
                    .collect::<Vec<_>>()
                    .join(" or ");
                write!(formatter, "role '{role}' is missing capability {names}")
            }
            Self::NotAssigned {
                action,
                email,
                assignees,
            } if assignees.is_empty() => write!(
                formatter,
                "'{email}' may only {} assigned resources and this resource has no assignees",
                action.as_str()
            ),
            Self::NotAssigned {
                action,
                email,
                assignees,
            } => write!(
                formatter,
                "'{email}' may only {} assigned resources; assignees are {}",
                action.as_str(),
                assignees.join(", ")
            ),
        }
    }
}

impl From<DenialReason> for AppError {
    fn from(value: DenialReason) -> Self {
        match value {
            DenialReason::MissingAuthentication => AppError::Unauthorized(value.to_string()),
            _ => AppError::Forbidden(value.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use dispatchdesk_core::AppError;

    use crate::{Capability, TicketAction};

    use super::{DenialReason, RoleRequirement};

    #[test]
    fn missing_authentication_maps_to_unauthorized() {
        let error = AppError::from(DenialReason::MissingAuthentication);
        assert!(matches!(error, AppError::Unauthorized(_)));
    }

    #[test]
    fn role_denials_map_to_forbidden() {
        let error = AppError::from(DenialReason::InsufficientRole {
            role: "technician".to_owned(),
            required: RoleRequirement::Elevated,
        });
        assert!(matches!(error, AppError::Forbidden(_)));
    }

    #[test]
    fn capability_denial_names_every_alternative() {
        let reason = DenialReason::MissingCapability {
            role: "user".to_owned(),
            capabilities: vec![Capability::EditAllTickets, Capability::EditOwnTickets],
        };

        assert_eq!(
            reason.to_string(),
            "role 'user' is missing capability 'canEditAllTickets' or 'canEditOwnTickets'"
        );
    }

    #[test]
    fn ownership_denial_lists_assignees() {
        let reason = DenialReason::NotAssigned {
            action: TicketAction::Edit,
            email: "a@x.com".to_owned(),
            assignees: vec!["b@x.com".to_owned(), "c@x.com".to_owned()],
        };

        assert!(reason.to_string().ends_with("assignees are b@x.com, c@x.com"));
    }
}
