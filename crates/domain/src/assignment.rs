use serde::{Deserialize, Serialize};

use crate::Capability;

/// Reference to an identity assigned to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    email: String,
    display_name: Option<String>,
}

impl Assignee {
    /// Creates an assignee reference keyed by email.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: None,
        }
    }

    /// Attaches a display name used in denial messages only.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Returns the assignee email as stored.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns the display name, if one was attached.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns whether the assignee refers to the given email address.
    #[must_use]
    pub fn matches_email(&self, email: &str) -> bool {
        let expected = normalize_email(email);
        !expected.is_empty() && normalize_email(self.email.as_str()) == expected
    }
}

/// Normalizes an email address for identity comparison.
#[must_use]
pub fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Resource carrying an assignee list that scopes "own-only" capabilities.
pub trait AssignedResource {
    /// Returns the identities assigned to the resource.
    fn assignees(&self) -> &[Assignee];
}

/// Minimal assignment projection of a resource such as a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAssignment {
    resource_id: String,
    assignees: Vec<Assignee>,
}

impl ResourceAssignment {
    /// Creates an assignment projection.
    #[must_use]
    pub fn new(resource_id: impl Into<String>, assignees: Vec<Assignee>) -> Self {
        Self {
            resource_id: resource_id.into(),
            assignees,
        }
    }

    /// Returns the resource identifier.
    #[must_use]
    pub fn resource_id(&self) -> &str {
        self.resource_id.as_str()
    }
}

impl AssignedResource for ResourceAssignment {
    fn assignees(&self) -> &[Assignee] {
        self.assignees.as_slice()
    }
}

/// Actions on assigned tickets that come in "all" and "own" flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketAction {
    /// Modify ticket fields.
    Edit,
    /// Remove the ticket.
    Delete,
}

impl TicketAction {
    /// Returns the capability granting the action on every ticket.
    #[must_use]
    pub fn all_capability(&self) -> Capability {
        match self {
            Self::Edit => Capability::EditAllTickets,
            Self::Delete => Capability::DeleteAllTickets,
        }
    }

    /// Returns the capability granting the action on assigned tickets only.
    #[must_use]
    pub fn own_capability(&self) -> Capability {
        match self {
            Self::Edit => Capability::EditOwnTickets,
            Self::Delete => Capability::DeleteOwnTickets,
        }
    }

    /// Returns a stable label for messages.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }
}
