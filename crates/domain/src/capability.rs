use std::fmt::{Display, Formatter};
use std::str::FromStr;

use dispatchdesk_core::AppError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Named permission flags a role may carry.
///
/// The vocabulary is closed: stored permission maps and transport payloads
/// use the `can...` keys returned by [`Capability::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    /// Shows the dashboard page.
    ViewDashboard,
    /// Shows the scheduling calendar.
    ViewCalendar,
    /// Shows the ticket list.
    ViewTickets,
    /// Shows the technician directory.
    ViewTechnicians,
    /// Shows the department directory.
    ViewDepartments,
    /// Shows absence tracking.
    ViewAbsences,
    /// Shows the skill matrix.
    ViewSkills,
    /// Shows the activity log.
    ViewActivityLog,
    /// Allows opening new tickets.
    CreateTickets,
    /// Allows editing tickets assigned to the caller.
    EditOwnTickets,
    /// Allows editing every ticket.
    EditAllTickets,
    /// Allows deleting tickets assigned to the caller.
    DeleteOwnTickets,
    /// Allows deleting every ticket.
    DeleteAllTickets,
    /// Allows changing ticket assignees.
    AssignTickets,
    /// Shows the user list.
    ViewUsers,
    /// Allows approving pending accounts.
    ApproveUsers,
    /// Allows editing user profiles.
    EditUsers,
    /// Allows deleting users.
    DeleteUsers,
    /// Allows changing the role of a user.
    ChangeUserRoles,
    /// Allows filing bug reports.
    SubmitBugReports,
    /// Allows triaging and closing bug reports.
    ManageBugReports,
    /// Allows technician administration.
    ManageTechnicians,
    /// Allows department administration.
    ManageDepartments,
    /// Allows skill matrix administration.
    ManageSkills,
    /// Allows role and permission administration.
    ManagePermissions,
}

impl Capability {
    /// Returns a stable storage value for this capability.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewDashboard => "canViewDashboard",
            Self::ViewCalendar => "canViewCalendar",
            Self::ViewTickets => "canViewTickets",
            Self::ViewTechnicians => "canViewTechnicians",
            Self::ViewDepartments => "canViewDepartments",
            Self::ViewAbsences => "canViewAbsences",
            Self::ViewSkills => "canViewSkills",
            Self::ViewActivityLog => "canViewActivityLog",
            Self::CreateTickets => "canCreateTickets",
            Self::EditOwnTickets => "canEditOwnTickets",
            Self::EditAllTickets => "canEditAllTickets",
            Self::DeleteOwnTickets => "canDeleteOwnTickets",
            Self::DeleteAllTickets => "canDeleteAllTickets",
            Self::AssignTickets => "canAssignTickets",
            Self::ViewUsers => "canViewUsers",
            Self::ApproveUsers => "canApproveUsers",
            Self::EditUsers => "canEditUsers",
            Self::DeleteUsers => "canDeleteUsers",
            Self::ChangeUserRoles => "canChangeUserRoles",
            Self::SubmitBugReports => "canSubmitBugReports",
            Self::ManageBugReports => "canManageBugReports",
            Self::ManageTechnicians => "canManageTechnicians",
            Self::ManageDepartments => "canManageDepartments",
            Self::ManageSkills => "canManageSkills",
            Self::ManagePermissions => "canManagePermissions",
        }
    }

    /// Returns all known capabilities.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Capability] = &[
            Capability::ViewDashboard,
            Capability::ViewCalendar,
            Capability::ViewTickets,
            Capability::ViewTechnicians,
            Capability::ViewDepartments,
            Capability::ViewAbsences,
            Capability::ViewSkills,
            Capability::ViewActivityLog,
            Capability::CreateTickets,
            Capability::EditOwnTickets,
            Capability::EditAllTickets,
            Capability::DeleteOwnTickets,
            Capability::DeleteAllTickets,
            Capability::AssignTickets,
            Capability::ViewUsers,
            Capability::ApproveUsers,
            Capability::EditUsers,
            Capability::DeleteUsers,
            Capability::ChangeUserRoles,
            Capability::SubmitBugReports,
            Capability::ManageBugReports,
            Capability::ManageTechnicians,
            Capability::ManageDepartments,
            Capability::ManageSkills,
            Capability::ManagePermissions,
        ];

        ALL
    }

    /// Parses a transport value into a capability.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl FromStr for Capability {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|capability| capability.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown capability '{value}'")))
    }
}

impl Display for Capability {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::from_str(value.as_str()).map_err(serde::de::Error::custom)
    }
}
