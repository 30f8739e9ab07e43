use std::fmt::{Display, Formatter};

use dispatchdesk_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::{Capability, PermissionSet};

/// Maximum accepted role name length.
pub const ROLE_NAME_MAX_LENGTH: usize = 64;

/// Validated role name.
///
/// Accepts ASCII letters, digits, underscore and hyphen. Matching is
/// case-sensitive everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoleName(String);

impl RoleName {
    /// Creates a validated role name.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();

        if value.is_empty() {
            return Err(AppError::InvalidName(
                "role name must not be empty".to_owned(),
            ));
        }

        if value.len() > ROLE_NAME_MAX_LENGTH {
            return Err(AppError::InvalidName(format!(
                "role name must not exceed {ROLE_NAME_MAX_LENGTH} characters"
            )));
        }

        if let Some(invalid) = value
            .chars()
            .find(|character| !is_allowed_role_name_character(*character))
        {
            return Err(AppError::InvalidName(format!(
                "role name '{value}' contains '{invalid}'; only letters, digits, '_' and '-' are allowed"
            )));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the reserved role with this exact name, if any.
    #[must_use]
    pub fn reserved(&self) -> Option<ReservedRole> {
        ReservedRole::from_name(self.as_str())
    }
}

fn is_allowed_role_name_character(character: char) -> bool {
    character.is_ascii_alphanumeric() || character == '_' || character == '-'
}

impl TryFrom<String> for RoleName {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoleName> for String {
    fn from(value: RoleName) -> Self {
        value.0
    }
}

impl Display for RoleName {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Role names that exist in every tenant and sit outside the custom role
/// lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedRole {
    /// Default role for approved accounts.
    User,
    /// Field technician.
    Technician,
    /// Tenant administrator.
    Administrator,
    /// Super-role; always holds every capability.
    Sysadmin,
}

impl ReservedRole {
    /// Returns the reserved role name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Technician => "technician",
            Self::Administrator => "administrator",
            Self::Sysadmin => "sysadmin",
        }
    }

    /// Returns all reserved roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[ReservedRole] = &[
            ReservedRole::User,
            ReservedRole::Technician,
            ReservedRole::Administrator,
            ReservedRole::Sysadmin,
        ];

        ALL
    }

    /// Resolves a reserved role by exact, case-sensitive name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|reserved| reserved.as_str() == name)
    }

    /// Returns whether the name is one of the reserved role names.
    #[must_use]
    pub fn is_reserved_name(name: &str) -> bool {
        Self::from_name(name).is_some()
    }

    /// Returns whether the name is the super-role.
    #[must_use]
    pub fn is_super_name(name: &str) -> bool {
        name == Self::Sysadmin.as_str()
    }

    /// Returns whether holders pass the administrator-or-above gate.
    #[must_use]
    pub fn is_elevated(&self) -> bool {
        matches!(self, Self::Administrator | Self::Sysadmin)
    }

    /// Returns the permission map seeded for this role at bootstrap.
    #[must_use]
    pub fn default_permissions(&self) -> PermissionSet {
        match self {
            Self::User => PermissionSet::from_granted([
                Capability::ViewDashboard,
                Capability::ViewCalendar,
                Capability::SubmitBugReports,
            ]),
            Self::Technician => PermissionSet::baseline()
                .with(Capability::CreateTickets, true)
                .with(Capability::ViewTechnicians, true)
                .with(Capability::ViewAbsences, true)
                .with(Capability::ViewSkills, true)
                .with(Capability::SubmitBugReports, true),
            Self::Administrator | Self::Sysadmin => PermissionSet::all_granted(),
        }
    }
}

impl Display for ReservedRole {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Persisted role definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    name: RoleName,
    is_custom: bool,
    permissions: PermissionSet,
}

impl Role {
    /// Creates a role definition.
    #[must_use]
    pub fn new(name: RoleName, is_custom: bool, permissions: PermissionSet) -> Self {
        Self {
            name,
            is_custom,
            permissions,
        }
    }

    /// Creates a custom role definition.
    #[must_use]
    pub fn custom(name: RoleName, permissions: PermissionSet) -> Self {
        Self::new(name, true, permissions)
    }

    /// Creates the seeded definition of a reserved role.
    pub fn reserved(role: ReservedRole) -> AppResult<Self> {
        Ok(Self::new(
            RoleName::new(role.as_str())?,
            false,
            role.default_permissions(),
        ))
    }

    /// Returns the role name.
    #[must_use]
    pub fn name(&self) -> &RoleName {
        &self.name
    }

    /// Returns whether the role was created through role administration.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.is_custom
    }

    /// Returns the stored permission map.
    #[must_use]
    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    /// Returns the role under a new name, keeping everything else.
    #[must_use]
    pub fn renamed(self, name: RoleName) -> Self {
        Self { name, ..self }
    }

    /// Returns the role with its permission map replaced.
    #[must_use]
    pub fn with_permissions(self, permissions: PermissionSet) -> Self {
        Self {
            permissions,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use dispatchdesk_core::AppError;

    use crate::{Capability, PermissionSet};

    use super::{ROLE_NAME_MAX_LENGTH, ReservedRole, Role, RoleName};

    #[test]
    fn role_name_accepts_letters_digits_underscore_and_hyphen() {
        assert!(RoleName::new("field-tech_2").is_ok());
    }

    #[test]
    fn role_name_rejects_whitespace_and_punctuation() {
        assert!(matches!(
            RoleName::new("field tech"),
            Err(AppError::InvalidName(_))
        ));
        assert!(matches!(
            RoleName::new("tech.lead"),
            Err(AppError::InvalidName(_))
        ));
        assert!(matches!(RoleName::new(""), Err(AppError::InvalidName(_))));
    }

    #[test]
    fn role_name_rejects_overlong_values() {
        let name = "a".repeat(ROLE_NAME_MAX_LENGTH + 1);
        assert!(RoleName::new(name).is_err());
    }

    #[test]
    fn reserved_lookup_is_case_sensitive() {
        assert_eq!(
            ReservedRole::from_name("sysadmin"),
            Some(ReservedRole::Sysadmin)
        );
        assert_eq!(ReservedRole::from_name("Sysadmin"), None);
        assert!(!ReservedRole::is_reserved_name("Administrator"));
    }

    #[test]
    fn only_administrator_and_sysadmin_are_elevated() {
        let elevated = ReservedRole::all()
            .iter()
            .filter(|role| role.is_elevated())
            .map(ReservedRole::as_str)
            .collect::<Vec<_>>();
        assert_eq!(elevated, vec!["administrator", "sysadmin"]);
    }

    #[test]
    fn renaming_keeps_permissions_and_custom_flag() {
        let permissions = PermissionSet::baseline().with(Capability::AssignTickets, true);
        let role = Role::custom(
            RoleName::new("field-tech").unwrap_or_else(|_| panic!("test")),
            permissions.clone(),
        );

        let renamed = role.renamed(RoleName::new("field-agent").unwrap_or_else(|_| panic!("test")));
        assert_eq!(renamed.name().as_str(), "field-agent");
        assert!(renamed.is_custom());
        assert_eq!(renamed.permissions(), &permissions);
    }

    #[test]
    fn role_name_deserialization_validates() {
        let parsed = serde_json::from_value::<RoleName>(serde_json::json!("bad name"));
        assert!(parsed.is_err());
    }

    proptest! {
        #[test]
        fn names_from_allowed_alphabet_are_accepted(name in "[A-Za-z0-9_-]{1,64}") {
            prop_assert!(RoleName::new(name).is_ok());
        }

        #[test]
        fn names_with_any_disallowed_character_are_rejected(
            prefix in "[a-z]{0,8}",
            invalid in "[ ./@!#$%^&*()+=,;:]",
            suffix in "[a-z]{0,8}",
        ) {
            let name = format!("{prefix}{invalid}{suffix}");
            prop_assert!(matches!(RoleName::new(name), Err(AppError::InvalidName(_))));
        }
    }
}
