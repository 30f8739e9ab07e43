use std::collections::BTreeMap;

use dispatchdesk_application::{OrphanedRoleReference, RenameRoleOutcome};
use dispatchdesk_domain::Role;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// API representation of a role definition.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-response.ts"
)]
pub struct RoleResponse {
    pub name: String,
    pub is_custom: bool,
    pub permissions: BTreeMap<String, bool>,
}

impl From<Role> for RoleResponse {
    fn from(value: Role) -> Self {
        Self {
            permissions: value.permissions().to_transport(),
            is_custom: value.is_custom(),
            name: String::from(value.name().clone()),
        }
    }
}

/// Incoming payload replacing a role's permission map.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-role-permissions-request.ts"
)]
pub struct UpdateRolePermissionsRequest {
    pub permissions: BTreeMap<String, bool>,
}

/// Incoming payload for custom role creation.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-role-request.ts"
)]
pub struct CreateRoleRequest {
    pub role_name: String,
    #[serde(default)]
    #[ts(optional)]
    pub based_on: Option<String>,
}

/// Incoming payload for a custom role rename.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/rename-role-request.ts"
)]
pub struct RenameRoleRequest {
    pub new_role_name: String,
}

/// Result of a custom role rename.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/rename-role-response.ts"
)]
pub struct RenameRoleResponse {
    pub role: RoleResponse,
    #[ts(type = "number")]
    pub users_updated: u64,
    /// Holders still on the old name; `null` when the count failed.
    #[ts(type = "number | null")]
    pub users_remaining: Option<u64>,
}

impl From<RenameRoleOutcome> for RenameRoleResponse {
    fn from(value: RenameRoleOutcome) -> Self {
        Self {
            role: RoleResponse::from(value.role),
            users_updated: value.users_updated,
            users_remaining: value.users_remaining,
        }
    }
}

/// Role name held by identities with no stored definition.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/orphaned-role-response.ts"
)]
pub struct OrphanedRoleResponse {
    pub role_name: String,
    #[ts(type = "number")]
    pub identity_count: u64,
}

impl From<OrphanedRoleReference> for OrphanedRoleResponse {
    fn from(value: OrphanedRoleReference) -> Self {
        Self {
            role_name: value.role_name,
            identity_count: value.identity_count,
        }
    }
}

/// Incoming payload moving identities off an orphaned role name.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/reassign-identities-request.ts"
)]
pub struct ReassignIdentitiesRequest {
    pub from_role_name: String,
    pub to_role_name: String,
}

/// Number of identities moved by a reassignment.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/identities-reassigned-response.ts"
)]
pub struct IdentitiesReassignedResponse {
    #[ts(type = "number")]
    pub users_updated: u64,
}
