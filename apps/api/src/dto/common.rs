use std::collections::BTreeMap;

use dispatchdesk_application::PermissionSnapshot;
use dispatchdesk_core::UserIdentity;
use serde::Serialize;
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
    pub postgres: &'static str,
}

/// API representation of the authenticated caller.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/current-user-response.ts"
)]
pub struct CurrentUserResponse {
    pub subject: String,
    pub display_name: String,
    pub email: String,
    pub role: String,
    pub approved: bool,
    pub tenant_id: String,
    pub permissions: BTreeMap<String, bool>,
}

impl CurrentUserResponse {
    pub fn from_identity(identity: &UserIdentity, snapshot: &PermissionSnapshot) -> Self {
        Self {
            subject: identity.subject().to_owned(),
            display_name: identity.display_name().to_owned(),
            email: identity.email().to_owned(),
            role: identity.role().to_owned(),
            approved: identity.is_approved(),
            tenant_id: identity.tenant_id().to_string(),
            permissions: snapshot.permissions().to_transport(),
        }
    }
}
