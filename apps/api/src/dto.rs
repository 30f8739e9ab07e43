mod common;
mod permissions;

pub use common::{CurrentUserResponse, HealthResponse};
pub use permissions::{
    CreateRoleRequest, IdentitiesReassignedResponse, OrphanedRoleResponse,
    ReassignIdentitiesRequest, RenameRoleRequest, RenameRoleResponse, RoleResponse,
    UpdateRolePermissionsRequest,
};

#[cfg(test)]
mod tests {
    use super::{
        CreateRoleRequest, CurrentUserResponse, HealthResponse, IdentitiesReassignedResponse,
        OrphanedRoleResponse, ReassignIdentitiesRequest, RenameRoleRequest, RenameRoleResponse,
        RoleResponse, UpdateRolePermissionsRequest,
    };

    use crate::error::ErrorResponse;
    use ts_rs::Config;
    use ts_rs::TS;

    #[test]
    fn export_ts_bindings() -> Result<(), ts_rs::ExportError> {
        let config = Config::default();

        HealthResponse::export(&config)?;
        CurrentUserResponse::export(&config)?;
        RoleResponse::export(&config)?;
        CreateRoleRequest::export(&config)?;
        UpdateRolePermissionsRequest::export(&config)?;
        RenameRoleRequest::export(&config)?;
        RenameRoleResponse::export(&config)?;
        OrphanedRoleResponse::export(&config)?;
        ReassignIdentitiesRequest::export(&config)?;
        IdentitiesReassignedResponse::export(&config)?;
        ErrorResponse::export(&config)?;

        Ok(())
    }

    #[test]
    fn requests_use_camel_case_keys() {
        let create = serde_json::from_value::<CreateRoleRequest>(serde_json::json!({
            "roleName": "field-tech",
            "basedOn": "technician",
        }));
        assert!(create.is_ok_and(|request| request.role_name == "field-tech"
            && request.based_on.as_deref() == Some("technician")));

        let rename = serde_json::from_value::<RenameRoleRequest>(serde_json::json!({
            "newRoleName": "field-agent",
        }));
        assert!(rename.is_ok_and(|request| request.new_role_name == "field-agent"));

        let reassign = serde_json::from_value::<ReassignIdentitiesRequest>(serde_json::json!({
            "fromRoleName": "field-tech",
            "toRoleName": "technician",
        }));
        assert!(reassign.is_ok());
    }
}
