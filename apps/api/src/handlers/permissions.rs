use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;

use dispatchdesk_application::CreateRoleInput;
use dispatchdesk_core::UserIdentity;
use dispatchdesk_domain::PermissionSet;

use crate::dto::{
    CreateRoleRequest, IdentitiesReassignedResponse, OrphanedRoleResponse,
    ReassignIdentitiesRequest, RenameRoleRequest, RenameRoleResponse, RoleResponse,
    UpdateRolePermissionsRequest,
};
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::state::AppState;

mod definitions;
mod lifecycle;
mod orphans;


pub use definitions::{get_role_handler, list_roles_handler, update_role_permissions_handler};
pub use lifecycle::{create_role_handler, delete_role_handler, rename_role_handler};
pub use orphans::{list_orphaned_identities_handler, reassign_identities_handler};
