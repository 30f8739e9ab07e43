use super::*;

pub async fn list_roles_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<RoleResponse>>> {
    let roles = state
        .role_administration_service
        .list_roles(&user)
        .await?
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Json(roles))
}

pub async fn get_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(role_name): Path<String>,
) -> ApiResult<Json<RoleResponse>> {
    let role = state
        .role_administration_service
        .get_role(&user, role_name.as_str())
        .await?;

    Ok(Json(RoleResponse::from(role)))
}

pub async fn update_role_permissions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(role_name): Path<String>,
    ApiJson(payload): ApiJson<UpdateRolePermissionsRequest>,
) -> ApiResult<Json<RoleResponse>> {
    let permissions = PermissionSet::from_transport(&payload.permissions)?;

    let role = state
        .role_administration_service
        .update_role_permissions(&user, role_name.as_str(), permissions)
        .await?;

    Ok(Json(RoleResponse::from(role)))
}
