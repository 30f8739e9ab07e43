use super::*;

pub async fn create_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    ApiJson(payload): ApiJson<CreateRoleRequest>,
) -> ApiResult<(StatusCode, Json<RoleResponse>)> {
    let role = state
        .role_administration_service
        .create_role(
            &user,
            CreateRoleInput {
                name: payload.role_name,
                based_on: payload.based_on.filter(|value| !value.trim().is_empty()),
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(RoleResponse::from(role))))
}

pub async fn delete_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(role_name): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .role_administration_service
        .delete_role(&user, role_name.as_str())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn rename_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(role_name): Path<String>,
    ApiJson(payload): ApiJson<RenameRoleRequest>,
) -> ApiResult<Json<RenameRoleResponse>> {
    let outcome = state
        .role_administration_service
        .rename_role(&user, role_name.as_str(), payload.new_role_name.as_str())
        .await?;

    Ok(Json(RenameRoleResponse::from(outcome)))
}
