use super::*;

pub async fn list_orphaned_identities_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<OrphanedRoleResponse>>> {
    let orphans = state
        .role_administration_service
        .orphaned_identities(&user)
        .await?
        .into_iter()
        .map(OrphanedRoleResponse::from)
        .collect();

    Ok(Json(orphans))
}

pub async fn reassign_identities_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    ApiJson(payload): ApiJson<ReassignIdentitiesRequest>,
) -> ApiResult<Json<IdentitiesReassignedResponse>> {
    let users_updated = state
        .role_administration_service
        .reassign_identities(
            &user,
            payload.from_role_name.as_str(),
            payload.to_role_name.as_str(),
        )
        .await?;

    Ok(Json(IdentitiesReassignedResponse { users_updated }))
}
