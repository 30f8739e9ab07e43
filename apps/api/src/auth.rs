use axum::Json;
use axum::extract::Extension;
use dispatchdesk_application::PermissionSnapshot;
use dispatchdesk_core::UserIdentity;

use crate::dto::CurrentUserResponse;

/// Session key under which the session service stores the caller identity.
pub const SESSION_USER_KEY: &str = "user_identity";

pub async fn me_handler(
    Extension(identity): Extension<UserIdentity>,
    Extension(snapshot): Extension<PermissionSnapshot>,
) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse::from_identity(&identity, &snapshot))
}
