use std::sync::Arc;

use dispatchdesk_application::{
    AuthorizationService, IdentityRepository, RoleAdministrationService,
};
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub role_administration_service: RoleAdministrationService,
    pub authorization_service: AuthorizationService,
    pub identity_repository: Arc<dyn IdentityRepository>,
    /// Absent when the state is wired to in-memory adapters.
    pub postgres_pool: Option<PgPool>,
    pub frontend_url: String,
}
