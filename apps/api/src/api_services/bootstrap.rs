use dispatchdesk_core::{AppError, TenantId};
use tracing::info;

use crate::state::AppState;

/// Seeds the reserved roles of the configured bootstrap tenant.
pub async fn seed_bootstrap_tenant(state: &AppState, tenant_id: TenantId) -> Result<(), AppError> {
    let seeded = state
        .role_administration_service
        .seed_reserved_roles(tenant_id)
        .await?;

    info!(%tenant_id, seeded = seeded.len(), "bootstrap tenant roles ready");
    Ok(())
}
