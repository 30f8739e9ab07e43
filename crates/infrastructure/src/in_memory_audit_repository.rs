use async_trait::async_trait;
use tokio::sync::RwLock;

use dispatchdesk_application::{AuditEvent, AuditRepository};
use dispatchdesk_core::{AppResult, TenantId};

/// In-memory activity log for tests and local runs.
#[derive(Debug, Default)]
pub struct InMemoryAuditRepository {
    events: RwLock<Vec<AuditEvent>>,
}

impl InMemoryAuditRepository {
    /// Creates an empty in-memory log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the events recorded for one tenant, oldest first.
    pub async fn events(&self, tenant_id: TenantId) -> Vec<AuditEvent> {
        self.events
            .read()
            .await
            .iter()
            .filter(|event| event.tenant_id == tenant_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl AuditRepository for InMemoryAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.write().await.push(event);
        Ok(())
    }
}
