use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use dispatchdesk_application::{IdentityRepository, RoleReference};
use dispatchdesk_core::{AppResult, TenantId, UserIdentity};

/// In-memory identity store keyed by tenant and subject.
#[derive(Debug, Default)]
pub struct InMemoryIdentityRepository {
    identities: RwLock<HashMap<(TenantId, String), UserIdentity>>,
}

impl InMemoryIdentityRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces one identity record.
    pub async fn save_identity(&self, identity: UserIdentity) {
        self.identities.write().await.insert(
            (identity.tenant_id(), identity.subject().to_owned()),
            identity,
        );
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn find_identity(
        &self,
        tenant_id: TenantId,
        subject: &str,
    ) -> AppResult<Option<UserIdentity>> {
        Ok(self
            .identities
            .read()
            .await
            .get(&(tenant_id, subject.to_owned()))
            .cloned())
    }

    async fn reassign_role(
        &self,
        tenant_id: TenantId,
        from_role: &str,
        to_role: &str,
    ) -> AppResult<u64> {
        let mut identities = self.identities.write().await;
        let mut updated = 0;

        for ((stored_tenant_id, _), identity) in identities.iter_mut() {
            if stored_tenant_id == &tenant_id && identity.role() == from_role {
                *identity = identity.clone().with_role(to_role);
                updated += 1;
            }
        }

        Ok(updated)
    }

    async fn count_identities_with_role(
        &self,
        tenant_id: TenantId,
        role_name: &str,
    ) -> AppResult<u64> {
        let identities = self.identities.read().await;
        let count = identities
            .iter()
            .filter(|((stored_tenant_id, _), identity)| {
                stored_tenant_id == &tenant_id && identity.role() == role_name
            })
            .count();

        Ok(count as u64)
    }

    async fn list_role_references(&self, tenant_id: TenantId) -> AppResult<Vec<RoleReference>> {
        let identities = self.identities.read().await;
        let mut counts = BTreeMap::<&str, u64>::new();
        for ((stored_tenant_id, _), identity) in identities.iter() {
            if stored_tenant_id == &tenant_id {
                *counts.entry(identity.role()).or_default() += 1;
            }
        }

        Ok(counts
            .into_iter()
            .map(|(role_name, identity_count)| RoleReference {
                role_name: role_name.to_owned(),
                identity_count,
            })
            .collect())
    }
}
