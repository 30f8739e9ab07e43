use dispatchdesk_domain::DenialReason;

use super::*;

impl AuthorizationService {
    /// Ensures the caller's role carries a capability and returns the
    /// snapshot the decision was made on.
    pub async fn require_capability(
        &self,
        actor: &UserIdentity,
        capability: Capability,
    ) -> AppResult<PermissionSnapshot> {
        let snapshot = self.evaluator.snapshot(actor).await?;
        if snapshot.is_granted(capability) {
            return Ok(snapshot);
        }

        Err(DenialReason::MissingCapability {
            role: actor.role().to_owned(),
            capabilities: vec![capability],
        }
        .into())
    }

    /// Returns whether the caller's role currently carries a capability.
    pub async fn has_capability(
        &self,
        actor: &UserIdentity,
        capability: Capability,
    ) -> AppResult<bool> {
        Ok(self.evaluator.snapshot(actor).await?.is_granted(capability))
    }
}
