use super::*;

impl AuthorizationService {
    /// Decides whether the caller may perform an action on an assigned
    /// resource.
    pub async fn authorize_owned_action<R>(
        &self,
        actor: &UserIdentity,
        action: TicketAction,
        resource: &R,
    ) -> AppResult<AccessDecision>
    where
        R: AssignedResource + Sync + ?Sized,
    {
        let snapshot = self.evaluator.snapshot(actor).await?;

        Ok(AuthorizationGate::authorize_owned_action(
            actor,
            snapshot.permissions(),
            action,
            resource,
        ))
    }

    /// Ensures the caller may perform an action on an assigned resource.
    pub async fn require_owned_action<R>(
        &self,
        actor: &UserIdentity,
        action: TicketAction,
        resource: &R,
    ) -> AppResult<()>
    where
        R: AssignedResource + Sync + ?Sized,
    {
        self.authorize_owned_action(actor, action, resource)
            .await?
            .into_result()
    }
}
