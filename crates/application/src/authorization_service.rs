use dispatchdesk_core::{AppResult, UserIdentity};
use dispatchdesk_domain::{AssignedResource, Capability, TicketAction};

use crate::{AccessDecision, AuthorizationGate, PermissionEvaluator, PermissionSnapshot};

mod capabilities;
mod ownership;


/// Application service for fine-grained authorization decisions.
///
/// Every call evaluates a fresh permission snapshot, so permission edits take
/// effect on the caller's next request.
#[derive(Clone)]
pub struct AuthorizationService {
    evaluator: PermissionEvaluator,
}

impl AuthorizationService {
    /// Creates a new authorization service from a permission evaluator.
    #[must_use]
    pub fn new(evaluator: PermissionEvaluator) -> Self {
        Self { evaluator }
    }

    /// Returns the evaluator used for snapshots.
    #[must_use]
    pub fn evaluator(&self) -> &PermissionEvaluator {
        &self.evaluator
    }
}
