//! Application services and ports.

#![forbid(unsafe_code)]

mod audit_ports;
mod authorization_gate;
mod authorization_service;
mod ownership_resolver;
mod permission_evaluator;
mod role_administration_service;
mod role_ports;

pub use audit_ports::{AuditEvent, AuditRepository};
pub use authorization_gate::{AccessDecision, AuthorizationGate, RequestContext};
pub use authorization_service::AuthorizationService;
pub use ownership_resolver::OwnershipResolver;
pub use permission_evaluator::{PermissionEvaluator, PermissionSnapshot};
pub use role_administration_service::RoleAdministrationService;
pub use role_ports::{
    CreateRoleInput, IdentityRepository, OrphanedRoleReference, RenameRoleOutcome,
    RoleReference, RoleRepository,
};
