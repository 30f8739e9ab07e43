//! Domain entities and invariants of the authorization core.

#![forbid(unsafe_code)]

mod assignment;
mod audit;
mod capability;
mod denial;
mod permission_set;
mod role;

pub use assignment::{
    AssignedResource, Assignee, ResourceAssignment, TicketAction, normalize_email,
};
pub use audit::AuditAction;
pub use capability::Capability;
pub use denial::{DenialReason, RoleRequirement};
pub use permission_set::PermissionSet;
pub use role::{ROLE_NAME_MAX_LENGTH, ReservedRole, Role, RoleName};
