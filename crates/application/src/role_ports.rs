mod projections;
mod repositories;

pub use projections::{
    CreateRoleInput, OrphanedRoleReference, RenameRoleOutcome, RoleReference,
};
pub use repositories::{IdentityRepository, RoleRepository};
