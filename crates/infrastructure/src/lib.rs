//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_audit_repository;
mod in_memory_identity_repository;
mod in_memory_role_repository;
mod postgres_audit_repository;
mod postgres_identity_repository;
mod postgres_role_repository;

pub use in_memory_audit_repository::InMemoryAuditRepository;
pub use in_memory_identity_repository::InMemoryIdentityRepository;
pub use in_memory_role_repository::InMemoryRoleRepository;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_identity_repository::PostgresIdentityRepository;
pub use postgres_role_repository::PostgresRoleRepository;
