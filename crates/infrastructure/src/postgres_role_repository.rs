use std::collections::BTreeMap;

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::warn;

use dispatchdesk_application::RoleRepository;
use dispatchdesk_core::{AppError, AppResult, TenantId};
use dispatchdesk_domain::{Capability, PermissionSet, ReservedRole, Role, RoleName};


/// PostgreSQL-backed repository for role definitions.
///
/// Each role is one row keyed by `(tenant_id, name)` with its permission map
/// in a JSONB column, so every write replaces the map atomically.
#[derive(Clone)]
pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RoleRow {
    name: String,
    is_custom: bool,
    permissions: Json<BTreeMap<String, bool>>,
}

impl RoleRow {
    fn into_role(self, tenant_id: TenantId) -> AppResult<Role> {
        let name = RoleName::new(self.name.as_str()).map_err(|error| {
            AppError::Internal(format!(
                "invalid stored role name '{}' for tenant '{tenant_id}': {error}",
                self.name
            ))
        })?;

        let mut permissions = PermissionSet::empty();
        for (key, granted) in self.permissions.0 {
            match Capability::from_transport(key.as_str()) {
                Ok(capability) => permissions.set(capability, granted),
                Err(_) => warn!(
                    %tenant_id,
                    role = name.as_str(),
                    capability = key.as_str(),
                    "ignoring unknown stored capability"
                ),
            }
        }

        Ok(Role::new(name, self.is_custom, permissions))
    }
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn find_role(&self, tenant_id: TenantId, role_name: &str) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT name, is_custom, permissions
            FROM roles
            WHERE tenant_id = $1 AND name = $2
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(role_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find role: {error}")))?
        .map(|row| row.into_role(tenant_id))
        .transpose()
    }

    async fn list_roles(&self, tenant_id: TenantId) -> AppResult<Vec<Role>> {
        sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT name, is_custom, permissions
            FROM roles
            WHERE tenant_id = $1
            ORDER BY name
            "#,
        )
        .bind(tenant_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list roles: {error}")))?
        .into_iter()
        .map(|row| row.into_role(tenant_id))
        .collect()
    }

    async fn create_role(&self, tenant_id: TenantId, role: Role) -> AppResult<Role> {
        sqlx::query_as::<_, RoleRow>(
            r#"
            INSERT INTO roles (tenant_id, name, is_custom, permissions)
            VALUES ($1, $2, $3, $4)
            RETURNING name, is_custom, permissions
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(role.name().as_str())
        .bind(role.is_custom())
        .bind(Json(role.permissions().to_transport()))
        .fetch_one(&self.pool)
        .await
        .map_err(|error| map_role_conflict(error, role.name().as_str(), "create"))?
        .into_role(tenant_id)
    }

    async fn upsert_role(&self, tenant_id: TenantId, role: Role) -> AppResult<Role> {
        sqlx::query_as::<_, RoleRow>(
            r#"
            INSERT INTO roles (tenant_id, name, is_custom, permissions)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (tenant_id, name) DO UPDATE
            SET permissions = EXCLUDED.permissions,
                updated_at = now()
            RETURNING name, is_custom, permissions
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(role.name().as_str())
        .bind(role.is_custom())
        .bind(Json(role.permissions().to_transport()))
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to save role: {error}")))?
        .into_role(tenant_id)
    }

    async fn rename_role(
        &self,
        tenant_id: TenantId,
        old_name: &RoleName,
        new_name: &RoleName,
    ) -> AppResult<Role> {
        sqlx::query_as::<_, RoleRow>(
            r#"
            UPDATE roles
            SET name = $3,
                updated_at = now()
            WHERE tenant_id = $1
                AND name = $2
                AND is_custom
            RETURNING name, is_custom, permissions
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(old_name.as_str())
        .bind(new_name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| map_role_conflict(error, new_name.as_str(), "rename"))?
        .ok_or_else(|| AppError::NotFound(format!("custom role '{old_name}' was not found")))?
        .into_role(tenant_id)
    }

    async fn delete_role(&self, tenant_id: TenantId, role_name: &str) -> AppResult<()> {
        if ReservedRole::is_reserved_name(role_name) {
            return Err(AppError::Reserved(format!(
                "role '{role_name}' is reserved and cannot be deleted"
            )));
        }

        let rows_affected = sqlx::query(
            r#"
            DELETE FROM roles
            WHERE tenant_id = $1
                AND name = $2
                AND is_custom
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(role_name)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete role: {error}")))?
        .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::NotFound(format!(
                "custom role '{role_name}' was not found"
            )));
        }

        Ok(())
    }
}

fn map_role_conflict(error: sqlx::Error, role_name: &str, operation: &str) -> AppError {
    if let sqlx::Error::Database(database_error) = &error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict(format!("role '{role_name}' already exists"));
    }

    AppError::Internal(format!("failed to {operation} role: {error}"))
}
